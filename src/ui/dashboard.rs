//! Dashboard tab: connection status, quick stats and the activity log

use crate::app::App;
use crate::constants;
use crate::core::ConnectScheduler;
use crate::state::{ConnectionStatus, ServerDescriptor};
use crate::theme;
use crate::utils;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the dashboard into `area`
pub fn render<S: ConnectScheduler>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let [status_area, detail_area] =
        Layout::vertical([Constraint::Length(9), Constraint::Min(0)]).areas(left);

    render_status(frame, app, status_area);
    match app.ctx.session().status() {
        ConnectionStatus::Connected => render_stats(frame, app, detail_area),
        ConnectionStatus::Disconnected => render_quick_connect(frame, app, detail_area),
        ConnectionStatus::Connecting => {}
    }
    render_activity(frame, app, right);
}

fn render_status<S: ConnectScheduler>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let session = app.ctx.session();
    let status = session.status();
    let color = theme::status_color(status);

    let (headline, dot, button) = match status {
        ConnectionStatus::Connected => (constants::STATUS_PROTECTED, "●", "[ Disconnect ]"),
        ConnectionStatus::Connecting => (constants::STATUS_CONNECTING, "◌", "[ Connecting... ]"),
        ConnectionStatus::Disconnected => (constants::STATUS_UNPROTECTED, "○", "[ Connect ]"),
    };

    let location = session.server().map_or_else(
        || constants::TAGLINE.to_string(),
        |s| format!("{} {}", s.flag, s.location()),
    );

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{dot} {headline}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            location,
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            button,
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(
            "{}{} ",
            constants::TITLE_DASHBOARD,
            constants::APP_NAME.to_uppercase()
        ));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

fn render_stats<S: ConnectScheduler>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let session = app.ctx.session();
    let Some(server) = session.server() else {
        return;
    };
    let uptime = session
        .connected_at()
        .map_or_else(|| constants::MSG_NO_DATA.to_string(), |t| {
            utils::format_duration(t.elapsed())
        });

    let lines = vec![
        stat_line("Server", &server.name),
        stat_line("Latency", &format!("{}ms", server.latency_ms)),
        stat_line("Protocol", &app.ctx.settings().protocol.to_string()),
        stat_line("Uptime", &uptime),
        stat_line("Received", &utils::format_bytes(session.bytes_received)),
        stat_line("Sent", &utils::format_bytes(session.bytes_sent)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(" Session ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quick_connect<S: ConnectScheduler>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let best = app
        .ctx
        .best_server()
        .map_or_else(|e| e.to_string(), describe_best);

    let lines = vec![
        Line::from(Span::styled(
            constants::LABEL_QUICK_CONNECT,
            Style::default().fg(theme::TEXT_PRIMARY),
        )),
        Line::from(Span::styled(best, Style::default().fg(theme::TEXT_SECONDARY))),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "b",
                Style::default()
                    .fg(theme::ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Connect to Best Server"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(constants::TITLE_QUICK_CONNECT);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

fn describe_best(server: &ServerDescriptor) -> String {
    format!(
        "{} {} · {} · {}ms",
        server.flag, server.name, server.city, server.latency_ms
    )
}

fn render_activity<S: ConnectScheduler>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.logs.len().saturating_sub(visible);

    let lines: Vec<Line> = app.logs[start..]
        .iter()
        .map(|entry| Line::from(Span::styled(entry.as_str(), log_style(entry))))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(constants::TITLE_ACTIVITY);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn log_style(entry: &str) -> Style {
    let color = if entry.contains("ERROR:") {
        theme::ERROR
    } else if entry.contains("WARN:") {
        theme::WARNING
    } else if entry.contains("SUCCESS:") {
        theme::SUCCESS
    } else if entry.contains("STATUS:") || entry.contains("SETTINGS:") {
        theme::ACCENT_SECONDARY
    } else {
        theme::TEXT_SECONDARY
    };
    Style::default().fg(color)
}

fn stat_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {label:<10}"),
            Style::default().fg(theme::TEXT_SECONDARY),
        ),
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(theme::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}
