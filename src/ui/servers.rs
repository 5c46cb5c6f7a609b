//! Servers tab: searchable catalog table

use crate::app::{App, InputMode};
use crate::constants;
use crate::core::ConnectScheduler;
use crate::state::{ConnectionStatus, ServerDescriptor};
use crate::theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Render the server list into `area`
pub fn render<S: ConnectScheduler>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let [search_area, table_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    render_search(frame, app, search_area);

    // Disjoint field borrows: rows read from ctx, the table state is mutated
    let servers = app.ctx.catalog().search(&app.search);
    let status = app.ctx.session().status();
    let active = app.ctx.session().server().map(|s| (s.id.as_str(), status));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(format!("{}({}) ", constants::TITLE_SERVERS, servers.len()));

    if servers.is_empty() {
        frame.render_widget(
            Paragraph::new(constants::MSG_NO_SERVERS)
                .style(Style::default().fg(theme::TEXT_SECONDARY))
                .alignment(Alignment::Center)
                .block(block),
            table_area,
        );
        return;
    }

    let rows: Vec<Row> = servers.iter().map(|s| server_row(s, active)).collect();

    let header = Row::new(["", "Name", "Location", "Load", "Latency", ""]).style(
        Style::default()
            .fg(theme::ACCENT_SECONDARY)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(18),
            Constraint::Min(22),
            Constraint::Length(16),
            Constraint::Length(9),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(theme::ROW_SELECTED_BG)
            .fg(theme::ROW_SELECTED_FG)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, table_area, &mut app.server_table_state);
}

fn render_search<S: ConnectScheduler>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let editing = app.input_mode == InputMode::Search;
    let border = if editing {
        theme::BORDER_FOCUSED
    } else {
        theme::BORDER_DEFAULT
    };

    let mut spans = vec![
        Span::styled(
            " / ",
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("search: ", Style::default().fg(theme::TEXT_SECONDARY)),
        Span::styled(app.search.as_str(), Style::default().fg(theme::TEXT_PRIMARY)),
    ];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(theme::ACCENT_PRIMARY)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        ),
        area,
    );
}

fn server_row<'a>(
    server: &'a ServerDescriptor,
    active: Option<(&str, ConnectionStatus)>,
) -> Row<'a> {
    let load_color = theme::load_color(server.load);
    let filled = usize::from(server.load.bars());
    let bars = "▮".repeat(filled) + &"▯".repeat(3 - filled);

    let name = if server.premium {
        Line::from(vec![
            Span::raw(server.name.as_str()),
            Span::styled(" ★", Style::default().fg(theme::PREMIUM)),
        ])
    } else {
        Line::from(server.name.as_str())
    };

    let marker = match active {
        Some((id, ConnectionStatus::Connected)) if id == server.id => {
            Span::styled("● Connected", Style::default().fg(theme::SUCCESS))
        }
        Some((id, ConnectionStatus::Connecting)) if id == server.id => {
            Span::styled("◌ Pending", Style::default().fg(theme::WARNING))
        }
        _ => Span::raw(""),
    };

    Row::new(vec![
        Cell::from(server.flag.as_str()),
        Cell::from(name),
        Cell::from(server.location()),
        Cell::from(Line::from(vec![
            Span::styled(bars, Style::default().fg(load_color)),
            Span::raw(" "),
            Span::styled(server.load.label(), Style::default().fg(load_color)),
        ])),
        Cell::from(format!("{}ms", server.latency_ms)),
        Cell::from(marker),
    ])
    .style(Style::default().fg(theme::TEXT_PRIMARY))
}
