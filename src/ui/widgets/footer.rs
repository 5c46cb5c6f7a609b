//! Footer widget with context-aware keybinding hints

use crate::app::{App, InputMode, Tab};
use crate::core::ConnectScheduler;
use crate::state::ConnectionStatus;
use crate::theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the footer with shortcuts for the current tab and input mode
pub fn render<S: ConnectScheduler>(frame: &mut Frame, app: &App<S>, area: Rect) {
    render_hints(frame, area, &hints(app));
}

fn hints<S: ConnectScheduler>(app: &App<S>) -> Vec<(&'static str, &'static str)> {
    match app.input_mode {
        InputMode::Search => return vec![("type", "Filter"), ("Enter", "Done"), ("Esc", "Clear")],
        InputMode::ProtocolPicker => {
            return vec![("↑↓", "Choose"), ("Enter", "Apply"), ("Esc", "Cancel")]
        }
        InputMode::Normal => {}
    }

    let mut hints = match app.active_tab {
        Tab::Dashboard => {
            let toggle = match app.ctx.session().status() {
                ConnectionStatus::Connected => "Disconnect",
                ConnectionStatus::Connecting => "Wait",
                ConnectionStatus::Disconnected => "Connect",
            };
            vec![("c", toggle), ("b", "Best")]
        }
        Tab::Servers => vec![
            ("↑↓", "Move"),
            ("Enter", "Connect"),
            ("s", "Switch"),
            ("/", "Search"),
        ],
        Tab::Settings => vec![("↑↓", "Move"), ("Space", "Toggle")],
    };

    if app.ctx.session().status() != ConnectionStatus::Disconnected {
        hints.push(("d", "Disconnect"));
    }
    hints.extend_from_slice(&[("Tab", "Switch Tab"), ("q", "Quit")]);
    hints
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let [hint_area, brand_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(16)]).areas(area);

    let mut hint_spans = vec![Span::raw(" ")];
    let mut current_width = 1;
    let max_width = hint_area.width as usize;

    for (i, (key, action)) in hints.iter().enumerate() {
        // "key action" plus the " │ " separator after the first item
        let sep_width = if i > 0 { 3 } else { 0 };
        let item_width = key.chars().count() + 1 + action.len() + sep_width;

        if current_width + item_width > max_width {
            break;
        }

        if i > 0 {
            hint_spans.push(Span::styled(
                " │ ",
                Style::default().fg(theme::BORDER_DEFAULT),
            ));
        }
        hint_spans.push(Span::styled(
            *key,
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
        hint_spans.push(Span::raw(" "));
        hint_spans.push(Span::styled(
            *action,
            Style::default().fg(theme::TEXT_SECONDARY),
        ));

        current_width += item_width;
    }
    frame.render_widget(Paragraph::new(Line::from(hint_spans)), hint_area);

    let branding = Line::from(Span::styled(
        format!(
            "{} v{} ",
            crate::constants::APP_NAME,
            crate::constants::APP_VERSION
        ),
        Style::default().fg(theme::NORD_POLAR_NIGHT_4),
    ));
    frame.render_widget(
        Paragraph::new(branding).alignment(Alignment::Right),
        brand_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::{Catalog, ManualScheduler};

    fn app() -> App<ManualScheduler> {
        App::with_scheduler(
            &AppConfig::default(),
            Catalog::builtin(),
            ManualScheduler::default(),
        )
    }

    #[test]
    fn test_hints_follow_connection_state() {
        let mut app = app();
        assert!(hints(&app).contains(&("c", "Connect")));
        assert!(!hints(&app).iter().any(|(k, _)| *k == "d"));

        app.connect(None);
        assert!(hints(&app).contains(&("c", "Wait")));
        assert!(hints(&app).contains(&("d", "Disconnect")));
    }

    #[test]
    fn test_search_mode_hints() {
        let mut app = app();
        app.input_mode = InputMode::Search;
        assert_eq!(hints(&app)[0], ("type", "Filter"));
    }
}
