//! UI rendering module

mod dashboard;
mod overlays;
mod servers;
mod settings;
mod widgets;

use crate::app::{App, InputMode, Tab};
use crate::core::ConnectScheduler;
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

/// Main render function - dispatches to the active tab, then overlays
pub fn render<S: ConnectScheduler>(frame: &mut Frame, app: &mut App<S>) {
    let [content, nav, footer] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    match app.active_tab {
        Tab::Dashboard => dashboard::render(frame, app, content),
        Tab::Servers => servers::render(frame, app, content),
        Tab::Settings => settings::render(frame, app, content),
    }

    widgets::nav::render(frame, app.active_tab, nav);
    widgets::footer::render(frame, app, footer);

    if app.input_mode == InputMode::ProtocolPicker {
        overlays::protocol_picker::render(frame, &mut app.protocol_list_state);
    }

    // Render toast notification if present
    if app.toast.is_some() {
        overlays::toast::render(frame, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::{Catalog, ManualScheduler};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App<ManualScheduler> {
        App::with_scheduler(
            &AppConfig::default(),
            Catalog::builtin(),
            ManualScheduler::default(),
        )
    }

    fn draw(app: &mut App<ManualScheduler>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn press(app: &mut App<ManualScheduler>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_dashboard_disconnected() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains("Not Protected"));
        assert!(screen.contains("Quick Connect"));
        assert!(screen.contains("Dashboard"));
    }

    #[test]
    fn test_dashboard_connecting_and_connected() {
        let mut app = app();
        app.connect(None);
        assert!(draw(&mut app).contains("Connecting..."));

        let ticket = app.ctx.scheduler().last_live().unwrap();
        app.on_connect_ready(ticket);
        app.toast = None;
        let screen = draw(&mut app);
        assert!(screen.contains("Protected"));
        assert!(!screen.contains("Not Protected"));
        assert!(screen.contains("New York"));
        assert!(screen.contains("WireGuard"));
    }

    #[test]
    fn test_servers_tab_lists_catalog() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        let screen = draw(&mut app);
        assert!(screen.contains("Ultra Fast"));
        assert!(screen.contains("Rocket Speed"));
        assert!(screen.contains("Excellent"));
    }

    #[test]
    fn test_servers_tab_empty_search() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        for c in "zzz".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert!(draw(&mut app).contains("No servers found"));
    }

    #[test]
    fn test_settings_tab_and_picker() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        let screen = draw(&mut app);
        assert!(screen.contains("Kill Switch"));
        assert!(screen.contains("DNS Leak Protection"));

        press(&mut app, KeyCode::Enter);
        let screen = draw(&mut app);
        assert!(screen.contains("Select Protocol"));
        assert!(screen.contains("IKEv2"));
    }

    #[test]
    fn test_toast_overlay() {
        let mut app = app();
        app.show_toast("Heads up".to_string(), crate::state::ToastType::Warning);
        let screen = draw(&mut app);
        assert!(screen.contains("WARNING"));
        assert!(screen.contains("Heads up"));
    }
}
