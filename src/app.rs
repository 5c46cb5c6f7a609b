//! Core application state and logic.
//!
//! This module contains the [`App`] controller that owns the session context
//! and all UI state (active tab, selections, search, activity log, toasts),
//! and turns key presses into intents.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::{ListState, TableState};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::constants;
use crate::core::{Catalog, ConnectScheduler, SessionContext, ThreadScheduler};
use crate::error::Error;
use crate::state::{
    ConnectTicket, ConnectionStatus, Protocol, ServerDescriptor, SettingField, SettingUpdate,
    Toast, ToastType,
};

/// Top-level screens, in navigation order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Servers,
    Settings,
}

impl Tab {
    /// All tabs in navigation order.
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::Servers, Tab::Settings];

    /// Label shown in the navigation bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Servers => "Servers",
            Tab::Settings => "Settings",
        }
    }

    /// Position in [`Tab::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Servers => 1,
            Tab::Settings => 2,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Tab::Dashboard => Tab::Servers,
            Tab::Servers => Tab::Settings,
            Tab::Settings => Tab::Dashboard,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Tab::Dashboard => Tab::Settings,
            Tab::Servers => Tab::Dashboard,
            Tab::Settings => Tab::Servers,
        }
    }
}

/// Current input mode determining keyboard behavior.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    /// Normal navigation mode.
    #[default]
    Normal,
    /// Typing into the server search box.
    Search,
    /// Protocol picker popup is open.
    ProtocolPicker,
}

/// Main application state container.
pub struct App<S: ConnectScheduler = ThreadScheduler> {
    /// Flag indicating the application should exit.
    pub should_quit: bool,

    // === Core ===
    /// Catalog, connection session and settings.
    pub ctx: SessionContext<S>,

    // === UI State ===
    pub active_tab: Tab,
    pub input_mode: InputMode,
    /// Server search filter (case-insensitive).
    pub search: String,
    pub server_table_state: TableState,
    pub settings_list_state: ListState,
    pub protocol_list_state: ListState,
    pub toast: Option<Toast>,
    pub terminal_size: (u16, u16),

    // === Activity Log ===
    pub logs: Vec<String>,

    toast_duration: Duration,
}

impl App<ThreadScheduler> {
    /// App wired to the real event channel.
    #[must_use]
    pub fn new(config: &AppConfig, scheduler: ThreadScheduler) -> Self {
        Self::with_scheduler(config, Catalog::builtin(), scheduler)
    }
}

impl<S: ConnectScheduler> App<S> {
    /// App over an arbitrary catalog and scheduler.
    pub fn with_scheduler(config: &AppConfig, catalog: Catalog, scheduler: S) -> Self {
        let mut server_table_state = TableState::default();
        if !catalog.is_empty() {
            server_table_state.select(Some(0));
        }

        let mut app = Self {
            should_quit: false,
            ctx: SessionContext::new(catalog, scheduler, config.connect_delay()),
            active_tab: Tab::Dashboard,
            input_mode: InputMode::Normal,
            search: String::new(),
            server_table_state,
            settings_list_state: ListState::default().with_selected(Some(0)),
            protocol_list_state: ListState::default(),
            toast: None,
            terminal_size: (80, 24),
            logs: Vec::new(),
            toast_duration: config.toast_duration(),
        };

        app.log(&format!(
            "INIT: {} v{} starting...",
            constants::APP_NAME,
            constants::APP_VERSION
        ));
        app.log(constants::MSG_BACKEND_INIT);
        app.log(constants::MSG_READY);

        if app.ctx.settings().auto_connect {
            app.connect(None);
        }

        app
    }

    /// Add a log message with timestamp
    pub fn log(&mut self, message: &str) {
        let timestamp = crate::utils::format_clock_time();
        self.logs.push(format!("{timestamp} {message}"));

        if self.logs.len() > constants::MAX_LOG_LINES {
            self.logs.remove(0);
        }
    }

    /// Show a toast notification and log it
    pub fn show_toast(&mut self, message: String, toast_type: ToastType) {
        let level = match toast_type {
            ToastType::Info => "INFO",
            ToastType::Success => "SUCCESS",
            ToastType::Warning => "WARN",
            ToastType::Error => "ERROR",
        };
        self.log(&format!("{level}: {message}"));
        self.toast = Some(Toast::new(
            message,
            toast_type,
            Instant::now(),
            self.toast_duration,
        ));
    }

    /// Servers matching the current search, in catalog order.
    #[must_use]
    pub fn visible_servers(&self) -> Vec<&ServerDescriptor> {
        self.ctx.catalog().search(&self.search)
    }

    /// Server under the cursor on the Servers tab.
    #[must_use]
    pub fn highlighted_server(&self) -> Option<ServerDescriptor> {
        let idx = self.server_table_state.selected()?;
        self.visible_servers().get(idx).map(|s| (*s).clone())
    }

    /// Settings row under the cursor.
    #[must_use]
    pub fn highlighted_field(&self) -> SettingField {
        let idx = self.settings_list_state.selected().unwrap_or(0);
        SettingField::ALL[idx.min(SettingField::ALL.len() - 1)]
    }

    // === Intents ===

    /// Begin connecting to `target`, or the best server.
    pub fn connect(&mut self, target: Option<ServerDescriptor>) {
        let reconnecting = self.ctx.session().status() == ConnectionStatus::Connected;
        match self.ctx.connect(target) {
            Ok(server) => {
                if reconnecting {
                    self.log("STATUS: Dropping current connection");
                }
                self.log(&format!(
                    "STATUS: Connecting to {} ({}) via {}",
                    server.name,
                    server.location(),
                    self.ctx.settings().protocol
                ));
            }
            Err(Error::Busy) => {
                self.show_toast(constants::MSG_CONNECTION_IN_PROGRESS.to_string(), ToastType::Warning);
            }
            Err(e) => self.show_toast(e.to_string(), ToastType::Error),
        }
    }

    /// Drop the connection or abandon the pending attempt.
    pub fn disconnect(&mut self) {
        let server = self.ctx.session().server().map(|s| s.name.clone());
        match (self.ctx.disconnect(), server) {
            (ConnectionStatus::Disconnected, _) | (_, None) => {
                self.show_toast(constants::MSG_NOT_CONNECTED.to_string(), ToastType::Info);
            }
            (ConnectionStatus::Connecting, Some(name)) => {
                self.show_toast(format!("Cancelled connection to {name}"), ToastType::Info);
            }
            (ConnectionStatus::Connected, Some(name)) => {
                self.show_toast(format!("Disconnected from {name}"), ToastType::Info);
            }
        }
    }

    /// Dashboard button: connect when idle, disconnect when connected.
    pub fn toggle_connection(&mut self) {
        match self.ctx.session().status() {
            ConnectionStatus::Disconnected => self.connect(None),
            ConnectionStatus::Connecting => {
                self.show_toast(constants::MSG_CONNECTION_IN_PROGRESS.to_string(), ToastType::Warning);
            }
            ConnectionStatus::Connected => self.disconnect(),
        }
    }

    /// Switch to the highlighted server without reconnecting.
    pub fn select_highlighted(&mut self) {
        let Some(server) = self.highlighted_server() else {
            return;
        };
        let name = server.name.clone();
        match self.ctx.select_server(server) {
            Ok(true) => self.show_toast(format!("Switched to {name}"), ToastType::Success),
            Ok(false) => self.show_toast(
                constants::MSG_SELECT_REQUIRES_CONNECTION.to_string(),
                ToastType::Info,
            ),
            Err(Error::Busy) => self.show_toast(
                constants::MSG_CONNECTION_IN_PROGRESS.to_string(),
                ToastType::Warning,
            ),
            Err(e) => self.show_toast(e.to_string(), ToastType::Error),
        }
    }

    /// Apply a settings edit and log the new value.
    pub fn apply_setting(&mut self, update: SettingUpdate) {
        self.ctx.apply_setting(update);
        let message = match update {
            SettingUpdate::Protocol(p) => format!("SETTINGS: Protocol set to {p}"),
            SettingUpdate::AutoConnect(v) => format!("SETTINGS: Auto-connect {}", on_off(v)),
            SettingUpdate::KillSwitch(v) => format!("SETTINGS: Kill switch {}", on_off(v)),
            SettingUpdate::DnsLeakProtection(v) => {
                format!("SETTINGS: DNS leak protection {}", on_off(v))
            }
        };
        self.log(&message);
    }

    // === Event hooks ===

    /// The connect timer for `ticket` fired.
    pub fn on_connect_ready(&mut self, ticket: ConnectTicket) {
        if self.ctx.complete_connect(ticket) {
            if let Some(server) = self.ctx.session().server() {
                let message = format!("Connected to {}", server.name);
                self.show_toast(message, ToastType::Success);
            }
        } else {
            self.log(&format!("DEBUG: Ignored stale connect timer #{}", ticket.id()));
        }
    }

    /// Called on each tick
    pub fn on_tick(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired(Instant::now()) {
                self.toast = None;
            }
        }
    }

    /// Called when terminal is resized
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Tear down the session before exit.
    pub fn shutdown(&mut self) {
        self.ctx.shutdown();
    }

    // === Keyboard ===

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Search => self.handle_search_keys(key),
            InputMode::ProtocolPicker => self.handle_picker_keys(key),
            InputMode::Normal => self.handle_normal_keys(key),
        }
    }

    fn handle_normal_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab => self.active_tab = self.active_tab.previous(),
            KeyCode::Char('1') => self.active_tab = Tab::Dashboard,
            KeyCode::Char('2') => self.active_tab = Tab::Servers,
            KeyCode::Char('3') => self.active_tab = Tab::Settings,
            KeyCode::Char('d') => self.disconnect(),
            _ => match self.active_tab {
                Tab::Dashboard => self.handle_dashboard_keys(key),
                Tab::Servers => self.handle_server_keys(key),
                Tab::Settings => self.handle_settings_keys(key),
            },
        }
    }

    fn handle_dashboard_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Enter => self.toggle_connection(),
            KeyCode::Char('b') => self.connect(None),
            _ => {}
        }
    }

    fn handle_server_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.server_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.server_next(),
            KeyCode::Enter | KeyCode::Char('c') => {
                if let Some(server) = self.highlighted_server() {
                    self.connect(Some(server));
                }
            }
            KeyCode::Char('s') => self.select_highlighted(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Esc => {
                self.search.clear();
                self.clamp_server_selection();
            }
            _ => {}
        }
    }

    fn handle_search_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.search.pop();
            }
            KeyCode::Char(c) => self.search.push(c),
            _ => {}
        }
        self.clamp_server_selection();
    }

    fn handle_settings_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let i = self.highlighted_field_index();
                let len = SettingField::ALL.len();
                self.settings_list_state.select(Some((i + len - 1) % len));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let i = self.highlighted_field_index();
                self.settings_list_state
                    .select(Some((i + 1) % SettingField::ALL.len()));
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let field = self.highlighted_field();
                if let Some(update) = self.ctx.settings().toggled(field) {
                    self.apply_setting(update);
                } else {
                    let current = self.ctx.settings().protocol;
                    let idx = Protocol::ALL.iter().position(|p| *p == current);
                    self.protocol_list_state.select(idx);
                    self.input_mode = InputMode::ProtocolPicker;
                }
            }
            _ => {}
        }
    }

    fn handle_picker_keys(&mut self, key: KeyEvent) {
        let len = Protocol::ALL.len();
        let i = self.protocol_list_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Up | KeyCode::Char('k') => {
                self.protocol_list_state.select(Some((i + len - 1) % len));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.protocol_list_state.select(Some((i + 1) % len));
            }
            KeyCode::Enter => {
                self.apply_setting(SettingUpdate::Protocol(Protocol::ALL[i % len]));
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn highlighted_field_index(&self) -> usize {
        self.settings_list_state.selected().unwrap_or(0)
    }

    fn server_next(&mut self) {
        let len = self.visible_servers().len();
        if len == 0 {
            return;
        }
        let i = match self.server_table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.server_table_state.select(Some(i));
    }

    fn server_previous(&mut self) {
        let len = self.visible_servers().len();
        if len == 0 {
            return;
        }
        let i = match self.server_table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.server_table_state.select(Some(i));
    }

    fn clamp_server_selection(&mut self) {
        let len = self.visible_servers().len();
        if len == 0 {
            self.server_table_state.select(None);
        } else {
            let i = self.server_table_state.selected().unwrap_or(0).min(len - 1);
            self.server_table_state.select(Some(i));
        }
    }
}

const fn on_off(value: bool) -> &'static str {
    if value {
        "enabled"
    } else {
        "disabled"
    }
}
