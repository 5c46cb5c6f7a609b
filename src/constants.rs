//! Application-wide constants and configuration values.
//!
//! This module defines the static values used throughout Halcyon, including
//! timing defaults, file names and UI messages.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Timing Configuration ===

/// UI refresh rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 250;
/// Simulated handshake time before a connection counts as established.
pub const DEFAULT_CONNECT_DELAY_MS: u64 = 2000;
/// How long toast notifications stay on screen.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

// === Path Configuration ===

/// Name of the configuration directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "halcyon";
/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "HALCYON_CONFIG_DIR";

// === Activity Log ===

/// Maximum number of activity log lines kept in memory.
pub const MAX_LOG_LINES: usize = 1000;

// === UI Messages ===

/// Backend initialization message.
pub const MSG_BACKEND_INIT: &str = "INFO: Loaded built-in server catalog";
/// Ready state message.
pub const MSG_READY: &str = "SUCCESS: Ready. Press [c] to connect, [Tab] to switch tabs.";
/// Status headline per connection status.
pub const STATUS_PROTECTED: &str = "Protected";
pub const STATUS_CONNECTING: &str = "Connecting...";
pub const STATUS_UNPROTECTED: &str = "Not Protected";
/// Placeholder for absent values.
pub const MSG_NO_DATA: &str = "---";
/// Shown when a server search has no results.
pub const MSG_NO_SERVERS: &str = "No servers found matching your search.";
pub const MSG_CONNECTION_IN_PROGRESS: &str = "Connection in progress...";
pub const MSG_NOT_CONNECTED: &str = "Not connected";
pub const MSG_SELECT_REQUIRES_CONNECTION: &str = "Connect first to switch servers";

// === UI Labels & Titles ===

pub const TITLE_DASHBOARD: &str = " Dashboard ";
pub const TITLE_SERVERS: &str = " Servers ";
pub const TITLE_SETTINGS: &str = " Settings ";
pub const TITLE_ACTIVITY: &str = " Activity ";
pub const TITLE_QUICK_CONNECT: &str = " Quick Connect ";
pub const TITLE_PROTOCOL_PICKER: &str = "Select Protocol";
pub const LABEL_QUICK_CONNECT: &str = "Auto-select the fastest server";
pub const TAGLINE: &str = "Mock client: no traffic leaves this machine.";

// === Messages: CLI Output ===

pub const CLI_MSG_ERROR: &str = "Error: ";
pub const CLI_MSG_NOT_SAVED: &str = "(settings are not saved between runs)";
