//! Domain state types: catalog entries, the connection session, settings and
//! UI notifications.

mod connection;
mod server;
mod settings;
mod toast;

pub use connection::{ConnectTicket, ConnectionSession, ConnectionState, ConnectionStatus};
pub use server::{LoadTier, ServerDescriptor};
pub use settings::{Protocol, SettingField, SettingUpdate, Settings};
pub use toast::{Toast, ToastType};
