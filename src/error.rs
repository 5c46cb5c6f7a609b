//! Error types for the VPN client core.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the session context and its helpers.
///
/// None of these are fatal: the TUI turns them into toasts, the CLI prints them.
#[derive(Debug, Error)]
pub enum Error {
    /// Best-server selection was attempted against an empty catalog.
    #[error("server catalog is empty")]
    EmptyCatalog,

    /// A connection attempt is already in progress.
    #[error("a connection attempt is already in progress")]
    Busy,

    /// Protocol name outside the supported set.
    #[error("invalid protocol: {0} (expected OpenVPN, WireGuard or IKEv2)")]
    InvalidProtocol(String),

    /// No catalog entry with the given identifier.
    #[error("unknown server: {0}")]
    UnknownServer(String),

    /// Settings field name not recognised.
    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    /// Settings value could not be parsed for its field.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// Field being updated.
        field: String,
        /// Rejected raw value.
        value: String,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::EmptyCatalog.to_string(), "server catalog is empty");
        assert!(Error::InvalidProtocol("PPTP".into())
            .to_string()
            .contains("PPTP"));
        let err = Error::InvalidValue {
            field: "kill_switch".into(),
            value: "maybe".into(),
        };
        assert_eq!(err.to_string(), "invalid value for kill_switch: maybe");
    }
}
