//! VPN connection state types.

use std::time::Instant;

use crate::error::{Error, Result};
use crate::state::ServerDescriptor;

/// Identifies one connection attempt.
///
/// The connect timer carries the ticket it was scheduled for; a ticket that no
/// longer matches the pending attempt is stale and must be ignored.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ConnectTicket(u64);

impl ConnectTicket {
    /// Raw attempt number.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Coarse connection status, as shown to the user.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Disconnected => write!(f, "disconnected"),
            ConnectionStatus::Connecting => write!(f, "connecting"),
            ConnectionStatus::Connected => write!(f, "connected"),
        }
    }
}

/// VPN connection state machine.
///
/// Each variant carries exactly the data its status allows, so a disconnected
/// session can never hold a server and a connecting one can never hold a
/// connection timestamp.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum ConnectionState {
    /// No active VPN connection.
    #[default]
    Disconnected,
    /// Connection attempt in progress.
    Connecting {
        /// When the connection attempt started.
        started: Instant,
        /// Server being connected to.
        server: ServerDescriptor,
        /// Attempt the pending timer belongs to.
        ticket: ConnectTicket,
    },
    /// Simulated connection established.
    Connected {
        /// When the connection was established.
        since: Instant,
        /// Currently selected server.
        server: ServerDescriptor,
    },
}

/// The client's single connection session.
#[derive(Clone, Debug, Default)]
pub struct ConnectionSession {
    state: ConnectionState,
    /// Total bytes received. Never incremented: there is no tunnel.
    pub bytes_received: u64,
    /// Total bytes sent. Never incremented: there is no tunnel.
    pub bytes_sent: u64,
    next_ticket: u64,
}

impl ConnectionSession {
    /// Fresh disconnected session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full state.
    #[must_use]
    pub const fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> ConnectionStatus {
        match self.state {
            ConnectionState::Disconnected => ConnectionStatus::Disconnected,
            ConnectionState::Connecting { .. } => ConnectionStatus::Connecting,
            ConnectionState::Connected { .. } => ConnectionStatus::Connected,
        }
    }

    /// Server being connected to or currently connected.
    #[must_use]
    pub const fn server(&self) -> Option<&ServerDescriptor> {
        match &self.state {
            ConnectionState::Disconnected => None,
            ConnectionState::Connecting { server, .. }
            | ConnectionState::Connected { server, .. } => Some(server),
        }
    }

    /// When the connection was established.
    #[must_use]
    pub const fn connected_at(&self) -> Option<Instant> {
        match self.state {
            ConnectionState::Connected { since, .. } => Some(since),
            _ => None,
        }
    }

    /// Ticket of the pending attempt, if connecting.
    #[must_use]
    pub const fn pending_ticket(&self) -> Option<ConnectTicket> {
        match self.state {
            ConnectionState::Connecting { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// Start a connection attempt to `server`.
    ///
    /// From `Connected` this is a reconnect: the current connection is dropped
    /// and a new attempt starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] if an attempt is already in progress.
    pub fn begin_connect(&mut self, server: ServerDescriptor, now: Instant) -> Result<ConnectTicket> {
        if matches!(self.state, ConnectionState::Connecting { .. }) {
            return Err(Error::Busy);
        }

        self.next_ticket += 1;
        let ticket = ConnectTicket(self.next_ticket);
        self.state = ConnectionState::Connecting {
            started: now,
            server,
            ticket,
        };
        Ok(ticket)
    }

    /// Finish the attempt identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when the ticket is stale.
    pub fn complete_connect(&mut self, ticket: ConnectTicket, now: Instant) -> bool {
        let ConnectionState::Connecting {
            ticket: pending, ..
        } = self.state
        else {
            return false;
        };
        if pending != ticket {
            return false;
        }

        let old = std::mem::take(&mut self.state);
        if let ConnectionState::Connecting { server, .. } = old {
            self.state = ConnectionState::Connected { since: now, server };
        }
        true
    }

    /// Drop the connection or abandon the pending attempt.
    ///
    /// Returns the ticket of the abandoned attempt so its timer can be cancelled.
    pub fn disconnect(&mut self) -> Option<ConnectTicket> {
        let cancelled = self.pending_ticket();
        self.state = ConnectionState::Disconnected;
        cancelled
    }

    /// Switch servers while connected.
    ///
    /// Returns whether the selection was applied; selecting while disconnected
    /// has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] while an attempt is in progress.
    pub fn select_server(&mut self, selected: ServerDescriptor) -> Result<bool> {
        match &mut self.state {
            ConnectionState::Disconnected => Ok(false),
            ConnectionState::Connecting { .. } => Err(Error::Busy),
            ConnectionState::Connected { server, .. } => {
                *server = selected;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LoadTier;
    use std::time::Duration;

    fn server(id: &str) -> ServerDescriptor {
        ServerDescriptor {
            id: id.to_string(),
            name: format!("Server {id}"),
            country: "Testland".to_string(),
            city: "Testville".to_string(),
            flag: "🏳".to_string(),
            latency_ms: 10,
            load: LoadTier::Low,
            premium: false,
        }
    }

    #[test]
    fn test_initial_state() {
        let s = ConnectionSession::new();
        assert_eq!(s.status(), ConnectionStatus::Disconnected);
        assert!(s.server().is_none());
        assert!(s.connected_at().is_none());
        assert_eq!(s.bytes_received, 0);
        assert_eq!(s.bytes_sent, 0);
    }

    #[test]
    fn test_begin_connect_sets_server() {
        let mut s = ConnectionSession::new();
        let ticket = s.begin_connect(server("1"), Instant::now()).unwrap();
        assert_eq!(s.status(), ConnectionStatus::Connecting);
        assert_eq!(s.server().map(|sv| sv.id.as_str()), Some("1"));
        assert!(s.connected_at().is_none());
        assert_eq!(s.pending_ticket(), Some(ticket));
    }

    #[test]
    fn test_begin_connect_while_connecting_is_busy() {
        let mut s = ConnectionSession::new();
        s.begin_connect(server("1"), Instant::now()).unwrap();
        assert!(matches!(
            s.begin_connect(server("2"), Instant::now()),
            Err(Error::Busy)
        ));
        assert_eq!(s.server().map(|sv| sv.id.as_str()), Some("1"));
    }

    #[test]
    fn test_complete_connect_keeps_server() {
        let mut s = ConnectionSession::new();
        let start = Instant::now();
        let ticket = s.begin_connect(server("4"), start).unwrap();
        let done = start + Duration::from_secs(2);
        assert!(s.complete_connect(ticket, done));
        assert_eq!(s.status(), ConnectionStatus::Connected);
        assert_eq!(s.connected_at(), Some(done));
        assert_eq!(s.server().map(|sv| sv.id.as_str()), Some("4"));
    }

    #[test]
    fn test_stale_ticket_ignored() {
        let mut s = ConnectionSession::new();
        let first = s.begin_connect(server("1"), Instant::now()).unwrap();
        s.disconnect();
        let second = s.begin_connect(server("2"), Instant::now()).unwrap();
        assert_ne!(first, second);

        assert!(!s.complete_connect(first, Instant::now()));
        assert_eq!(s.status(), ConnectionStatus::Connecting);
        assert!(s.complete_connect(second, Instant::now()));
    }

    #[test]
    fn test_complete_after_disconnect_ignored() {
        let mut s = ConnectionSession::new();
        let ticket = s.begin_connect(server("1"), Instant::now()).unwrap();
        assert_eq!(s.disconnect(), Some(ticket));
        assert!(!s.complete_connect(ticket, Instant::now()));
        assert_eq!(s.status(), ConnectionStatus::Disconnected);
        assert!(s.server().is_none());
    }

    #[test]
    fn test_disconnect_clears_everything() {
        let mut s = ConnectionSession::new();
        let ticket = s.begin_connect(server("1"), Instant::now()).unwrap();
        s.complete_connect(ticket, Instant::now());
        assert_eq!(s.disconnect(), None);
        assert_eq!(s.status(), ConnectionStatus::Disconnected);
        assert!(s.server().is_none());
        assert!(s.connected_at().is_none());
    }

    #[test]
    fn test_select_while_connected_changes_only_server() {
        let mut s = ConnectionSession::new();
        let ticket = s.begin_connect(server("1"), Instant::now()).unwrap();
        s.complete_connect(ticket, Instant::now());
        let since = s.connected_at();

        assert!(s.select_server(server("3")).unwrap());
        assert_eq!(s.status(), ConnectionStatus::Connected);
        assert_eq!(s.connected_at(), since);
        assert_eq!(s.server().map(|sv| sv.id.as_str()), Some("3"));
    }

    #[test]
    fn test_select_while_disconnected_is_noop() {
        let mut s = ConnectionSession::new();
        assert!(!s.select_server(server("3")).unwrap());
        assert_eq!(s.status(), ConnectionStatus::Disconnected);
        assert!(s.server().is_none());
    }

    #[test]
    fn test_select_while_connecting_is_busy() {
        let mut s = ConnectionSession::new();
        s.begin_connect(server("1"), Instant::now()).unwrap();
        assert!(matches!(s.select_server(server("2")), Err(Error::Busy)));
    }

    #[test]
    fn test_reconnect_from_connected() {
        let mut s = ConnectionSession::new();
        let ticket = s.begin_connect(server("1"), Instant::now()).unwrap();
        s.complete_connect(ticket, Instant::now());

        let next = s.begin_connect(server("2"), Instant::now()).unwrap();
        assert_ne!(ticket, next);
        assert_eq!(s.status(), ConnectionStatus::Connecting);
        assert!(s.connected_at().is_none());
        assert_eq!(s.server().map(|sv| sv.id.as_str()), Some("2"));
    }
}
