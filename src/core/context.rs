//! Session context: the single owner of catalog, connection session, settings
//! and the pending connect timer.

use std::time::{Duration, Instant};

use crate::core::selector;
use crate::core::timer::{ConnectScheduler, TimerHandle};
use crate::core::Catalog;
use crate::error::{Error, Result};
use crate::state::{
    ConnectTicket, ConnectionSession, ConnectionStatus, ServerDescriptor, SettingUpdate, Settings,
};

/// Everything the presentation layer reads and mutates.
///
/// Intents are applied one at a time through `&mut self`, so each transition is
/// atomic with respect to the others. Dropping the context cancels any pending
/// connect timer.
pub struct SessionContext<S: ConnectScheduler> {
    catalog: Catalog,
    session: ConnectionSession,
    settings: Settings,
    scheduler: S,
    pending: Option<TimerHandle>,
    connect_delay: Duration,
}

impl<S: ConnectScheduler> SessionContext<S> {
    /// New context with a disconnected session and default settings.
    pub fn new(catalog: Catalog, scheduler: S, connect_delay: Duration) -> Self {
        Self {
            catalog,
            session: ConnectionSession::new(),
            settings: Settings::default(),
            scheduler,
            pending: None,
            connect_delay,
        }
    }

    /// Server catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Connection session snapshot.
    pub const fn session(&self) -> &ConnectionSession {
        &self.session
    }

    /// Current settings snapshot.
    pub const fn settings(&self) -> Settings {
        self.settings
    }

    /// Simulated connect delay.
    pub const fn connect_delay(&self) -> Duration {
        self.connect_delay
    }

    /// Scheduler in use.
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Whether a connect timer is armed.
    pub const fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    /// Best server in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCatalog`] if the catalog has no servers.
    pub fn best_server(&self) -> Result<&ServerDescriptor> {
        selector::best_server(self.catalog.servers())
    }

    /// Begin connecting to `target`, or to the best server when `None`.
    ///
    /// Returns the server being connected to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] while another attempt is in progress and
    /// [`Error::EmptyCatalog`] when auto-selecting from an empty catalog.
    pub fn connect(&mut self, target: Option<ServerDescriptor>) -> Result<ServerDescriptor> {
        self.connect_at(target, Instant::now())
    }

    /// [`connect`](Self::connect) with an explicit clock reading.
    ///
    /// # Errors
    ///
    /// See [`connect`](Self::connect).
    pub fn connect_at(
        &mut self,
        target: Option<ServerDescriptor>,
        now: Instant,
    ) -> Result<ServerDescriptor> {
        if self.session.status() == ConnectionStatus::Connecting {
            return Err(Error::Busy);
        }

        let server = match target {
            Some(server) => server,
            None => self.best_server()?.clone(),
        };

        let ticket = self.session.begin_connect(server.clone(), now)?;
        self.cancel_timer();
        self.pending = Some(self.scheduler.schedule(ticket, self.connect_delay));
        Ok(server)
    }

    /// Begin connecting to the catalog entry with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownServer`] if no entry matches, otherwise as
    /// [`connect`](Self::connect).
    pub fn connect_to(&mut self, id: &str) -> Result<ServerDescriptor> {
        let server = self.lookup(id)?;
        self.connect(Some(server))
    }

    /// Timer callback: move the attempt for `ticket` to connected.
    ///
    /// Returns `false` when the ticket is stale (cancelled or superseded).
    pub fn complete_connect(&mut self, ticket: ConnectTicket) -> bool {
        self.complete_connect_at(ticket, Instant::now())
    }

    /// [`complete_connect`](Self::complete_connect) with an explicit clock reading.
    pub fn complete_connect_at(&mut self, ticket: ConnectTicket, now: Instant) -> bool {
        let done = self.session.complete_connect(ticket, now);
        if done {
            self.pending = None;
        }
        done
    }

    /// Drop the connection, cancelling a pending attempt if there is one.
    ///
    /// Returns the status the session had before.
    pub fn disconnect(&mut self) -> ConnectionStatus {
        let before = self.session.status();
        self.cancel_timer();
        self.session.disconnect();
        before
    }

    /// Switch to `server` while connected. No effect while disconnected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] while an attempt is in progress.
    pub fn select_server(&mut self, server: ServerDescriptor) -> Result<bool> {
        self.session.select_server(server)
    }

    /// [`select_server`](Self::select_server) by catalog identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownServer`] if no entry matches, otherwise as
    /// [`select_server`](Self::select_server).
    pub fn select_server_by_id(&mut self, id: &str) -> Result<bool> {
        let server = self.lookup(id)?;
        self.select_server(server)
    }

    /// Apply a typed settings edit and return the new snapshot.
    pub fn apply_setting(&mut self, update: SettingUpdate) -> Settings {
        self.settings = self.settings.with(update);
        self.settings
    }

    /// Parse and apply a raw `field` / `value` edit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProtocol`], [`Error::UnknownSetting`] or
    /// [`Error::InvalidValue`]; settings are unchanged on error.
    pub fn update_setting(&mut self, field: &str, value: &str) -> Result<Settings> {
        let update = SettingUpdate::parse(field, value)?;
        Ok(self.apply_setting(update))
    }

    /// Tear down: cancel any pending timer and disconnect.
    pub fn shutdown(&mut self) {
        self.disconnect();
    }

    fn lookup(&self, id: &str) -> Result<ServerDescriptor> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownServer(id.to_string()))
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

impl<S: ConnectScheduler> Drop for SessionContext<S> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timer::ManualScheduler;
    use crate::state::{LoadTier, Protocol};

    fn context() -> SessionContext<ManualScheduler> {
        SessionContext::new(
            Catalog::builtin(),
            ManualScheduler::default(),
            Duration::from_millis(2000),
        )
    }

    fn fire(ctx: &mut SessionContext<ManualScheduler>) -> bool {
        let Some(ticket) = ctx.scheduler().last_live() else {
            return false;
        };
        ctx.complete_connect(ticket)
    }

    #[test]
    fn test_auto_connect_uses_best_server() {
        let mut ctx = context();
        let server = ctx.connect(None).unwrap();
        assert_eq!(server.id, "1");
        assert_eq!(ctx.session().status(), ConnectionStatus::Connecting);
        assert_eq!(ctx.session().server().map(|s| s.id.as_str()), Some("1"));
        assert!(ctx.has_pending_timer());
        assert_eq!(ctx.scheduler().scheduled[0].1, Duration::from_millis(2000));
    }

    #[test]
    fn test_timer_completes_connection() {
        let mut ctx = context();
        ctx.connect_to("4").unwrap();
        assert!(fire(&mut ctx));
        assert_eq!(ctx.session().status(), ConnectionStatus::Connected);
        assert!(ctx.session().connected_at().is_some());
        assert_eq!(ctx.session().server().map(|s| s.id.as_str()), Some("4"));
        assert!(!ctx.has_pending_timer());
    }

    #[test]
    fn test_disconnect_before_timer_wins() {
        let mut ctx = context();
        ctx.connect(None).unwrap();
        let ticket = ctx.scheduler().scheduled[0].0;

        assert_eq!(ctx.disconnect(), ConnectionStatus::Connecting);
        assert!(ctx.scheduler().scheduled[0].2.is_cancelled());

        // A late delivery of the cancelled timer must not resurrect the connection
        assert!(!ctx.complete_connect(ticket));
        assert_eq!(ctx.session().status(), ConnectionStatus::Disconnected);
        assert!(ctx.session().server().is_none());
        assert!(ctx.session().connected_at().is_none());
    }

    #[test]
    fn test_connect_while_connecting_is_busy() {
        let mut ctx = context();
        ctx.connect(None).unwrap();
        assert!(matches!(ctx.connect_to("2"), Err(Error::Busy)));
        assert_eq!(ctx.scheduler().scheduled.len(), 1);
    }

    #[test]
    fn test_empty_catalog_auto_connect() {
        let mut ctx = SessionContext::new(
            Catalog::default(),
            ManualScheduler::default(),
            Duration::from_millis(10),
        );
        assert!(matches!(ctx.connect(None), Err(Error::EmptyCatalog)));
        assert_eq!(ctx.session().status(), ConnectionStatus::Disconnected);
        assert!(!ctx.has_pending_timer());
    }

    #[test]
    fn test_unknown_server() {
        let mut ctx = context();
        assert!(matches!(ctx.connect_to("99"), Err(Error::UnknownServer(_))));
        assert!(matches!(
            ctx.select_server_by_id("99"),
            Err(Error::UnknownServer(_))
        ));
    }

    #[test]
    fn test_select_while_connected() {
        let mut ctx = context();
        ctx.connect(None).unwrap();
        fire(&mut ctx);
        let since = ctx.session().connected_at();

        assert!(ctx.select_server_by_id("6").unwrap());
        assert_eq!(ctx.session().status(), ConnectionStatus::Connected);
        assert_eq!(ctx.session().connected_at(), since);
        assert_eq!(
            ctx.session().server().map(|s| s.load),
            Some(LoadTier::High)
        );
    }

    #[test]
    fn test_select_while_disconnected_is_noop() {
        let mut ctx = context();
        assert!(!ctx.select_server_by_id("3").unwrap());
        assert!(ctx.session().server().is_none());
    }

    #[test]
    fn test_disconnect_while_disconnected_is_noop() {
        let mut ctx = context();
        let before = ctx.session().state().clone();

        assert_eq!(ctx.disconnect(), ConnectionStatus::Disconnected);
        assert!(!ctx.has_pending_timer());
        assert!(ctx.scheduler().scheduled.is_empty());
        assert_eq!(ctx.session().state(), &before);
        assert!(ctx.session().server().is_none());
        assert!(ctx.session().connected_at().is_none());
        assert_eq!(ctx.session().bytes_received, 0);
        assert_eq!(ctx.session().bytes_sent, 0);
    }

    #[test]
    fn test_disconnect_from_connected() {
        let mut ctx = context();
        ctx.connect(None).unwrap();
        fire(&mut ctx);
        assert_eq!(ctx.disconnect(), ConnectionStatus::Connected);
        assert_eq!(ctx.session().status(), ConnectionStatus::Disconnected);
        assert!(ctx.session().server().is_none());
        assert!(ctx.session().connected_at().is_none());
    }

    #[test]
    fn test_reconnect_supersedes_old_ticket() {
        let mut ctx = context();
        ctx.connect_to("1").unwrap();
        let first = ctx.scheduler().scheduled[0].0;
        ctx.complete_connect(first);

        ctx.connect_to("2").unwrap();
        assert!(!ctx.complete_connect(first));
        assert!(fire(&mut ctx));
        assert_eq!(ctx.session().server().map(|s| s.id.as_str()), Some("2"));
    }

    #[test]
    fn test_update_setting() {
        let mut ctx = context();
        let snapshot = ctx.update_setting("protocol", "IKEv2").unwrap();
        assert_eq!(snapshot.protocol, Protocol::IKEv2);
        assert_eq!(ctx.settings(), snapshot);

        let before = ctx.settings();
        assert!(matches!(
            ctx.update_setting("protocol", "PPTP"),
            Err(Error::InvalidProtocol(_))
        ));
        assert_eq!(ctx.settings(), before);
    }

    #[test]
    fn test_settings_independent_of_session() {
        let mut ctx = context();
        ctx.connect(None).unwrap();
        ctx.apply_setting(SettingUpdate::KillSwitch(false));
        assert_eq!(ctx.session().status(), ConnectionStatus::Connecting);
        assert!(!ctx.settings().kill_switch);
    }

    #[test]
    fn test_shutdown_cancels_timer() {
        let mut ctx = context();
        ctx.connect(None).unwrap();
        ctx.shutdown();
        assert!(ctx.scheduler().scheduled[0].2.is_cancelled());
        assert_eq!(ctx.session().status(), ConnectionStatus::Disconnected);
    }
}
