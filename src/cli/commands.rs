//! Headless subcommands.
//!
//! Each command writes to the supplied writer so it can be exercised in tests;
//! `main` passes stdout.

use std::io::Write;
use std::sync::mpsc;

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::AppConfig;
use crate::constants;
use crate::core::{selector, Catalog, ManualScheduler, SessionContext, ThreadScheduler};
use crate::event::Event;
use crate::state::{ServerDescriptor, Settings};

/// `servers`: print the catalog, optionally filtered.
///
/// # Errors
///
/// Returns an error if writing or JSON encoding fails.
pub fn servers(out: &mut impl Write, search: Option<&str>, json: bool) -> Result<()> {
    let catalog = Catalog::builtin();
    let servers = catalog.search(search.unwrap_or_default());

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&servers)?)?;
        return Ok(());
    }

    if servers.is_empty() {
        writeln!(out, "{}", constants::MSG_NO_SERVERS)?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>3}  {:<16} {:<28} {:>8}  {:<10}",
        "ID", "NAME", "LOCATION", "LATENCY", "LOAD"
    )?;
    for server in servers {
        writeln!(out, "{}", server_line(server))?;
    }
    Ok(())
}

/// `best`: print the server quick connect would pick.
///
/// # Errors
///
/// Returns an error if the catalog is empty or writing fails.
pub fn best(out: &mut impl Write, json: bool) -> Result<()> {
    let catalog = Catalog::builtin();
    let server = selector::best_server(catalog.servers())?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(server)?)?;
    } else {
        writeln!(
            out,
            "{} {} ({}) - {}ms, {} load",
            server.flag,
            server.name,
            server.location(),
            server.latency_ms,
            server.load
        )?;
    }
    Ok(())
}

/// `settings`: apply `FIELD=VALUE` edits to the defaults and echo the result.
///
/// # Errors
///
/// Returns the first invalid edit; nothing is printed in that case.
pub fn settings(out: &mut impl Write, edits: &[(String, String)], json: bool) -> Result<()> {
    let mut ctx = SessionContext::new(
        Catalog::builtin(),
        ManualScheduler::default(),
        AppConfig::default().connect_delay(),
    );
    for (field, value) in edits {
        ctx.update_setting(field, value)?;
    }
    let settings = ctx.settings();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&settings)?)?;
    } else {
        write_settings(out, &settings)?;
        writeln!(out, "{}", constants::CLI_MSG_NOT_SAVED)?;
    }
    Ok(())
}

/// `connect`: simulate a full connect, wait out the delay, then disconnect.
///
/// # Errors
///
/// Returns an error for an unknown server id, an empty catalog, or if the
/// timer channel closes before the attempt completes.
pub fn connect(out: &mut impl Write, config: &AppConfig, server_id: Option<&str>) -> Result<()> {
    let (sender, receiver) = mpsc::channel();
    let mut ctx = SessionContext::new(
        Catalog::builtin(),
        ThreadScheduler::new(sender),
        config.connect_delay(),
    );

    let server = match server_id {
        Some(id) => ctx.connect_to(id)?,
        None => ctx.connect(None)?,
    };
    writeln!(
        out,
        "{}: {} ({}) via {}",
        ctx.session().status(),
        server.name,
        server.location(),
        ctx.settings().protocol
    )?;

    loop {
        match receiver.recv() {
            Ok(Event::ConnectReady(ticket)) => {
                if ctx.complete_connect(ticket) {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => return Err(eyre!("connect timer channel closed")),
        }
    }
    writeln!(
        out,
        "{}: {} after {}ms",
        ctx.session().status(),
        server.name,
        config.connect_delay_ms
    )?;

    ctx.shutdown();
    writeln!(out, "{}", ctx.session().status())?;
    Ok(())
}

fn server_line(server: &ServerDescriptor) -> String {
    let premium = if server.premium { " ★" } else { "" };
    format!(
        "{:>3}  {:<16} {:<28} {:>6}ms  {:<10}{premium}",
        server.id,
        server.name,
        server.location(),
        server.latency_ms,
        server.load.label()
    )
}

fn write_settings(out: &mut impl Write, settings: &Settings) -> Result<()> {
    let on_off = |v: bool| if v { "on" } else { "off" };
    writeln!(out, "protocol:            {}", settings.protocol)?;
    writeln!(out, "auto_connect:        {}", on_off(settings.auto_connect))?;
    writeln!(out, "kill_switch:         {}", on_off(settings.kill_switch))?;
    writeln!(
        out,
        "dns_leak_protection: {}",
        on_off(settings.dns_leak_protection)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_servers_table() {
        let text = run(|out| servers(out, None, false));
        assert_eq!(text.lines().count(), 9);
        assert!(text.contains("Ultra Fast"));
        assert!(text.contains("Sydney, Australia"));
    }

    #[test]
    fn test_servers_search_and_json() {
        let text = run(|out| servers(out, Some("KINGDOM"), true));
        let parsed: Vec<ServerDescriptor> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "3");
    }

    #[test]
    fn test_servers_no_match() {
        let text = run(|out| servers(out, Some("atlantis"), false));
        assert_eq!(text.trim(), constants::MSG_NO_SERVERS);
    }

    #[test]
    fn test_best() {
        let text = run(|out| best(out, false));
        assert!(text.contains("Ultra Fast"));
        assert!(text.contains("12ms"));

        let json = run(|out| best(out, true));
        let parsed: ServerDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, "1");
    }

    #[test]
    fn test_settings_edits() {
        let edits = vec![
            ("protocol".to_string(), "ikev2".to_string()),
            ("kill-switch".to_string(), "off".to_string()),
        ];
        let text = run(|out| settings(out, &edits, false));
        assert!(text.contains("protocol:            IKEv2"));
        assert!(text.contains("kill_switch:         off"));
        assert!(text.contains(constants::CLI_MSG_NOT_SAVED));
    }

    #[test]
    fn test_settings_invalid_protocol() {
        let edits = vec![("protocol".to_string(), "pptp".to_string())];
        let mut out = Vec::new();
        let err = settings(&mut out, &edits, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidProtocol(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_connect_runs_to_completion() {
        let config = AppConfig {
            connect_delay_ms: 0,
            ..AppConfig::default()
        };
        let text = run(|out| connect(out, &config, Some("2")));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("connecting: Lightning"));
        assert!(lines[1].starts_with("connected: Lightning"));
        assert_eq!(lines[2], "disconnected");
    }

    #[test]
    fn test_connect_unknown_server() {
        let mut out = Vec::new();
        let err = connect(&mut out, &AppConfig::default(), Some("99")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::UnknownServer(_))
        ));
    }
}
