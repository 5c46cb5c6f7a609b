//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Halcyon - mock VPN client for the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding config.toml
    #[arg(long, global = true, env = crate::constants::CONFIG_DIR_ENV, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Simulated connect delay in milliseconds (overrides config.toml)
    #[arg(long, global = true, value_name = "MS")]
    pub connect_delay_ms: Option<u64>,

    /// UI tick rate in milliseconds (overrides config.toml)
    #[arg(long, global = true, value_name = "MS")]
    pub tick_rate_ms: Option<u64>,

    /// Subcommand to execute; the TUI starts when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the server catalog
    Servers {
        /// Only servers whose name, city or country contains TERM
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the server quick connect would pick
    Best {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Apply edits to the default settings and print the result (nothing is saved)
    Settings {
        /// FIELD=VALUE, e.g. protocol=ikev2 or kill_switch=off (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run a simulated connection without the TUI
    Connect {
        /// Catalog id to connect to; the best server when omitted
        server_id: Option<String>,
    },
}

/// Split a `FIELD=VALUE` argument.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))
}
