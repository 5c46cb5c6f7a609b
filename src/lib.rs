//! Halcyon: a mock VPN client.
//!
//! The [`core`] module holds the client model (server catalog, best-server
//! selection, the connection state machine and its connect timer). [`app`]
//! and [`ui`] drive it from a terminal UI; [`cli`] drives it headlessly.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod event;
pub mod state;
pub mod theme;
pub mod ui;
pub mod utils;

pub use error::{Error, Result};
