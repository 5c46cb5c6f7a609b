//! Command-line interface module.
//!
//! Provides argument parsing and the headless subcommands.

pub mod args;
pub mod commands;
