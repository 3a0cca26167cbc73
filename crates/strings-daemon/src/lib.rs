//! String analyzer daemon library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (start, stop, status, analyze, query, admin)

pub mod cli;
pub mod commands;

pub use cli::{AdminCommands, Cli, Commands, QueryCommands};
pub use commands::{
    handle_admin, handle_analyze, handle_query, show_status, start_daemon, stop_daemon,
};
