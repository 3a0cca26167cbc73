//! String Analyzer Daemon
//!
//! Analyzes strings, stores them by content hash and serves them over HTTP.
//!
//! # Usage
//!
//! ```bash
//! strings-daemon start [--foreground] [--port PORT] [--db-path PATH] [--in-memory]
//! strings-daemon stop
//! strings-daemon status
//! strings-daemon analyze "some text"
//! strings-daemon query filter "single word palindromes"
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/string-analyzer/config.toml)
//! 3. Environment variables (STRINGS_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use strings_daemon::{
    handle_admin, handle_analyze, handle_query, show_status, start_daemon, stop_daemon, Cli,
    Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            foreground,
            port,
            db_path,
            in_memory,
        } => {
            start_daemon(
                cli.config.as_deref(),
                foreground,
                port,
                db_path.as_deref(),
                in_memory,
                cli.log_level.as_deref(),
            )
            .await?;
        }
        Commands::Stop => {
            stop_daemon()?;
        }
        Commands::Status => {
            show_status()?;
        }
        Commands::Analyze { text } => {
            handle_analyze(&text)?;
        }
        Commands::Query { endpoint, command } => {
            handle_query(&endpoint, command).await?;
        }
        Commands::Admin { db_path, command } => {
            handle_admin(db_path, command)?;
        }
    }

    Ok(())
}
