//! CLI argument parsing for the string analyzer daemon.
//!
//! CLI flags override all other configuration sources.

use clap::{Parser, Subcommand};

use strings_client::DEFAULT_ENDPOINT;

/// String Analyzer Daemon
///
/// Analyzes submitted strings, stores them by content hash and answers
/// structured and natural-language queries over HTTP.
#[derive(Parser, Debug)]
#[command(name = "strings-daemon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/string-analyzer/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Daemon commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Run in foreground (don't daemonize)
        #[arg(short, long)]
        foreground: bool,

        /// Override HTTP port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override database path
        #[arg(long)]
        db_path: Option<String>,

        /// Keep records in memory only
        #[arg(long)]
        in_memory: bool,
    },

    /// Stop the running daemon
    Stop,

    /// Show daemon status
    Status,

    /// Analyze a string locally and print its properties
    Analyze {
        /// Text to analyze
        text: String,
    },

    /// Talk to a running daemon
    Query {
        /// HTTP endpoint
        #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        #[command(subcommand)]
        command: QueryCommands,
    },

    /// Administrative commands
    Admin {
        /// Database path (default from config)
        #[arg(long)]
        db_path: Option<String>,

        #[command(subcommand)]
        command: AdminCommands,
    },
}

/// Query subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommands {
    /// Submit a string for analysis
    Create { value: String },

    /// Show the stored record for a string
    Get { value: String },

    /// Delete the stored record for a string
    Delete { value: String },

    /// List stored strings, optionally filtered
    List {
        #[arg(long)]
        min_length: Option<String>,

        #[arg(long)]
        max_length: Option<String>,

        /// true or false
        #[arg(long)]
        is_palindrome: Option<String>,

        #[arg(long)]
        contains_character: Option<String>,

        #[arg(long)]
        word_count: Option<String>,
    },

    /// Filter stored strings with a free-text query
    Filter {
        /// e.g. "single word palindromes longer than 3 characters"
        query: String,
    },
}

/// Admin subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AdminCommands {
    /// Show database statistics
    Stats,

    /// Trigger RocksDB compaction
    Compact,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
