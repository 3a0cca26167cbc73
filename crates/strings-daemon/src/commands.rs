//! Command implementations for the string analyzer daemon.
//!
//! Handles:
//! - start: Load config, open storage, start HTTP server
//! - stop: Signal running daemon to stop (via PID file)
//! - status: Check if daemon is running
//! - analyze: Offline analysis of one string
//! - query: Client calls against a running daemon
//! - admin: Stats and compaction on the database directly

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::signal;
use tracing::{info, warn};

use strings_analyzer::analyze;
use strings_client::StringsClient;
use strings_service::run_server_with_shutdown;
use strings_storage::{MemoryStore, RecordStore, Storage};
use strings_types::{FilterParams, PropertiesView, Settings};

use crate::cli::{AdminCommands, QueryCommands};

/// Get the PID file path
fn pid_file_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| {
            #[cfg(unix)]
            {
                dirs.runtime_dir()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| dirs.cache_dir().to_path_buf())
            }
            #[cfg(not(unix))]
            {
                dirs.cache_dir().to_path_buf()
            }
        })
        .unwrap_or_else(std::env::temp_dir)
        .join(strings_types::config::APP_NAME)
        .join("daemon.pid")
}

fn write_pid_file() -> Result<()> {
    let pid_path = pid_file_path();
    if let Some(parent) = pid_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&pid_path, std::process::id().to_string())?;
    info!("Wrote PID file: {:?}", pid_path);
    Ok(())
}

fn remove_pid_file() {
    let pid_path = pid_file_path();
    if pid_path.exists() {
        if let Err(e) = fs::remove_file(&pid_path) {
            warn!("Failed to remove PID file: {}", e);
        } else {
            info!("Removed PID file");
        }
    }
}

fn read_pid_file() -> Option<u32> {
    fs::read_to_string(pid_file_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Check if a process is running
#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks that the process exists
    unsafe { libc::kill(pid as i32, 0) == 0 }
}

#[cfg(not(unix))]
fn is_process_running(_pid: u32) -> bool {
    true
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}

/// Open the configured record store.
fn open_store(settings: &Settings) -> Result<Arc<dyn RecordStore>> {
    if settings.in_memory {
        warn!("Using in-memory store; records will not survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let db_path = settings.expanded_db_path();
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    let storage = Storage::open(&db_path).context("Failed to open storage")?;
    Ok(Arc::new(storage))
}

/// Start the daemon.
///
/// 1. Load configuration (defaults -> file -> env -> CLI)
/// 2. Open the record store
/// 3. Serve HTTP until SIGINT/SIGTERM
pub async fn start_daemon(
    config_path: Option<&str>,
    foreground: bool,
    port_override: Option<u16>,
    db_path_override: Option<&str>,
    in_memory: bool,
    log_level_override: Option<&str>,
) -> Result<()> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(port) = port_override {
        settings.http_port = port;
    }
    if let Some(db_path) = db_path_override {
        settings.db_path = db_path.to_string();
    }
    if in_memory {
        settings.in_memory = true;
    }
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }

    init_logging(&settings.log_level)?;

    info!("String analyzer starting...");
    info!("Configuration:");
    info!("  Database path: {}", settings.db_path);
    info!("  In-memory: {}", settings.in_memory);
    info!("  HTTP address: {}", settings.http_addr());
    info!("  Log level: {}", settings.log_level);

    if !foreground {
        warn!("Background mode is not supported, running in foreground");
        warn!("Use a process manager (systemd, launchd) for background operation");
    }

    let store = open_store(&settings)?;

    let addr: SocketAddr = settings
        .http_addr()
        .parse()
        .context("Invalid HTTP address")?;

    write_pid_file()?;

    let result = run_server_with_shutdown(addr, store, shutdown_signal()).await;

    remove_pid_file();

    result.map_err(|e| anyhow::anyhow!("Server error: {}", e))
}

/// Stop the running daemon by sending SIGTERM.
pub fn stop_daemon() -> Result<()> {
    let pid = read_pid_file().context("No PID file found - daemon may not be running")?;

    if !is_process_running(pid) {
        remove_pid_file();
        anyhow::bail!("Daemon not running (stale PID file removed)");
    }

    info!("Stopping daemon (PID {})", pid);

    #[cfg(unix)]
    {
        unsafe {
            if libc::kill(pid as i32, libc::SIGTERM) != 0 {
                anyhow::bail!("Failed to send SIGTERM to daemon");
            }
        }
        println!("Sent SIGTERM to daemon (PID {})", pid);
    }

    #[cfg(not(unix))]
    {
        anyhow::bail!("Stop command not supported on this platform");
    }

    Ok(())
}

/// Show daemon status.
pub fn show_status() -> Result<()> {
    let pid_path = pid_file_path();

    match read_pid_file() {
        Some(pid) if is_process_running(pid) => {
            println!("String analyzer is running (PID {})", pid);
            println!("PID file: {:?}", pid_path);
        }
        Some(pid) => {
            println!(
                "String analyzer is NOT running (stale PID {} in {:?})",
                pid, pid_path
            );
        }
        None => {
            println!("String analyzer is NOT running (no PID file)");
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct AnalysisOutput {
    id: String,
    value: String,
    properties: PropertiesView,
}

fn analysis_output(text: &str) -> AnalysisOutput {
    let analysis = analyze(text);
    AnalysisOutput {
        value: text.to_string(),
        properties: PropertiesView {
            properties: analysis.properties,
            sha256_hash: analysis.identity.clone(),
        },
        id: analysis.identity,
    }
}

/// Analyze a string without touching storage.
pub fn handle_analyze(text: &str) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&analysis_output(text))?);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run a query subcommand against a daemon.
pub async fn handle_query(endpoint: &str, command: QueryCommands) -> Result<()> {
    let client = StringsClient::new(endpoint).context("Invalid endpoint")?;

    match command {
        QueryCommands::Create { value } => {
            print_json(&client.create(&value).await?)?;
        }
        QueryCommands::Get { value } => {
            print_json(&client.get(&value).await?)?;
        }
        QueryCommands::Delete { value } => {
            client.delete(&value).await?;
            println!("Deleted");
        }
        QueryCommands::List {
            min_length,
            max_length,
            is_palindrome,
            contains_character,
            word_count,
        } => {
            let params = FilterParams {
                min_length,
                max_length,
                is_palindrome,
                contains_character,
                word_count,
            };
            print_json(&client.list(&params).await?)?;
        }
        QueryCommands::Filter { query } => {
            print_json(&client.filter_natural_language(&query).await?)?;
        }
    }

    Ok(())
}

/// Run an admin subcommand directly against the database.
///
/// The daemon must not be running: RocksDB allows one process at a time.
pub fn handle_admin(db_path: Option<String>, command: AdminCommands) -> Result<()> {
    let db_path = match db_path {
        Some(path) => PathBuf::from(path),
        None => Settings::load(None)
            .context("Failed to load configuration")?
            .expanded_db_path(),
    };

    let storage = Storage::open(&db_path)
        .with_context(|| format!("Failed to open storage at {:?}", db_path))?;

    match command {
        AdminCommands::Stats => {
            let stats = storage.get_stats()?;
            println!("Database: {:?}", db_path);
            println!("Records: {}", stats.record_count);
            println!("Disk usage: {} bytes", stats.disk_usage_bytes);
        }
        AdminCommands::Compact => {
            storage.compact()?;
            println!("Compaction complete");
        }
    }

    Ok(())
}
