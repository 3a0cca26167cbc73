//! Configuration loading for the string analyzer.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/string-analyzer/config.toml.

use config::{Config, Environment, File};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::StringsError;

pub const APP_NAME: &str = "string-analyzer";

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to RocksDB storage directory
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// HTTP server host
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Keep records in memory only; nothing survives a restart
    #[serde(default)]
    pub in_memory: bool,
}

fn default_db_path() -> String {
    ProjectDirs::from("", "", APP_NAME)
        .map(|p| p.data_local_dir().join("db"))
        .unwrap_or_else(|| PathBuf::from("./data"))
        .to_string_lossy()
        .to_string()
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            http_host: default_http_host(),
            http_port: default_http_port(),
            log_level: default_log_level(),
            in_memory: false,
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/string-analyzer/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (STRINGS_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, StringsError> {
        let config_dir = ProjectDirs::from("", "", APP_NAME)
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("db_path", default_db_path())
            .map_err(|e| StringsError::Config(e.to_string()))?
            .set_default("http_host", default_http_host())
            .map_err(|e| StringsError::Config(e.to_string()))?
            .set_default("http_port", default_http_port() as i64)
            .map_err(|e| StringsError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| StringsError::Config(e.to_string()))?
            .set_default("in_memory", false)
            .map_err(|e| StringsError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // STRINGS_DB_PATH, STRINGS_HTTP_PORT, ... ("__" would nest, keys here are flat)
        builder = builder.add_source(
            Environment::with_prefix("STRINGS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| StringsError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| StringsError::Config(e.to_string()))
    }

    /// Get the socket address for the HTTP server
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Expand ~ in db_path to the user's home directory
    pub fn expanded_db_path(&self) -> PathBuf {
        if let Some(rest) = self.db_path.strip_prefix("~/") {
            if let Some(dirs) = BaseDirs::new() {
                return dirs.home_dir().join(rest);
            }
        }
        PathBuf::from(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.http_port, 8000);
        assert_eq!(settings.http_host, "127.0.0.1");
        assert_eq!(settings.log_level, "info");
        assert!(!settings.in_memory);
    }

    #[test]
    fn test_http_addr() {
        let settings = Settings::default();
        assert_eq!(settings.http_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_load_from_cli_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "http_port = 9123").unwrap();
        writeln!(file, "db_path = \"/tmp/strings-db\"").unwrap();
        writeln!(file, "in_memory = true").unwrap();

        let settings = Settings::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(settings.http_port, 9123);
        assert_eq!(settings.db_path, "/tmp/strings-db");
        assert!(settings.in_memory);
    }

    #[test]
    fn test_missing_cli_file_is_error() {
        let result = Settings::load(Some("/nonexistent/strings-config.toml"));
        assert!(matches!(result, Err(StringsError::Config(_))));
    }

    #[test]
    fn test_expanded_db_path_plain() {
        let settings = Settings {
            db_path: "/var/lib/strings".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.expanded_db_path(), PathBuf::from("/var/lib/strings"));
    }

    #[test]
    fn test_expanded_db_path_home() {
        let settings = Settings {
            db_path: "~/strings-db".to_string(),
            ..Default::default()
        };
        let expanded = settings.expanded_db_path();
        assert!(expanded.ends_with("strings-db"));
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
