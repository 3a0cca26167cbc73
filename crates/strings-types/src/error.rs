//! Error types for the string analyzer.

use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum StringsError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
