//! Error types for the strings client.

use thiserror::Error;

/// Errors that can occur when using the strings client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The daemon answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid endpoint URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::InvalidEndpoint(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}
