//! Service error types.

use thiserror::Error;

use strings_storage::StorageError;

/// Outcomes of a service operation other than success.
///
/// `Conflict` and `NotFound` are kept distinct so callers can tell a
/// duplicate submission from a missing record.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Submitted value was missing, blank or of the wrong type
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A record with the same identity already exists
    #[error("String already exists: {0}")]
    Conflict(String),

    /// No record for the derived identity
    #[error("String not found: {0}")]
    NotFound(String),

    /// Underlying store failed
    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict(identity) => ServiceError::Conflict(identity),
            other => ServiceError::Storage(other),
        }
    }
}
