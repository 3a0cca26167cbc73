//! Key encoding and decoding for storage layer.
//!
//! - Records: `rec:{identity}`
//! - Insertion order: `seq:{sequence:020}`, zero-padded so lexicographic
//!   order matches numeric order

use crate::error::StorageError;

/// Key for a stored record
/// Format: rec:{identity}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub identity: String,
}

impl RecordKey {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }

    /// Encode key to bytes for storage
    pub fn to_bytes(&self) -> Vec<u8> {
        format!("rec:{}", self.identity).into_bytes()
    }
}

/// Key for the insertion-order index
/// Format: seq:{sequence:020}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceKey {
    /// Monotonic sequence number
    pub sequence: u64,
}

impl SequenceKey {
    pub fn new(sequence: u64) -> Self {
        Self { sequence }
    }

    /// Encode key to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        format!("seq:{:020}", self.sequence).into_bytes()
    }

    /// Decode key from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        let s = std::str::from_utf8(bytes)
            .map_err(|e| StorageError::Key(format!("Invalid UTF-8: {}", e)))?;

        let digits = s
            .strip_prefix("seq:")
            .ok_or_else(|| StorageError::Key(format!("Invalid sequence key format: {}", s)))?;

        let sequence: u64 = digits
            .parse()
            .map_err(|e| StorageError::Key(format!("Invalid sequence: {}", e)))?;

        Ok(Self { sequence })
    }
}
