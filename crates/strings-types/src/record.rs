//! Analyzed string records.
//!
//! A record is created once per distinct trimmed value and never mutated.
//! Its identity is the SHA-256 of the trimmed value, while most properties
//! are computed over the value exactly as submitted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Properties derived from a string by the analyzer.
///
/// `character_frequency` is the only open-ended field; it is kept in a
/// `BTreeMap` so serialized output is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Number of characters (code points) in the untrimmed value
    pub length: usize,

    /// Case-insensitive palindrome check over the untrimmed value
    pub is_palindrome: bool,

    /// Number of distinct characters in the untrimmed value
    #[serde(rename = "unique_characters")]
    pub unique_character_count: usize,

    /// Number of whitespace-delimited words in the trimmed value
    pub word_count: usize,

    /// Occurrence count of each character in the untrimmed value
    #[serde(rename = "character_frequency_map")]
    pub character_frequency: BTreeMap<char, usize>,
}

/// A stored analysis of one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    /// Lowercase hex SHA-256 of the trimmed value
    pub identity: String,

    /// The value exactly as submitted, surrounding whitespace included
    pub original_value: String,

    /// When the record was first stored
    pub created_at: DateTime<Utc>,

    /// Derived properties
    pub properties: Properties,
}

impl AnalyzedRecord {
    /// Create a record stamped with the current time.
    pub fn new(identity: String, original_value: String, properties: Properties) -> Self {
        Self::with_created_at(identity, original_value, properties, Utc::now())
    }

    /// Create a record with an explicit creation time.
    pub fn with_created_at(
        identity: String,
        original_value: String,
        properties: Properties,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identity,
            original_value,
            created_at,
            properties,
        }
    }
}
