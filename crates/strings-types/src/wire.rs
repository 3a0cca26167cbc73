//! JSON shapes exchanged over HTTP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::{FiltersApplied, ParsedFilters};
use crate::record::{AnalyzedRecord, Properties};

/// Body of `POST /strings` as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStringRequest {
    pub value: String,
}

/// Properties as rendered in responses, with the hash echoed alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertiesView {
    #[serde(flatten)]
    pub properties: Properties,

    pub sha256_hash: String,
}

/// One record as rendered in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordView {
    pub id: String,
    pub value: String,
    pub properties: PropertiesView,
    pub created_at: DateTime<Utc>,
}

impl From<AnalyzedRecord> for RecordView {
    fn from(record: AnalyzedRecord) -> Self {
        Self {
            properties: PropertiesView {
                properties: record.properties,
                sha256_hash: record.identity.clone(),
            },
            id: record.identity,
            value: record.original_value,
            created_at: record.created_at,
        }
    }
}

/// Response of `GET /strings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<RecordView>,
    pub count: usize,
    pub filters_applied: FiltersApplied,
}

/// How a natural-language query was understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedQuery {
    /// The lower-cased query text
    pub original: String,
    pub parsed_filters: ParsedFilters,
}

/// Response of `GET /strings/filter-by-natural-language`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<RecordView>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub record_count: usize,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
