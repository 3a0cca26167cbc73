//! Service facade over the analyzer, record store and filter engine.

use std::sync::Arc;

use tracing::{debug, info};

use strings_analyzer::{analyze, trimmed};
use strings_filter::{apply, build_heuristic_predicate, build_structured_predicate};
use strings_storage::RecordStore;
use strings_types::{AnalyzedRecord, FilterParams, FiltersApplied, InterpretedQuery};

use crate::error::ServiceError;

/// Records matching a structured filter.
#[derive(Debug, Clone)]
pub struct ListResult {
    pub records: Vec<AnalyzedRecord>,
    pub filters_applied: FiltersApplied,
}

/// Records matching a natural-language query, with its interpretation.
#[derive(Debug, Clone)]
pub struct NaturalLanguageResult {
    pub records: Vec<AnalyzedRecord>,
    pub interpreted_query: InterpretedQuery,
}

/// Create, read, delete and filter analyzed strings.
///
/// Lookups by value always re-run the analyzer to derive the identity.
pub struct StringService {
    store: Arc<dyn RecordStore>,
}

impl StringService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Analyze and store a new value.
    ///
    /// Blank values are rejected. A value whose trimmed form is already
    /// stored is a conflict, even if the surrounding whitespace differs.
    pub fn create(&self, value: &str) -> Result<AnalyzedRecord, ServiceError> {
        if trimmed(value).is_empty() {
            return Err(ServiceError::InvalidInput(
                "value must not be empty".to_string(),
            ));
        }

        let analysis = analyze(value);
        if self.store.exists(&analysis.identity)? {
            debug!(identity = %analysis.identity, "Rejecting duplicate value");
            return Err(ServiceError::Conflict(analysis.identity));
        }

        let record = AnalyzedRecord::new(analysis.identity, value.to_string(), analysis.properties);
        let stored = self.store.insert(record)?;

        info!(
            identity = %stored.identity,
            length = stored.properties.length,
            "Created record"
        );
        Ok(stored)
    }

    /// Look up the record for a value.
    pub fn get(&self, value: &str) -> Result<AnalyzedRecord, ServiceError> {
        let identity = analyze(value).identity;
        self.store
            .get_by_identity(&identity)?
            .ok_or(ServiceError::NotFound(identity))
    }

    /// Delete the record for a value.
    pub fn delete(&self, value: &str) -> Result<(), ServiceError> {
        let identity = analyze(value).identity;
        if self.store.delete_by_identity(&identity)? {
            info!(identity = %identity, "Deleted record");
            Ok(())
        } else {
            Err(ServiceError::NotFound(identity))
        }
    }

    /// List records matching structured filter parameters.
    pub fn list(&self, params: &FilterParams) -> Result<ListResult, ServiceError> {
        let filter = build_structured_predicate(params);
        let records = apply(&filter.predicate, self.store.enumerate_all()?);

        debug!(matched = records.len(), "Listed records");
        Ok(ListResult {
            records,
            filters_applied: filter.applied,
        })
    }

    /// List records matching a free-text query.
    pub fn filter_by_natural_language(
        &self,
        query: &str,
    ) -> Result<NaturalLanguageResult, ServiceError> {
        if trimmed(query).is_empty() {
            return Err(ServiceError::InvalidInput(
                "query must not be empty".to_string(),
            ));
        }

        let filter = build_heuristic_predicate(query);
        let records = apply(&filter.predicate, self.store.enumerate_all()?);

        debug!(
            query = %filter.original,
            matched = records.len(),
            "Filtered records by natural language"
        );
        Ok(NaturalLanguageResult {
            records,
            interpreted_query: InterpretedQuery {
                original: filter.original,
                parsed_filters: filter.parsed,
            },
        })
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.store.count()?)
    }
}
