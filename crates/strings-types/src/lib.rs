//! # strings-types
//!
//! Shared domain types for the string analyzer.
//!
//! This crate defines the core data structures used throughout the system:
//! - Records: Immutable analyses of submitted strings
//! - Filters: Raw structured parameters and the echoes of applied filters
//! - Wire: JSON request/response shapes used by the HTTP API and client
//! - Settings: Configuration types
//!
//! ## Usage
//!
//! ```rust
//! use strings_types::{AnalyzedRecord, Properties};
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod record;
pub mod wire;

pub use config::Settings;
pub use error::StringsError;
pub use filter::{FilterParams, FiltersApplied, ParsedFilters};
pub use record::{AnalyzedRecord, Properties};
pub use wire::{
    CreateStringRequest, ErrorResponse, HealthResponse, InterpretedQuery, ListResponse,
    NaturalLanguageResponse, PropertiesView, RecordView,
};
