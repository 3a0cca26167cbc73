//! # strings-filter
//!
//! Filter engine for analyzed strings.
//!
//! ## Core Concepts
//!
//! - **Predicate**: A conjunction of clauses evaluated against one record
//! - **Structured filter**: Clauses built from explicit query parameters;
//!   malformed parameters are dropped individually
//! - **Heuristic filter**: Clauses triggered by fixed phrases in a free-text query
//!
//! ## Usage
//!
//! ```rust
//! use strings_filter::{apply, build_heuristic_predicate};
//!
//! let filter = build_heuristic_predicate("palindromes longer than 3 characters");
//! let kept = apply(&filter.predicate, Vec::new());
//! assert!(kept.is_empty());
//! ```
//!
//! Both builders are pure; applying a predicate never reorders records.

pub mod heuristic;
pub mod predicate;
pub mod structured;

pub use heuristic::{build_heuristic_predicate, HeuristicFilter, UNIQUE_CHARACTERS_THRESHOLD};
pub use predicate::{apply, Clause, Predicate};
pub use structured::{build_structured_predicate, StructuredFilter};
