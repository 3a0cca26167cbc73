//! Structured filters from query parameters.
//!
//! Each parameter becomes a clause only if it is present and well formed.
//! Malformed values are dropped, never reported as errors: a request with a
//! bad `min_length` still gets the rest of its filters applied.

use tracing::debug;

use strings_types::{FilterParams, FiltersApplied};

use crate::predicate::{Clause, Predicate};

/// A predicate built from structured parameters, with the echo of what was applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredFilter {
    pub predicate: Predicate,
    pub applied: FiltersApplied,
}

/// Build a predicate from raw structured parameters.
pub fn build_structured_predicate(params: &FilterParams) -> StructuredFilter {
    let mut predicate = Predicate::accept_all();
    let mut applied = FiltersApplied::default();

    if let Some(n) = parse_count("min_length", params.min_length.as_deref()) {
        predicate = predicate.with(Clause::MinLength(n));
        applied.min_length = Some(n);
    }

    if let Some(n) = parse_count("max_length", params.max_length.as_deref()) {
        predicate = predicate.with(Clause::MaxLength(n));
        applied.max_length = Some(n);
    }

    match params.is_palindrome.as_deref() {
        Some("true") => {
            predicate = predicate.with(Clause::IsPalindrome(true));
            applied.is_palindrome = Some(true);
        }
        Some("false") => {
            predicate = predicate.with(Clause::IsPalindrome(false));
            applied.is_palindrome = Some(false);
        }
        Some(other) => debug!(value = other, "Dropping malformed is_palindrome filter"),
        None => {}
    }

    if let Some(needle) = params.contains_character.as_deref() {
        if needle.is_empty() {
            debug!("Dropping empty contains_character filter");
        } else {
            predicate = predicate.with(Clause::ContainsCharacter(needle.to_string()));
            applied.contains_character = Some(needle.to_string());
        }
    }

    if let Some(n) = parse_count("word_count", params.word_count.as_deref()) {
        predicate = predicate.with(Clause::WordCount(n));
        applied.word_count = Some(n);
    }

    debug!(
        clauses = predicate.clauses().len(),
        "Built structured filter predicate"
    );

    StructuredFilter { predicate, applied }
}

/// Parse a non-negative integer made only of ASCII digits.
///
/// Signs, whitespace and decimals are rejected. Values too large for
/// `usize` saturate to `usize::MAX`.
fn parse_count(name: &str, raw: Option<&str>) -> Option<usize> {
    let raw = raw?;
    let parsed = if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        Some(raw.parse().unwrap_or(usize::MAX))
    } else {
        None
    };
    if parsed.is_none() {
        debug!(filter = name, value = raw, "Dropping malformed numeric filter");
    }
    parsed
}
