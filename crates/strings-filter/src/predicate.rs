//! Composable predicates over analyzed records.
//!
//! A `Predicate` is a conjunction of `Clause`s. The empty conjunction accepts
//! every record. Predicates hold no state beyond their clauses and can be
//! shared freely between threads.

use strings_types::AnalyzedRecord;

/// A single condition on a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `length >= n`
    MinLength(usize),
    /// `length <= n`
    MaxLength(usize),
    /// `length > n`
    LongerThan(i64),
    /// Exact palindrome flag
    IsPalindrome(bool),
    /// Case-insensitive substring of the original value
    ContainsCharacter(String),
    /// Exact word count
    WordCount(usize),
    /// `unique_character_count >= n`
    MinUniqueCharacters(usize),
}

impl Clause {
    /// Evaluate this clause against a record.
    pub fn matches(&self, record: &AnalyzedRecord) -> bool {
        let props = &record.properties;
        match self {
            Clause::MinLength(n) => props.length >= *n,
            Clause::MaxLength(n) => props.length <= *n,
            Clause::LongerThan(n) => i64::try_from(props.length).map_or(true, |len| len > *n),
            Clause::IsPalindrome(expected) => props.is_palindrome == *expected,
            Clause::ContainsCharacter(needle) => record
                .original_value
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Clause::WordCount(n) => props.word_count == *n,
            Clause::MinUniqueCharacters(n) => props.unique_character_count >= *n,
        }
    }
}

/// Conjunction of clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// The predicate that accepts every record.
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Add a clause to the conjunction.
    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Logical AND of two predicates.
    pub fn and(mut self, other: Predicate) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    /// True if every clause matches. The empty predicate matches everything.
    pub fn matches(&self, record: &AnalyzedRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }

    /// True if this predicate has no clauses.
    pub fn is_accept_all(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

/// Keep the records matching `predicate`, in their original order.
pub fn apply<I>(predicate: &Predicate, records: I) -> Vec<AnalyzedRecord>
where
    I: IntoIterator<Item = AnalyzedRecord>,
{
    if predicate.is_accept_all() {
        return records.into_iter().collect();
    }

    records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .collect()
}
