//! Heuristic natural-language filters.
//!
//! A query is lower-cased and checked for a fixed set of trigger phrases.
//! Each trigger independently adds one clause; the clauses are ANDed. This
//! is string matching, not parsing: there is no grammar, negation or
//! disambiguation, and the phrases are matched exactly as listed below.

use tracing::debug;

use strings_types::ParsedFilters;

use crate::predicate::{Clause, Predicate};

const PALINDROME: &str = "palindrome";
const LONGER_THAN: &str = "longer than";
const CHARACTERS: &str = "characters";
const ONE_WORD: &str = "one word";
const SINGLE_WORD: &str = "single word";
const UNIQUE_CHARACTERS: &str = "unique characters";

/// Threshold used by the "unique characters" trigger. Not read from the query.
pub const UNIQUE_CHARACTERS_THRESHOLD: usize = 2;

/// A predicate recognized in a free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeuristicFilter {
    /// The lower-cased query, echoed back to callers
    pub original: String,
    pub predicate: Predicate,
    pub parsed: ParsedFilters,
}

/// Translate a free-text query into a predicate.
///
/// Never fails. A query with no recognized phrase yields the accept-all
/// predicate; an unparseable number in "longer than N characters" drops
/// only that clause.
pub fn build_heuristic_predicate(query: &str) -> HeuristicFilter {
    let query = query.to_lowercase();
    let mut predicate = Predicate::accept_all();
    let mut parsed = ParsedFilters::default();

    if query.contains(PALINDROME) {
        predicate = predicate.with(Clause::IsPalindrome(true));
        parsed.is_palindrome = Some(true);
    }

    if query.contains(LONGER_THAN) && query.contains(CHARACTERS) {
        match longer_than_bound(&query) {
            Some(n) => {
                predicate = predicate.with(Clause::LongerThan(n));
                parsed.longer_than = Some(n);
            }
            None => debug!(query = %query, "Ignoring unparseable length in query"),
        }
    }

    if query.contains(ONE_WORD) || query.contains(SINGLE_WORD) {
        predicate = predicate.with(Clause::WordCount(1));
        parsed.word_count = Some(1);
    }

    if query.contains(UNIQUE_CHARACTERS) {
        predicate = predicate.with(Clause::MinUniqueCharacters(UNIQUE_CHARACTERS_THRESHOLD));
        parsed.min_unique_characters = Some(UNIQUE_CHARACTERS_THRESHOLD);
    }

    debug!(
        query = %query,
        clauses = predicate.clauses().len(),
        "Interpreted natural-language query"
    );

    HeuristicFilter {
        original: query,
        predicate,
        parsed,
    }
}

/// Text after the first "longer than" up to the next "characters", trimmed
/// and parsed as an integer.
fn longer_than_bound(query: &str) -> Option<i64> {
    let start = query.find(LONGER_THAN)? + LONGER_THAN.len();
    let rest = &query[start..];
    let between = rest.find(CHARACTERS).map_or(rest, |end| &rest[..end]);
    between.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::test_support::record;

    #[test]
    fn test_palindromes_longer_than() {
        let filter = build_heuristic_predicate("Find palindromes longer than 5 characters");

        assert_eq!(
            filter.predicate.clauses(),
            &[Clause::IsPalindrome(true), Clause::LongerThan(5)]
        );
        assert_eq!(filter.original, "find palindromes longer than 5 characters");
        assert!(filter.predicate.matches(&record("racecar")));
        assert!(!filter.predicate.matches(&record("kayak")));
        assert!(!filter.predicate.matches(&record("abcdefgh")));
    }

    #[test]
    fn test_unparseable_length_is_skipped() {
        let filter = build_heuristic_predicate("longer than abc characters");

        assert!(filter.predicate.is_accept_all());
        assert_eq!(filter.parsed.longer_than, None);
    }

    #[test]
    fn test_unparseable_length_keeps_other_triggers() {
        let filter = build_heuristic_predicate("single word palindromes longer than many characters");

        assert_eq!(
            filter.predicate.clauses(),
            &[Clause::IsPalindrome(true), Clause::WordCount(1)]
        );
    }

    #[test]
    fn test_length_needs_both_phrases() {
        let filter = build_heuristic_predicate("strings longer than 3");
        assert!(filter.predicate.is_accept_all());
    }

    #[test]
    fn test_length_uses_next_characters_after_phrase() {
        let filter =
            build_heuristic_predicate("characters longer than  12 characters with unique characters");

        assert_eq!(filter.parsed.longer_than, Some(12));
        assert_eq!(
            filter.parsed.min_unique_characters,
            Some(UNIQUE_CHARACTERS_THRESHOLD)
        );
    }

    #[test]
    fn test_characters_only_before_phrase() {
        // "characters" precedes "longer than": the remainder has no terminator
        let filter = build_heuristic_predicate("characters longer than 4");
        assert_eq!(filter.parsed.longer_than, Some(4));

        let filter = build_heuristic_predicate("characters longer than 4 please");
        assert_eq!(filter.parsed.longer_than, None);
    }

    #[test]
    fn test_one_word_triggers() {
        for query in ["one word strings", "Single Word only"] {
            let filter = build_heuristic_predicate(query);
            assert_eq!(filter.predicate.clauses(), &[Clause::WordCount(1)]);
            assert_eq!(filter.parsed.word_count, Some(1));
        }
    }

    #[test]
    fn test_unique_characters_fixed_threshold() {
        let filter = build_heuristic_predicate("strings with 10 unique characters");

        assert_eq!(
            filter.predicate.clauses(),
            &[Clause::MinUniqueCharacters(2)]
        );
        assert!(filter.predicate.matches(&record("ab")));
        assert!(!filter.predicate.matches(&record("aaaa")));
    }

    #[test]
    fn test_no_trigger_accepts_all() {
        let filter = build_heuristic_predicate("Show Me Everything");

        assert!(filter.predicate.is_accept_all());
        assert!(filter.parsed.is_empty());
        assert_eq!(filter.original, "show me everything");
    }

    #[test]
    fn test_all_triggers_combined() {
        let filter = build_heuristic_predicate(
            "single word palindromes longer than 2 characters with unique characters",
        );

        assert_eq!(filter.predicate.clauses().len(), 4);
        assert!(filter.predicate.matches(&record("level")));
        assert!(!filter.predicate.matches(&record("aaa")));
        assert!(!filter.predicate.matches(&record("aba aba")));
    }
}
