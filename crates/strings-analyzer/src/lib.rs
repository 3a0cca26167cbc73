//! # strings-analyzer
//!
//! Pure analysis of a string into a content identity and a property bundle.
//!
//! The identity is computed from the trimmed text, while length, palindrome,
//! unique-character and frequency properties are computed from the text
//! exactly as given. Word count uses the trimmed text. All character-level
//! work is done per Unicode code point.
//!
//! Whitespace is Unicode `White_Space` plus the four information separators
//! U+001C to U+001F, so `"a\x1fb"` is two words and trims like a space.
//!
//! ```rust
//! let analysis = strings_analyzer::analyze("  Racecar ");
//! assert_eq!(analysis.properties.word_count, 1);
//! assert_eq!(analysis.identity, strings_analyzer::identity_of("Racecar"));
//! ```

use std::collections::{BTreeMap, HashSet};

use sha2::{Digest, Sha256};

use strings_types::Properties;

/// Result of analyzing one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Lowercase hex SHA-256 of the trimmed text
    pub identity: String,
    pub properties: Properties,
}

/// Analyze a string.
///
/// Total over every input, including empty and all-whitespace strings.
/// Rejecting blank submissions is the caller's job.
pub fn analyze(text: &str) -> Analysis {
    Analysis {
        identity: identity_of(text),
        properties: Properties {
            length: text.chars().count(),
            is_palindrome: is_palindrome(text),
            unique_character_count: text.chars().collect::<HashSet<_>>().len(),
            word_count: text.split(is_space).filter(|word| !word.is_empty()).count(),
            character_frequency: character_frequency(text),
        },
    }
}

/// Identity of a string: SHA-256 over the UTF-8 bytes of the trimmed text.
pub fn identity_of(text: &str) -> String {
    hex::encode(Sha256::digest(trimmed(text).as_bytes()))
}

/// Strip leading and trailing whitespace, separators included.
pub fn trimmed(text: &str) -> &str {
    text.trim_matches(is_space)
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn is_palindrome(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.chars().eq(lowered.chars().rev())
}

fn character_frequency(text: &str) -> BTreeMap<char, usize> {
    let mut frequency = BTreeMap::new();
    for c in text.chars() {
        *frequency.entry(c).or_insert(0) += 1;
    }
    frequency
}
