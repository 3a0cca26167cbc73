//! Filter parameter and echo types shared by the filter engine, the HTTP
//! layer and the client.

use serde::{Deserialize, Serialize};

/// Raw structured filter parameters as received from a query string.
///
/// Values stay unparsed here; the filter engine validates each one and
/// silently drops the ones that do not parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<String>,
}

/// Collect decoded query-string pairs. A repeated key keeps its last value;
/// unknown keys are ignored.
impl FromIterator<(String, String)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "min_length" => &mut params.min_length,
                "max_length" => &mut params.max_length,
                "is_palindrome" => &mut params.is_palindrome,
                "contains_character" => &mut params.contains_character,
                "word_count" => &mut params.word_count,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }
}

/// Structured filters that were actually applied, with normalized values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltersApplied {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

/// Filters recognized in a natural-language query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,

    /// Strict lower bound: matching records have `length > longer_than`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longer_than: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_unique_characters: Option<usize>,
}

impl ParsedFilters {
    /// True when the query triggered no filter.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_applied_skips_absent_fields() {
        let applied = FiltersApplied {
            min_length: Some(3),
            is_palindrome: Some(true),
            ..Default::default()
        };

        let json = serde_json::to_string(&applied).unwrap();
        assert_eq!(json, r#"{"min_length":3,"is_palindrome":true}"#);
    }

    #[test]
    fn test_filter_params_from_pairs_last_value_wins() {
        let pairs = [
            ("min_length", "1"),
            ("page", "3"),
            ("min_length", "abc"),
            ("word_count", "2"),
        ];
        let params: FilterParams = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(
            params,
            FilterParams {
                min_length: Some("abc".to_string()),
                word_count: Some("2".to_string()),
                ..Default::default()
            }
        );
    }
}
