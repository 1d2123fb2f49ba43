//! Quote endpoint query parameters.
//!
//! Parameters degrade instead of failing: an unparsable bound is treated as
//! absent, an empty category as "all categories".

use std::collections::HashMap;

use crate::http::response::sanitize_callback;
use crate::selection::SelectionQuery;

/// Response format requested through `encode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Json,
    Jsonp,
}

impl Encoding {
    /// Anything other than `jsonp` means JSON.
    pub fn parse(raw: &str) -> Self {
        if raw == "jsonp" {
            Encoding::Jsonp
        } else {
            Encoding::Json
        }
    }
}

/// Parsed `?c=&min=&max=&encode=&callback=` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteParams {
    pub category: Option<String>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub encoding: Encoding,
    pub callback: Option<String>,
}

impl QuoteParams {
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let non_empty = |key: &str| query.get(key).filter(|v| !v.is_empty()).cloned();
        Self {
            category: non_empty("c"),
            min: query.get("min").and_then(|v| parse_int_prefix(v)),
            max: query.get("max").and_then(|v| parse_int_prefix(v)),
            encoding: query
                .get("encode")
                .map(|v| Encoding::parse(v))
                .unwrap_or_default(),
            callback: non_empty("callback"),
        }
    }

    pub fn selection(&self) -> SelectionQuery {
        SelectionQuery {
            category: self.category.clone(),
            min_length: self.min,
            max_length: self.max,
        }
    }

    /// Sanitized callback name when a JSONP response was asked for.
    pub fn jsonp_callback(&self) -> Option<String> {
        match self.encoding {
            Encoding::Jsonp => self.callback.as_deref().and_then(sanitize_callback),
            Encoding::Json => None,
        }
    }
}

/// Leading-integer parse: optional whitespace, optional sign, digits.
///
/// Trailing characters are ignored (`"12px"` is 12). No digits, or a value
/// outside `i64`, yields `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn int_prefix_parsing() {
        assert_eq!(parse_int_prefix("10"), Some(10));
        assert_eq!(parse_int_prefix("  7"), Some(7));
        assert_eq!(parse_int_prefix("12px"), Some(12));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+4"), Some(4));
        assert_eq!(parse_int_prefix("0"), Some(0));
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }

    #[test]
    fn full_query() {
        let params = QuoteParams::from_query(&query(&[
            ("c", "a"),
            ("min", "5"),
            ("max", "30"),
            ("encode", "jsonp"),
            ("callback", "cb"),
        ]));
        assert_eq!(
            params.selection(),
            SelectionQuery::new().category("a").min_length(5).max_length(30)
        );
        assert_eq!(params.jsonp_callback().as_deref(), Some("cb"));
    }

    #[test]
    fn empty_and_invalid_values_are_absent() {
        let params = QuoteParams::from_query(&query(&[
            ("c", ""),
            ("min", "many"),
            ("max", ""),
            ("callback", ""),
        ]));
        assert_eq!(params.selection(), SelectionQuery::new());
        assert_eq!(params.encoding, Encoding::Json);
        assert_eq!(params.callback, None);
    }

    #[test]
    fn zero_bound_is_kept() {
        let params = QuoteParams::from_query(&query(&[("min", "0")]));
        assert_eq!(params.min, Some(0));
    }

    #[test]
    fn callback_requires_jsonp_encoding() {
        let json = QuoteParams::from_query(&query(&[("callback", "cb")]));
        assert_eq!(json.jsonp_callback(), None);

        let unknown = QuoteParams::from_query(&query(&[("encode", "xml"), ("callback", "cb")]));
        assert_eq!(unknown.jsonp_callback(), None);

        let stripped = QuoteParams::from_query(&query(&[("encode", "jsonp"), ("callback", "<>")]));
        assert_eq!(stripped.jsonp_callback(), None);
    }
}
