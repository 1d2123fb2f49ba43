//! Quote record and category identifier types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

/// JSON field holding the quotation text.
pub const TEXT_FIELD: &str = "hitokoto";

/// Identifier of a category, e.g. `"a"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name backing this category inside the data directory.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }

    /// A usable id is a single, non-empty path segment of `[A-Za-z0-9_-]`.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for CategoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The twelve categories shipped with the public sentence bundle.
pub fn default_categories() -> Vec<CategoryId> {
    ('a'..='l').map(|c| CategoryId(c.to_string())).collect()
}

/// A single quotable sentence.
///
/// Only the `hitokoto` text is interpreted. Every field of the source object,
/// the text included, is kept in its original order and written back out
/// unchanged on serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Hitokoto {
    fields: Map<String, Value>,
    length: usize,
}

impl Hitokoto {
    /// Build a record from a raw JSON object.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let length = fields
            .get(TEXT_FIELD)
            .and_then(Value::as_str)
            .map(|text| text.encode_utf16().count())
            .unwrap_or(0);
        Self { fields, length }
    }

    /// Shorthand for a record carrying only its text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(TEXT_FIELD.to_string(), Value::String(text.into()));
        Self::from_fields(fields)
    }

    /// The quotation text, if the record has one.
    pub fn text(&self) -> Option<&str> {
        self.fields.get(TEXT_FIELD).and_then(Value::as_str)
    }

    /// Length of the text in UTF-16 code units; 0 when the text is missing.
    ///
    /// Characters outside the Basic Multilingual Plane count as two.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Look up an opaque metadata field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Serialize for Hitokoto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Hitokoto {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_counts_characters_not_bytes() {
        let record = Hitokoto::from_text("人生若只如初见");
        assert_eq!(record.length(), 7);
        assert_eq!(record.text(), Some("人生若只如初见"));
    }

    #[test]
    fn astral_characters_count_as_two_units() {
        assert_eq!(Hitokoto::from_text("\u{1F600}\u{1F600}").length(), 4);
        assert_eq!(Hitokoto::from_text("好\u{1F338}").length(), 3);
    }

    #[test]
    fn missing_or_non_string_text_has_zero_length() {
        let record: Hitokoto = serde_json::from_str(r#"{"from":"nowhere"}"#).unwrap();
        assert_eq!(record.length(), 0);
        assert_eq!(record.text(), None);

        let record: Hitokoto = serde_json::from_str(r#"{"hitokoto":42}"#).unwrap();
        assert_eq!(record.length(), 0);
    }

    #[test]
    fn metadata_is_written_back_in_source_order() {
        let raw = r#"{"id":1,"hitokoto":"hi","type":"a","from":"x","from_who":null}"#;
        let record: Hitokoto = serde_json::from_str(raw).unwrap();
        assert_eq!(record.get("from"), Some(&Value::from("x")));
        assert_eq!(serde_json::to_string(&record).unwrap(), raw);
    }

    #[test]
    fn category_id_validation() {
        assert!(CategoryId::from("a").is_valid());
        assert!(CategoryId::from("anime_2").is_valid());
        assert!(!CategoryId::from("").is_valid());
        assert!(!CategoryId::from("../etc").is_valid());
        assert!(!CategoryId::from("a b").is_valid());
    }

    #[test]
    fn default_categories_are_a_through_l() {
        let ids: Vec<String> = default_categories().iter().map(|c| c.to_string()).collect();
        assert_eq!(ids.len(), 12);
        assert_eq!(ids.first().map(String::as_str), Some("a"));
        assert_eq!(ids.last().map(String::as_str), Some("l"));
    }
}
