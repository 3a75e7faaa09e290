//! Typed document metadata and the parse step that produces it

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A single metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<MetadataValue>),
    Map(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    /// Short name of the value's kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "mapping",
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Why metadata text was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// Text is not well-formed JSON
    #[error("{message} at line {line}, column {column}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed JSON, but not an object at the top level
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// String-keyed document metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetadataValue>);

impl Metadata {
    /// Parse free-text metadata entered by the user.
    ///
    /// Blank text yields empty metadata.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: MetadataValue =
            serde_json::from_str(text).map_err(|e| MetadataError::Syntax {
                line: e.line(),
                column: e.column(),
                message: syntax_message(&e),
            })?;

        match value {
            MetadataValue::Map(map) => Ok(Self(map)),
            other => Err(MetadataError::NotAnObject {
                found: other.kind(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Pretty-printed JSON for display
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

// serde_json appends " at line X column Y" to its messages; keep only the
// description since the position is stored separately.
fn syntax_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    match full.rfind(" at line ") {
        Some(idx) => full[..idx].to_string(),
        None => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_empty_metadata() {
        assert_eq!(Metadata::parse("").unwrap(), Metadata::default());
        assert_eq!(Metadata::parse("  \n\t").unwrap(), Metadata::default());
    }

    #[test]
    fn test_parse_nested_object() {
        let metadata = Metadata::parse(
            r#"{"topic": "example", "author": "Jane", "pages": 12, "draft": false,
                "tags": ["a", "b"], "source": {"kind": "web"}}"#,
        )
        .unwrap();

        assert_eq!(metadata.len(), 6);
        assert_eq!(metadata.get("topic"), Some(&MetadataValue::from("example")));
        assert_eq!(metadata.get("pages"), Some(&MetadataValue::from(12i64)));
        assert_eq!(metadata.get("draft"), Some(&MetadataValue::Bool(false)));
        assert!(matches!(metadata.get("tags"), Some(MetadataValue::List(items)) if items.len() == 2));
        assert!(matches!(metadata.get("source"), Some(MetadataValue::Map(_))));
    }

    #[test]
    fn test_malformed_text_is_syntax_error() {
        let err = Metadata::parse("{not json").unwrap_err();
        match err {
            MetadataError::Syntax { line, column, .. } => {
                assert_eq!(line, 1);
                assert!(column > 0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert_eq!(
            Metadata::parse("[1, 2]").unwrap_err(),
            MetadataError::NotAnObject { found: "list" }
        );
        assert_eq!(
            Metadata::parse("\"text\"").unwrap_err(),
            MetadataError::NotAnObject { found: "string" }
        );
    }

    #[test]
    fn test_serializes_as_plain_json_object() {
        let mut metadata = Metadata::default();
        metadata.insert("author", "Jane");
        metadata.insert("year", 2024i64);

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json, serde_json::json!({"author": "Jane", "year": 2024}));
    }
}
