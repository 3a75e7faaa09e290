//! Document types mirrored from the backend corpus

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::metadata::Metadata;

/// Backend document identifier.
///
/// The backend may send ids as strings or integers; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// A document held by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document ID
    pub id: DocumentId,
    /// Full content (list responses usually omit it)
    #[serde(default)]
    pub content: Option<String>,
    /// Truncated content for display
    #[serde(default)]
    pub content_preview: String,
    /// Arbitrary metadata
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub metadata: Metadata,
    /// Creation timestamp as sent by the backend
    #[serde(default)]
    pub created_at: String,
}

impl Document {
    /// Creation time in the local timezone, when the backend timestamp parses.
    ///
    /// Timestamps without an offset are taken as local wall-clock time.
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        let raw = self.created_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Local));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .and_then(|naive| naive.and_local_timezone(Local).single())
    }

    /// Creation time formatted for display, falling back to the raw text
    pub fn created_at_display(&self) -> String {
        match self.created_at_local() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.created_at.clone(),
        }
    }
}

/// Response for `GET /documents`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentListResponse {
    /// List of documents
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Body for `POST /documents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub content: String,
    pub metadata: Metadata,
}
