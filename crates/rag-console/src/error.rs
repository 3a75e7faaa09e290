//! Error types for the console client

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::metadata::MetadataError;

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown whenever the backend cannot be reached at all
pub const UNREACHABLE_MESSAGE: &str =
    "Failed to connect to the server. Make sure the backend is running.";

/// Top-level console errors (startup, configuration, one-shot commands)
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-side validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend gateway failure
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config parse error
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Validation errors raised before any network call is made
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Selected file is missing or not declared as a PDF
    #[error("Please select a valid PDF file.")]
    NotPdf,

    /// Upload requested without a selection
    #[error("Please select a PDF file to upload.")]
    NoFileSelected,

    /// Selected file could not be read from disk
    #[error("Could not read '{name}': {message}")]
    UnreadableFile { name: String, message: String },

    /// Metadata text did not parse
    #[error("Invalid JSON in metadata field: {0}")]
    Metadata(#[from] MetadataError),
}

/// Structured error body returned by the backend.
///
/// Query and upload endpoints use `error`, document endpoints use `detail`.
/// Fields holding anything other than a string are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Error body carrying only an `error` field
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            detail: None,
        }
    }

    /// Error body carrying only a `detail` field
    pub fn detail(message: impl Into<String>) -> Self {
        Self {
            error: None,
            detail: Some(message.into()),
        }
    }

    /// Parse a response body, falling back to an empty body when it is not
    /// a JSON object
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Which error-body field a workflow reads its message from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorField {
    Error,
    Detail,
}

/// Failure outcome of a backend call
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The backend answered with a non-success status
    #[error("Backend returned HTTP {status}")]
    Backend { status: StatusCode, body: ErrorBody },

    /// No usable response was received
    #[error("Transport failure: {message}")]
    Transport { message: String },
}

impl GatewayError {
    /// Create a backend error
    pub fn backend(status: StatusCode, body: ErrorBody) -> Self {
        Self::Backend { status, body }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Message to put in the error banner.
    ///
    /// Backend failures use the body's `field` verbatim when present, else
    /// `fallback`. Transport failures always use [`UNREACHABLE_MESSAGE`].
    pub fn user_message(&self, field: ErrorField, fallback: &str) -> String {
        match self {
            Self::Backend { body, .. } => {
                let message = match field {
                    ErrorField::Error => body.error.as_deref(),
                    ErrorField::Detail => body.detail.as_deref(),
                };
                message
                    .filter(|m| !m.is_empty())
                    .unwrap_or(fallback)
                    .to_string()
            }
            Self::Transport { .. } => UNREACHABLE_MESSAGE.to_string(),
        }
    }
}
