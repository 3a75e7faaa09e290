//! Core types exchanged with the backend and held by the store

pub mod document;
pub mod metadata;
pub mod query;
pub mod upload;

use serde::{Deserialize, Deserializer};

pub use document::{Document, DocumentId, DocumentListResponse, NewDocument};
pub use metadata::{Metadata, MetadataError, MetadataValue};
pub use query::{QueryResponse, QueryResult};
pub use upload::{PdfUpload, SelectedFile, UploadResult, PDF_MIME};

/// Read an explicit `null` as the field's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
