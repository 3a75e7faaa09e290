//! Backend gateway: one call per REST endpoint, no policy

pub mod http;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::types::{Document, DocumentId, NewDocument, PdfUpload, QueryResponse, UploadResult};

pub use http::HttpGateway;

/// Outcome of a single backend call
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Transport to the RAG backend.
///
/// Implementations:
/// - `HttpGateway`: reqwest client against the configured origin
///
/// Every method maps to exactly one endpoint and method. Implementations must
/// not retry and must not impose timeouts of their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// `GET /documents`
    async fn list_documents(&self) -> GatewayResult<Vec<Document>>;

    /// `POST /documents`
    async fn add_document(&self, document: &NewDocument) -> GatewayResult<()>;

    /// `DELETE /documents/{id}`
    async fn delete_document(&self, id: &DocumentId) -> GatewayResult<()>;

    /// `GET /query/?q=...`
    async fn query(&self, question: &str) -> GatewayResult<QueryResponse>;

    /// `POST /upload-pdf/` with multipart field `file`
    async fn upload_pdf(&self, upload: &PdfUpload) -> GatewayResult<UploadResult>;
}
