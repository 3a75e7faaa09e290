//! reqwest implementation of the backend gateway

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{BackendGateway, GatewayResult};
use crate::config::BackendConfig;
use crate::error::{ErrorBody, GatewayError};
use crate::types::{
    Document, DocumentId, DocumentListResponse, NewDocument, PdfUpload, QueryResponse,
    UploadResult,
};

/// HTTP client for the RAG backend
#[derive(Clone)]
pub struct HttpGateway {
    /// HTTP client
    client: Client,
    /// Backend origin without trailing slash
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway for the configured backend
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_client(Client::new(), &config.base_url)
    }

    /// Create a gateway with a preconfigured client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Backend origin
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and split the response into success / backend failure
    async fn send(&self, request: RequestBuilder) -> GatewayResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::transport(format!("Failed to read error body: {}", e)))?;
        let body = ErrorBody::from_slice(&bytes);

        tracing::debug!("Backend returned HTTP {}: {:?}", status, body);
        Err(GatewayError::backend(status, body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::transport(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_documents(&self) -> GatewayResult<Vec<Document>> {
        let url = self.url("/documents");
        tracing::debug!("GET {}", url);

        let response: DocumentListResponse = self.send_json(self.client.get(&url)).await?;
        Ok(response.documents)
    }

    async fn add_document(&self, document: &NewDocument) -> GatewayResult<()> {
        let url = self.url("/documents");
        tracing::debug!("POST {}", url);

        self.send(self.client.post(&url).json(document)).await?;
        Ok(())
    }

    async fn delete_document(&self, id: &DocumentId) -> GatewayResult<()> {
        let url = self.url(&format!("/documents/{}", urlencoding::encode(id.as_str())));
        tracing::debug!("DELETE {}", url);

        self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn query(&self, question: &str) -> GatewayResult<QueryResponse> {
        let url = self.url(&format!("/query/?q={}", urlencoding::encode(question)));
        tracing::debug!("GET {}", url);

        self.send_json(self.client.get(&url)).await
    }

    async fn upload_pdf(&self, upload: &PdfUpload) -> GatewayResult<UploadResult> {
        let url = self.url("/upload-pdf/");
        tracing::debug!("POST {} ({} bytes)", url, upload.bytes.len());

        let part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.name.clone())
            .mime_str(&upload.mime)
            .map_err(|e| GatewayError::transport(format!("Invalid MIME type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        self.send_json(self.client.post(&url).multipart(form)).await
    }
}
