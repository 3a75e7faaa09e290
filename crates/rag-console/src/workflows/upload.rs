//! PDF ingestion workflow: pick a file, then upload it

use super::{Settled, Workflows};
use crate::error::{ErrorField, ValidationError};
use crate::tabs::Tab;
use crate::types::{PdfUpload, SelectedFile};

/// Banner text when the upload fails without an `error` field
pub const UPLOAD_FALLBACK: &str = "Failed to upload PDF.";

impl Workflows {
    /// Select the file at `path`, as typed into the file-picker input
    pub fn select_path(&self, path: &str) -> Settled {
        let candidate = match SelectedFile::from_path(path.trim()) {
            Ok(file) => Some(file),
            Err(err) => {
                tracing::warn!("Cannot select '{}': {}", path.trim(), err);
                None
            }
        };

        let settled = self.select_file(candidate);
        if settled != Settled::Skipped {
            let input = path.trim().to_string();
            self.store.update(|state| state.upload.file_input = input);
        }
        settled
    }

    /// Accept `candidate` if it is declared as a PDF.
    ///
    /// Either way, a previous upload result is dropped so it is never shown
    /// next to a different selection.
    pub fn select_file(&self, candidate: Option<SelectedFile>) -> Settled {
        if self.store.read(|state| state.upload.status.is_loading) {
            tracing::debug!("Upload in flight, ignoring selection");
            return Settled::Skipped;
        }

        match candidate.filter(SelectedFile::is_pdf) {
            Some(file) => {
                tracing::info!("Selected {} ({} bytes)", file.name, file.size);
                self.store.update(|state| {
                    state.upload.selected = Some(file);
                    state.upload.result = None;
                    state.upload.status.error = None;
                });
                Settled::Succeeded
            }
            None => {
                tracing::warn!("Rejected selection: not a PDF");
                self.store.update(|state| {
                    state.upload.selected = None;
                    state.upload.result = None;
                    state.upload.status.error = Some(ValidationError::NotPdf.to_string());
                });
                Settled::Failed
            }
        }
    }

    /// Upload the selected file
    pub async fn upload_selected(&self) -> Settled {
        let Some(file) = self.store.read(|state| state.upload.selected.clone()) else {
            self.store
                .set_error(Tab::Upload, ValidationError::NoFileSelected.to_string());
            return Settled::Failed;
        };

        let Some(_loading) = self.store.begin(Tab::Upload) else {
            tracing::debug!("Upload already in flight, ignoring submit");
            return Settled::Skipped;
        };
        self.store.update(|state| state.upload.result = None);

        let bytes = match tokio::fs::read(&file.path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!("Failed to read {}: {}", file.path.display(), err);
                let error = ValidationError::UnreadableFile {
                    name: file.name.clone(),
                    message: err.to_string(),
                };
                self.store.set_error(Tab::Upload, error.to_string());
                return Settled::Failed;
            }
        };

        tracing::info!("Uploading {} ({} bytes)", file.name, bytes.len());

        let upload = PdfUpload {
            name: file.name,
            mime: file.mime,
            bytes,
        };

        match self.gateway.upload_pdf(&upload).await {
            Ok(result) => {
                tracing::info!(
                    "Upload finished: {} ({} tables)",
                    result.status,
                    result.tables.len()
                );
                self.store.update(|state| {
                    state.upload.result = Some(result);
                    state.upload.selected = None;
                    state.upload.file_input.clear();
                    state.upload.status.error = None;
                });
                Settled::Succeeded
            }
            Err(err) => {
                tracing::warn!("PDF upload failed: {}", err);
                self.store.set_error(
                    Tab::Upload,
                    err.user_message(ErrorField::Error, UPLOAD_FALLBACK),
                );
                Settled::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorBody, GatewayError, UNREACHABLE_MESSAGE};
    use crate::gateway::MockBackendGateway;
    use crate::store::Store;
    use crate::types::{UploadResult, PDF_MIME};
    use reqwest::StatusCode;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    fn workflows(gateway: MockBackendGateway) -> Workflows {
        Workflows::new(Store::new(), Arc::new(gateway))
    }

    fn selection(name: &str, mime: &str, path: PathBuf) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            size: 4,
            mime: mime.to_string(),
            path,
        }
    }

    fn write_pdf(dir: &Path) -> PathBuf {
        let path = dir.join("report.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        path
    }

    #[tokio::test]
    async fn test_pdf_selection_accepted_and_text_rejected() {
        let mut gateway = MockBackendGateway::new();
        gateway.expect_upload_pdf().never();
        let wf = workflows(gateway);
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path());

        assert_eq!(
            wf.select_file(Some(selection("report.pdf", PDF_MIME, path.clone()))),
            Settled::Succeeded
        );
        let state = wf.store().snapshot();
        assert_eq!(state.upload.selected.as_ref().unwrap().name, "report.pdf");
        assert!(state.upload.status.error.is_none());

        // Simulate a result left from an earlier upload
        wf.store().update(|s| {
            s.upload.result = Some(UploadResult {
                status: "PDF processed".to_string(),
                message: None,
                tables: vec![],
            })
        });

        assert_eq!(
            wf.select_file(Some(selection("report.pdf", "text/plain", path))),
            Settled::Failed
        );
        let state = wf.store().snapshot();
        assert!(state.upload.selected.is_none());
        assert!(state.upload.result.is_none());
        assert_eq!(
            state.upload.status.error.as_deref(),
            Some("Please select a valid PDF file.")
        );
    }

    #[tokio::test]
    async fn test_select_path_missing_file_is_rejected() {
        let wf = workflows(MockBackendGateway::new());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.pdf");

        assert_eq!(wf.select_path(missing.to_str().unwrap()), Settled::Failed);
        let state = wf.store().snapshot();
        assert!(state.upload.selected.is_none());
        assert!(state.upload.status.error.is_some());
    }

    #[tokio::test]
    async fn test_upload_without_selection_is_guidance_error() {
        let mut gateway = MockBackendGateway::new();
        gateway.expect_upload_pdf().never();
        let wf = workflows(gateway);

        assert_eq!(wf.upload_selected().await, Settled::Failed);
        assert_eq!(
            wf.store().snapshot().upload.status.error.as_deref(),
            Some("Please select a PDF file to upload.")
        );
    }

    #[tokio::test]
    async fn test_upload_success_keeps_table_order_and_resets_picker() {
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_upload_pdf()
            .withf(|u| u.name == "report.pdf" && u.mime == PDF_MIME && u.bytes == b"%PDF")
            .times(1)
            .returning(|_| {
                Ok(UploadResult {
                    status: "PDF processed".to_string(),
                    message: Some("report.pdf uploaded and indexed.".to_string()),
                    tables: vec!["a".to_string(), "b".to_string()],
                })
            });
        let wf = workflows(gateway);
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path());

        assert_eq!(wf.select_path(path.to_str().unwrap()), Settled::Succeeded);
        assert!(!wf.store().snapshot().upload.file_input.is_empty());

        assert_eq!(wf.upload_selected().await, Settled::Succeeded);

        let state = wf.store().snapshot();
        let result = state.upload.result.unwrap();
        assert_eq!(result.tables, vec!["a".to_string(), "b".to_string()]);
        assert!(state.upload.selected.is_none());
        assert!(state.upload.file_input.is_empty());
        assert!(state.upload.status.error.is_none());
        assert!(!state.upload.status.is_loading);
    }

    #[tokio::test]
    async fn test_upload_failures() {
        let mut gateway = MockBackendGateway::new();
        let mut calls = 0;
        gateway.expect_upload_pdf().times(3).returning(move |_| {
            calls += 1;
            match calls {
                1 => Err(GatewayError::backend(
                    StatusCode::BAD_REQUEST,
                    ErrorBody::error("Unsupported file format. Use PDF or TXT."),
                )),
                2 => Err(GatewayError::backend(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::default(),
                )),
                _ => Err(GatewayError::transport("connection refused")),
            }
        });
        let wf = workflows(gateway);
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path());
        wf.select_file(Some(selection("report.pdf", PDF_MIME, path)));

        let expected = [
            "Unsupported file format. Use PDF or TXT.",
            UPLOAD_FALLBACK,
            UNREACHABLE_MESSAGE,
        ];
        for message in expected {
            assert_eq!(wf.upload_selected().await, Settled::Failed);
            let state = wf.store().snapshot();
            assert_eq!(state.upload.status.error.as_deref(), Some(message));
            assert!(!state.upload.status.is_loading);
            // The selection survives a failed upload so it can be retried
            assert!(state.upload.selected.is_some());
        }
    }

    #[tokio::test]
    async fn test_unreadable_selection_never_reaches_backend() {
        let mut gateway = MockBackendGateway::new();
        gateway.expect_upload_pdf().never();
        let wf = workflows(gateway);
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path());
        wf.select_file(Some(selection("report.pdf", PDF_MIME, path.clone())));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(wf.upload_selected().await, Settled::Failed);
        let error = wf.store().snapshot().upload.status.error.unwrap();
        assert!(error.starts_with("Could not read 'report.pdf'"), "{}", error);
    }
}
