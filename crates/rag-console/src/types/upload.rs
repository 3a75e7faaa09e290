//! PDF upload types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// MIME type a file must declare to be accepted for upload
pub const PDF_MIME: &str = "application/pdf";

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name shown to the user and sent to the backend
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Declared MIME type
    pub mime: String,
    /// Location on disk
    pub path: PathBuf,
}

impl SelectedFile {
    /// Build a selection from a file on disk.
    ///
    /// The declared MIME type comes from the extension, the same way a
    /// browser file picker declares it.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            size: meta.len(),
            mime,
            path: path.to_path_buf(),
        })
    }

    /// Whether the declared type is PDF
    pub fn is_pdf(&self) -> bool {
        self.mime.eq_ignore_ascii_case(PDF_MIME)
    }

    /// Size in whole kilobytes, rounded
    pub fn size_kb(&self) -> u64 {
        (self.size + 512) / 1024
    }
}

/// File contents ready to be sent as multipart
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Response body for `POST /upload-pdf/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Processing status reported by the backend
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    /// Human-readable note, e.g. which file was indexed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Previews of extracted tables, in document order
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tables: Vec<String>,
}
