//! A file selected for upload.

use std::path::Path;

use bytes::Bytes;

use docshare_core::error::{AppError, ErrorKind};
use docshare_core::result::AppResult;

/// File content held locally until an upload succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Name sent to the service.
    pub name: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// File content.
    pub data: Bytes,
}

impl StagedFile {
    /// Stage in-memory content, guessing the MIME type from `name`.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .to_string();
        Self {
            name,
            mime_type,
            data: data.into(),
        }
    }

    /// Read a file from disk, optionally overriding its name.
    pub async fn from_path(path: &Path, name: Option<&str>) -> AppResult<Self> {
        let file_name = match name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload")
                .to_string(),
        };

        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::NoFileSelected,
                format!("File not found: {}", path.display()),
                e,
            )
        })?;
        if !metadata.is_file() {
            return Err(AppError::new(
                ErrorKind::NoFileSelected,
                format!("Not a file: {}", path.display()),
            ));
        }

        let content = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read file: {}", path.display()),
                e,
            )
        })?;
        Ok(Self::new(file_name, content))
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
