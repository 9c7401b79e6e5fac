//! Saving downloaded documents to disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use docshare_core::config::DownloadConfig;
use docshare_core::error::{AppError, ErrorKind};
use docshare_core::result::AppResult;
use docshare_core::traits::DownloadSink;

/// Writes downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    /// Target directory.
    directory: PathBuf,
    /// Whether existing files may be replaced.
    overwrite: bool,
}

impl DirectorySink {
    /// Create a sink writing into `directory`.
    pub fn new(directory: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            directory: directory.into(),
            overwrite,
        }
    }

    /// Create a sink from download configuration.
    pub fn from_config(config: &DownloadConfig) -> Self {
        Self::new(config.directory.clone(), config.overwrite)
    }

    /// Target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Reduce a service-supplied name to a single safe path component.
pub fn sanitize_file_name(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    match cleaned.as_str() {
        "" | "." | ".." => "download".to_string(),
        _ => cleaned,
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, file_name: &str, data: Bytes) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.directory).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory: {}", self.directory.display()),
                e,
            )
        })?;

        let target = self.directory.join(sanitize_file_name(file_name));
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&target).await.map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::AlreadyExists {
                format!("{} already exists", target.display())
            } else {
                format!("Failed to create {}", target.display())
            };
            AppError::with_source(ErrorKind::Storage, message, e)
        })?;
        file.write_all(&data).await?;
        file.flush().await?;

        debug!(path = %target.display(), bytes = data.len(), "Download saved");
        Ok(target)
    }
}
