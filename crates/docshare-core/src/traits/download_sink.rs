//! Destination for downloaded document content.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Receives the bytes of a downloaded document and saves them locally.
#[async_trait]
pub trait DownloadSink: Send + Sync + std::fmt::Debug + 'static {
    /// Save `data` under `file_name` and return where it ended up.
    async fn save(&self, file_name: &str, data: Bytes) -> AppResult<PathBuf>;
}
