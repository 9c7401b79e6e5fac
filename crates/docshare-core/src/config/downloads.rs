//! Download target configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where downloaded documents are saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Target directory for saved documents.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Whether an existing file with the same name may be replaced.
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            overwrite: false,
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}
