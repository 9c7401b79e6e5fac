//! Session persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the bearer token is persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the token file. Defaults to the platform data
    /// directory (`~/.local/share/docshare` on Linux).
    #[serde(default)]
    pub token_dir: Option<PathBuf>,
    /// File name the raw token is stored under.
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_dir: None,
            token_key: default_token_key(),
        }
    }
}

impl SessionConfig {
    /// Resolve the token directory, falling back to the platform default.
    pub fn resolved_token_dir(&self) -> PathBuf {
        self.token_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("docshare")
        })
    }

    /// Full path of the token file.
    pub fn token_path(&self) -> PathBuf {
        self.resolved_token_dir().join(&self.token_key)
    }
}

fn default_token_key() -> String {
    "token".to_string()
}
