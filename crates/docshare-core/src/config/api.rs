//! Remote API connection settings.

use serde::{Deserialize, Serialize};

/// Connection settings for the document service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. A timeout fails like any transport error.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// How the login credentials are encoded.
    #[serde(default)]
    pub login_encoding: LoginEncoding,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            login_encoding: LoginEncoding::default(),
        }
    }
}

/// Body encoding for `POST /login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginEncoding {
    /// `{"username": ..., "password": ...}` as a JSON body.
    Json,
    /// OAuth2 password-style `application/x-www-form-urlencoded` fields.
    Form,
}

impl Default for LoginEncoding {
    fn default() -> Self {
        Self::Json
    }
}

impl std::fmt::Display for LoginEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginEncoding::Json => write!(f, "json"),
            LoginEncoding::Form => write!(f, "form"),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("docshare/{}", env!("CARGO_PKG_VERSION"))
}
