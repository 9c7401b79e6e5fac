//! Client configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default, so an empty configuration is valid.

pub mod api;
pub mod downloads;
pub mod logging;
pub mod session;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::api::{ApiConfig, LoginEncoding};
pub use self::downloads::DownloadConfig;
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Root client configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay + an
/// explicit file) and `DOCSHARE__*` environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document service connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Token persistence settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Download target settings.
    #[serde(default)]
    pub downloads: DownloadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml`, the explicit
    /// `file` (which must exist when given) and environment variables
    /// prefixed with `DOCSHARE__`.
    pub fn load(env: &str, file: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path.to_path_buf()).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("DOCSHARE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from a TOML string, without any overlays.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check values that deserialize fine but cannot work at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::configuration(format!(
                "api.base_url must be an http(s) URL, got '{base}'"
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "api.timeout_seconds must be greater than zero",
            ));
        }
        let key = self.session.token_key.trim();
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(AppError::configuration(
                "session.token_key must be a plain file name",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.api.login_encoding, LoginEncoding::Json);
        assert_eq!(config.session.token_key, "token");
        assert!(!config.downloads.overwrite);
        assert_eq!(config.logging.level, "warn");
        config.validate().unwrap();
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://docs.example.com/api"
            timeout_seconds = 3
            login_encoding = "form"

            [session]
            token_dir = "/tmp/docshare-test"
            token_key = "bearer"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://docs.example.com/api");
        assert_eq!(config.api.timeout_seconds, 3);
        assert_eq!(config.api.login_encoding, LoginEncoding::Form);
        assert_eq!(
            config.session.token_path(),
            Path::new("/tmp/docshare-test/bearer")
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://nope".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.session.token_key = "../escape".into();
        assert!(config.validate().is_err());
    }
}
