//! Unified application error types for DocShare.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Operation-level failures (for
//! example [`ErrorKind::DeleteFailed`]) keep the underlying transport or
//! HTTP error as their `source`, so callers can still inspect what the
//! remote service actually said.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The service could not be reached (connection refused, DNS, timeout).
    Transport,
    /// The service answered with a non-success HTTP status.
    Http,
    /// Login was rejected or the issued token could not be resolved.
    AuthenticationFailed,
    /// Account registration was rejected.
    RegistrationFailed,
    /// A stored token was rejected by the service.
    TokenInvalid,
    /// Fetching the document list failed.
    ListFailed,
    /// Uploading the staged file failed. The staged file is kept.
    UploadFailed,
    /// Downloading or saving a document failed.
    DownloadFailed,
    /// Deleting a document failed. The local list is unchanged.
    DeleteFailed,
    /// An upload was requested with nothing staged.
    NoFileSelected,
    /// A protected operation was attempted without an active session.
    Unauthenticated,
    /// Local input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A local storage I/O error occurred (token file, download target).
    Storage,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The operation was cancelled because its owner went away.
    Cancelled,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "TRANSPORT"),
            Self::Http => write!(f, "HTTP"),
            Self::AuthenticationFailed => write!(f, "AUTHENTICATION_FAILED"),
            Self::RegistrationFailed => write!(f, "REGISTRATION_FAILED"),
            Self::TokenInvalid => write!(f, "TOKEN_INVALID"),
            Self::ListFailed => write!(f, "LIST_FAILED"),
            Self::UploadFailed => write!(f, "UPLOAD_FAILED"),
            Self::DownloadFailed => write!(f, "DOWNLOAD_FAILED"),
            Self::DeleteFailed => write!(f, "DELETE_FAILED"),
            Self::NoFileSelected => write!(f, "NO_FILE_SELECTED"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout DocShare.
///
/// `message` is always safe to show to the user. `status` is set when the
/// error originated from (or wraps) an HTTP response.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// HTTP status code reported by the service, if any.
    pub status: Option<u16>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Wrap another `AppError` under a new kind, keeping its HTTP status.
    pub fn wrap(kind: ErrorKind, message: impl Into<String>, inner: AppError) -> Self {
        let status = inner.status;
        Self {
            kind,
            message: message.into(),
            status,
            source: Some(Box::new(inner)),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an error for a non-success HTTP status.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ErrorKind::Http, message)
        }
    }

    /// Create an authentication-failed error.
    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthenticationFailed, message)
    }

    /// Create a no-file-selected error.
    pub fn no_file_selected() -> Self {
        Self::new(ErrorKind::NoFileSelected, "Please select a file to upload")
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a cancellation error.
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "Operation cancelled")
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// HTTP status code attached to this error or the error it wraps.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether the service rejected the credential (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// Whether re-invoking the same operation may succeed.
    ///
    /// Local validation and configuration problems never fix themselves;
    /// remote failures may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self.kind,
            ErrorKind::NoFileSelected
                | ErrorKind::Validation
                | ErrorKind::Configuration
                | ErrorKind::Unauthenticated
                | ErrorKind::Cancelled
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            status: self.status,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
