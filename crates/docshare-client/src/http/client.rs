//! The single request-building entry point for the document service.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use tracing::{debug, warn};

use docshare_core::config::{ApiConfig, LoginEncoding};
use docshare_core::error::{AppError, ErrorKind};
use docshare_core::result::AppResult;
use docshare_core::traits::TokenStore;

use super::dto::ErrorBody;

/// HTTP client for the document service.
///
/// Every request is built through [`ApiClient::request`], which applies
/// [`ApiClient::authorize`]: the current token from the [`TokenStore`] is
/// attached as a bearer credential when present. Errors are passed through
/// unchanged; there are no retries and no token refresh.
#[derive(Clone)]
pub struct ApiClient {
    /// Underlying connection pool.
    http: reqwest::Client,
    /// Base URL endpoint paths are appended to.
    base: Url,
    /// Source of the bearer token.
    tokens: Arc<dyn TokenStore>,
    /// Encoding used for login credentials.
    login_encoding: LoginEncoding,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .field("login_encoding", &self.login_encoding)
            .finish()
    }
}

impl ApiClient {
    /// Creates a new client from configuration.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> AppResult<Self> {
        let base = Url::parse(config.base_url.trim()).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid api.base_url '{}'", config.base_url),
                e,
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "api.base_url '{}' cannot be used as a base URL",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base,
            tokens,
            login_encoding: config.login_encoding,
        })
    }

    /// Base URL of the service.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Encoding used for login credentials.
    pub fn login_encoding(&self) -> LoginEncoding {
        self.login_encoding
    }

    /// The token store this client reads credentials from.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Build the URL for an endpoint given its path segments.
    ///
    /// Segments are percent-encoded, so opaque ids containing `/` or `?`
    /// stay a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("api.base_url cannot have path segments"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request without credentials.
    pub fn request_anonymous(&self, method: Method, segments: &[&str]) -> AppResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "Building request");
        Ok(self.http.request(method, url))
    }

    /// Start a request carrying the current bearer token.
    pub fn request(&self, method: Method, segments: &[&str]) -> AppResult<RequestBuilder> {
        Ok(self.authorize(self.request_anonymous(method, segments)?))
    }

    /// Attach the stored token as a bearer credential.
    ///
    /// A token store that cannot be read degrades to an unauthenticated
    /// request; the service then decides.
    pub fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                warn!(error = %e, "Token store unreadable, sending request without credentials");
                builder
            }
        }
    }

    /// Dispatch a request and reject non-success statuses.
    pub async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), url = %response.url(), "Request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorBody::message_from(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });
        debug!(status = status.as_u16(), %message, "Request rejected");
        Err(AppError::http(status.as_u16(), message))
    }
}

/// Map a reqwest failure before any response arrived.
pub(crate) fn transport_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "Request timed out"
    } else if err.is_connect() {
        "Could not connect to the document service"
    } else if err.is_decode() {
        return AppError::with_source(
            ErrorKind::Serialization,
            "Could not read the service response",
            err,
        );
    } else {
        "Request to the document service failed"
    };
    AppError::with_source(ErrorKind::Transport, message, err)
}
