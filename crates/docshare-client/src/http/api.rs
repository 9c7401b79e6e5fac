//! Typed endpoint calls for the document service.
//!
//! | Operation        | Method | Path             |
//! |------------------|--------|------------------|
//! | Login            | POST   | `/login`         |
//! | Register         | POST   | `/signup`        |
//! | Resolve identity | GET    | `/user`          |
//! | List documents   | GET    | `/documents`     |
//! | Upload           | POST   | `/upload`        |
//! | Download         | GET    | `/download/{id}` |
//! | Delete           | DELETE | `/delete/{id}`   |

use bytes::Bytes;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;

use docshare_core::config::LoginEncoding;
use docshare_core::error::{AppError, ErrorKind};
use docshare_core::result::AppResult;
use docshare_core::types::{Document, DocumentId, User};

use super::client::{ApiClient, transport_error};
use super::dto::{DocumentsEnvelope, LoginRequest, LoginResponse, SignupRequest, UserEnvelope};

/// Body of a successful download.
#[derive(Debug, Clone)]
pub struct DownloadedContent {
    /// Raw document bytes.
    pub data: Bytes,
    /// File name suggested by the `Content-Disposition` header, if any.
    pub suggested_name: Option<String>,
}

impl ApiClient {
    /// Exchange credentials for an access token.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let body = LoginRequest { username, password };
        let builder = self.request(Method::POST, &["login"])?;
        let builder = match self.login_encoding() {
            LoginEncoding::Json => builder.json(&body),
            LoginEncoding::Form => builder.form(&body),
        };
        let response: LoginResponse = self.send_json(builder).await?;
        if response.access_token.trim().is_empty() {
            return Err(AppError::new(
                ErrorKind::Serialization,
                "Login response did not contain an access token",
            ));
        }
        if let Some(kind) = response.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case("bearer") {
                tracing::warn!(token_type = kind, "Unexpected token type in login response");
            }
        }
        Ok(response.access_token)
    }

    /// Create a new account. Does not log in.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> AppResult<()> {
        let body = SignupRequest {
            name,
            email,
            password,
        };
        let builder = self.request(Method::POST, &["signup"])?.json(&body);
        self.send(builder).await?;
        Ok(())
    }

    /// Resolve the identity behind the stored token.
    pub async fn current_user(&self) -> AppResult<User> {
        let builder = self.request(Method::GET, &["user"])?;
        let envelope: UserEnvelope = self.send_json(builder).await?;
        Ok(envelope.user)
    }

    /// Resolve the identity behind an explicit token, ignoring the store.
    pub async fn user_for_token(&self, token: &str) -> AppResult<User> {
        let builder = self
            .request_anonymous(Method::GET, &["user"])?
            .bearer_auth(token);
        let envelope: UserEnvelope = self.send_json(builder).await?;
        Ok(envelope.user)
    }

    /// Fetch every document visible to the current session.
    pub async fn list_documents(&self) -> AppResult<Vec<Document>> {
        let builder = self.request(Method::GET, &["documents"])?;
        let envelope: DocumentsEnvelope = self.send_json(builder).await?;
        Ok(envelope.documents)
    }

    /// Upload one file as multipart field `file`.
    ///
    /// Returns the created document when the service echoes it back.
    pub async fn upload(
        &self,
        file_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> AppResult<Option<Document>> {
        let part = Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid content type '{mime_type}'"),
                    e,
                )
            })?;
        let form = Form::new().part("file", part);
        let builder = self.request(Method::POST, &["upload"])?.multipart(form);
        let response = self.send(builder).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        Ok(serde_json::from_slice::<Document>(&body).ok())
    }

    /// Fetch the binary content of a document.
    pub async fn download(&self, id: &DocumentId) -> AppResult<DownloadedContent> {
        let builder = self.request(Method::GET, &["download", id.as_str()])?;
        let response = self.send(builder).await?;
        let suggested_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition);
        let data = response.bytes().await.map_err(transport_error)?;
        Ok(DownloadedContent {
            data,
            suggested_name,
        })
    }

    /// Delete a document.
    pub async fn delete(&self, id: &DocumentId) -> AppResult<()> {
        let builder = self.request(Method::DELETE, &["delete", id.as_str()])?;
        self.send(builder).await?;
        Ok(())
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> AppResult<T> {
        let response = self.send(builder).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Pull `filename="..."` out of a `Content-Disposition` header value.
fn filename_from_disposition(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|param| {
        let (key, raw) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = raw.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}
