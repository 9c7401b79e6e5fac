//! Session manager: the single writer of session state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use docshare_core::error::{AppError, ErrorKind};
use docshare_core::result::AppResult;
use docshare_core::traits::TokenStore;
use docshare_core::types::User;

use super::registration::Registration;
use super::state::SessionState;
use crate::http::ApiClient;

/// Owns the session state and the token lifecycle.
///
/// State is published through a [`watch`] channel: the manager is the only
/// writer, the route guard and views subscribe as readers.
#[derive(Debug)]
pub struct SessionManager {
    /// Client used for authentication endpoints.
    api: ApiClient,
    /// Persisted bearer token.
    tokens: Arc<dyn TokenStore>,
    /// Published session state.
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Creates a manager in the `Resolving` state.
    ///
    /// The token store must be the same one `api` injects credentials from.
    pub fn new(api: ApiClient) -> Self {
        let tokens = Arc::clone(api.token_store());
        let (state, _) = watch::channel(SessionState::Resolving);
        Self { api, tokens, state }
    }

    /// Creates a manager and resolves any persisted token.
    pub async fn start(api: ApiClient) -> Self {
        let manager = Self::new(api);
        manager.restore().await;
        manager
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Whether resolution of a persisted token is still pending.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// The API client this session authenticates.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Resolve the persisted token into a live session.
    ///
    /// Only acts while `Resolving`; later calls return the current state.
    /// A rejected or unreadable token is an expected condition: it is
    /// cleared and the session becomes `Anonymous` without an error.
    pub async fn restore(&self) -> SessionState {
        if !self.is_loading() {
            return self.state();
        }

        let token = match self.tokens.get() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Token store unreadable, starting anonymous");
                None
            }
        };

        let next = match token {
            None => {
                debug!("No persisted token");
                SessionState::Anonymous
            }
            Some(token) => match self.api.user_for_token(&token).await {
                Ok(user) => {
                    info!(user_id = %user.id, "Session restored");
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    let rejected = AppError::wrap(
                        ErrorKind::TokenInvalid,
                        "Stored token was not accepted",
                        e,
                    );
                    info!(error = %rejected, "Discarding persisted token");
                    self.clear_token_if(&token);
                    SessionState::Anonymous
                }
            },
        };

        // A login that finished meanwhile owns the session now.
        let applied = self.state.send_if_modified(|current| {
            if !current.is_loading() {
                return false;
            }
            *current = next;
            true
        });
        if !applied {
            debug!("Session settled elsewhere during restore");
        }
        self.state()
    }

    /// Log in and persist the issued token.
    ///
    /// The token's identity is resolved before anything is stored, so a
    /// successful login always yields a populated user. On failure nothing
    /// is persisted and the previous state is kept.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let token = self.api.login(username, password).await.map_err(|e| {
            AppError::wrap(
                ErrorKind::AuthenticationFailed,
                "Login failed. Please check your credentials.",
                e,
            )
        })?;

        let user = self.api.user_for_token(&token).await.map_err(|e| {
            AppError::wrap(
                ErrorKind::AuthenticationFailed,
                "Login succeeded but the account could not be loaded.",
                e,
            )
        })?;

        self.tokens.set(&token)?;
        info!(user_id = %user.id, "Logged in");
        self.publish(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    /// Register a new account. The caller logs in afterwards.
    pub async fn register(&self, registration: &Registration) -> AppResult<()> {
        registration.check()?;
        self.api
            .signup(
                &registration.name,
                &registration.email,
                &registration.password,
            )
            .await
            .map_err(|e| {
                AppError::wrap(
                    ErrorKind::RegistrationFailed,
                    "Registration failed. Please check your details.",
                    e,
                )
            })?;
        info!(email = %registration.email, "Account registered");
        Ok(())
    }

    /// Drop the session. Never touches the network.
    pub fn logout(&self) {
        self.clear_token();
        self.publish(SessionState::Anonymous);
        info!("Logged out");
    }

    fn clear_token(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to clear persisted token");
        }
    }

    /// Clear the store only while it still holds `token`.
    fn clear_token_if(&self, token: &str) {
        match self.tokens.get() {
            Ok(Some(current)) if current != token => {
                debug!("Persisted token replaced during restore, keeping it");
            }
            _ => self.clear_token(),
        }
    }

    fn publish(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
