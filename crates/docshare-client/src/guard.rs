//! Route guard: gates protected views on session state.
//!
//! The decision is a pure function of [`SessionState`]; the guard only
//! holds a receiver so it can re-evaluate when the state changes.

use tokio::sync::watch;

use docshare_core::error::AppError;
use docshare_core::result::AppResult;
use docshare_core::types::User;

use crate::session::SessionState;

/// Default entry surface unauthenticated users are sent to.
pub const LOGIN_ROUTE: &str = "/login";

/// What a protected view may do right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Session resolution is still running: render a neutral placeholder,
    /// do not redirect.
    Pending,
    /// No session: send the user to `to` and render nothing.
    Redirect {
        /// Route of the login surface.
        to: String,
    },
    /// Render the protected content for this user.
    Granted(User),
}

/// Decide access for a session state.
pub fn evaluate(state: &SessionState, login_route: &str) -> Access {
    match state {
        SessionState::Resolving => Access::Pending,
        SessionState::Anonymous => Access::Redirect {
            to: login_route.to_string(),
        },
        SessionState::Authenticated(user) => Access::Granted(user.clone()),
    }
}

/// Wraps protected views.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    /// Session state feed.
    session: watch::Receiver<SessionState>,
    /// Where anonymous users are redirected.
    login_route: String,
}

impl RouteGuard {
    /// Creates a guard redirecting to [`LOGIN_ROUTE`].
    pub fn new(session: watch::Receiver<SessionState>) -> Self {
        Self::with_login_route(session, LOGIN_ROUTE)
    }

    /// Creates a guard redirecting to a custom route.
    pub fn with_login_route(
        session: watch::Receiver<SessionState>,
        login_route: impl Into<String>,
    ) -> Self {
        Self {
            session,
            login_route: login_route.into(),
        }
    }

    /// Access for the current session state.
    pub fn check(&self) -> Access {
        evaluate(&self.session.borrow(), &self.login_route)
    }

    /// Wait until session resolution completes, then decide.
    ///
    /// If the session manager is gone while still resolving, nothing can
    /// ever grant access, so this redirects.
    pub async fn settled(&mut self) -> Access {
        match self.session.wait_for(|state| !state.is_loading()).await {
            Ok(state) => evaluate(&state, &self.login_route),
            Err(_) => Access::Redirect {
                to: self.login_route.clone(),
            },
        }
    }

    /// Wait for the next change in access, e.g. after a logout elsewhere.
    pub async fn changed(&mut self) -> Option<Access> {
        self.session.changed().await.ok()?;
        Some(self.check())
    }

    /// Run the protected view only when access is granted.
    pub fn render<T>(&self, view: impl FnOnce(&User) -> T) -> Option<T> {
        match self.check() {
            Access::Granted(user) => Some(view(&user)),
            Access::Pending | Access::Redirect { .. } => None,
        }
    }

    /// Wait for resolution and return the user, or an `Unauthenticated`
    /// error naming the login route.
    pub async fn require(&mut self) -> AppResult<User> {
        match self.settled().await {
            Access::Granted(user) => Ok(user),
            Access::Redirect { to } => Err(AppError::unauthenticated(format!(
                "Not logged in. Continue at {to}"
            ))),
            Access::Pending => Err(AppError::unauthenticated("Session is still loading")),
        }
    }
}
