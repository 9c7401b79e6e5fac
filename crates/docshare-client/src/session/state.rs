//! Session state machine.

use docshare_core::types::User;

/// The client's current belief about who is authenticated.
///
/// Exactly one variant holds at any time. Token and user always change
/// together: `Authenticated` is only published once the token is
/// persisted and its identity resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A persisted token is being checked against the service.
    Resolving,
    /// No valid session.
    Anonymous,
    /// A valid session for `User`.
    Authenticated(User),
}

impl SessionState {
    /// Whether session resolution is still in progress.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Resolving => write!(f, "resolving"),
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticated(user) => write!(f, "authenticated as {}", user.name),
        }
    }
}
