//! Token persistence trait.

use crate::result::AppResult;

/// Persists the single bearer token across process restarts.
///
/// No expiry is tracked here: a token is valid until the service rejects
/// it. Implementations must treat an empty value as absent. Writes only
/// happen from login, logout and rejected-token cleanup, so calls are
/// synchronous and cheap.
pub trait TokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the stored token, if any.
    fn get(&self) -> AppResult<Option<String>>;

    /// Replace the stored token.
    fn set(&self, token: &str) -> AppResult<()>;

    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> AppResult<()>;
}
