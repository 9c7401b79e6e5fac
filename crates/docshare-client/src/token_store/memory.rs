//! In-process token store.

use std::sync::Mutex;

use docshare_core::error::AppError;
use docshare_core::result::AppResult;
use docshare_core::traits::TokenStore;

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(super::normalize(&token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> AppResult<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| AppError::internal("Token store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn set(&self, token: &str) -> AppResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| AppError::internal("Token store lock poisoned"))?;
        *guard = super::normalize(token);
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| AppError::internal("Token store lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
