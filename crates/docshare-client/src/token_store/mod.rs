//! Bearer token persistence.
//!
//! [`FileTokenStore`] keeps the token on disk so a session survives process
//! restarts; [`MemoryTokenStore`] keeps it for the lifetime of the process.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

/// Normalize a raw stored value: surrounding whitespace is ignored and an
/// empty value means "no token".
pub(crate) fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
