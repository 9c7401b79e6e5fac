//! The authenticated user's identity record.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Identity resolved from a bearer token. Never persisted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    #[serde(alias = "username")]
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
}
