//! Domain types shared across the DocShare workspace.

pub mod document;
pub mod id;
pub mod user;

pub use document::Document;
pub use id::{DocumentId, UserId};
pub use user::User;
