//! # docshare-client
//!
//! Client-side session and document management for the DocShare service.
//!
//! - [`token_store`] — persistence of the single bearer token
//! - [`http`] — the [`ApiClient`] every request goes through
//! - [`session`] — the [`SessionManager`] state machine
//! - [`guard`] — gating of protected views on session state
//! - [`documents`] — the [`DocumentWorkflow`] keeping the local list in step
//!   with the service

pub mod documents;
pub mod guard;
pub mod http;
pub mod session;
pub mod token_store;

pub use documents::{DirectorySink, DocumentWorkflow, StagedFile};
pub use guard::{Access, RouteGuard};
pub use http::ApiClient;
pub use session::{SessionManager, SessionState};
pub use token_store::{FileTokenStore, MemoryTokenStore};
