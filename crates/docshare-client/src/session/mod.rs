//! Client-side session: who, if anyone, is logged in.

pub mod manager;
pub mod registration;
pub mod state;

pub use manager::SessionManager;
pub use registration::Registration;
pub use state::SessionState;
