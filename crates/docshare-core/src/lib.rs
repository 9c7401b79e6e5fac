//! # docshare-core
//!
//! Core crate for the DocShare client. Contains configuration schemas,
//! the domain types exchanged with the document service, the seams that
//! other crates implement (token persistence, download sinks), and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other DocShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
