//! Core traits defined in `docshare-core` and implemented by other crates.

pub mod download_sink;
pub mod token_store;

pub use download_sink::DownloadSink;
pub use token_store::TokenStore;
