//! HTTP access to the document service.

pub mod api;
pub mod client;
pub mod dto;

pub use api::DownloadedContent;
pub use client::ApiClient;
