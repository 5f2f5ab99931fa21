//! Dealport Storage Library
//!
//! This crate stages deal payloads on local disk. It provides the
//! [`PayloadFetcher`] trait, an HTTP implementation, and [`stage_payload`],
//! which decides whether a fetch is needed at all and cleans up after a
//! failed one.
//!
//! # Staging rules
//!
//! - A file already present at the local path is used as-is; nothing is fetched.
//! - A missing file is only fetched when the caller asked for a remote fetch.
//! - A failed fetch never leaves a file behind at the local path.

#[cfg(feature = "fetch-http")]
pub mod http;
pub mod staging;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "fetch-http")]
pub use http::HttpFetcher;
pub use staging::{local_file_state, stage_payload, LocalFileState, StagedFile, StagingOutcome};
pub use traits::{FetchError, FetchResult, PayloadFetcher};
