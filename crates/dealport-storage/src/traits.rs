//! Payload fetcher abstraction
//!
//! This module defines the trait used to materialize a remote payload on local disk.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Fetch operation errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Retrieves a whole remote resource into a local file.
///
/// Implementations create (or truncate) `destination` and write the complete
/// body to it. There is no resume and no checksum verification. On error the
/// destination may hold partial data; removing it is the caller's job.
#[async_trait]
pub trait PayloadFetcher: Send + Sync {
    /// Retrieve `url` into `destination` and return the number of bytes written.
    async fn fetch(&self, url: &str, destination: &Path) -> FetchResult<u64>;
}
