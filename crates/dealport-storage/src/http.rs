use crate::traits::{FetchError, FetchResult, PayloadFetcher};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// HTTP GET payload fetcher
///
/// Only `200 OK` counts as success. No request timeout is set; a stalled
/// transfer blocks until the server or the network gives up.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> FetchResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| FetchError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Use a preconfigured client (proxies, custom TLS roots, timeouts).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PayloadFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, destination: &Path) -> FetchResult<u64> {
        let start = std::time::Instant::now();

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::File::create(destination).await?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let mut body = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| FetchError::Transport(e.to_string()))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        file.sync_all().await?;

        tracing::info!(
            url = %url,
            path = %destination.display(),
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remote payload fetched"
        );

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fetch_writes_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/offline/deal.car")
            .with_status(200)
            .with_body("car file bytes")
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let destination = dir.path().join("deal.car");
        let fetcher = HttpFetcher::new().unwrap();

        let written = fetcher
            .fetch(&format!("{}/offline/deal.car", server.url()), &destination)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(written, 14);
        assert_eq!(std::fs::read(&destination).unwrap(), b"car file bytes");
    }

    #[tokio::test]
    async fn test_fetch_creates_parent_dirs() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a.car")
            .with_status(200)
            .with_body("x")
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let destination = dir.path().join("nested/staging/a.car");
        let fetcher = HttpFetcher::new().unwrap();

        fetcher
            .fetch(&format!("{}/a.car", server.url()), &destination)
            .await
            .unwrap();

        assert!(destination.exists());
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/moved.car")
            .with_status(204)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let fetcher = HttpFetcher::new().unwrap();

        let result = fetcher
            .fetch(
                &format!("{}/moved.car", server.url()),
                &dir.path().join("moved.car"),
            )
            .await;

        assert!(matches!(result, Err(FetchError::Status(204))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_transport_error() {
        let dir = tempdir().unwrap();
        let fetcher = HttpFetcher::new().unwrap();

        let result = fetcher
            .fetch("http://127.0.0.1:1/a.car", &dir.path().join("a.car"))
            .await;

        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
