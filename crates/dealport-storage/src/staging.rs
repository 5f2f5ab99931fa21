//! Local payload staging
//!
//! Decides whether the payload at the resolved local path can be used as-is or
//! has to be fetched, and guarantees a failed fetch leaves nothing behind.

use crate::traits::PayloadFetcher;
use dealport_core::paths::join_base;
use dealport_core::{ImportError, ImportResult};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// What a stat of the local staging path found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFileState {
    Present,
    Absent,
}

/// Stat `path`. Only "not found" maps to [`LocalFileState::Absent`]; any other
/// stat failure is returned as an error.
pub async fn local_file_state(path: &Path) -> io::Result<LocalFileState> {
    match fs::metadata(path).await {
        Ok(_) => Ok(LocalFileState::Present),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LocalFileState::Absent),
        Err(e) => Err(e),
    }
}

/// How the payload ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagingOutcome {
    /// The file was already at the local path
    AlreadyPresent,
    /// The file was fetched from `url`
    Fetched { url: String, size_bytes: u64 },
}

/// Staged file being written by a fetch.
///
/// Removes the file when dropped unless [`StagedFile::persist`] or
/// [`StagedFile::discard`] was called, so every early return out of a fetch
/// cleans up. `Drop` removes the file with blocking `std::fs`; the fetch
/// failure path calls `discard` instead.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    armed: bool,
}

impl StagedFile {
    pub fn guard(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the file and hand its path back.
    pub fn persist(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }

    /// Remove the file now, without blocking the runtime.
    pub async fn discard(self) {
        let path = self.persist();
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed partially staged file");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to remove partially staged file"
                );
            }
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Removed partially staged file");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove partially staged file"
                );
            }
        }
    }
}

/// Make sure the payload for `file_name` exists at `local_path`.
///
/// `remote_base` is only consulted when the local file is missing and `remote`
/// is set; the fetch URL is `remote_base` joined with `file_name`.
pub async fn stage_payload(
    fetcher: &dyn PayloadFetcher,
    local_path: &Path,
    file_name: &str,
    remote: bool,
    remote_base: &str,
) -> ImportResult<StagingOutcome> {
    let state = local_file_state(local_path)
        .await
        .map_err(|source| ImportError::LocalFileUnreadable {
            path: local_path.to_path_buf(),
            source,
        })?;

    if state == LocalFileState::Present {
        tracing::info!(path = %local_path.display(), "Using payload already staged locally");
        return Ok(StagingOutcome::AlreadyPresent);
    }

    if !remote {
        return Err(ImportError::LocalFileMissing(local_path.to_path_buf()));
    }

    let url = join_base(remote_base, file_name, "remote-path")?;
    tracing::info!(url = %url, path = %local_path.display(), "Fetching remote payload");

    let staged = StagedFile::guard(local_path);
    let size_bytes = match fetcher.fetch(&url, staged.path()).await {
        Ok(size_bytes) => size_bytes,
        Err(e) => {
            staged.discard().await;
            return Err(ImportError::RemoteFetchFailed {
                url,
                reason: e.to_string(),
            });
        }
    };
    let staged_path = staged.persist();

    // The fetcher reported success; make sure it actually left a file.
    match local_file_state(&staged_path).await {
        Ok(LocalFileState::Present) => Ok(StagingOutcome::Fetched { url, size_bytes }),
        Ok(LocalFileState::Absent) => Err(ImportError::LocalFileMissing(staged_path)),
        Err(source) => Err(ImportError::LocalFileUnreadable {
            path: staged_path,
            source,
        }),
    }
}
