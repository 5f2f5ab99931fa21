//! Error types module
//!
//! Every failure of the import workflow is reported through [`ImportError`].
//! All variants are fatal: the workflow stops at the first error and surfaces
//! it to the caller with the offending identifier, path or reason attached.

use std::path::PathBuf;

use uuid::Uuid;

use crate::deal_api::DealApiError;
use crate::models::Checkpoint;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for caller mistakes like a malformed identifier
    Debug,
    /// Warning level - for deal state conflicts and explicit rejections
    Warn,
    /// Error level - for unexpected I/O and transport failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not parse '{0}' as deal uuid or proposal cid")]
    InvalidIdentifier(String),

    #[error("{0} must not be empty")]
    MissingConfiguration(&'static str),

    #[error("failed to resolve path {path}: {reason}")]
    PathResolutionFailed { path: String, reason: String },

    #[error("local file {} does not exist and remote fetch is disabled", .0.display())]
    LocalFileMissing(PathBuf),

    #[error("failed to stat local file {}: {source}", .path.display())]
    LocalFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {reason}")]
    RemoteFetchFailed { url: String, reason: String },

    #[error("failed to look up deal {deal}: {source}")]
    DealLookupFailed {
        deal: String,
        #[source]
        source: DealApiError,
    },

    #[error("deal {deal} is in checkpoint {checkpoint}, data can only be imported for accepted deals (already imported?)")]
    AlreadyImportedOrInvalidState { deal: Uuid, checkpoint: Checkpoint },

    #[error("unsupported option: {0}")]
    UnsupportedOption(String),

    #[error("offline deal {deal} rejected: {reason}")]
    DealRejected { deal: Uuid, reason: String },

    #[error("failed to submit data for deal {deal}: {source}")]
    SubmissionTransportFailed {
        deal: String,
        #[source]
        source: DealApiError,
    },
}

/// Result type for the import workflow
pub type ImportResult<T> = Result<T, ImportError>;

impl ImportError {
    /// Machine-readable error code (e.g., "DEAL_REJECTED")
    pub fn error_code(&self) -> &'static str {
        match self {
            ImportError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            ImportError::MissingConfiguration(_) => "MISSING_CONFIGURATION",
            ImportError::PathResolutionFailed { .. } => "PATH_RESOLUTION_FAILED",
            ImportError::LocalFileMissing(_) => "LOCAL_FILE_MISSING",
            ImportError::LocalFileUnreadable { .. } => "LOCAL_FILE_UNREADABLE",
            ImportError::RemoteFetchFailed { .. } => "REMOTE_FETCH_FAILED",
            ImportError::DealLookupFailed { .. } => "DEAL_LOOKUP_FAILED",
            ImportError::AlreadyImportedOrInvalidState { .. } => "INVALID_DEAL_STATE",
            ImportError::UnsupportedOption(_) => "UNSUPPORTED_OPTION",
            ImportError::DealRejected { .. } => "DEAL_REJECTED",
            ImportError::SubmissionTransportFailed { .. } => "SUBMISSION_FAILED",
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            ImportError::InvalidIdentifier(_)
            | ImportError::MissingConfiguration(_)
            | ImportError::UnsupportedOption(_)
            | ImportError::LocalFileMissing(_) => LogLevel::Debug,
            ImportError::AlreadyImportedOrInvalidState { .. } | ImportError::DealRejected { .. } => {
                LogLevel::Warn
            }
            ImportError::PathResolutionFailed { .. }
            | ImportError::LocalFileUnreadable { .. }
            | ImportError::RemoteFetchFailed { .. }
            | ImportError::DealLookupFailed { .. }
            | ImportError::SubmissionTransportFailed { .. } => LogLevel::Error,
        }
    }
}
