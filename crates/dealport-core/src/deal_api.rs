//! Deal service collaborator
//!
//! The import workflow never talks to the deal-state engine directly. It goes
//! through [`DealApi`], which the API client implements over JSON-RPC and tests
//! replace with an in-memory double.

use std::path::Path;

use async_trait::async_trait;
use cid::Cid;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{DealRecord, ProviderDealRejection};

/// Deal service errors
#[derive(Debug, Error)]
pub enum DealApiError {
    #[error("deal not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl DealApiError {
    /// True for the not-found class of lookup errors, which is the only one the
    /// legacy import path recovers from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DealApiError::NotFound(_))
    }
}

/// Result type for deal service calls
pub type DealApiResult<T> = Result<T, DealApiError>;

/// Deal service contract consumed by the import workflow.
#[async_trait]
pub trait DealApi: Send + Sync {
    /// Fetch a deal record by its UUID.
    async fn deal_by_uuid(&self, deal_uuid: Uuid) -> DealApiResult<DealRecord>;

    /// Fetch a deal record by the CID of its signed proposal (legacy identifier).
    async fn deal_by_signed_proposal_cid(&self, proposal: &Cid) -> DealApiResult<DealRecord>;

    /// Hand data for a legacy market deal to the legacy import backend.
    async fn import_legacy_deal_data(&self, proposal: &Cid, file_path: &Path)
        -> DealApiResult<()>;

    /// Hand data for an offline deal to the execution pipeline.
    ///
    /// Returns the rejection object, if the provider sent one back.
    async fn offline_deal_with_data(
        &self,
        deal_uuid: Uuid,
        file_path: &Path,
        delete_after_import: bool,
    ) -> DealApiResult<Option<ProviderDealRejection>>;
}
