//! Offline deal data import
//!
//! Runs one import request through identifier resolution, path resolution,
//! payload staging, the deal state check and submission. Every stage is a hard
//! gate: the first error ends the run.
//!
//! The state check and the submission are two separate calls with nothing
//! held in between. Two concurrent imports for the same deal can both pass the
//! check; rejecting the second one is up to the deal service.

use dealport_core::paths::resolve_local_path;
use dealport_core::{DealApi, DealIdentifier, DealRecord, ImportError, ImportResult};
use dealport_storage::{stage_payload, PayloadFetcher, StagingOutcome};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// One import invocation, as supplied by the caller.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Deal UUID or signed proposal CID
    pub deal: String,
    pub file_name: String,
    /// Local base directory, or a base path the file name is appended to
    pub local_path: String,
    /// Fetch the payload when it is not staged locally
    pub remote: bool,
    /// Remote base URL; only needed when a fetch happens
    pub remote_path: String,
    pub delete_after_import: bool,
}

/// Successfully scheduled import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Handed to the legacy market import backend
    LegacyMarketDeal {
        proposal_cid: String,
        file_path: PathBuf,
    },
    /// Handed to the offline deal pipeline
    OfflineDeal {
        deal_uuid: Uuid,
        file_path: PathBuf,
        delete_after_import: bool,
    },
}

impl Display for ImportOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ImportOutcome::LegacyMarketDeal { proposal_cid, .. } => write!(
                f,
                "Offline deal import for v1.1.0 deal {} scheduled for execution",
                proposal_cid
            ),
            ImportOutcome::OfflineDeal { deal_uuid, .. } => write!(
                f,
                "Offline deal import for v1.2.0 deal {} scheduled for execution",
                deal_uuid
            ),
        }
    }
}

#[derive(Clone)]
pub struct ImportService {
    deals: Arc<dyn DealApi>,
    fetcher: Arc<dyn PayloadFetcher>,
}

impl ImportService {
    pub fn new(deals: Arc<dyn DealApi>, fetcher: Arc<dyn PayloadFetcher>) -> Self {
        Self { deals, fetcher }
    }

    /// Stage the payload for `request` and schedule it for import.
    #[tracing::instrument(skip(self, request), fields(deal = %request.deal, file = %request.file_name))]
    pub async fn import_data(&self, request: &ImportRequest) -> ImportResult<ImportOutcome> {
        let identifier = DealIdentifier::parse(&request.deal)?;

        if identifier.is_legacy() && request.delete_after_import {
            return Err(ImportError::UnsupportedOption(
                "legacy deal data cannot be automatically deleted after import (only new deals)"
                    .to_string(),
            ));
        }

        let file_path = resolve_local_path(&request.local_path, &request.file_name)?;

        let staging = stage_payload(
            self.fetcher.as_ref(),
            &file_path,
            &request.file_name,
            request.remote,
            &request.remote_path,
        )
        .await?;
        if let StagingOutcome::Fetched { url, size_bytes } = &staging {
            tracing::info!(url = %url, size_bytes, "Payload staged from remote");
        }

        match identifier {
            DealIdentifier::Uuid(deal_uuid) => {
                let record = self.deal_by_uuid(deal_uuid).await?;
                ensure_importable(&record)?;
                self.submit_offline_deal(deal_uuid, &file_path, request.delete_after_import)
                    .await
            }
            DealIdentifier::LegacyProposal(proposal) => {
                self.import_legacy_deal(&proposal, &file_path).await
            }
        }
    }

    async fn deal_by_uuid(&self, deal_uuid: Uuid) -> ImportResult<DealRecord> {
        self.deals
            .deal_by_uuid(deal_uuid)
            .await
            .map_err(|source| ImportError::DealLookupFailed {
                deal: deal_uuid.to_string(),
                source,
            })
    }

    /// Deals made before UUIDs existed may still have a deal record; those go
    /// through the offline deal pipeline. The rest only exist in the legacy
    /// market store.
    async fn import_legacy_deal(
        &self,
        proposal: &cid::Cid,
        file_path: &Path,
    ) -> ImportResult<ImportOutcome> {
        match self.deals.deal_by_signed_proposal_cid(proposal).await {
            Ok(record) => {
                tracing::info!(
                    proposal = %proposal,
                    deal_uuid = %record.deal_uuid,
                    "Legacy proposal has a deal record, importing as offline deal"
                );
                ensure_importable(&record)?;
                self.submit_offline_deal(record.deal_uuid, file_path, false)
                    .await
            }
            Err(e) if e.is_not_found() => {
                tracing::info!(
                    proposal = %proposal,
                    "No deal record for proposal, falling back to legacy market import"
                );
                self.deals
                    .import_legacy_deal_data(proposal, file_path)
                    .await
                    .map_err(|source| ImportError::SubmissionTransportFailed {
                        deal: proposal.to_string(),
                        source,
                    })?;

                Ok(ImportOutcome::LegacyMarketDeal {
                    proposal_cid: proposal.to_string(),
                    file_path: file_path.to_path_buf(),
                })
            }
            Err(source) => Err(ImportError::DealLookupFailed {
                deal: proposal.to_string(),
                source,
            }),
        }
    }

    async fn submit_offline_deal(
        &self,
        deal_uuid: Uuid,
        file_path: &Path,
        delete_after_import: bool,
    ) -> ImportResult<ImportOutcome> {
        let rejection = self
            .deals
            .offline_deal_with_data(deal_uuid, file_path, delete_after_import)
            .await
            .map_err(|source| ImportError::SubmissionTransportFailed {
                deal: deal_uuid.to_string(),
                source,
            })?;

        // A rejection without a reason counts as accepted. A genuine rejection
        // that omits its reason would be masked here.
        if let Some(rejection) = rejection.filter(|r| !r.reason.is_empty()) {
            return Err(ImportError::DealRejected {
                deal: deal_uuid,
                reason: rejection.reason,
            });
        }

        tracing::info!(
            deal_uuid = %deal_uuid,
            path = %file_path.display(),
            delete_after_import,
            "Offline deal data submitted"
        );

        Ok(ImportOutcome::OfflineDeal {
            deal_uuid,
            file_path: file_path.to_path_buf(),
            delete_after_import,
        })
    }
}

fn ensure_importable(record: &DealRecord) -> ImportResult<()> {
    if record.checkpoint.accepts_data() {
        Ok(())
    } else {
        Err(ImportError::AlreadyImportedOrInvalidState {
            deal: record.deal_uuid,
            checkpoint: record.checkpoint,
        })
    }
}
