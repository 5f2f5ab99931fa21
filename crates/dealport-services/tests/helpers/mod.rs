//! Test helpers: in-memory deal service and fetch doubles for the import workflow.
//!
//! Run from workspace root: `cargo test -p dealport-services --test import_test`.

#![allow(dead_code)]

use async_trait::async_trait;
use cid::Cid;
use dealport_core::{
    Checkpoint, CidLink, DealApi, DealApiError, DealApiResult, DealRecord,
    ProviderDealRejection,
};
use dealport_services::{ImportRequest, ImportService};
use dealport_storage::{FetchResult, PayloadFetcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uuid::Uuid;

pub const PROPOSAL: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

/// A call received by [`RecordingDealApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealCall {
    DealByUuid(Uuid),
    DealByProposal(String),
    LegacyImport { proposal: String, path: PathBuf },
    OfflineDeal { deal_uuid: Uuid, path: PathBuf, delete_after_import: bool },
}

/// Deal service double. Unknown deals and proposals answer "not found".
#[derive(Default)]
pub struct RecordingDealApi {
    deals: HashMap<Uuid, DealRecord>,
    proposals: HashMap<String, DealRecord>,
    proposal_lookup_error: Option<String>,
    rejection: Option<ProviderDealRejection>,
    submission_error: Option<String>,
    calls: Mutex<Vec<DealCall>>,
}

impl RecordingDealApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deal(mut self, deal_uuid: Uuid, checkpoint: Checkpoint) -> Self {
        self.deals
            .insert(deal_uuid, DealRecord::new(deal_uuid, checkpoint));
        self
    }

    pub fn with_proposal(mut self, proposal: &str, deal_uuid: Uuid, checkpoint: Checkpoint) -> Self {
        let mut record = DealRecord::new(deal_uuid, checkpoint);
        record.signed_proposal_cid = Some(CidLink {
            cid: proposal.to_string(),
        });
        self.proposals.insert(proposal.to_string(), record);
        self
    }

    /// Make proposal lookups fail with an error that is not "not found".
    pub fn with_proposal_lookup_error(mut self, message: &str) -> Self {
        self.proposal_lookup_error = Some(message.to_string());
        self
    }

    pub fn rejecting(mut self, rejection: ProviderDealRejection) -> Self {
        self.rejection = Some(rejection);
        self
    }

    pub fn failing_submissions(mut self, message: &str) -> Self {
        self.submission_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<DealCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: DealCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn submission_result(&self) -> DealApiResult<()> {
        match &self.submission_error {
            Some(message) => Err(DealApiError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DealApi for RecordingDealApi {
    async fn deal_by_uuid(&self, deal_uuid: Uuid) -> DealApiResult<DealRecord> {
        self.record(DealCall::DealByUuid(deal_uuid));
        self.deals
            .get(&deal_uuid)
            .cloned()
            .ok_or_else(|| DealApiError::NotFound(format!("deal {} not found", deal_uuid)))
    }

    async fn deal_by_signed_proposal_cid(&self, proposal: &Cid) -> DealApiResult<DealRecord> {
        self.record(DealCall::DealByProposal(proposal.to_string()));
        if let Some(message) = &self.proposal_lookup_error {
            return Err(DealApiError::Rpc {
                code: 1,
                message: message.clone(),
            });
        }
        self.proposals
            .get(&proposal.to_string())
            .cloned()
            .ok_or_else(|| DealApiError::NotFound(format!("proposal {} not found", proposal)))
    }

    async fn import_legacy_deal_data(&self, proposal: &Cid, file_path: &Path) -> DealApiResult<()> {
        self.record(DealCall::LegacyImport {
            proposal: proposal.to_string(),
            path: file_path.to_path_buf(),
        });
        self.submission_result()
    }

    async fn offline_deal_with_data(
        &self,
        deal_uuid: Uuid,
        file_path: &Path,
        delete_after_import: bool,
    ) -> DealApiResult<Option<ProviderDealRejection>> {
        self.record(DealCall::OfflineDeal {
            deal_uuid,
            path: file_path.to_path_buf(),
            delete_after_import,
        });
        self.submission_result()?;
        Ok(self.rejection.clone())
    }
}

/// Fetcher that writes a fixed body and counts its calls.
#[derive(Default)]
pub struct CountingFetcher {
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PayloadFetcher for CountingFetcher {
    async fn fetch(&self, _url: &str, destination: &Path) -> FetchResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::fs::write(destination, b"fetched payload").await?;
        Ok(15)
    }
}

/// Staging directory plus the service under test.
pub struct TestImport {
    pub deals: Arc<RecordingDealApi>,
    pub fetcher: Arc<CountingFetcher>,
    pub service: ImportService,
    pub staging: TempDir,
}

impl TestImport {
    pub fn new(deals: RecordingDealApi) -> Self {
        Self::with_fetcher(deals, CountingFetcher::default())
    }

    pub fn with_fetcher(deals: RecordingDealApi, fetcher: CountingFetcher) -> Self {
        let deals = Arc::new(deals);
        let fetcher = Arc::new(fetcher);
        let service = ImportService::new(deals.clone(), fetcher.clone());
        Self {
            deals,
            fetcher,
            service,
            staging: tempfile::tempdir().unwrap(),
        }
    }

    pub fn staging_base(&self) -> String {
        self.staging.path().display().to_string()
    }

    /// Put `file_name` in the staging directory and return its path.
    pub fn stage(&self, file_name: &str) -> PathBuf {
        let path = self.staging.path().join(file_name);
        std::fs::write(&path, b"staged payload").unwrap();
        path
    }

    /// Request for a pre-staged file: no remote fetch, no deletion.
    pub fn local_request(&self, deal: &str, file_name: &str) -> ImportRequest {
        ImportRequest {
            deal: deal.to_string(),
            file_name: file_name.to_string(),
            local_path: self.staging_base(),
            remote: false,
            remote_path: String::new(),
            delete_after_import: false,
        }
    }
}
