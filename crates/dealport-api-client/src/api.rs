//! Deal service methods.
//!
//! CIDs travel as `{"/": "<cid>"}` links, UUIDs and paths as plain strings.

use crate::ApiClient;
use async_trait::async_trait;
use cid::Cid;
use dealport_core::{DealApi, DealApiResult, DealRecord, ProviderDealRejection};
use serde_json::json;
use std::path::Path;
use uuid::Uuid;

fn cid_link(cid: &Cid) -> serde_json::Value {
    json!({ "/": cid.to_string() })
}

#[async_trait]
impl DealApi for ApiClient {
    async fn deal_by_uuid(&self, deal_uuid: Uuid) -> DealApiResult<DealRecord> {
        self.call("BoostDeal", json!([deal_uuid])).await
    }

    async fn deal_by_signed_proposal_cid(&self, proposal: &Cid) -> DealApiResult<DealRecord> {
        self.call("BoostDealBySignedProposalCid", json!([cid_link(proposal)]))
            .await
    }

    async fn import_legacy_deal_data(
        &self,
        proposal: &Cid,
        file_path: &Path,
    ) -> DealApiResult<()> {
        let _: serde_json::Value = self
            .call(
                "MarketImportDealData",
                json!([cid_link(proposal), file_path.to_string_lossy()]),
            )
            .await?;
        Ok(())
    }

    async fn offline_deal_with_data(
        &self,
        deal_uuid: Uuid,
        file_path: &Path,
        delete_after_import: bool,
    ) -> DealApiResult<Option<ProviderDealRejection>> {
        self.call(
            "BoostOfflineDealWithData",
            json!([deal_uuid, file_path.to_string_lossy(), delete_after_import]),
        )
        .await
    }
}
