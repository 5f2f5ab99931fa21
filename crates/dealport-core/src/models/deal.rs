use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Checkpoint;

/// Deal record as reported by the deal service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DealRecord {
    pub deal_uuid: Uuid,
    pub checkpoint: Checkpoint,
    /// Set for deals that were proposed before deal UUIDs existed
    #[serde(default)]
    pub signed_proposal_cid: Option<CidLink>,
    #[serde(default)]
    pub is_offline: bool,
    #[serde(default)]
    pub inbound_file_path: String,
    /// Last error recorded against the deal, empty when none
    #[serde(default)]
    pub err: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl DealRecord {
    /// Minimal record, mostly useful for test doubles.
    pub fn new(deal_uuid: Uuid, checkpoint: Checkpoint) -> Self {
        Self {
            deal_uuid,
            checkpoint,
            signed_proposal_cid: None,
            is_offline: true,
            inbound_file_path: String::new(),
            err: String::new(),
            created_at: None,
        }
    }
}

/// CID in its JSON link form, `{"/": "<cid>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CidLink {
    #[serde(rename = "/")]
    pub cid: String,
}

/// Rejection object returned when the provider declines offline deal data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderDealRejection {
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub reason: String,
}

impl ProviderDealRejection {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: reason.into(),
        }
    }
}
