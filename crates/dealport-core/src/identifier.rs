//! Deal identifier resolution
//!
//! Deals made after the UUID scheme existed are addressed by their UUID.
//! Older market deals are addressed by the CID of their signed proposal.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use cid::Cid;
use uuid::Uuid;

use crate::error::{ImportError, ImportResult};

/// Caller-supplied deal identifier, classified by scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealIdentifier {
    /// New-style deal, addressed by UUID
    Uuid(Uuid),
    /// Legacy deal, addressed by signed proposal CID
    LegacyProposal(Cid),
}

impl DealIdentifier {
    /// Classify `token`. UUID syntax always wins; CID decoding is only tried
    /// when the token is not a UUID.
    pub fn parse(token: &str) -> ImportResult<Self> {
        if let Ok(deal_uuid) = Uuid::parse_str(token) {
            return Ok(DealIdentifier::Uuid(deal_uuid));
        }

        Cid::try_from(token)
            .map(DealIdentifier::LegacyProposal)
            .map_err(|_| ImportError::InvalidIdentifier(token.to_string()))
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, DealIdentifier::LegacyProposal(_))
    }
}

impl FromStr for DealIdentifier {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DealIdentifier::parse(s)
    }
}

impl Display for DealIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DealIdentifier::Uuid(deal_uuid) => write!(f, "{}", deal_uuid),
            DealIdentifier::LegacyProposal(proposal) => write!(f, "{}", proposal),
        }
    }
}
