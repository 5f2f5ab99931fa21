//! Data models for the deal service
//!
//! Read-only views of what the deal-state engine returns. Field names follow
//! the service's PascalCase JSON encoding.

mod checkpoint;
mod deal;

pub use checkpoint::Checkpoint;
pub use deal::{CidLink, DealRecord, ProviderDealRejection};
