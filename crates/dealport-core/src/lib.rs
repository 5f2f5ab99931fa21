//! Dealport Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! pure resolution steps (deal identifier, staging path) shared by all dealport
//! components. It also defines the [`DealApi`] collaborator trait that the
//! import workflow talks to.

pub mod config;
pub mod deal_api;
pub mod error;
pub mod identifier;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::ApiConfig;
pub use deal_api::{DealApi, DealApiError, DealApiResult};
pub use error::{ImportError, ImportResult, LogLevel};
pub use identifier::DealIdentifier;
pub use models::{Checkpoint, CidLink, DealRecord, ProviderDealRejection};
pub use paths::{join_base, resolve_local_path};
