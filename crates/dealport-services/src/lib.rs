//! Dealport Services Layer
//!
//! This crate hosts the offline deal import workflow: it ties the identifier
//! and path resolution from `dealport-core`, payload staging from
//! `dealport-storage` and the injected [`DealApi`] together. Keep the
//! orchestration here; keep argument handling and output in `dealport-cli`.
//!
//! [`DealApi`]: dealport_core::DealApi

pub mod import;

pub use import::{ImportOutcome, ImportRequest, ImportService};
