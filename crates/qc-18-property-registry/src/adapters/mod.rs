//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the property registry.

mod admin_policy;
mod ownership_ledger;

pub use admin_policy::{MultiKeyAdmin, PerAssetAdmin, SingleKeyAdmin};
pub use ownership_ledger::InMemoryOwnershipLedger;
