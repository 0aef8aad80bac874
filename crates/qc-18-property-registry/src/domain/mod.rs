//! # Domain Module
//!
//! Core types and stores of the Property Registry.

pub mod capability;
pub mod debt_ledger;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod lock_table;
pub mod manager_registry;
pub mod record_store;
pub mod value_objects;

pub use capability::AdminGrant;
pub use debt_ledger::{DebtAndForeclosureLedger, ForeclosureOutcome};
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use lock_table::{AssetLockTable, AssetReadGuard, AssetSlot, AssetWriteGuard};
pub use manager_registry::ManagerRegistry;
pub use record_store::ImmutableRecordStore;
pub use value_objects::*;
