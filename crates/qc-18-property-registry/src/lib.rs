//! # QC-18 Property Registry
//!
//! Immutable title records for tokenized real estate, with rights that
//! travel with the ownership token.
//!
//! **Subsystem ID:** 18  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Each property is one asset id that is both a token on the ownership
//! ledger and a key into three registry stores:
//! - Immutable record: legal description, address, geo data, parcel id,
//!   legal owner and the operating agreement digest
//! - Debt and foreclosure: a signed balance, a one-way foreclosure flag
//!   and a reversible freeze
//! - Manager: the address responsible for the property
//!
//! Transferring the token is the whole rights transfer. The registry never
//! participates in a transfer, so nothing can make it partial.
//!
//! ## Guarantees
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | Records never change | No mutating API exists on `ImmutableRecord` |
//! | Foreclosure is one-way | Ledger has no clear operation |
//! | Admin-only mutation | Every store write takes an `AdminGrant` |
//! | Per-asset ordering | `AssetLockTable` slot held for each mutation |
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-property-registry/
//! ├── domain/          # Records, stores, capability, lock table, errors
//! ├── ports/           # PropertyRegistryApi, OwnershipLedger, AdminPolicy
//! ├── adapters/        # In-memory ledger, admin policies
//! └── service/         # Facade and transfer auditor
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryOwnershipLedger, MultiKeyAdmin, PerAssetAdmin, SingleKeyAdmin};
pub use domain::{
    invariant_asset_id_length, invariant_record_complete, AdminGrant, AgreementHash,
    AssetLifecycle, AssetView, DebtRecord, GeoData, GeoPoint, ImmutableRecord, MintRequest,
    RecordField, RecordFields, RegistryConfig, RegistryError, RetirementPolicy,
};
pub use ports::{
    AdminPolicy, OwnershipLedger, PropertyRegistryApi, RegistryReader, TransferObserver,
};
pub use service::{PropertyRegistryService, RegistryDependencies, RegistryState, TransferAuditor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
