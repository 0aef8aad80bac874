//! # Outbound Ports
//!
//! Traits for the registry's external collaborators: the token ownership
//! ledger, the administrator authorization check, and observers of token
//! transfers.

use crate::domain::{AssetLifecycle, DebtRecord, ImmutableRecord, RegistryError};
use async_trait::async_trait;
use shared_types::{Address, AssetId};

/// Token ownership ledger - outbound port.
///
/// The registry reads owners and issues mint/burn at lifecycle boundaries.
/// It never transfers or approves tokens.
#[async_trait]
pub trait OwnershipLedger: Send + Sync {
    /// Current holder of the token, or `NotFound`.
    async fn owner_of(&self, id: &AssetId) -> Result<Address, RegistryError>;

    /// Issue the token to `to`. Fails if the token exists.
    async fn mint(&self, id: &AssetId, to: Address) -> Result<(), RegistryError>;

    /// Destroy the token. Fails with `NotFound` if absent.
    async fn burn(&self, id: &AssetId) -> Result<(), RegistryError>;
}

/// Administrator capability check - outbound port.
///
/// A pure predicate supplied by the surrounding system. Single keys,
/// multisig sets or policy engines plug in here.
pub trait AdminPolicy: Send + Sync {
    /// Whether `caller` may mutate `asset`.
    fn has_admin_capability(&self, caller: &Address, asset: &AssetId) -> bool;
}

/// Read-only view of registry state.
///
/// This is everything a transfer observer can reach.
pub trait RegistryReader: Send + Sync {
    /// Immutable record of an active asset.
    fn record(&self, id: &AssetId) -> Result<ImmutableRecord, RegistryError>;

    /// Debt and foreclosure state of an active asset.
    fn debt(&self, id: &AssetId) -> Result<DebtRecord, RegistryError>;

    /// Manager of an active asset.
    fn manager(&self, id: &AssetId) -> Result<Address, RegistryError>;

    /// Lifecycle state of any id.
    fn lifecycle(&self, id: &AssetId) -> AssetLifecycle;
}

/// Receiver of token transfer notifications from the ownership ledger.
#[async_trait]
pub trait TransferObserver: Send + Sync {
    /// Called after the ledger moved `id` from `from` to `to`.
    async fn on_transfer(&self, id: &AssetId, from: Address, to: Address);
}
