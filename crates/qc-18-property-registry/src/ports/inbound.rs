//! # Inbound Ports
//!
//! API trait defining what the Property Registry can do.

use crate::domain::{
    AgreementHash, AssetLifecycle, AssetView, DebtRecord, GeoData, ImmutableRecord, MintRequest,
    RegistryError,
};
use async_trait::async_trait;
use shared_types::{Address, AssetId, CurrencyRef};

/// Property registry API - inbound port.
///
/// Mutations take the caller's address and require administrator
/// capability for the asset.
#[async_trait]
pub trait PropertyRegistryApi: Send + Sync {
    // === Lifecycle ===

    /// Write the immutable record, open mutable state, issue the token.
    async fn mint(&self, caller: Address, request: MintRequest) -> Result<(), RegistryError>;

    /// Burn the token and retire the record. Returns the retired record.
    async fn burn(&self, caller: Address, id: &AssetId) -> Result<ImmutableRecord, RegistryError>;

    // === Administrator actions ===

    /// Record a new debt balance.
    async fn set_debt(
        &self,
        caller: Address,
        id: &AssetId,
        currency: CurrencyRef,
        amount: i128,
    ) -> Result<DebtRecord, RegistryError>;

    /// Foreclose. Returns true only for the call that performed the
    /// transition.
    async fn foreclose(&self, caller: Address, id: &AssetId) -> Result<bool, RegistryError>;

    /// Reassign the manager. Returns the previous manager.
    async fn set_manager(
        &self,
        caller: Address,
        id: &AssetId,
        manager: Address,
    ) -> Result<Address, RegistryError>;

    /// Set or clear the blocklist freeze. Returns whether it changed.
    async fn set_frozen(
        &self,
        caller: Address,
        id: &AssetId,
        frozen: bool,
    ) -> Result<bool, RegistryError>;

    // === Reads ===

    /// Immutable + mutable + current owner in one snapshot.
    async fn view(&self, id: &AssetId) -> Result<AssetView, RegistryError>;

    /// Current token holder.
    async fn owner_of(&self, id: &AssetId) -> Result<Address, RegistryError>;

    /// Legal description.
    fn legal_description_of(&self, id: &AssetId) -> Result<String, RegistryError>;

    /// Street address.
    fn address_of(&self, id: &AssetId) -> Result<String, RegistryError>;

    /// Geospatial descriptor.
    fn geo_data_of(&self, id: &AssetId) -> Result<GeoData, RegistryError>;

    /// Parcel identifier.
    fn parcel_id_of(&self, id: &AssetId) -> Result<String, RegistryError>;

    /// Legal owner of record.
    fn legal_owner_of(&self, id: &AssetId) -> Result<String, RegistryError>;

    /// Operating-agreement digest.
    fn operating_agreement_hash_of(&self, id: &AssetId) -> Result<AgreementHash, RegistryError>;

    /// `(currency, amount, foreclosed)`.
    fn debt_of(&self, id: &AssetId) -> Result<(CurrencyRef, i128, bool), RegistryError>;

    /// Current manager.
    fn manager_of(&self, id: &AssetId) -> Result<Address, RegistryError>;

    /// Whether the asset is foreclosed.
    fn is_foreclosed(&self, id: &AssetId) -> Result<bool, RegistryError>;

    /// Lifecycle state; never fails.
    fn lifecycle_of(&self, id: &AssetId) -> AssetLifecycle;

    /// Retired records of `id`, oldest first.
    fn retired_records(&self, id: &AssetId) -> Vec<ImmutableRecord>;
}
