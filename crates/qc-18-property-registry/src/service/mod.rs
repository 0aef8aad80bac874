//! # Property Registry Service
//!
//! The facade implementing `PropertyRegistryApi`.
//!
//! ## Architecture
//!
//! This service:
//! 1. Composes the record store, debt ledger and manager registry
//! 2. Orders every mutation of an asset through its lock-table slot
//! 3. Issues `AdminGrant`s through the injected `AdminPolicy`
//! 4. Publishes registry events on the shared bus
//!
//! Ownership transfers never pass through here. The ledger announces them
//! to a `TransferAuditor`, which holds only a read-only view.

mod auditor;

pub use auditor::TransferAuditor;

use crate::domain::{
    invariant_asset_id_length, invariant_record_complete, AdminGrant, AgreementHash,
    AssetLifecycle, AssetLockTable, AssetView, DebtAndForeclosureLedger, DebtRecord, GeoData,
    ImmutableRecord, ImmutableRecordStore, ManagerRegistry, MintRequest, RecordField,
    RecordFields, RegistryConfig, RegistryError,
};
use crate::ports::inbound::PropertyRegistryApi;
use crate::ports::outbound::{AdminPolicy, OwnershipLedger, RegistryReader};
use async_trait::async_trait;
use shared_bus::events::{BlockchainEvent, PROPERTY_REGISTRY_SUBSYSTEM};
use shared_bus::publisher::EventPublisher;
use shared_types::{address_to_hex, Address, AssetId, CurrencyRef};
use std::sync::Arc;
use tracing::{debug, error, info};

/// The three stores plus the ordering table.
///
/// Shared between the service (which mutates) and the transfer auditor
/// (which only sees it as a `RegistryReader`).
pub struct RegistryState {
    pub(crate) records: ImmutableRecordStore,
    pub(crate) debts: DebtAndForeclosureLedger,
    pub(crate) managers: ManagerRegistry,
    pub(crate) locks: AssetLockTable,
}

impl RegistryState {
    fn new(config: &RegistryConfig) -> Self {
        Self {
            records: ImmutableRecordStore::new(config.retirement_policy),
            debts: DebtAndForeclosureLedger::new(),
            managers: ManagerRegistry::new(),
            locks: AssetLockTable::new(config.lock_timeout),
        }
    }

    fn ensure_active(&self, id: &AssetId) -> Result<(), RegistryError> {
        if self.records.contains(id) {
            Ok(())
        } else {
            Err(RegistryError::NotFound(id.clone()))
        }
    }

    /// Write all per-asset state for a new asset. Caller holds the slot.
    fn open(
        &self,
        grant: &AdminGrant,
        id: &AssetId,
        fields: RecordFields,
        manager: Address,
        currency: CurrencyRef,
    ) -> Result<(), RegistryError> {
        // Every store must be empty for the id before any is written, so the
        // writes below cannot fail halfway.
        if self.records.contains(id) || self.debts.get(id).is_ok() || self.managers.get(id).is_ok()
        {
            return Err(RegistryError::AlreadyExists(id.clone()));
        }
        self.records.create(grant, id.clone(), fields)?;
        self.debts.open(grant, id, currency)?;
        self.managers.open(grant, id, manager)
    }

    /// Retire all per-asset state. Caller holds the slot.
    fn retire(
        &self,
        grant: &AdminGrant,
        id: &AssetId,
    ) -> Result<(ImmutableRecord, DebtRecord), RegistryError> {
        let debt = self.debts.close(grant, id)?;
        self.managers.close(grant, id)?;
        let record = self.records.retire(grant, id)?;
        Ok((record, debt))
    }
}

impl RegistryReader for RegistryState {
    fn record(&self, id: &AssetId) -> Result<ImmutableRecord, RegistryError> {
        self.records.get(id)
    }

    fn debt(&self, id: &AssetId) -> Result<DebtRecord, RegistryError> {
        self.ensure_active(id)?;
        self.debts.get(id)
    }

    fn manager(&self, id: &AssetId) -> Result<Address, RegistryError> {
        self.ensure_active(id)?;
        self.managers.get(id)
    }

    fn lifecycle(&self, id: &AssetId) -> AssetLifecycle {
        if self.records.contains(id) {
            AssetLifecycle::Active
        } else if self.records.was_retired(id) {
            AssetLifecycle::Retired
        } else {
            AssetLifecycle::NonExistent
        }
    }
}

/// Dependencies for `PropertyRegistryService`.
pub struct RegistryDependencies<L, A, P> {
    /// Token ownership ledger.
    pub ledger: Arc<L>,
    /// Administrator capability check.
    pub admin: Arc<A>,
    /// Event bus publisher.
    pub publisher: Arc<P>,
}

/// The Property Registry Service.
pub struct PropertyRegistryService<L, A, P>
where
    L: OwnershipLedger,
    A: AdminPolicy,
    P: EventPublisher,
{
    pub(crate) state: Arc<RegistryState>,
    ledger: Arc<L>,
    admin: Arc<A>,
    publisher: Arc<P>,
    config: RegistryConfig,
}

impl<L, A, P> PropertyRegistryService<L, A, P>
where
    L: OwnershipLedger,
    A: AdminPolicy,
    P: EventPublisher,
{
    /// Create a registry service. Fails if `config` is invalid.
    pub fn new(
        deps: RegistryDependencies<L, A, P>,
        config: RegistryConfig,
    ) -> Result<Self, RegistryError> {
        config.validate()?;
        info!(
            lock_timeout_ms = config.lock_timeout.as_millis() as u64,
            retirement = ?config.retirement_policy,
            "[qc-18] Property registry started"
        );
        Ok(Self {
            state: Arc::new(RegistryState::new(&config)),
            ledger: deps.ledger,
            admin: deps.admin,
            publisher: deps.publisher,
            config,
        })
    }

    /// Observer to register with the ownership ledger.
    pub fn transfer_auditor(&self) -> TransferAuditor<P> {
        TransferAuditor::new(self.reader(), self.publisher.clone())
    }

    /// Read-only view of registry state.
    pub fn reader(&self) -> Arc<dyn RegistryReader> {
        self.state.clone()
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of active assets.
    pub fn active_assets(&self) -> usize {
        self.state.records.active_count()
    }

    async fn critical(&self, error: String) {
        self.publisher
            .publish(BlockchainEvent::CriticalError {
                subsystem_id: PROPERTY_REGISTRY_SUBSYSTEM,
                error,
            })
            .await;
    }
}

#[async_trait]
impl<L, A, P> PropertyRegistryApi for PropertyRegistryService<L, A, P>
where
    L: OwnershipLedger + 'static,
    A: AdminPolicy + 'static,
    P: EventPublisher + 'static,
{
    async fn mint(&self, caller: Address, request: MintRequest) -> Result<(), RegistryError> {
        let MintRequest {
            asset_id,
            owner,
            manager,
            fields,
        } = request;
        invariant_asset_id_length(&asset_id, &self.config)?;
        invariant_record_complete(&fields, &self.config)?;

        let _slot = self.state.locks.write(&asset_id).await?;
        let grant = AdminGrant::issue(self.admin.as_ref(), caller, &asset_id)?;

        let lifecycle = self.state.lifecycle(&asset_id);
        if !lifecycle.can_transition_to(AssetLifecycle::Active) {
            return Err(match lifecycle {
                AssetLifecycle::Retired => RegistryError::ImmutableViolation {
                    asset: asset_id,
                    field: RecordField::Record,
                },
                _ => RegistryError::AlreadyExists(asset_id),
            });
        }
        match self.ledger.owner_of(&asset_id).await {
            Ok(_) => return Err(RegistryError::AlreadyExists(asset_id)),
            Err(RegistryError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        self.ledger.mint(&asset_id, owner).await?;
        let agreement_hash = fields.agreement_hash;
        if let Err(e) = self.state.open(
            &grant,
            &asset_id,
            fields,
            manager,
            self.config.default_currency.clone(),
        ) {
            // Take the token back so the failed mint leaves nothing behind.
            if let Err(undo) = self.ledger.burn(&asset_id).await {
                error!(asset = %asset_id, error = %undo, "[qc-18] Mint rollback failed");
                self.critical(format!("mint rollback of {asset_id} failed: {undo}"))
                    .await;
            }
            return Err(e);
        }

        info!(
            asset = %asset_id,
            owner = %address_to_hex(&owner),
            agreement = %agreement_hash,
            "[qc-18] Asset minted"
        );
        self.publisher
            .publish(BlockchainEvent::AssetMinted {
                asset_id,
                owner,
                manager,
                agreement_hash: agreement_hash.0,
            })
            .await;
        Ok(())
    }

    async fn burn(&self, caller: Address, id: &AssetId) -> Result<ImmutableRecord, RegistryError> {
        let _slot = self.state.locks.write(id).await?;
        self.state.ensure_active(id)?;
        let grant = AdminGrant::issue(self.admin.as_ref(), caller, id)?;

        let last_owner = self.ledger.owner_of(id).await?;
        self.ledger.burn(id).await?;

        let (record, debt) = match self.state.retire(&grant, id) {
            Ok(retired) => retired,
            Err(e) => {
                if let Err(undo) = self.ledger.mint(id, last_owner).await {
                    error!(asset = %id, error = %undo, "[qc-18] Burn rollback failed");
                    self.critical(format!("burn rollback of {id} failed: {undo}"))
                        .await;
                }
                return Err(e);
            }
        };

        info!(asset = %id, foreclosed = debt.foreclosed, "[qc-18] Asset burned");
        self.publisher
            .publish(BlockchainEvent::AssetBurned {
                asset_id: id.clone(),
                last_owner,
                foreclosed: debt.foreclosed,
            })
            .await;
        Ok(record)
    }

    async fn set_debt(
        &self,
        caller: Address,
        id: &AssetId,
        currency: CurrencyRef,
        amount: i128,
    ) -> Result<DebtRecord, RegistryError> {
        let _slot = self.state.locks.write(id).await?;
        self.state.ensure_active(id)?;
        let grant = AdminGrant::issue(self.admin.as_ref(), caller, id)?;

        let record = self.state.debts.set_debt(&grant, id, currency.clone(), amount)?;

        debug!(asset = %id, currency = %currency, amount, "[qc-18] Debt updated");
        self.publisher
            .publish(BlockchainEvent::DebtUpdated {
                asset_id: id.clone(),
                currency,
                amount,
            })
            .await;
        Ok(record)
    }

    async fn foreclose(&self, caller: Address, id: &AssetId) -> Result<bool, RegistryError> {
        let _slot = self.state.locks.write(id).await?;
        self.state.ensure_active(id)?;
        let grant = AdminGrant::issue(self.admin.as_ref(), caller, id)?;

        let outcome = self.state.debts.foreclose(&grant, id)?;
        if !outcome.is_transition() {
            debug!(asset = %id, "[qc-18] Foreclose on already-foreclosed asset");
            return Ok(false);
        }

        info!(asset = %id, "[qc-18] Asset foreclosed");
        self.publisher
            .publish(BlockchainEvent::AssetForeclosed {
                asset_id: id.clone(),
            })
            .await;
        Ok(true)
    }

    async fn set_manager(
        &self,
        caller: Address,
        id: &AssetId,
        manager: Address,
    ) -> Result<Address, RegistryError> {
        let _slot = self.state.locks.write(id).await?;
        self.state.ensure_active(id)?;
        let grant = AdminGrant::issue(self.admin.as_ref(), caller, id)?;

        let previous = self.state.managers.set_manager(&grant, id, manager)?;

        debug!(
            asset = %id,
            manager = %address_to_hex(&manager),
            "[qc-18] Manager changed"
        );
        self.publisher
            .publish(BlockchainEvent::ManagerChanged {
                asset_id: id.clone(),
                previous,
                manager,
            })
            .await;
        Ok(previous)
    }

    async fn set_frozen(
        &self,
        caller: Address,
        id: &AssetId,
        frozen: bool,
    ) -> Result<bool, RegistryError> {
        let _slot = self.state.locks.write(id).await?;
        self.state.ensure_active(id)?;
        let grant = AdminGrant::issue(self.admin.as_ref(), caller, id)?;

        let changed = self.state.debts.set_frozen(&grant, id, frozen)?;
        if changed {
            info!(asset = %id, frozen, "[qc-18] Freeze changed");
            self.publisher
                .publish(BlockchainEvent::AssetFreezeChanged {
                    asset_id: id.clone(),
                    frozen,
                })
                .await;
        }
        Ok(changed)
    }

    async fn view(&self, id: &AssetId) -> Result<AssetView, RegistryError> {
        let _slot = self.state.locks.read(id).await?;
        // The record lookup resolves existence for the whole view.
        let record = self.state.records.get(id)?;
        let debt = self.state.debts.get(id)?;
        let manager = self.state.managers.get(id)?;
        let owner = self.ledger.owner_of(id).await?;
        Ok(AssetView {
            record,
            debt,
            manager,
            owner,
            lifecycle: AssetLifecycle::Active,
        })
    }

    async fn owner_of(&self, id: &AssetId) -> Result<Address, RegistryError> {
        self.state.ensure_active(id)?;
        self.ledger.owner_of(id).await
    }

    fn legal_description_of(&self, id: &AssetId) -> Result<String, RegistryError> {
        self.state
            .records
            .with_record(id, |r| r.legal_description().to_string())
    }

    fn address_of(&self, id: &AssetId) -> Result<String, RegistryError> {
        self.state
            .records
            .with_record(id, |r| r.street_address().to_string())
    }

    fn geo_data_of(&self, id: &AssetId) -> Result<GeoData, RegistryError> {
        self.state.records.with_record(id, |r| r.geo_data().clone())
    }

    fn parcel_id_of(&self, id: &AssetId) -> Result<String, RegistryError> {
        self.state
            .records
            .with_record(id, |r| r.parcel_id().to_string())
    }

    fn legal_owner_of(&self, id: &AssetId) -> Result<String, RegistryError> {
        self.state
            .records
            .with_record(id, |r| r.legal_owner().to_string())
    }

    fn operating_agreement_hash_of(&self, id: &AssetId) -> Result<AgreementHash, RegistryError> {
        self.state.records.with_record(id, ImmutableRecord::agreement_hash)
    }

    fn debt_of(&self, id: &AssetId) -> Result<(CurrencyRef, i128, bool), RegistryError> {
        let debt = self.state.debt(id)?;
        Ok((debt.currency, debt.amount, debt.foreclosed))
    }

    fn manager_of(&self, id: &AssetId) -> Result<Address, RegistryError> {
        self.state.manager(id)
    }

    fn is_foreclosed(&self, id: &AssetId) -> Result<bool, RegistryError> {
        Ok(self.state.debt(id)?.foreclosed)
    }

    fn lifecycle_of(&self, id: &AssetId) -> AssetLifecycle {
        self.state.lifecycle(id)
    }

    fn retired_records(&self, id: &AssetId) -> Vec<ImmutableRecord> {
        self.state.records.retired(id)
    }
}
