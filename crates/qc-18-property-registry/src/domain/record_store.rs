//! # Immutable Record Store
//!
//! Holds the write-once identity record of every active asset.
//!
//! - `create` writes all fields in one step or nothing.
//! - There is no update path; `ImmutableRecord` has no setters.
//! - `retire` is the only removal and is used by the burn flow. Retired
//!   records are kept for audit or erased per `RetirementPolicy`; a
//!   tombstone of every retired id is kept either way.

use super::capability::AdminGrant;
use super::entities::{ImmutableRecord, RecordFields};
use super::errors::RegistryError;
use super::value_objects::RetirementPolicy;
use parking_lot::RwLock;
use shared_types::AssetId;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Default)]
struct RecordTable {
    active: HashMap<AssetId, ImmutableRecord>,
    /// Retired records, oldest first.
    retired: HashMap<AssetId, Vec<ImmutableRecord>>,
    tombstones: HashSet<AssetId>,
}

/// Write-once store of property identity records.
pub struct ImmutableRecordStore {
    table: RwLock<RecordTable>,
    policy: RetirementPolicy,
}

impl ImmutableRecordStore {
    /// Create an empty store.
    pub fn new(policy: RetirementPolicy) -> Self {
        Self {
            table: RwLock::new(RecordTable::default()),
            policy,
        }
    }

    /// Write a new record.
    ///
    /// Fails with `AlreadyExists` if `id` has an active record.
    pub fn create(
        &self,
        grant: &AdminGrant,
        id: AssetId,
        fields: RecordFields,
    ) -> Result<(), RegistryError> {
        grant.covers(&id)?;
        let mut table = self.table.write();
        if table.active.contains_key(&id) {
            return Err(RegistryError::AlreadyExists(id));
        }
        debug!(asset = %id, "[qc-18] Record created");
        let record = ImmutableRecord::from_fields(id.clone(), fields);
        table.active.insert(id, record);
        Ok(())
    }

    /// Read the active record.
    pub fn get(&self, id: &AssetId) -> Result<ImmutableRecord, RegistryError> {
        self.table
            .read()
            .active
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    /// Read one field of the active record without cloning the rest.
    pub fn with_record<T>(
        &self,
        id: &AssetId,
        f: impl FnOnce(&ImmutableRecord) -> T,
    ) -> Result<T, RegistryError> {
        self.table
            .read()
            .active
            .get(id)
            .map(f)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    /// Whether `id` has an active record.
    pub fn contains(&self, id: &AssetId) -> bool {
        self.table.read().active.contains_key(id)
    }

    /// Whether `id` was ever retired.
    pub fn was_retired(&self, id: &AssetId) -> bool {
        self.table.read().tombstones.contains(id)
    }

    /// Retire the active record of `id`.
    ///
    /// Returns the retired record.
    pub fn retire(&self, grant: &AdminGrant, id: &AssetId) -> Result<ImmutableRecord, RegistryError> {
        grant.covers(id)?;
        let mut table = self.table.write();
        let record = table
            .active
            .remove(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        table.tombstones.insert(id.clone());
        if self.policy == RetirementPolicy::Retain {
            table
                .retired
                .entry(id.clone())
                .or_default()
                .push(record.clone());
        }
        debug!(asset = %id, policy = ?self.policy, "[qc-18] Record retired");
        Ok(record)
    }

    /// Retired records of `id`, oldest first. Empty under `Erase`.
    pub fn retired(&self, id: &AssetId) -> Vec<ImmutableRecord> {
        self.table
            .read()
            .retired
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of active records.
    pub fn active_count(&self) -> usize {
        self.table.read().active.len()
    }
}
