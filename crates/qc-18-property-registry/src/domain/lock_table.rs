//! # Per-Asset Ordering
//!
//! Serializes mutations of the same asset and lets reads of that asset see
//! either the state before or after a mutation, never a mix. Different
//! assets have independent slots and never wait on each other.
//!
//! Acquisition is bounded by the configured timeout; a caller that cannot
//! get its slot in time receives `OrderingConflict` and may retry.

use super::errors::RegistryError;
use parking_lot::Mutex;
use shared_types::AssetId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};
use tracing::warn;

type SlotMap = Mutex<HashMap<AssetId, Arc<RwLock<()>>>>;

/// A held ordering slot. Releasing the last reference to a slot removes it
/// from the table.
#[derive(Debug)]
pub struct AssetSlot<G> {
    guard: Option<G>,
    id: AssetId,
    slots: Arc<SlotMap>,
}

impl<G> Drop for AssetSlot<G> {
    fn drop(&mut self) {
        self.guard.take();
        evict_idle(&self.slots, &self.id);
    }
}

/// Exclusive slot held for the duration of a mutation.
pub type AssetWriteGuard = AssetSlot<OwnedRwLockWriteGuard<()>>;

/// Shared slot held for the duration of a snapshot read.
pub type AssetReadGuard = AssetSlot<OwnedRwLockReadGuard<()>>;

// Clones are only taken under the map mutex, so a count of one here means
// no guard holds the slot and no caller is waiting on it.
fn evict_idle(slots: &SlotMap, id: &AssetId) {
    let mut slots = slots.lock();
    if slots.get(id).is_some_and(|slot| Arc::strong_count(slot) == 1) {
        slots.remove(id);
    }
}

/// Table of per-asset ordering slots.
pub struct AssetLockTable {
    slots: Arc<SlotMap>,
    timeout: Duration,
}

impl AssetLockTable {
    /// Create a table whose acquisitions give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            timeout,
        }
    }

    fn slot(&self, id: &AssetId) -> Arc<RwLock<()>> {
        self.slots
            .lock()
            .entry(id.clone())
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone()
    }

    fn held<G>(&self, id: &AssetId, guard: G) -> AssetSlot<G> {
        AssetSlot {
            guard: Some(guard),
            id: id.clone(),
            slots: self.slots.clone(),
        }
    }

    fn conflict(&self, id: &AssetId) -> RegistryError {
        evict_idle(&self.slots, id);
        let waited_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        warn!(asset = %id, waited_ms, "[qc-18] Ordering slot not acquired in time");
        RegistryError::OrderingConflict {
            asset: id.clone(),
            waited_ms,
        }
    }

    /// Take the exclusive slot of `id`.
    pub async fn write(&self, id: &AssetId) -> Result<AssetWriteGuard, RegistryError> {
        let slot = self.slot(id);
        match tokio::time::timeout(self.timeout, slot.write_owned()).await {
            Ok(guard) => Ok(self.held(id, guard)),
            Err(_) => Err(self.conflict(id)),
        }
    }

    /// Take a shared slot of `id`.
    pub async fn read(&self, id: &AssetId) -> Result<AssetReadGuard, RegistryError> {
        let slot = self.slot(id);
        match tokio::time::timeout(self.timeout, slot.read_owned()).await {
            Ok(guard) => Ok(self.held(id, guard)),
            Err(_) => Err(self.conflict(id)),
        }
    }

    /// Number of assets with a slot currently held or awaited.
    pub fn tracked(&self) -> usize {
        self.slots.lock().len()
    }
}
