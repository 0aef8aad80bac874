//! Ownership Ledger Adapter
//!
//! In-memory token ledger implementing the `OwnershipLedger` port. Transfers
//! happen here, outside the registry, and are announced to registered
//! `TransferObserver`s after the new owner is recorded.

use crate::domain::RegistryError;
use crate::ports::outbound::{OwnershipLedger, TransferObserver};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{address_to_hex, Address, AssetId, ZERO_ADDRESS};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// In-memory ownership ledger.
pub struct InMemoryOwnershipLedger {
    owners: RwLock<HashMap<AssetId, Address>>,
    observers: RwLock<Vec<Arc<dyn TransferObserver>>>,
    transfers: AtomicU64,
    unavailable: AtomicBool,
}

impl InMemoryOwnershipLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            owners: RwLock::new(HashMap::new()),
            observers: RwLock::new(Vec::new()),
            transfers: AtomicU64::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Register an observer for future transfers.
    pub fn subscribe(&self, observer: Arc<dyn TransferObserver>) {
        self.observers.write().push(observer);
    }

    /// Simulate an outage: every call fails with `Ledger` until cleared.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of completed transfers.
    pub fn transfer_count(&self) -> u64 {
        self.transfers.load(Ordering::Relaxed)
    }

    /// Number of live tokens.
    pub fn supply(&self) -> usize {
        self.owners.read().len()
    }

    fn ensure_available(&self) -> Result<(), RegistryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RegistryError::Ledger("ledger unavailable".to_string()));
        }
        Ok(())
    }

    /// Move a token from `from` to `to` and notify observers.
    pub async fn transfer(
        &self,
        id: &AssetId,
        from: Address,
        to: Address,
    ) -> Result<(), RegistryError> {
        self.ensure_available()?;
        if to == ZERO_ADDRESS {
            return Err(RegistryError::Ledger(
                "transfer to the zero address".to_string(),
            ));
        }
        {
            let mut owners = self.owners.write();
            let owner = owners
                .get_mut(id)
                .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
            if *owner != from {
                return Err(RegistryError::Ledger(format!(
                    "{} does not hold {id}",
                    address_to_hex(&from)
                )));
            }
            *owner = to;
        }
        self.transfers.fetch_add(1, Ordering::Relaxed);
        info!(
            asset = %id,
            from = %address_to_hex(&from),
            to = %address_to_hex(&to),
            "[qc-18] Token transferred"
        );

        let observers: Vec<Arc<dyn TransferObserver>> = self.observers.read().clone();
        for observer in observers {
            observer.on_transfer(id, from, to).await;
        }
        Ok(())
    }
}

impl Default for InMemoryOwnershipLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OwnershipLedger for InMemoryOwnershipLedger {
    async fn owner_of(&self, id: &AssetId) -> Result<Address, RegistryError> {
        self.ensure_available()?;
        self.owners
            .read()
            .get(id)
            .copied()
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    async fn mint(&self, id: &AssetId, to: Address) -> Result<(), RegistryError> {
        self.ensure_available()?;
        if to == ZERO_ADDRESS {
            return Err(RegistryError::Ledger("mint to the zero address".to_string()));
        }
        let mut owners = self.owners.write();
        if owners.contains_key(id) {
            return Err(RegistryError::Ledger(format!("token {id} already minted")));
        }
        owners.insert(id.clone(), to);
        debug!(asset = %id, to = %address_to_hex(&to), "[qc-18] Token minted");
        Ok(())
    }

    async fn burn(&self, id: &AssetId) -> Result<(), RegistryError> {
        self.ensure_available()?;
        if self.owners.write().remove(id).is_none() {
            return Err(RegistryError::NotFound(id.clone()));
        }
        debug!(asset = %id, "[qc-18] Token burned");
        Ok(())
    }
}
