//! # Manager Registry
//!
//! Delegated-authority address per asset. Last write wins; no history.

use super::capability::AdminGrant;
use super::errors::RegistryError;
use parking_lot::RwLock;
use shared_types::{Address, AssetId};
use std::collections::HashMap;

/// Registry of asset managers.
#[derive(Default)]
pub struct ManagerRegistry {
    managers: RwLock<HashMap<AssetId, Address>>,
}

impl ManagerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the creator-specified manager of a freshly minted asset.
    pub fn open(
        &self,
        grant: &AdminGrant,
        id: &AssetId,
        manager: Address,
    ) -> Result<(), RegistryError> {
        grant.covers(id)?;
        let mut managers = self.managers.write();
        if managers.contains_key(id) {
            return Err(RegistryError::AlreadyExists(id.clone()));
        }
        managers.insert(id.clone(), manager);
        Ok(())
    }

    /// Reassign the manager. Returns the previous one.
    pub fn set_manager(
        &self,
        grant: &AdminGrant,
        id: &AssetId,
        manager: Address,
    ) -> Result<Address, RegistryError> {
        grant.covers(id)?;
        let mut managers = self.managers.write();
        let slot = managers
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        Ok(std::mem::replace(slot, manager))
    }

    /// Current manager.
    pub fn get(&self, id: &AssetId) -> Result<Address, RegistryError> {
        self.managers
            .read()
            .get(id)
            .copied()
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    /// Drop the entry of a burned asset.
    pub fn close(&self, grant: &AdminGrant, id: &AssetId) -> Result<Address, RegistryError> {
        grant.covers(id)?;
        self.managers
            .write()
            .remove(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }
}
