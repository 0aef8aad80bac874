//! # Debt and Foreclosure Ledger
//!
//! Per-asset debt balance, foreclosure flag and blocklist freeze.
//!
//! Once foreclosed, the balance stays readable but is frozen: further
//! `set_debt` calls fail with `AlreadyForeclosed`. The foreclosure flag
//! never returns to false.

use super::capability::AdminGrant;
use super::entities::DebtRecord;
use super::errors::RegistryError;
use parking_lot::RwLock;
use shared_types::{AssetId, CurrencyRef};
use std::collections::HashMap;

/// Outcome of a `foreclose` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeclosureOutcome {
    /// The flag moved from false to true in this call.
    Foreclosed,
    /// The flag was already true; nothing changed.
    AlreadyForeclosed,
}

impl ForeclosureOutcome {
    /// Whether this call performed the transition.
    #[must_use]
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Foreclosed)
    }
}

/// Ledger of mutable financial state.
#[derive(Default)]
pub struct DebtAndForeclosureLedger {
    entries: RwLock<HashMap<AssetId, DebtRecord>>,
}

impl DebtAndForeclosureLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a zero balance for a freshly minted asset.
    pub fn open(
        &self,
        grant: &AdminGrant,
        id: &AssetId,
        currency: CurrencyRef,
    ) -> Result<(), RegistryError> {
        grant.covers(id)?;
        let mut entries = self.entries.write();
        if entries.contains_key(id) {
            return Err(RegistryError::AlreadyExists(id.clone()));
        }
        entries.insert(id.clone(), DebtRecord::zero(currency));
        Ok(())
    }

    /// Record a new balance.
    pub fn set_debt(
        &self,
        grant: &AdminGrant,
        id: &AssetId,
        currency: CurrencyRef,
        amount: i128,
    ) -> Result<DebtRecord, RegistryError> {
        grant.covers(id)?;
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        if entry.foreclosed {
            return Err(RegistryError::AlreadyForeclosed(id.clone()));
        }
        entry.currency = currency;
        entry.amount = amount;
        Ok(entry.clone())
    }

    /// Set the foreclosure flag. Idempotent.
    pub fn foreclose(
        &self,
        grant: &AdminGrant,
        id: &AssetId,
    ) -> Result<ForeclosureOutcome, RegistryError> {
        grant.covers(id)?;
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        if entry.foreclosed {
            return Ok(ForeclosureOutcome::AlreadyForeclosed);
        }
        entry.foreclosed = true;
        Ok(ForeclosureOutcome::Foreclosed)
    }

    /// Set or clear the blocklist freeze. Returns whether the flag changed.
    pub fn set_frozen(
        &self,
        grant: &AdminGrant,
        id: &AssetId,
        frozen: bool,
    ) -> Result<bool, RegistryError> {
        grant.covers(id)?;
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        let changed = entry.frozen != frozen;
        entry.frozen = frozen;
        Ok(changed)
    }

    /// Read the financial state.
    pub fn get(&self, id: &AssetId) -> Result<DebtRecord, RegistryError> {
        self.entries
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    /// Drop the entry of a burned asset.
    pub fn close(&self, grant: &AdminGrant, id: &AssetId) -> Result<DebtRecord, RegistryError> {
        grant.covers(id)?;
        self.entries
            .write()
            .remove(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }
}
