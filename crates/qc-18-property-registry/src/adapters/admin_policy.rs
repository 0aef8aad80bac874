//! Administrator Policy Adapters
//!
//! Implementations of the `AdminPolicy` port:
//! - `SingleKeyAdmin`: one administrator for every asset.
//! - `MultiKeyAdmin`: any member of a fixed set.
//! - `PerAssetAdmin`: per-asset grants with an optional global fallback.

use crate::ports::outbound::AdminPolicy;
use parking_lot::RwLock;
use shared_types::{Address, AssetId};
use std::collections::{HashMap, HashSet};

/// A single administrator key.
#[derive(Debug, Clone, Copy)]
pub struct SingleKeyAdmin {
    admin: Address,
}

impl SingleKeyAdmin {
    /// Approve only `admin`.
    pub fn new(admin: Address) -> Self {
        Self { admin }
    }
}

impl AdminPolicy for SingleKeyAdmin {
    fn has_admin_capability(&self, caller: &Address, _asset: &AssetId) -> bool {
        *caller == self.admin
    }
}

/// Any one of a fixed set of administrators.
#[derive(Debug, Clone, Default)]
pub struct MultiKeyAdmin {
    admins: HashSet<Address>,
}

impl MultiKeyAdmin {
    /// Approve every address in `admins`.
    pub fn new(admins: impl IntoIterator<Item = Address>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }

    /// Number of administrators.
    pub fn len(&self) -> usize {
        self.admins.len()
    }

    /// Whether the set is empty (approves nobody).
    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

impl AdminPolicy for MultiKeyAdmin {
    fn has_admin_capability(&self, caller: &Address, _asset: &AssetId) -> bool {
        self.admins.contains(caller)
    }
}

/// Per-asset administrators, e.g. a servicer per mortgage.
///
/// Grants can change at runtime; the registry only ever reads them.
#[derive(Debug, Default)]
pub struct PerAssetAdmin {
    grants: RwLock<HashMap<AssetId, HashSet<Address>>>,
    global: Option<Address>,
}

impl PerAssetAdmin {
    /// No grants and no fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Approve `global` for every asset in addition to per-asset grants.
    pub fn with_global(global: Address) -> Self {
        Self {
            grants: RwLock::new(HashMap::new()),
            global: Some(global),
        }
    }

    /// Grant `admin` capability over `asset`.
    pub fn grant(&self, asset: AssetId, admin: Address) {
        self.grants.write().entry(asset).or_default().insert(admin);
    }

    /// Revoke `admin` capability over `asset`.
    pub fn revoke(&self, asset: &AssetId, admin: &Address) {
        if let Some(set) = self.grants.write().get_mut(asset) {
            set.remove(admin);
        }
    }
}

impl AdminPolicy for PerAssetAdmin {
    fn has_admin_capability(&self, caller: &Address, asset: &AssetId) -> bool {
        if self.global.as_ref() == Some(caller) {
            return true;
        }
        self.grants
            .read()
            .get(asset)
            .is_some_and(|set| set.contains(caller))
    }
}
