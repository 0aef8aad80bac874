//! # Administrator Capability
//!
//! Every mutating store operation takes an `AdminGrant`. A grant can only be
//! obtained from an `AdminPolicy` that approved the caller for the asset, so
//! code that holds no policy (such as the transfer observer) has no way to
//! reach a mutating path.

use super::errors::RegistryError;
use crate::ports::outbound::AdminPolicy;
use shared_types::{Address, AssetId};

/// Proof that an administrator was approved for one asset.
///
/// Not `Clone`: a grant is consumed by reference within the operation that
/// requested it and dropped with it.
#[derive(Debug)]
pub struct AdminGrant {
    caller: Address,
    asset: AssetId,
}

impl AdminGrant {
    /// Ask `policy` whether `caller` administers `asset`.
    pub fn issue<A>(policy: &A, caller: Address, asset: &AssetId) -> Result<Self, RegistryError>
    where
        A: AdminPolicy + ?Sized,
    {
        if policy.has_admin_capability(&caller, asset) {
            Ok(Self {
                caller,
                asset: asset.clone(),
            })
        } else {
            Err(RegistryError::Unauthorized {
                caller,
                asset: asset.clone(),
            })
        }
    }

    /// The approved administrator.
    pub fn caller(&self) -> &Address {
        &self.caller
    }

    /// The asset this grant covers.
    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    /// Reject use of this grant on any other asset.
    pub fn covers(&self, asset: &AssetId) -> Result<(), RegistryError> {
        if &self.asset == asset {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized {
                caller: self.caller,
                asset: asset.clone(),
            })
        }
    }
}
