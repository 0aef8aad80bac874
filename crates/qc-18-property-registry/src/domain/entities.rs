//! # Domain Entities
//!
//! The immutable property record, the mutable debt record and the unified
//! asset view returned by the registry.

use super::value_objects::{AgreementHash, AssetLifecycle, GeoData};
use serde::{Deserialize, Serialize};
use shared_types::{Address, AssetId, CurrencyRef};

/// Identity fields supplied at mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    /// Legal description of the parcel.
    pub legal_description: String,
    /// Street address.
    pub street_address: String,
    /// Geospatial descriptor.
    pub geo_data: GeoData,
    /// Parcel identifier assigned by the land registry.
    pub parcel_id: String,
    /// Name of the legal owner of record (typically an LLC).
    pub legal_owner: String,
    /// Digest of the operating agreement.
    pub agreement_hash: AgreementHash,
}

/// Write-once identity record of a property.
///
/// Fields are private and only readable; there is no way to change a
/// record once it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImmutableRecord {
    asset_id: AssetId,
    legal_description: String,
    street_address: String,
    geo_data: GeoData,
    parcel_id: String,
    legal_owner: String,
    agreement_hash: AgreementHash,
}

impl ImmutableRecord {
    pub(crate) fn from_fields(asset_id: AssetId, fields: RecordFields) -> Self {
        Self {
            asset_id,
            legal_description: fields.legal_description,
            street_address: fields.street_address,
            geo_data: fields.geo_data,
            parcel_id: fields.parcel_id,
            legal_owner: fields.legal_owner,
            agreement_hash: fields.agreement_hash,
        }
    }

    /// Asset this record belongs to.
    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    /// Legal description.
    pub fn legal_description(&self) -> &str {
        &self.legal_description
    }

    /// Street address.
    pub fn street_address(&self) -> &str {
        &self.street_address
    }

    /// Geospatial descriptor.
    pub fn geo_data(&self) -> &GeoData {
        &self.geo_data
    }

    /// Parcel identifier.
    pub fn parcel_id(&self) -> &str {
        &self.parcel_id
    }

    /// Legal owner of record.
    pub fn legal_owner(&self) -> &str {
        &self.legal_owner
    }

    /// Operating-agreement digest.
    pub fn agreement_hash(&self) -> AgreementHash {
        self.agreement_hash
    }

    /// Copy the identity fields back out, e.g. to compare against a mint
    /// request.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            legal_description: self.legal_description.clone(),
            street_address: self.street_address.clone(),
            geo_data: self.geo_data.clone(),
            parcel_id: self.parcel_id.clone(),
            legal_owner: self.legal_owner.clone(),
            agreement_hash: self.agreement_hash,
        }
    }
}

/// Mutable financial state of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtRecord {
    /// Currency of the balance.
    pub currency: CurrencyRef,
    /// Positive = debt, negative = credit.
    pub amount: i128,
    /// One-way foreclosure flag.
    pub foreclosed: bool,
    /// Blocklist freeze flag, reversible.
    pub frozen: bool,
}

impl DebtRecord {
    /// Zero balance in the given currency.
    #[must_use]
    pub fn zero(currency: CurrencyRef) -> Self {
        Self {
            currency,
            amount: 0,
            foreclosed: false,
            frozen: false,
        }
    }

    /// Whether the asset carries outstanding debt.
    #[must_use]
    pub fn in_debt(&self) -> bool {
        self.amount > 0
    }

    /// Whether the asset holds a credit balance.
    #[must_use]
    pub fn in_credit(&self) -> bool {
        self.amount < 0
    }
}

/// Request to mint a new property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    /// New asset id (also the token id).
    pub asset_id: AssetId,
    /// Initial token holder.
    pub owner: Address,
    /// Initial manager.
    pub manager: Address,
    /// Immutable identity fields.
    pub fields: RecordFields,
}

/// Consistent snapshot of everything the registry knows about an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetView {
    /// Immutable identity record.
    pub record: ImmutableRecord,
    /// Debt, foreclosure and freeze state.
    pub debt: DebtRecord,
    /// Current manager.
    pub manager: Address,
    /// Current token holder, read from the ownership ledger.
    pub owner: Address,
    /// Always `Active` for a returned view.
    pub lifecycle: AssetLifecycle,
}
