//! # Domain Errors
//!
//! Error taxonomy for the Property Registry. Every error is local and
//! non-retryable except `OrderingConflict`.

use shared_types::{Address, AssetId, IdentifierError};
use thiserror::Error;

/// Immutable record field names, used in `ImmutableViolation` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// The whole record (re-binding an id).
    Record,
    /// Legal description.
    LegalDescription,
    /// Street address.
    StreetAddress,
    /// Geospatial descriptor.
    GeoData,
    /// Parcel identifier.
    ParcelId,
    /// Legal owner name.
    LegalOwner,
    /// Operating-agreement hash.
    AgreementHash,
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Record => "record",
            Self::LegalDescription => "legal_description",
            Self::StreetAddress => "street_address",
            Self::GeoData => "geo_data",
            Self::ParcelId => "parcel_id",
            Self::LegalOwner => "legal_owner",
            Self::AgreementHash => "agreement_hash",
        };
        f.write_str(name)
    }
}

/// Property registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No active record exists for the asset.
    #[error("Asset not found: {0}")]
    NotFound(AssetId),

    /// Mint targeted an id that is already live.
    #[error("Asset already exists: {0}")]
    AlreadyExists(AssetId),

    /// Caller lacks administrator capability for the asset.
    #[error("Unauthorized: caller 0x{} holds no administrator capability for {asset}", hex::encode(.caller))]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
        /// The asset the caller tried to mutate.
        asset: AssetId,
    },

    /// Debt mutation attempted after foreclosure.
    #[error("Asset already foreclosed: {0}")]
    AlreadyForeclosed(AssetId),

    /// Attempt to alter or re-bind an immutable field.
    #[error("Immutable violation on {asset}: {field} cannot change after creation")]
    ImmutableViolation {
        /// The asset.
        asset: AssetId,
        /// The field that would have changed.
        field: RecordField,
    },

    /// Mint payload failed validation.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Identifier could not be parsed.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    /// Registry configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Per-asset ordering could not be established in time. Retry.
    #[error("Ordering conflict on {asset}: lock not acquired within {waited_ms}ms")]
    OrderingConflict {
        /// The contended asset.
        asset: AssetId,
        /// How long the caller waited.
        waited_ms: u64,
    },

    /// The external ownership ledger failed.
    #[error("Ownership ledger error: {0}")]
    Ledger(String),
}

impl RegistryError {
    /// Whether the caller may retry the operation unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::OrderingConflict { .. })
    }
}
