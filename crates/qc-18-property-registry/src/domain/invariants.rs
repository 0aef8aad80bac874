//! # Domain Invariants
//!
//! Business rules checked before a record is written.

use super::entities::RecordFields;
use super::errors::RegistryError;
use super::value_objects::RegistryConfig;
use shared_types::AssetId;

/// Invariant: asset id fits the configured bound.
pub fn invariant_asset_id_length(id: &AssetId, config: &RegistryConfig) -> Result<(), RegistryError> {
    if id.len() > config.max_asset_id_len {
        return Err(RegistryError::InvalidRecord(format!(
            "asset id is {} bytes, max {}",
            id.len(),
            config.max_asset_id_len
        )));
    }
    Ok(())
}

/// Invariant: a text field is present and bounded.
pub fn invariant_text_field(name: &str, value: &str, max_len: usize) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::InvalidRecord(format!("{name} must not be empty")));
    }
    if value.len() > max_len {
        return Err(RegistryError::InvalidRecord(format!(
            "{name} is {} bytes, max {max_len}",
            value.len()
        )));
    }
    Ok(())
}

/// Invariant: every identity field is well-formed before the record is
/// written. Immutable fields cannot be corrected later.
pub fn invariant_record_complete(
    fields: &RecordFields,
    config: &RegistryConfig,
) -> Result<(), RegistryError> {
    let max = config.max_text_len;
    invariant_text_field("legal_description", &fields.legal_description, max)?;
    invariant_text_field("street_address", &fields.street_address, max)?;
    invariant_text_field("parcel_id", &fields.parcel_id, max)?;
    invariant_text_field("legal_owner", &fields.legal_owner, max)?;
    fields.geo_data.validate(config.max_boundary_points)?;
    if fields.agreement_hash.is_zero() {
        return Err(RegistryError::InvalidRecord(
            "agreement_hash must not be zero".to_string(),
        ));
    }
    Ok(())
}
