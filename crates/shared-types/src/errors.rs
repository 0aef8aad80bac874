//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors raised while constructing shared identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Asset identifier was empty or whitespace.
    #[error("Asset id must not be empty")]
    EmptyAssetId,

    /// Asset identifier exceeds the hard byte limit.
    #[error("Asset id too long: {len} bytes, max {max}")]
    AssetIdTooLong { len: usize, max: usize },

    /// Asset identifier contains a control character.
    #[error("Asset id contains invalid character {0:?}")]
    InvalidAssetIdChar(char),

    /// Fiat code is not three uppercase ASCII letters.
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    /// Token address is not 20 bytes of hex.
    #[error("Invalid token address: {0}")]
    InvalidTokenAddress(String),
}
