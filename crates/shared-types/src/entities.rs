//! # Core Domain Entities
//!
//! Identity primitives shared by every crate that touches the property
//! registry: the registry subsystem itself, the event bus, and integrators
//! that consume registry events.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Hash`
//! - **Assets**: `AssetId`, `CurrencyRef`

use crate::errors::IdentifierError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 32-byte digest (Keccak-256 for agreement hashes).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
///
/// Owners, managers, administrators and ERC-20 debt tokens are all
/// identified by an address.
pub type Address = [u8; 20];

/// The all-zero address, used as "no one" in transfer notifications.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Hard upper bound on the byte length of an asset identifier.
pub const MAX_ASSET_ID_BYTES: usize = 256;

/// Render an address as `0x`-prefixed lowercase hex.
#[must_use]
pub fn address_to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse a `0x`-prefixed (or bare) 40-character hex string into an address.
pub fn address_from_hex(s: &str) -> Result<Address, IdentifierError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes =
        hex::decode(stripped).map_err(|_| IdentifierError::InvalidTokenAddress(s.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| IdentifierError::InvalidTokenAddress(s.to_string()))
}

// =============================================================================
// CLUSTER B: ASSETS
// =============================================================================

/// Unique identifier of a real-estate asset.
///
/// Equal to the token identifier in the ownership ledger. Identifiers are
/// non-empty, free of control characters and at most
/// [`MAX_ASSET_ID_BYTES`] long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId(String);

impl AssetId {
    /// Create a validated asset identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentifierError::EmptyAssetId);
        }
        if id.len() > MAX_ASSET_ID_BYTES {
            return Err(IdentifierError::AssetIdTooLong {
                len: id.len(),
                max: MAX_ASSET_ID_BYTES,
            });
        }
        if let Some(c) = id.chars().find(|c| c.is_control()) {
            return Err(IdentifierError::InvalidAssetIdChar(c));
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the identifier in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an empty id cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AssetId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AssetId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AssetId {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.0
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Currency in which an asset's debt is denominated.
///
/// Either an ISO-4217 style fiat code or the address of an ERC-20 token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyRef {
    /// Three-letter uppercase fiat code, e.g. `USD`.
    Fiat(String),
    /// Token contract address.
    Token(Address),
}

impl CurrencyRef {
    /// Create a fiat currency reference from a three-letter code.
    pub fn fiat(code: &str) -> Result<Self, IdentifierError> {
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self::Fiat(code.to_string()))
        } else {
            Err(IdentifierError::InvalidCurrencyCode(code.to_string()))
        }
    }

    /// Create a token currency reference.
    #[must_use]
    pub const fn token(address: Address) -> Self {
        Self::Token(address)
    }

    /// Whether this currency is an on-chain token.
    #[must_use]
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

impl fmt::Display for CurrencyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fiat(code) => f.write_str(code),
            Self::Token(address) => f.write_str(&address_to_hex(address)),
        }
    }
}

impl FromStr for CurrencyRef {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") {
            address_from_hex(s).map(Self::Token)
        } else {
            Self::fiat(s)
        }
    }
}
