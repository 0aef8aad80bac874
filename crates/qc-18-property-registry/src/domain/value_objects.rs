//! # Value Objects
//!
//! Geospatial descriptors, agreement digests, lifecycle states and the
//! registry configuration.

use super::errors::RegistryError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha3::{Digest, Keccak256};
use shared_types::{CurrencyRef, Hash};
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// Micro-degrees per degree.
pub const MICRO_DEGREES: i32 = 1_000_000;

/// A coordinate in signed micro-degrees.
///
/// Integer storage keeps records byte-comparable across reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude, -90_000_000 ..= 90_000_000.
    pub lat_micro: i32,
    /// Longitude, -180_000_000 ..= 180_000_000.
    pub lon_micro: i32,
}

impl GeoPoint {
    /// Build a point from micro-degree components.
    #[must_use]
    pub const fn new(lat_micro: i32, lon_micro: i32) -> Self {
        Self {
            lat_micro,
            lon_micro,
        }
    }

    /// Build a point from floating-point degrees, rounding to micro-degrees.
    pub fn from_degrees(lat: f64, lon: f64) -> Result<Self, RegistryError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(RegistryError::InvalidRecord(
                "coordinates must be finite".to_string(),
            ));
        }
        let point = Self {
            lat_micro: (lat * f64::from(MICRO_DEGREES)).round() as i32,
            lon_micro: (lon * f64::from(MICRO_DEGREES)).round() as i32,
        };
        point.validate()?;
        Ok(point)
    }

    /// Check the point lies on the globe.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if !(-90 * MICRO_DEGREES..=90 * MICRO_DEGREES).contains(&self.lat_micro) {
            return Err(RegistryError::InvalidRecord(format!(
                "latitude {} out of range",
                self.lat_micro
            )));
        }
        if !(-180 * MICRO_DEGREES..=180 * MICRO_DEGREES).contains(&self.lon_micro) {
            return Err(RegistryError::InvalidRecord(format!(
                "longitude {} out of range",
                self.lon_micro
            )));
        }
        Ok(())
    }

    /// Latitude in degrees.
    #[must_use]
    pub fn lat(&self) -> f64 {
        f64::from(self.lat_micro) / f64::from(MICRO_DEGREES)
    }

    /// Longitude in degrees.
    #[must_use]
    pub fn lon(&self) -> f64 {
        f64::from(self.lon_micro) / f64::from(MICRO_DEGREES)
    }
}

/// Structured geospatial descriptor of a parcel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoData {
    /// Representative point of the parcel.
    pub centroid: GeoPoint,
    /// Optional boundary polygon, implicitly closed.
    pub boundary: Vec<GeoPoint>,
}

impl GeoData {
    /// A descriptor with a centroid only.
    #[must_use]
    pub fn point(centroid: GeoPoint) -> Self {
        Self {
            centroid,
            boundary: Vec::new(),
        }
    }

    /// A descriptor with a boundary polygon.
    #[must_use]
    pub fn with_boundary(centroid: GeoPoint, boundary: Vec<GeoPoint>) -> Self {
        Self { centroid, boundary }
    }

    /// Validate coordinates and polygon shape.
    pub fn validate(&self, max_boundary_points: usize) -> Result<(), RegistryError> {
        self.centroid.validate()?;
        if self.boundary.is_empty() {
            return Ok(());
        }
        if self.boundary.len() < 3 {
            return Err(RegistryError::InvalidRecord(format!(
                "boundary needs at least 3 points, got {}",
                self.boundary.len()
            )));
        }
        if self.boundary.len() > max_boundary_points {
            return Err(RegistryError::InvalidRecord(format!(
                "boundary has {} points, max {}",
                self.boundary.len(),
                max_boundary_points
            )));
        }
        self.boundary.iter().try_for_each(GeoPoint::validate)
    }

    /// Render as a GeoJSON geometry (Point, or Polygon with a closed ring).
    #[must_use]
    pub fn to_geojson(&self) -> serde_json::Value {
        if self.boundary.is_empty() {
            return json!({
                "type": "Point",
                "coordinates": [self.centroid.lon(), self.centroid.lat()],
            });
        }
        let mut ring: Vec<[f64; 2]> = self.boundary.iter().map(|p| [p.lon(), p.lat()]).collect();
        if self.boundary.first() != self.boundary.last() {
            ring.push(ring[0]);
        }
        json!({ "type": "Polygon", "coordinates": [ring] })
    }
}

/// Keccak-256 digest binding a record to its off-chain operating agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgreementHash(pub Hash);

impl AgreementHash {
    /// Hash the raw bytes of an agreement document.
    #[must_use]
    pub fn of_document(document: &[u8]) -> Self {
        let digest = Keccak256::digest(document);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Self(out)
    }

    /// The raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    /// An all-zero digest carries no binding and is rejected at mint.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for AgreementHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// What happens to an immutable record when its asset is burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetirementPolicy {
    /// Keep retired records for audit.
    #[default]
    Retain,
    /// Discard retired records; only a tombstone remains.
    Erase,
}

/// Lifecycle of an asset id.
///
/// `NonExistent --mint--> Active --burn--> Retired`; `Retired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetLifecycle {
    /// Never minted.
    NonExistent,
    /// Minted and not burned.
    Active,
    /// Burned; the id cannot be minted again.
    Retired,
}

impl AssetLifecycle {
    /// Check if a state transition is valid.
    #[must_use]
    pub fn can_transition_to(&self, target: AssetLifecycle) -> bool {
        matches!(
            (self, target),
            (Self::NonExistent, Self::Active) | (Self::Active, Self::Retired)
        )
    }
}

/// Property registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Longest a mutation waits for its asset's ordering slot.
    pub lock_timeout: Duration,
    /// Fate of records at burn.
    pub retirement_policy: RetirementPolicy,
    /// Currency assigned to the zero balance written at mint.
    pub default_currency: CurrencyRef,
    /// Maximum byte length of any immutable text field.
    pub max_text_len: usize,
    /// Maximum byte length of an asset id accepted at mint.
    pub max_asset_id_len: usize,
    /// Maximum number of boundary points in a geo descriptor.
    pub max_boundary_points: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_millis(500),
            retirement_policy: RetirementPolicy::Retain,
            default_currency: CurrencyRef::Fiat("USD".to_string()),
            max_text_len: 4096,
            max_asset_id_len: 128,
            max_boundary_points: 1024,
        }
    }
}

impl RegistryConfig {
    /// Set the lock timeout.
    #[must_use]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Set the retirement policy.
    #[must_use]
    pub fn with_retirement_policy(mut self, policy: RetirementPolicy) -> Self {
        self.retirement_policy = policy;
        self
    }

    /// Set the default debt currency.
    #[must_use]
    pub fn with_default_currency(mut self, currency: CurrencyRef) -> Self {
        self.default_currency = currency;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.lock_timeout.is_zero() {
            return Err(RegistryError::InvalidConfig(
                "lock_timeout must be non-zero".to_string(),
            ));
        }
        if self.max_text_len == 0 {
            return Err(RegistryError::InvalidConfig(
                "max_text_len must be non-zero".to_string(),
            ));
        }
        if self.max_asset_id_len == 0 || self.max_asset_id_len > shared_types::MAX_ASSET_ID_BYTES
        {
            return Err(RegistryError::InvalidConfig(format!(
                "max_asset_id_len must be in 1..={}",
                shared_types::MAX_ASSET_ID_BYTES
            )));
        }
        if self.max_boundary_points < 3 {
            return Err(RegistryError::InvalidConfig(
                "max_boundary_points must allow a triangle".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from `QC_REGISTRY_*` environment variables over the defaults.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Backs `from_env`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("QC_REGISTRY_LOCK_TIMEOUT_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.lock_timeout = Duration::from_millis(ms),
                Err(_) => warn!(value = %val, "[qc-18] Ignoring invalid QC_REGISTRY_LOCK_TIMEOUT_MS"),
            }
        }

        if let Some(val) = lookup("QC_REGISTRY_RETIREMENT") {
            match val.to_lowercase().as_str() {
                "retain" => config.retirement_policy = RetirementPolicy::Retain,
                "erase" => config.retirement_policy = RetirementPolicy::Erase,
                _ => warn!(value = %val, "[qc-18] Ignoring invalid QC_REGISTRY_RETIREMENT"),
            }
        }

        if let Some(val) = lookup("QC_REGISTRY_DEFAULT_CURRENCY") {
            match val.parse::<CurrencyRef>() {
                Ok(currency) => config.default_currency = currency,
                Err(e) => warn!(value = %val, error = %e, "[qc-18] Ignoring invalid QC_REGISTRY_DEFAULT_CURRENCY"),
            }
        }

        if let Some(val) = lookup("QC_REGISTRY_MAX_TEXT_LEN") {
            match val.parse::<usize>() {
                Ok(len) => config.max_text_len = len,
                Err(_) => warn!(value = %val, "[qc-18] Ignoring invalid QC_REGISTRY_MAX_TEXT_LEN"),
            }
        }

        config
    }
}
