//! # Integration Tests
//!
//! The property registry wired to the in-memory ownership ledger and the
//! shared event bus, the way a node assembles it.

pub mod adversarial;
pub mod flows;

use std::sync::Arc;

use qc_18_property_registry::{
    AgreementHash, GeoData, GeoPoint, InMemoryOwnershipLedger, MintRequest, MultiKeyAdmin,
    PropertyRegistryService, RecordFields, RegistryConfig, RegistryDependencies,
};
use shared_bus::publisher::InMemoryEventBus;
use shared_types::{Address, AssetId, CurrencyRef};
use tracing_subscriber::EnvFilter;

/// Registry administrators used across the suite.
pub const ADMIN: Address = [0xAD; 20];
/// Second key in the administrator set.
pub const CO_ADMIN: Address = [0xAE; 20];
/// Seller in sale flows.
pub const SELLER: Address = [0x51; 20];
/// Buyer in sale flows.
pub const BUYER: Address = [0xB0; 20];
/// Property manager.
pub const MANAGER: Address = [0x3A; 20];

/// Registry type assembled by `Node`.
pub type Registry = PropertyRegistryService<InMemoryOwnershipLedger, MultiKeyAdmin, InMemoryEventBus>;

/// A registry node: service, ledger and bus.
pub struct Node {
    /// Facade under test.
    pub registry: Arc<Registry>,
    /// Ownership ledger with the registry's auditor subscribed.
    pub ledger: Arc<InMemoryOwnershipLedger>,
    /// Event bus the registry publishes to.
    pub bus: Arc<InMemoryEventBus>,
}

impl Node {
    /// Assemble a node with the given configuration.
    pub fn start(config: RegistryConfig) -> Self {
        init_tracing();
        let ledger = Arc::new(InMemoryOwnershipLedger::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let registry = Arc::new(
            PropertyRegistryService::new(
                RegistryDependencies {
                    ledger: ledger.clone(),
                    admin: Arc::new(MultiKeyAdmin::new([ADMIN, CO_ADMIN])),
                    publisher: bus.clone(),
                },
                config,
            )
            .expect("valid registry config"),
        );
        ledger.subscribe(Arc::new(registry.transfer_auditor()));
        Self {
            registry,
            ledger,
            bus,
        }
    }
}

/// Install a test subscriber once. Honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Parse an asset id.
pub fn asset(id: &str) -> AssetId {
    AssetId::new(id).expect("valid asset id")
}

/// US dollars.
pub fn usd() -> CurrencyRef {
    CurrencyRef::fiat("USD").expect("valid currency")
}

/// A complete record for `legal_owner`.
pub fn record_fields(legal_owner: &str, parcel: &str) -> RecordFields {
    RecordFields {
        legal_description: format!("Parcel {parcel}, Township 4 North, Range 2 East"),
        street_address: "1200 Lakeview Ave, Madison, WI".into(),
        geo_data: GeoData::with_boundary(
            GeoPoint::new(43_074_700, -89_384_400),
            vec![
                GeoPoint::new(43_074_600, -89_384_500),
                GeoPoint::new(43_074_800, -89_384_500),
                GeoPoint::new(43_074_800, -89_384_300),
                GeoPoint::new(43_074_600, -89_384_300),
            ],
        ),
        parcel_id: parcel.into(),
        legal_owner: legal_owner.into(),
        agreement_hash: AgreementHash::of_document(
            format!("{legal_owner} operating agreement").as_bytes(),
        ),
    }
}

/// Mint request for `id` held by `SELLER`.
pub fn mint_request(id: &str) -> MintRequest {
    MintRequest {
        asset_id: asset(id),
        owner: SELLER,
        manager: MANAGER,
        fields: record_fields("Acme LLC", id),
    }
}
