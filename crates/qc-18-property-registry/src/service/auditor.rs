//! Transfer auditor.
//!
//! Registered with the ownership ledger. Re-publishes transfers of
//! registered assets on the event bus. It holds a `RegistryReader` and a
//! publisher, nothing that can issue an `AdminGrant`, so a transfer can
//! never touch records, debt or managers.

use crate::domain::AssetLifecycle;
use crate::ports::outbound::{RegistryReader, TransferObserver};
use async_trait::async_trait;
use shared_bus::events::{BlockchainEvent, PROPERTY_REGISTRY_SUBSYSTEM};
use shared_bus::publisher::EventPublisher;
use shared_types::{address_to_hex, Address, AssetId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Observes ledger transfers on behalf of the registry.
pub struct TransferAuditor<P: EventPublisher> {
    reader: Arc<dyn RegistryReader>,
    publisher: Arc<P>,
    observed: AtomicU64,
    unregistered: AtomicU64,
}

impl<P: EventPublisher> TransferAuditor<P> {
    pub(crate) fn new(reader: Arc<dyn RegistryReader>, publisher: Arc<P>) -> Self {
        Self {
            reader,
            publisher,
            observed: AtomicU64::new(0),
            unregistered: AtomicU64::new(0),
        }
    }

    /// Transfers of active assets seen so far.
    pub fn observed(&self) -> u64 {
        self.observed.load(Ordering::Relaxed)
    }

    /// Transfers of tokens with no active record.
    pub fn unregistered(&self) -> u64 {
        self.unregistered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl<P: EventPublisher + 'static> TransferObserver for TransferAuditor<P> {
    async fn on_transfer(&self, id: &AssetId, from: Address, to: Address) {
        let lifecycle = self.reader.lifecycle(id);
        if lifecycle != AssetLifecycle::Active {
            self.unregistered.fetch_add(1, Ordering::Relaxed);
            warn!(asset = %id, ?lifecycle, "[qc-18] Transfer of token with no active record");
            self.publisher
                .publish(BlockchainEvent::CriticalError {
                    subsystem_id: PROPERTY_REGISTRY_SUBSYSTEM,
                    error: format!("transfer of unregistered token {id}"),
                })
                .await;
            return;
        }

        self.observed.fetch_add(1, Ordering::Relaxed);
        debug!(
            asset = %id,
            from = %address_to_hex(&from),
            to = %address_to_hex(&to),
            "[qc-18] Ownership moved"
        );
        self.publisher
            .publish(BlockchainEvent::AssetTransferred {
                asset_id: id.clone(),
                from,
                to,
            })
            .await;
    }
}
