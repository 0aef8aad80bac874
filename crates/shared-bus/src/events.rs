//! # Registry Events
//!
//! Defines all event types that flow through the shared bus.
//! Every event carries the asset id it concerns so monitors can follow a
//! single property without decoding unrelated traffic.

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, AssetId, CurrencyRef, Hash};

/// Subsystem id of the property registry.
pub const PROPERTY_REGISTRY_SUBSYSTEM: u8 = 18;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockchainEvent {
    // =========================================================================
    // SUBSYSTEM 18: PROPERTY REGISTRY - LIFECYCLE
    // =========================================================================
    /// A property was minted: immutable record written, token issued.
    AssetMinted {
        /// The new asset.
        asset_id: AssetId,
        /// Initial token owner.
        owner: Address,
        /// Initial manager.
        manager: Address,
        /// Operating-agreement digest bound to the record.
        agreement_hash: Hash,
    },

    /// A property was burned and its record retired.
    AssetBurned {
        /// The retired asset.
        asset_id: AssetId,
        /// Token owner at the moment of burn.
        last_owner: Address,
        /// Whether the asset had been foreclosed.
        foreclosed: bool,
    },

    // =========================================================================
    // SUBSYSTEM 18: PROPERTY REGISTRY - OWNERSHIP (observed, never driven)
    // =========================================================================
    /// The ownership ledger moved the token to a new holder.
    AssetTransferred {
        /// The asset whose token moved.
        asset_id: AssetId,
        /// Previous holder.
        from: Address,
        /// New holder.
        to: Address,
    },

    // =========================================================================
    // SUBSYSTEM 18: PROPERTY REGISTRY - ADMINISTRATOR ACTIONS
    // =========================================================================
    /// Administrator recorded a new debt balance.
    DebtUpdated {
        /// The asset.
        asset_id: AssetId,
        /// Currency of the balance.
        currency: CurrencyRef,
        /// Positive = debt, negative = credit.
        amount: i128,
    },

    /// The asset was foreclosed. Emitted exactly once per asset.
    AssetForeclosed {
        /// The foreclosed asset.
        asset_id: AssetId,
    },

    /// Administrator reassigned the manager.
    ManagerChanged {
        /// The asset.
        asset_id: AssetId,
        /// Manager before the change.
        previous: Address,
        /// Manager after the change.
        manager: Address,
    },

    /// Administrator set or cleared the blocklist freeze.
    AssetFreezeChanged {
        /// The asset.
        asset_id: AssetId,
        /// New freeze state.
        frozen: bool,
    },

    // =========================================================================
    // CRITICAL EVENTS (DLQ)
    // =========================================================================
    /// Critical error requiring operator attention.
    CriticalError {
        /// The subsystem that encountered the error.
        subsystem_id: u8,
        /// Error description.
        error: String,
    },
}

impl BlockchainEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::AssetMinted { .. } | Self::AssetBurned { .. } => EventTopic::Lifecycle,
            Self::AssetTransferred { .. } => EventTopic::Ownership,
            Self::DebtUpdated { .. } => EventTopic::Debt,
            Self::AssetForeclosed { .. } => EventTopic::Foreclosure,
            Self::ManagerChanged { .. } => EventTopic::Management,
            Self::AssetFreezeChanged { .. } => EventTopic::Compliance,
            Self::CriticalError { .. } => EventTopic::DeadLetterQueue,
        }
    }

    /// Get the originating subsystem ID.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self {
            Self::CriticalError { subsystem_id, .. } => *subsystem_id,
            _ => PROPERTY_REGISTRY_SUBSYSTEM,
        }
    }

    /// The asset this event concerns, if any.
    #[must_use]
    pub fn asset_id(&self) -> Option<&AssetId> {
        match self {
            Self::AssetMinted { asset_id, .. }
            | Self::AssetBurned { asset_id, .. }
            | Self::AssetTransferred { asset_id, .. }
            | Self::DebtUpdated { asset_id, .. }
            | Self::AssetForeclosed { asset_id }
            | Self::ManagerChanged { asset_id, .. }
            | Self::AssetFreezeChanged { asset_id, .. } => Some(asset_id),
            Self::CriticalError { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Mint and burn.
    Lifecycle,
    /// Observed token transfers.
    Ownership,
    /// Debt balance updates.
    Debt,
    /// Foreclosure notifications.
    Foreclosure,
    /// Manager reassignment.
    Management,
    /// Blocklist freeze changes.
    Compliance,
    /// Dead Letter Queue for critical errors.
    DeadLetterQueue,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Source subsystems to include. Empty means all sources.
    pub source_subsystems: Vec<u8>,
    /// Assets to include. Empty means all assets.
    pub assets: Vec<AssetId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    /// Create a filter for events from specific subsystems.
    #[must_use]
    pub fn from_subsystems(subsystems: Vec<u8>) -> Self {
        Self {
            source_subsystems: subsystems,
            ..Self::default()
        }
    }

    /// Create a filter that follows a single asset.
    #[must_use]
    pub fn for_asset(asset_id: AssetId) -> Self {
        Self {
            assets: vec![asset_id],
            ..Self::default()
        }
    }

    /// Narrow an existing filter to the given topics.
    #[must_use]
    pub fn with_topics(mut self, topics: Vec<EventTopic>) -> Self {
        self.topics = topics;
        self
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &BlockchainEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match = self.source_subsystems.is_empty()
            || self.source_subsystems.contains(&event.source_subsystem());

        let asset_match = self.assets.is_empty()
            || event
                .asset_id()
                .is_some_and(|id| self.assets.contains(id));

        topic_match && source_match && asset_match
    }
}
