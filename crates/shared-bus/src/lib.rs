//! # Shared Bus - Event Bus for Registry Notifications
//!
//! Carries the notifications the property registry emits (mint, burn,
//! observed transfers, debt updates, foreclosure, manager changes) to
//! external monitors and integrators.
//!
//! ```text
//! ┌───────────────────┐                    ┌──────────────┐
//! │ Property Registry │                    │   Monitor    │
//! │       (18)        │    publish()       │              │
//! │                   │ ──────┐            │              │
//! └───────────────────┘       │            └──────────────┘
//!                             ▼                    ↑
//!                       ┌──────────────┐          │
//!                       │  Event Bus   │          │
//!                       │              │ ─────────┘
//!                       └──────────────┘  subscribe()
//! ```
//!
//! Subscribers only see events published after they subscribe. A subscriber
//! that falls more than the channel capacity behind loses the oldest events
//! and the loss is counted on its `Subscription`.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{BlockchainEvent, EventFilter, EventTopic, PROPERTY_REGISTRY_SUBSYSTEM};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
