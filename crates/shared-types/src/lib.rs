//! # Shared Types Crate
//!
//! Identity primitives shared between the property registry and the event
//! bus.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Any type that crosses a crate boundary
//!   (in an event payload or a port signature) is defined here.
//! - **Validated Construction**: `AssetId` and `CurrencyRef` can only be
//!   built through checked constructors, including on deserialization.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
