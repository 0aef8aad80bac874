//! # Property Registry Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks of registry operations
//! │   └── qc_18_property_registry.rs
//! │
//! └── integration/      # Registry + ownership ledger + event bus
//!     ├── flows.rs      # End-to-end lifecycle flows
//!     └── adversarial.rs# Unauthorized and racing callers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::flows::
//! cargo test -p qc-tests integration::adversarial::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod benchmarks;
pub mod integration;
