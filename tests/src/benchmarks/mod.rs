//! # Property Registry Benchmarks
//!
//! Criterion benchmarks of registry operations.

pub mod qc_18_property_registry;
