//! Benchmark support crate for chromagen.
//!
//! Provides parameter types and seeded fixtures used by the Criterion
//! benchmarks for graph generation and constraint generation.

pub mod error;
pub mod fixtures;
pub mod params;
