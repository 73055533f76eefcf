//! Shared test utilities used across chromagen crates.

pub mod property;
pub mod recording;
