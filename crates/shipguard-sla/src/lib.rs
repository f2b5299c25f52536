//! # shipguard-sla
//!
//! Versioned SLA configuration for the SHIPGUARD audit core: transit-time
//! limits and delay thresholds, loaded once from TOML and immutable for the
//! life of the process.
//!
//! Resolution precedence for transit-time limits, highest first:
//!
//! 1. temperature-sensitive rule (unconditional when the cargo is flagged)
//! 2. route rule (exact origin/destination pair, case-insensitive)
//! 3. vendor override (domestic or international figure)
//! 4. global default

pub mod config;
pub mod store;

pub use config::{DelayThresholds, SlaConfig};
pub use store::SlaConfigStore;
