//! # shipguard-core
//!
//! The trust boundary of the SHIPGUARD pipeline: trait seams for the
//! collaborating components, and the executor that wires them together in
//! the one permitted order — audit, then policy gate, then side effect,
//! then decision record.

pub mod executor;
pub mod traits;

pub use executor::{IncidentExecutor, IncidentReport};
