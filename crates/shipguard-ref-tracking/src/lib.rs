//! # shipguard-ref-tracking
//!
//! Reference runtime for the SHIPGUARD audit core: hardcoded, fictional
//! tracking fixtures standing in for the external data source, a logging
//! action dispatcher, and the wiring that assembles the full pipeline.
//!
//! All data in this crate is simulated. No external systems are contacted.

pub mod dispatch;
pub mod mock_data;
pub mod runtime;
pub mod store;

pub use runtime::Runtime;
pub use store::MockShipmentStore;
