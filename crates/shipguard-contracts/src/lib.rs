//! # shipguard-contracts
//!
//! Shared types, schemas, and contracts for the SHIPGUARD audit core.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod action;
pub mod anomaly;
pub mod audit;
pub mod decision;
pub mod error;
pub mod shipment;
