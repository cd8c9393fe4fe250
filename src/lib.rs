//! # u-chainplan
//!
//! Chained planning model for vehicle-routing-style search: customers
//! (links) stand in ordered chains behind vehicles (anchors) via a single
//! backward pointer, and an incremental propagation engine keeps every
//! derived value (owning anchor, arrival time) consistent after each
//! pointer mutation without recomputing whole chains.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, Link, Anchor, StandstillRef)
//! - [`chain`] — Chain record table, structural moves, shadow propagation
//! - [`distance`] — Fixed-point milli distance matrix
//! - [`evaluation`] — Bendable score and constraint-weight evaluation
//! - [`verification`] — Aggregate constraint-weight assertions for tests

pub mod chain;
pub mod distance;
pub mod evaluation;
pub mod models;
pub mod verification;
