//! Domain model types for chained routing problems.
//!
//! Provides the immutable problem facts: locations with fixed-point milli
//! distances, links (customers) with demands and time windows, anchors
//! (vehicles) with capacities, and the anchor-or-link standstill reference.
//! Mutable chain state lives in [`crate::chain`].

mod anchor;
mod link;
mod location;
mod standstill;

pub use anchor::Anchor;
pub use link::{Link, TimeWindow};
pub use location::Location;
pub use standstill::StandstillRef;
