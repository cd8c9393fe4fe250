//! Chain structure and shadow-state propagation.
//!
//! The chain collection is a flat, index-based record table: each link
//! stores which standstill it stands after (the planning variable), and the
//! propagation engine maintains the derived forward pointers, owning
//! anchors, and cumulative arrival times.

mod chain_set;
mod propagate;

pub use chain_set::{ChainSet, ChainViolation};
pub use propagate::{ArrivalModel, MatrixTravel, UnitSpeed};
