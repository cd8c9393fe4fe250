//! Fixed-point distance matrices.
//!
//! Provides a dense milli distance matrix for chain sets whose travel
//! times come from measured data rather than coordinates.

mod matrix;

pub use matrix::MilliDistanceMatrix;
