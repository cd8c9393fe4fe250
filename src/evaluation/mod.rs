//! Score types and chain evaluation.
//!
//! Provides the bendable multi-level score and the evaluator that turns a
//! fully propagated chain set into aggregated constraint weights.

mod constraints;
mod score;

pub use constraints::{ChainEvaluator, ConstraintWeightTotal};
pub use score::BendableScore;
