//! Chain evaluation into aggregated constraint weights.
//!
//! # Constraints
//!
//! - **vehicleCapacity** (hard): total chain demand must not exceed the
//!   anchor's capacity
//! - **arrivalAfterDueTime** (hard): arrival must not miss a link's time
//!   window
//! - **distanceToPreviousStandstill** (soft): minimize per-link travel
//! - **distanceFromLastCustomerToDepot** (soft): minimize the return leg
//!
//! Constraint matches are ordinary derived values read from a fully
//! propagated chain set; an infeasible chain is a bad score, never an
//! error.

use crate::chain::ChainSet;
use crate::evaluation::BendableScore;

/// The aggregated weight of one constraint at one score level.
///
/// Keyed the way a bendable score verifier looks constraints up: an
/// optional constraint package, the constraint name, and the combined
/// score level (`hard_level` for hard levels, `hard_levels_size +
/// soft_level` for soft levels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintWeightTotal {
    constraint_package: Option<String>,
    constraint_name: String,
    score_level: usize,
    weight: i64,
}

impl ConstraintWeightTotal {
    /// Creates a constraint weight total.
    pub fn new(
        constraint_package: Option<&str>,
        constraint_name: &str,
        score_level: usize,
        weight: i64,
    ) -> Self {
        Self {
            constraint_package: constraint_package.map(str::to_owned),
            constraint_name: constraint_name.to_owned(),
            score_level,
            weight,
        }
    }

    /// Constraint package, if the constraints are namespaced.
    pub fn constraint_package(&self) -> Option<&str> {
        self.constraint_package.as_deref()
    }

    /// Constraint name.
    pub fn constraint_name(&self) -> &str {
        &self.constraint_name
    }

    /// Combined score level this weight applies to.
    pub fn score_level(&self) -> usize {
        self.score_level
    }

    /// Total weight for all matches of this constraint at this level.
    pub fn weight(&self) -> i64 {
        self.weight
    }
}

/// Evaluates a fully propagated chain set into a bendable score and
/// per-constraint weight totals.
///
/// The evaluator only reads the chain set's derived accessors; it must run
/// strictly after propagation for the mutation being scored (plain
/// sequencing, there is no synchronization to lean on).
///
/// # Examples
///
/// ```
/// use u_chainplan::chain::{ChainSet, UnitSpeed};
/// use u_chainplan::evaluation::ChainEvaluator;
/// use u_chainplan::models::{Anchor, Link, Location, StandstillRef};
///
/// let anchors = vec![Anchor::new(0, 5, Location::new(0, 0.0, 0.0))];
/// let links = vec![Link::new(0, Location::new(1, 1.0, 0.0), 10)];
/// let mut chains = ChainSet::new(anchors, links);
/// chains.attach(0, StandstillRef::Anchor(0));
/// chains.propagate_all(&UnitSpeed);
///
/// let (score, _totals) = ChainEvaluator::new(1, 1).evaluate(&chains);
/// assert!(!score.is_feasible()); // demand 10 > capacity 5
/// ```
#[derive(Debug, Clone)]
pub struct ChainEvaluator {
    hard_levels_size: usize,
    soft_levels_size: usize,
    package: Option<String>,
}

impl ChainEvaluator {
    /// Creates an evaluator producing scores with the given level counts.
    ///
    /// Hard constraints land on hard level 0 and soft constraints on soft
    /// level 0; extra levels stay zero and are available to callers that
    /// fold in further objectives.
    ///
    /// # Panics
    ///
    /// Panics if either level count is zero.
    pub fn new(hard_levels_size: usize, soft_levels_size: usize) -> Self {
        assert!(hard_levels_size >= 1, "at least one hard level is required");
        assert!(soft_levels_size >= 1, "at least one soft level is required");
        Self {
            hard_levels_size,
            soft_levels_size,
            package: None,
        }
    }

    /// Namespaces the produced constraint totals under a package name.
    pub fn with_package(mut self, package: &str) -> Self {
        self.package = Some(package.to_owned());
        self
    }

    /// Evaluates the chain set, returning the total score and the
    /// aggregated weight per constraint.
    ///
    /// Every constraint appears in the totals, with weight 0 when nothing
    /// matched.
    ///
    /// The soft distance weights are computed from location milli
    /// distances, regardless of which arrival model propagated the set;
    /// only the arrival-based weights (`arrivalAfterDueTime`) follow the
    /// model's travel times.
    ///
    /// # Panics
    ///
    /// Panics with a dangling-reference violation if any link's derived
    /// values have not been propagated.
    pub fn evaluate(&self, chains: &ChainSet) -> (BendableScore, Vec<ConstraintWeightTotal>) {
        let soft0 = self.hard_levels_size;
        let mut capacity_weight = 0;
        let mut due_time_weight = 0;
        let mut travel_weight = 0;
        let mut return_weight = 0;

        for anchor in 0..chains.num_anchors() {
            let chain = chains.chain_links(anchor);
            let load: i32 = chain.iter().map(|&l| chains.demand(l)).sum();
            let capacity = chains.anchor(anchor).capacity();
            if load > capacity {
                capacity_weight -= i64::from(load - capacity);
            }
            if let Some(&last) = chain.last() {
                return_weight -=
                    chains.link(last).milli_distance_to(chains.anchor(anchor).depot());
            }
        }

        for link in 0..chains.num_links() {
            travel_weight -= chains.milli_distance_to_previous(link);
            if let Some(tw) = chains.link(link).time_window() {
                let arrival = chains.arrival_millis(link);
                if tw.is_violated(arrival) {
                    due_time_weight -= arrival - tw.due_millis();
                }
            }
        }

        let totals = vec![
            self.total("vehicleCapacity", 0, capacity_weight),
            self.total("arrivalAfterDueTime", 0, due_time_weight),
            self.total("distanceToPreviousStandstill", soft0, travel_weight),
            self.total("distanceFromLastCustomerToDepot", soft0, return_weight),
        ];

        let mut score = BendableScore::zeros(self.hard_levels_size, self.soft_levels_size);
        for total in &totals {
            score.add_at_level(total.score_level(), total.weight());
        }
        (score, totals)
    }

    fn total(&self, name: &str, score_level: usize, weight: i64) -> ConstraintWeightTotal {
        ConstraintWeightTotal::new(self.package.as_deref(), name, score_level, weight)
    }
}
