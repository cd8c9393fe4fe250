//! Shadow-state propagation engine.
//!
//! # Algorithm
//!
//! A single backward-pointer mutation invalidates the derived state of the
//! mutated link and everything forward of it. [`ChainSet::propagate_from`]
//! walks forward from the mutated link, recomputing the owning anchor
//! (cached from the predecessor) and the cumulative arrival time, and stops
//! at the first link whose recomputed values match its stored values — past
//! that point the chain is provably unaffected. The walk is iterative and
//! bounded by the total link count, so adversarial pointer shapes fail fast
//! instead of looping or exhausting the stack.
//!
//! # Complexity
//!
//! O(k) per mutation, where k is the number of links between the mutation
//! point and the first stable link (worst case: chain length).

use crate::chain::chain_set::{fail, ChainSet, ChainViolation};
use crate::distance::MilliDistanceMatrix;
use crate::models::{Anchor, Link, Location, StandstillRef};

/// Supplies the travel and departure arithmetic that turns chain structure
/// into cumulative arrival times.
///
/// The defaults model travel at 1 distance unit per milli time unit,
/// departure at time 0 from every anchor, and service that starts once the
/// link's time window opens (waiting if early).
pub trait ArrivalModel {
    /// Travel time from one location to another.
    fn travel_millis(&self, from: &Location, to: &Location) -> i64 {
        from.milli_distance_to(to)
    }

    /// Time at which the given anchor's chain departs its depot.
    fn anchor_departure_millis(&self, _anchor: &Anchor) -> i64 {
        0
    }

    /// Time at which service at the given link completes, given its
    /// arrival time.
    fn link_departure_millis(&self, link: &Link, arrival_millis: i64) -> i64 {
        let service_start = match link.time_window() {
            Some(tw) => arrival_millis.max(tw.ready_millis()),
            None => arrival_millis,
        };
        service_start + link.service_millis()
    }

    /// Whether every value this model produces depends only on upstream
    /// chain state.
    ///
    /// The early exit in [`ChainSet::propagate_from`] is only sound under
    /// that condition; a model whose arrival depends on a global chain
    /// property must return `false` here, which forces every downstream
    /// link to be recomputed on each mutation.
    fn upstream_only(&self) -> bool {
        true
    }
}

/// The default arrival model: travel time equals milli distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitSpeed;

impl ArrivalModel for UnitSpeed {}

/// An arrival model that reads travel times from an explicit milli
/// distance matrix, indexed by location ID.
#[derive(Debug, Clone, Copy)]
pub struct MatrixTravel<'a> {
    matrix: &'a MilliDistanceMatrix,
}

impl<'a> MatrixTravel<'a> {
    /// Creates a matrix-backed arrival model.
    pub fn new(matrix: &'a MilliDistanceMatrix) -> Self {
        Self { matrix }
    }
}

impl ArrivalModel for MatrixTravel<'_> {
    fn travel_millis(&self, from: &Location, to: &Location) -> i64 {
        self.matrix.get(from.id(), to.id())
    }
}

impl ChainSet {
    /// Recomputes derived state forward from `start` until it stabilizes
    /// or the chain ends.
    ///
    /// Must be called after every backward-pointer mutation, before any
    /// derived value is read; the mutation step and this recomputation are
    /// deliberately separate calls so a composed move can batch its
    /// pointer updates first. `start` itself is always rewritten; each
    /// following link is rewritten until one comes out unchanged (the early
    /// exit is skipped entirely when the model is not
    /// [`ArrivalModel::upstream_only`]).
    ///
    /// # Panics
    ///
    /// Panics with [`ChainViolation::DanglingReference`] if a backward
    /// reference on the walk is unset, with
    /// [`ChainViolation::PropagationInconsistency`] if a predecessor's
    /// forward pointer does not point back at the link being recomputed,
    /// and with [`ChainViolation::StructuralViolation`] if the walk visits
    /// more links than exist.
    pub fn propagate_from(&mut self, start: usize, model: &impl ArrivalModel) {
        let bound = self.num_links();
        let mut cur = start;
        for _ in 0..bound {
            let prev = self.previous[cur]
                .unwrap_or_else(|| fail(ChainViolation::DanglingReference { link: cur }));
            if self.next_link(prev) != Some(cur) {
                fail(ChainViolation::PropagationInconsistency { link: cur });
            }

            let (owner, departure) = match prev {
                StandstillRef::Anchor(a) => {
                    (a, model.anchor_departure_millis(&self.anchors[a]))
                }
                StandstillRef::Link(p) => {
                    let owner = self.owner[p]
                        .unwrap_or_else(|| fail(ChainViolation::DanglingReference { link: p }));
                    let arrival = self.arrival_millis[p]
                        .unwrap_or_else(|| fail(ChainViolation::DanglingReference { link: p }));
                    (owner, model.link_departure_millis(&self.links[p], arrival))
                }
            };
            let arrival =
                departure + model.travel_millis(self.location_of(prev), self.links[cur].location());

            let unchanged =
                self.owner[cur] == Some(owner) && self.arrival_millis[cur] == Some(arrival);
            if unchanged && cur != start && model.upstream_only() {
                return;
            }
            self.owner[cur] = Some(owner);
            self.arrival_millis[cur] = Some(arrival);

            match self.next_of_link[cur] {
                Some(n) => cur = n,
                None => return,
            }
        }
        fail(ChainViolation::StructuralViolation { link: start });
    }

    /// Runs a full propagation pass over every chain.
    ///
    /// Used once after bulk construction; afterwards each mutation only
    /// needs its own [`ChainSet::propagate_from`] call.
    pub fn propagate_all(&mut self, model: &impl ArrivalModel) {
        for anchor in 0..self.num_anchors() {
            if let Some(first) = self.next_link(StandstillRef::Anchor(anchor)) {
                self.propagate_from(first, model);
            }
        }
    }

    /// The canonical composed move: detach `link`, insert it after
    /// `new_previous`, and repair derived state at both splice points.
    ///
    /// Propagation runs first from the moved link (covering its new chain
    /// downstream), then from the old successor left behind by the detach,
    /// so both affected chains end fully propagated.
    ///
    /// # Panics
    ///
    /// Panics like [`ChainSet::insert_after`] if the move would create a
    /// cycle, including relocating a link after itself.
    pub fn relocate(
        &mut self,
        link: usize,
        new_previous: StandstillRef,
        model: &impl ArrivalModel,
    ) {
        let old_next = self.detach(link);
        self.insert_after(link, new_previous);
        self.propagate_from(link, model);
        if let Some(n) = old_next {
            self.propagate_from(n, model);
        }
    }
}
