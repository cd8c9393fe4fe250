//! Flat chain record table and structural operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Anchor, Link, Location, StandstillRef};

/// A fatal chain invariant violation.
///
/// All three kinds indicate a caller error or a prior propagation bug, not
/// a recoverable runtime condition; the chain set panics with the violation
/// the moment one is detected and never repairs it silently. Domain-level
/// issues (capacity exceeded, missed time window) are ordinary derived
/// values consumed by the score layer, never violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainViolation {
    /// A link was attached after itself or one of its own descendants, or a
    /// traversal exceeded the total link count (cycle).
    StructuralViolation {
        /// Link at which the cycle was detected.
        link: usize,
    },
    /// A derived value was read for a link with no previous standstill.
    DanglingReference {
        /// Link whose backward reference is unset.
        link: usize,
    },
    /// The forward pointer of a link's predecessor does not point back at
    /// the link, or a derived value contradicts the chain it sits in.
    PropagationInconsistency {
        /// Link at which the disagreement was observed.
        link: usize,
    },
}

impl fmt::Display for ChainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainViolation::StructuralViolation { link } => {
                write!(f, "structural violation: cycle through link {link}")
            }
            ChainViolation::DanglingReference { link } => {
                write!(f, "dangling reference: link {link} has no previous standstill")
            }
            ChainViolation::PropagationInconsistency { link } => {
                write!(f, "propagation inconsistency at link {link}")
            }
        }
    }
}

/// The chain collection: every anchor, every link, and the per-link chain
/// state, stored as parallel index-based arrays.
///
/// `previous` is the planning variable the search layer mutates (through
/// [`ChainSet::attach`], [`ChainSet::insert_after`] and
/// [`ChainSet::detach`]). Everything else per link — the forward pointer,
/// the owning anchor, the arrival time — is derived state written solely by
/// the propagation engine ([`ChainSet::propagate_from`]); the search layer
/// must treat it as read-only.
///
/// A chain is not a stored object: it is whatever is reachable forward
/// from one anchor. Cloning the set is the fork operation for concurrent
/// search workers; each worker owns its clone exclusively, so no
/// synchronization exists anywhere in this type.
///
/// # Examples
///
/// ```
/// use u_chainplan::chain::{ChainSet, UnitSpeed};
/// use u_chainplan::models::{Anchor, Link, Location, StandstillRef};
///
/// let anchors = vec![Anchor::new(0, 100, Location::new(0, 0.0, 0.0))];
/// let links = vec![Link::new(0, Location::new(1, 1.0, 0.0), 10)];
/// let mut chains = ChainSet::new(anchors, links);
///
/// chains.attach(0, StandstillRef::Anchor(0));
/// chains.propagate_all(&UnitSpeed);
/// assert_eq!(chains.owning_anchor(0), 0);
/// assert_eq!(chains.arrival_millis(0), 1000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSet {
    pub(super) anchors: Vec<Anchor>,
    pub(super) links: Vec<Link>,
    /// Planning variable: which standstill each link stands after.
    pub(super) previous: Vec<Option<StandstillRef>>,
    /// Derived inverse of `previous`, per link.
    pub(super) next_of_link: Vec<Option<usize>>,
    /// Derived first link of each anchor's chain.
    pub(super) first_of_anchor: Vec<Option<usize>>,
    /// Derived owning anchor, per link.
    pub(super) owner: Vec<Option<usize>>,
    /// Derived cumulative arrival time, per link.
    pub(super) arrival_millis: Vec<Option<i64>>,
}

pub(super) fn fail(violation: ChainViolation) -> ! {
    panic!("{violation}")
}

impl ChainSet {
    /// Creates a chain set with every link unattached.
    pub fn new(anchors: Vec<Anchor>, links: Vec<Link>) -> Self {
        let n = links.len();
        let a = anchors.len();
        Self {
            anchors,
            links,
            previous: vec![None; n],
            next_of_link: vec![None; n],
            first_of_anchor: vec![None; a],
            owner: vec![None; n],
            arrival_millis: vec![None; n],
        }
    }

    /// Number of anchors.
    pub fn num_anchors(&self) -> usize {
        self.anchors.len()
    }

    /// Number of links.
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// All anchors, indexed by anchor ID.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// All links, indexed by link ID.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The anchor at the given index.
    pub fn anchor(&self, anchor: usize) -> &Anchor {
        &self.anchors[anchor]
    }

    /// The link at the given index.
    pub fn link(&self, link: usize) -> &Link {
        &self.links[link]
    }

    /// The standstill the given link currently stands after, or `None` if
    /// the link is unattached.
    pub fn previous_standstill(&self, link: usize) -> Option<StandstillRef> {
        self.previous[link]
    }

    /// The link standing after the given standstill, if any.
    pub fn next_link(&self, standstill: StandstillRef) -> Option<usize> {
        match standstill {
            StandstillRef::Anchor(a) => self.first_of_anchor[a],
            StandstillRef::Link(l) => self.next_of_link[l],
        }
    }

    /// Returns `true` if the link currently stands after some standstill.
    pub fn is_attached(&self, link: usize) -> bool {
        self.previous[link].is_some()
    }

    /// The location of the given standstill (depot for anchors).
    pub fn location_of(&self, standstill: StandstillRef) -> &Location {
        match standstill {
            StandstillRef::Anchor(a) => self.anchors[a].depot(),
            StandstillRef::Link(l) => self.links[l].location(),
        }
    }

    /// Demand of the given link.
    pub fn demand(&self, link: usize) -> i32 {
        self.links[link].demand()
    }

    /// The anchor whose chain the given link currently belongs to.
    ///
    /// # Panics
    ///
    /// Panics with [`ChainViolation::DanglingReference`] if the link is
    /// unattached or propagation has not run since it was attached.
    pub fn owning_anchor(&self, link: usize) -> usize {
        self.owner[link].unwrap_or_else(|| fail(ChainViolation::DanglingReference { link }))
    }

    /// The cumulative arrival time at the given link.
    ///
    /// # Panics
    ///
    /// Panics with [`ChainViolation::DanglingReference`] if the link is
    /// unattached or propagation has not run since it was attached.
    pub fn arrival_millis(&self, link: usize) -> i64 {
        self.arrival_millis[link]
            .unwrap_or_else(|| fail(ChainViolation::DanglingReference { link }))
    }

    /// Milli distance from the given link to the standstill it stands
    /// after, or 0 while the link is unattached (defensive default during
    /// construction).
    pub fn milli_distance_to_previous(&self, link: usize) -> i64 {
        match self.previous[link] {
            None => 0,
            Some(s) => self.links[link].milli_distance_to(self.location_of(s)),
        }
    }

    /// Attaches an unattached link after a standstill that has no follower.
    ///
    /// Writes only the backward pointer and its forward inverse; the caller
    /// must run propagation before reading any derived value. Inserting in
    /// the middle of a chain is [`ChainSet::insert_after`]; moving an
    /// attached link is [`ChainSet::detach`] followed by either.
    ///
    /// # Panics
    ///
    /// Panics if the link is already attached, if the standstill is already
    /// followed by another link, or (with
    /// [`ChainViolation::StructuralViolation`]) if attaching would create a
    /// cycle: `new_previous` is the link itself or one of its descendants.
    pub fn attach(&mut self, link: usize, new_previous: StandstillRef) {
        assert!(
            self.next_link(new_previous).is_none(),
            "standstill {new_previous:?} is already followed by another link"
        );
        self.insert_after(link, new_previous);
    }

    /// Attaches an unattached link after a standstill, re-pointing the
    /// standstill's current follower (if any) to stand after the link.
    ///
    /// Like [`ChainSet::attach`], only pointers change; the caller must run
    /// propagation before reading any derived value, starting at `link`
    /// (which covers the re-pointed follower downstream of it).
    ///
    /// # Panics
    ///
    /// Panics if the link is already attached, or with
    /// [`ChainViolation::StructuralViolation`] if attaching would create a
    /// cycle.
    pub fn insert_after(&mut self, link: usize, new_previous: StandstillRef) {
        assert!(
            self.previous[link].is_none(),
            "link {link} is already attached; detach it before re-attaching"
        );
        if new_previous == StandstillRef::Link(link) {
            fail(ChainViolation::StructuralViolation { link });
        }
        self.assert_not_descendant(link, new_previous);

        if let Some(follower) = self.next_link(new_previous) {
            self.previous[follower] = Some(StandstillRef::Link(link));
            self.next_of_link[link] = Some(follower);
        }
        self.previous[link] = Some(new_previous);
        self.set_next_link(new_previous, Some(link));
    }

    /// Detaches a link, splicing its old successor (if any) directly onto
    /// its old predecessor.
    ///
    /// Returns the old successor; the caller must re-propagate from it (the
    /// splice point) once the move is complete. The detached link's derived
    /// values are cleared; reading them before re-attachment and
    /// propagation is a [`ChainViolation::DanglingReference`].
    ///
    /// Detaching an unattached link is a no-op returning `None`.
    pub fn detach(&mut self, link: usize) -> Option<usize> {
        let prev = self.previous[link]?;
        let old_next = self.next_of_link[link];

        self.set_next_link(prev, old_next);
        if let Some(n) = old_next {
            self.previous[n] = Some(prev);
        }

        self.previous[link] = None;
        self.next_of_link[link] = None;
        self.owner[link] = None;
        self.arrival_millis[link] = None;
        old_next
    }

    /// Collects the links of one anchor's chain in forward order.
    ///
    /// # Panics
    ///
    /// Panics with [`ChainViolation::StructuralViolation`] if the walk
    /// visits more links than exist (cycle).
    pub fn chain_links(&self, anchor: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = self.first_of_anchor[anchor];
        while let Some(l) = cur {
            if out.len() >= self.links.len() {
                fail(ChainViolation::StructuralViolation { link: l });
            }
            out.push(l);
            cur = self.next_of_link[l];
        }
        out
    }

    /// Collects the links from the given link backward to its anchor, in
    /// walk order (the reverse of chain order).
    ///
    /// # Panics
    ///
    /// Panics with [`ChainViolation::DanglingReference`] if a backward
    /// reference is unset along the way, or with
    /// [`ChainViolation::StructuralViolation`] if the walk visits more
    /// links than exist (cycle).
    pub fn backward_links(&self, link: usize) -> Vec<usize> {
        let mut out = vec![link];
        let mut cur = link;
        loop {
            match self.previous[cur] {
                None => fail(ChainViolation::DanglingReference { link: cur }),
                Some(StandstillRef::Anchor(_)) => return out,
                Some(StandstillRef::Link(p)) => {
                    if out.len() >= self.links.len() {
                        fail(ChainViolation::StructuralViolation { link: p });
                    }
                    out.push(p);
                    cur = p;
                }
            }
        }
    }

    /// Checks every chain invariant over the whole set.
    ///
    /// Expects a fully assigned, fully propagated set: every link attached,
    /// every forward pointer the exact inverse of a backward pointer, no
    /// cycles, and every owning anchor matching the chain the link is
    /// reachable from. Returns the first violation found.
    pub fn verify(&self) -> Result<(), ChainViolation> {
        for link in 0..self.links.len() {
            match self.previous[link] {
                None => return Err(ChainViolation::DanglingReference { link }),
                Some(p) => {
                    if self.next_link(p) != Some(link) {
                        return Err(ChainViolation::PropagationInconsistency { link });
                    }
                }
            }
        }
        let mut seen = vec![false; self.links.len()];
        for anchor in 0..self.anchors.len() {
            // The seen set doubles as the walk bound: any revisit is a cycle.
            let mut cur = self.first_of_anchor[anchor];
            while let Some(link) = cur {
                if seen[link] {
                    return Err(ChainViolation::StructuralViolation { link });
                }
                seen[link] = true;
                if self.owner[link] != Some(anchor) {
                    return Err(ChainViolation::PropagationInconsistency { link });
                }
                cur = self.next_of_link[link];
            }
        }
        // Attached links unreachable from any anchor can only sit on a cycle.
        if let Some(link) = seen.iter().position(|&s| !s) {
            return Err(ChainViolation::StructuralViolation { link });
        }
        Ok(())
    }

    pub(super) fn set_next_link(&mut self, standstill: StandstillRef, link: Option<usize>) {
        match standstill {
            StandstillRef::Anchor(a) => self.first_of_anchor[a] = link,
            StandstillRef::Link(l) => self.next_of_link[l] = link,
        }
    }

    /// Panics if `candidate` is `link` itself or reachable backward through
    /// `link`, which would make the attachment a cycle.
    fn assert_not_descendant(&self, link: usize, candidate: StandstillRef) {
        let mut cur = candidate;
        let mut steps = 0;
        loop {
            match cur {
                StandstillRef::Anchor(_) => return,
                StandstillRef::Link(l) => {
                    if l == link {
                        fail(ChainViolation::StructuralViolation { link });
                    }
                    steps += 1;
                    if steps > self.links.len() {
                        fail(ChainViolation::StructuralViolation { link: l });
                    }
                    match self.previous[l] {
                        // Unattached upstream is caught later, at propagation.
                        None => return,
                        Some(p) => cur = p,
                    }
                }
            }
        }
    }
}
