//! Anchor (vehicle) type.

use serde::{Deserialize, Serialize};

use super::Location;

/// An anchor (vehicle) that starts exactly one chain.
///
/// Anchors are created once per problem instance and never move; links
/// attach after them (directly or transitively) and the chain they head is
/// the transitive closure reachable forward from them.
///
/// # Examples
///
/// ```
/// use u_chainplan::models::{Anchor, Location};
///
/// let v = Anchor::new(0, 100, Location::new(0, 0.0, 0.0));
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    id: usize,
    capacity: i32,
    depot: Location,
}

impl Anchor {
    /// Creates an anchor with the given capacity and depot location.
    pub fn new(id: usize, capacity: i32, depot: Location) -> Self {
        Self {
            id,
            capacity,
            depot,
        }
    }

    /// Anchor ID (index in the chain set's anchor table).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Depot location where this anchor's chain starts.
    pub fn depot(&self) -> &Location {
        &self.depot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_new() {
        let v = Anchor::new(1, 200, Location::new(0, 3.0, 4.0));
        assert_eq!(v.id(), 1);
        assert_eq!(v.capacity(), 200);
        assert_eq!(v.depot().x(), 3.0);
        assert_eq!(v.depot().y(), 4.0);
    }
}
