//! Location with fixed-point milli distance.

use serde::{Deserialize, Serialize};

/// A point in the plane, identified by an index into the problem's
/// location list.
///
/// Distances between locations are exposed in milli units (Euclidean
/// distance multiplied by 1000 and rounded to the nearest integer) so that
/// repeated additions and comparisons in score arithmetic stay exact
/// instead of accumulating floating-point drift.
///
/// # Examples
///
/// ```
/// use u_chainplan::models::Location;
///
/// let a = Location::new(0, 0.0, 0.0);
/// let b = Location::new(1, 3.0, 4.0);
/// assert_eq!(a.milli_distance_to(&b), 5000);
/// assert_eq!(a.milli_distance_to(&b), b.milli_distance_to(&a));
/// assert_eq!(a.milli_distance_to(&a), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: usize,
    x: f64,
    y: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Location ID (index in the problem's location list).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to `other` multiplied by 1000, rounded to the
    /// nearest integer.
    ///
    /// Always non-negative, symmetric, and zero for identical coordinates.
    pub fn milli_distance_to(&self, other: &Location) -> i64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        ((dx * dx + dy * dy).sqrt() * 1000.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_new() {
        let l = Location::new(3, 1.5, -2.0);
        assert_eq!(l.id(), 3);
        assert_eq!(l.x(), 1.5);
        assert_eq!(l.y(), -2.0);
    }

    #[test]
    fn test_milli_distance_pythagorean() {
        let a = Location::new(0, 0.0, 0.0);
        let b = Location::new(1, 3.0, 4.0);
        assert_eq!(a.milli_distance_to(&b), 5000);
    }

    #[test]
    fn test_milli_distance_symmetric() {
        let a = Location::new(0, 1.0, 2.0);
        let b = Location::new(1, 4.0, 6.5);
        assert_eq!(a.milli_distance_to(&b), b.milli_distance_to(&a));
    }

    #[test]
    fn test_milli_distance_same_point_is_zero() {
        let a = Location::new(0, 7.25, -3.5);
        let b = Location::new(1, 7.25, -3.5);
        assert_eq!(a.milli_distance_to(&a), 0);
        assert_eq!(a.milli_distance_to(&b), 0);
    }

    #[test]
    fn test_milli_distance_rounds() {
        // sqrt(2) * 1000 = 1414.213..., rounds to 1414
        let a = Location::new(0, 0.0, 0.0);
        let b = Location::new(1, 1.0, 1.0);
        assert_eq!(a.milli_distance_to(&b), 1414);
    }

    #[test]
    fn test_location_serde_round_trip() {
        let l = Location::new(2, 3.0, 4.0);
        let json = serde_json::to_string(&l).expect("serialize");
        let back: Location = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(l, back);
    }
}
