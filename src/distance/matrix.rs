//! Dense milli distance matrix.

use serde::{Deserialize, Serialize};

use crate::models::Location;

/// A dense n×n matrix of milli distances stored in row-major order.
///
/// Supports both fixed-point Euclidean computation from location
/// coordinates and explicit distance specification (for road distances
/// measured elsewhere). All entries are integers so score arithmetic stays
/// exact.
///
/// # Examples
///
/// ```
/// use u_chainplan::distance::MilliDistanceMatrix;
/// use u_chainplan::models::Location;
///
/// let locations = vec![
///     Location::new(0, 0.0, 0.0),
///     Location::new(1, 3.0, 4.0),
/// ];
/// let dm = MilliDistanceMatrix::from_locations(&locations);
/// assert_eq!(dm.get(0, 1), 5000);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilliDistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl MilliDistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Computes a symmetric Euclidean milli distance matrix from location
    /// coordinates, indexed by position in the slice.
    pub fn from_locations(locations: &[Location]) -> Self {
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = locations[i].milli_distance_to(&locations[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<i64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the milli distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Sets the milli distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, milli_distance: i64) {
        self.data[from * self.size + to] = milli_distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric.
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }
}
