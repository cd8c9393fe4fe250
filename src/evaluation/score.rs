//! Bendable multi-level score.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A score with a configurable number of hard and soft levels.
///
/// Levels are compared lexicographically: every hard level dominates every
/// soft level, and within each group earlier levels dominate later ones.
/// Score levels are addressed by a single index across both groups:
/// `hard_level` for hard levels and `hard_levels_size + soft_level` for
/// soft levels.
///
/// # Examples
///
/// ```
/// use u_chainplan::evaluation::BendableScore;
///
/// let mut score = BendableScore::zeros(1, 2);
/// score.add_at_level(0, -5);
/// score.add_at_level(2, -100);
/// assert!(!score.is_feasible());
/// assert_eq!(score.to_string(), "[-5]hard/[0/-100]soft");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BendableScore {
    hard: Vec<i64>,
    soft: Vec<i64>,
}

impl BendableScore {
    /// Creates a zero score with the given level counts.
    pub fn zeros(hard_levels_size: usize, soft_levels_size: usize) -> Self {
        Self {
            hard: vec![0; hard_levels_size],
            soft: vec![0; soft_levels_size],
        }
    }

    /// Creates a score from explicit level weights.
    pub fn from_levels(hard: Vec<i64>, soft: Vec<i64>) -> Self {
        Self { hard, soft }
    }

    /// Number of hard levels.
    pub fn hard_levels_size(&self) -> usize {
        self.hard.len()
    }

    /// Number of soft levels.
    pub fn soft_levels_size(&self) -> usize {
        self.soft.len()
    }

    /// Weight at the given hard level.
    pub fn hard_level(&self, level: usize) -> i64 {
        self.hard[level]
    }

    /// Weight at the given soft level.
    pub fn soft_level(&self, level: usize) -> i64 {
        self.soft[level]
    }

    /// Weight at the given combined score level (hard levels first, then
    /// soft levels).
    ///
    /// # Panics
    ///
    /// Panics if `score_level >= hard_levels_size + soft_levels_size`.
    pub fn level(&self, score_level: usize) -> i64 {
        if score_level < self.hard.len() {
            self.hard[score_level]
        } else {
            self.soft[score_level - self.hard.len()]
        }
    }

    /// Adds a weight at the given combined score level.
    pub fn add_at_level(&mut self, score_level: usize, weight: i64) {
        if score_level < self.hard.len() {
            self.hard[score_level] += weight;
        } else {
            self.soft[score_level - self.hard.len()] += weight;
        }
    }

    /// Returns `true` if no hard level is negative.
    pub fn is_feasible(&self) -> bool {
        self.hard.iter().all(|&w| w >= 0)
    }
}

impl PartialOrd for BendableScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BendableScore {
    /// Lexicographic comparison across hard levels, then soft levels.
    ///
    /// # Panics
    ///
    /// Panics if the two scores have different level counts.
    fn cmp(&self, other: &Self) -> Ordering {
        assert_eq!(self.hard.len(), other.hard.len(), "hard level counts differ");
        assert_eq!(self.soft.len(), other.soft.len(), "soft level counts differ");
        self.hard
            .cmp(&other.hard)
            .then_with(|| self.soft.cmp(&other.soft))
    }
}

impl fmt::Display for BendableScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |levels: &[i64]| {
            levels
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join("/")
        };
        write!(f, "[{}]hard/[{}]soft", join(&self.hard), join(&self.soft))
    }
}
