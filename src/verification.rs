//! Aggregate constraint-weight assertions for tests.

use crate::evaluation::ConstraintWeightTotal;

/// Asserts aggregated constraint weights against expectations, per score
/// level of a bendable score.
///
/// A test-side utility: it reads only the constraint totals an evaluation
/// produced, never the chain internals. Lookups are keyed by constraint
/// name, combined score level, and optionally a constraint package; the
/// combined level for a soft assertion is `hard_levels_size + soft_level`.
/// A constraint absent from the totals counts as weight 0.
///
/// # Examples
///
/// ```
/// use u_chainplan::evaluation::ConstraintWeightTotal;
/// use u_chainplan::verification::ScoreVerifier;
///
/// let totals = vec![ConstraintWeightTotal::new(None, "vehicleCapacity", 0, -5)];
/// let verifier = ScoreVerifier::new(1);
/// verifier.assert_hard(None, "vehicleCapacity", 0, -5, &totals);
/// verifier.assert_soft(None, "unmatchedConstraint", 0, 0, &totals);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScoreVerifier {
    hard_levels_size: usize,
}

impl ScoreVerifier {
    /// Creates a verifier for scores with the given number of hard levels.
    pub fn new(hard_levels_size: usize) -> Self {
        Self { hard_levels_size }
    }

    /// Number of hard levels this verifier maps soft assertions past.
    pub fn hard_levels_size(&self) -> usize {
        self.hard_levels_size
    }

    /// Asserts the total weight of a constraint at a hard level.
    ///
    /// # Panics
    ///
    /// Panics if `hard_level >= hard_levels_size`, if the actual weight
    /// differs from `expected_weight`, or if `constraint_package` is `None`
    /// and the name is ambiguous at that level.
    pub fn assert_hard(
        &self,
        constraint_package: Option<&str>,
        constraint_name: &str,
        hard_level: usize,
        expected_weight: i64,
        totals: &[ConstraintWeightTotal],
    ) {
        assert!(
            hard_level < self.hard_levels_size,
            "hard level {hard_level} out of range for {} hard levels",
            self.hard_levels_size
        );
        self.assert_weight(
            constraint_package,
            constraint_name,
            hard_level,
            expected_weight,
            totals,
        );
    }

    /// Asserts the total weight of a constraint at a soft level.
    ///
    /// # Panics
    ///
    /// Panics if the actual weight differs from `expected_weight`, or if
    /// `constraint_package` is `None` and the name is ambiguous at that
    /// level.
    pub fn assert_soft(
        &self,
        constraint_package: Option<&str>,
        constraint_name: &str,
        soft_level: usize,
        expected_weight: i64,
        totals: &[ConstraintWeightTotal],
    ) {
        self.assert_weight(
            constraint_package,
            constraint_name,
            self.hard_levels_size + soft_level,
            expected_weight,
            totals,
        );
    }

    fn assert_weight(
        &self,
        constraint_package: Option<&str>,
        constraint_name: &str,
        score_level: usize,
        expected_weight: i64,
        totals: &[ConstraintWeightTotal],
    ) {
        let matches: Vec<&ConstraintWeightTotal> = totals
            .iter()
            .filter(|t| {
                t.constraint_name() == constraint_name
                    && t.score_level() == score_level
                    && constraint_package
                        .is_none_or(|p| t.constraint_package() == Some(p))
            })
            .collect();
        if constraint_package.is_none() && matches.len() > 1 {
            panic!(
                "constraint ({constraint_name}) is not unique at score level ({score_level}); \
                 pass a constraint package"
            );
        }
        let actual = matches.first().map(|t| t.weight()).unwrap_or(0);
        assert_eq!(
            actual, expected_weight,
            "constraint ({constraint_name}) at score level ({score_level}): \
             expected weight ({expected_weight}) but was ({actual})"
        );
    }
}
