use std::cmp::Ordering;

use super::CandidateError;

/// A non-empty, strictly monotonic set of distinct, finite gas-cap ratios.
///
/// Values outside the conventional `[0, 1]` band are accepted; physical
/// plausibility is left to the caller. Evaluation order follows the order
/// given.
#[derive(Debug, Clone, PartialEq)]
pub struct GasCapCandidates(Vec<f64>);

impl GasCapCandidates {
    /// Validates a candidate sequence.
    ///
    /// Either strictly increasing or strictly decreasing order is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError`] if the sequence is empty, contains a
    /// non-finite value, repeats a value, or changes direction.
    pub fn new(values: Vec<f64>) -> Result<Self, CandidateError> {
        if values.is_empty() {
            return Err(CandidateError::Empty);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CandidateError::NonFinite { index, value });
        }

        let mut direction = Ordering::Equal;
        for (i, pair) in values.windows(2).enumerate() {
            let index = i + 1;
            // Finite values always compare.
            let step = pair[1].partial_cmp(&pair[0]).unwrap_or(Ordering::Equal);
            match (step, direction) {
                (Ordering::Equal, _) => {
                    return Err(CandidateError::Duplicate {
                        index,
                        value: pair[1],
                    });
                }
                (step, Ordering::Equal) => direction = step,
                (step, expected) if step != expected => {
                    return Err(CandidateError::NotMonotonic { index });
                }
                _ => {}
            }
        }

        Ok(Self(values))
    }

    /// The candidates in evaluation order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a candidate set is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the candidates in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }
}

impl Default for GasCapCandidates {
    /// The grid described by [`CandidateRange::DEFAULT`].
    fn default() -> Self {
        CandidateRange::DEFAULT
            .candidates()
            .expect("default candidate range is valid")
    }
}

impl TryFrom<Vec<f64>> for GasCapCandidates {
    type Error = CandidateError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl<'a> IntoIterator for &'a GasCapCandidates {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An inclusive, evenly spaced grid of gas-cap ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl CandidateRange {
    /// `0.0..=1.0` in steps of `0.01`.
    pub const DEFAULT: Self = Self {
        start: 0.0,
        end: 1.0,
        step: 0.01,
    };

    /// Slack on the step count so an `end` that is a whole number of steps
    /// away survives rounding.
    const COUNT_EPSILON: f64 = 1e-9;

    /// Largest grid [`candidates`](Self::candidates) will expand.
    pub const MAX_CANDIDATES: usize = 1_000_000;

    #[must_use]
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Expands the grid into a validated candidate set.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError::InvalidRange`] unless all bounds are finite,
    /// `step > 0`, and `end >= start`, or [`CandidateError::TooMany`] if the
    /// grid would exceed [`Self::MAX_CANDIDATES`] points.
    pub fn candidates(&self) -> Result<GasCapCandidates, CandidateError> {
        let valid = [self.start, self.end, self.step].iter().all(|v| v.is_finite())
            && self.step > 0.0
            && self.end >= self.start;
        if !valid {
            return Err(CandidateError::InvalidRange { range: *self });
        }
        let count = self.count()?;
        GasCapCandidates::new(
            (0..count)
                .map(|i| self.start + i as f64 * self.step)
                .collect(),
        )
    }

    fn count(&self) -> Result<usize, CandidateError> {
        let count = ((self.end - self.start) / self.step + Self::COUNT_EPSILON).floor() + 1.0;
        #[allow(clippy::cast_precision_loss)]
        let limit = Self::MAX_CANDIDATES as f64;
        if count > limit {
            return Err(CandidateError::TooMany { count });
        }
        // `1 ≤ count ≤ MAX_CANDIDATES`, so the cast is exact.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(count as usize)
    }
}

impl Default for CandidateRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::reservoir::gas_cap::GasCapError;

    #[test]
    fn accepts_either_direction() {
        assert!(GasCapCandidates::new(vec![0.1, 0.2, 0.5]).is_ok());
        assert!(GasCapCandidates::new(vec![0.5, 0.2, -0.1]).is_ok());
        assert!(GasCapCandidates::new(vec![3.0]).is_ok());
    }

    #[test]
    fn rejects_invalid_sequences() {
        assert_eq!(GasCapCandidates::new(vec![]), Err(CandidateError::Empty));
        assert_eq!(
            GasCapCandidates::new(vec![0.1, f64::INFINITY]),
            Err(CandidateError::NonFinite {
                index: 1,
                value: f64::INFINITY
            })
        );
        assert_eq!(
            GasCapCandidates::new(vec![0.1, 0.2, 0.2]),
            Err(CandidateError::Duplicate {
                index: 2,
                value: 0.2
            })
        );
        assert_eq!(
            GasCapCandidates::new(vec![0.1, 0.3, 0.2]),
            Err(CandidateError::NotMonotonic { index: 2 })
        );
    }

    #[test]
    fn nan_is_rejected() {
        assert!(matches!(
            GasCapCandidates::new(vec![0.1, f64::NAN]),
            Err(CandidateError::NonFinite { index: 1, .. })
        ));
    }

    #[test]
    fn default_grid() {
        let candidates = GasCapCandidates::default();
        assert_eq!(candidates.len(), 101);
        assert_eq!(candidates.as_slice()[0], 0.0);
        assert_relative_eq!(candidates.as_slice()[100], 1.0, epsilon = 1e-12);
        assert_eq!(candidates, CandidateRange::default().candidates().unwrap());
    }

    #[test]
    fn range_includes_end() {
        let candidates = CandidateRange::new(0.1, 0.9, 0.1).candidates().unwrap();
        assert_eq!(candidates.len(), 9);
        assert_relative_eq!(candidates.as_slice()[8], 0.9, epsilon = 1e-12);

        let single = CandidateRange::new(0.5, 0.5, 0.1).candidates().unwrap();
        assert_eq!(single.as_slice(), &[0.5]);
    }

    #[test]
    fn rejects_invalid_range() {
        for range in [
            CandidateRange::new(0.0, 1.0, 0.0),
            CandidateRange::new(1.0, 0.0, 0.1),
            CandidateRange::new(0.0, f64::NAN, 0.1),
        ] {
            assert!(matches!(
                range.candidates(),
                Err(CandidateError::InvalidRange { .. })
            ));
        }
    }

    #[test]
    fn oversized_grid_is_rejected() {
        for step in [1e-300, 1e-12, f64::MIN_POSITIVE] {
            assert!(matches!(
                CandidateRange::new(0.0, 1.0, step).candidates(),
                Err(CandidateError::TooMany { .. })
            ));
        }

        let at_limit = CandidateRange::new(0.0, 1.0, 1.0 / 999_999.0)
            .candidates()
            .unwrap();
        assert_eq!(at_limit.len(), CandidateRange::MAX_CANDIDATES);
    }

    #[test]
    fn range_errors_convert_to_gas_cap_errors() {
        fn grid(range: CandidateRange) -> Result<usize, GasCapError> {
            Ok(range.candidates()?.len())
        }

        assert_eq!(grid(CandidateRange::DEFAULT), Ok(101));
        assert!(matches!(
            grid(CandidateRange::new(1.0, 0.0, 0.1)),
            Err(GasCapError::Candidates(CandidateError::InvalidRange { .. }))
        ));
    }
}
