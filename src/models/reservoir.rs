//! Reservoir material-balance models.
//!
//! - [`gas_cap`]: Determines the gas-cap ratio `m` that best linearizes the
//!   oil material-balance equation.
//! - [`oil`]: Stock-tank oil initially in place for a known `m`.
//! - [`gas`]: Gas initially in place from the gas material balance and the
//!   P/Z method.

pub mod gas;
pub mod gas_cap;
pub mod oil;

#[cfg(test)]
mod test_support;

use tracing::warn;

use crate::support::regression::Statistics;

/// Per-step in-place estimates over a production history.
#[derive(Debug, Clone, PartialEq)]
pub struct InPlaceEstimates {
    /// One entry per production step; `None` where no estimate was possible.
    pub values: Vec<Option<f64>>,
    /// Statistics over the steps that produced an estimate.
    pub statistics: Statistics,
}

impl InPlaceEstimates {
    /// Collects per-step results, logging and skipping failed steps.
    ///
    /// Returns `None` if no step produced a finite estimate.
    pub(crate) fn collect<E: std::fmt::Display>(
        results: impl IntoIterator<Item = Result<f64, E>>,
    ) -> Option<Self> {
        let values: Vec<Option<f64>> = results
            .into_iter()
            .enumerate()
            .map(|(row, result)| match result {
                Ok(value) => Some(value),
                Err(error) => {
                    warn!(row, %error, "no in-place estimate for production step");
                    None
                }
            })
            .collect();

        let finite: Vec<f64> = values.iter().flatten().copied().collect();
        let statistics = Statistics::from_values(&finite)?;
        Some(Self { values, statistics })
    }
}

/// Fraction of the in-place volume that has been produced.
///
/// Returns zero when `in_place` is not positive.
#[must_use]
pub fn recovery_factor(in_place: f64, produced: f64) -> f64 {
    if in_place > 0.0 {
        produced / in_place
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn estimates_skip_failed_steps() {
        let estimates = InPlaceEstimates::collect([Err("initial"), Ok(10.0), Ok(14.0)]).unwrap();

        assert_eq!(estimates.values, vec![None, Some(10.0), Some(14.0)]);
        assert_eq!(estimates.statistics.count, 2);
        assert_relative_eq!(estimates.statistics.mean, 12.0);
    }

    #[test]
    fn estimates_need_one_success() {
        assert!(InPlaceEstimates::collect([Err::<f64, _>("a"), Err("b")]).is_none());
    }

    #[test]
    fn recovery_factor_fraction() {
        assert_relative_eq!(recovery_factor(1e7, 2.5e6), 0.25);
    }

    #[test]
    fn recovery_factor_without_volume_in_place() {
        assert_eq!(recovery_factor(0.0, 100.0), 0.0);
        assert_eq!(recovery_factor(-5.0, 100.0), 0.0);
    }
}
