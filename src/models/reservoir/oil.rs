//! Oil reservoir material balance for a known gas-cap ratio.
//!
//! With `m` known, the general material-balance equation gives the
//! stock-tank oil initially in place directly at every production step:
//!
//! ```text
//! N = F / (Eo + m·Eg + Efw(m))
//! ```
//!
//! The straight-line form fits `F` against `Et` over the history instead;
//! the slope is `N`.

use thiserror::Error;
use twine_core::Model;

use crate::support::{
    material_balance::{
        ExpansionConfig, ExpansionError, ExpansionPoint, ExpansionSeries, InitialState,
    },
    production::{ProductionHistory, ProductionStep},
    pvt::{PvtError, PvtProvider},
    regression::{FitError, LinearFit, linear_fit},
};

use super::InPlaceEstimates;

/// Errors from oil material-balance calculations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OilReservoirError {
    #[error("PVT lookup failed")]
    Pvt(#[from] PvtError),

    #[error("expansion terms could not be computed")]
    Expansion(#[from] ExpansionError),

    /// `Et ≤ 0`; the step has no net expansion to attribute withdrawal to.
    #[error("total expansion {total_expansion} at {pressure} kgf/cm² is not positive")]
    NonPositiveExpansion { pressure: f64, total_expansion: f64 },

    /// No production step produced an estimate.
    #[error("no valid STOIIP estimate among {steps} production steps")]
    NoValidEstimate { steps: usize },

    #[error("material-balance line fit failed")]
    Fit(#[from] FitError),
}

/// An oil reservoir with a known gas-cap ratio.
#[derive(Debug, Clone)]
pub struct OilReservoir<P> {
    pvt: P,
    initial: InitialState,
    m: f64,
    config: ExpansionConfig,
}

impl<P: PvtProvider> OilReservoir<P> {
    /// Creates a reservoir model with the default [`ExpansionConfig`].
    ///
    /// Use `m = 0` for a reservoir without a gas cap.
    pub fn new(pvt: P, initial: InitialState, m: f64) -> Self {
        Self {
            pvt,
            initial,
            m,
            config: ExpansionConfig::default(),
        }
    }

    /// Replaces the expansion configuration.
    #[must_use]
    pub fn with_config(mut self, config: ExpansionConfig) -> Self {
        self.config = config;
        self
    }

    /// STOIIP, m³ std, implied by a single production step.
    ///
    /// # Errors
    ///
    /// Fails if PVT properties cannot be resolved or if the total expansion
    /// at the step is not positive.
    pub fn stoiip(&self, step: &ProductionStep) -> Result<f64, OilReservoirError> {
        let point = ExpansionPoint::evaluate(step, &self.pvt, &self.initial, &self.config)?;
        let total_expansion = point.total_expansion(self.m);

        if total_expansion <= 0.0 {
            return Err(OilReservoirError::NonPositiveExpansion {
                pressure: step.pressure,
                total_expansion,
            });
        }
        Ok(point.f / total_expansion)
    }

    /// STOIIP estimates for every step, with statistics over the valid ones.
    ///
    /// Steps that cannot be evaluated (including the initial record, where
    /// `Et = 0`) are logged and left as gaps.
    ///
    /// # Errors
    ///
    /// Returns [`OilReservoirError::NoValidEstimate`] if every step fails.
    pub fn stoiip_history(
        &self,
        history: &ProductionHistory,
    ) -> Result<InPlaceEstimates, OilReservoirError> {
        InPlaceEstimates::collect(history.iter().map(|step| self.stoiip(step))).ok_or(
            OilReservoirError::NoValidEstimate {
                steps: history.len(),
            },
        )
    }

    /// Fits `F` against `Et(m)` over every step after the initial record.
    ///
    /// The slope is the STOIIP estimate.
    ///
    /// # Errors
    ///
    /// Fails if expansion terms cannot be computed or the fit is undefined.
    pub fn material_balance_fit(
        &self,
        history: &ProductionHistory,
    ) -> Result<LinearFit, OilReservoirError> {
        let series = ExpansionSeries::compute(history, &self.pvt, &self.initial, &self.config)?;
        let (et, f) = series.regression_input(self.m);
        Ok(linear_fit(&et, &f)?)
    }
}

impl<P: PvtProvider> Model for OilReservoir<P> {
    type Input = ProductionStep;
    type Output = f64;
    type Error = OilReservoirError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.stoiip(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::reservoir::{
        recovery_factor,
        test_support::{RISING_BG, field_case, synthetic_case},
    };

    #[test]
    fn recovers_stoiip_at_every_step() {
        let case = synthetic_case(1e7, 0.4, &RISING_BG, true);
        let reservoir = OilReservoir::new(&case.pvt, case.initial, 0.4);

        for step in &case.history.steps()[1..] {
            assert_relative_eq!(reservoir.call(step).unwrap(), 1e7, max_relative = 1e-9);
        }
    }

    #[test]
    fn history_skips_initial_record() {
        let case = synthetic_case(1e7, 0.4, &RISING_BG, true);
        let reservoir = OilReservoir::new(&case.pvt, case.initial, 0.4);

        let estimates = reservoir.stoiip_history(&case.history).unwrap();

        assert_eq!(estimates.values[0], None);
        assert_eq!(estimates.statistics.count, 5);
        assert_relative_eq!(estimates.statistics.mean, 1e7, max_relative = 1e-9);
        assert!(estimates.statistics.coefficient_of_variation < 1e-9);

        let produced = case.history.steps()[5].np;
        assert_relative_eq!(
            recovery_factor(estimates.statistics.mean, produced),
            0.01,
            max_relative = 1e-9
        );
    }

    #[test]
    fn initial_record_has_no_expansion() {
        let case = field_case();
        let reservoir = OilReservoir::new(&case.pvt, case.initial, 0.0);

        let err = reservoir.stoiip(case.history.initial()).unwrap_err();

        assert_eq!(
            err,
            OilReservoirError::NonPositiveExpansion {
                pressure: 250.0,
                total_expansion: 0.0
            }
        );
    }

    #[test]
    fn fit_slope_is_stoiip() {
        let case = synthetic_case(3e7, 0.25, &RISING_BG, true);
        let reservoir = OilReservoir::new(&case.pvt, case.initial, 0.25);

        let fit = reservoir.material_balance_fit(&case.history).unwrap();

        assert_relative_eq!(fit.slope, 3e7, max_relative = 1e-9);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn disabling_water_expansion_changes_estimate() {
        let case = synthetic_case(1e7, 0.4, &RISING_BG, true);
        let reservoir = OilReservoir::new(&case.pvt, case.initial, 0.4).with_config(
            ExpansionConfig {
                include_formation_water: false,
                ..ExpansionConfig::default()
            },
        );

        let n = reservoir.stoiip(&case.history.steps()[3]).unwrap();
        assert!(n > 1e7);
    }
}
