use tracing::{debug, warn};

use crate::support::{
    material_balance::ExpansionSeries,
    regression::{FitError, LinearFit, linear_fit},
};

/// Whether a candidate produced a usable fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    Fit(LinearFit),
    /// The fit is undefined for this candidate; the sweep continues.
    NoFit(FitError),
}

/// The regression result for one gas-cap ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateEvaluation {
    pub m: f64,
    pub outcome: FitOutcome,
}

impl CandidateEvaluation {
    /// The fit, if one was produced.
    #[must_use]
    pub fn fit(&self) -> Option<&LinearFit> {
        match &self.outcome {
            FitOutcome::Fit(fit) => Some(fit),
            FitOutcome::NoFit(_) => None,
        }
    }

    #[must_use]
    pub fn r_squared(&self) -> Option<f64> {
        self.fit().map(|fit| fit.r_squared)
    }

    /// Slope of `F` against `Et(m)`, the STOIIP estimate `N` in m³ std.
    #[must_use]
    pub fn stoiip(&self) -> Option<f64> {
        self.fit().map(|fit| fit.slope)
    }

    #[must_use]
    pub fn intercept(&self) -> Option<f64> {
        self.fit().map(|fit| fit.intercept)
    }
}

/// Fits `F` against `Et(m)` over the regression points of `series`.
pub(in crate::models::reservoir::gas_cap) fn fit_candidate(
    series: &ExpansionSeries,
    m: f64,
) -> Result<LinearFit, FitError> {
    let (et, f) = series.regression_input(m);
    linear_fit(&et, &f)
}

/// Evaluates one candidate, recording a failed fit instead of propagating it.
pub(super) fn evaluate(series: &ExpansionSeries, m: f64) -> CandidateEvaluation {
    let outcome = match fit_candidate(series, m) {
        Ok(fit) => {
            debug!(
                m,
                r_squared = fit.r_squared,
                stoiip = fit.slope,
                "evaluated gas-cap candidate"
            );
            FitOutcome::Fit(fit)
        }
        Err(error) => {
            warn!(m, %error, "gas-cap candidate has no fit");
            FitOutcome::NoFit(error)
        }
    };
    CandidateEvaluation { m, outcome }
}
