//! Gas deviation (z) factor correlations.
//!
//! Both correlations are implicit in z and are solved by bisection on a
//! single search variable:
//!
//! - [`dranchuk_abou_kassem`] searches z directly, matching the eleven-constant
//!   equation of state fitted to the Standing-Katz chart.
//! - [`hall_yarborough`] searches the reduced density `y` on `(0, 1)` and
//!   recovers `z = A·Ppr / y`.
//!
//! Inputs are pseudo-reduced conditions; see
//! [`correlations::PseudoCritical`](super::correlations::PseudoCritical).

mod config;
mod error;
mod problem;

pub use config::ZFactorConfig;
pub use error::ZFactorError;

use twine_solvers::equation::bisection;

use problem::{DakModel, HallYarboroughModel, ZeroResidual};

/// Pseudo-reduced gas conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoReduced {
    /// Pseudo-reduced pressure, `P / Ppc`.
    pub pressure: f64,
    /// Pseudo-reduced temperature, `T / Tpc`.
    pub temperature: f64,
}

impl PseudoReduced {
    fn validate(self) -> Result<Self, ZFactorError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.pressure) && valid(self.temperature) {
            Ok(self)
        } else {
            Err(ZFactorError::OutOfDomain { reduced: self })
        }
    }
}

/// Computes z with the Dranchuk-Abou-Kassem equation of state.
///
/// # Errors
///
/// Returns [`ZFactorError`] if the reduced state is non-positive, if the
/// configured bracket does not contain a root, or if bisection fails to
/// converge.
pub fn dranchuk_abou_kassem(
    reduced: PseudoReduced,
    config: ZFactorConfig,
) -> Result<f64, ZFactorError> {
    let reduced = reduced.validate()?;
    let model = DakModel::new(reduced);

    solve(&model, config.z_bracket, config)
}

/// Computes z with the Hall-Yarborough correlation.
///
/// # Errors
///
/// Returns [`ZFactorError`] if the reduced state is non-positive or if
/// bisection fails to converge.
pub fn hall_yarborough(reduced: PseudoReduced, config: ZFactorConfig) -> Result<f64, ZFactorError> {
    let reduced = reduced.validate()?;
    let model = HallYarboroughModel::new(reduced);

    // F(y) < 0 as y -> 0 and F(y) -> +inf as y -> 1.
    solve(&model, [config.density_floor, 1.0 - config.density_floor], config)
}

fn solve<M>(model: &M, bracket: [f64; 2], config: ZFactorConfig) -> Result<f64, ZFactorError>
where
    M: twine_core::Model<Input = f64, Output = problem::Evaluation, Error = std::convert::Infallible>,
{
    let solution = bisection::solve(
        model,
        &ZeroResidual,
        bracket,
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(ZFactorError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output.z)
}
