use thiserror::Error;
use twine_solvers::equation::bisection;

use super::PseudoReduced;

/// Errors that can occur while solving for a z-factor.
#[derive(Debug, Error)]
pub enum ZFactorError {
    /// Reduced pressure and temperature must be finite and positive.
    #[error("pseudo-reduced state out of domain: {reduced:?}")]
    OutOfDomain { reduced: PseudoReduced },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual}")]
    MaxIters {
        /// Best correlation residual achieved.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
