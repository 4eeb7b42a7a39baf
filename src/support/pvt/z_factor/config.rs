use twine_solvers::equation::bisection;

/// Solver configuration for z-factor correlations.
#[derive(Debug, Clone, Copy)]
pub struct ZFactorConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the search variable.
    pub tol: f64,

    /// Absolute tolerance on the correlation residual.
    pub residual_tol: f64,

    /// Search bracket for z in the Dranchuk-Abou-Kassem solve.
    pub z_bracket: [f64; 2],

    /// Distance kept from the singular endpoints of the Hall-Yarborough
    /// reduced-density interval `(0, 1)`.
    pub density_floor: f64,
}

impl Default for ZFactorConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            tol: 1e-12,
            residual_tol: 1e-12,
            z_bracket: [0.05, 3.0],
            density_floor: 1e-9,
        }
    }
}

impl ZFactorConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.tol,
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol,
        }
    }
}
