use thiserror::Error;

/// Reasons a line cannot be fitted.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FitError {
    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },

    /// Fewer than two finite `(x, y)` pairs.
    #[error("need at least 2 finite points, got {valid}")]
    InsufficientData { valid: usize },

    /// Every `y` is identical, so `SS_tot = 0` and R² is undefined.
    #[error("dependent values are all {value}; R² is undefined")]
    ConstantDependent { value: f64 },

    /// Every `x` is identical, so the slope is undefined.
    #[error("independent values are all {value}; slope is undefined")]
    ConstantIndependent { value: f64 },
}
