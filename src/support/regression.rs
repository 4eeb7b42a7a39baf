//! Ordinary least-squares line fitting and summary statistics.

mod error;
mod statistics;

pub use error::FitError;
pub use statistics::Statistics;

/// A first-degree least-squares fit `y ≈ slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, `1 − SS_res / SS_tot`, in `[0, 1]`.
    pub r_squared: f64,
    /// Number of finite `(x, y)` pairs that entered the fit.
    pub points: usize,
}

impl LinearFit {
    /// Fitted value at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Where the fitted line crosses `y = 0`, if it is not horizontal.
    #[must_use]
    pub fn x_intercept(&self) -> Option<f64> {
        (self.slope != 0.0).then(|| -self.intercept / self.slope)
    }
}

/// Fits a straight line through `(x[i], y[i])`.
///
/// Pairs where either coordinate is NaN or infinite are dropped before
/// fitting. Sums are taken about the means to limit cancellation.
///
/// # Errors
///
/// - [`FitError::LengthMismatch`] if `x` and `y` differ in length.
/// - [`FitError::InsufficientData`] if fewer than two finite pairs remain.
/// - [`FitError::ConstantDependent`] if every remaining `y` is identical,
///   which leaves R² undefined.
/// - [`FitError::ConstantIndependent`] if every remaining `x` is identical,
///   which leaves the slope undefined.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LinearFit, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .unzip();

    let n = xs.len();
    if n < 2 {
        return Err(FitError::InsufficientData { valid: n });
    }
    if ys.iter().all(|&v| v == ys[0]) {
        return Err(FitError::ConstantDependent { value: ys[0] });
    }
    if xs.iter().all(|&v| v == xs[0]) {
        return Err(FitError::ConstantIndependent { value: xs[0] });
    }

    let count = n as f64;
    let x_mean = xs.iter().sum::<f64>() / count;
    let y_mean = ys.iter().sum::<f64>() / count;

    let (sxx, sxy, ss_tot) = xs.iter().zip(&ys).fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), (x, y)| {
        let dx = x - x_mean;
        let dy = y - y_mean;
        (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
    });

    if ss_tot == 0.0 {
        return Err(FitError::ConstantDependent { value: y_mean });
    }
    if sxx == 0.0 {
        return Err(FitError::ConstantIndependent { value: x_mean });
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let ss_res: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| {
            let r = y - (slope * x + intercept);
            r * r
        })
        .sum();

    Ok(LinearFit {
        slope,
        intercept,
        r_squared: (1.0 - ss_res / ss_tot).clamp(0.0, 1.0),
        points: n,
    })
}
