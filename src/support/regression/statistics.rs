/// Summary statistics over the finite values of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// Number of finite values summarized.
    pub count: usize,
    /// `std / mean`; infinite when the mean is zero.
    pub coefficient_of_variation: f64,
}

impl Statistics {
    /// Summarizes the finite values in `values`.
    ///
    /// Returns `None` if no value is finite.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        finite.sort_by(f64::total_cmp);

        let count = finite.len();
        let n = count as f64;
        let mean = finite.iter().sum::<f64>() / n;
        let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();

        let median = if count % 2 == 1 {
            finite[count / 2]
        } else {
            0.5 * (finite[count / 2 - 1] + finite[count / 2])
        };

        Some(Self {
            mean,
            median,
            std,
            min: finite[0],
            max: finite[count - 1],
            count,
            coefficient_of_variation: if mean == 0.0 { f64::INFINITY } else { std / mean },
        })
    }
}
