//! Cumulative production history.
//!
//! A [`ProductionHistory`] is an ordered, validated sequence of
//! [`ProductionStep`]s in canonical units. Validation happens once at
//! construction:
//!
//! - every column has the same, non-zero length
//! - every value is finite and non-negative
//! - time and the cumulative volumes (Np, Gp, Wp, We) never decrease
//!
//! Pressure may move in either direction.

mod error;

pub use error::{Column, ProductionError};

use tracing::debug;

use crate::support::{constraint::NonNegative, units::UnitSystem};

/// One production observation, in canonical units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductionStep {
    /// Elapsed time, days.
    pub time: f64,
    /// Cumulative oil production, m³ std.
    pub np: f64,
    /// Cumulative gas production, m³ std.
    pub gp: f64,
    /// Cumulative water production, m³ std.
    pub wp: f64,
    /// Average reservoir pressure, kgf/cm².
    pub pressure: f64,
    /// Cumulative water influx, reservoir m³.
    pub we: f64,
}

/// Column-oriented production data as supplied by the caller.
///
/// `we` defaults to zero influx when absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionColumns {
    pub time: Vec<f64>,
    pub np: Vec<f64>,
    pub gp: Vec<f64>,
    pub wp: Vec<f64>,
    pub pressure: Vec<f64>,
    pub we: Option<Vec<f64>>,
}

/// A validated, time-ordered production record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionHistory {
    steps: Vec<ProductionStep>,
}

impl ProductionHistory {
    /// Converts `columns` from `units` and validates them.
    ///
    /// # Errors
    ///
    /// Returns [`ProductionError`] naming the first offending column and row.
    pub fn new(units: UnitSystem, columns: ProductionColumns) -> Result<Self, ProductionError> {
        let ProductionColumns {
            time,
            np,
            gp,
            wp,
            pressure,
            we,
        } = columns;

        let rows = time.len();
        let we = we.unwrap_or_else(|| vec![0.0; rows]);

        for (column, values) in [
            (Column::Np, &np),
            (Column::Gp, &gp),
            (Column::Wp, &wp),
            (Column::Pressure, &pressure),
            (Column::We, &we),
        ] {
            if values.len() != rows {
                return Err(ProductionError::LengthMismatch {
                    column,
                    expected: rows,
                    found: values.len(),
                });
            }
        }

        let steps = (0..rows)
            .map(|i| ProductionStep {
                time: time[i],
                np: units.oil_volume_to_metric(np[i]),
                gp: units.gas_volume_to_metric(gp[i]),
                wp: units.oil_volume_to_metric(wp[i]),
                pressure: units.pressure_to_metric(pressure[i]),
                we: units.reservoir_volume_to_metric(we[i]),
            })
            .collect();

        Self::from_steps(steps)
    }

    /// Validates steps already expressed in canonical units.
    ///
    /// # Errors
    ///
    /// Returns [`ProductionError`] naming the first offending column and row.
    pub fn from_steps(steps: Vec<ProductionStep>) -> Result<Self, ProductionError> {
        if steps.is_empty() {
            return Err(ProductionError::Empty);
        }

        for (row, step) in steps.iter().enumerate() {
            for column in Column::ALL {
                let value = column.of(step);
                if !value.is_finite() {
                    return Err(ProductionError::NonFinite { column, row });
                }
                NonNegative::new(value)
                    .map_err(|_| ProductionError::Negative { column, row, value })?;
            }
        }

        for (i, pair) in steps.windows(2).enumerate() {
            for column in Column::CUMULATIVE {
                if column.of(&pair[1]) < column.of(&pair[0]) {
                    return Err(ProductionError::Decreasing { column, row: i + 1 });
                }
            }
        }

        debug!(steps = steps.len(), "validated production history");
        Ok(Self { steps })
    }

    /// Replaces water influx with `We = C·(Pi − P)·√t` at every step.
    ///
    /// `constant` is in reservoir m³ per (kgf/cm²)·√day.
    ///
    /// # Errors
    ///
    /// Fails if the resulting influx series is negative, non-finite, or
    /// decreasing, which happens when pressure rises above `initial_pressure`.
    pub fn with_simple_aquifer(
        self,
        constant: f64,
        initial_pressure: f64,
    ) -> Result<Self, ProductionError> {
        let steps = self
            .steps
            .into_iter()
            .map(|step| ProductionStep {
                we: simple_aquifer_influx(constant, initial_pressure - step.pressure, step.time),
                ..step
            })
            .collect();
        Self::from_steps(steps)
    }

    /// The validated steps, in time order.
    #[must_use]
    pub fn steps(&self) -> &[ProductionStep] {
        &self.steps
    }

    /// The first (initial-condition) step.
    #[must_use]
    pub fn initial(&self) -> &ProductionStep {
        &self.steps[0]
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; a history has at least one step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates the steps in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProductionStep> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a ProductionHistory {
    type Item = &'a ProductionStep;
    type IntoIter = std::slice::Iter<'a, ProductionStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cumulative water influx from a square-root-of-time aquifer, `C·ΔP·√t`.
#[must_use]
pub fn simple_aquifer_influx(constant: f64, pressure_drop: f64, time: f64) -> f64 {
    constant * pressure_drop * time.sqrt()
}
