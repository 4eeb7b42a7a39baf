use tracing::debug;

use crate::support::units::UnitSystem;

use super::{Property, PvtError, PvtProperties, PvtProvider};

/// How a [`PvtTable`] answers queries outside its pressure range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extrapolation {
    /// Out-of-range queries fail with [`PvtError::OutOfRange`].
    #[default]
    Forbid,
    /// Out-of-range queries return the nearest endpoint row.
    Clamp,
    /// Out-of-range queries extend the nearest end segment linearly.
    Linear,
}

/// Tabulated PVT data with piecewise-linear interpolation in pressure.
///
/// Rows are stored in ascending pressure order in canonical metric units,
/// regardless of the order and unit system they were supplied in.
/// A query at a tabulated pressure returns that row's values exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct PvtTable {
    pressure: Vec<f64>,
    columns: [Option<Vec<f64>>; Property::ALL.len()],
    extrapolation: Extrapolation,
}

/// Builder for [`PvtTable`].
#[derive(Debug, Clone)]
pub struct PvtTableBuilder {
    units: UnitSystem,
    pressure: Vec<f64>,
    columns: [Option<Vec<f64>>; Property::ALL.len()],
    extrapolation: Extrapolation,
}

impl PvtTable {
    /// Starts a table with the given pressure column in `units`.
    #[must_use]
    pub fn builder(units: UnitSystem, pressure: Vec<f64>) -> PvtTableBuilder {
        PvtTableBuilder {
            units,
            pressure,
            columns: Default::default(),
            extrapolation: Extrapolation::default(),
        }
    }

    /// Lowest and highest tabulated pressures, kgf/cm².
    #[must_use]
    pub fn pressure_range(&self) -> (f64, f64) {
        // Construction guarantees at least two ascending rows.
        (self.pressure[0], self.pressure[self.pressure.len() - 1])
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    /// Always `false`; a table has at least two rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Whether the table carries `property`.
    #[must_use]
    pub fn has(&self, property: Property) -> bool {
        self.columns[property.index()].is_some()
    }

    /// Interpolates a single property at `pressure`.
    ///
    /// # Errors
    ///
    /// Fails if the property is absent or the pressure is out of range.
    pub fn value_at(&self, property: Property, pressure: f64) -> Result<f64, PvtError> {
        let column = self.columns[property.index()]
            .as_deref()
            .ok_or(PvtError::MissingProperty { property })?;
        let position = self.locate(pressure)?;
        Ok(position.apply(column))
    }

    /// Resolves where `pressure` falls in the table.
    fn locate(&self, pressure: f64) -> Result<Position, PvtError> {
        if !pressure.is_finite() {
            return Err(PvtError::InvalidPressure { pressure });
        }

        let (min, max) = self.pressure_range();
        let n = self.pressure.len();

        if pressure < min || pressure > max {
            match self.extrapolation {
                Extrapolation::Forbid => {
                    return Err(PvtError::OutOfRange { pressure, min, max });
                }
                Extrapolation::Clamp => {
                    let row = if pressure < min { 0 } else { n - 1 };
                    return Ok(Position::Row(row));
                }
                Extrapolation::Linear => {
                    debug!(pressure, min, max, "extrapolating PVT table");
                    let lower = if pressure < min { 0 } else { n - 2 };
                    return Ok(self.segment(lower, pressure));
                }
            }
        }

        // `min ≤ pressure ≤ max`, so `upper` lands on a row or has a row below it.
        let upper = self.pressure.partition_point(|&p| p < pressure);
        if self.pressure.get(upper) == Some(&pressure) || upper == 0 {
            return Ok(Position::Row(upper));
        }
        Ok(self.segment(upper - 1, pressure))
    }

    fn segment(&self, lower: usize, pressure: f64) -> Position {
        let p0 = self.pressure[lower];
        let p1 = self.pressure[lower + 1];
        Position::Between {
            lower,
            fraction: (pressure - p0) / (p1 - p0),
        }
    }
}

impl PvtProvider for PvtTable {
    fn properties_at(&self, pressure: f64) -> Result<PvtProperties, PvtError> {
        let position = self.locate(pressure)?;

        let props = Property::ALL
            .iter()
            .filter_map(|&property| {
                self.columns[property.index()]
                    .as_deref()
                    .map(|column| (property, position.apply(column)))
            })
            .fold(PvtProperties::new(pressure), |props, (property, value)| {
                props.with(property, value)
            });

        Ok(props)
    }
}

#[derive(Debug, Clone, Copy)]
enum Position {
    Row(usize),
    Between { lower: usize, fraction: f64 },
}

impl Position {
    fn apply(self, column: &[f64]) -> f64 {
        match self {
            Position::Row(row) => column[row],
            Position::Between { lower, fraction } => {
                let y0 = column[lower];
                let y1 = column[lower + 1];
                y0 + fraction * (y1 - y0)
            }
        }
    }
}

impl PvtTableBuilder {
    /// Adds or replaces a property column, in the builder's unit system.
    #[must_use]
    pub fn with(mut self, property: Property, values: Vec<f64>) -> Self {
        self.columns[property.index()] = Some(values);
        self
    }

    /// Sets the out-of-range policy.
    #[must_use]
    pub fn extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Validates the columns, converts them to metric, and builds the table.
    ///
    /// # Errors
    ///
    /// Fails if there are fewer than two rows, if pressures are not strictly
    /// monotonic, if a column length differs from the pressure column, or if
    /// any value is not finite.
    pub fn build(self) -> Result<PvtTable, PvtError> {
        let Self {
            units,
            pressure,
            mut columns,
            extrapolation,
        } = self;

        let rows = pressure.len();
        if rows < 2 {
            return Err(PvtError::TooFewRows { rows });
        }
        if let Some(row) = pressure.iter().position(|p| !p.is_finite()) {
            return Err(PvtError::NonFinite {
                property: None,
                row,
            });
        }

        let ascending = pressure[1] > pressure[0];
        let monotonic = |w: &[f64]| if ascending { w[1] > w[0] } else { w[1] < w[0] };
        if let Some(i) = pressure.windows(2).position(|w| !monotonic(w)) {
            return Err(PvtError::NonMonotonicPressure { row: i + 1 });
        }

        let mut pressure: Vec<f64> = pressure
            .into_iter()
            .map(|p| units.pressure_to_metric(p))
            .collect();
        if !ascending {
            pressure.reverse();
        }

        for property in Property::ALL {
            let Some(values) = columns[property.index()].as_mut() else {
                continue;
            };
            if values.len() != rows {
                return Err(PvtError::LengthMismatch {
                    property,
                    expected: rows,
                    found: values.len(),
                });
            }
            if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                return Err(PvtError::NonFinite {
                    property: Some(property),
                    row,
                });
            }
            for value in values.iter_mut() {
                *value = to_metric(units, property, *value);
            }
            if !ascending {
                values.reverse();
            }
        }

        debug!(rows, ?extrapolation, "built PVT table");

        Ok(PvtTable {
            pressure,
            columns,
            extrapolation,
        })
    }
}

fn to_metric(units: UnitSystem, property: Property, value: f64) -> f64 {
    match property {
        Property::Bo | Property::Bw | Property::Z => value,
        Property::Rs => units.rs_to_metric(value),
        Property::Bg => units.bg_to_metric(value),
        Property::Cw | Property::Cf | Property::Co | Property::Cg => {
            units.compressibility_to_metric(value)
        }
    }
}
