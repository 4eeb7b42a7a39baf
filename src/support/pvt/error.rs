use thiserror::Error;

use super::Property;

/// Errors raised while building or querying PVT data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PvtError {
    /// The requested pressure lies outside the table and extrapolation is disabled.
    #[error("pressure {pressure} outside PVT table range [{min}, {max}]")]
    OutOfRange { pressure: f64, min: f64, max: f64 },

    /// The requested pressure is not a finite number.
    #[error("pressure {pressure} is not finite")]
    InvalidPressure { pressure: f64 },

    /// A consumer needs a property the provider does not carry.
    #[error("PVT property {property} is not available")]
    MissingProperty { property: Property },

    /// A table needs at least two rows to interpolate.
    #[error("PVT table needs at least 2 rows, got {rows}")]
    TooFewRows { rows: usize },

    /// Table pressures must be strictly increasing or strictly decreasing.
    #[error("PVT table pressures are not strictly monotonic at row {row}")]
    NonMonotonicPressure { row: usize },

    /// A property column does not have one value per pressure row.
    #[error("PVT column {property} has {found} values, expected {expected}")]
    LengthMismatch {
        property: Property,
        expected: usize,
        found: usize,
    },

    /// A table value is NaN or infinite.
    ///
    /// `property` is `None` for the pressure column.
    #[error("non-finite PVT value at row {row} (column {property:?})")]
    NonFinite {
        property: Option<Property>,
        row: usize,
    },
}
