use thiserror::Error;

use crate::support::constraint::ConstraintError;

use super::Parameter;

/// Errors that can occur while evaluating radial inflow.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DarcyError {
    /// A parameter violates its physical bound.
    #[error("{parameter} is invalid")]
    Invalid {
        parameter: Parameter,
        #[source]
        source: ConstraintError,
    },

    #[error("outer radius {outer} must exceed well radius {well}")]
    RadiusOrder { outer: f64, well: f64 },

    #[error("outer pressure {outer} must exceed bottomhole pressure {bottomhole}")]
    PressureOrder { outer: f64, bottomhole: f64 },

    /// `ln(re/rw) + S ≤ 0`, typically from an unphysically negative skin.
    #[error("geometric term ln(re/rw) + S = {value} is not positive")]
    NonPositiveGeometricTerm { value: f64 },

    /// The rate is too high for the given outer pressure.
    #[error("computed bottomhole pressure {pressure} is negative")]
    NegativeBottomholePressure { pressure: f64 },

    /// The parameter is not part of how the flow is specified.
    #[error("{parameter} conflicts with how the flow is specified")]
    Conflicting { parameter: Parameter },
}
