use thiserror::Error;

use crate::support::{
    constraint::ConstraintError,
    pvt::{Property, PvtError},
};

/// Errors that can occur while computing expansion terms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpansionError {
    /// PVT properties could not be resolved for a production step.
    #[error("PVT lookup failed at production row {row}")]
    Pvt {
        row: usize,
        #[source]
        source: PvtError,
    },

    /// PVT properties could not be resolved at the initial pressure.
    #[error("PVT lookup failed at initial pressure")]
    InitialPvt(#[from] PvtError),

    /// An initial property violates its physical bound.
    #[error("initial {property} is invalid")]
    InitialState {
        property: Property,
        #[source]
        source: ConstraintError,
    },
}
