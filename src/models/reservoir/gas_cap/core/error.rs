use thiserror::Error;

use crate::support::material_balance::{ExpansionError, ReservoirType};

use super::CandidateRange;

/// Reasons a gas-cap candidate set is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CandidateError {
    #[error("candidate set is empty")]
    Empty,

    #[error("candidate {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },

    #[error("candidate {index} repeats {value}")]
    Duplicate { index: usize, value: f64 },

    /// The sequence changes direction at `index`.
    #[error("candidates are not monotonic at index {index}")]
    NotMonotonic { index: usize },

    #[error("invalid candidate range {range:?}")]
    InvalidRange { range: CandidateRange },

    /// The range expands to more than [`CandidateRange::MAX_CANDIDATES`] points.
    #[error("candidate range expands to {count} points, limit is {}", CandidateRange::MAX_CANDIDATES)]
    TooMany { count: f64 },
}

/// Errors that abort a gas-cap sweep or selection.
///
/// Failures of individual candidates are not errors; they are recorded in
/// the sweep as [`FitOutcome::NoFit`](super::FitOutcome::NoFit).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GasCapError {
    /// Lets callers that build candidates and sweep in one function use `?`
    /// on both; the sweep itself only accepts already validated candidates.
    #[error(transparent)]
    Candidates(#[from] CandidateError),

    #[error("expansion terms could not be computed")]
    Expansion(#[from] ExpansionError),

    /// Gas-cap sizing applies to oil reservoirs only.
    #[error("gas-cap sizing requires an oil reservoir, got {reservoir_type:?}")]
    UnsupportedReservoir { reservoir_type: ReservoirType },

    /// Fewer than two finite production steps remain after the initial record.
    #[error("production history has {usable} usable points after the initial record, need 2")]
    InsufficientProduction { usable: usize },

    /// No candidate produced a valid fit.
    #[error("all {candidates} gas-cap candidates failed to fit")]
    AllCandidatesInvalid { candidates: usize },
}
