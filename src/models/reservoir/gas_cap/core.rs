//! Sweep and selection logic behind the gas-cap model.

mod candidates;
mod error;
mod evaluation;
mod select;
mod sweep;

pub use candidates::{CandidateRange, GasCapCandidates};
pub use error::{CandidateError, GasCapError};
pub use evaluation::{CandidateEvaluation, FitOutcome};
pub use select::{OptimalResult, determine_optimal_m, select_optimal};
pub use sweep::{SweepConfig, SweepResult, sweep_gas_cap};

pub(super) use evaluation::fit_candidate;
pub(super) use sweep::expansion_series;
