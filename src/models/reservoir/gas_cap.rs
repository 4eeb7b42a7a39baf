//! Gas-cap size determination.
//!
//! For an oil reservoir with an initial gas cap of unknown size, the
//! material-balance relation `F = N·(Eo + m·Eg + Efw(m))` is a straight line
//! through the origin only for the correct gas-cap ratio `m`. This module
//! sweeps candidate ratios, fits `F` against the total expansion `Et(m)` for
//! each, and selects the candidate whose fit has the highest R².
//!
//! # Workflow
//!
//! 1. [`ExpansionSeries`](crate::support::material_balance::ExpansionSeries)
//!    resolves the expansion terms once per production step.
//! 2. [`sweep_gas_cap`] evaluates every candidate in a [`GasCapCandidates`]
//!    set. Candidates whose fit is undefined are recorded as
//!    [`FitOutcome::NoFit`] rather than aborting the sweep.
//! 3. [`select_optimal`] picks the best candidate; [`determine_optimal_m`]
//!    runs both steps.
//!
//! The first production record is the initial condition and never enters
//! the regression.
//!
//! Ties within [`SweepConfig::tie_tolerance`] of the best R² resolve to the
//! smallest `m`.
//!
//! # Example
//!
//! ```
//! use material_balance::{
//!     models::reservoir::gas_cap::{CandidateRange, SweepConfig, determine_optimal_m},
//!     support::{
//!         constraint::UnitInterval,
//!         material_balance::{InitialState, ReservoirType},
//!         production::{ProductionColumns, ProductionHistory},
//!         pvt::{Property, PvtTable},
//!         units::UnitSystem,
//!     },
//! };
//!
//! let pressure = vec![250.0, 240.0, 230.0, 220.0, 210.0];
//! let pvt = PvtTable::builder(UnitSystem::Metric, pressure.clone())
//!     .with(Property::Bo, vec![1.25, 1.26, 1.27, 1.28, 1.29])
//!     .with(Property::Rs, vec![85.0, 82.0, 79.0, 76.0, 73.0])
//!     .with(Property::Bg, vec![0.001, 0.0011, 0.0012, 0.0013, 0.0014])
//!     .build()?;
//!
//! let history = ProductionHistory::new(
//!     UnitSystem::Metric,
//!     ProductionColumns {
//!         time: vec![0.0, 365.0, 730.0, 1095.0, 1460.0],
//!         np: vec![0.0, 150e3, 320e3, 510e3, 720e3],
//!         gp: vec![0.0, 13e6, 28e6, 45e6, 64e6],
//!         wp: vec![0.0, 5e3, 12e3, 21e3, 32e3],
//!         pressure,
//!         we: None,
//!     },
//! )?;
//!
//! let initial = InitialState::from_pvt(&pvt, 250.0, UnitInterval::new(0.2)?, ReservoirType::Oil)?;
//! let candidates = CandidateRange::new(0.1, 0.9, 0.1).candidates()?;
//!
//! let optimal = determine_optimal_m(&history, &pvt, &initial, &candidates, &SweepConfig::default())?;
//! assert_eq!(optimal.sweep.len(), 9);
//! assert!((0.0..=1.0).contains(&optimal.r_squared));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod core;

pub use self::core::{
    CandidateError, CandidateEvaluation, CandidateRange, FitOutcome, GasCapCandidates,
    GasCapError, OptimalResult, SweepConfig, SweepResult, determine_optimal_m, select_optimal,
    sweep_gas_cap,
};

use twine_core::Model;

use crate::support::{
    material_balance::{ExpansionConfig, ExpansionSeries, InitialState},
    production::ProductionHistory,
    pvt::PvtProvider,
    regression::{FitError, LinearFit},
};

/// A [`twine_core::Model`] that fits `F` against `Et(m)` for a single `m`.
///
/// The expansion terms are resolved once at construction, so repeated calls
/// only redo the regression.
#[derive(Debug, Clone)]
pub struct GasCapModel {
    series: ExpansionSeries,
}

impl GasCapModel {
    /// Resolves expansion terms for `history`.
    ///
    /// # Errors
    ///
    /// Fails if the reservoir is not an oil reservoir or if expansion terms
    /// cannot be computed.
    pub fn new(
        history: &ProductionHistory,
        pvt: &impl PvtProvider,
        initial: &InitialState,
        config: &ExpansionConfig,
    ) -> Result<Self, GasCapError> {
        core::expansion_series(history, pvt, initial, config).map(Self::from_series)
    }

    /// Wraps precomputed expansion terms.
    #[must_use]
    pub fn from_series(series: ExpansionSeries) -> Self {
        Self { series }
    }

    /// The expansion terms this model fits against.
    #[must_use]
    pub fn series(&self) -> &ExpansionSeries {
        &self.series
    }
}

impl Model for GasCapModel {
    type Input = f64;
    type Output = LinearFit;
    type Error = FitError;

    fn call(&self, m: &Self::Input) -> Result<Self::Output, Self::Error> {
        core::fit_candidate(&self.series, *m)
    }
}
