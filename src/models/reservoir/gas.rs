//! Gas reservoir material balance.
//!
//! Two estimates of gas initially in place are available per production
//! step. The volumetric balance
//!
//! ```text
//! Gp·Bg + Wp·Bw = G·(Bg − Bgi) + We
//! ```
//!
//! reduces to `G = Gp·Bg / (Bg − Bgi)` for a dry gas reservoir. The P/Z
//! method uses `p/z = (pi/zi)·(1 − Gp/G)`, which also makes `p/z` linear in
//! `Gp` over the whole history with `G` as the x-intercept.

use thiserror::Error;
use tracing::debug;
use twine_core::Model;

use crate::support::{
    constraint::{Constrained, ConstraintError, StrictlyPositive},
    material_balance::DEFAULT_WATER_FVF,
    production::{ProductionHistory, ProductionStep},
    pvt::{Property, PvtError, PvtProvider},
    regression::{FitError, LinearFit, linear_fit},
};

use super::InPlaceEstimates;

/// Smallest usable `|Bg − Bgi|` or `|pi/zi − p/z|`.
const MIN_DECLINE: f64 = 1e-10;

/// Errors from gas material-balance calculations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GasReservoirError {
    #[error("PVT lookup failed")]
    Pvt(#[from] PvtError),

    /// An initial property violates its physical bound.
    #[error("initial {property} is invalid")]
    InitialState {
        property: Property,
        #[source]
        source: ConstraintError,
    },

    /// `Bg` has not moved from `Bgi`.
    #[error("GIIP denominator {denominator} is too small; pressure has not declined")]
    SmallDenominator { denominator: f64 },

    /// `p/z` has not moved from `pi/zi`.
    #[error("p/z {pz} has not declined from initial {pzi}")]
    NoPressureDecline { pz: f64, pzi: f64 },

    /// No production step produced an estimate.
    #[error("no valid GIIP estimate among {steps} production steps")]
    NoValidEstimate { steps: usize },

    #[error("p/z line fit failed")]
    Fit(#[from] FitError),

    /// The fitted p/z line is horizontal and never reaches zero.
    #[error("p/z does not decline with cumulative gas production")]
    FlatPressureOverZ,
}

/// Initial conditions of a gas reservoir.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasInitialState {
    /// Initial reservoir pressure `pi`, kgf/cm².
    pub pressure: f64,
    /// Initial gas FVF `Bgi`, m³/m³ std.
    pub bgi: Constrained<f64, StrictlyPositive>,
    /// Initial gas compressibility factor `zi`.
    pub zi: Constrained<f64, StrictlyPositive>,
}

impl GasInitialState {
    /// Resolves `Bgi` and `zi` from `pvt` at `initial_pressure`.
    ///
    /// # Errors
    ///
    /// Fails if `Bg` or `z` cannot be resolved at the initial pressure, or
    /// if either is not strictly positive.
    pub fn from_pvt(
        pvt: &impl PvtProvider,
        initial_pressure: f64,
    ) -> Result<Self, GasReservoirError> {
        let props = pvt.properties_at(initial_pressure)?;

        let positive = |property| -> Result<_, GasReservoirError> {
            let value = props.require(property)?;
            StrictlyPositive::new(value)
                .map_err(|source| GasReservoirError::InitialState { property, source })
        };

        Ok(Self {
            pressure: initial_pressure,
            bgi: positive(Property::Bg)?,
            zi: positive(Property::Z)?,
        })
    }

    /// Initial `pi/zi`, kgf/cm².
    #[must_use]
    pub fn pressure_over_z(&self) -> f64 {
        self.pressure / self.zi.get()
    }
}

/// How a single production step is turned into a GIIP estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GiipMethod {
    /// Volumetric balance with produced water and water influx.
    #[default]
    Standard,
    /// `G = Gp / (1 − (p/z)/(pi/zi))`.
    PressureOverZ,
}

/// Result of the p/z versus `Gp` straight-line extrapolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PzFit {
    /// Fit of `p/z` (kgf/cm²) against `Gp` (m³ std).
    pub fit: LinearFit,
    /// The fit's x-intercept, m³ std.
    pub giip: f64,
}

/// A gas reservoir with known initial conditions.
#[derive(Debug, Clone)]
pub struct GasReservoir<P> {
    pvt: P,
    initial: GasInitialState,
    method: GiipMethod,
    default_water_fvf: f64,
}

impl<P: PvtProvider> GasReservoir<P> {
    /// Creates a reservoir model using [`GiipMethod::Standard`].
    pub fn new(pvt: P, initial: GasInitialState) -> Self {
        Self {
            pvt,
            initial,
            method: GiipMethod::default(),
            default_water_fvf: DEFAULT_WATER_FVF,
        }
    }

    /// Selects the per-step GIIP method.
    #[must_use]
    pub fn with_method(mut self, method: GiipMethod) -> Self {
        self.method = method;
        self
    }

    /// Water FVF used when the provider has no `Bw`.
    #[must_use]
    pub fn with_default_water_fvf(mut self, bw: f64) -> Self {
        self.default_water_fvf = bw;
        self
    }

    /// GIIP, m³ std, implied by a single production step.
    ///
    /// # Errors
    ///
    /// Fails if the required PVT properties cannot be resolved or if the
    /// step shows no decline from initial conditions.
    pub fn giip(&self, step: &ProductionStep) -> Result<f64, GasReservoirError> {
        let props = self.pvt.properties_at(step.pressure)?;

        match self.method {
            GiipMethod::Standard => {
                let bg = props.require(Property::Bg)?;
                let bw = props.get(Property::Bw).unwrap_or(self.default_water_fvf);

                let denominator = bg - self.initial.bgi.get();
                if denominator.abs() < MIN_DECLINE {
                    return Err(GasReservoirError::SmallDenominator { denominator });
                }
                Ok((step.gp * bg - step.we + step.wp * bw) / denominator)
            }
            GiipMethod::PressureOverZ => {
                let z = props.require(Property::Z)?;
                let pz = step.pressure / z;
                let pzi = self.initial.pressure_over_z();

                if (pzi - pz).abs() < MIN_DECLINE {
                    return Err(GasReservoirError::NoPressureDecline { pz, pzi });
                }
                Ok(step.gp / (1.0 - pz / pzi))
            }
        }
    }

    /// GIIP estimates for every step, with statistics over the valid ones.
    ///
    /// # Errors
    ///
    /// Returns [`GasReservoirError::NoValidEstimate`] if every step fails.
    pub fn giip_history(
        &self,
        history: &ProductionHistory,
    ) -> Result<InPlaceEstimates, GasReservoirError> {
        InPlaceEstimates::collect(history.iter().map(|step| self.giip(step))).ok_or(
            GasReservoirError::NoValidEstimate {
                steps: history.len(),
            },
        )
    }

    /// Fits `p/z` against `Gp` over every record and extrapolates to `p/z = 0`.
    ///
    /// # Errors
    ///
    /// Fails if `z` cannot be resolved at any step, if the fit is undefined,
    /// or if the fitted line is horizontal.
    pub fn pz_fit(&self, history: &ProductionHistory) -> Result<PzFit, GasReservoirError> {
        let (gp, pz): (Vec<f64>, Vec<f64>) = history
            .iter()
            .map(|step| -> Result<_, GasReservoirError> {
                let z = self.pvt.properties_at(step.pressure)?.require(Property::Z)?;
                Ok((step.gp, step.pressure / z))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();

        let fit = linear_fit(&gp, &pz)?;
        let giip = fit
            .x_intercept()
            .ok_or(GasReservoirError::FlatPressureOverZ)?;

        debug!(giip, r_squared = fit.r_squared, "p/z extrapolation");
        Ok(PzFit { fit, giip })
    }
}

impl<P: PvtProvider> Model for GasReservoir<P> {
    type Input = ProductionStep;
    type Output = f64;
    type Error = GasReservoirError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.giip(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{
        production::ProductionColumns,
        pvt::{PvtTable, correlations::gas_fvf},
        units::UnitSystem,
    };

    const GIIP: f64 = 5e9;
    const PRESSURE: [f64; 5] = [300.0, 280.0, 260.0, 240.0, 220.0];
    const Z: [f64; 5] = [0.85, 0.86, 0.87, 0.88, 0.89];

    fn pvt() -> PvtTable {
        let temperature = UnitSystem::Metric.temperature(86.85);
        let bg = PRESSURE
            .iter()
            .zip(Z)
            .map(|(&p, z)| gas_fvf(UnitSystem::Metric.pressure(p), temperature, z))
            .collect();

        PvtTable::builder(UnitSystem::Metric, PRESSURE.to_vec())
            .with(Property::Bg, bg)
            .with(Property::Z, Z.to_vec())
            .build()
            .unwrap()
    }

    /// Volumetric depletion of `GIIP` with no water.
    fn history() -> ProductionHistory {
        let pzi = PRESSURE[0] / Z[0];
        let gp = PRESSURE
            .iter()
            .zip(Z)
            .map(|(&p, z)| GIIP * (1.0 - (p / z) / pzi))
            .collect();

        ProductionHistory::new(
            UnitSystem::Metric,
            ProductionColumns {
                time: vec![0.0, 365.0, 730.0, 1095.0, 1460.0],
                np: vec![0.0; 5],
                gp,
                wp: vec![0.0; 5],
                pressure: PRESSURE.to_vec(),
                we: None,
            },
        )
        .unwrap()
    }

    fn reservoir(pvt: &PvtTable) -> GasReservoir<&PvtTable> {
        let initial = GasInitialState::from_pvt(pvt, PRESSURE[0]).unwrap();
        GasReservoir::new(pvt, initial)
    }

    #[test]
    fn both_methods_recover_giip() {
        let pvt = pvt();
        let history = history();

        for method in [GiipMethod::Standard, GiipMethod::PressureOverZ] {
            let reservoir = reservoir(&pvt).with_method(method);
            for step in &history.steps()[1..] {
                assert_relative_eq!(reservoir.call(step).unwrap(), GIIP, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn history_records_initial_gap() {
        let pvt = pvt();
        let estimates = reservoir(&pvt).giip_history(&history()).unwrap();

        assert_eq!(estimates.values[0], None);
        assert_eq!(estimates.statistics.count, 4);
        assert_relative_eq!(estimates.statistics.mean, GIIP, max_relative = 1e-9);
    }

    #[test]
    fn initial_step_has_no_decline() {
        let pvt = pvt();
        let history = history();

        let standard = reservoir(&pvt).giip(history.initial());
        assert!(matches!(
            standard,
            Err(GasReservoirError::SmallDenominator { .. })
        ));

        let pz = reservoir(&pvt)
            .with_method(GiipMethod::PressureOverZ)
            .giip(history.initial());
        assert!(matches!(pz, Err(GasReservoirError::NoPressureDecline { .. })));
    }

    #[test]
    fn water_influx_lowers_estimate() {
        let pvt = pvt();
        let reservoir = reservoir(&pvt);
        let step = history().steps()[2];

        let dry = reservoir.giip(&step).unwrap();
        let with_influx = reservoir
            .giip(&ProductionStep {
                we: 1e5,
                ..step
            })
            .unwrap();

        assert!(with_influx < dry);
    }

    #[test]
    fn pz_line_extrapolates_to_giip() {
        let pvt = pvt();
        let pz = reservoir(&pvt).pz_fit(&history()).unwrap();

        assert_relative_eq!(pz.giip, GIIP, max_relative = 1e-9);
        assert_relative_eq!(pz.fit.intercept, PRESSURE[0] / Z[0], max_relative = 1e-9);
        assert_relative_eq!(pz.fit.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn initial_state_needs_z() {
        let pvt = PvtTable::builder(UnitSystem::Metric, vec![300.0, 200.0])
            .with(Property::Bg, vec![0.004, 0.006])
            .build()
            .unwrap();

        assert_eq!(
            GasInitialState::from_pvt(&pvt, 300.0),
            Err(GasReservoirError::Pvt(PvtError::MissingProperty {
                property: Property::Z
            }))
        );
    }
}
