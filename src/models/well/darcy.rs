//! Steady-state Darcy radial inflow.
//!
//! For a vertical well draining a circular area with constant outer
//! pressure, oil rate and drawdown are related by
//!
//! ```text
//! q = C·k·h·(pe − pwf) / (μ·Bo·(ln(re/rw) + S))
//! ```
//!
//! where `C` depends on the unit system:
//!
//! - Metric (m³/d, mD, m, kgf/cm², cp): `C = 0.543439`
//! - Field (STB/d, mD, ft, psi, cp): `C = 0.007082153`
//!
//! The flowing condition is given as a [`SpecifiedBy`]: either both boundary
//! pressures (solve for rate) or the rate (solve for drawdown and, when one
//! boundary pressure is known, the other).
//!
//! # Example
//!
//! ```
//! use approx::assert_relative_eq;
//! use material_balance::{
//!     models::well::darcy::{DarcyInputs, RadialFlow, SpecifiedBy},
//!     support::{constraint::StrictlyPositive, units::UnitSystem},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = DarcyInputs {
//!     permeability: StrictlyPositive::new(100.0)?,
//!     thickness: StrictlyPositive::new(10.0)?,
//!     viscosity: StrictlyPositive::new(1.0)?,
//!     oil_fvf: StrictlyPositive::new(1.2)?,
//!     outer_radius: StrictlyPositive::new(300.0)?,
//!     well_radius: StrictlyPositive::new(0.1)?,
//!     skin: 0.0,
//!     specified_by: SpecifiedBy::Pressures {
//!         outer: 200.0,
//!         bottomhole: 150.0,
//!     },
//! };
//!
//! let result = RadialFlow::new(UnitSystem::Metric).evaluate(&inputs)?;
//! assert_relative_eq!(result.rate, 2828.16, max_relative = 1e-5);
//! # Ok(())
//! # }
//! ```

mod error;
mod inputs;

pub use error::DarcyError;
pub use inputs::{BoundaryPressure, DarcyInputs, Parameter, SpecifiedBy};

use tracing::{debug, warn};
use twine_core::Model;
use uom::si::{
    area::{acre, square_foot},
    f64::Area,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    units::UnitSystem,
};

/// Darcy constant for m³/d, mD, m, kgf/cm² and cp.
pub const METRIC_CONSTANT: f64 = 0.543439;

/// Darcy constant for STB/d, mD, ft, psi and cp.
pub const FIELD_CONSTANT: f64 = 0.007082153;

/// Rate, pressures and diagnostics of one radial-flow evaluation.
///
/// Values are in the unit system of the [`RadialFlow`] that produced them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DarcyResult {
    pub rate: f64,
    /// `pe − pwf`.
    pub drawdown: f64,
    /// `pe`, when given or computable.
    pub outer_pressure: Option<f64>,
    /// `pwf`, when given or computable.
    pub bottomhole_pressure: Option<f64>,
    /// `q / (pe − pwf)`.
    pub productivity_index: f64,
    /// Part of the drawdown caused by skin.
    pub skin_pressure_drop: f64,
    /// Drawdown the same rate would need with zero skin.
    pub ideal_drawdown: f64,
    /// `ln(re/rw) + S`.
    pub geometric_term: f64,
}

/// One entry of a sensitivity study.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityPoint {
    pub value: f64,
    pub outcome: Result<DarcyResult, DarcyError>,
}

/// Steady-state radial inflow in a fixed unit system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RadialFlow {
    units: UnitSystem,
}

impl RadialFlow {
    #[must_use]
    pub fn new(units: UnitSystem) -> Self {
        Self { units }
    }

    /// The Darcy constant `C` for this unit system.
    #[must_use]
    pub fn constant(&self) -> f64 {
        match self.units {
            UnitSystem::Metric => METRIC_CONSTANT,
            UnitSystem::Field => FIELD_CONSTANT,
        }
    }

    /// Rate per unit pressure drop per unit geometric term, `C·k·h/(μ·Bo)`.
    fn transmissibility(&self, inputs: &DarcyInputs) -> f64 {
        self.constant() * inputs.permeability.get() * inputs.thickness.get()
            / (inputs.viscosity.get() * inputs.oil_fvf.get())
    }

    /// Solves the radial inflow equation for whatever `inputs` leaves open.
    ///
    /// # Errors
    ///
    /// Fails if `re ≤ rw`, if a given pressure or rate is not strictly
    /// positive, if `pe ≤ pwf`, if `ln(re/rw) + S ≤ 0`, or if the computed
    /// bottomhole pressure is negative.
    pub fn evaluate(&self, inputs: &DarcyInputs) -> Result<DarcyResult, DarcyError> {
        inputs.validate()?;

        let ln_ratio = (inputs.outer_radius.get() / inputs.well_radius.get()).ln();
        let geometric_term = ln_ratio + inputs.skin;
        if geometric_term <= 0.0 {
            return Err(DarcyError::NonPositiveGeometricTerm {
                value: geometric_term,
            });
        }
        let transmissibility = self.transmissibility(inputs);

        let (rate, drawdown, outer_pressure, bottomhole_pressure) = match inputs.specified_by {
            SpecifiedBy::Pressures { outer, bottomhole } => {
                let drawdown = outer - bottomhole;
                let rate = transmissibility * drawdown / geometric_term;
                (rate, drawdown, Some(outer), Some(bottomhole))
            }
            SpecifiedBy::Rate { rate, known } => {
                let drawdown = rate * geometric_term / transmissibility;
                let (outer, bottomhole) = match known {
                    Some(BoundaryPressure::Outer(outer)) => {
                        let bottomhole = outer - drawdown;
                        if bottomhole < 0.0 {
                            return Err(DarcyError::NegativeBottomholePressure {
                                pressure: bottomhole,
                            });
                        }
                        (Some(outer), Some(bottomhole))
                    }
                    Some(BoundaryPressure::Bottomhole(bottomhole)) => {
                        (Some(bottomhole + drawdown), Some(bottomhole))
                    }
                    None => (None, None),
                };
                (rate, drawdown, outer, bottomhole)
            }
        };

        let result = DarcyResult {
            rate,
            drawdown,
            outer_pressure,
            bottomhole_pressure,
            productivity_index: rate / drawdown,
            skin_pressure_drop: rate * inputs.skin / transmissibility,
            ideal_drawdown: rate * ln_ratio / transmissibility,
            geometric_term,
        };

        debug!(
            rate,
            drawdown,
            productivity_index = result.productivity_index,
            "radial inflow"
        );
        Ok(result)
    }

    /// Skin factor implied by a measured drawdown at `rate`.
    ///
    /// `S = (Δp_measured − Δp_ideal)·C·k·h / (q·μ·Bo)`, with the ideal
    /// drawdown taken from the geometry in `inputs`. `inputs.skin` and
    /// `inputs.specified_by` are ignored.
    #[must_use]
    pub fn skin_factor(&self, inputs: &DarcyInputs, rate: f64, measured_drawdown: f64) -> f64 {
        let transmissibility = self.transmissibility(inputs);
        let ln_ratio = (inputs.outer_radius.get() / inputs.well_radius.get()).ln();
        let ideal_drawdown = rate * ln_ratio / transmissibility;

        (measured_drawdown - ideal_drawdown) * transmissibility / rate
    }

    /// Re-evaluates `base` with `parameter` set to each of `values`.
    ///
    /// Failures are logged and recorded per value; they do not stop the study.
    pub fn sensitivity(
        &self,
        base: &DarcyInputs,
        parameter: Parameter,
        values: &[f64],
    ) -> Vec<SensitivityPoint> {
        values
            .iter()
            .map(|&value| {
                let outcome = base
                    .with_parameter(parameter, value)
                    .and_then(|inputs| self.evaluate(&inputs));
                if let Err(error) = &outcome {
                    warn!(%parameter, value, %error, "sensitivity case failed");
                }
                SensitivityPoint { value, outcome }
            })
            .collect()
    }
}

impl Model for RadialFlow {
    type Input = DarcyInputs;
    type Output = DarcyResult;
    type Error = DarcyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.evaluate(input)
    }
}

/// Radius of a circle with the given drainage area.
///
/// Area is in acres for [`UnitSystem::Field`] (radius in ft) and m² for
/// [`UnitSystem::Metric`] (radius in m).
#[must_use]
pub fn drainage_radius(area: Constrained<f64, StrictlyPositive>, units: UnitSystem) -> f64 {
    let area = match units {
        UnitSystem::Metric => area.get(),
        UnitSystem::Field => Area::new::<acre>(area.get()).get::<square_foot>(),
    };
    (area / std::f64::consts::PI).sqrt()
}
