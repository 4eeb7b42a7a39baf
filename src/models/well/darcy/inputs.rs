use std::fmt;

use crate::support::constraint::{Constrained, StrictlyPositive};

use super::DarcyError;

/// How the flowing condition of the well is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecifiedBy {
    /// Both boundary pressures are known; the rate is computed.
    Pressures { outer: f64, bottomhole: f64 },
    /// The rate is known; the drawdown is computed, along with the other
    /// boundary pressure if one is given.
    Rate {
        rate: f64,
        known: Option<BoundaryPressure>,
    },
}

/// A single known boundary pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryPressure {
    Outer(f64),
    Bottomhole(f64),
}

/// Inputs to the radial inflow equation, in the unit system of the model.
///
/// | Field                        | Metric   | Field units |
/// |------------------------------|----------|-------------|
/// | `permeability`               | mD       | mD          |
/// | `thickness`, radii           | m        | ft          |
/// | `viscosity`                  | cp       | cp          |
/// | pressures                    | kgf/cm²  | psia        |
/// | rate                         | m³/d     | STB/d       |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DarcyInputs {
    pub permeability: Constrained<f64, StrictlyPositive>,
    pub thickness: Constrained<f64, StrictlyPositive>,
    pub viscosity: Constrained<f64, StrictlyPositive>,
    pub oil_fvf: Constrained<f64, StrictlyPositive>,
    pub outer_radius: Constrained<f64, StrictlyPositive>,
    pub well_radius: Constrained<f64, StrictlyPositive>,
    /// Skin factor `S`; negative for a stimulated well.
    pub skin: f64,
    pub specified_by: SpecifiedBy,
}

/// A scalar input that can be varied in a sensitivity study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Permeability,
    Thickness,
    Viscosity,
    OilFvf,
    OuterRadius,
    WellRadius,
    Skin,
    Rate,
    OuterPressure,
    BottomholePressure,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Permeability => "permeability",
            Self::Thickness => "thickness",
            Self::Viscosity => "viscosity",
            Self::OilFvf => "oil FVF",
            Self::OuterRadius => "outer radius",
            Self::WellRadius => "well radius",
            Self::Skin => "skin",
            Self::Rate => "rate",
            Self::OuterPressure => "outer pressure",
            Self::BottomholePressure => "bottomhole pressure",
        };
        f.write_str(name)
    }
}

/// Wraps `value` as strictly positive, naming `parameter` on failure.
fn positive(
    parameter: Parameter,
    value: f64,
) -> Result<Constrained<f64, StrictlyPositive>, DarcyError> {
    StrictlyPositive::new(value).map_err(|source| DarcyError::Invalid { parameter, source })
}

impl DarcyInputs {
    /// Returns a copy with `parameter` replaced by `value`.
    ///
    /// # Errors
    ///
    /// Fails if `value` violates the parameter's bound, or if the parameter
    /// is not part of the current [`SpecifiedBy`] (for example a rate when
    /// both pressures are given).
    pub fn with_parameter(self, parameter: Parameter, value: f64) -> Result<Self, DarcyError> {
        let mut inputs = self;
        match parameter {
            Parameter::Permeability => inputs.permeability = positive(parameter, value)?,
            Parameter::Thickness => inputs.thickness = positive(parameter, value)?,
            Parameter::Viscosity => inputs.viscosity = positive(parameter, value)?,
            Parameter::OilFvf => inputs.oil_fvf = positive(parameter, value)?,
            Parameter::OuterRadius => inputs.outer_radius = positive(parameter, value)?,
            Parameter::WellRadius => inputs.well_radius = positive(parameter, value)?,
            Parameter::Skin => inputs.skin = value,
            Parameter::Rate | Parameter::OuterPressure | Parameter::BottomholePressure => {
                inputs.specified_by = inputs.specified_by.with_parameter(parameter, value)?;
            }
        }
        Ok(inputs)
    }

    /// Checks the relations between inputs that single-value bounds miss.
    pub(super) fn validate(&self) -> Result<(), DarcyError> {
        let (outer, well) = (self.outer_radius.get(), self.well_radius.get());
        if outer <= well {
            return Err(DarcyError::RadiusOrder { outer, well });
        }

        match self.specified_by {
            SpecifiedBy::Pressures { outer, bottomhole } => {
                positive(Parameter::OuterPressure, outer)?;
                positive(Parameter::BottomholePressure, bottomhole)?;
                if outer <= bottomhole {
                    return Err(DarcyError::PressureOrder { outer, bottomhole });
                }
            }
            SpecifiedBy::Rate { rate, known } => {
                positive(Parameter::Rate, rate)?;
                match known {
                    Some(BoundaryPressure::Outer(p)) => {
                        positive(Parameter::OuterPressure, p)?;
                    }
                    Some(BoundaryPressure::Bottomhole(p)) => {
                        positive(Parameter::BottomholePressure, p)?;
                    }
                    None => {}
                }
            }
        }
        Ok(())
    }
}

impl SpecifiedBy {
    fn with_parameter(self, parameter: Parameter, value: f64) -> Result<Self, DarcyError> {
        use BoundaryPressure::{Bottomhole, Outer};

        match (self, parameter) {
            (Self::Pressures { bottomhole, .. }, Parameter::OuterPressure) => Ok(Self::Pressures {
                outer: value,
                bottomhole,
            }),
            (Self::Pressures { outer, .. }, Parameter::BottomholePressure) => Ok(Self::Pressures {
                outer,
                bottomhole: value,
            }),
            (Self::Rate { known, .. }, Parameter::Rate) => Ok(Self::Rate { rate: value, known }),
            (Self::Rate { rate, known: None | Some(Outer(_)) }, Parameter::OuterPressure) => {
                Ok(Self::Rate {
                    rate,
                    known: Some(Outer(value)),
                })
            }
            (Self::Rate { rate, known: None | Some(Bottomhole(_)) }, Parameter::BottomholePressure) => {
                Ok(Self::Rate {
                    rate,
                    known: Some(Bottomhole(value)),
                })
            }
            _ => Err(DarcyError::Conflicting { parameter }),
        }
    }
}
