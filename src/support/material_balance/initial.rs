use tracing::debug;

use crate::support::{
    constraint::{Constrained, StrictlyPositive, UnitInterval},
    pvt::{Property, PvtProvider},
};

use super::ExpansionError;

/// Kind of reservoir an analysis describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReservoirType {
    #[default]
    Oil,
    Gas,
}

/// Initial reservoir conditions, in canonical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialState {
    /// Initial reservoir pressure `Pi`, kgf/cm².
    pub pressure: f64,
    /// Initial solution gas-oil ratio `Rsi`, m³/m³ std.
    pub rsi: f64,
    /// Initial oil FVF `Boi`, m³/m³ std.
    pub boi: Constrained<f64, StrictlyPositive>,
    /// Initial gas FVF `Bgi`, m³/m³ std.
    pub bgi: Constrained<f64, StrictlyPositive>,
    /// Initial water saturation `Swi`.
    pub swi: Constrained<f64, UnitInterval>,
    pub reservoir_type: ReservoirType,
}

impl InitialState {
    /// Resolves `Rsi`, `Boi` and `Bgi` from `pvt` at `initial_pressure`.
    ///
    /// # Errors
    ///
    /// Fails if the provider cannot resolve `Bo`, `Rs` and `Bg` at the
    /// initial pressure, or if `Boi` or `Bgi` is not strictly positive.
    pub fn from_pvt(
        pvt: &impl PvtProvider,
        initial_pressure: f64,
        swi: Constrained<f64, UnitInterval>,
        reservoir_type: ReservoirType,
    ) -> Result<Self, ExpansionError> {
        let props = pvt.properties_at(initial_pressure)?;

        let positive = |property| -> Result<_, ExpansionError> {
            let value = props.require(property)?;
            StrictlyPositive::new(value)
                .map_err(|source| ExpansionError::InitialState { property, source })
        };

        let state = Self {
            pressure: initial_pressure,
            rsi: props.require(Property::Rs)?,
            boi: positive(Property::Bo)?,
            bgi: positive(Property::Bg)?,
            swi,
            reservoir_type,
        };
        debug!(?state, "resolved initial state");
        Ok(state)
    }
}
