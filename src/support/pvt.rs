//! PVT (pressure-volume-temperature) fluid properties.
//!
//! Material-balance calculations consume fluid properties at arbitrary
//! reservoir pressures through the [`PvtProvider`] trait. The tabular
//! implementation, [`PvtTable`], interpolates laboratory data linearly
//! between rows. When laboratory data is missing, the [`correlations`]
//! and [`z_factor`] modules provide empirical estimates.
//!
//! All values are in the canonical units described in
//! [`units`](crate::support::units).

pub mod correlations;
pub mod z_factor;

mod error;
mod table;

pub use error::PvtError;
pub use table::{Extrapolation, PvtTable, PvtTableBuilder};

use std::fmt;

/// A PVT property that a table may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Oil formation volume factor, m³/m³ std.
    Bo,
    /// Solution gas-oil ratio, m³/m³ std.
    Rs,
    /// Gas formation volume factor, m³/m³ std.
    Bg,
    /// Water formation volume factor, m³/m³ std.
    Bw,
    /// Water compressibility, 1/(kgf/cm²).
    Cw,
    /// Formation (pore) compressibility, 1/(kgf/cm²).
    Cf,
    /// Gas deviation factor, dimensionless.
    Z,
    /// Oil compressibility, 1/(kgf/cm²).
    Co,
    /// Gas compressibility, 1/(kgf/cm²).
    Cg,
}

impl Property {
    /// Every property, in storage order.
    pub const ALL: [Property; 9] = [
        Property::Bo,
        Property::Rs,
        Property::Bg,
        Property::Bw,
        Property::Cw,
        Property::Cf,
        Property::Z,
        Property::Co,
        Property::Cg,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Bo => "Bo",
            Property::Rs => "Rs",
            Property::Bg => "Bg",
            Property::Bw => "Bw",
            Property::Cw => "cw",
            Property::Cf => "cf",
            Property::Z => "z",
            Property::Co => "co",
            Property::Cg => "cg",
        };
        f.write_str(name)
    }
}

/// Fluid properties resolved at a single pressure.
///
/// Properties the provider does not carry are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PvtProperties {
    /// Pressure the properties were resolved at, kgf/cm².
    pub pressure: f64,
    values: [Option<f64>; Property::ALL.len()],
}

impl PvtProperties {
    /// Creates an empty property set at `pressure`.
    #[must_use]
    pub fn new(pressure: f64) -> Self {
        Self {
            pressure,
            values: [None; Property::ALL.len()],
        }
    }

    /// Returns a copy with `property` set to `value`.
    #[must_use]
    pub fn with(mut self, property: Property, value: f64) -> Self {
        self.values[property.index()] = Some(value);
        self
    }

    /// Returns the value of `property`, if present.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<f64> {
        self.values[property.index()]
    }

    /// Returns the value of `property`.
    ///
    /// # Errors
    ///
    /// Returns [`PvtError::MissingProperty`] if the provider does not carry it.
    pub fn require(&self, property: Property) -> Result<f64, PvtError> {
        self.get(property)
            .ok_or(PvtError::MissingProperty { property })
    }
}

/// A source of fluid properties as a function of reservoir pressure.
pub trait PvtProvider {
    /// Resolves every available property at `pressure` (kgf/cm²).
    ///
    /// # Errors
    ///
    /// Returns [`PvtError::OutOfRange`] if `pressure` lies outside the
    /// provider's domain and extrapolation is not enabled.
    fn properties_at(&self, pressure: f64) -> Result<PvtProperties, PvtError>;
}

impl<T: PvtProvider + ?Sized> PvtProvider for &T {
    fn properties_at(&self, pressure: f64) -> Result<PvtProperties, PvtError> {
        (**self).properties_at(pressure)
    }
}
