//! Empirical black-oil and dry-gas correlations.
//!
//! These estimate fluid properties when laboratory PVT data is unavailable.
//! The correlations were fitted in oilfield units, so arguments are taken as
//! [`uom`] quantities and converted internally. Returned ratios use the
//! canonical metric units (m³/m³ std).

use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::{kilogram_force_per_square_centimeter, pound_force_per_square_inch},
    thermodynamic_temperature::{degree_fahrenheit, degree_rankine, kelvin},
};

use crate::support::units::UnitSystem;

use super::z_factor::{self, PseudoReduced, ZFactorConfig, ZFactorError};

/// Metric gas FVF coefficient in `Bg = C·z·T/P`, with T in K and P in kgf/cm².
pub const GAS_FVF_COEFFICIENT: f64 = 0.00351;

/// Converts oil specific gravity (water = 1) to API gravity.
#[must_use]
pub fn api_gravity(oil_specific_gravity: f64) -> f64 {
    141.5 / oil_specific_gravity - 131.5
}

/// Standing solution gas-oil ratio, m³/m³ std.
///
/// `Rs = γg·[(p/18.2 + 1.4)·10^(0.0125·API − 0.00091·T)]^1.2048` in SCF/STB,
/// with p in psia and T in °F.
#[must_use]
pub fn standing_rs(
    pressure: Pressure,
    temperature: ThermodynamicTemperature,
    gas_gravity: f64,
    oil_gravity: f64,
) -> f64 {
    let p = pressure.get::<pound_force_per_square_inch>();
    let t = temperature.get::<degree_fahrenheit>();
    let api = api_gravity(oil_gravity);

    let x = (p / 18.2 + 1.4) * 10f64.powf(0.0125 * api - 0.00091 * t);
    let rs_field = gas_gravity * x.powf(1.2048);

    UnitSystem::Field.rs_to_metric(rs_field)
}

/// Standing oil formation volume factor, m³/m³ std.
///
/// `rs` is in m³/m³ std.
#[must_use]
pub fn standing_bo(
    rs: f64,
    temperature: ThermodynamicTemperature,
    gas_gravity: f64,
    oil_gravity: f64,
) -> f64 {
    let rs_field = UnitSystem::Field.rs_from_metric(rs);
    let t = temperature.get::<degree_fahrenheit>();

    let f = rs_field * (gas_gravity / oil_gravity).sqrt() + 1.25 * t;
    0.9759 + 0.00012 * f.powf(1.2)
}

/// Separator conditions used to correct gas gravity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separator {
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
}

impl Default for Separator {
    /// 7.03 kgf/cm² (about 100 psia) at 60 °F.
    fn default() -> Self {
        Self {
            pressure: Pressure::new::<kilogram_force_per_square_centimeter>(7.03),
            temperature: ThermodynamicTemperature::new::<degree_fahrenheit>(60.0),
        }
    }
}

impl Separator {
    /// Gas gravity corrected to a 100 psig separator reference.
    #[must_use]
    pub fn corrected_gas_gravity(&self, gas_gravity: f64, api: f64) -> f64 {
        let p = self.pressure.get::<pound_force_per_square_inch>();
        let t = self.temperature.get::<degree_fahrenheit>();
        gas_gravity * (1.0 + 5.912e-5 * api * t * (p / 114.7).log10())
    }
}

/// Vasquez-Beggs oil formation volume factor for saturated oil, m³/m³ std.
///
/// `rs` is in m³/m³ std. Coefficients switch at 30 °API.
#[must_use]
pub fn vasquez_beggs_bo(
    rs: f64,
    temperature: ThermodynamicTemperature,
    gas_gravity: f64,
    api: f64,
    separator: Separator,
) -> f64 {
    let (c1, c2, c3) = if api <= 30.0 {
        (4.677e-4, 1.751e-5, -1.811e-8)
    } else {
        (4.670e-4, 1.100e-5, 1.337e-9)
    };

    let rs_field = UnitSystem::Field.rs_from_metric(rs);
    let t = temperature.get::<degree_fahrenheit>();
    let gas_gravity = separator.corrected_gas_gravity(gas_gravity, api);

    1.0 + c1 * rs_field + (t - 60.0) * (api / gas_gravity) * (c2 + c3 * rs_field)
}

/// Gas formation volume factor, m³/m³ std.
#[must_use]
pub fn gas_fvf(pressure: Pressure, temperature: ThermodynamicTemperature, z: f64) -> f64 {
    let p = pressure.get::<kilogram_force_per_square_centimeter>();
    GAS_FVF_COEFFICIENT * z * temperature.get::<kelvin>() / p
}

/// Pseudo-critical gas properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoCritical {
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
}

impl PseudoCritical {
    /// Standing's natural-gas pseudo-critical properties from gas gravity.
    #[must_use]
    pub fn standing(gas_gravity: f64) -> Self {
        let g = gas_gravity;
        Self {
            pressure: Pressure::new::<pound_force_per_square_inch>(677.0 + 15.0 * g - 37.5 * g * g),
            temperature: ThermodynamicTemperature::new::<degree_rankine>(
                168.0 + 325.0 * g - 12.5 * g * g,
            ),
        }
    }

    /// Reduces absolute conditions by these pseudo-critical properties.
    #[must_use]
    pub fn reduce(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> PseudoReduced {
        PseudoReduced {
            pressure: pressure.get::<pound_force_per_square_inch>()
                / self.pressure.get::<pound_force_per_square_inch>(),
            temperature: temperature.get::<kelvin>() / self.temperature.get::<kelvin>(),
        }
    }
}

/// Which z-factor correlation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZFactorMethod {
    #[default]
    DranchukAbouKassem,
    HallYarborough,
}

/// Gas z-factor at absolute conditions for a gas of the given gravity.
///
/// # Errors
///
/// Propagates [`ZFactorError`] from the selected correlation.
pub fn gas_z_factor(
    pressure: Pressure,
    temperature: ThermodynamicTemperature,
    gas_gravity: f64,
    method: ZFactorMethod,
    config: ZFactorConfig,
) -> Result<f64, ZFactorError> {
    let reduced = PseudoCritical::standing(gas_gravity).reduce(pressure, temperature);
    match method {
        ZFactorMethod::DranchukAbouKassem => z_factor::dranchuk_abou_kassem(reduced, config),
        ZFactorMethod::HallYarborough => z_factor::hall_yarborough(reduced, config),
    }
}
