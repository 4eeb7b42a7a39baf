//! Unit systems and conversion to the canonical internal units.
//!
//! Every calculation in this crate runs in a single canonical system:
//!
//! | Quantity                 | Canonical unit |
//! |--------------------------|----------------|
//! | Pressure                 | kgf/cm²        |
//! | Oil / water volume       | m³ std         |
//! | Gas volume               | m³ std         |
//! | Reservoir volume         | m³             |
//! | Temperature              | K              |
//! | Bo, Bw, Bg               | m³/m³ std      |
//! | Rs                       | m³/m³ std      |
//! | Compressibility          | 1/(kgf/cm²)    |
//!
//! Inputs tagged with [`UnitSystem::Field`] (psia, STB, SCF, °F, rb/STB,
//! rb/SCF, SCF/STB, 1/psi) are converted once, when the owning table or
//! record is constructed. Conversion factors come from [`uom`].
//!
//! ```
//! use approx::assert_relative_eq;
//! use material_balance::support::units::UnitSystem;
//!
//! let kgf_cm2 = UnitSystem::Field.pressure_to_metric(3000.0);
//! assert_relative_eq!(kgf_cm2, 210.92, max_relative = 1e-4);
//! assert_relative_eq!(UnitSystem::Field.pressure_from_metric(kgf_cm2), 3000.0);
//! ```

use uom::si::{
    f64::{Pressure, ThermodynamicTemperature, Volume},
    pressure::{kilogram_force_per_square_centimeter, pound_force_per_square_inch},
    thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin},
    volume::{barrel, cubic_foot, cubic_meter},
};

/// The unit system in which caller-supplied values are expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    /// Metric petroleum units: kgf/cm², m³, °C.
    ///
    /// This is also the canonical internal system, so conversions are identities
    /// (except temperature, which is stored in kelvin).
    #[default]
    Metric,

    /// US oilfield units: psia, STB, SCF, °F.
    Field,
}

/// kgf/cm² per psi.
fn psi_in_kgf_cm2() -> f64 {
    Pressure::new::<pound_force_per_square_inch>(1.0).get::<kilogram_force_per_square_centimeter>()
}

/// m³ per barrel (STB or rb).
fn barrel_in_cubic_meters() -> f64 {
    Volume::new::<barrel>(1.0).get::<cubic_meter>()
}

/// m³ per standard cubic foot.
fn cubic_foot_in_cubic_meters() -> f64 {
    Volume::new::<cubic_foot>(1.0).get::<cubic_meter>()
}

impl UnitSystem {
    /// Multiplies by `factor` for field input, identity for metric input.
    fn scale_to_metric(self, value: f64, factor: impl FnOnce() -> f64) -> f64 {
        match self {
            Self::Metric => value,
            Self::Field => value * factor(),
        }
    }

    /// Divides by `factor` for field output, identity for metric output.
    fn scale_from_metric(self, value: f64, factor: impl FnOnce() -> f64) -> f64 {
        match self {
            Self::Metric => value,
            Self::Field => value / factor(),
        }
    }

    /// Converts a pressure to kgf/cm².
    #[must_use]
    pub fn pressure_to_metric(self, pressure: f64) -> f64 {
        self.scale_to_metric(pressure, psi_in_kgf_cm2)
    }

    /// Converts a pressure in kgf/cm² to this system.
    #[must_use]
    pub fn pressure_from_metric(self, pressure: f64) -> f64 {
        self.scale_from_metric(pressure, psi_in_kgf_cm2)
    }

    /// Converts an oil or water surface volume to m³ std.
    #[must_use]
    pub fn oil_volume_to_metric(self, volume: f64) -> f64 {
        self.scale_to_metric(volume, barrel_in_cubic_meters)
    }

    /// Converts an oil or water surface volume in m³ std to this system.
    #[must_use]
    pub fn oil_volume_from_metric(self, volume: f64) -> f64 {
        self.scale_from_metric(volume, barrel_in_cubic_meters)
    }

    /// Converts a gas surface volume to m³ std.
    #[must_use]
    pub fn gas_volume_to_metric(self, volume: f64) -> f64 {
        self.scale_to_metric(volume, cubic_foot_in_cubic_meters)
    }

    /// Converts a gas surface volume in m³ std to this system.
    #[must_use]
    pub fn gas_volume_from_metric(self, volume: f64) -> f64 {
        self.scale_from_metric(volume, cubic_foot_in_cubic_meters)
    }

    /// Converts a reservoir volume (rb in field units) to m³.
    #[must_use]
    pub fn reservoir_volume_to_metric(self, volume: f64) -> f64 {
        self.scale_to_metric(volume, barrel_in_cubic_meters)
    }

    /// Converts a reservoir volume in m³ to this system.
    #[must_use]
    pub fn reservoir_volume_from_metric(self, volume: f64) -> f64 {
        self.scale_from_metric(volume, barrel_in_cubic_meters)
    }

    /// Converts a temperature (°C for metric, °F for field) to kelvin.
    #[must_use]
    pub fn temperature_to_kelvin(self, temperature: f64) -> f64 {
        self.temperature(temperature).get::<kelvin>()
    }

    /// Converts a temperature in kelvin to °C (metric) or °F (field).
    #[must_use]
    pub fn temperature_from_kelvin(self, temperature: f64) -> f64 {
        let t = ThermodynamicTemperature::new::<kelvin>(temperature);
        match self {
            Self::Metric => t.get::<degree_celsius>(),
            Self::Field => t.get::<degree_fahrenheit>(),
        }
    }

    /// Interprets a temperature value expressed in this system.
    #[must_use]
    pub fn temperature(self, temperature: f64) -> ThermodynamicTemperature {
        match self {
            Self::Metric => ThermodynamicTemperature::new::<degree_celsius>(temperature),
            Self::Field => ThermodynamicTemperature::new::<degree_fahrenheit>(temperature),
        }
    }

    /// Interprets a pressure value expressed in this system.
    #[must_use]
    pub fn pressure(self, pressure: f64) -> Pressure {
        match self {
            Self::Metric => Pressure::new::<kilogram_force_per_square_centimeter>(pressure),
            Self::Field => Pressure::new::<pound_force_per_square_inch>(pressure),
        }
    }

    /// Converts an oil FVF to m³/m³ std.
    ///
    /// rb/STB and m³/m³ are both reservoir-to-surface ratios of the same kind,
    /// so the value is unchanged.
    #[must_use]
    pub fn bo_to_metric(self, bo: f64) -> f64 {
        bo
    }

    /// Converts an oil FVF in m³/m³ std to this system.
    #[must_use]
    pub fn bo_from_metric(self, bo: f64) -> f64 {
        bo
    }

    /// Converts a water FVF to m³/m³ std (unchanged, see [`Self::bo_to_metric`]).
    #[must_use]
    pub fn bw_to_metric(self, bw: f64) -> f64 {
        bw
    }

    /// Converts a water FVF in m³/m³ std to this system.
    #[must_use]
    pub fn bw_from_metric(self, bw: f64) -> f64 {
        bw
    }

    /// Converts a gas FVF (rb/SCF in field units) to m³/m³ std.
    #[must_use]
    pub fn bg_to_metric(self, bg: f64) -> f64 {
        self.scale_to_metric(bg, || barrel_in_cubic_meters() / cubic_foot_in_cubic_meters())
    }

    /// Converts a gas FVF in m³/m³ std to this system.
    #[must_use]
    pub fn bg_from_metric(self, bg: f64) -> f64 {
        self.scale_from_metric(bg, || barrel_in_cubic_meters() / cubic_foot_in_cubic_meters())
    }

    /// Converts a solution gas-oil ratio (SCF/STB in field units) to m³/m³ std.
    #[must_use]
    pub fn rs_to_metric(self, rs: f64) -> f64 {
        self.scale_to_metric(rs, || cubic_foot_in_cubic_meters() / barrel_in_cubic_meters())
    }

    /// Converts a solution gas-oil ratio in m³/m³ std to this system.
    #[must_use]
    pub fn rs_from_metric(self, rs: f64) -> f64 {
        self.scale_from_metric(rs, || cubic_foot_in_cubic_meters() / barrel_in_cubic_meters())
    }

    /// Converts a compressibility (1/psi in field units) to 1/(kgf/cm²).
    #[must_use]
    pub fn compressibility_to_metric(self, compressibility: f64) -> f64 {
        self.scale_to_metric(compressibility, || 1.0 / psi_in_kgf_cm2())
    }

    /// Converts a compressibility in 1/(kgf/cm²) to this system.
    #[must_use]
    pub fn compressibility_from_metric(self, compressibility: f64) -> f64 {
        self.scale_from_metric(compressibility, || 1.0 / psi_in_kgf_cm2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn metric_is_identity() {
        let metric = UnitSystem::Metric;
        assert_eq!(metric.pressure_to_metric(250.0), 250.0);
        assert_eq!(metric.oil_volume_to_metric(150_000.0), 150_000.0);
        assert_eq!(metric.gas_volume_to_metric(13e6), 13e6);
        assert_eq!(metric.bg_to_metric(0.0011), 0.0011);
        assert_eq!(metric.rs_to_metric(85.0), 85.0);
        assert_eq!(metric.compressibility_to_metric(43e-6), 43e-6);
        assert_relative_eq!(metric.temperature_to_kelvin(90.0), 363.15);
    }

    #[test]
    fn field_factors() {
        let field = UnitSystem::Field;
        assert_relative_eq!(field.pressure_to_metric(1.0), 0.070_307, max_relative = 1e-5);
        assert_relative_eq!(field.oil_volume_to_metric(1.0), 0.158_987, max_relative = 1e-5);
        assert_relative_eq!(field.gas_volume_to_metric(1.0), 0.028_316_8, max_relative = 1e-5);
        assert_relative_eq!(field.rs_to_metric(1.0), 0.178_107, max_relative = 1e-5);
        assert_relative_eq!(field.bg_to_metric(1.0), 5.614_58, max_relative = 1e-5);
        assert_relative_eq!(
            field.compressibility_to_metric(1.0),
            14.2233,
            max_relative = 1e-5
        );
        assert_relative_eq!(field.temperature_to_kelvin(180.0), 355.372, epsilon = 1e-3);
    }

    #[test]
    fn field_roundtrips() {
        let field = UnitSystem::Field;

        let psia = 3000.0;
        assert_relative_eq!(field.pressure_from_metric(field.pressure_to_metric(psia)), psia);

        let stb = 1.0e6;
        assert_relative_eq!(
            field.oil_volume_from_metric(field.oil_volume_to_metric(stb)),
            stb
        );

        let scf = 500e6;
        assert_relative_eq!(
            field.gas_volume_from_metric(field.gas_volume_to_metric(scf)),
            scf
        );

        let fahrenheit = 180.0;
        assert_relative_eq!(
            field.temperature_from_kelvin(field.temperature_to_kelvin(fahrenheit)),
            fahrenheit,
            epsilon = 1e-9
        );

        let gor = 500.0;
        assert_relative_eq!(field.rs_from_metric(field.rs_to_metric(gor)), gor);

        let bg = 0.0009;
        assert_relative_eq!(field.bg_from_metric(field.bg_to_metric(bg)), bg);

        let c = 3e-6;
        assert_relative_eq!(
            field.compressibility_from_metric(field.compressibility_to_metric(c)),
            c
        );
    }

    #[test]
    fn formation_volume_factors_are_unchanged() {
        assert_eq!(UnitSystem::Field.bo_to_metric(1.2511), 1.2511);
        assert_eq!(UnitSystem::Field.bw_to_metric(1.02), 1.02);
    }
}
