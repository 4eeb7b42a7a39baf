//! Material-balance expansion terms.
//!
//! For every production step the calculator resolves PVT properties at the
//! step pressure and evaluates, per unit initial oil volume:
//!
//! ```text
//! Eo  = (Bo − Boi) + (Rsi − Rs)·Bg
//! Eg  = Boi·(Bg/Bgi − 1)
//! Efw = (1 + m)·Boi·(cw·Swi + cf)·(Pi − P)
//! F   = Np·Bo + (Gp − Np·Rs)·Bg + Wp·Bw − We
//! ```
//!
//! `Efw` depends on the gas-cap ratio `m`, so each [`ExpansionPoint`] stores
//! the `m`-independent factor and rescales it on demand. The total expansion
//! for a candidate is `Et(m) = Eo + m·Eg + Efw(m)`.

mod config;
mod error;
mod initial;

pub use config::{
    DEFAULT_FORMATION_COMPRESSIBILITY, DEFAULT_WATER_COMPRESSIBILITY, DEFAULT_WATER_FVF,
    ExpansionConfig,
};
pub use error::ExpansionError;
pub use initial::{InitialState, ReservoirType};

use tracing::trace;

use crate::support::{
    production::{ProductionHistory, ProductionStep},
    pvt::{Property, PvtError, PvtProvider},
};

/// Expansion and withdrawal terms at one production step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionPoint {
    /// Elapsed time, days.
    pub time: f64,
    /// Reservoir pressure, kgf/cm².
    pub pressure: f64,
    /// Underground withdrawal `F`, reservoir m³.
    pub f: f64,
    /// Oil expansion `Eo`, m³/m³ std.
    pub eo: f64,
    /// Gas-cap expansion `Eg`, m³/m³ std.
    pub eg: f64,
    /// `Boi·(cw·Swi + cf)·(Pi − P)`; zero when water/formation expansion is disabled.
    pub efw_base: f64,
}

impl ExpansionPoint {
    /// Water and formation expansion `Efw` for gas-cap ratio `m`.
    #[must_use]
    pub fn efw(&self, m: f64) -> f64 {
        (1.0 + m) * self.efw_base
    }

    /// Total expansion `Et = Eo + m·Eg + Efw(m)`.
    #[must_use]
    pub fn total_expansion(&self, m: f64) -> f64 {
        self.eo + m * self.eg + self.efw(m)
    }

    /// Evaluates the terms for a single production step.
    ///
    /// Missing `Bw`, `cw` and `cf` fall back to the defaults in `config`.
    ///
    /// # Errors
    ///
    /// Fails if properties cannot be resolved at the step pressure, or if
    /// `Bo`, `Rs` or `Bg` is missing.
    pub fn evaluate(
        step: &ProductionStep,
        pvt: &impl PvtProvider,
        initial: &InitialState,
        config: &ExpansionConfig,
    ) -> Result<Self, PvtError> {
        let boi = initial.boi.get();
        let bgi = initial.bgi.get();

        let props = pvt.properties_at(step.pressure)?;
        let bo = props.require(Property::Bo)?;
        let rs = props.require(Property::Rs)?;
        let bg = props.require(Property::Bg)?;
        let bw = props.get(Property::Bw).unwrap_or(config.default_water_fvf);

        let efw_base = if config.include_formation_water {
            let cw = props
                .get(Property::Cw)
                .unwrap_or(config.default_water_compressibility);
            let cf = props
                .get(Property::Cf)
                .unwrap_or(config.default_formation_compressibility);
            boi * (cw * initial.swi.get() + cf) * (initial.pressure - step.pressure)
        } else {
            0.0
        };

        Ok(Self {
            time: step.time,
            pressure: step.pressure,
            f: step.np * bo + (step.gp - step.np * rs) * bg + step.wp * bw - step.we,
            eo: (bo - boi) + (initial.rsi - rs) * bg,
            eg: boi * (bg / bgi - 1.0),
            efw_base,
        })
    }

    /// Whether every stored term is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.f, self.eo, self.eg, self.efw_base]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Expansion terms for a full production history, one point per step.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionSeries {
    points: Vec<ExpansionPoint>,
}

impl ExpansionSeries {
    /// Computes expansion terms for every step in `history`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpansionError::Pvt`] if properties cannot be resolved at a
    /// step's pressure, or if `Bo`, `Rs` or `Bg` is missing.
    pub fn compute(
        history: &ProductionHistory,
        pvt: &impl PvtProvider,
        initial: &InitialState,
        config: &ExpansionConfig,
    ) -> Result<Self, ExpansionError> {
        let points = history
            .iter()
            .enumerate()
            .map(|(row, step)| {
                let point = ExpansionPoint::evaluate(step, pvt, initial, config)
                    .map_err(|source| ExpansionError::Pvt { row, source })?;
                trace!(row, ?point, "expansion terms");
                Ok(point)
            })
            .collect::<Result<Vec<_>, ExpansionError>>()?;

        Ok(Self { points })
    }

    /// Every point, including the initial record.
    #[must_use]
    pub fn points(&self) -> &[ExpansionPoint] {
        &self.points
    }

    /// Points used as regression input.
    ///
    /// The first record is the initial condition, where `F` and every
    /// expansion term are zero by construction. It is always excluded here,
    /// so regression input starts at the second production step.
    #[must_use]
    pub fn regression_points(&self) -> &[ExpansionPoint] {
        self.points.get(1..).unwrap_or_default()
    }

    /// Number of regression points whose terms are all finite.
    #[must_use]
    pub fn usable_points(&self) -> usize {
        self.regression_points()
            .iter()
            .filter(|p| p.is_finite())
            .count()
    }

    /// Regression input `(Et(m), F)` for gas-cap ratio `m`.
    #[must_use]
    pub fn regression_input(&self, m: f64) -> (Vec<f64>, Vec<f64>) {
        self.regression_points()
            .iter()
            .map(|p| (p.total_expansion(m), p.f))
            .unzip()
    }
}
