/// Default water compressibility, 1/(kgf/cm²).
pub const DEFAULT_WATER_COMPRESSIBILITY: f64 = 43e-6;

/// Default formation (pore) compressibility, 1/(kgf/cm²).
pub const DEFAULT_FORMATION_COMPRESSIBILITY: f64 = 43e-6;

/// Default water formation volume factor, m³/m³ std.
pub const DEFAULT_WATER_FVF: f64 = 1.0;

/// Configuration for expansion-term evaluation.
///
/// The defaults apply only where the PVT provider lacks the property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionConfig {
    /// Whether to include the water/formation expansion term `Efw`.
    pub include_formation_water: bool,

    /// Water compressibility used when the provider has no `cw`.
    pub default_water_compressibility: f64,

    /// Formation compressibility used when the provider has no `cf`.
    pub default_formation_compressibility: f64,

    /// Water FVF used when the provider has no `Bw`.
    pub default_water_fvf: f64,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            include_formation_water: true,
            default_water_compressibility: DEFAULT_WATER_COMPRESSIBILITY,
            default_formation_compressibility: DEFAULT_FORMATION_COMPRESSIBILITY,
            default_water_fvf: DEFAULT_WATER_FVF,
        }
    }
}
