use crate::support::{
    constraint::UnitInterval,
    material_balance::{InitialState, ReservoirType},
    production::{ProductionColumns, ProductionHistory},
    pvt::{Property, PvtTable},
    units::UnitSystem,
};

/// Builds a metric PVT table with Bo, Rs and Bg columns.
pub(crate) fn table(pressure: &[f64], bo: &[f64], rs: &[f64], bg: &[f64]) -> PvtTable {
    PvtTable::builder(UnitSystem::Metric, pressure.to_vec())
        .with(Property::Bo, bo.to_vec())
        .with(Property::Rs, rs.to_vec())
        .with(Property::Bg, bg.to_vec())
        .build()
        .expect("fixture table should be valid")
}

/// Builds a metric production history without water influx.
pub(crate) fn history(
    time: &[f64],
    np: &[f64],
    gp: &[f64],
    wp: &[f64],
    pressure: &[f64],
) -> ProductionHistory {
    ProductionHistory::new(
        UnitSystem::Metric,
        ProductionColumns {
            time: time.to_vec(),
            np: np.to_vec(),
            gp: gp.to_vec(),
            wp: wp.to_vec(),
            pressure: pressure.to_vec(),
            we: None,
        },
    )
    .expect("fixture history should be valid")
}

/// Oil-reservoir initial state at `pressure` with `Swi = 0.2`.
pub(crate) fn initial(pvt: &PvtTable, pressure: f64) -> InitialState {
    InitialState::from_pvt(
        pvt,
        pressure,
        UnitInterval::new(0.2).expect("0.2 is a valid saturation"),
        ReservoirType::Oil,
    )
    .expect("fixture initial state should resolve")
}

/// A small saturated-oil field history with five observations.
pub(crate) struct FieldCase {
    pub(crate) pvt: PvtTable,
    pub(crate) history: ProductionHistory,
    pub(crate) initial: InitialState,
}

/// Five-point field case, 250 → 210 kgf/cm².
pub(crate) fn field_case() -> FieldCase {
    let pressure = [250.0, 240.0, 230.0, 220.0, 210.0];
    let pvt = table(
        &pressure,
        &[1.25, 1.26, 1.27, 1.28, 1.29],
        &[85.0, 82.0, 79.0, 76.0, 73.0],
        &[0.001, 0.0011, 0.0012, 0.0013, 0.0014],
    );
    let history = history(
        &[0.0, 365.0, 730.0, 1095.0, 1460.0],
        &[0.0, 150_000.0, 320_000.0, 510_000.0, 720_000.0],
        &[0.0, 13e6, 28e6, 45e6, 64e6],
        &[0.0, 5_000.0, 12_000.0, 21_000.0, 32_000.0],
        &pressure,
    );
    let initial = initial(&pvt, 250.0);
    FieldCase {
        pvt,
        history,
        initial,
    }
}

/// Synthetic history generated from a known `(N, m)`.
///
/// Oil production reaches 1% of `N`. Gas production is back-solved so that
/// `F = N·(Eo + m·Eg + Efw(m))` holds exactly at every step, with default
/// compressibilities and `Swi = 0.2`.
/// Pass a constant `bg` column to make `Eg` vanish.
pub(crate) fn synthetic_case(n: f64, m: f64, bg: &[f64; 6], include_efw: bool) -> FieldCase {
    let pressure = [250.0, 240.0, 230.0, 220.0, 210.0, 200.0];
    let bo = [1.30, 1.29, 1.28, 1.27, 1.26, 1.25];
    let rs = [100.0, 96.0, 92.0, 88.0, 84.0, 80.0];
    let np = [0.0, 0.002, 0.004, 0.006, 0.008, 0.010].map(|fraction| fraction * n);

    let (boi, rsi, bgi) = (bo[0], rs[0], bg[0]);
    let compressibility = 43e-6 * 0.2 + 43e-6;

    let gp: Vec<f64> = (0..pressure.len())
        .map(|k| {
            let eo = (bo[k] - boi) + (rsi - rs[k]) * bg[k];
            let eg = boi * (bg[k] / bgi - 1.0);
            let efw = if include_efw {
                (1.0 + m) * boi * compressibility * (pressure[0] - pressure[k])
            } else {
                0.0
            };
            let f = n * (eo + m * eg + efw);
            (f - np[k] * bo[k]) / bg[k] + np[k] * rs[k]
        })
        .collect();

    let pvt = table(&pressure, &bo, &rs, bg);
    let history = history(
        &[0.0, 180.0, 365.0, 545.0, 730.0, 910.0],
        &np,
        &gp,
        &[0.0; 6],
        &pressure,
    );
    let initial = initial(&pvt, pressure[0]);
    FieldCase {
        pvt,
        history,
        initial,
    }
}

/// Gas FVF column for the synthetic case with an expanding gas cap.
pub(crate) const RISING_BG: [f64; 6] = [0.0040, 0.0042, 0.0044, 0.0046, 0.0048, 0.0050];

/// Gas FVF column for the synthetic case with no gas-cap expansion.
pub(crate) const FLAT_BG: [f64; 6] = [0.0045; 6];
