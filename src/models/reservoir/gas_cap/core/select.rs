use tracing::info;

use crate::support::{
    material_balance::InitialState, production::ProductionHistory, pvt::PvtProvider,
};

use super::{GasCapCandidates, GasCapError, SweepConfig, SweepResult, sweep_gas_cap};

/// The selected gas-cap ratio and the sweep it was chosen from.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalResult {
    /// Selected gas-cap ratio.
    pub m: f64,
    /// Coefficient of determination of the selected fit.
    pub r_squared: f64,
    /// Fitted slope, the STOIIP estimate `N` in m³ std.
    pub stoiip: f64,
    /// Fitted intercept of `F` against `Et` at the selected ratio.
    pub intercept: f64,
    /// Every candidate evaluation, for diagnostics.
    pub sweep: SweepResult,
}

/// Picks the candidate with the highest R².
///
/// Candidates within `tie_tolerance` of the best R² are tied; the smallest
/// `m` among them wins.
///
/// # Errors
///
/// Returns [`GasCapError::AllCandidatesInvalid`] if no candidate has a fit.
pub fn select_optimal(sweep: SweepResult, tie_tolerance: f64) -> Result<OptimalResult, GasCapError> {
    let best = sweep
        .valid()
        .filter_map(|e| e.r_squared())
        .max_by(f64::total_cmp)
        .ok_or(GasCapError::AllCandidatesInvalid {
            candidates: sweep.len(),
        })?;

    let chosen = sweep
        .valid()
        .filter(|e| e.r_squared().is_some_and(|r2| r2 >= best - tie_tolerance))
        .min_by(|a, b| a.m.total_cmp(&b.m))
        .and_then(|e| e.fit().map(|fit| (e.m, *fit)));

    let Some((m, fit)) = chosen else {
        return Err(GasCapError::AllCandidatesInvalid {
            candidates: sweep.len(),
        });
    };

    info!(m, r_squared = fit.r_squared, stoiip = fit.slope, "selected gas-cap ratio");

    Ok(OptimalResult {
        m,
        r_squared: fit.r_squared,
        stoiip: fit.slope,
        intercept: fit.intercept,
        sweep,
    })
}

/// Sweeps `candidates` and selects the optimal gas-cap ratio.
///
/// # Errors
///
/// Propagates [`sweep_gas_cap`] errors and fails with
/// [`GasCapError::AllCandidatesInvalid`] if no candidate has a fit.
pub fn determine_optimal_m(
    history: &ProductionHistory,
    pvt: &impl PvtProvider,
    initial: &InitialState,
    candidates: &GasCapCandidates,
    config: &SweepConfig,
) -> Result<OptimalResult, GasCapError> {
    let sweep = sweep_gas_cap(history, pvt, initial, candidates, config)?;
    select_optimal(sweep, config.tie_tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::reservoir::test_support::{
        RISING_BG, field_case, history, initial, synthetic_case, table,
    };

    use super::super::CandidateRange;

    #[test]
    fn field_case_selects_unique_best() {
        let case = field_case();
        let candidates = CandidateRange::new(0.1, 0.9, 0.1).candidates().unwrap();

        let optimal = determine_optimal_m(
            &case.history,
            &case.pvt,
            &case.initial,
            &candidates,
            &SweepConfig::default(),
        )
        .unwrap();

        assert_eq!(optimal.sweep.len(), 9);
        let others_below = optimal
            .sweep
            .iter()
            .filter(|e| e.m != optimal.m)
            .all(|e| e.r_squared().unwrap() < optimal.r_squared);
        assert!(others_below);
        assert_relative_eq!(optimal.m, 0.1);
    }

    #[test]
    fn recovers_known_gas_cap() {
        let case = synthetic_case(2.5e7, 0.4, &RISING_BG, true);

        let optimal = determine_optimal_m(
            &case.history,
            &case.pvt,
            &case.initial,
            &GasCapCandidates::default(),
            &SweepConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(optimal.m, 0.4, epsilon = 1e-9);
        assert_relative_eq!(optimal.stoiip, 2.5e7, max_relative = 1e-8);
        assert_relative_eq!(optimal.r_squared, 1.0, epsilon = 1e-12);
        assert_relative_eq!(optimal.intercept, 0.0, epsilon = 1.0);
    }

    #[test]
    fn two_points_tie_to_smallest_m() {
        let case = field_case();
        let short = history(
            &[0.0, 365.0, 730.0],
            &[0.0, 150_000.0, 320_000.0],
            &[0.0, 13e6, 28e6],
            &[0.0, 5_000.0, 12_000.0],
            &[250.0, 240.0, 230.0],
        );
        let candidates = GasCapCandidates::new(vec![0.7, 0.3, 0.2]).unwrap();

        let optimal = determine_optimal_m(
            &short,
            &case.pvt,
            &case.initial,
            &candidates,
            &SweepConfig::default(),
        )
        .unwrap();

        for evaluation in &optimal.sweep {
            assert_relative_eq!(evaluation.r_squared().unwrap(), 1.0, epsilon = 1e-12);
        }
        assert_eq!(optimal.m, 0.2);
    }

    #[test]
    fn identical_withdrawal_invalidates_every_candidate() {
        let pressure = [250.0, 240.0, 230.0, 220.0];
        let pvt = table(
            &pressure,
            &[1.25, 1.26, 1.27, 1.28],
            &[85.0, 82.0, 79.0, 76.0],
            &[0.001, 0.0011, 0.0012, 0.0013],
        );
        let history = history(&[0.0, 1.0, 2.0, 3.0], &[0.0; 4], &[0.0; 4], &[0.0; 4], &pressure);
        let initial = initial(&pvt, 250.0);

        let err = determine_optimal_m(
            &history,
            &pvt,
            &initial,
            &GasCapCandidates::default(),
            &SweepConfig::default(),
        )
        .unwrap_err();

        assert_eq!(err, GasCapError::AllCandidatesInvalid { candidates: 101 });
    }

    #[test]
    fn wide_tolerance_prefers_smallest_m() {
        let case = synthetic_case(1e7, 0.4, &RISING_BG, true);
        let candidates = GasCapCandidates::new(vec![0.39, 0.4, 0.41]).unwrap();
        let config = SweepConfig {
            tie_tolerance: 1e-3,
            ..SweepConfig::default()
        };

        let optimal =
            determine_optimal_m(&case.history, &case.pvt, &case.initial, &candidates, &config)
                .unwrap();

        assert_eq!(optimal.m, 0.39);
    }
}
