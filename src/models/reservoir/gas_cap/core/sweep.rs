use tracing::{debug, warn};

use crate::support::{
    material_balance::{ExpansionConfig, ExpansionSeries, InitialState, ReservoirType},
    production::ProductionHistory,
    pvt::PvtProvider,
};

use super::{
    CandidateEvaluation, GasCapCandidates, GasCapError,
    evaluation::{FitOutcome, evaluate},
};

/// Configuration for a gas-cap sweep and selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    /// Expansion-term settings shared by every candidate.
    pub expansion: ExpansionConfig,

    /// R² values within this distance of the best are treated as tied.
    pub tie_tolerance: f64,
}

impl SweepConfig {
    /// Default tie tolerance on R².
    pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-12;
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            expansion: ExpansionConfig::default(),
            tie_tolerance: Self::DEFAULT_TIE_TOLERANCE,
        }
    }
}

/// Evaluations for every candidate of a sweep, in testing order.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    evaluations: Vec<CandidateEvaluation>,
    series: ExpansionSeries,
}

impl SweepResult {
    /// The evaluation for exactly `m`, if it was a candidate.
    #[must_use]
    pub fn get(&self, m: f64) -> Option<&CandidateEvaluation> {
        self.evaluations.iter().find(|e| e.m == m)
    }

    /// Evaluations in testing order.
    #[must_use]
    pub fn evaluations(&self) -> &[CandidateEvaluation] {
        &self.evaluations
    }

    /// Evaluations in candidate order.
    pub fn iter(&self) -> std::slice::Iter<'_, CandidateEvaluation> {
        self.evaluations.iter()
    }

    /// Evaluations that produced a fit.
    pub fn valid(&self) -> impl Iterator<Item = &CandidateEvaluation> {
        self.evaluations.iter().filter(|e| e.fit().is_some())
    }

    /// Number of candidates evaluated, including failed fits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// Always `false`; a sweep evaluates at least one candidate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// The expansion terms the candidates were fitted against.
    #[must_use]
    pub fn series(&self) -> &ExpansionSeries {
        &self.series
    }
}

impl<'a> IntoIterator for &'a SweepResult {
    type Item = &'a CandidateEvaluation;
    type IntoIter = std::slice::Iter<'a, CandidateEvaluation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Evaluates every candidate gas-cap ratio against the production history.
///
/// Expansion terms are computed once. For each `m`, `F` is fitted against
/// `Et(m) = Eo + m·Eg + Efw(m)` over every step after the initial record.
/// A candidate whose fit is undefined is recorded as [`FitOutcome::NoFit`].
///
/// With the `parallel` feature, candidates are evaluated on the rayon pool;
/// the result is identical and keeps testing order.
///
/// # Errors
///
/// - [`GasCapError::UnsupportedReservoir`] for a gas reservoir.
/// - [`GasCapError::Expansion`] if PVT properties cannot be resolved.
/// - [`GasCapError::InsufficientProduction`] if fewer than two finite steps
///   follow the initial record.
pub fn sweep_gas_cap(
    history: &ProductionHistory,
    pvt: &impl PvtProvider,
    initial: &InitialState,
    candidates: &GasCapCandidates,
    config: &SweepConfig,
) -> Result<SweepResult, GasCapError> {
    let series = expansion_series(history, pvt, initial, &config.expansion)?;

    let usable = series.usable_points();
    if usable < 2 {
        return Err(GasCapError::InsufficientProduction { usable });
    }

    let evaluations = evaluate_all(&series, candidates);

    let failed = evaluations
        .iter()
        .filter(|e| matches!(e.outcome, FitOutcome::NoFit(_)))
        .count();
    if failed > 0 {
        warn!(failed, total = evaluations.len(), "gas-cap candidates without a fit");
    }
    debug!(candidates = evaluations.len(), usable, "completed gas-cap sweep");

    Ok(SweepResult {
        evaluations,
        series,
    })
}

/// Computes expansion terms after checking the reservoir type.
pub(in crate::models::reservoir::gas_cap) fn expansion_series(
    history: &ProductionHistory,
    pvt: &impl PvtProvider,
    initial: &InitialState,
    config: &ExpansionConfig,
) -> Result<ExpansionSeries, GasCapError> {
    if initial.reservoir_type != ReservoirType::Oil {
        return Err(GasCapError::UnsupportedReservoir {
            reservoir_type: initial.reservoir_type,
        });
    }
    Ok(ExpansionSeries::compute(history, pvt, initial, config)?)
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(series: &ExpansionSeries, candidates: &GasCapCandidates) -> Vec<CandidateEvaluation> {
    candidates.iter().map(|&m| evaluate(series, m)).collect()
}

#[cfg(feature = "parallel")]
fn evaluate_all(series: &ExpansionSeries, candidates: &GasCapCandidates) -> Vec<CandidateEvaluation> {
    use rayon::prelude::*;

    candidates
        .as_slice()
        .par_iter()
        .map(|&m| evaluate(series, m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use crate::{
        models::reservoir::test_support::{
            FLAT_BG, RISING_BG, field_case, history, initial, synthetic_case, table,
        },
        support::{
            constraint::UnitInterval,
            material_balance::ExpansionError,
            pvt::PvtError,
            regression::FitError,
        },
    };

    use super::super::CandidateRange;

    #[test]
    fn field_case_evaluates_every_candidate() {
        let case = field_case();
        let candidates = CandidateRange::new(0.1, 0.9, 0.1).candidates().unwrap();

        let sweep = sweep_gas_cap(
            &case.history,
            &case.pvt,
            &case.initial,
            &candidates,
            &SweepConfig::default(),
        )
        .unwrap();

        assert_eq!(sweep.len(), 9);
        for (evaluation, &m) in sweep.iter().zip(candidates.iter()) {
            assert_eq!(evaluation.m, m);
            let r2 = evaluation.r_squared().expect("every candidate should fit");
            assert!((0.0..=1.0).contains(&r2), "m = {m}, r2 = {r2}");
        }
        assert_eq!(sweep.series().regression_points().len(), 4);
    }

    #[test]
    fn keeps_testing_order() {
        let case = field_case();
        let candidates = GasCapCandidates::new(vec![0.9, 0.5, 0.1]).unwrap();

        let sweep = sweep_gas_cap(
            &case.history,
            &case.pvt,
            &case.initial,
            &candidates,
            &SweepConfig::default(),
        )
        .unwrap();

        let order: Vec<f64> = sweep.iter().map(|e| e.m).collect();
        assert_eq!(order, vec![0.9, 0.5, 0.1]);
        assert!(sweep.get(0.5).is_some());
        assert!(sweep.get(0.4).is_none());
    }

    #[test]
    fn undefined_fits_are_recorded() {
        // No production at all: F is zero everywhere.
        let pressure = [250.0, 240.0, 230.0];
        let pvt = table(&pressure, &[1.25, 1.26, 1.27], &[85.0, 82.0, 79.0], &[0.001, 0.0011, 0.0012]);
        let history = history(&[0.0, 1.0, 2.0], &[0.0; 3], &[0.0; 3], &[0.0; 3], &pressure);
        let initial = initial(&pvt, 250.0);
        let candidates = GasCapCandidates::new(vec![0.0, 0.5]).unwrap();

        let sweep =
            sweep_gas_cap(&history, &pvt, &initial, &candidates, &SweepConfig::default()).unwrap();

        assert_eq!(sweep.len(), 2);
        assert_eq!(sweep.valid().count(), 0);
        for evaluation in &sweep {
            assert_eq!(
                evaluation.outcome,
                FitOutcome::NoFit(FitError::ConstantDependent { value: 0.0 })
            );
        }
    }

    #[test]
    fn needs_two_points_after_initial_record() {
        let case = field_case();
        let short = history(
            &[0.0, 365.0],
            &[0.0, 150_000.0],
            &[0.0, 13e6],
            &[0.0, 5_000.0],
            &[250.0, 240.0],
        );

        let err = sweep_gas_cap(
            &short,
            &case.pvt,
            &case.initial,
            &GasCapCandidates::default(),
            &SweepConfig::default(),
        )
        .unwrap_err();

        assert_eq!(err, GasCapError::InsufficientProduction { usable: 1 });
    }

    #[test]
    fn rejects_gas_reservoir() {
        let case = field_case();
        let gas = InitialState {
            reservoir_type: ReservoirType::Gas,
            ..case.initial
        };

        let err = sweep_gas_cap(
            &case.history,
            &case.pvt,
            &gas,
            &GasCapCandidates::default(),
            &SweepConfig::default(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            GasCapError::UnsupportedReservoir {
                reservoir_type: ReservoirType::Gas
            }
        );
    }

    #[test]
    fn pressure_outside_table_is_fatal() {
        let case = field_case();
        let low = history(
            &[0.0, 1.0, 2.0],
            &[0.0, 1.0, 2.0],
            &[0.0, 1.0, 2.0],
            &[0.0; 3],
            &[250.0, 230.0, 205.0],
        );

        let err = sweep_gas_cap(
            &low,
            &case.pvt,
            &case.initial,
            &GasCapCandidates::default(),
            &SweepConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            GasCapError::Expansion(ExpansionError::Pvt {
                row: 2,
                source: PvtError::OutOfRange { .. }
            })
        ));
    }

    #[test]
    fn swi_changes_water_expansion_only() {
        let case = synthetic_case(1e7, 0.4, &RISING_BG, true);
        let dry = InitialState {
            swi: UnitInterval::new(0.0).unwrap(),
            ..case.initial
        };
        let candidates = GasCapCandidates::new(vec![0.4]).unwrap();
        let config = SweepConfig::default();

        let base =
            sweep_gas_cap(&case.history, &case.pvt, &case.initial, &candidates, &config).unwrap();
        let other = sweep_gas_cap(&case.history, &case.pvt, &dry, &candidates, &config).unwrap();

        let (a, b) = (base.series().points()[3], other.series().points()[3]);
        assert_eq!(a.eo, b.eo);
        assert_eq!(a.eg, b.eg);
        assert_relative_eq!(a.efw_base / b.efw_base, (43e-6 * 0.2 + 43e-6) / 43e-6, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn sweep_is_deterministic(m_true in 0.0f64..1.0, n_true in 5e6f64..5e7) {
            let case = synthetic_case(n_true, m_true, &RISING_BG, true);
            let candidates = CandidateRange::new(0.0, 1.0, 0.05).candidates().unwrap();
            let config = SweepConfig::default();

            let first = sweep_gas_cap(&case.history, &case.pvt, &case.initial, &candidates, &config).unwrap();
            let second = sweep_gas_cap(&case.history, &case.pvt, &case.initial, &candidates, &config).unwrap();

            for (a, b) in first.iter().zip(second.iter()) {
                prop_assert_eq!(a.r_squared().map(f64::to_bits), b.r_squared().map(f64::to_bits));
                prop_assert_eq!(a.stoiip().map(f64::to_bits), b.stoiip().map(f64::to_bits));
            }
        }

        #[test]
        fn flat_response_without_gas_cap_expansion(m1 in 0.0f64..1.0, m2 in 1.0f64..2.0) {
            let case = synthetic_case(1e7, 0.0, &FLAT_BG, false);
            let config = SweepConfig {
                expansion: ExpansionConfig {
                    include_formation_water: false,
                    ..ExpansionConfig::default()
                },
                ..SweepConfig::default()
            };
            let candidates = GasCapCandidates::new(vec![m1, m2]).unwrap();

            let sweep = sweep_gas_cap(&case.history, &case.pvt, &case.initial, &candidates, &config).unwrap();

            let r2: Vec<f64> = sweep.iter().map(|e| e.r_squared().unwrap()).collect();
            prop_assert!((r2[0] - r2[1]).abs() < 1e-12);
            prop_assert!(sweep.series().points().iter().all(|p| p.eg == 0.0));
        }
    }
}
