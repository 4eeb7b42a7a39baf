//! Problem formulation for implicit z-factor correlations.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};

use super::PseudoReduced;

const DAK: [f64; 11] = [
    0.3265, -1.0700, -0.5339, 0.01569, -0.05165, 0.5475, -0.7361, 0.1844, 0.1056, 0.6134, 0.7210,
];

/// A correlation evaluated at one value of its search variable.
#[derive(Debug, Clone, Copy)]
pub(super) struct Evaluation {
    /// z implied by the search variable.
    pub(super) z: f64,
    /// Correlation residual; zero at the solution.
    pub(super) residual: f64,
}

/// Dranchuk-Abou-Kassem equation of state with z as the search variable.
pub(super) struct DakModel {
    ppr: f64,
    tpr: f64,
}

impl DakModel {
    pub(super) fn new(reduced: PseudoReduced) -> Self {
        Self {
            ppr: reduced.pressure,
            tpr: reduced.temperature,
        }
    }

    fn z_from_density(&self, rho: f64) -> f64 {
        let [a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, a11] = DAK;
        let t = self.tpr;
        let rho2 = rho * rho;

        let c1 = a1 + a2 / t + a3 / t.powi(3) + a4 / t.powi(4) + a5 / t.powi(5);
        let c2 = a6 + a7 / t + a8 / t.powi(2);
        let c3 = a9 * (a7 / t + a8 / t.powi(2));
        let c4 = a10 * (1.0 + a11 * rho2) * (rho2 / t.powi(3)) * (-a11 * rho2).exp();

        1.0 + c1 * rho + c2 * rho2 - c3 * rho.powi(5) + c4
    }
}

impl Model for DakModel {
    type Input = f64;
    type Output = Evaluation;
    type Error = Infallible;

    fn call(&self, z: &f64) -> Result<Self::Output, Self::Error> {
        let rho = 0.27 * self.ppr / (z * self.tpr);
        let z_eos = self.z_from_density(rho);
        Ok(Evaluation {
            z: z_eos,
            residual: z - z_eos,
        })
    }
}

/// Hall-Yarborough correlation with reduced density `y` as the search variable.
pub(super) struct HallYarboroughModel {
    a_ppr: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl HallYarboroughModel {
    pub(super) fn new(reduced: PseudoReduced) -> Self {
        let t = 1.0 / reduced.temperature;
        let a = 0.06125 * t * (-1.2 * (1.0 - t).powi(2)).exp();
        Self {
            a_ppr: a * reduced.pressure,
            b: t * (14.76 - 9.76 * t + 4.58 * t * t),
            c: t * (90.7 - 242.2 * t + 42.4 * t * t),
            d: 2.18 + 2.82 * t,
        }
    }
}

impl Model for HallYarboroughModel {
    type Input = f64;
    type Output = Evaluation;
    type Error = Infallible;

    fn call(&self, y: &f64) -> Result<Self::Output, Self::Error> {
        let y = *y;
        let y2 = y * y;
        let hard_sphere = (y + y2 + y2 * y - y2 * y2) / (1.0 - y).powi(3);
        let residual = -self.a_ppr + hard_sphere - self.b * y2 + self.c * y.powf(self.d);
        Ok(Evaluation {
            z: self.a_ppr / y,
            residual,
        })
    }
}

/// Drives the model residual to zero.
pub(super) struct ZeroResidual;

impl EquationProblem<1> for ZeroResidual {
    type Input = f64;
    type Output = Evaluation;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.residual])
    }
}
