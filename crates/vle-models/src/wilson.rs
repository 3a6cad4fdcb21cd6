//! Wilson local-composition model.

use crate::error::{ModelError, ModelResult};
use crate::model::{CorrelationModel, ModelKind};
use vle_core::constants::rt;

/// Wilson model with liquid molar volumes `v1`, `v2` (m3/mol).
///
/// `Lambda12 = (v2 / v1) exp(-A / RT)`, `Lambda21 = (v1 / v2) exp(-B / RT)`,
/// `G^E / RT = -x1 ln(x1 + Lambda12 x2) - x2 ln(x2 + Lambda21 x1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wilson {
    v1: f64,
    v2: f64,
}

impl Wilson {
    pub fn new(v1: f64, v2: f64) -> ModelResult<Self> {
        for (v, label) in [(v1, "v1"), (v2, "v2")] {
            if !(v.is_finite() && v > 0.0) {
                return Err(ModelError::InvalidData {
                    what: format!("Wilson volume {label} must be positive, got {v}"),
                });
            }
        }
        Ok(Self { v1, v2 })
    }

    pub fn volumes(&self) -> (f64, f64) {
        (self.v1, self.v2)
    }

    /// `(Lambda12, Lambda21)` at `t_k`.
    pub fn lambdas(&self, t_k: f64, params: &[f64]) -> (f64, f64) {
        let rt = rt(t_k);
        (
            self.v2 / self.v1 * (-params[0] / rt).exp(),
            self.v1 / self.v2 * (-params[1] / rt).exp(),
        )
    }
}

impl CorrelationModel for Wilson {
    fn kind(&self) -> ModelKind {
        ModelKind::Wilson
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["A", "B"]
    }

    fn constants(&self) -> Vec<f64> {
        vec![self.v1, self.v2]
    }

    fn excess_gibbs_energy(&self, x1: f64, t_k: f64, params: &[f64]) -> f64 {
        let (l12, l21) = self.lambdas(t_k, params);
        let x2 = 1.0 - x1;
        let mut g = 0.0;
        if x1 > 0.0 {
            g -= x1 * (x1 + l12 * x2).ln();
        }
        if x2 > 0.0 {
            g -= x2 * (x2 + l21 * x1).ln();
        }
        rt(t_k) * g
    }

    fn ln_activity_coefficients(&self, x1: f64, t_k: f64, params: &[f64]) -> (f64, f64) {
        let (l12, l21) = self.lambdas(t_k, params);
        let x2 = 1.0 - x1;
        let s1 = x1 + l12 * x2;
        let s2 = x2 + l21 * x1;
        let bracket = l12 / s1 - l21 / s2;
        (-s1.ln() + x2 * bracket, -s2.ln() - x1 * bracket)
    }
}
