//! Truncated Wohl expansion with molar-volume weighting.

use crate::error::{ModelError, ModelResult};
use crate::model::{CorrelationModel, ModelKind};
use vle_core::constants::rt;

/// Two-suffix Wohl model with effective volumes `q1`, `q2`.
///
/// `z_i = x_i q_i / (x1 q1 + x2 q2)` and `G^E = RT (x1 q1 + x2 q2) 2A z1 z2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wohls {
    q1: f64,
    q2: f64,
}

impl Wohls {
    /// Effective volumes, usually liquid molar volumes (m3/mol).
    pub fn new(q1: f64, q2: f64) -> ModelResult<Self> {
        for (q, label) in [(q1, "q1"), (q2, "q2")] {
            if !(q.is_finite() && q > 0.0) {
                return Err(ModelError::InvalidData {
                    what: format!("Wohls volume {label} must be positive, got {q}"),
                });
            }
        }
        Ok(Self { q1, q2 })
    }

    pub fn volumes(&self) -> (f64, f64) {
        (self.q1, self.q2)
    }

    fn fractions(&self, x1: f64) -> (f64, f64, f64) {
        let x2 = 1.0 - x1;
        let sum = x1 * self.q1 + x2 * self.q2;
        (sum, x1 * self.q1 / sum, x2 * self.q2 / sum)
    }
}

impl CorrelationModel for Wohls {
    fn kind(&self) -> ModelKind {
        ModelKind::Wohls
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["A"]
    }

    fn constants(&self) -> Vec<f64> {
        vec![self.q1, self.q2]
    }

    fn excess_gibbs_energy(&self, x1: f64, t_k: f64, params: &[f64]) -> f64 {
        let (sum, z1, z2) = self.fractions(x1);
        rt(t_k) * sum * 2.0 * params[0] * z1 * z2
    }

    fn ln_activity_coefficients(&self, x1: f64, _t_k: f64, params: &[f64]) -> (f64, f64) {
        let (_, z1, z2) = self.fractions(x1);
        let a2 = 2.0 * params[0];
        (a2 * self.q1 * z2 * z2, a2 * self.q2 * z1 * z1)
    }
}
