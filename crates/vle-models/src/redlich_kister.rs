//! Two-term Redlich-Kister expansion.

use crate::model::{CorrelationModel, ModelKind};
use vle_core::constants::rt;

/// `G^E = x1 x2 [A + B (x1 - x2)]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedlichKister;

impl CorrelationModel for RedlichKister {
    fn kind(&self) -> ModelKind {
        ModelKind::RedlichKister
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["A", "B"]
    }

    fn excess_gibbs_energy(&self, x1: f64, _t_k: f64, params: &[f64]) -> f64 {
        let (a, b) = (params[0], params[1]);
        x1 * (1.0 - x1) * (a + b * (2.0 * x1 - 1.0))
    }

    fn ln_activity_coefficients(&self, x1: f64, t_k: f64, params: &[f64]) -> (f64, f64) {
        let (a, b) = (params[0], params[1]);
        let x2 = 1.0 - x1;
        let rt = rt(t_k);
        (
            (a - b + 4.0 * b * x1) * x2 * x2 / rt,
            (a + b - 4.0 * b * x2) * x1 * x1 / rt,
        )
    }
}
