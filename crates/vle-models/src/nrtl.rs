//! Non-random two-liquid model.

use crate::model::{CorrelationModel, ModelKind};
use vle_core::constants::rt;

/// Non-randomness used when none is given.
pub const DEFAULT_NRTL_ALPHA: f64 = 0.3;

/// NRTL with fixed non-randomness `alpha`.
///
/// Parameters are `A = g12 - g22` and `B = g21 - g11` (J/mol).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nrtl {
    pub alpha: f64,
}

impl Default for Nrtl {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_NRTL_ALPHA,
        }
    }
}

impl Nrtl {
    fn terms(&self, t_k: f64, params: &[f64]) -> (f64, f64, f64, f64) {
        let rt = rt(t_k);
        let tau12 = params[0] / rt;
        let tau21 = params[1] / rt;
        (
            tau12,
            tau21,
            (-self.alpha * tau12).exp(),
            (-self.alpha * tau21).exp(),
        )
    }
}

impl CorrelationModel for Nrtl {
    fn kind(&self) -> ModelKind {
        ModelKind::Nrtl
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["A", "B"]
    }

    fn constants(&self) -> Vec<f64> {
        vec![self.alpha]
    }

    fn excess_gibbs_energy(&self, x1: f64, t_k: f64, params: &[f64]) -> f64 {
        let (tau12, tau21, g12, g21) = self.terms(t_k, params);
        let x2 = 1.0 - x1;
        let reduced =
            x1 * x2 * (tau21 * g21 / (x1 + x2 * g21) + tau12 * g12 / (x2 + x1 * g12));
        rt(t_k) * reduced
    }

    fn ln_activity_coefficients(&self, x1: f64, t_k: f64, params: &[f64]) -> (f64, f64) {
        let (tau12, tau21, g12, g21) = self.terms(t_k, params);
        let x2 = 1.0 - x1;
        let d1 = x1 + x2 * g21;
        let d2 = x2 + x1 * g12;
        (
            x2 * x2 * (tau21 * (g21 / d1).powi(2) + tau12 * g12 / (d2 * d2)),
            x1 * x1 * (tau12 * (g12 / d2).powi(2) + tau21 * g21 / (d1 * d1)),
        )
    }
}
