//! van Laar model.

use crate::model::{CorrelationModel, ModelKind};
use vle_core::constants::rt;

/// `x1 x2 / G^E = x1 / B + x2 / A`, so `G^E = A B x1 x2 / (A x1 + B x2)`.
///
/// `A` and `B` are the infinite-dilution limits of `RT ln gamma1` and
/// `RT ln gamma2`. Both must share a sign.
#[derive(Debug, Clone, Copy, Default)]
pub struct VanLaar;

impl CorrelationModel for VanLaar {
    fn kind(&self) -> ModelKind {
        ModelKind::VanLaar
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["A", "B"]
    }

    fn excess_gibbs_energy(&self, x1: f64, _t_k: f64, params: &[f64]) -> f64 {
        let (a, b) = (params[0], params[1]);
        let x2 = 1.0 - x1;
        if x1 == 0.0 || x2 == 0.0 {
            return 0.0;
        }
        a * b * x1 * x2 / (a * x1 + b * x2)
    }

    fn ln_activity_coefficients(&self, x1: f64, t_k: f64, params: &[f64]) -> (f64, f64) {
        let (a, b) = (params[0], params[1]);
        let x2 = 1.0 - x1;
        let d = a * x1 + b * x2;
        let rt = rt(t_k);
        // ln g1 = A / (RT (1 + A x1 / (B x2))^2), written without the inner division
        (
            a * (b * x2 / d).powi(2) / rt,
            b * (a * x1 / d).powi(2) / rt,
        )
    }
}
