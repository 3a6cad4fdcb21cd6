//! One-parameter (two-suffix) Margules model.

use crate::model::{CorrelationModel, ModelKind};
use vle_core::constants::rt;

/// `G^E = A x1 x2`, symmetric in composition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Margules;

impl CorrelationModel for Margules {
    fn kind(&self) -> ModelKind {
        ModelKind::Margules
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["A"]
    }

    fn excess_gibbs_energy(&self, x1: f64, _t_k: f64, params: &[f64]) -> f64 {
        params[0] * x1 * (1.0 - x1)
    }

    fn ln_activity_coefficients(&self, x1: f64, t_k: f64, params: &[f64]) -> (f64, f64) {
        let a = params[0] / rt(t_k);
        let x2 = 1.0 - x1;
        (a * x2 * x2, a * x1 * x1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_dilution_limit() {
        let (l1, l2) = Margules.ln_activity_coefficients(0.0, 300.0, &[1200.0]);
        assert!((l1 - 1200.0 / rt(300.0)).abs() < 1e-12);
        assert_eq!(l2, 0.0);
    }

    #[test]
    fn symmetric_maximum() {
        let ge = Margules.excess_gibbs_energy(0.5, 300.0, &[1000.0]);
        assert!((ge - 250.0).abs() < 1e-12);
    }
}
