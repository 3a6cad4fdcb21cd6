//! Derived series on a fixed composition grid, ready for plotting.

use crate::model::CorrelationModel;
use serde::Serialize;
use vle_core::linspace;

/// Number of grid points used when none is configured.
pub const DEFAULT_GRID_POINTS: usize = 50;

/// Model predictions at fixed temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCurves {
    pub x1: Vec<f64>,
    pub gamma1: Vec<f64>,
    pub gamma2: Vec<f64>,
    /// J/mol
    pub ge: Vec<f64>,
    /// Modified Raoult's law bubble pressure
    pub pressure_kpa: Vec<f64>,
    pub y1: Vec<f64>,
}

impl ModelCurves {
    /// Evaluate `model` with fitted `params` at `t_k` on `points` compositions
    /// from 0 to 1, given saturation pressures `psat_kpa` of both components.
    pub fn isothermal(
        model: &dyn CorrelationModel,
        params: &[f64],
        t_k: f64,
        psat_kpa: [f64; 2],
        points: usize,
    ) -> Self {
        let x1 = linspace(0.0, 1.0, points);
        let mut curves = Self {
            x1: Vec::with_capacity(points),
            gamma1: Vec::with_capacity(points),
            gamma2: Vec::with_capacity(points),
            ge: Vec::with_capacity(points),
            pressure_kpa: Vec::with_capacity(points),
            y1: Vec::with_capacity(points),
        };

        for x in x1 {
            let (g1, g2) = model.activity_coefficients(x, t_k, params);
            let p1 = x * g1 * psat_kpa[0];
            let p = p1 + (1.0 - x) * g2 * psat_kpa[1];
            curves.x1.push(x);
            curves.gamma1.push(g1);
            curves.gamma2.push(g2);
            curves.ge.push(model.excess_gibbs_energy(x, t_k, params));
            curves.pressure_kpa.push(p);
            curves.y1.push(p1 / p);
        }
        curves
    }
}

/// Ideal-solution reference at fixed temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaoultCurves {
    pub x1: Vec<f64>,
    pub pressure_kpa: Vec<f64>,
    pub y1: Vec<f64>,
}

impl RaoultCurves {
    pub fn isothermal(psat_kpa: [f64; 2], points: usize) -> Self {
        let x1 = linspace(0.0, 1.0, points);
        let pressure_kpa: Vec<f64> = x1
            .iter()
            .map(|x| x * psat_kpa[0] + (1.0 - x) * psat_kpa[1])
            .collect();
        let y1 = x1
            .iter()
            .zip(&pressure_kpa)
            .map(|(x, p)| x * psat_kpa[0] / p)
            .collect();
        Self {
            x1,
            pressure_kpa,
            y1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margules::Margules;

    #[test]
    fn raoult_endpoints() {
        let c = RaoultCurves::isothermal([60.0, 20.0], DEFAULT_GRID_POINTS);
        assert_eq!(c.x1.len(), 50);
        assert_eq!(c.pressure_kpa[0], 20.0);
        assert_eq!(c.pressure_kpa[49], 60.0);
        assert_eq!(c.y1[0], 0.0);
        assert_eq!(c.y1[49], 1.0);
    }

    #[test]
    fn zero_parameter_model_matches_raoult() {
        let m = ModelCurves::isothermal(&Margules, &[0.0], 300.0, [60.0, 20.0], 11);
        let r = RaoultCurves::isothermal([60.0, 20.0], 11);
        for i in 0..11 {
            assert!((m.pressure_kpa[i] - r.pressure_kpa[i]).abs() < 1e-12);
            assert!((m.y1[i] - r.y1[i]).abs() < 1e-12);
            assert_eq!(m.gamma1[i], 1.0);
        }
    }

    #[test]
    fn positive_deviation_raises_pressure() {
        let m = ModelCurves::isothermal(&Margules, &[2000.0], 300.0, [60.0, 20.0], 11);
        let r = RaoultCurves::isothermal([60.0, 20.0], 11);
        assert!(m.pressure_kpa[5] > r.pressure_kpa[5]);
        assert!(m.ge[5] > 0.0);
    }
}
