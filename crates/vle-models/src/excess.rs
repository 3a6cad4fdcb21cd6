//! Experimental activity coefficients and excess Gibbs energy.

use crate::dataset::{VleDataset, ensure_interior};
use crate::error::{ModelError, ModelResult};
use crate::pair::CompoundPair;
use serde::Serialize;
use vle_core::constants::rt;
use vle_core::xlogy;
use vle_props::SaturationPressureProvider;

/// Points on which a G^E-based model is regressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcessData {
    pub x1: Vec<f64>,
    pub t_k: Vec<f64>,
    /// Excess Gibbs energy (J/mol)
    pub ge: Vec<f64>,
}

impl ExcessData {
    pub fn new(x1: Vec<f64>, t_k: Vec<f64>, ge: Vec<f64>) -> ModelResult<Self> {
        check_lengths(x1.len(), &[("t_k", t_k.len()), ("ge", ge.len())])?;
        Ok(Self { x1, t_k, ge })
    }

    pub fn isothermal(t_k: f64, x1: Vec<f64>, ge: Vec<f64>) -> ModelResult<Self> {
        let t = vec![t_k; x1.len()];
        Self::new(x1, t, ge)
    }

    pub fn len(&self) -> usize {
        self.x1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x1.is_empty()
    }
}

/// Points on which an activity-coefficient model is regressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityData {
    pub x1: Vec<f64>,
    pub t_k: Vec<f64>,
    pub gamma1: Vec<f64>,
    pub gamma2: Vec<f64>,
}

impl ActivityData {
    pub fn new(
        x1: Vec<f64>,
        t_k: Vec<f64>,
        gamma1: Vec<f64>,
        gamma2: Vec<f64>,
    ) -> ModelResult<Self> {
        check_lengths(
            x1.len(),
            &[
                ("t_k", t_k.len()),
                ("gamma1", gamma1.len()),
                ("gamma2", gamma2.len()),
            ],
        )?;
        Ok(Self {
            x1,
            t_k,
            gamma1,
            gamma2,
        })
    }

    pub fn len(&self) -> usize {
        self.x1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x1.is_empty()
    }
}

fn check_lengths(expected: usize, series: &[(&str, usize)]) -> ModelResult<()> {
    for (name, len) in series {
        if *len != expected {
            return Err(ModelError::InvalidData {
                what: format!("{name} has {len} points, x1 has {expected}"),
            });
        }
    }
    Ok(())
}

/// Activity coefficients and G^E back-computed from measured VLE data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentalExcess {
    pub x1: Vec<f64>,
    pub t_k: Vec<f64>,
    pub gamma1: Vec<f64>,
    pub gamma2: Vec<f64>,
    /// Excess Gibbs energy (J/mol)
    pub ge: Vec<f64>,
}

impl ExperimentalExcess {
    /// Modified Raoult's law inversion with per-point saturation pressures (kPa).
    ///
    /// Pure-component points are rejected; strip them first.
    pub fn from_dataset(
        data: &VleDataset,
        p1_sat_kpa: &[f64],
        p2_sat_kpa: &[f64],
    ) -> ModelResult<Self> {
        check_lengths(
            data.len(),
            &[("p1_sat", p1_sat_kpa.len()), ("p2_sat", p2_sat_kpa.len())],
        )?;
        data.ensure_interior()?;

        let n = data.len();
        let mut gamma1 = Vec::with_capacity(n);
        let mut gamma2 = Vec::with_capacity(n);
        let mut ge = Vec::with_capacity(n);
        let t_k = data.temperatures_k();

        for i in 0..n {
            let x1 = data.x1()[i];
            let y1 = data.y1()[i];
            let p = data.pressure_kpa(i);
            let g1 = p * y1 / (x1 * p1_sat_kpa[i]);
            let g2 = p * (1.0 - y1) / ((1.0 - x1) * p2_sat_kpa[i]);
            let g = rt(t_k[i]) * (xlogy(x1, g1) + xlogy(1.0 - x1, g2));
            if !g.is_finite() {
                return Err(ModelError::Numeric {
                    what: format!("experimental G^E is {g} at x1 = {x1}"),
                });
            }
            gamma1.push(g1);
            gamma2.push(g2);
            ge.push(g);
        }

        Ok(Self {
            x1: data.x1().to_vec(),
            t_k,
            gamma1,
            gamma2,
            ge,
        })
    }

    /// Same as [`ExperimentalExcess::from_dataset`] with saturation pressures
    /// looked up at each point's temperature.
    pub fn from_provider<P>(data: &VleDataset, pair: &CompoundPair, provider: &P) -> ModelResult<Self>
    where
        P: SaturationPressureProvider + ?Sized,
    {
        ensure_interior(data.x1(), "x1")?;
        let t = data.temperatures_k();
        let p1 = provider.psat_kpa_many(&pair.first, &t)?;
        let p2 = provider.psat_kpa_many(&pair.second, &t)?;
        Self::from_dataset(data, &p1, &p2)
    }

    pub fn excess_data(&self) -> ExcessData {
        ExcessData {
            x1: self.x1.clone(),
            t_k: self.t_k.clone(),
            ge: self.ge.clone(),
        }
    }

    pub fn activity_data(&self) -> ActivityData {
        ActivityData {
            x1: self.x1.clone(),
            t_k: self.t_k.clone(),
            gamma1: self.gamma1.clone(),
            gamma2: self.gamma2.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideal_solution_has_zero_excess() {
        // Raoult's law data at 300 K with p1s = 40, p2s = 10.
        let x = vec![0.2, 0.5, 0.8];
        let p: Vec<f64> = x.iter().map(|x| 40.0 * x + 10.0 * (1.0 - x)).collect();
        let y: Vec<f64> = x.iter().zip(&p).map(|(x, p)| 40.0 * x / p).collect();
        let data = VleDataset::isothermal(300.0, x, y, p).unwrap();
        let ex = ExperimentalExcess::from_dataset(&data, &[40.0; 3], &[10.0; 3]).unwrap();
        for i in 0..3 {
            assert!((ex.gamma1[i] - 1.0).abs() < 1e-12);
            assert!((ex.gamma2[i] - 1.0).abs() < 1e-12);
            assert!(ex.ge[i].abs() < 1e-9);
        }
    }

    #[test]
    fn positive_deviation() {
        let data = VleDataset::isothermal(300.0, vec![0.5], vec![0.7], vec![40.0]).unwrap();
        let ex = ExperimentalExcess::from_dataset(&data, &[40.0], &[20.0]).unwrap();
        assert!((ex.gamma1[0] - 1.4).abs() < 1e-12);
        assert!((ex.gamma2[0] - 1.2).abs() < 1e-12);
        let expected = rt(300.0) * (0.5 * 1.4f64.ln() + 0.5 * 1.2f64.ln());
        assert!((ex.ge[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn pure_points_are_degenerate() {
        let data =
            VleDataset::isothermal(300.0, vec![0.0, 0.5], vec![0.0, 0.7], vec![20.0, 40.0]).unwrap();
        let err = ExperimentalExcess::from_dataset(&data, &[40.0; 2], &[20.0; 2]).unwrap_err();
        assert!(matches!(err, ModelError::DegenerateComposition { .. }));
    }

    #[test]
    fn psat_length_checked() {
        let data = VleDataset::isothermal(300.0, vec![0.5], vec![0.7], vec![40.0]).unwrap();
        assert!(ExperimentalExcess::from_dataset(&data, &[40.0, 1.0], &[20.0]).is_err());
    }
}
