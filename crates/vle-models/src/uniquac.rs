//! UNIQUAC activity model, regression on activity coefficients and implicit
//! bubble-temperature prediction for isobaric data.
//!
//! Structural constants and the derived `l` values are fixed when the model
//! is built; every composition-dependent intermediate lives in a
//! [`CompositionTerms`] value computed per call.

use crate::dataset::ensure_interior;
use crate::error::{ModelError, ModelResult};
use crate::excess::ActivityData;
use crate::model::{CorrelationModel, FitOptions, FitResult, ModelKind, ModelParameters};
use crate::pair::CompoundPair;
use crate::stats::r_squared;
use nalgebra::DVector;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use vle_core::constants::rt;
use vle_core::linspace;
use vle_props::{ReferenceData, SaturationPressureProvider, UniquacSpecies};
use vle_solver::{SecantConfig, least_squares, secant};

/// Half the lattice coordination number.
pub const HALF_COORDINATION: f64 = 5.0;

/// Volume and surface fractions at one composition.
///
/// The ratios `phi / x` and `theta / phi` are kept separately so pure-component
/// limits stay finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionTerms {
    pub x: [f64; 2],
    pub phi: [f64; 2],
    pub theta: [f64; 2],
    pub phi_over_x: [f64; 2],
    pub theta_over_phi: [f64; 2],
}

/// UNIQUAC for one ordered pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniquac {
    species: [UniquacSpecies; 2],
    l: [f64; 2],
}

impl Uniquac {
    pub fn new(first: UniquacSpecies, second: UniquacSpecies) -> ModelResult<Self> {
        for s in [first, second] {
            if !(s.r > 0.0 && s.q > 0.0 && s.r.is_finite() && s.q.is_finite()) {
                return Err(ModelError::InvalidData {
                    what: format!("UNIQUAC r and q must be positive, got r={} q={}", s.r, s.q),
                });
            }
        }
        let l = |s: UniquacSpecies| HALF_COORDINATION * (s.r - s.q) - (s.r - 1.0);
        Ok(Self {
            species: [first, second],
            l: [l(first), l(second)],
        })
    }

    /// Look up r and q of both components.
    pub fn from_reference(data: &ReferenceData, pair: &CompoundPair) -> ModelResult<Self> {
        Self::new(
            data.uniquac_species(&pair.first)?,
            data.uniquac_species(&pair.second)?,
        )
    }

    pub fn species(&self) -> [UniquacSpecies; 2] {
        self.species
    }

    pub fn l_values(&self) -> [f64; 2] {
        self.l
    }

    pub fn composition_terms(&self, x1: f64) -> CompositionTerms {
        let [s1, s2] = self.species;
        let x = [x1, 1.0 - x1];
        let sum_r = x[0] * s1.r + x[1] * s2.r;
        let sum_q = x[0] * s1.q + x[1] * s2.q;
        let phi_over_x = [s1.r / sum_r, s2.r / sum_r];
        let theta_over_phi = [
            s1.q * sum_r / (s1.r * sum_q),
            s2.q * sum_r / (s2.r * sum_q),
        ];
        CompositionTerms {
            x,
            phi: [x[0] * phi_over_x[0], x[1] * phi_over_x[1]],
            theta: [x[0] * s1.q / sum_q, x[1] * s2.q / sum_q],
            phi_over_x,
            theta_over_phi,
        }
    }

    /// Staverman-Guggenheim size and shape contribution.
    pub fn ln_gamma_combinatorial(&self, terms: &CompositionTerms) -> (f64, f64) {
        let sum_xl = terms.x[0] * self.l[0] + terms.x[1] * self.l[1];
        let part = |i: usize| {
            terms.phi_over_x[i].ln()
                + HALF_COORDINATION * self.species[i].q * terms.theta_over_phi[i].ln()
                + self.l[i]
                - terms.phi_over_x[i] * sum_xl
        };
        (part(0), part(1))
    }

    /// Energetic contribution with `tau12 = exp(-A/RT)`, `tau21 = exp(-B/RT)`.
    pub fn ln_gamma_residual(&self, terms: &CompositionTerms, t_k: f64, params: &[f64]) -> (f64, f64) {
        let rt = rt(t_k);
        let tau12 = (-params[0] / rt).exp();
        let tau21 = (-params[1] / rt).exp();
        let [t1, t2] = terms.theta;
        let s1 = t1 + t2 * tau21;
        let s2 = t1 * tau12 + t2;
        let [q1, q2] = [self.species[0].q, self.species[1].q];
        (
            q1 * (1.0 - s1.ln() - t1 / s1 - t2 * tau12 / s2),
            q2 * (1.0 - s2.ln() - t1 * tau21 / s1 - t2 / s2),
        )
    }

    /// Fit `A` and `B` to activity coefficients with relative residuals
    /// `(gamma_model - gamma_obs) / gamma_obs` over both components.
    ///
    /// R² is computed on the concatenated `[gamma1; gamma2]` series.
    pub fn fit_activity(&self, data: &ActivityData, options: &FitOptions) -> ModelResult<FitResult> {
        if data.is_empty() {
            return Err(ModelError::InvalidData {
                what: "no points to fit UNIQUAC".to_string(),
            });
        }
        ensure_interior(&data.x1, "x1")?;
        let n = data.len();

        let model_gammas = |p: &[f64]| -> Vec<(f64, f64)> {
            (0..n)
                .map(|i| self.activity_coefficients(data.x1[i], data.t_k[i], p))
                .collect()
        };
        let residuals = |p: &DVector<f64>| -> ModelResult<DVector<f64>> {
            let gammas = model_gammas(p.as_slice());
            let mut r = DVector::zeros(2 * n);
            for (i, (g1, g2)) in gammas.into_iter().enumerate() {
                r[i] = (g1 - data.gamma1[i]) / data.gamma1[i];
                r[n + i] = (g2 - data.gamma2[i]) / data.gamma2[i];
            }
            Ok(r)
        };

        debug!(points = n, "fitting UNIQUAC to activity coefficients");
        let x0 = DVector::from_vec(self.initial_guess(options.initial_energy));
        let solution = least_squares(x0, residuals, &options.solver)?;
        let values = solution.x.as_slice().to_vec();

        let gammas = model_gammas(&values);
        let predicted: Vec<f64> = gammas
            .iter()
            .map(|g| g.0)
            .chain(gammas.iter().map(|g| g.1))
            .collect();
        let observed: Vec<f64> = data.gamma1.iter().chain(&data.gamma2).copied().collect();
        let r2 = r_squared(&observed, &predicted);
        debug!(
            evaluations = solution.evaluations,
            r_squared = r2,
            "UNIQUAC fit finished"
        );

        Ok(FitResult {
            model: ModelKind::Uniquac,
            parameters: ModelParameters::new(self.parameter_names(), values),
            r_squared: r2,
            cost: solution.cost,
            evaluations: solution.evaluations,
        })
    }

    /// Solve `gamma1 x1 Psat1(T) + gamma2 x2 Psat2(T) = P` for `T`, starting at `t_guess`.
    #[allow(clippy::too_many_arguments)]
    pub fn bubble_temperature<P>(
        &self,
        params: &[f64],
        pair: &CompoundPair,
        provider: &P,
        pressure_kpa: f64,
        x1: f64,
        t_guess: f64,
        config: &SecantConfig,
    ) -> ModelResult<TxyPoint>
    where
        P: SaturationPressureProvider + ?Sized,
    {
        let x2 = 1.0 - x1;
        let partials = |t: f64| -> ModelResult<(f64, f64)> {
            let (g1, g2) = self.activity_coefficients(x1, t, params);
            let p1 = if x1 > 0.0 {
                g1 * x1 * provider.psat_kpa(&pair.first, t)?
            } else {
                0.0
            };
            let p2 = if x2 > 0.0 {
                g2 * x2 * provider.psat_kpa(&pair.second, t)?
            } else {
                0.0
            };
            Ok((p1, p2))
        };

        let root = secant(
            |t| {
                let (p1, p2) = partials(t)?;
                Ok::<f64, ModelError>(p1 + p2 - pressure_kpa)
            },
            t_guess,
            config,
        )?;
        let (p1, _) = partials(root.x)?;

        Ok(TxyPoint {
            x1,
            temperature_k: root.x,
            y1: p1 / pressure_kpa,
        })
    }

    /// Predicted T-x-y curve on `points` evenly spaced compositions.
    ///
    /// Each point is seeded by linear interpolation from `t_range.1` at `x1 = 0`
    /// to `t_range.0` at `x1 = 1` and solved independently. Points whose root
    /// find fails are logged and left empty.
    #[allow(clippy::too_many_arguments)]
    pub fn predict_txy<P>(
        &self,
        params: &[f64],
        pair: &CompoundPair,
        provider: &P,
        pressure_kpa: f64,
        t_range: (f64, f64),
        points: usize,
        config: &SecantConfig,
    ) -> TxyCurve
    where
        P: SaturationPressureProvider + ?Sized,
    {
        let (t_min, t_max) = t_range;
        let x1 = linspace(0.0, 1.0, points);
        let states: Vec<Option<TxyPoint>> = x1
            .par_iter()
            .map(|&x| {
                let t_guess = t_max - x * (t_max - t_min);
                match self.bubble_temperature(params, pair, provider, pressure_kpa, x, t_guess, config) {
                    Ok(point) => Some(point),
                    Err(e) => {
                        warn!(x1 = x, error = %e, "bubble temperature failed");
                        None
                    }
                }
            })
            .collect();

        let num_successful = states.iter().filter(|s| s.is_some()).count();
        let num_failed = states.len() - num_successful;
        TxyCurve {
            x1,
            states,
            num_successful,
            num_failed,
        }
    }
}

impl CorrelationModel for Uniquac {
    fn kind(&self) -> ModelKind {
        ModelKind::Uniquac
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["A", "B"]
    }

    fn constants(&self) -> Vec<f64> {
        let [s1, s2] = self.species;
        vec![s1.r, s1.q, s2.r, s2.q]
    }

    fn excess_gibbs_energy(&self, x1: f64, t_k: f64, params: &[f64]) -> f64 {
        let (l1, l2) = self.ln_activity_coefficients(x1, t_k, params);
        let mut g = 0.0;
        if x1 > 0.0 {
            g += x1 * l1;
        }
        if x1 < 1.0 {
            g += (1.0 - x1) * l2;
        }
        rt(t_k) * g
    }

    fn ln_activity_coefficients(&self, x1: f64, t_k: f64, params: &[f64]) -> (f64, f64) {
        let terms = self.composition_terms(x1);
        let (c1, c2) = self.ln_gamma_combinatorial(&terms);
        let (r1, r2) = self.ln_gamma_residual(&terms, t_k, params);
        (c1 + r1, c2 + r2)
    }
}

/// One solved bubble point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TxyPoint {
    pub x1: f64,
    pub temperature_k: f64,
    pub y1: f64,
}

/// Predicted isobaric curve; failed compositions hold `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxyCurve {
    pub x1: Vec<f64>,
    pub states: Vec<Option<TxyPoint>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl TxyCurve {
    pub fn points(&self) -> impl Iterator<Item = &TxyPoint> {
        self.states.iter().flatten()
    }

    pub fn temperatures_k(&self) -> Vec<f64> {
        self.points().map(|p| p.temperature_k).collect()
    }

    pub fn y1(&self) -> Vec<f64> {
        self.points().map(|p| p.y1).collect()
    }
}
