//! The shared contract of the activity-coefficient correlations.
//!
//! Every model maps `(x1, T, params)` to an excess Gibbs energy and the two
//! activity coefficients derived from it. Fitting is a Levenberg-Marquardt
//! regression of the closed-form G^E against experimental values; models with
//! a different regression target override [`CorrelationModel::fit`] or offer
//! their own entry point.

use crate::dataset::ensure_interior;
use crate::error::{ModelError, ModelResult};
use crate::excess::ExcessData;
use crate::stats::r_squared;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use vle_solver::{LeastSquaresConfig, least_squares};

/// Default starting magnitude of every energy parameter (J/mol).
pub const DEFAULT_INITIAL_ENERGY: f64 = 1000.0;

/// Model family identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    Margules,
    RedlichKister,
    VanLaar,
    Wohls,
    Wilson,
    Nrtl,
    Uniquac,
}

impl ModelKind {
    pub const ALL: [ModelKind; 7] = [
        ModelKind::Margules,
        ModelKind::RedlichKister,
        ModelKind::VanLaar,
        ModelKind::Wohls,
        ModelKind::Wilson,
        ModelKind::Nrtl,
        ModelKind::Uniquac,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Margules => "Margules",
            ModelKind::RedlichKister => "Redlich-Kister",
            ModelKind::VanLaar => "van Laar",
            ModelKind::Wohls => "Wohls",
            ModelKind::Wilson => "Wilson",
            ModelKind::Nrtl => "NRTL",
            ModelKind::Uniquac => "UNIQUAC",
        }
    }

    /// Whether the model needs liquid molar volumes of both components.
    pub fn needs_volumes(&self) -> bool {
        matches!(self, ModelKind::Wohls | ModelKind::Wilson)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "margules" => Ok(ModelKind::Margules),
            "redlichkister" | "rk" => Ok(ModelKind::RedlichKister),
            "vanlaar" => Ok(ModelKind::VanLaar),
            "wohls" => Ok(ModelKind::Wohls),
            "wilson" => Ok(ModelKind::Wilson),
            "nrtl" => Ok(ModelKind::Nrtl),
            "uniquac" => Ok(ModelKind::Uniquac),
            _ => Err(ModelError::InvalidData {
                what: format!("unknown model '{s}'"),
            }),
        }
    }
}

/// Named parameter vector produced by one fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub names: Vec<String>,
    /// J/mol
    pub values: Vec<f64>,
}

impl ModelParameters {
    pub fn new(names: &[&str], values: Vec<f64>) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            values,
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Regression settings shared by every model.
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    /// Starting value of every energy parameter (J/mol)
    pub initial_energy: f64,
    pub solver: LeastSquaresConfig,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            initial_energy: DEFAULT_INITIAL_ENERGY,
            solver: LeastSquaresConfig::default(),
        }
    }
}

/// Fitted parameters and goodness of fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    pub model: ModelKind,
    pub parameters: ModelParameters,
    pub r_squared: f64,
    /// Half the residual sum of squares at the optimum
    pub cost: f64,
    pub evaluations: usize,
}

/// One activity-coefficient correlation for a binary mixture.
pub trait CorrelationModel: Send + Sync {
    fn kind(&self) -> ModelKind;

    fn parameter_names(&self) -> &'static [&'static str];

    /// Fixed model constants (volumes, structural parameters) that a fit depends on.
    fn constants(&self) -> Vec<f64> {
        Vec::new()
    }

    /// Excess Gibbs energy (J/mol) at liquid composition `x1` and `t_k`.
    fn excess_gibbs_energy(&self, x1: f64, t_k: f64, params: &[f64]) -> f64;

    /// `(ln gamma1, ln gamma2)`.
    fn ln_activity_coefficients(&self, x1: f64, t_k: f64, params: &[f64]) -> (f64, f64);

    fn activity_coefficients(&self, x1: f64, t_k: f64, params: &[f64]) -> (f64, f64) {
        let (l1, l2) = self.ln_activity_coefficients(x1, t_k, params);
        (l1.exp(), l2.exp())
    }

    fn initial_guess(&self, energy: f64) -> Vec<f64> {
        vec![energy; self.parameter_names().len()]
    }

    fn goodness_of_fit(&self, observed: &[f64], predicted: &[f64]) -> f64 {
        r_squared(observed, predicted)
    }

    /// Least-squares fit of the closed-form G^E to `data`.
    ///
    /// Pure-component points are rejected with
    /// [`ModelError::DegenerateComposition`].
    fn fit(&self, data: &ExcessData, options: &FitOptions) -> ModelResult<FitResult> {
        if data.is_empty() {
            return Err(ModelError::InvalidData {
                what: format!("no points to fit {}", self.kind()),
            });
        }
        ensure_interior(&data.x1, "x1")?;

        let n = data.len();
        let residuals = |p: &DVector<f64>| -> ModelResult<DVector<f64>> {
            let p = p.as_slice();
            Ok(DVector::from_iterator(
                n,
                (0..n).map(|i| self.excess_gibbs_energy(data.x1[i], data.t_k[i], p) - data.ge[i]),
            ))
        };

        debug!(model = %self.kind(), points = n, "fitting excess Gibbs energy");
        let x0 = DVector::from_vec(self.initial_guess(options.initial_energy));
        let solution = least_squares(x0, residuals, &options.solver)?;
        let values = solution.x.as_slice().to_vec();

        let predicted: Vec<f64> = (0..n)
            .map(|i| self.excess_gibbs_energy(data.x1[i], data.t_k[i], &values))
            .collect();
        let r2 = self.goodness_of_fit(&data.ge, &predicted);
        debug!(
            model = %self.kind(),
            evaluations = solution.evaluations,
            r_squared = r2,
            "fit finished"
        );

        Ok(FitResult {
            model: self.kind(),
            parameters: ModelParameters::new(self.parameter_names(), values),
            r_squared: r2,
            cost: solution.cost,
            evaluations: solution.evaluations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_names() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.name().parse::<ModelKind>().unwrap(), kind);
        }
        assert_eq!("redlich_kister".parse::<ModelKind>().unwrap(), ModelKind::RedlichKister);
        assert!("unifac".parse::<ModelKind>().is_err());
    }

    #[test]
    fn only_volume_models_need_volumes() {
        let needing: Vec<ModelKind> = ModelKind::ALL
            .into_iter()
            .filter(|k| k.needs_volumes())
            .collect();
        assert_eq!(needing, vec![ModelKind::Wohls, ModelKind::Wilson]);
    }

    #[test]
    fn parameters_by_name() {
        let p = ModelParameters::new(&["A", "B"], vec![1.0, 2.0]);
        assert_eq!(p.get("B"), Some(2.0));
        assert_eq!(p.get("C"), None);
    }
}
