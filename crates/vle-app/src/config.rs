//! Analysis configuration, loaded from YAML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vle_models::nrtl::DEFAULT_NRTL_ALPHA;
use vle_models::{
    DEFAULT_ALPHA_R2_THRESHOLD, DEFAULT_GRID_POINTS, DEFAULT_INITIAL_ENERGY, FitOptions, ModelKind,
};
use vle_solver::{LeastSquaresConfig, SecantConfig};

use crate::error::{AppError, AppResult};

/// Settings for one analysis session. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Compositions in the derived model curves
    pub grid_points: usize,
    /// Compositions in the predicted T-x-y curve
    pub txy_points: usize,
    /// R² below which the relative volatility estimate is withheld
    pub alpha_r2_threshold: f64,
    /// Residual evaluation budget per fit
    pub max_evaluations: usize,
    /// Starting value of every energy parameter (J/mol)
    pub initial_energy: f64,
    /// NRTL non-randomness
    pub nrtl_alpha: f64,
    /// Directory overriding the bundled reference tables
    pub reference_dir: Option<PathBuf>,
    /// Models fitted to isothermal data
    pub models: Vec<ModelKind>,
    /// Reuse fits for identical inputs within a session
    pub use_cache: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grid_points: DEFAULT_GRID_POINTS,
            txy_points: 20,
            alpha_r2_threshold: DEFAULT_ALPHA_R2_THRESHOLD,
            max_evaluations: LeastSquaresConfig::default().max_evaluations,
            initial_energy: DEFAULT_INITIAL_ENERGY,
            nrtl_alpha: DEFAULT_NRTL_ALPHA,
            reference_dir: None,
            models: ModelKind::ALL.to_vec(),
            use_cache: true,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.grid_points < 2 {
            return Err(AppError::Config(format!(
                "grid_points must be at least 2, got {}",
                self.grid_points
            )));
        }
        if self.txy_points < 2 {
            return Err(AppError::Config(format!(
                "txy_points must be at least 2, got {}",
                self.txy_points
            )));
        }
        if !self.alpha_r2_threshold.is_finite() {
            return Err(AppError::Config(
                "alpha_r2_threshold must be finite".to_string(),
            ));
        }
        if self.max_evaluations == 0 {
            return Err(AppError::Config(
                "max_evaluations must be positive".to_string(),
            ));
        }
        if !self.initial_energy.is_finite() {
            return Err(AppError::Config(
                "initial_energy must be finite".to_string(),
            ));
        }
        if !(self.nrtl_alpha.is_finite() && self.nrtl_alpha > 0.0) {
            return Err(AppError::Config(format!(
                "nrtl_alpha must be positive, got {}",
                self.nrtl_alpha
            )));
        }
        Ok(())
    }

    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            initial_energy: self.initial_energy,
            solver: LeastSquaresConfig {
                max_evaluations: self.max_evaluations,
                ..LeastSquaresConfig::default()
            },
        }
    }

    pub fn secant_config(&self) -> SecantConfig {
        SecantConfig::default()
    }
}

/// Load and validate a config from a YAML file.
pub fn load_config(path: &Path) -> AppResult<AnalysisConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> AppResult<AnalysisConfig> {
    let config: AnalysisConfig = serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
    config.validate()?;
    Ok(config)
}
