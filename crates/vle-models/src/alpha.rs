//! Constant relative volatility estimate (geometric mean).

use crate::dataset::ensure_interior;
use crate::error::{ModelError, ModelResult};
use crate::stats::{geometric_mean, r_squared};
use serde::Serialize;

/// R² below which the constant-volatility estimate is rejected.
pub const DEFAULT_ALPHA_R2_THRESHOLD: f64 = 0.80;

/// Outcome of [`estimate_alpha_gm`].
///
/// A rejected estimate is a normal result, not an error: the data are simply
/// not well described by a constant relative volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlphaEstimate {
    Accepted { alpha: f64, r_squared: f64 },
    Rejected { alpha: f64, r_squared: f64 },
}

impl AlphaEstimate {
    /// Alpha if accepted.
    pub fn usable(&self) -> Option<f64> {
        match self {
            AlphaEstimate::Accepted { alpha, .. } => Some(*alpha),
            AlphaEstimate::Rejected { .. } => None,
        }
    }

    pub fn r_squared(&self) -> f64 {
        match self {
            AlphaEstimate::Accepted { r_squared, .. } | AlphaEstimate::Rejected { r_squared, .. } => {
                *r_squared
            }
        }
    }
}

/// Equilibrium vapor fraction for constant relative volatility `alpha`.
pub fn constant_alpha_y(alpha: f64, x1: f64) -> f64 {
    alpha * x1 / (1.0 + (alpha - 1.0) * x1)
}

/// Geometric-mean relative volatility of `(x1, y1)` data.
///
/// Means below 1 are inverted. The estimate is accepted when the constant-alpha
/// curve reproduces `y1` with R² at or above `threshold`.
pub fn estimate_alpha_gm(x1: &[f64], y1: &[f64], threshold: f64) -> ModelResult<AlphaEstimate> {
    if x1.len() != y1.len() {
        return Err(ModelError::InvalidData {
            what: format!("x1 has {} points, y1 has {}", x1.len(), y1.len()),
        });
    }
    if x1.is_empty() {
        return Err(ModelError::InvalidData {
            what: "no points for relative volatility".to_string(),
        });
    }
    ensure_interior(x1, "x1")?;
    ensure_interior(y1, "y1")?;

    let pointwise: Vec<f64> = x1
        .iter()
        .zip(y1)
        .map(|(&x, &y)| y * (1.0 - x) / (x * (1.0 - y)))
        .collect();
    let mut alpha = geometric_mean(&pointwise);
    if alpha < 1.0 {
        alpha = 1.0 / alpha;
    }

    let predicted: Vec<f64> = x1.iter().map(|&x| constant_alpha_y(alpha, x)).collect();
    let r2 = r_squared(y1, &predicted);

    Ok(if r2 >= threshold {
        AlphaEstimate::Accepted {
            alpha,
            r_squared: r2,
        }
    } else {
        AlphaEstimate::Rejected {
            alpha,
            r_squared: r2,
        }
    })
}
