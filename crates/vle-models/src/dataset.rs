//! Binary VLE measurements.
//!
//! A dataset is either isothermal (pressure measured at fixed temperature) or
//! isobaric (temperature measured at fixed pressure). Compositions always refer
//! to component 1 of the pair the data were recorded for.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use vle_core::{ensure_finite, ensure_mole_fractions};

/// The state variable held fixed during the measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    Isothermal { temperature_k: f64 },
    Isobaric { pressure_kpa: f64 },
}

impl Condition {
    pub fn is_isothermal(&self) -> bool {
        matches!(self, Condition::Isothermal { .. })
    }

    /// Label of the measured series for this condition.
    pub fn measured_label(&self) -> &'static str {
        match self {
            Condition::Isothermal { .. } => "pressure_kpa",
            Condition::Isobaric { .. } => "temperature_k",
        }
    }
}

/// Validated binary VLE data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VleDataset {
    condition: Condition,
    x1: Vec<f64>,
    y1: Vec<f64>,
    /// Pressure in kPa (isothermal) or temperature in K (isobaric)
    measured: Vec<f64>,
}

impl VleDataset {
    pub fn new(
        condition: Condition,
        x1: Vec<f64>,
        y1: Vec<f64>,
        measured: Vec<f64>,
    ) -> ModelResult<Self> {
        match condition {
            Condition::Isothermal { temperature_k } => {
                if !(temperature_k.is_finite() && temperature_k > 0.0) {
                    return Err(ModelError::InvalidData {
                        what: format!("temperature must be positive, got {temperature_k}"),
                    });
                }
            }
            Condition::Isobaric { pressure_kpa } => {
                if !(pressure_kpa.is_finite() && pressure_kpa > 0.0) {
                    return Err(ModelError::InvalidData {
                        what: format!("pressure must be positive, got {pressure_kpa}"),
                    });
                }
            }
        }

        if x1.len() != y1.len() || x1.len() != measured.len() {
            return Err(ModelError::InvalidData {
                what: format!(
                    "series lengths differ: x1={}, y1={}, {}={}",
                    x1.len(),
                    y1.len(),
                    condition.measured_label(),
                    measured.len()
                ),
            });
        }
        ensure_mole_fractions(&x1, "x1")?;
        ensure_mole_fractions(&y1, "y1")?;
        for &v in &measured {
            ensure_finite(v, "measured value")?;
            if v <= 0.0 {
                return Err(ModelError::InvalidData {
                    what: format!("{} must be positive, got {v}", condition.measured_label()),
                });
            }
        }

        Ok(Self {
            condition,
            x1,
            y1,
            measured,
        })
    }

    pub fn isothermal(
        temperature_k: f64,
        x1: Vec<f64>,
        y1: Vec<f64>,
        pressure_kpa: Vec<f64>,
    ) -> ModelResult<Self> {
        Self::new(
            Condition::Isothermal { temperature_k },
            x1,
            y1,
            pressure_kpa,
        )
    }

    pub fn isobaric(
        pressure_kpa: f64,
        x1: Vec<f64>,
        y1: Vec<f64>,
        temperature_k: Vec<f64>,
    ) -> ModelResult<Self> {
        Self::new(
            Condition::Isobaric { pressure_kpa },
            x1,
            y1,
            temperature_k,
        )
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn x1(&self) -> &[f64] {
        &self.x1
    }

    pub fn y1(&self) -> &[f64] {
        &self.y1
    }

    pub fn measured(&self) -> &[f64] {
        &self.measured
    }

    pub fn len(&self) -> usize {
        self.x1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x1.is_empty()
    }

    /// System pressure at point `i` in kPa.
    pub fn pressure_kpa(&self, i: usize) -> f64 {
        match self.condition {
            Condition::Isothermal { .. } => self.measured[i],
            Condition::Isobaric { pressure_kpa } => pressure_kpa,
        }
    }

    /// Temperature at point `i` in K.
    pub fn temperature_k(&self, i: usize) -> f64 {
        match self.condition {
            Condition::Isothermal { temperature_k } => temperature_k,
            Condition::Isobaric { .. } => self.measured[i],
        }
    }

    /// Temperature per point in K.
    pub fn temperatures_k(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.temperature_k(i)).collect()
    }

    /// Temperature used to rank volatility: the fixed temperature, or the
    /// first measured temperature of isobaric data.
    pub fn reference_temperature_k(&self) -> Option<f64> {
        match self.condition {
            Condition::Isothermal { temperature_k } => Some(temperature_k),
            Condition::Isobaric { .. } => self.measured.first().copied(),
        }
    }

    /// Drop every point with `x1` exactly 0 or 1.
    ///
    /// Returns the reduced dataset and the number of points removed.
    pub fn strip_pure_points(&self) -> (Self, usize) {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&i| self.x1[i] != 0.0 && self.x1[i] != 1.0)
            .collect();
        let removed = self.len() - keep.len();
        let stripped = Self {
            condition: self.condition,
            x1: keep.iter().map(|&i| self.x1[i]).collect(),
            y1: keep.iter().map(|&i| self.y1[i]).collect(),
            measured: keep.iter().map(|&i| self.measured[i]).collect(),
        };
        (stripped, removed)
    }

    /// The same data expressed for the swapped pair (`x1 -> 1 - x1`).
    pub fn mirrored(&self) -> Self {
        Self {
            condition: self.condition,
            x1: self.x1.iter().map(|x| 1.0 - x).collect(),
            y1: self.y1.iter().map(|y| 1.0 - y).collect(),
            measured: self.measured.clone(),
        }
    }

    /// Fail on the first pure-component point.
    pub fn ensure_interior(&self) -> ModelResult<()> {
        ensure_interior(&self.x1, "x1")
    }
}

/// Fail with [`ModelError::DegenerateComposition`] on any 0 or 1 entry.
pub fn ensure_interior(values: &[f64], what: &'static str) -> ModelResult<()> {
    match values.iter().position(|&v| v <= 0.0 || v >= 1.0) {
        Some(index) => Err(ModelError::DegenerateComposition {
            what,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}
