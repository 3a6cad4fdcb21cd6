//! Dataset files: YAML documents holding one binary VLE table.
//!
//! ```yaml
//! name: Ethanol / Water at 323.15 K
//! components: [Ethanol, Water]
//! condition:
//!   kind: isothermal
//!   temperature_k: 323.15
//! x1: [0.0, 0.1, ...]
//! y1: [0.0, 0.4, ...]
//! pressure_kpa: [12.3, 19.8, ...]
//! ```
//!
//! Isobaric files use `kind: isobaric`, `pressure_kpa: <scalar>` in the
//! condition and a `temperature_k` series instead.

use std::path::Path;

use serde::{Deserialize, Serialize};
use vle_models::{CompoundPair, Condition, VleDataset};
use vle_props::resolve_compound;

use crate::error::{AppError, AppResult};

/// On-disk layout of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub name: Option<String>,
    pub components: [String; 2],
    pub condition: Condition,
    pub x1: Vec<f64>,
    pub y1: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pressure_kpa: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub temperature_k: Vec<f64>,
}

/// A validated dataset with canonical compound names.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub name: String,
    pub pair: CompoundPair,
    pub data: VleDataset,
}

impl DatasetFile {
    pub fn into_loaded(self) -> AppResult<LoadedDataset> {
        let [first, second] = &self.components;
        let pair = CompoundPair::new(canonical(first)?, canonical(second)?);
        if pair.first == pair.second {
            return Err(AppError::Dataset(format!(
                "components must differ, got '{}' twice",
                pair.first
            )));
        }

        let measured = match self.condition {
            Condition::Isothermal { .. } => self.pressure_kpa,
            Condition::Isobaric { .. } => self.temperature_k,
        };
        let name = self
            .name
            .unwrap_or_else(|| format!("{} / {}", pair.first, pair.second));
        let data = VleDataset::new(self.condition, self.x1, self.y1, measured)
            .map_err(|e| AppError::Dataset(format!("{}: {}", name, e)))?;

        Ok(LoadedDataset { name, pair, data })
    }
}

fn canonical(name: &str) -> AppResult<String> {
    resolve_compound(name)
        .map(|entry| entry.canonical_id.to_string())
        .ok_or_else(|| AppError::UnknownCompound(name.to_string()))
}

/// Load a dataset from a YAML file.
pub fn load_dataset(path: &Path) -> AppResult<LoadedDataset> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::DatasetFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_dataset(&content)
}

pub fn parse_dataset(content: &str) -> AppResult<LoadedDataset> {
    let file: DatasetFile = serde_yaml::from_str(content)
        .map_err(|e| AppError::Dataset(format!("Failed to parse dataset YAML: {}", e)))?;
    file.into_loaded()
}
