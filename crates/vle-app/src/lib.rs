//! Shared application service layer for the VLE workspace.
//!
//! This crate gives front ends one entry point for loading configs and
//! datasets, looking up pure-component properties and running complete
//! isothermal or isobaric analyses.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod dataset_io;
pub mod error;
pub mod query;

// Re-export key types for convenience
pub use analysis::{
    AlphaSummary, AnalysisReport, AnalysisSession, IsobaricReport, IsothermalReport, ModelFailure,
    ModelOutcome, ModelReport,
};
pub use cache::{FitCache, fit_fingerprint};
pub use config::{AnalysisConfig, load_config, parse_config};
pub use dataset_io::{DatasetFile, LoadedDataset, load_dataset, parse_dataset};
pub use error::{AppError, AppResult};
pub use query::{
    CompoundSummary, PropertyValue, list_compounds, liquid_molar_volume, saturation_pressure,
};
