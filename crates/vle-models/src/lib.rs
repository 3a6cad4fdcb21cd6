//! vle-models: activity-coefficient correlations for binary VLE data.
//!
//! Provides:
//! - Validated isothermal/isobaric datasets and volatility ordering of the pair
//! - Experimental activity coefficients and excess Gibbs energy
//! - Geometric-mean relative volatility with an R² acceptance gate
//! - The [`CorrelationModel`] contract with Margules, Redlich-Kister, van Laar,
//!   Wohls, Wilson, NRTL and UNIQUAC implementations
//! - UNIQUAC regression on activity coefficients and T-x-y prediction
//! - Derived curves on a fixed composition grid
//!
//! # Example
//!
//! ```
//! use vle_models::{CorrelationModel, ExcessData, FitOptions, Margules};
//!
//! let x: Vec<f64> = (1..10).map(|i| i as f64 / 10.0).collect();
//! let ge: Vec<f64> = x.iter().map(|x| 1000.0 * x * (1.0 - x)).collect();
//! let data = ExcessData::isothermal(300.0, x, ge).unwrap();
//!
//! let fit = Margules.fit(&data, &FitOptions::default()).unwrap();
//! assert!((fit.parameters.values[0] - 1000.0).abs() < 1.0);
//! ```

pub mod alpha;
pub mod curves;
pub mod dataset;
pub mod error;
pub mod excess;
pub mod margules;
pub mod model;
pub mod nrtl;
pub mod pair;
pub mod redlich_kister;
pub mod stats;
pub mod uniquac;
pub mod van_laar;
pub mod wilson;
pub mod wohls;

// Re-exports
pub use alpha::{AlphaEstimate, DEFAULT_ALPHA_R2_THRESHOLD, constant_alpha_y, estimate_alpha_gm};
pub use curves::{DEFAULT_GRID_POINTS, ModelCurves, RaoultCurves};
pub use dataset::{Condition, VleDataset};
pub use error::{FailureKind, ModelError, ModelResult};
pub use excess::{ActivityData, ExcessData, ExperimentalExcess};
pub use margules::Margules;
pub use model::{
    CorrelationModel, DEFAULT_INITIAL_ENERGY, FitOptions, FitResult, ModelKind, ModelParameters,
};
pub use nrtl::Nrtl;
pub use pair::{CompoundPair, OrderedPair};
pub use redlich_kister::RedlichKister;
pub use stats::{geometric_mean, r_squared};
pub use uniquac::{CompositionTerms, TxyCurve, TxyPoint, Uniquac};
pub use van_laar::VanLaar;
pub use wilson::Wilson;
pub use wohls::Wohls;
