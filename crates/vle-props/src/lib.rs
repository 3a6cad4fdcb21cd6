//! vle-props: pure-component property providers.
//!
//! Provides:
//! - Compound catalog (canonical names, display names, aliases)
//! - Flat `name!value!value` reference-table parsing
//! - Antoine saturation pressure with temperature sub-ranges
//! - DIPPR-105 liquid density, constant-density overrides and molar volume
//! - UNIQUAC structural constants (r, q)
//!
//! # Architecture
//!
//! Correlation models consume the [`SaturationPressureProvider`] and
//! [`MolarVolumeProvider`] traits only. [`ReferenceData`] is the table-backed
//! implementation; the bundled tables are parsed once per process through
//! [`ReferenceData::shared`].
//!
//! # Example
//!
//! ```
//! use vle_props::{ReferenceData, SaturationPressureProvider};
//!
//! let data = ReferenceData::shared().unwrap();
//! let p = data.psat_kpa("Ethanol", 351.4).unwrap();
//! assert!((p - 101.3).abs() < 2.0);
//! ```

pub mod antoine;
pub mod catalog;
pub mod density;
pub mod error;
pub mod provider;
pub mod reference;
pub mod tables;

// Re-exports for ergonomics
pub use antoine::{AntoineRange, AntoineRecord};
pub use catalog::{
    CompoundCatalogEntry, compound_catalog, filter_compound_catalog, resolve_compound,
};
pub use density::{DensityRecord, molar_volume};
pub use error::{PropsError, PropsResult};
pub use provider::{MolarVolumeProvider, SaturationPressureProvider};
pub use reference::{ReferenceData, TableSources, UniquacSpecies};
