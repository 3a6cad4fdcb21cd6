//! Reference tables loaded once per process.

use crate::antoine::{AntoineRange, AntoineRecord};
use crate::density::{DensityRecord, molar_volume};
use crate::error::{PropsError, PropsResult};
use crate::provider::{MolarVolumeProvider, SaturationPressureProvider};
use crate::tables::parse_table;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

pub const ANTOINE_FILE: &str = "antoine.txt";
pub const DIPPR105_FILE: &str = "dippr105.txt";
pub const DENSITY_OVERRIDES_FILE: &str = "density_overrides.txt";
pub const MOLECULAR_WEIGHTS_FILE: &str = "molecular_weights.txt";
pub const UNIQUAC_FILE: &str = "uniquac.txt";

const BUNDLED_ANTOINE: &str = include_str!("../data/antoine.txt");
const BUNDLED_DIPPR105: &str = include_str!("../data/dippr105.txt");
const BUNDLED_DENSITY_OVERRIDES: &str = include_str!("../data/density_overrides.txt");
const BUNDLED_MOLECULAR_WEIGHTS: &str = include_str!("../data/molecular_weights.txt");
const BUNDLED_UNIQUAC: &str = include_str!("../data/uniquac.txt");

/// UNIQUAC structural constants of one compound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniquacSpecies {
    /// Volume parameter.
    pub r: f64,
    /// Surface-area parameter.
    pub q: f64,
}

/// Raw text of every reference table.
#[derive(Debug, Clone, Copy)]
pub struct TableSources<'a> {
    pub antoine: &'a str,
    pub dippr105: &'a str,
    pub density_overrides: &'a str,
    pub molecular_weights: &'a str,
    pub uniquac: &'a str,
}

impl TableSources<'static> {
    pub fn bundled() -> Self {
        Self {
            antoine: BUNDLED_ANTOINE,
            dippr105: BUNDLED_DIPPR105,
            density_overrides: BUNDLED_DENSITY_OVERRIDES,
            molecular_weights: BUNDLED_MOLECULAR_WEIGHTS,
            uniquac: BUNDLED_UNIQUAC,
        }
    }
}

/// Read-only property data keyed by canonical compound name.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    antoine: HashMap<String, AntoineRecord>,
    density: HashMap<String, DensityRecord>,
    molecular_weights: HashMap<String, f64>,
    uniquac: HashMap<String, UniquacSpecies>,
}

impl ReferenceData {
    /// Empty tables, to be filled with the `with_*` builders.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tables shipped with the crate.
    pub fn bundled() -> PropsResult<Self> {
        Self::from_sources(TableSources::bundled())
    }

    /// Process-wide bundled tables, parsed on first use.
    pub fn shared() -> PropsResult<&'static ReferenceData> {
        static SHARED: OnceLock<PropsResult<ReferenceData>> = OnceLock::new();
        SHARED
            .get_or_init(ReferenceData::bundled)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Load tables from `dir`; any file missing there falls back to the bundled copy.
    pub fn from_dir(dir: &Path) -> PropsResult<Self> {
        let read = |name: &str, fallback: &'static str| -> PropsResult<String> {
            let path = dir.join(name);
            if path.exists() {
                std::fs::read_to_string(&path).map_err(|e| PropsError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            } else {
                Ok(fallback.to_string())
            }
        };

        let antoine = read(ANTOINE_FILE, BUNDLED_ANTOINE)?;
        let dippr105 = read(DIPPR105_FILE, BUNDLED_DIPPR105)?;
        let density_overrides = read(DENSITY_OVERRIDES_FILE, BUNDLED_DENSITY_OVERRIDES)?;
        let molecular_weights = read(MOLECULAR_WEIGHTS_FILE, BUNDLED_MOLECULAR_WEIGHTS)?;
        let uniquac = read(UNIQUAC_FILE, BUNDLED_UNIQUAC)?;

        Self::from_sources(TableSources {
            antoine: &antoine,
            dippr105: &dippr105,
            density_overrides: &density_overrides,
            molecular_weights: &molecular_weights,
            uniquac: &uniquac,
        })
    }

    pub fn from_sources(sources: TableSources<'_>) -> PropsResult<Self> {
        let mut data = Self::empty();

        for rec in parse_table(ANTOINE_FILE, sources.antoine, 5)? {
            let v = &rec.values;
            data = data.with_antoine_range(
                &rec.name,
                AntoineRange {
                    t_min_c: v[0],
                    t_max_c: v[1],
                    a: v[2],
                    b: v[3],
                    c: v[4],
                },
            );
        }

        for rec in parse_table(DIPPR105_FILE, sources.dippr105, 6)? {
            let v = &rec.values;
            data = data.with_density(
                &rec.name,
                DensityRecord::Dippr105 {
                    a: v[0],
                    b: v[1],
                    c: v[2],
                    d: v[3],
                    t_min: v[4],
                    t_max: v[5],
                },
            );
        }

        // Overrides are applied after the correlations so they win.
        for rec in parse_table(DENSITY_OVERRIDES_FILE, sources.density_overrides, 1)? {
            data = data.with_density(&rec.name, DensityRecord::Constant { rho: rec.values[0] });
        }

        for rec in parse_table(MOLECULAR_WEIGHTS_FILE, sources.molecular_weights, 1)? {
            data = data.with_molecular_weight(&rec.name, rec.values[0]);
        }

        for rec in parse_table(UNIQUAC_FILE, sources.uniquac, 2)? {
            data = data.with_uniquac(
                &rec.name,
                UniquacSpecies {
                    r: rec.values[0],
                    q: rec.values[1],
                },
            );
        }

        debug!(
            antoine = data.antoine.len(),
            density = data.density.len(),
            molecular_weights = data.molecular_weights.len(),
            uniquac = data.uniquac.len(),
            "loaded reference tables"
        );

        Ok(data)
    }

    /// Append an Antoine range for `compound`.
    pub fn with_antoine_range(mut self, compound: &str, range: AntoineRange) -> Self {
        self.antoine
            .entry(compound.to_string())
            .or_default()
            .ranges
            .push(range);
        self
    }

    pub fn with_density(mut self, compound: &str, record: DensityRecord) -> Self {
        self.density.insert(compound.to_string(), record);
        self
    }

    pub fn with_molecular_weight(mut self, compound: &str, mw: f64) -> Self {
        self.molecular_weights.insert(compound.to_string(), mw);
        self
    }

    pub fn with_uniquac(mut self, compound: &str, species: UniquacSpecies) -> Self {
        self.uniquac.insert(compound.to_string(), species);
        self
    }

    pub fn antoine(&self, compound: &str) -> PropsResult<&AntoineRecord> {
        self.antoine
            .get(compound)
            .ok_or_else(|| unknown(compound, "antoine"))
    }

    pub fn density_record(&self, compound: &str) -> PropsResult<&DensityRecord> {
        self.density
            .get(compound)
            .ok_or_else(|| unknown(compound, "density"))
    }

    pub fn molecular_weight(&self, compound: &str) -> PropsResult<f64> {
        self.molecular_weights
            .get(compound)
            .copied()
            .ok_or_else(|| unknown(compound, "molecular weight"))
    }

    pub fn uniquac_species(&self, compound: &str) -> PropsResult<UniquacSpecies> {
        self.uniquac
            .get(compound)
            .copied()
            .ok_or_else(|| unknown(compound, "uniquac"))
    }

    /// Liquid density in kg/m3.
    pub fn density(&self, compound: &str, t_k: f64) -> PropsResult<f64> {
        self.density_record(compound)?.density(compound, t_k)
    }
}

fn unknown(compound: &str, table: &'static str) -> PropsError {
    PropsError::UnknownCompound {
        compound: compound.to_string(),
        table,
    }
}

impl SaturationPressureProvider for ReferenceData {
    fn psat_kpa(&self, compound: &str, t_k: f64) -> PropsResult<f64> {
        self.antoine(compound)?.psat_kpa(compound, t_k)
    }
}

impl MolarVolumeProvider for ReferenceData {
    fn molar_volume_m3(&self, compound: &str, t_k: f64) -> PropsResult<f64> {
        let mw = self.molecular_weight(compound)?;
        let rho = self.density(compound, t_k)?;
        Ok(molar_volume(mw, rho))
    }
}
