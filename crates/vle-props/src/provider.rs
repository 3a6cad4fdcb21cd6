//! Provider traits consumed by the correlation models.
//!
//! The models only see these traits, so any table source (bundled files, a user
//! directory, an in-memory fixture) can back an analysis.

use crate::error::PropsResult;
use vle_core::units::{MolarVolume, Pressure, Temperature, as_kelvin, kpa, m3_per_mol};

/// Pure-component saturation pressure.
pub trait SaturationPressureProvider: Send + Sync {
    /// Saturation pressure in kPa at `t_k` kelvin.
    fn psat_kpa(&self, compound: &str, t_k: f64) -> PropsResult<f64>;

    fn psat(&self, compound: &str, t: Temperature) -> PropsResult<Pressure> {
        Ok(kpa(self.psat_kpa(compound, as_kelvin(t))?))
    }

    /// Vectorized form; fails on the first out-of-range temperature.
    fn psat_kpa_many(&self, compound: &str, t_k: &[f64]) -> PropsResult<Vec<f64>> {
        t_k.iter().map(|&t| self.psat_kpa(compound, t)).collect()
    }
}

/// Pure-component liquid molar volume.
pub trait MolarVolumeProvider: Send + Sync {
    /// Liquid molar volume in m3/mol at `t_k` kelvin.
    fn molar_volume_m3(&self, compound: &str, t_k: f64) -> PropsResult<f64>;

    fn molar_volume(&self, compound: &str, t: Temperature) -> PropsResult<MolarVolume> {
        Ok(m3_per_mol(self.molar_volume_m3(compound, as_kelvin(t))?))
    }
}
