//! Liquid density: DIPPR-105 correlation or a tabulated constant.

use crate::error::{PropsError, PropsResult};

/// Density source for one compound, in kg/m3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityRecord {
    /// `rho = a / b^(1 + (1 - T/c)^d)`, valid on `[t_min, t_max]` K.
    Dippr105 {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        t_min: f64,
        t_max: f64,
    },
    /// Temperature-independent override.
    Constant { rho: f64 },
}

impl DensityRecord {
    pub fn density(&self, compound: &str, t_k: f64) -> PropsResult<f64> {
        let rho = match *self {
            DensityRecord::Constant { rho } => rho,
            DensityRecord::Dippr105 {
                a,
                b,
                c,
                d,
                t_min,
                t_max,
            } => {
                if !(t_min..=t_max).contains(&t_k) {
                    return Err(PropsError::OutOfRange {
                        compound: compound.to_string(),
                        quantity: "temperature (K)",
                        value: t_k,
                        min: t_min,
                        max: t_max,
                    });
                }
                a / b.powf(1.0 + (1.0 - t_k / c).powf(d))
            }
        };

        if !rho.is_finite() || rho <= 0.0 {
            return Err(PropsError::NonPhysical {
                compound: compound.to_string(),
                what: "density",
                value: rho,
            });
        }
        Ok(rho)
    }
}

/// Molar volume in m3/mol from molecular weight (g/mol) and density (kg/m3).
pub fn molar_volume(molecular_weight: f64, rho: f64) -> f64 {
    0.001 * molecular_weight / rho
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: DensityRecord = DensityRecord::Dippr105 {
        a: 0.14395,
        b: 0.0112,
        c: 649.727,
        d: 0.05107,
        t_min: 273.16,
        t_max: 647.1,
    };

    #[test]
    fn water_density_at_room_temperature() {
        let rho = WATER.density("Water", 298.15).unwrap();
        assert!((rho - 997.0).abs() < 2.0, "rho = {rho}");
        let v = molar_volume(18.015, rho);
        assert!((v - 1.807e-5).abs() < 5e-8, "v = {v}");
    }

    #[test]
    fn constant_ignores_temperature() {
        let hexane = DensityRecord::Constant { rho: 655.0 };
        assert_eq!(hexane.density("Hexane", 250.0).unwrap(), 655.0);
        assert_eq!(hexane.density("Hexane", 400.0).unwrap(), 655.0);
    }

    #[test]
    fn above_critical_is_out_of_range() {
        let err = WATER.density("Water", 700.0).unwrap_err();
        assert!(matches!(err, PropsError::OutOfRange { .. }));
    }
}
