//! Antoine saturation-pressure correlation with temperature sub-ranges.

use crate::error::{PropsError, PropsResult};
use vle_core::constants::{CELSIUS_OFFSET, KPA_PER_MMHG};

/// One Antoine coefficient set, valid on `[t_min_c, t_max_c]` (degC, mmHg).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntoineRange {
    pub t_min_c: f64,
    pub t_max_c: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl AntoineRange {
    pub fn contains(&self, t_c: f64) -> bool {
        self.t_min_c <= t_c && t_c <= self.t_max_c
    }

    /// Saturation pressure in kPa. No range check.
    pub fn psat_kpa(&self, t_k: f64) -> f64 {
        let t_c = t_k - CELSIUS_OFFSET;
        KPA_PER_MMHG * 10f64.powf(self.a - self.b / (t_c + self.c))
    }
}

/// All Antoine ranges tabulated for one compound, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AntoineRecord {
    pub ranges: Vec<AntoineRange>,
}

impl AntoineRecord {
    /// First range whose interval contains `t_k`.
    pub fn select(&self, t_k: f64) -> Option<&AntoineRange> {
        let t_c = t_k - CELSIUS_OFFSET;
        self.ranges.iter().find(|range| range.contains(t_c))
    }

    /// Overall tabulated span in degC.
    pub fn span_c(&self) -> (f64, f64) {
        self.ranges.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.t_min_c), hi.max(r.t_max_c))
        })
    }

    /// Saturation pressure in kPa; temperatures outside every range are rejected.
    pub fn psat_kpa(&self, compound: &str, t_k: f64) -> PropsResult<f64> {
        let range = self.select(t_k).ok_or_else(|| {
            let (min, max) = self.span_c();
            PropsError::OutOfRange {
                compound: compound.to_string(),
                quantity: "temperature (degC)",
                value: t_k - CELSIUS_OFFSET,
                min,
                max,
            }
        })?;

        let p = range.psat_kpa(t_k);
        if !p.is_finite() || p <= 0.0 {
            return Err(PropsError::NonPhysical {
                compound: compound.to_string(),
                what: "saturation pressure",
                value: p,
            });
        }
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> AntoineRecord {
        AntoineRecord {
            ranges: vec![
                AntoineRange {
                    t_min_c: 1.0,
                    t_max_c: 100.0,
                    a: 8.07131,
                    b: 1730.63,
                    c: 233.426,
                },
                AntoineRange {
                    t_min_c: 100.0,
                    t_max_c: 374.0,
                    a: 8.14019,
                    b: 1810.94,
                    c: 244.485,
                },
            ],
        }
    }

    #[test]
    fn normal_boiling_point_is_one_atmosphere() {
        let p = water().psat_kpa("Water", 373.15).unwrap();
        assert!((p - 101.325).abs() < 0.5, "p = {p}");
    }

    #[test]
    fn upper_range_is_selected_above_100c() {
        let record = water();
        let range = record.select(273.15 + 150.0).unwrap();
        assert!((range.a - 8.14019).abs() < 1e-12);
        let p = record.psat_kpa("Water", 273.15 + 150.0).unwrap();
        assert!((p - 476.0).abs() < 10.0, "p = {p}");
    }

    #[test]
    fn out_of_range_is_an_error() {
        let err = water().psat_kpa("Water", 273.15 + 400.0).unwrap_err();
        match err {
            PropsError::OutOfRange { min, max, .. } => {
                assert_eq!(min, 1.0);
                assert_eq!(max, 374.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
