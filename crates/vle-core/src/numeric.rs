use crate::VleError;

/// Pass `v` through, or fail on NaN and infinities.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, VleError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(VleError::NonFinite { what, value: v })
    }
}

/// Check that every entry of a mole-fraction series lies in [0, 1].
pub fn ensure_mole_fractions(values: &[f64], what: &'static str) -> Result<(), VleError> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(VleError::MoleFraction { what, index, value });
        }
    }
    Ok(())
}

/// `n` evenly spaced points from `start` to `end`, endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * delta).collect();
            // Ensure exact endpoint
            points[n - 1] = end;
            points
        }
    }
}

/// `x * ln(y)` with the convention that `x == 0` contributes exactly zero.
pub fn xlogy(x: f64, y: f64) -> f64 {
    if x == 0.0 && !y.is_nan() {
        0.0
    } else {
        x * y.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn linspace_hits_both_ends() {
        let grid = linspace(0.0, 1.0, 50);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[49], 1.0);
        assert!((grid[1] - 1.0 / 49.0).abs() < 1e-15);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn xlogy_zero_weight_is_zero() {
        assert_eq!(xlogy(0.0, 0.0), 0.0);
        assert_eq!(xlogy(0.0, f64::INFINITY), 0.0);
        assert!((xlogy(0.5, std::f64::consts::E) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn mole_fraction_bounds() {
        assert!(ensure_mole_fractions(&[0.0, 0.5, 1.0], "x1").is_ok());
        let err = ensure_mole_fractions(&[0.2, 1.2], "x1").unwrap_err();
        assert!(matches!(err, VleError::MoleFraction { index: 1, .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn linspace_is_monotone(n in 2usize..200) {
            let grid = linspace(0.0, 1.0, n);
            prop_assert_eq!(grid.len(), n);
            prop_assert!(grid.windows(2).all(|w| w[1] > w[0]));
        }
    }
}
