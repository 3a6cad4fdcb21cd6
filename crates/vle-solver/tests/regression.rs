//! Least-squares and root-finding on classic test problems.

use nalgebra::DVector;
use vle_solver::{
    LeastSquaresConfig, SecantConfig, SolverError, SolverResult, least_squares, secant,
};

#[test]
fn rosenbrock_from_standard_start() {
    let residual = |p: &DVector<f64>| -> SolverResult<DVector<f64>> {
        Ok(DVector::from_vec(vec![10.0 * (p[1] - p[0] * p[0]), 1.0 - p[0]]))
    };

    let result = least_squares(
        DVector::from_vec(vec![-1.2, 1.0]),
        residual,
        &LeastSquaresConfig::default(),
    )
    .unwrap();

    assert!((result.x[0] - 1.0).abs() < 1e-6, "x = {}", result.x[0]);
    assert!((result.x[1] - 1.0).abs() < 1e-6, "y = {}", result.x[1]);
    assert!(result.evaluations < 1_000);
}

#[test]
fn repeated_fits_are_identical() {
    let ts: Vec<f64> = (1..15).map(|i| i as f64).collect();
    let ys: Vec<f64> = ts.iter().map(|t| 2.0 * t / (3.0 + t) + 0.01 * (t * 1.7).sin()).collect();
    let residual = |p: &DVector<f64>| -> SolverResult<DVector<f64>> {
        Ok(DVector::from_iterator(
            ts.len(),
            ts.iter().zip(&ys).map(|(t, y)| p[0] * t / (p[1] + t) - y),
        ))
    };

    let config = LeastSquaresConfig::default();
    let a = least_squares(DVector::from_vec(vec![1.0, 1.0]), residual, &config).unwrap();
    let b = least_squares(DVector::from_vec(vec![1.0, 1.0]), residual, &config).unwrap();

    assert_eq!(a.x, b.x);
    assert_eq!(a.evaluations, b.evaluations);
}

#[test]
fn secant_solves_bubble_like_equation() {
    // Clausius-Clapeyron style: 101.325 = exp(14 - 4200 / T)  ->  T = 4200 / (14 - ln 101.325)
    let target = 4200.0 / (14.0 - 101.325_f64.ln());
    let result = secant(
        |t| -> SolverResult<f64> { Ok((14.0 - 4200.0 / t).exp() - 101.325) },
        300.0,
        &SecantConfig::default(),
    )
    .unwrap();
    assert!((result.x - target).abs() < 1e-6);
}

#[test]
fn secant_iteration_cap() {
    let config = SecantConfig {
        max_iterations: 2,
        ..SecantConfig::default()
    };
    let err = secant(
        |x| -> SolverResult<f64> { Ok(x.atan() - 1.3) },
        50.0,
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, SolverError::ConvergenceFailed { .. }));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn secant_finds_linear_roots(slope in 0.1_f64..10.0, root in -100.0_f64..100.0) {
            let result = secant(
                |x| -> SolverResult<f64> { Ok(slope * (x - root)) },
                0.0,
                &SecantConfig::default(),
            )
            .unwrap();
            prop_assert!((result.x - root).abs() < 1e-6 * (1.0 + root.abs()));
        }
    }
}
