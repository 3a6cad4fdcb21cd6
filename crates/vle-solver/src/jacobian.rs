//! Finite-difference Jacobians for residual functions with caller-defined errors.

use crate::error::SolverError;
use nalgebra::{DMatrix, DVector};

/// Central-difference Jacobian of `f` at `x`, with step `epsilon * max(|x_j|, 1)`.
///
/// Does not evaluate `f(x)` itself; `m` is the residual length. A residual
/// vector of any other length is a [`SolverError::ProblemSetup`].
pub fn central_difference_jacobian<F, E>(
    x: &DVector<f64>,
    m: usize,
    f: F,
    epsilon: f64,
) -> Result<DMatrix<f64>, E>
where
    F: Fn(&DVector<f64>) -> Result<DVector<f64>, E>,
    E: From<SolverError>,
{
    let n = x.len();
    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let dx = epsilon * x[j].abs().max(1.0);

        let mut x_plus = x.clone();
        x_plus[j] += dx;
        let f_plus = f(&x_plus)?;
        check_len(m, f_plus.len())?;

        let mut x_minus = x.clone();
        x_minus[j] -= dx;
        let f_minus = f(&x_minus)?;
        check_len(m, f_minus.len())?;

        let df = (f_plus - f_minus) / (2.0 * dx);
        jac.set_column(j, &df);
    }

    Ok(jac)
}

fn check_len<E: From<SolverError>>(expected: usize, got: usize) -> Result<(), E> {
    if expected == got {
        Ok(())
    } else {
        Err(SolverError::ProblemSetup {
            what: format!("residual length changed from {} to {}", expected, got),
        }
        .into())
    }
}
