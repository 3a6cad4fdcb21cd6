//! Levenberg-Marquardt nonlinear least squares.
//!
//! Minimizes `0.5 * |r(p)|^2` for a residual function `r` using a central
//! finite-difference Jacobian and Marquardt diagonal scaling, with the damping
//! update of Nielsen (1999).

use crate::error::SolverError;
use crate::jacobian::central_difference_jacobian;
use nalgebra::{DMatrix, DVector};
use std::cell::Cell;
use tracing::{debug, trace};

/// Levenberg-Marquardt configuration.
#[derive(Debug, Clone, Copy)]
pub struct LeastSquaresConfig {
    /// Maximum residual evaluations, Jacobian columns included
    pub max_evaluations: usize,
    /// Relative cost reduction below which an accepted step counts as converged
    pub ftol: f64,
    /// Relative step length below which the iteration counts as converged
    pub xtol: f64,
    /// Absolute gradient (infinity norm) tolerance
    pub gtol: f64,
    /// Initial damping relative to the largest diagonal entry of J^T J
    pub initial_damping: f64,
    /// Relative perturbation for the finite-difference Jacobian
    pub fd_epsilon: f64,
}

impl Default for LeastSquaresConfig {
    fn default() -> Self {
        Self {
            max_evaluations: 10_000,
            ftol: 1e-10,
            xtol: 1e-10,
            gtol: 1e-12,
            initial_damping: 1e-3,
            fd_epsilon: 1e-6,
        }
    }
}

/// Why the iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Residual vector is exactly zero
    ExactFit,
    /// Gradient below `gtol`
    Gradient,
    /// Step below `xtol`
    StepSize,
    /// Cost reduction below `ftol`
    CostReduction,
}

/// Converged least-squares solution.
#[derive(Debug, Clone)]
pub struct LeastSquaresResult {
    /// Optimal parameters
    pub x: DVector<f64>,
    /// Residuals at `x`
    pub residuals: DVector<f64>,
    /// `0.5 * |residuals|^2`
    pub cost: f64,
    /// Residual evaluations used
    pub evaluations: usize,
    /// Accepted steps
    pub iterations: usize,
    pub termination: Termination,
}

/// Solve a nonlinear least-squares problem starting from `x0`.
///
/// Trial points with non-finite residuals are rejected like uphill steps.
/// Exceeding `max_evaluations` is a [`SolverError::ConvergenceFailed`].
pub fn least_squares<F, E>(
    x0: DVector<f64>,
    residual_fn: F,
    config: &LeastSquaresConfig,
) -> Result<LeastSquaresResult, E>
where
    F: Fn(&DVector<f64>) -> Result<DVector<f64>, E>,
    E: From<SolverError>,
{
    let evaluations = Cell::new(0usize);
    let eval = |x: &DVector<f64>| -> Result<DVector<f64>, E> {
        evaluations.set(evaluations.get() + 1);
        residual_fn(x)
    };

    let n = x0.len();
    if n == 0 {
        return Err(SolverError::ProblemSetup {
            what: "no parameters to fit".to_string(),
        }
        .into());
    }

    let mut x = x0;
    let mut r = eval(&x)?;
    let m = r.len();
    if m < n {
        return Err(SolverError::ProblemSetup {
            what: format!("{} residuals cannot determine {} parameters", m, n),
        }
        .into());
    }
    if r.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::Numeric {
            what: "non-finite residual at initial guess".to_string(),
        }
        .into());
    }

    let mut cost = 0.5 * r.norm_squared();
    let mut lambda: Option<f64> = None;
    let mut nu = 2.0;
    let mut iterations = 0;

    let finish = |x: DVector<f64>,
                  r: DVector<f64>,
                  cost: f64,
                  iterations: usize,
                  termination: Termination|
     -> Result<LeastSquaresResult, E> {
        debug!(
            evaluations = evaluations.get(),
            iterations,
            cost,
            ?termination,
            "least squares converged"
        );
        Ok(LeastSquaresResult {
            x,
            residuals: r,
            cost,
            evaluations: evaluations.get(),
            iterations,
            termination,
        })
    };

    loop {
        if cost == 0.0 {
            return finish(x, r, cost, iterations, Termination::ExactFit);
        }
        budget_check(evaluations.get(), config.max_evaluations, cost)?;

        let jac = central_difference_jacobian(&x, m, &eval, config.fd_epsilon)?;
        if jac.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::Numeric {
                what: format!("non-finite Jacobian at iteration {}", iterations),
            }
            .into());
        }

        let jtj = jac.transpose() * &jac;
        let g = jac.transpose() * &r;
        if g.amax() <= config.gtol {
            return finish(x, r, cost, iterations, Termination::Gradient);
        }

        let diag_max = jtj.diagonal().max().max(f64::MIN_POSITIVE);
        let scale: DVector<f64> = jtj.diagonal().map(|d| d.max(1e-12 * diag_max));
        let mut lam = lambda.unwrap_or(config.initial_damping * diag_max);

        loop {
            budget_check(evaluations.get(), config.max_evaluations, cost)?;

            let mut damped = jtj.clone();
            for i in 0..n {
                damped[(i, i)] += lam * scale[i];
            }

            let Some(step) = solve_normal(damped, -&g) else {
                lam *= nu;
                nu *= 2.0;
                continue;
            };

            if step.norm() <= config.xtol * (x.norm() + config.xtol) {
                return finish(x, r, cost, iterations, Termination::StepSize);
            }

            let x_new = &x + &step;
            let r_new = eval(&x_new)?;
            let cost_new = 0.5 * r_new.norm_squared();

            let scaled_step = step.component_mul(&scale) * lam;
            let predicted = 0.5 * step.dot(&(scaled_step - &g));
            let rho = if cost_new.is_finite() && predicted > 0.0 {
                (cost - cost_new) / predicted
            } else {
                -1.0
            };

            if rho > 0.0 {
                let reduction = cost - cost_new;
                let small = reduction <= config.ftol * cost;
                x = x_new;
                r = r_new;
                cost = cost_new;
                iterations += 1;
                lam *= (1.0_f64 / 3.0).max(1.0 - (2.0 * rho - 1.0).powi(3));
                nu = 2.0;
                lambda = Some(lam);
                trace!(iterations, cost, lam, "step accepted");

                if small {
                    return finish(x, r, cost, iterations, Termination::CostReduction);
                }
                break;
            }

            lam *= nu;
            nu *= 2.0;
        }
    }
}

fn solve_normal(matrix: DMatrix<f64>, rhs: DVector<f64>) -> Option<DVector<f64>> {
    if let Some(chol) = matrix.clone().cholesky() {
        return Some(chol.solve(&rhs));
    }
    matrix.lu().solve(&rhs)
}

fn budget_check(used: usize, max: usize, cost: f64) -> Result<(), SolverError> {
    if used >= max {
        return Err(SolverError::ConvergenceFailed {
            what: format!("Maximum evaluations {} reached, cost = {}", max, cost),
        });
    }
    Ok(())
}
