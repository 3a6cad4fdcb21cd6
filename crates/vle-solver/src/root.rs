//! Derivative-free scalar root finding (secant method).

use crate::error::SolverError;

/// Secant iteration configuration.
#[derive(Debug, Clone, Copy)]
pub struct SecantConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance on successive iterates
    pub abs_tol: f64,
    /// Relative tolerance on successive iterates
    pub rel_tol: f64,
    /// Relative offset of the second starting point
    pub second_point_offset: f64,
}

impl Default for SecantConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1.48e-8,
            rel_tol: 0.0,
            second_point_offset: 1e-4,
        }
    }
}

/// Scalar root.
#[derive(Debug, Clone, Copy)]
pub struct RootResult {
    pub x: f64,
    /// `f(x)` at the last evaluated iterate
    pub residual: f64,
    pub iterations: usize,
}

/// Find a root of `f` near `x0` with the secant method.
///
/// The second starting point is `x0 * (1 + offset) ± offset`, away from zero.
/// Errors returned by `f` are passed through unchanged.
pub fn secant<F, E>(mut f: F, x0: f64, config: &SecantConfig) -> Result<RootResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    let eps = config.second_point_offset;
    let mut p0 = x0;
    let mut p1 = x0 * (1.0 + eps) + if x0 >= 0.0 { eps } else { -eps };
    let mut q0 = f(p0)?;
    let mut q1 = f(p1)?;

    if q1.abs() < q0.abs() {
        std::mem::swap(&mut p0, &mut p1);
        std::mem::swap(&mut q0, &mut q1);
    }

    for iter in 0..config.max_iterations {
        if q0 == 0.0 {
            return Ok(RootResult {
                x: p0,
                residual: q0,
                iterations: iter,
            });
        }
        if q1 == q0 {
            return Err(SolverError::ConvergenceFailed {
                what: format!("secant slope vanished at x = {}", p1),
            }
            .into());
        }

        let p = if q1.abs() > q0.abs() {
            (-q0 / q1 * p1 + p0) / (1.0 - q0 / q1)
        } else {
            (-q1 / q0 * p0 + p1) / (1.0 - q1 / q0)
        };
        if !p.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("secant iterate became non-finite after x = {}", p1),
            }
            .into());
        }

        let q = f(p)?;
        if (p - p1).abs() <= config.abs_tol + config.rel_tol * p.abs() {
            return Ok(RootResult {
                x: p,
                residual: q,
                iterations: iter + 1,
            });
        }

        p0 = p1;
        q0 = q1;
        p1 = p;
        q1 = q;
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "Maximum iterations {} reached, last x = {}, f = {}",
            config.max_iterations, p1, q1
        ),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverResult;

    #[test]
    fn square_root_of_two() {
        let result = secant(
            |x| -> SolverResult<f64> { Ok(x * x - 2.0) },
            1.0,
            &SecantConfig::default(),
        )
        .unwrap();
        assert!((result.x - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn cubic_far_from_start() {
        // x^3 - x - 2 has a single real root near 1.5214
        let result = secant(
            |x| -> SolverResult<f64> { Ok(x * x * x - x - 2.0) },
            3.0,
            &SecantConfig::default(),
        )
        .unwrap();
        assert!((result.x - 1.521_379_706_804_568).abs() < 1e-9);
    }

    #[test]
    fn flat_function_fails() {
        let err = secant(
            |_| -> SolverResult<f64> { Ok(1.0) },
            0.5,
            &SecantConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::ConvergenceFailed { .. }));
    }

    #[test]
    fn caller_errors_pass_through() {
        let err = secant(
            |x| -> SolverResult<f64> {
                if x > 2.0 {
                    Err(SolverError::ProblemSetup {
                        what: "outside domain".into(),
                    })
                } else {
                    Ok(x - 10.0)
                }
            },
            1.0,
            &SecantConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::ProblemSetup { .. }));
    }
}
