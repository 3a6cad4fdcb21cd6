//! Numerical engine for the correlation models.
//!
//! This crate provides a Levenberg-Marquardt least-squares solver for fitting
//! model parameters and a derivative-free secant root finder for implicit
//! equilibrium temperatures. Both are generic over the caller's error type so
//! domain errors raised inside a residual evaluation surface unchanged.

pub mod error;
pub mod jacobian;
pub mod least_squares;
pub mod root;

pub use error::{SolverError, SolverResult};
pub use jacobian::central_difference_jacobian;
pub use least_squares::{LeastSquaresConfig, LeastSquaresResult, Termination, least_squares};
pub use root::{RootResult, SecantConfig, secant};
