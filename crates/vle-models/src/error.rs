//! Error types for model fitting and prediction.

use serde::Serialize;
use thiserror::Error;
use vle_core::VleError;
use vle_props::PropsError;
use vle_solver::SolverError;

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while preparing data, fitting or predicting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid data: {what}")]
    InvalidData { what: String },

    /// Pure-component point fed to a log-based expression.
    #[error("Degenerate composition: {what} = {value} at index {index}")]
    DegenerateComposition {
        what: &'static str,
        index: usize,
        value: f64,
    },

    #[error("Fit did not converge: {what}")]
    NonConvergence { what: String },

    #[error("Numeric failure: {what}")]
    Numeric { what: String },

    #[error("Property lookup failed: {0}")]
    Props(#[from] PropsError),

    #[error(transparent)]
    Core(#[from] VleError),
}

/// Coarse failure category reported next to a failed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    OutOfRangeInput,
    DegenerateComposition,
    FitNonConvergence,
    InvalidInput,
    Numeric,
}

impl ModelError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ModelError::InvalidData { .. } => FailureKind::InvalidInput,
            ModelError::DegenerateComposition { .. } => FailureKind::DegenerateComposition,
            ModelError::NonConvergence { .. } => FailureKind::FitNonConvergence,
            ModelError::Numeric { .. } => FailureKind::Numeric,
            ModelError::Props(PropsError::OutOfRange { .. }) => FailureKind::OutOfRangeInput,
            ModelError::Props(PropsError::NonPhysical { .. }) => FailureKind::Numeric,
            ModelError::Props(_) => FailureKind::InvalidInput,
            ModelError::Core(VleError::NonFinite { .. }) => FailureKind::Numeric,
            ModelError::Core(_) => FailureKind::InvalidInput,
        }
    }
}

impl From<SolverError> for ModelError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::ConvergenceFailed { what } => ModelError::NonConvergence { what },
            SolverError::Numeric { what } => ModelError::Numeric { what },
            SolverError::ProblemSetup { what } => ModelError::InvalidData { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_errors_map_to_model_kinds() {
        let err: ModelError = SolverError::ConvergenceFailed {
            what: "budget".into(),
        }
        .into();
        assert_eq!(err.kind(), FailureKind::FitNonConvergence);

        let err: ModelError = SolverError::Numeric { what: "nan".into() }.into();
        assert_eq!(err.kind(), FailureKind::Numeric);
    }

    #[test]
    fn out_of_range_is_distinct() {
        let err: ModelError = PropsError::OutOfRange {
            compound: "Water".into(),
            quantity: "temperature (degC)",
            value: 500.0,
            min: 1.0,
            max: 374.0,
        }
        .into();
        assert_eq!(err.kind(), FailureKind::OutOfRangeInput);
        assert!(err.to_string().contains("Water"));
    }
}
