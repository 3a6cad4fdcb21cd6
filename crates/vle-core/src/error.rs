use thiserror::Error;

/// Result of the shared validation helpers.
pub type VleResult<T> = Result<T, VleError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VleError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Mole fraction {what} out of [0, 1] at index {index}: {value}")]
    MoleFraction {
        what: &'static str,
        index: usize,
        value: f64,
    },
}
