//! Pure-component property errors.

use thiserror::Error;

/// Result type for property lookups.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur while loading reference tables or evaluating correlations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// Compound has no record in the named table.
    #[error("Unknown compound '{compound}' in {table} table")]
    UnknownCompound {
        compound: String,
        table: &'static str,
    },

    /// Input lies outside every tabulated validity range.
    #[error("{quantity} {value} out of range for {compound} (valid {min}..={max})")]
    OutOfRange {
        compound: String,
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Correlation produced a non-physical value (negative density, NaN, ...).
    #[error("Non-physical {what} for {compound}: {value}")]
    NonPhysical {
        compound: String,
        what: &'static str,
        value: f64,
    },

    /// Malformed line in a reference table.
    #[error("Parse error in {file} line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    /// Reference table could not be read.
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PropsError::OutOfRange {
            compound: "Water".into(),
            quantity: "temperature",
            value: 500.0,
            min: 1.0,
            max: 374.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Water"));
        assert!(msg.contains("temperature"));

        let err = PropsError::UnknownCompound {
            compound: "Unobtainium".into(),
            table: "antoine",
        };
        assert!(err.to_string().contains("Unobtainium"));
    }
}
