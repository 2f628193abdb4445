use thiserror::Error;

// Unified error type for sparsix

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("operation {op} not defined for {lhs} and {rhs}")]
    OperationNotDefined {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("invalid argument: {0}")]
    ArgumentError(String),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: isize, len: usize },
}

/// Shorthand result used across the crate.
pub type SpResult<T> = Result<T, SpError>;

impl SpError {
    pub(crate) fn dimensions(what: &str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        SpError::DimensionMismatch(format!(
            "{what}: {}x{} vs {}x{}",
            lhs.0, lhs.1, rhs.0, rhs.1
        ))
    }

    pub(crate) fn sizes(what: &str, lhs: usize, rhs: usize) -> Self {
        SpError::DimensionMismatch(format!("{what}: size {lhs} vs {rhs}"))
    }

    pub(crate) fn undefined(op: &'static str, lhs: &'static str, rhs: &'static str) -> Self {
        SpError::OperationNotDefined { op, lhs, rhs }
    }
}
