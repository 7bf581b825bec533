use thiserror::Error;

// Unified error type for timedisc

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TdError {
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{0} requested before the matching assembly step")]
    NotAssembled(&'static str),
    #[error("time discretization not initialized: {0}")]
    NotInitialized(&'static str),
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("unsupported combination: {0}")]
    Unsupported(&'static str),
}
