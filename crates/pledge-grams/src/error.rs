use thiserror::Error;

/// Errors raised while building features for, or fitting, a category model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("insufficient data for category '{category}': {rows} matching records")]
    InsufficientData { category: String, rows: usize },

    #[error("cannot fit a model on zero rows")]
    EmptyInput,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("invalid alpha value: {0}")]
    InvalidAlpha(f64),

    #[error("train fraction must be in (0.0, 1.0], got {0}")]
    InvalidTrainFraction(f64),

    #[error("computation error: {0}")]
    Computation(String),
}
