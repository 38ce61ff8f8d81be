//! Error types for the sarima-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while fitting or forecasting a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Dimension mismatch between vectors or matrices.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A lag polynomial was evaluated before enough history exists.
    #[error("index out of range: lag {lag} reaches outside the series at position {position}")]
    IndexOutOfRange { position: usize, lag: usize },

    /// Insufficient data points for the requested orders or horizon.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// SPD factorization under an unbounded condition number hit an exact
    /// zero pivot.
    #[error("singular system: zero pivot at row {pivot}")]
    SingularSystem { pivot: usize },

    /// Uniform failure produced by the convenience entry points, carrying
    /// the original cause's message.
    #[error("failed to build ARIMA forecast: {0}")]
    ForecastFailed(String),
}
