// Typed errors raised by the preparation pipeline and the loader
use thiserror::Error;

/// Raised by strict-mode parsing instead of producing `NaN`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("record {index}: value {raw:?} is not a number")]
    InvalidValue { index: usize, raw: String },

    #[error("record {index}: value {value} is not finite")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("record {index}: cannot parse date {raw:?}")]
    InvalidDateTime { index: usize, raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("unknown channel {0:?}")]
    UnknownChannel(String),
}
