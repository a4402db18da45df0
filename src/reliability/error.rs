use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReliabilityError {
    #[error("coders must have coded the same number of items (got {left} and {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("coder `{coder}` has {found} codings, expected {expected}")]
    DimensionMismatch {
        coder: String,
        expected: usize,
        found: usize,
    },

    #[error("no coding units to compare")]
    EmptyInput,

    #[error("at least 2 coders are required, got {found}")]
    InsufficientCoders { found: usize },

    #[error("coder `{0}` was supplied more than once")]
    DuplicateCoder(String),

    #[error("coder names must be non-empty")]
    InvalidCoderName,
}

pub type ReliabilityResult<T> = Result<T, ReliabilityError>;
