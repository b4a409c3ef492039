//! Error types for the randomizers.

/// Rejected randomizer input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RandomError {
    /// Fewer than two usable options were given to the picker.
    #[error("need at least two options, got {0}")]
    TooFewOptions(usize),

    /// A dice maximum of zero or less.
    #[error("dice maximum must be greater than 0, got {0}")]
    NonPositiveMax(i64),

    /// A lot table whose weights cannot be sampled.
    #[error("invalid lot weights: {0}")]
    InvalidWeights(String),
}

/// Convenience result type for randomizer operations.
pub type RandomResult<T> = Result<T, RandomError>;
