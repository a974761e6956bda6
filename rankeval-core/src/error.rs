//! Structured error types for ranking evaluation.

use thiserror::Error;

/// Unified error type for all rankeval operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankEvalError {
    /// The positive set is empty, so every rate is a division by zero.
    #[error("positive set is empty")]
    EmptyPositiveSet,

    /// The ranking holds no negative items; the false positive rate is undefined.
    #[error("ranking contains no negative items")]
    NoNegatives,

    /// A rank cutoff outside `1..=total`.
    #[error("rank cutoff {k} outside 1..={total}")]
    RankOutOfRange {
        /// Requested cutoff.
        k: usize,
        /// Number of entries actually seen in the ranking.
        total: usize,
    },

    /// Invalid input (bad arguments, mismatched lengths)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout rankeval.
pub type Result<T> = std::result::Result<T, RankEvalError>;
