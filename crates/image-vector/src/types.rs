//! Shared types: build options, match results, and errors.

use serde::{Deserialize, Serialize};

/// How to resolve a pixel buffer whose centered channel sums cancel out to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fail with [`VisionError::DegenerateVector`].
    #[default]
    Error,
    /// Produce an all-zero vector of the requested dimension.
    Zero,
}

/// Options controlling vector construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildOptions {
    pub degenerate: DegeneratePolicy,
}

impl BuildOptions {
    /// Options that map zero-norm buffers to the all-zero vector.
    pub fn zero_on_degenerate() -> Self {
        Self {
            degenerate: DegeneratePolicy::Zero,
        }
    }
}

/// A ranked candidate from [`crate::similarity::find_similar`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    /// Position of the candidate in the slice that was searched.
    pub index: usize,
    pub diff: f64,
}

/// Errors that can occur in the vector library.
#[derive(thiserror::Error, Debug)]
pub enum VisionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Degenerate vector: channel sums over {channels} channel(s) have zero norm")]
    DegenerateVector { channels: usize },
}

/// Convenience result type.
pub type VisionResult<T> = Result<T, VisionError>;
