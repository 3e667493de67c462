//! Error types for the alignment engine

use thiserror::Error;

/// Errors that can occur during alignment, gap propagation or consensus calling
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backlink grid for this pair would exceed the configured ceiling.
    /// Callers may retry with shorter sequences or a higher limit.
    #[error("Alignment needs {cells} matrix cells, limit is {limit}")]
    ResourceExceeded { cells: u64, limit: u64 },

    #[error("Inconsistent alignment state: {0}")]
    InconsistentState(String),

    #[error("Alignment cancelled")]
    Cancelled,

    #[error("Alignment deadline exceeded")]
    DeadlineExceeded,
}

impl AlignError {
    /// Whether the caller can reasonably retry with different input or limits
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AlignError::InconsistentState(_))
    }
}

pub type AlignResult<T> = Result<T, AlignError>;
