//! Resource limits, deadlines and cooperative cancellation for the DP fill

use crate::error::{AlignError, AlignResult};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default ceiling on backlink cells: one byte each, so roughly 100 MB
pub const DEFAULT_MAX_MATRIX_CELLS: u64 = 100_000_000;

/// Shared flag that lets another thread stop a running alignment
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignLimits {
    /// Upper bound on (M+1)*(N+1)
    pub max_matrix_cells: u64,
    #[serde(skip)]
    pub deadline: Option<Instant>,
    #[serde(skip)]
    pub cancel: Option<CancelToken>,
}

impl Default for AlignLimits {
    fn default() -> Self {
        Self {
            max_matrix_cells: DEFAULT_MAX_MATRIX_CELLS,
            deadline: None,
            cancel: None,
        }
    }
}

impl AlignLimits {
    pub fn unbounded() -> Self {
        Self {
            max_matrix_cells: u64::MAX,
            ..Self::default()
        }
    }

    pub fn with_max_matrix_cells(mut self, cells: u64) -> Self {
        self.max_matrix_cells = cells;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Reject a matrix of `rows` x `cols` cells before anything is allocated
    pub fn check_matrix(&self, rows: usize, cols: usize) -> AlignResult<()> {
        let cells = (rows as u64).saturating_mul(cols as u64);
        if cells > self.max_matrix_cells {
            log::warn!(
                "Refusing {}x{} alignment matrix ({} cells, limit {})",
                rows, cols, cells, self.max_matrix_cells
            );
            return Err(AlignError::ResourceExceeded {
                cells,
                limit: self.max_matrix_cells,
            });
        }
        Ok(())
    }

    /// Polled once per DP row
    pub fn checkpoint(&self) -> AlignResult<()> {
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return Err(AlignError::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(AlignError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_ceiling() {
        let limits = AlignLimits::default().with_max_matrix_cells(100);
        assert!(limits.check_matrix(10, 10).is_ok());
        assert!(matches!(
            limits.check_matrix(10, 11),
            Err(AlignError::ResourceExceeded { cells: 110, limit: 100 })
        ));
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let limits = AlignLimits::default().with_cancel_token(token.clone());
        assert!(limits.checkpoint().is_ok());

        token.cancel();
        assert!(matches!(limits.checkpoint(), Err(AlignError::Cancelled)));
    }

    #[test]
    fn test_expired_deadline() {
        let limits = AlignLimits::default().with_deadline(Instant::now());
        assert!(matches!(limits.checkpoint(), Err(AlignError::DeadlineExceeded)));
    }

    #[test]
    fn test_unbounded_does_not_overflow() {
        let limits = AlignLimits::unbounded();
        assert!(limits.check_matrix(usize::MAX, usize::MAX).is_ok());
    }
}
