//! AlnX Core Library
//!
//! Needleman-Wunsch / Smith-Waterman pairwise alignment with linear gaps,
//! guide-anchored multiple alignment and per-column consensus calling.

pub mod types;
pub mod error;
pub mod scoring;
pub mod limits;
pub mod matrix;
pub mod traceback;
pub mod runner;
pub mod msa;
pub mod consensus;

// Re-export commonly used types and functions
pub use types::{AlignLine, AlignOp, AlignmentResult, AlignmentStats, ConsensusResult, Position, Sequence};
pub use error::{AlignError, AlignResult};
pub use scoring::{AlignmentMode, MultiAlgorithm, ScoringModel};
pub use limits::{AlignLimits, CancelToken};
pub use matrix::{Backlink, BacklinkMatrix, MatrixFill, PairwiseAligner};
pub use traceback::{Backtracker, Fragment};
pub use runner::AlignmentRunner;
pub use msa::{AlignmentSession, MultiSequenceAligner};
pub use consensus::{classify, is_amino_acid, is_nucleotide, ConsensusBuilder, SequenceKind};

/// Version information for the AlnX core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Align two sequences with a fresh runner
pub fn align_pair(
    seq1: &[u8],
    seq2: &[u8],
    mode: AlignmentMode,
    scoring: &ScoringModel,
) -> AlignResult<AlignmentResult> {
    AlignmentRunner::new(*scoring).run(seq1, seq2, mode)
}
