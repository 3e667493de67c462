//! Single pairwise alignment: fill, pick an end, backtrack, stitch
//!
//! The returned rows always cover both inputs completely. Symbols outside
//! the scored core are placed against each other column by column: the
//! prefix right-aligned, the suffix left-aligned, gaps on the shorter side.

use crate::error::AlignResult;
use crate::limits::AlignLimits;
use crate::matrix::PairwiseAligner;
use crate::scoring::{AlignmentMode, ScoringModel};
use crate::traceback::{Backtracker, Fragment};
use crate::types::{AlignOp, AlignmentResult, Sequence};

pub struct AlignmentRunner {
    aligner: PairwiseAligner,
    backtracker: Backtracker,
}

impl AlignmentRunner {
    pub fn new(scoring: ScoringModel) -> Self {
        Self {
            aligner: PairwiseAligner::new(scoring),
            backtracker: Backtracker::new(scoring.gap_symbol),
        }
    }

    pub fn with_limits(mut self, limits: AlignLimits) -> Self {
        self.aligner = self.aligner.with_limits(limits);
        self
    }

    pub fn scoring(&self) -> &ScoringModel {
        self.aligner.scoring()
    }

    pub fn run(&self, seq1: &[u8], seq2: &[u8], mode: AlignmentMode) -> AlignResult<AlignmentResult> {
        let fill = self.aligner.align(seq1, seq2, mode)?;
        if mode == AlignmentMode::Local {
            log::trace!(
                "{} tied end(s), longest walk from ({}, {})",
                fill.ties, fill.best_end.i, fill.best_end.j
            );
        }
        let core = self
            .backtracker
            .backtrack(&fill.backlinks, seq1, seq2, fill.best_end);

        log::debug!(
            "Core alignment ({}, {}) -> ({}, {}), {} columns",
            core.start.i, core.start.j, core.end.i, core.end.j, core.len()
        );

        Ok(self.stitch(seq1, seq2, core, fill.score))
    }

    fn stitch(&self, seq1: &[u8], seq2: &[u8], core: Fragment, score: i32) -> AlignmentResult {
        let gap = self.scoring().gap_symbol;
        let prefix1 = &seq1[..core.start.i];
        let prefix2 = &seq2[..core.start.j];
        let suffix1 = &seq1[core.end.i..];
        let suffix2 = &seq2[core.end.j..];

        let prefix_width = prefix1.len().max(prefix2.len());
        let suffix_width = suffix1.len().max(suffix2.len());
        let capacity = prefix_width + core.len() + suffix_width;

        let mut out = Columns {
            aligned1: Vec::with_capacity(capacity),
            aligned2: Vec::with_capacity(capacity),
            ops: Vec::with_capacity(capacity),
            gap,
        };

        let lead1 = prefix_width - prefix1.len();
        let lead2 = prefix_width - prefix2.len();
        for k in 0..prefix_width {
            let a = k.checked_sub(lead1).map(|x| prefix1[x]);
            let b = k.checked_sub(lead2).map(|x| prefix2[x]);
            out.push(a, b);
        }

        out.aligned1.extend_from_slice(&core.aligned1);
        out.aligned2.extend_from_slice(&core.aligned2);
        out.ops.extend_from_slice(&core.ops);

        for k in 0..suffix_width {
            out.push(suffix1.get(k).copied(), suffix2.get(k).copied());
        }

        AlignmentResult {
            aligned_seq1: out.aligned1,
            aligned_seq2: out.aligned2,
            score,
            ops: out.ops,
            start: core.start,
            end: core.end,
        }
    }
}

struct Columns {
    aligned1: Sequence,
    aligned2: Sequence,
    ops: Vec<AlignOp>,
    gap: u8,
}

impl Columns {
    fn push(&mut self, a: Option<u8>, b: Option<u8>) {
        let (x, y, op) = match (a, b) {
            (Some(a), Some(b)) => (a, b, AlignOp::pair(a, b)),
            (Some(a), None) => (a, self.gap, AlignOp::Deletion),
            (None, Some(b)) => (self.gap, b, AlignOp::Insertion),
            (None, None) => return,
        };
        self.aligned1.push(x);
        self.aligned2.push(y);
        self.ops.push(op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignError;
    use crate::types::Position;

    fn runner() -> AlignmentRunner {
        AlignmentRunner::new(ScoringModel::new(2, -1, -2))
    }

    fn strip(seq: &[u8]) -> Vec<u8> {
        seq.iter().copied().filter(|&c| c != b'-').collect()
    }

    #[test]
    fn test_global_single_gap() {
        let result = runner().run(b"ACGT", b"AGT", AlignmentMode::Global).unwrap();
        assert_eq!(result.aligned_seq1, b"ACGT");
        assert_eq!(result.aligned_seq2, b"A-GT");
        assert_eq!(result.score, 4);
        assert_eq!(result.gap_columns_in_seq1(), Vec::<usize>::new());
        assert_eq!(result.op_string(), "=D==");
    }

    #[test]
    fn test_local_stitches_prefix_and_suffix() {
        let result = runner().run(b"TTACGTAA", b"GGACGTCC", AlignmentMode::Local).unwrap();
        assert_eq!(result.score, 8);
        assert_eq!(result.aligned_seq1, b"TTACGTAA");
        assert_eq!(result.aligned_seq2, b"GGACGTCC");
        assert_eq!(result.start, Position::new(2, 2));
        assert_eq!(result.end, Position::new(6, 6));
        assert_eq!(result.op_string(), "XX====XX");
    }

    #[test]
    fn test_local_uneven_flanks_are_gap_padded() {
        let result = runner().run(b"ACGTCCC", b"TTTTACGT", AlignmentMode::Local).unwrap();
        assert_eq!(result.score, 8);
        assert_eq!(result.aligned_seq1, b"----ACGTCCC");
        assert_eq!(result.aligned_seq2, b"TTTTACGT---");
        assert_eq!(result.start, Position::new(0, 4));
        assert_eq!(result.gap_columns_in_seq1(), vec![0, 1, 2, 3]);
        assert_eq!(strip(&result.aligned_seq1), b"ACGTCCC");
        assert_eq!(strip(&result.aligned_seq2), b"TTTTACGT");
    }

    #[test]
    fn test_local_picks_longest_tied_fragment() {
        // (2,2) and (3,4) both score 4; the walk from (3,4) crosses a gap
        // and is twice as long
        let result = runner().run(b"ACA", b"ACCA", AlignmentMode::Local).unwrap();
        assert_eq!(result.score, 4);
        assert_eq!(result.end, Position::new(3, 4));
        assert_eq!(result.aligned_seq1, b"A-CA");
        assert_eq!(result.aligned_seq2, b"ACCA");
    }

    #[test]
    fn test_local_equal_length_ties_keep_first() {
        // (3,4) and (4,4) both give four columns; (3,4) is found first
        let result = runner().run(b"AACC", b"ACAC", AlignmentMode::Local).unwrap();
        assert_eq!(result.end, Position::new(3, 4));
        assert_eq!(result.aligned_seq1, b"A-ACC");
        assert_eq!(result.aligned_seq2, b"ACAC-");
        assert_eq!(strip(&result.aligned_seq2), b"ACAC");
    }

    #[test]
    fn test_local_no_common_symbols() {
        let result = runner().run(b"AAAA", b"CCCC", AlignmentMode::Local).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.start, result.end);
        assert_eq!(result.aligned_seq1, b"AAAA");
        assert_eq!(result.aligned_seq2, b"CCCC");
    }

    #[test]
    fn test_empty_inputs() {
        let result = runner().run(b"", b"ACG", AlignmentMode::Global).unwrap();
        assert_eq!(result.aligned_seq1, b"---");
        assert_eq!(result.aligned_seq2, b"ACG");
        assert_eq!(result.score, -6);

        let result = runner().run(b"ACG", b"", AlignmentMode::Local).unwrap();
        assert_eq!(result.aligned_seq1, b"ACG");
        assert_eq!(result.aligned_seq2, b"---");
        assert_eq!(result.score, 0);

        let result = runner().run(b"", b"", AlignmentMode::Global).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_extreme_gap_penalty_does_not_overflow() {
        let result = AlignmentRunner::new(ScoringModel::new(2, -1, i32::MIN / 2))
            .run(b"AAA", b"CCCCC", AlignmentMode::Global)
            .unwrap();
        assert_eq!(result.score, i32::MIN);
        assert_eq!(result.aligned_seq1.len(), result.aligned_seq2.len());
        assert_eq!(strip(&result.aligned_seq1), b"AAA");
        assert_eq!(strip(&result.aligned_seq2), b"CCCCC");
    }

    #[test]
    fn test_resource_ceiling_is_propagated() {
        let result = runner()
            .with_limits(AlignLimits::default().with_max_matrix_cells(4))
            .run(b"ACGT", b"ACGT", AlignmentMode::Global);
        assert!(matches!(result, Err(AlignError::ResourceExceeded { .. })));
    }
}
