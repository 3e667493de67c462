//! Dynamic programming fill for Needleman-Wunsch and Smith-Waterman
//!
//! Scores live in two rolling rows; only the backlink grid is kept in full,
//! because backtracking needs random access to every cell. Ties between
//! predecessor moves are all recorded so the backtracker can apply a
//! deterministic priority later.

use crate::error::AlignResult;
use crate::limits::AlignLimits;
use crate::scoring::{AlignmentMode, ScoringModel};
use crate::types::Position;
use std::ops::{BitOr, BitOrAssign};

/// Set of predecessor moves that reach a cell's optimal score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Backlink(u8);

impl Backlink {
    pub const NONE: Backlink = Backlink(0);
    /// Gap in sequence 2, consumes sequence 1
    pub const LEFT: Backlink = Backlink(1);
    /// Gap in sequence 1, consumes sequence 2
    pub const UP: Backlink = Backlink(2);
    /// Match or mismatch, consumes both
    pub const DIAGONAL: Backlink = Backlink(4);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Backlink) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Backlink {
    type Output = Backlink;

    fn bitor(self, rhs: Backlink) -> Backlink {
        Backlink(self.0 | rhs.0)
    }
}

impl BitOrAssign for Backlink {
    fn bitor_assign(&mut self, rhs: Backlink) {
        self.0 |= rhs.0;
    }
}

/// Row-major (M+1) x (N+1) grid of backlinks
#[derive(Debug, Clone)]
pub struct BacklinkMatrix {
    data: Vec<Backlink>,
    rows: usize,
    cols: usize,
}

impl BacklinkMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![Backlink::NONE; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, link: Backlink) {
        self.data[row * self.cols + col] = link;
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Backlink {
        self.data[row * self.cols + col]
    }
}

/// Outcome of filling the DP matrix for one pair
#[derive(Debug, Clone)]
pub struct MatrixFill {
    pub mode: AlignmentMode,
    pub backlinks: BacklinkMatrix,
    /// Optimal score; never negative in local mode
    pub score: i32,
    /// (M, N) in global mode. In local mode the tied maximum whose backtrack
    /// is longest, the first in fill order among equal lengths.
    pub best_end: Position,
    /// Number of cells sharing the optimal score
    pub ties: usize,
}

/// Running choice of the local end cell
struct LocalBest {
    score: i32,
    end: Position,
    path_len: usize,
    ties: usize,
}

impl LocalBest {
    fn offer(&mut self, score: i32, end: Position, path_len: usize) {
        if score > self.score {
            *self = LocalBest { score, end, path_len, ties: 1 };
        } else if score == self.score {
            self.ties += 1;
            if path_len > self.path_len {
                self.end = end;
                self.path_len = path_len;
            }
        }
    }
}

pub struct PairwiseAligner {
    scoring: ScoringModel,
    limits: AlignLimits,
}

impl PairwiseAligner {
    pub fn new(scoring: ScoringModel) -> Self {
        Self {
            scoring,
            limits: AlignLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: AlignLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn scoring(&self) -> &ScoringModel {
        &self.scoring
    }

    pub fn limits(&self) -> &AlignLimits {
        &self.limits
    }

    /// Fill the backlink grid for `seq1` (rows) against `seq2` (columns).
    ///
    /// Scores saturate at the `i32` bounds instead of overflowing. Besides the
    /// grid, only O(N) rolling rows are allocated: the length of the backtrack
    /// from each cell is carried along, so local ties need no list of cells.
    pub fn align(&self, seq1: &[u8], seq2: &[u8], mode: AlignmentMode) -> AlignResult<MatrixFill> {
        let m = seq1.len();
        let n = seq2.len();
        self.limits.check_matrix(m + 1, n + 1)?;

        let local = mode == AlignmentMode::Local;
        let gap = self.scoring.gap_penalty;
        let edge = |k: usize| {
            if local {
                0
            } else {
                i32::try_from(k).unwrap_or(i32::MAX).saturating_mul(gap)
            }
        };

        let mut backlinks = BacklinkMatrix::new(m + 1, n + 1);
        if !local {
            for j in 1..=n {
                backlinks.set(0, j, Backlink::UP);
            }
            for i in 1..=m {
                backlinks.set(i, 0, Backlink::LEFT);
            }
        }

        let mut prev: Vec<i32> = (0..=n).map(edge).collect();
        let mut cur = vec![0i32; n + 1];
        // Columns a backtrack from each cell would emit; local edges restart
        let mut prev_len: Vec<usize> = (0..=n).map(|j| if local { 0 } else { j }).collect();
        let mut cur_len = vec![0usize; n + 1];

        let mut best = LocalBest {
            score: i32::MIN,
            end: Position::origin(),
            path_len: 0,
            ties: 0,
        };

        for i in 1..=m {
            self.limits.checkpoint()?;

            cur[0] = edge(i);
            cur_len[0] = if local { 0 } else { i };
            let a = seq1[i - 1];

            for j in 1..=n {
                let diag = prev[j - 1].saturating_add(self.scoring.substitution(a, seq2[j - 1]));
                let up = cur[j - 1].saturating_add(gap);
                let left = prev[j].saturating_add(gap);

                let mut score = diag.max(up).max(left);
                if local {
                    score = score.max(0);
                }
                cur[j] = score;

                let mut link = Backlink::NONE;
                if score == diag {
                    link |= Backlink::DIAGONAL;
                }
                if score == up {
                    link |= Backlink::UP;
                }
                if score == left {
                    link |= Backlink::LEFT;
                }
                backlinks.set(i, j, link);

                // Same priority the backtracker applies
                cur_len[j] = if link.contains(Backlink::DIAGONAL) {
                    prev_len[j - 1] + 1
                } else if link.contains(Backlink::LEFT) {
                    prev_len[j] + 1
                } else if link.contains(Backlink::UP) {
                    cur_len[j - 1] + 1
                } else {
                    0
                };

                if local {
                    best.offer(score, Position::new(i, j), cur_len[j]);
                }
            }

            std::mem::swap(&mut prev, &mut cur);
            std::mem::swap(&mut prev_len, &mut cur_len);
        }

        let (score, best_end, ties) = if local {
            if best.ties == 0 {
                (0, Position::origin(), 0)
            } else {
                (best.score, best.end, best.ties)
            }
        } else {
            (prev[n], Position::new(m, n), 1)
        };

        log::debug!(
            "Filled {}x{} {:?} matrix: score {}, end ({}, {}), {} tied end(s)",
            m + 1, n + 1, mode, score, best_end.i, best_end.j, ties
        );

        Ok(MatrixFill {
            mode,
            backlinks,
            score,
            best_end,
            ties,
        })
    }
}
