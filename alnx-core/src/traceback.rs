//! Backtracking through a backlink matrix
//!
//! When a cell carries several backlinks the move is chosen in the fixed
//! order DIAGONAL, LEFT, UP. Walking stops at the origin, or at a cell with
//! no backlinks, which in local mode marks where the alignment starts.

use crate::matrix::{Backlink, BacklinkMatrix};
use crate::types::{AlignOp, Position, Sequence};

/// Aligned core produced by one backtrack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub aligned1: Sequence,
    pub aligned2: Sequence,
    pub ops: Vec<AlignOp>,
    /// Cell where the walk stopped
    pub start: Position,
    /// Cell where the walk began
    pub end: Position,
}

impl Fragment {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

pub struct Backtracker {
    gap: u8,
}

impl Backtracker {
    pub fn new(gap: u8) -> Self {
        Self { gap }
    }

    pub fn backtrack(
        &self,
        backlinks: &BacklinkMatrix,
        seq1: &[u8],
        seq2: &[u8],
        end: Position,
    ) -> Fragment {
        let mut aligned1 = Vec::new();
        let mut aligned2 = Vec::new();
        let mut ops = Vec::new();

        let (mut i, mut j) = (end.i, end.j);

        while i > 0 || j > 0 {
            let link = backlinks.get(i, j);

            if link.contains(Backlink::DIAGONAL) {
                i -= 1;
                j -= 1;
                aligned1.push(seq1[i]);
                aligned2.push(seq2[j]);
                ops.push(AlignOp::pair(seq1[i], seq2[j]));
            } else if link.contains(Backlink::LEFT) {
                i -= 1;
                aligned1.push(seq1[i]);
                aligned2.push(self.gap);
                ops.push(AlignOp::Deletion);
            } else if link.contains(Backlink::UP) {
                j -= 1;
                aligned1.push(self.gap);
                aligned2.push(seq2[j]);
                ops.push(AlignOp::Insertion);
            } else {
                break;
            }
        }

        // Built back to front
        aligned1.reverse();
        aligned2.reverse();
        ops.reverse();

        Fragment {
            aligned1,
            aligned2,
            ops,
            start: Position::new(i, j),
            end,
        }
    }
}
