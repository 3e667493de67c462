//! Scoring model and algorithm selection

use serde::{Deserialize, Serialize};

pub const DEFAULT_MATCH: i32 = 2;
pub const DEFAULT_MISMATCH: i32 = -1;
pub const DEFAULT_GAP_PENALTY: i32 = -2;
pub const DEFAULT_GAP_SYMBOL: u8 = b'-';

/// Pairwise dynamic programming mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentMode {
    /// Needleman-Wunsch, end to end
    Global,
    /// Smith-Waterman, best-scoring subsequence pair
    Local,
}

/// Algorithm used by a multi-sequence session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiAlgorithm {
    NeedlemanWunsch,
    SmithWaterman,
    /// Lines are taken as already aligned; only the consensus is computed
    Unaligned,
}

impl MultiAlgorithm {
    /// Pairwise mode used to fold lines in, or `None` for the pass-through mode
    pub fn pairwise_mode(self) -> Option<AlignmentMode> {
        match self {
            MultiAlgorithm::NeedlemanWunsch => Some(AlignmentMode::Global),
            MultiAlgorithm::SmithWaterman => Some(AlignmentMode::Local),
            MultiAlgorithm::Unaligned => None,
        }
    }
}

impl Default for MultiAlgorithm {
    fn default() -> Self {
        MultiAlgorithm::NeedlemanWunsch
    }
}

/// Linear-gap scoring parameters.
///
/// No sign is assumed for any value; the aligner only compares sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringModel {
    pub match_score: i32,
    pub mismatch_score: i32,
    /// Added once per gap column
    pub gap_penalty: i32,
    pub gap_symbol: u8,
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch_score: DEFAULT_MISMATCH,
            gap_penalty: DEFAULT_GAP_PENALTY,
            gap_symbol: DEFAULT_GAP_SYMBOL,
        }
    }
}

impl ScoringModel {
    pub fn new(match_score: i32, mismatch_score: i32, gap_penalty: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap_penalty,
            ..Self::default()
        }
    }

    pub fn with_gap_symbol(mut self, gap_symbol: u8) -> Self {
        self.gap_symbol = gap_symbol;
        self
    }

    /// Identity substitution: `match_score` for equal symbols, `mismatch_score` otherwise
    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    #[inline]
    pub fn is_gap(&self, symbol: u8) -> bool {
        symbol == self.gap_symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring() {
        let scoring = ScoringModel::default();
        assert_eq!(scoring.match_score, 2);
        assert_eq!(scoring.mismatch_score, -1);
        assert_eq!(scoring.gap_penalty, -2);
        assert_eq!(scoring.gap_symbol, b'-');
    }

    #[test]
    fn test_substitution() {
        let scoring = ScoringModel::new(5, -4, -8);
        assert_eq!(scoring.substitution(b'A', b'A'), 5);
        assert_eq!(scoring.substitution(b'A', b'C'), -4);
        // Symbols are opaque, case matters
        assert_eq!(scoring.substitution(b'a', b'A'), -4);
    }

    #[test]
    fn test_pairwise_mode_mapping() {
        assert_eq!(MultiAlgorithm::NeedlemanWunsch.pairwise_mode(), Some(AlignmentMode::Global));
        assert_eq!(MultiAlgorithm::SmithWaterman.pairwise_mode(), Some(AlignmentMode::Local));
        assert_eq!(MultiAlgorithm::Unaligned.pairwise_mode(), None);
    }
}
