use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Symbols are opaque bytes; gaps are just another byte value
pub type Sequence = Vec<u8>;

pub const IDENTITY_MARK: u8 = b'*';
pub const NO_IDENTITY_MARK: u8 = b' ';
pub const NO_CONSENSUS: u8 = b' ';

/// Matrix coordinate: `i` indexes sequence 1 (rows), `j` sequence 2 (columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub i: usize,
    pub j: usize,
}

impl Position {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    pub fn origin() -> Self {
        Self::default()
    }
}

/// One alignment column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignOp {
    Match,
    Mismatch,
    /// Gap in sequence 1, consumes a symbol of sequence 2
    Insertion,
    /// Gap in sequence 2, consumes a symbol of sequence 1
    Deletion,
}

impl AlignOp {
    pub fn consumes_seq1(self) -> bool {
        !matches!(self, AlignOp::Insertion)
    }

    pub fn consumes_seq2(self) -> bool {
        !matches!(self, AlignOp::Deletion)
    }

    /// Column op for two symbols placed against each other
    pub fn pair(a: u8, b: u8) -> Self {
        if a == b {
            AlignOp::Match
        } else {
            AlignOp::Mismatch
        }
    }
}

impl From<AlignOp> for char {
    fn from(op: AlignOp) -> Self {
        match op {
            AlignOp::Match => '=',
            AlignOp::Mismatch => 'X',
            AlignOp::Insertion => 'I',
            AlignOp::Deletion => 'D',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub matches: u32,
    pub mismatches: u32,
    pub insertions: u32,
    pub deletions: u32,
    /// Percentage of columns that are matches (0.0 to 100.0)
    pub identity: f32,
}

impl AlignmentStats {
    pub fn from_ops(ops: &[AlignOp]) -> Self {
        let mut stats = Self::default();
        for op in ops {
            match op {
                AlignOp::Match => stats.matches += 1,
                AlignOp::Mismatch => stats.mismatches += 1,
                AlignOp::Insertion => stats.insertions += 1,
                AlignOp::Deletion => stats.deletions += 1,
            }
        }
        let columns = ops.len();
        stats.identity = if columns == 0 {
            0.0
        } else {
            (stats.matches as f32 / columns as f32) * 100.0
        };
        stats
    }

    pub fn gaps(&self) -> u32 {
        self.insertions + self.deletions
    }
}

/// A stitched pairwise alignment covering both input sequences completely
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub aligned_seq1: Sequence,
    pub aligned_seq2: Sequence,
    /// Score of the core region only; stitched prefix and suffix are unscored
    pub score: i32,
    pub ops: Vec<AlignOp>,
    /// Start of the scored core in (seq1, seq2) coordinates
    pub start: Position,
    /// End (exclusive) of the scored core
    pub end: Position,
}

impl AlignmentResult {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn stats(&self) -> AlignmentStats {
        AlignmentStats::from_ops(&self.ops)
    }

    /// Columns at which gaps were inserted into sequence 1
    pub fn gap_columns_in_seq1(&self) -> Vec<usize> {
        self.ops
            .iter()
            .enumerate()
            .filter(|(_, op)| **op == AlignOp::Insertion)
            .map(|(column, _)| column)
            .collect()
    }

    pub fn aligned_seq1_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.aligned_seq1)
    }

    pub fn aligned_seq2_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.aligned_seq2)
    }

    /// Compact per-column op string, e.g. `==I=X`
    pub fn op_string(&self) -> String {
        self.ops.iter().map(|&op| char::from(op)).collect()
    }
}

/// One row of a multi-sequence session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignLine {
    pub name: String,
    /// Untouched input sequence
    pub source: Sequence,
    /// Gapped copy, rebuilt from `source` on every recalculation
    pub working: Sequence,
    pub is_identity: bool,
}

impl AlignLine {
    pub fn new<S: Into<String>>(name: S, source: &[u8]) -> Self {
        Self {
            name: name.into(),
            source: source.to_vec(),
            working: source.to_vec(),
            is_identity: false,
        }
    }

    pub fn identity(marks: Sequence) -> Self {
        Self {
            name: "identity".to_string(),
            source: Vec::new(),
            working: marks,
            is_identity: true,
        }
    }

    pub fn reset(&mut self) {
        self.working.clear();
        self.working.extend_from_slice(&self.source);
    }

    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Insert a gap at `column`, shifting everything after it right.
    /// A column past the end appends.
    pub fn insert_gap(&mut self, column: usize, gap: u8) {
        let column = column.min(self.working.len());
        self.working.insert(column, gap);
    }

    /// Right-pad with `gap` up to `len`
    pub fn pad_to(&mut self, len: usize, gap: u8) {
        if self.working.len() < len {
            self.working.resize(len, gap);
        }
    }

    pub fn working_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.working)
    }
}

/// Per-column majority call and full-agreement markers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// Majority symbol per column, or a space where nothing reaches the threshold
    pub consensus: Sequence,
    /// `*` where every line agrees, space otherwise
    pub identity: Sequence,
}

impl ConsensusResult {
    pub fn len(&self) -> usize {
        self.consensus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consensus.is_empty()
    }

    pub fn identical_columns(&self) -> usize {
        self.identity.iter().filter(|&&c| c == IDENTITY_MARK).count()
    }

    pub fn consensus_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.consensus)
    }

    pub fn identity_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.identity)
    }
}
