//! Guide-anchored multiple sequence alignment
//!
//! Every line is aligned pairwise against the current state of line 0.
//! Gaps that this introduces into line 0 are copied, column for column,
//! into every line folded in before, so all rows keep the same length.
//! The result depends on line order and is not an optimal multiple
//! alignment; progressive or tree-guided methods are out of scope.

use crate::consensus::{self, ConsensusBuilder};
use crate::error::{AlignError, AlignResult};
use crate::limits::AlignLimits;
use crate::runner::AlignmentRunner;
use crate::scoring::{AlignmentMode, MultiAlgorithm, ScoringModel};
use crate::types::{AlignLine, ConsensusResult};

pub struct MultiSequenceAligner {
    runner: AlignmentRunner,
    mode: AlignmentMode,
    gap: u8,
}

impl MultiSequenceAligner {
    pub fn new(mode: AlignmentMode, scoring: ScoringModel) -> Self {
        Self {
            runner: AlignmentRunner::new(scoring),
            mode,
            gap: scoring.gap_symbol,
        }
    }

    pub fn with_limits(mut self, limits: AlignLimits) -> Self {
        self.runner = self.runner.with_limits(limits);
        self
    }

    /// Reset every line from its source and fold lines 1.. onto line 0.
    /// `lines` must not contain identity rows.
    pub fn align_lines(&self, lines: &mut [AlignLine]) -> AlignResult<()> {
        for line in lines.iter_mut() {
            line.reset();
        }

        for a in 1..lines.len() {
            let result = self.runner.run(&lines[0].working, &lines[a].source, self.mode)?;
            let inserted = result.gap_columns_in_seq1();
            lines[a].working = result.aligned_seq2;

            if inserted.is_empty() {
                continue;
            }
            lines[0].working = result.aligned_seq1;

            // Columns are ascending and already in the new coordinates
            for line in &mut lines[1..a] {
                for &column in &inserted {
                    line.insert_gap(column, self.gap);
                }
            }

            let width = lines[0].len();
            for line in &mut lines[..=a] {
                line.pad_to(width, self.gap);
            }

            log::trace!(
                "Line {} added {} gap column(s) to the guide, width now {}",
                a,
                inserted.len(),
                width
            );
        }

        Ok(())
    }
}

/// Caller-owned multi-sequence alignment state
#[derive(Debug, Clone)]
pub struct AlignmentSession {
    lines: Vec<AlignLine>,
    algorithm: MultiAlgorithm,
    scoring: ScoringModel,
    limits: AlignLimits,
    /// Append the identity row to `lines` after each recalculation
    show_identity: bool,
    /// Keep identity rows from earlier recalculations instead of dropping them
    retain_identity: bool,
    consensus: Option<ConsensusResult>,
}

impl Default for AlignmentSession {
    fn default() -> Self {
        Self::new(MultiAlgorithm::default(), ScoringModel::default())
    }
}

impl AlignmentSession {
    pub fn new(algorithm: MultiAlgorithm, scoring: ScoringModel) -> Self {
        Self {
            lines: Vec::new(),
            algorithm,
            scoring,
            limits: AlignLimits::default(),
            show_identity: true,
            retain_identity: false,
            consensus: None,
        }
    }

    pub fn with_limits(mut self, limits: AlignLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_show_identity(mut self, show: bool) -> Self {
        self.show_identity = show;
        self
    }

    pub fn with_retain_identity(mut self, retain: bool) -> Self {
        self.retain_identity = retain;
        self
    }

    pub fn algorithm(&self) -> MultiAlgorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: MultiAlgorithm) {
        self.algorithm = algorithm;
    }

    pub fn scoring(&self) -> &ScoringModel {
        &self.scoring
    }

    pub fn set_scoring(&mut self, scoring: ScoringModel) {
        self.scoring = scoring;
    }

    /// Append a sequence; returns its index in `lines()`
    pub fn add_line<S: Into<String>>(&mut self, name: S, source: &[u8]) -> usize {
        self.lines.push(AlignLine::new(name, source));
        self.lines.len() - 1
    }

    pub fn remove_line(&mut self, index: usize) -> AlignResult<AlignLine> {
        self.check_index(index)?;
        Ok(self.lines.remove(index))
    }

    /// Move a line one step at a time from `from` to `to`, then recalculate.
    /// Line 0 is the guide, so this can change every row.
    pub fn move_line(&mut self, from: usize, to: usize) -> AlignResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;

        let mut at = from;
        while at != to {
            let next = if at < to { at + 1 } else { at - 1 };
            self.lines.swap(at, next);
            at = next;
        }

        self.recalc()
    }

    /// Every line, identity rows included
    pub fn lines(&self) -> &[AlignLine] {
        &self.lines
    }

    pub fn aligned_lines(&self) -> impl Iterator<Item = &AlignLine> {
        self.lines.iter().filter(|line| !line.is_identity)
    }

    pub fn identity_line(&self) -> Option<&AlignLine> {
        self.lines.iter().rev().find(|line| line.is_identity)
    }

    pub fn consensus(&self) -> Option<&ConsensusResult> {
        self.consensus.as_ref()
    }

    pub fn is_nucleotide(&self) -> bool {
        consensus::is_nucleotide(&self.lines, self.scoring.gap_symbol)
    }

    pub fn is_amino_acid(&self) -> bool {
        consensus::is_amino_acid(&self.lines, self.scoring.gap_symbol)
    }

    /// Recompute every working sequence and the consensus from scratch.
    /// An empty session is left untouched.
    pub fn recalc(&mut self) -> AlignResult<()> {
        let (mut rows, stale): (Vec<AlignLine>, Vec<AlignLine>) =
            std::mem::take(&mut self.lines)
                .into_iter()
                .partition(|line| !line.is_identity);

        self.consensus = None;
        let outcome = self.recalc_rows(&mut rows);

        self.lines = rows;
        if self.retain_identity {
            self.lines.extend(stale);
        }

        if let Some((consensus, append_identity)) = outcome? {
            if append_identity && self.show_identity {
                self.lines.push(AlignLine::identity(consensus.identity.clone()));
            }
            self.consensus = Some(consensus);
        }

        Ok(())
    }

    fn recalc_rows(&self, rows: &mut [AlignLine]) -> AlignResult<Option<(ConsensusResult, bool)>> {
        if rows.is_empty() {
            return Ok(None);
        }
        if rows.len() == 1 {
            rows[0].reset();
            return Ok(None);
        }

        let gap = self.scoring.gap_symbol;
        let append_identity = match self.algorithm.pairwise_mode() {
            Some(mode) => {
                log::debug!("Aligning {} lines with {:?}", rows.len(), self.algorithm);
                MultiSequenceAligner::new(mode, self.scoring)
                    .with_limits(self.limits.clone())
                    .align_lines(rows)?;
                true
            }
            None => {
                let width = rows.iter().map(|r| r.source.len()).max().unwrap_or(0);
                for row in rows.iter_mut() {
                    row.reset();
                    row.pad_to(width, gap);
                }
                false
            }
        };

        let consensus = ConsensusBuilder::new().build(rows)?;
        Ok(Some((consensus, append_identity)))
    }

    fn check_index(&self, index: usize) -> AlignResult<()> {
        if index >= self.lines.len() {
            return Err(AlignError::InvalidInput(format!(
                "line index {} out of range, session has {} lines",
                index,
                self.lines.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(algorithm: MultiAlgorithm, seqs: &[&str]) -> AlignmentSession {
        let mut session = AlignmentSession::new(algorithm, ScoringModel::new(2, -1, -2));
        for (i, s) in seqs.iter().enumerate() {
            session.add_line(format!("seq{}", i), s.as_bytes());
        }
        session
    }

    fn working(session: &AlignmentSession) -> Vec<String> {
        session.aligned_lines().map(|l| l.working_str().into_owned()).collect()
    }

    #[test]
    fn test_guide_gaps_propagate() {
        let mut s = session(MultiAlgorithm::NeedlemanWunsch, &["AAACTTT", "AAACCCTTT", "AACCCTTT"]);
        s.recalc().unwrap();
        assert_eq!(working(&s), vec!["AAA--CTTT", "AAACCCTTT", "-AACCCTTT"]);
    }

    #[test]
    fn test_earlier_lines_receive_new_guide_gaps() {
        let mut s = session(MultiAlgorithm::SmithWaterman, &["ACGT", "ACGGT", "AACGT"]);
        s.recalc().unwrap();
        assert_eq!(working(&s), vec!["-AC-GT", "-ACGGT", "AAC-GT"]);
        let consensus = s.consensus().unwrap();
        assert_eq!(consensus.consensus_str(), "-AC-GT");
        assert_eq!(consensus.identity_str(), " ** **");
    }

    #[test]
    fn test_identity_row_is_appended_and_replaced() {
        let mut s = session(MultiAlgorithm::NeedlemanWunsch, &["GATTACA", "GCATGCT"]);
        s.recalc().unwrap();
        assert_eq!(s.lines().len(), 3);
        assert_eq!(s.identity_line().unwrap().working, b"*  * * ");
        assert_eq!(s.consensus().unwrap().consensus, b"G  T C ");

        s.recalc().unwrap();
        assert_eq!(s.lines().len(), 3);
    }

    #[test]
    fn test_hidden_identity_row() {
        let mut s = session(MultiAlgorithm::NeedlemanWunsch, &["GATTACA", "GCATGCT"])
            .with_show_identity(false);
        s.recalc().unwrap();
        assert_eq!(s.lines().len(), 2);
        assert!(s.consensus().is_some());
    }

    #[test]
    fn test_retained_identity_rows_accumulate() {
        let mut s = session(MultiAlgorithm::NeedlemanWunsch, &["ACGT", "AGT"])
            .with_retain_identity(true);
        s.recalc().unwrap();
        s.recalc().unwrap();
        assert_eq!(s.lines().iter().filter(|l| l.is_identity).count(), 2);
        assert_eq!(s.aligned_lines().count(), 2);
    }

    #[test]
    fn test_single_line_is_reset_only() {
        let mut s = session(MultiAlgorithm::NeedlemanWunsch, &["ACGT"]);
        s.recalc().unwrap();
        assert_eq!(working(&s), vec!["ACGT"]);
        assert!(s.consensus().is_none());
        assert_eq!(s.lines().len(), 1);
    }

    #[test]
    fn test_empty_session_is_noop() {
        let mut s = AlignmentSession::default();
        s.recalc().unwrap();
        assert!(s.lines().is_empty());
        assert!(s.consensus().is_none());
    }

    #[test]
    fn test_unaligned_mode_pads_and_votes() {
        let mut s = session(MultiAlgorithm::Unaligned, &["AC-GT", "ACGGT", "ACG"]);
        s.recalc().unwrap();
        assert_eq!(working(&s), vec!["AC-GT", "ACGGT", "ACG--"]);
        assert_eq!(s.consensus().unwrap().consensus_str(), "ACGGT");
        // No identity row in pass-through mode
        assert_eq!(s.lines().len(), 3);
    }

    #[test]
    fn test_move_line_changes_guide() {
        let mut s = session(MultiAlgorithm::NeedlemanWunsch, &["AAACCCTTT", "AAACTTT", "AACCCTTT"]);
        s.move_line(1, 0).unwrap();
        assert_eq!(s.aligned_lines().next().unwrap().source, b"AAACTTT");
        assert_eq!(working(&s), vec!["AAA--CTTT", "AAACCCTTT", "-AACCCTTT"]);
    }

    #[test]
    fn test_bad_indices() {
        let mut s = session(MultiAlgorithm::NeedlemanWunsch, &["ACGT"]);
        assert!(matches!(s.remove_line(3), Err(AlignError::InvalidInput(_))));
        assert!(matches!(s.move_line(0, 1), Err(AlignError::InvalidInput(_))));
        assert_eq!(s.remove_line(0).unwrap().source, b"ACGT");
    }

    #[test]
    fn test_resource_error_leaves_lines_in_place() {
        let mut s = session(MultiAlgorithm::NeedlemanWunsch, &["ACGTACGT", "ACGTACGT"])
            .with_limits(AlignLimits::default().with_max_matrix_cells(10));
        let result = s.recalc();
        assert!(matches!(result, Err(AlignError::ResourceExceeded { .. })));
        assert_eq!(s.lines().len(), 2);
        assert!(s.consensus().is_none());
    }
}
