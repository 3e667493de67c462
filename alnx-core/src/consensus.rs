//! Consensus calling and alphabet classification over aligned lines

use crate::error::{AlignError, AlignResult};
use crate::types::{AlignLine, ConsensusResult, IDENTITY_MARK, NO_CONSENSUS, NO_IDENTITY_MARK};
use serde::{Deserialize, Serialize};

/// Share of lines (in percent) a symbol needs to become the consensus call
pub const DEFAULT_CONSENSUS_THRESHOLD: u32 = 60;

/// Share of non-nucleotide symbols (in percent) that marks amino acids
pub const AMINO_ACID_THRESHOLD: usize = 25;

pub struct ConsensusBuilder {
    threshold_percent: u32,
}

impl Default for ConsensusBuilder {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_CONSENSUS_THRESHOLD,
        }
    }
}

impl ConsensusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold_percent: u32) -> Self {
        self.threshold_percent = threshold_percent;
        self
    }

    /// Identity and consensus rows over every non-identity line
    pub fn build(&self, lines: &[AlignLine]) -> AlignResult<ConsensusResult> {
        let rows: Vec<&[u8]> = lines
            .iter()
            .filter(|line| !line.is_identity)
            .map(|line| line.working.as_slice())
            .collect();
        self.build_rows(&rows)
    }

    pub fn build_rows(&self, rows: &[&[u8]]) -> AlignResult<ConsensusResult> {
        let first = rows.first().ok_or_else(|| {
            AlignError::InvalidInput("consensus needs at least one line".to_string())
        })?;
        let width = first.len();

        if let Some(bad) = rows.iter().position(|row| row.len() != width) {
            let message = format!(
                "line {} has length {}, line 0 has length {}",
                bad,
                rows[bad].len(),
                width
            );
            debug_assert!(false, "inconsistent line lengths: {}", message);
            log::error!("Inconsistent line lengths reached consensus: {}", message);
            return Err(AlignError::InconsistentState(message));
        }

        let count = rows.len() as u64;
        let mut identity = Vec::with_capacity(width);
        let mut consensus = Vec::with_capacity(width);
        let mut freq = [0u32; 256];

        for column in 0..width {
            let symbol = first[column];
            let agree = rows.iter().all(|row| row[column] == symbol);
            identity.push(if agree { IDENTITY_MARK } else { NO_IDENTITY_MARK });

            freq.fill(0);
            for row in rows {
                freq[row[column] as usize] += 1;
            }

            // At most one symbol can clear a threshold above one half
            let call = (0..=255u8)
                .filter(|&c| {
                    100 * freq[c as usize] as u64 >= self.threshold_percent as u64 * count
                })
                .last()
                .unwrap_or(NO_CONSENSUS);
            consensus.push(call);
        }

        Ok(ConsensusResult { consensus, identity })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequenceKind {
    Nucleotide,
    AminoAcid,
}

/// Classify sequences by the share of symbols outside `ACGTN`, gap and space.
/// Only uppercase `ACGTN` count as nucleotides. An empty input counts as nucleotide.
pub fn classify<'a, I>(sequences: I, gap: u8) -> SequenceKind
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut total = 0usize;
    let mut foreign = 0usize;

    for seq in sequences {
        total += seq.len();
        foreign += seq
            .iter()
            .filter(|&&c| {
                c != gap
                    && c != b' '
                    && !matches!(c, b'A' | b'C' | b'G' | b'T' | b'N')
            })
            .count();
    }

    if total > 0 && foreign * 100 >= total * AMINO_ACID_THRESHOLD {
        SequenceKind::AminoAcid
    } else {
        SequenceKind::Nucleotide
    }
}

pub fn is_nucleotide(lines: &[AlignLine], gap: u8) -> bool {
    let rows = lines
        .iter()
        .filter(|line| !line.is_identity)
        .map(|line| line.working.as_slice());
    classify(rows, gap) == SequenceKind::Nucleotide
}

pub fn is_amino_acid(lines: &[AlignLine], gap: u8) -> bool {
    !is_nucleotide(lines, gap)
}
