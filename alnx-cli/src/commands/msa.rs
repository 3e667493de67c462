//! MSA command implementation - guide-anchored multiple alignment and consensus

use alnx_core::{AlignmentSession, MultiAlgorithm, SequenceKind};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::AlgorithmArg;

#[derive(Debug, Serialize)]
struct LineReport {
    name: String,
    sequence: String,
    is_identity: bool,
}

#[derive(Debug, Serialize)]
struct MsaReport {
    algorithm: MultiAlgorithm,
    kind: SequenceKind,
    lines: Vec<LineReport>,
    consensus: Option<String>,
    identity: Option<String>,
}

pub fn execute(
    config: &Config,
    sequences: Vec<String>,
    input: Option<PathBuf>,
    algorithm: Option<AlgorithmArg>,
    json: bool,
) -> CliResult<()> {
    let sequences = super::collect_sequences(&sequences, input.as_deref())?;
    if sequences.is_empty() {
        return Err(CliError::invalid_argument(
            "no sequences given (pass them as arguments or with --input)",
        ));
    }

    let algorithm = algorithm.map(MultiAlgorithm::from).unwrap_or(config.msa.algorithm);
    let mut session = AlignmentSession::new(algorithm, config.scoring.to_model()?)
        .with_limits(config.limits.to_limits())
        .with_show_identity(config.msa.show_identity)
        .with_retain_identity(config.msa.retain_identity);

    for (i, seq) in sequences.iter().enumerate() {
        session.add_line(format!("seq{}", i + 1), seq);
    }

    log::info!("Running {:?} over {} sequences", algorithm, sequences.len());
    session.recalc()?;

    let kind = if session.is_nucleotide() {
        SequenceKind::Nucleotide
    } else {
        SequenceKind::AminoAcid
    };

    let report = MsaReport {
        algorithm,
        kind,
        lines: session
            .lines()
            .iter()
            .map(|line| LineReport {
                name: line.name.clone(),
                sequence: line.working_str().into_owned(),
                is_identity: line.is_identity,
            })
            .collect(),
        consensus: session.consensus().map(|c| c.consensus_str().into_owned()),
        identity: session.consensus().map(|c| c.identity_str().into_owned()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let width = report
        .lines
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(0)
        .max("consensus".len());

    for line in &report.lines {
        println!("{:<width$}  {}", line.name, line.sequence, width = width);
    }
    if let Some(consensus) = &report.consensus {
        println!("{:<width$}  {}", "consensus", consensus, width = width);
    }
    println!("type: {}", match report.kind {
        SequenceKind::Nucleotide => "nucleotide",
        SequenceKind::AminoAcid => "amino acid",
    });

    Ok(())
}
