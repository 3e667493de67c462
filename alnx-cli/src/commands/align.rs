//! Align command implementation - pairwise alignment of a reference against queries

use alnx_core::{AlignmentMode, AlignmentResult, AlignmentRunner, AlignmentStats, Position};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::ModeArg;

#[derive(Debug, Serialize)]
struct PairReport {
    query_index: usize,
    mode: AlignmentMode,
    score: i32,
    aligned_reference: String,
    aligned_query: String,
    ops: String,
    core_start: Position,
    core_end: Position,
    stats: AlignmentStats,
}

impl PairReport {
    fn new(query_index: usize, mode: AlignmentMode, result: &AlignmentResult) -> Self {
        Self {
            query_index,
            mode,
            score: result.score,
            aligned_reference: result.aligned_seq1_str().into_owned(),
            aligned_query: result.aligned_seq2_str().into_owned(),
            ops: result.op_string(),
            core_start: result.start,
            core_end: result.end,
            stats: result.stats(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &Config,
    reference: String,
    queries: Vec<String>,
    input: Option<PathBuf>,
    mode: ModeArg,
    match_score: Option<i32>,
    mismatch_score: Option<i32>,
    gap_penalty: Option<i32>,
    json: bool,
) -> CliResult<()> {
    let queries = super::collect_sequences(&queries, input.as_deref())?;
    if queries.is_empty() {
        return Err(CliError::invalid_argument(
            "no query sequences given (pass them as arguments or with --input)",
        ));
    }

    // Command-line flags win over alnx.toml
    let mut scoring = config.scoring.to_model()?;
    if let Some(v) = match_score {
        scoring.match_score = v;
    }
    if let Some(v) = mismatch_score {
        scoring.mismatch_score = v;
    }
    if let Some(v) = gap_penalty {
        scoring.gap_penalty = v;
    }

    let mode = AlignmentMode::from(mode);
    let runner = AlignmentRunner::new(scoring).with_limits(config.limits.to_limits());
    let reference = reference.into_bytes();

    log::info!(
        "Aligning {} queries against a {} bp reference ({:?})",
        queries.len(),
        reference.len(),
        mode
    );

    let results: Vec<AlignmentResult> = queries
        .par_iter()
        .map(|query| runner.run(&reference, query, mode))
        .collect::<Result<_, _>>()?;

    let reports: Vec<PairReport> = results
        .iter()
        .enumerate()
        .map(|(i, result)| PairReport::new(i + 1, mode, result))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!(
                "query {}: score {}, identity {:.1}%",
                report.query_index, report.score, report.stats.identity
            );
            println!("  {}", report.aligned_reference);
            println!("  {}", report.aligned_query);
        }
    }

    Ok(())
}
