//! Command implementations for the AlnX CLI

pub mod align;
pub mod config;
pub mod msa;

use crate::error::{CliError, CliResult};
use alnx_core::Sequence;
use std::path::Path;

/// Read one sequence per line, skipping blank lines
pub fn read_sequences(path: &Path) -> CliResult<Vec<Sequence>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let sequences: Vec<Sequence> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.as_bytes().to_vec())
        .collect();

    log::info!("Read {} sequences from {}", sequences.len(), path.display());
    Ok(sequences)
}

/// Literal sequences first, then any read from `input`
pub fn collect_sequences(literal: &[String], input: Option<&Path>) -> CliResult<Vec<Sequence>> {
    let mut sequences: Vec<Sequence> = literal.iter().map(|s| s.as_bytes().to_vec()).collect();
    if let Some(path) = input {
        sequences.extend(read_sequences(path)?);
    }
    Ok(sequences)
}
