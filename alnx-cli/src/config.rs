//! Configuration handling for the AlnX CLI
//!
//! Supports loading configuration from alnx.toml files with CLI argument overrides.

use alnx_core::limits::DEFAULT_MAX_MATRIX_CELLS;
use alnx_core::scoring::{DEFAULT_GAP_PENALTY, DEFAULT_MATCH, DEFAULT_MISMATCH};
use alnx_core::{AlignLimits, MultiAlgorithm, ScoringModel};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub msa: MsaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Worker threads for batch pairwise runs (0 lets rayon decide)
    #[serde(default)]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_match_score")]
    pub match_score: i32,

    #[serde(default = "default_mismatch_score")]
    pub mismatch_score: i32,

    /// Added once per gap column
    #[serde(default = "default_gap_penalty")]
    pub gap_penalty: i32,

    /// Single ASCII character used for gaps in output rows
    #[serde(default = "default_gap_symbol")]
    pub gap_symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest backlink matrix (rows x columns) a single alignment may use
    #[serde(default = "default_max_matrix_cells")]
    pub max_matrix_cells: u64,

    /// Wall-clock budget per command, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsaConfig {
    #[serde(default)]
    pub algorithm: MultiAlgorithm,

    #[serde(default = "default_true")]
    pub show_identity: bool,

    #[serde(default)]
    pub retain_identity: bool,
}

fn default_match_score() -> i32 { DEFAULT_MATCH }
fn default_mismatch_score() -> i32 { DEFAULT_MISMATCH }
fn default_gap_penalty() -> i32 { DEFAULT_GAP_PENALTY }
fn default_gap_symbol() -> String { "-".to_string() }
fn default_max_matrix_cells() -> u64 { DEFAULT_MAX_MATRIX_CELLS }
fn default_true() -> bool { true }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { threads: 0 }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: default_match_score(),
            mismatch_score: default_mismatch_score(),
            gap_penalty: default_gap_penalty(),
            gap_symbol: default_gap_symbol(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_matrix_cells: default_max_matrix_cells(),
            timeout_ms: None,
        }
    }
}

impl Default for MsaConfig {
    fn default() -> Self {
        Self {
            algorithm: MultiAlgorithm::default(),
            show_identity: default_true(),
            retain_identity: false,
        }
    }
}

impl ScoringConfig {
    pub fn to_model(&self) -> Result<ScoringModel> {
        let gap = match self.gap_symbol.as_bytes() {
            [gap] => *gap,
            _ => bail!(
                "scoring.gap_symbol must be a single ASCII character, got {:?}",
                self.gap_symbol
            ),
        };
        Ok(ScoringModel::new(self.match_score, self.mismatch_score, self.gap_penalty)
            .with_gap_symbol(gap))
    }
}

impl LimitsConfig {
    /// Engine limits; the deadline starts counting now
    pub fn to_limits(&self) -> AlignLimits {
        let limits = AlignLimits::default().with_max_matrix_cells(self.max_matrix_cells);
        match self.timeout_ms {
            Some(ms) => limits.with_timeout(Duration::from_millis(ms)),
            None => limits,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find alnx.toml in current directory
                let default_path = PathBuf::from("alnx.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: alnx.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        Self::default().to_toml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scoring.match_score, 2);
        assert_eq!(config.scoring.gap_symbol, "-");
        assert_eq!(config.limits.max_matrix_cells, 100_000_000);
        assert_eq!(config.msa.algorithm, MultiAlgorithm::NeedlemanWunsch);
        assert!(config.msa.show_identity);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.scoring.gap_penalty = -3;
        config.msa.algorithm = MultiAlgorithm::SmithWaterman;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded_config = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded_config.scoring.gap_penalty, -3);
        assert_eq!(loaded_config.msa.algorithm, MultiAlgorithm::SmithWaterman);
        assert_eq!(loaded_config.limits.max_matrix_cells, config.limits.max_matrix_cells);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "[scoring]\nmismatch_score = -3\n\n[msa]\nalgorithm = \"unaligned\"")?;

        let config = Config::load_from_file(temp_file.path())?;
        assert_eq!(config.scoring.mismatch_score, -3);
        assert_eq!(config.scoring.match_score, 2);
        assert_eq!(config.msa.algorithm, MultiAlgorithm::Unaligned);
        assert!(config.limits.timeout_ms.is_none());

        Ok(())
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[general]"));
        assert!(example.contains("[scoring]"));
        assert!(example.contains("[limits]"));
        assert!(example.contains("needleman-wunsch"));
        Ok(())
    }

    #[test]
    fn test_scoring_model_conversion() -> Result<()> {
        let mut scoring = ScoringConfig::default();
        scoring.gap_symbol = ".".to_string();
        let model = scoring.to_model()?;
        assert_eq!(model.gap_symbol, b'.');
        assert_eq!(model.gap_penalty, -2);

        scoring.gap_symbol = "--".to_string();
        assert!(scoring.to_model().is_err());
        Ok(())
    }

    #[test]
    fn test_limits_conversion() {
        let limits = LimitsConfig {
            max_matrix_cells: 10,
            timeout_ms: Some(5_000),
        }
        .to_limits();
        assert_eq!(limits.max_matrix_cells, 10);
        assert!(limits.deadline.is_some());
    }
}
