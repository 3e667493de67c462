//! Config command implementation - print or write the effective or example configuration

use std::path::Path;

use crate::config::Config;
use crate::error::CliResult;

pub fn execute(config: &Config, example: bool, write: Option<&Path>) -> CliResult<()> {
    let Some(path) = write else {
        let content = if example {
            Config::example_toml()?
        } else {
            config.to_toml()?
        };
        print!("{}", content);
        return Ok(());
    };

    if example {
        Config::default().save_to_file(path)?;
    } else {
        config.save_to_file(path)?;
    }
    log::info!("Wrote configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alnx_core::MultiAlgorithm;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_effective_config() {
        let mut config = Config::default();
        config.scoring.gap_penalty = -5;
        config.msa.algorithm = MultiAlgorithm::Unaligned;
        let file = NamedTempFile::new().unwrap();

        execute(&config, false, Some(file.path())).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.scoring.gap_penalty, -5);
        assert_eq!(loaded.msa.algorithm, MultiAlgorithm::Unaligned);
    }

    #[test]
    fn test_write_example_ignores_loaded_config() {
        let mut config = Config::default();
        config.scoring.gap_penalty = -5;
        let file = NamedTempFile::new().unwrap();

        execute(&config, true, Some(file.path())).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.scoring.gap_penalty, -2);
    }
}
