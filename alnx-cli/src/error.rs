//! Error handling for the AlnX CLI

use alnx_core::AlignError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for AlnX CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error(transparent)]
    Alignment(#[from] AlignError),
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        // Keep the whole context chain
        Self::config(format!("{:#}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::io(format!("JSON serialization error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Input files hold one plain sequence per line (no FASTA headers)",
                path.display()
            ));
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your alnx.toml configuration file\n\
                 • Use 'alnx config --example' to generate a sample configuration"
            );
        }

        CliError::Alignment(AlignError::ResourceExceeded { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Align shorter sequences or split them into windows\n\
                 • Raise limits.max_matrix_cells in alnx.toml if enough memory is available"
            );
        }

        CliError::Alignment(AlignError::DeadlineExceeded) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Raise or remove limits.timeout_ms in alnx.toml"
            );
        }

        CliError::Alignment(AlignError::InconsistentState(_)) => {
            message.push_str("\n\nThis is a bug in the alignment engine; please report it.");
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("seqs.txt"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("Check that the file path is correct"));
    }

    #[test]
    fn test_alignment_error_conversion() {
        let err: CliError = AlignError::ResourceExceeded { cells: 200, limit: 100 }.into();
        assert_eq!(err.to_string(), "Alignment needs 200 matrix cells, limit is 100");
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("max_matrix_cells"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io { .. }));
    }
}
