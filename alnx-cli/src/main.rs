use alnx_core::{AlignmentMode, MultiAlgorithm};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;
use error::{print_error_and_exit, CliError, CliResult};

#[derive(Parser)]
#[command(name = "alnx")]
#[command(about = "AlnX - pairwise and guide-anchored multiple sequence alignment")]
#[command(version)]
#[command(long_about = "
AlnX aligns sequences with Needleman-Wunsch or Smith-Waterman scoring and
builds a majority consensus over several aligned lines.

Examples:
  alnx align --reference ACGTACGT ACGTTCGT AGTACG
  alnx align --reference ACGT --input queries.txt --mode local --json
  alnx msa AAACCCTTT AAACTTT AACCCTTT
  alnx config --example --write alnx.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors; reports are still printed to stdout
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align a reference against one or more query sequences
    Align {
        /// Reference sequence
        #[arg(short, long, required = true)]
        reference: String,

        /// Query sequences
        queries: Vec<String>,

        /// Text file with one query sequence per line
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Alignment mode
        #[arg(long, default_value = "global")]
        mode: ModeArg,

        /// Score for identical symbols
        #[arg(long = "match", allow_hyphen_values = true)]
        match_score: Option<i32>,

        /// Score for differing symbols
        #[arg(long = "mismatch", allow_hyphen_values = true)]
        mismatch_score: Option<i32>,

        /// Score added per gap column
        #[arg(long = "gap", allow_hyphen_values = true)]
        gap_penalty: Option<i32>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Align several sequences onto the first one and call a consensus
    Msa {
        /// Sequences; the first one is the guide
        sequences: Vec<String>,

        /// Text file with one sequence per line
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pairwise algorithm (defaults to msa.algorithm from the config)
        #[arg(long)]
        algorithm: Option<AlgorithmArg>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration, or write it to a file
    Config {
        /// Use the built-in defaults instead of the loaded configuration
        #[arg(long)]
        example: bool,

        /// Write the configuration to this TOML file instead of printing it
        #[arg(short, long)]
        write: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Global,
    Local,
}

impl From<ModeArg> for AlignmentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Global => AlignmentMode::Global,
            ModeArg::Local => AlignmentMode::Local,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum AlgorithmArg {
    Nw,
    Sw,
    Unaligned,
}

impl From<AlgorithmArg> for MultiAlgorithm {
    fn from(algorithm: AlgorithmArg) -> Self {
        match algorithm {
            AlgorithmArg::Nw => MultiAlgorithm::NeedlemanWunsch,
            AlgorithmArg::Sw => MultiAlgorithm::SmithWaterman,
            AlgorithmArg::Unaligned => MultiAlgorithm::Unaligned,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Set global thread count if specified
    let threads = cli.threads.unwrap_or(config.general.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| CliError::config(format!("Failed to set thread count: {}", e)))?;
    }

    match cli.command {
        Commands::Align {
            reference,
            queries,
            input,
            mode,
            match_score,
            mismatch_score,
            gap_penalty,
            json,
        } => commands::align::execute(
            &config,
            reference,
            queries,
            input,
            mode,
            match_score,
            mismatch_score,
            gap_penalty,
            json,
        ),

        Commands::Msa {
            sequences,
            input,
            algorithm,
            json,
        } => commands::msa::execute(&config, sequences, input, algorithm, json),

        Commands::Config { example, write } => {
            commands::config::execute(&config, example, write.as_deref())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        print_error_and_exit(&err);
    }
}
