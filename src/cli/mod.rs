use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use mztarget::matcher::MatchStrategy;
use mztarget::output::OutputFormat;

mod config;
mod identify;
mod validate;

/// mztarget - LC-MS Target Compound Identification
#[derive(Parser)]
#[command(name = "mztarget")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Matching strategy selection.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrategyArg {
    /// Full peak x target connection maps
    Dense,
    /// Sorted m/z index with range queries
    Indexed,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Dense => MatchStrategy::Dense,
            StrategyArg::Indexed => MatchStrategy::Indexed,
        }
    }
}

/// Result file format selection.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Rounded table as CSV
    Csv,
    /// Full-precision report as JSON
    Json,
    /// Rounded table as Parquet
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Parquet => OutputFormat::Parquet,
        }
    }
}

/// Input tables and tolerance overrides shared by all subcommands
#[derive(Args, Debug)]
pub struct InputArgs {
    /// CSV/TSV peak list with mz, rt and intensity columns
    #[arg(short = 'l', long, value_name = "FILE")]
    peaklist_file: PathBuf,

    /// Target compound database (CSV/TSV, or SQLite .db with a compoundlist table)
    #[arg(short = 'd', long, value_name = "FILE")]
    database_file: PathBuf,

    /// m/z tolerance in Da [default: 0.002]
    #[arg(short = 'm', long)]
    mass_tolerance: Option<f64>,

    /// Default retention time tolerance in minutes [default: 0.5]
    #[arg(short = 't', long)]
    time_tolerance: Option<f64>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl InputArgs {
    fn check_exist(&self) -> Result<()> {
        for path in [&self.peaklist_file, &self.database_file] {
            if !path.exists() {
                anyhow::bail!("Input file does not exist: {}", path.display());
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Identify target compounds in an LC-MS peak list
    Identify {
        #[command(flatten)]
        inputs: InputArgs,

        /// Matching strategy (results are identical, performance differs)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Write the result table to this file
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Result file format (inferred from the output extension when omitted)
        #[arg(short = 'f', long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Validate input tables without running identification
    Validate {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Identify {
            inputs,
            strategy,
            output,
            format,
        } => identify::run(
            inputs,
            strategy.map(MatchStrategy::from),
            output,
            format.map(OutputFormat::from),
        ),
        Commands::Validate { inputs } => validate::run(inputs),
    }
}
