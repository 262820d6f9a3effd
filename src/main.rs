//! # mztarget
//!
//! A command-line tool for identifying target compounds in LC-MS peak lists.
//!
//! ## Usage
//!
//! ```bash
//! # Identify targets and print the ranked table
//! mztarget identify -l peaklist.csv -d compounds.csv
//!
//! # Tighter m/z window, write a Parquet result table
//! mztarget identify -l peaklist.csv -d compounds.csv -m 0.001 -o results.parquet
//!
//! # SQLite target database
//! mztarget identify -l peaklist.csv -d compounds.db
//!
//! # Check the inputs before a run
//! mztarget validate -l peaklist.csv -d compounds.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
