//! # Result Output
//!
//! Presentation layer for identification results. [`CompoundRow`] applies the
//! display rounding (round half to even: integers for ppm columns, 2 decimals
//! for m/z and retention time) and the writers persist either the rounded table
//! (CSV, Parquet) or the full-precision report with provenance (JSON).
//!
//! | Column | Type | Rounding |
//! |--------|------|----------|
//! | Compound ID | Int64 | - |
//! | Compound name | String | - |
//! | Total intensity (ppm) | Int64 | integer |
//! | m/z (Da) | Float64 | 2 decimals |
//! | m/z error (ppm) | Int64 | integer |
//! | Ret. time (min) | Float64 | 2 decimals |
//! | Ret. time error (min) | Float64 (nullable) | 2 decimals |
//! | Peaks within tolerance | Int64 | - |

mod csv_writer;
mod error;
mod json_writer;
mod parquet_writer;
mod render;
mod rows;


use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::pipeline::IdentificationReport;

pub use csv_writer::write_csv;
pub use error::OutputError;
pub use json_writer::write_json;
pub use parquet_writer::{
    create_result_schema, write_parquet, KEY_FORMAT_VERSION, KEY_RUN_METADATA,
    RESULT_FORMAT_VERSION,
};
pub use render::{render_table, summary_line};
pub use rows::{round_to_decimals, round_to_integer, CompoundRow};

/// Published column headers of the identified-compound table
pub mod columns {
    /// External compound identifier
    pub const COMPOUND_ID: &str = "Compound ID";
    /// Compound name
    pub const COMPOUND_NAME: &str = "Compound name";
    /// Normalized total intensity
    pub const TOTAL_INTENSITY_PPM: &str = "Total intensity (ppm)";
    /// Weighted m/z
    pub const MZ: &str = "m/z (Da)";
    /// Weighted relative m/z error
    pub const MZ_ERROR_PPM: &str = "m/z error (ppm)";
    /// Weighted retention time
    pub const RETENTION_TIME: &str = "Ret. time (min)";
    /// Weighted retention time error
    pub const RETENTION_TIME_ERROR: &str = "Ret. time error (min)";
    /// Matched peak count
    pub const PEAK_COUNT: &str = "Peaks within tolerance";

    /// All headers in column order
    pub const ALL: [&str; 8] = [
        COMPOUND_ID,
        COMPOUND_NAME,
        TOTAL_INTENSITY_PPM,
        MZ,
        MZ_ERROR_PPM,
        RETENTION_TIME,
        RETENTION_TIME_ERROR,
        PEAK_COUNT,
    ];
}

/// On-disk format of the result table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rounded display table as CSV
    #[default]
    Csv,
    /// Full-precision report with provenance
    Json,
    /// Rounded display table as Parquet, provenance in the footer
    Parquet,
}

impl OutputFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            "parquet" | "pq" => Some(OutputFormat::Parquet),
            _ => None,
        }
    }

    /// Returns all available format names.
    pub fn variants() -> &'static [&'static str] {
        &["csv", "json", "parquet"]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Parquet => write!(f, "parquet"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "parquet" | "pq" => Ok(OutputFormat::Parquet),
            _ => Err(format!(
                "Unknown output format '{}'. Valid options: {}",
                s,
                OutputFormat::variants().join(", ")
            )),
        }
    }
}

/// Write a report to a file in the given format.
///
/// The result is staged in a temporary file next to `path` and renamed into
/// place once complete, so a failed write leaves any existing file untouched.
pub fn write_report<P: AsRef<Path>>(
    report: &IdentificationReport,
    path: P,
    format: OutputFormat,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staged = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(staged.as_file());
        match format {
            OutputFormat::Csv => write_csv(&report.rows(), &mut writer)?,
            OutputFormat::Json => write_json(report, &mut writer)?,
            OutputFormat::Parquet => write_parquet(report, &mut writer)?,
        }
        writer.flush()?;
    }
    staged.persist(path).map_err(|e| OutputError::from(e.error))?;

    info!(
        "Wrote {} identified compounds to {} ({})",
        report.compounds.len(),
        path.display(),
        format
    );
    Ok(())
}
