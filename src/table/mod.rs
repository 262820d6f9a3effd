//! # Input Tables
//!
//! Fixed-schema records for the two inputs of an identification run, validated
//! once at the boundary so the matcher and aggregator only ever see well-typed
//! values.
//!
//! ## Peak table
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | mz | Float64 | Mass-to-charge ratio (Da) |
//! | rt | Float64 | Retention time (minutes) |
//! | intensity | Float64 | Peak intensity, >= 0 |
//!
//! ## Target table
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | compound_id | Int64 | External compound identifier |
//! | compound | String | Compound name |
//! | mass_to_charge_ratio | Float64 (nullable) | Reference m/z (Da) |
//! | retention_time | Float64 (nullable) | Reference retention time (minutes) |
//! | retention_time_tolerance | Float64 (nullable) | Per-target retention time window |
//!
//! Headers are matched case-insensitively and extra columns are ignored. Files
//! ending in `.tsv`, `.tab` or `.txt` are read tab-delimited, everything else as CSV.
//! Target databases ending in `.db`, `.sqlite` or `.sqlite3` are SQLite files
//! whose `compoundlist` table carries the target columns.

mod error;
mod fields;
mod peaks;
mod sqlite;
mod targets;


use std::path::Path;

pub use error::TableError;
pub use peaks::{ExperimentalPeak, PeakTable};
pub use sqlite::SQLITE_TARGET_TABLE;
pub use targets::{TargetCompound, TargetTable};

/// Column names of the experimental peak table
pub mod peak_columns {
    /// Mass-to-charge ratio
    pub const MZ: &str = "mz";
    /// Retention time
    pub const RETENTION_TIME: &str = "rt";
    /// Intensity
    pub const INTENSITY: &str = "intensity";
}

/// Column names of the target compound table
pub mod target_columns {
    /// External compound identifier
    pub const COMPOUND_ID: &str = "compound_id";
    /// Compound name
    pub const COMPOUND: &str = "compound";
    /// Reference m/z
    pub const MASS_TO_CHARGE_RATIO: &str = "mass_to_charge_ratio";
    /// Reference retention time
    pub const RETENTION_TIME: &str = "retention_time";
    /// Per-target retention time tolerance
    pub const RETENTION_TIME_TOLERANCE: &str = "retention_time_tolerance";
}

/// Pick the field delimiter from a file extension
pub fn delimiter_for_path(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("tab") | Some("txt") => b'\t',
        _ => b',',
    }
}

/// Whether a target database path names a SQLite file
pub fn is_sqlite_path(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref(),
        Some("db") | Some("sqlite") | Some("sqlite3")
    )
}
