use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use csv::StringRecord;

use super::fields::{locate_columns, Cell};
use super::{delimiter_for_path, is_sqlite_path, target_columns, TableError};

/// One reference compound from the target database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCompound {
    /// External identifier (not necessarily the row index)
    pub compound_id: i64,

    /// Compound name
    pub name: String,

    /// Reference m/z (Da); NaN when the database leaves it empty
    pub mz: f64,

    /// Reference retention time (minutes); `None` leaves retention time unconstrained
    pub retention_time: Option<f64>,

    /// Per-target retention time window; `None` uses the configured default
    pub retention_time_tolerance: Option<f64>,
}

impl TargetCompound {
    /// Create a target with unconstrained retention time
    pub fn new(compound_id: i64, name: impl Into<String>, mz: f64) -> Self {
        Self {
            compound_id,
            name: name.into(),
            mz,
            retention_time: None,
            retention_time_tolerance: None,
        }
    }

    /// Set the reference retention time
    pub fn with_retention_time(mut self, retention_time: f64) -> Self {
        self.retention_time = Some(retention_time);
        self
    }

    /// Set the per-target retention time tolerance
    pub fn with_retention_time_tolerance(mut self, tolerance: f64) -> Self {
        self.retention_time_tolerance = Some(tolerance);
        self
    }

    /// Whether the reference m/z is usable for matching
    pub fn has_mz(&self) -> bool {
        self.mz.is_finite()
    }
}

/// Target compound database, identified by row index
#[derive(Debug, Clone, Default)]
pub struct TargetTable {
    source: String,
    targets: Vec<TargetCompound>,
}

impl TargetTable {
    /// Wrap already-validated targets
    pub fn new(source: impl Into<String>, targets: Vec<TargetCompound>) -> Self {
        Self {
            source: source.into(),
            targets,
        }
    }

    /// Read a target database, picking SQLite or CSV/TSV from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        if is_sqlite_path(path) {
            return Self::from_sqlite(path);
        }
        let file = File::open(path)?;
        Self::from_reader(
            path.display().to_string(),
            BufReader::new(file),
            delimiter_for_path(path),
        )
    }

    /// Parse a target database from a reader
    pub fn from_reader<R: Read>(
        source: impl Into<String>,
        reader: R,
        delimiter: u8,
    ) -> Result<Self, TableError> {
        let source = source.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let records = csv_reader.records().map(|r| r.map_err(TableError::from));
        Self::from_records(source, &headers, records)
    }

    /// Validate header and rows of a target table, whatever it was read from
    pub(super) fn from_records<I>(source: String, headers: &StringRecord, records: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Result<StringRecord, TableError>>,
    {
        let [id_idx, name_idx, mz_idx, rt_idx, tol_idx] = locate_columns(
            headers,
            [
                target_columns::COMPOUND_ID,
                target_columns::COMPOUND,
                target_columns::MASS_TO_CHARGE_RATIO,
                target_columns::RETENTION_TIME,
                target_columns::RETENTION_TIME_TOLERANCE,
            ],
            &source,
        )?;

        let mut targets = Vec::new();
        for (i, record) in records.into_iter().enumerate() {
            let record = record?;
            let row = i + 1;
            let cell = |column: &'static str, index: usize| Cell::new(&source, row, column, &record, index);

            let compound_id = cell(target_columns::COMPOUND_ID, id_idx).integer()?;
            let name = cell(target_columns::COMPOUND, name_idx).text();

            let mz_cell = cell(target_columns::MASS_TO_CHARGE_RATIO, mz_idx);
            let mz = match mz_cell.optional_f64()? {
                Some(mz) if mz > 0.0 => mz,
                Some(_) => return Err(mz_cell.invalid("m/z must be positive")),
                None => {
                    warn!(
                        "Target '{}' (compound_id {}) in {} has no m/z and will never match",
                        name, compound_id, source
                    );
                    f64::NAN
                }
            };

            let retention_time = cell(target_columns::RETENTION_TIME, rt_idx).optional_f64()?;

            let tol_cell = cell(target_columns::RETENTION_TIME_TOLERANCE, tol_idx);
            let retention_time_tolerance = match tol_cell.optional_f64()? {
                Some(tol) if tol <= 0.0 => {
                    return Err(tol_cell.invalid("retention time tolerance must be positive"))
                }
                other => other,
            };

            targets.push(TargetCompound {
                compound_id,
                name,
                mz,
                retention_time,
                retention_time_tolerance,
            });
        }

        debug!("Read {} targets from {}", targets.len(), source);
        Ok(Self { source, targets })
    }

    /// Label of the input this table was read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Targets in row order
    pub fn targets(&self) -> &[TargetCompound] {
        &self.targets
    }

    /// Number of targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the table has no targets
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of targets whose retention time is unconstrained
    pub fn unconstrained_retime_count(&self) -> usize {
        self.targets.iter().filter(|t| t.retention_time.is_none()).count()
    }

    /// Number of targets without a usable m/z
    pub fn missing_mz_count(&self) -> usize {
        self.targets.iter().filter(|t| !t.has_mz()).count()
    }
}
