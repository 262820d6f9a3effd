use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::fields::{locate_columns, Cell};
use super::{delimiter_for_path, peak_columns, TableError};

/// One observed LC-MS peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentalPeak {
    /// Mass-to-charge ratio (Da)
    pub mz: f64,

    /// Retention time (minutes)
    pub retention_time: f64,

    /// Peak intensity (>= 0)
    pub intensity: f64,
}

impl ExperimentalPeak {
    /// Create a new peak
    pub fn new(mz: f64, retention_time: f64, intensity: f64) -> Self {
        Self {
            mz,
            retention_time,
            intensity,
        }
    }
}

/// Experimental peak list, identified by row index
#[derive(Debug, Clone, Default)]
pub struct PeakTable {
    source: String,
    peaks: Vec<ExperimentalPeak>,
}

impl PeakTable {
    /// Wrap already-validated peaks
    pub fn new(source: impl Into<String>, peaks: Vec<ExperimentalPeak>) -> Self {
        Self {
            source: source.into(),
            peaks,
        }
    }

    /// Parse a peak list from a CSV or TSV file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(
            path.display().to_string(),
            BufReader::new(file),
            delimiter_for_path(path),
        )
    }

    /// Parse a peak list from a reader
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

        let [mz_idx, rt_idx, intensity_idx] = locate_columns(
            csv_reader.headers()?,
            [
                peak_columns::MZ,
                peak_columns::RETENTION_TIME,
                peak_columns::INTENSITY,
            ],
            &source,
        )?;

        let mut peaks = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = i + 1;

            let mz = Cell::new(&source, row, peak_columns::MZ, &record, mz_idx).finite_f64()?;
            let retention_time =
                Cell::new(&source, row, peak_columns::RETENTION_TIME, &record, rt_idx).finite_f64()?;

            let intensity_cell = Cell::new(&source, row, peak_columns::INTENSITY, &record, intensity_idx);
            let intensity = intensity_cell.finite_f64()?;
            if intensity < 0.0 {
                return Err(intensity_cell.invalid("intensity must be non-negative"));
            }

            peaks.push(ExperimentalPeak::new(mz, retention_time, intensity));
        }

        debug!("Read {} peaks from {}", peaks.len(), source);
        Ok(Self { source, peaks })
    }

    /// Label of the input this table was read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Peaks in row order
    pub fn peaks(&self) -> &[ExperimentalPeak] {
        &self.peaks
    }

    /// Number of peaks
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    /// Whether the table has no peaks
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}
