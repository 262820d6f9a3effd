use serde::{Deserialize, Serialize};

use super::columns;
use crate::aggregate::IdentifiedCompound;

/// One display row of the identified-compound table.
///
/// Field names serialize to the published column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRow {
    /// External compound identifier
    #[serde(rename = "Compound ID")]
    pub compound_id: i64,

    /// Compound name
    #[serde(rename = "Compound name")]
    pub name: String,

    /// Total intensity (ppm), rounded to an integer
    #[serde(rename = "Total intensity (ppm)")]
    pub total_intensity_ppm: i64,

    /// Weighted m/z (Da), 2 decimals
    #[serde(rename = "m/z (Da)")]
    pub mz: f64,

    /// m/z error (ppm), rounded to an integer
    #[serde(rename = "m/z error (ppm)")]
    pub mz_error_ppm: i64,

    /// Weighted retention time (minutes), 2 decimals
    #[serde(rename = "Ret. time (min)")]
    pub retime: f64,

    /// Retention time error (minutes), 2 decimals; empty for unconstrained targets
    #[serde(rename = "Ret. time error (min)")]
    pub retime_error: Option<f64>,

    /// Number of peaks within tolerance
    #[serde(rename = "Peaks within tolerance")]
    pub peak_count: usize,
}

impl From<&IdentifiedCompound> for CompoundRow {
    fn from(compound: &IdentifiedCompound) -> Self {
        Self {
            compound_id: compound.compound_id,
            name: compound.name.clone(),
            total_intensity_ppm: round_to_integer(compound.total_intensity_ppm),
            mz: round_to_decimals(compound.mz_value, 2),
            mz_error_ppm: round_to_integer(compound.mz_error_ppm),
            retime: round_to_decimals(compound.retime_value, 2),
            retime_error: compound.retime_error_min.map(|e| round_to_decimals(e, 2)),
            peak_count: compound.peak_count,
        }
    }
}

impl CompoundRow {
    /// Header labels in column order
    pub fn headers() -> [&'static str; 8] {
        columns::ALL
    }

    /// Cell texts in column order
    pub fn cells(&self) -> [String; 8] {
        [
            self.compound_id.to_string(),
            self.name.clone(),
            self.total_intensity_ppm.to_string(),
            format!("{:.2}", self.mz),
            self.mz_error_ppm.to_string(),
            format!("{:.2}", self.retime),
            self.retime_error.map(|e| format!("{:.2}", e)).unwrap_or_default(),
            self.peak_count.to_string(),
        ]
    }
}

/// Round half to even to a number of decimals
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Round half to even to the nearest integer
pub fn round_to_integer(value: f64) -> i64 {
    value.round_ties_even() as i64
}
