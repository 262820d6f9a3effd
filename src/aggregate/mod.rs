//! # Target Aggregator
//!
//! Turns the peak/target connection relation into one summary row per
//! identified target.
//!
//! For a target `t` matched to peaks `P(t)`:
//!
//! - values and errors are intensity-weighted means:
//!   `avg(q, t) = sum(q(p) * I(p)) / sum(I(p))` over `p` in `P(t)`
//! - the m/z error of a peak is `|mz(p) - mz(t)| * 1e6 / mz(t)` (ppm), the
//!   retention time error is the absolute difference in minutes
//! - total intensity is `sum(I(p)) / sum(I over all peaks) * 1e6`, normalized
//!   against every experimental peak, matched or not
//!
//! Rows are sorted by total intensity descending; ties keep ascending target
//! index. Values are returned at full precision, rounding is left to
//! [`crate::output`].

#[cfg(test)]
mod tests;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::IdentificationError;
use crate::matcher::MatchSet;
use crate::table::{ExperimentalPeak, TargetCompound};

/// Parts-per-million scale factor
pub const PPM: f64 = 1.0e6;

/// Summary of one identified target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedCompound {
    /// Row index of the target in the reference table
    pub target_index: usize,

    /// External compound identifier
    pub compound_id: i64,

    /// Compound name
    pub name: String,

    /// Summed intensity of matched peaks, ppm of the total intensity of all peaks
    pub total_intensity_ppm: f64,

    /// Intensity-weighted m/z of matched peaks (Da)
    pub mz_value: f64,

    /// Intensity-weighted relative m/z error (ppm)
    pub mz_error_ppm: f64,

    /// Intensity-weighted retention time of matched peaks (minutes)
    pub retime_value: f64,

    /// Intensity-weighted retention time error (minutes); `None` when the
    /// target has no reference retention time
    pub retime_error_min: Option<f64>,

    /// Number of peaks within tolerance
    pub peak_count: usize,
}

/// Aggregates match edges against the tables they index into
#[derive(Debug, Clone, Copy)]
pub struct TargetAggregator<'a> {
    peaks: &'a [ExperimentalPeak],
    targets: &'a [TargetCompound],
}

impl<'a> TargetAggregator<'a> {
    /// Create an aggregator over a peak table and a target table
    pub fn new(peaks: &'a [ExperimentalPeak], targets: &'a [TargetCompound]) -> Self {
        Self { peaks, targets }
    }

    /// Build the ranked summary of every target with at least one matched peak
    pub fn aggregate(&self, matches: &MatchSet) -> Result<Vec<IdentifiedCompound>, IdentificationError> {
        let total_intensity = checked_total_intensity(self.peaks)?;

        if let Some(edge) = matches
            .iter()
            .find(|e| e.peak_index >= self.peaks.len() || e.target_index >= self.targets.len())
        {
            return Err(IdentificationError::EdgeOutOfBounds {
                peak_index: edge.peak_index,
                target_index: edge.target_index,
            });
        }

        let mut compounds: Vec<IdentifiedCompound> = matches
            .peaks_by_target()
            .into_iter()
            .map(|(target_index, peak_indices)| {
                let matched: Vec<&ExperimentalPeak> =
                    peak_indices.iter().map(|&i| &self.peaks[i]).collect();
                summarize(target_index, &self.targets[target_index], &matched, total_intensity)
            })
            .collect();

        // Stable: equal intensities keep ascending target index
        compounds.sort_by(|a, b| b.total_intensity_ppm.total_cmp(&a.total_intensity_ppm));

        debug!(
            "Aggregated {} edges into {} identified compounds",
            matches.len(),
            compounds.len()
        );
        Ok(compounds)
    }
}

/// Aggregate match edges into a ranked compound summary
pub fn aggregate(
    peaks: &[ExperimentalPeak],
    targets: &[TargetCompound],
    matches: &MatchSet,
) -> Result<Vec<IdentifiedCompound>, IdentificationError> {
    TargetAggregator::new(peaks, targets).aggregate(matches)
}

/// Grand total intensity, rejected when it cannot serve as a ppm denominator
pub(crate) fn checked_total_intensity(peaks: &[ExperimentalPeak]) -> Result<f64, IdentificationError> {
    if peaks.is_empty() {
        return Err(IdentificationError::DegenerateInput(
            "peak table is empty; total intensity cannot be normalized".to_string(),
        ));
    }

    let total: f64 = peaks.iter().map(|p| p.intensity).sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(IdentificationError::DegenerateInput(format!(
            "total intensity across {} peaks is {}; cannot normalize to ppm",
            peaks.len(),
            total
        )));
    }
    Ok(total)
}

fn summarize(
    target_index: usize,
    target: &TargetCompound,
    matched: &[&ExperimentalPeak],
    total_intensity: f64,
) -> IdentifiedCompound {
    let matched_intensity: f64 = matched.iter().map(|p| p.intensity).sum();

    IdentifiedCompound {
        target_index,
        compound_id: target.compound_id,
        name: target.name.clone(),
        total_intensity_ppm: matched_intensity / total_intensity * PPM,
        mz_value: weighted_mean(matched, |p| p.mz),
        mz_error_ppm: weighted_mean(matched, |p| (p.mz - target.mz).abs() * PPM / target.mz),
        retime_value: weighted_mean(matched, |p| p.retention_time),
        retime_error_min: target
            .retention_time
            .map(|rt| weighted_mean(matched, |p| (p.retention_time - rt).abs())),
        peak_count: matched.len(),
    }
}

/// Intensity-weighted mean of `value` over `peaks`.
///
/// Falls back to the plain mean when every matched peak has zero intensity.
fn weighted_mean<F>(peaks: &[&ExperimentalPeak], value: F) -> f64
where
    F: Fn(&ExperimentalPeak) -> f64,
{
    let weight: f64 = peaks.iter().map(|p| p.intensity).sum();
    if weight > 0.0 {
        peaks.iter().map(|p| value(p) * p.intensity).sum::<f64>() / weight
    } else {
        peaks.iter().map(|p| value(p)).sum::<f64>() / peaks.len() as f64
    }
}
