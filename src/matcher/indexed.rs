//! Sorted m/z index for sparse matching.
//!
//! Targets are sorted by reference m/z so each peak only inspects the targets
//! inside a widened window around its own m/z. Every candidate is then checked
//! with the same strict predicates the dense maps use, so the widened window
//! only has to be a superset of the exact one.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::quantity::MatchQuantity;
use super::MatchEdge;
use crate::table::{ExperimentalPeak, TargetCompound};

/// Candidate window half-width as a multiple of the m/z tolerance
const WINDOW_WIDENING: f64 = 2.0;

/// Targets with a usable m/z, sorted by m/z then row index
#[derive(Debug, Clone)]
pub struct MzIndex {
    sorted_mz: Vec<f64>,
    target_indices: Vec<usize>,
}

impl MzIndex {
    /// Build the index, skipping targets whose m/z is missing
    pub fn new(targets: &[TargetCompound]) -> Self {
        let mut entries: Vec<(f64, usize)> = targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.has_mz())
            .map(|(i, t)| (t.mz, i))
            .collect();
        entries.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let (sorted_mz, target_indices) = entries.into_iter().unzip();
        Self {
            sorted_mz,
            target_indices,
        }
    }

    /// Number of indexed targets
    pub fn len(&self) -> usize {
        self.target_indices.len()
    }

    /// Whether no target is indexed
    pub fn is_empty(&self) -> bool {
        self.target_indices.is_empty()
    }

    /// Target row indices with m/z in `[mz - half_width, mz + half_width]`
    pub fn candidates(&self, mz: f64, half_width: f64) -> &[usize] {
        let lo = mz - half_width;
        let hi = mz + half_width;
        let start = self.sorted_mz.partition_point(|&v| v < lo);
        let end = self.sorted_mz.partition_point(|&v| v <= hi);
        if start >= end {
            return &[];
        }
        &self.target_indices[start..end]
    }
}

/// Match every peak against the indexed targets
pub(crate) fn match_indexed<M, R>(
    peaks: &[ExperimentalPeak],
    targets: &[TargetCompound],
    mz: &M,
    retention_time: &R,
    mass_tolerance: f64,
) -> Vec<MatchEdge>
where
    M: MatchQuantity + ?Sized,
    R: MatchQuantity + ?Sized,
{
    let index = MzIndex::new(targets);
    if index.is_empty() || peaks.is_empty() {
        return Vec::new();
    }
    let half_width = mass_tolerance * WINDOW_WIDENING;

    let peak_edges = |(peak_index, peak): (usize, &ExperimentalPeak)| -> Vec<MatchEdge> {
        let mut matched: Vec<usize> = index
            .candidates(peak.mz, half_width)
            .iter()
            .copied()
            .filter(|&t| mz.connects(peak, &targets[t]) && retention_time.connects(peak, &targets[t]))
            .collect();
        matched.sort_unstable();
        matched
            .into_iter()
            .map(|target_index| MatchEdge::new(peak_index, target_index))
            .collect()
    };

    #[cfg(feature = "parallel")]
    let per_peak: Vec<Vec<MatchEdge>> = peaks.par_iter().enumerate().map(peak_edges).collect();

    #[cfg(not(feature = "parallel"))]
    let per_peak: Vec<Vec<MatchEdge>> = peaks.iter().enumerate().map(peak_edges).collect();

    per_peak.into_iter().flatten().collect()
}
