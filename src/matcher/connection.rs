//! Dense peak x target connection maps.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::quantity::MatchQuantity;
use super::MatchEdge;
use crate::table::{ExperimentalPeak, TargetCompound};

/// Boolean peak x target relation for one quantity, stored row-major by peak
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionMap {
    n_peaks: usize,
    n_targets: usize,
    cells: Vec<bool>,
}

impl ConnectionMap {
    /// Evaluate a quantity's predicate for every peak x target pair
    pub fn build<Q: MatchQuantity + ?Sized>(
        peaks: &[ExperimentalPeak],
        targets: &[TargetCompound],
        quantity: &Q,
    ) -> Self {
        let n_peaks = peaks.len();
        let n_targets = targets.len();
        let mut cells = vec![false; n_peaks * n_targets];

        if n_peaks > 0 && n_targets > 0 {
            let fill_row = |(peak, row): (&ExperimentalPeak, &mut [bool])| {
                for (cell, target) in row.iter_mut().zip(targets) {
                    *cell = quantity.connects(peak, target);
                }
            };

            #[cfg(feature = "parallel")]
            peaks
                .par_iter()
                .zip(cells.par_chunks_mut(n_targets))
                .for_each(fill_row);

            #[cfg(not(feature = "parallel"))]
            peaks.iter().zip(cells.chunks_mut(n_targets)).for_each(fill_row);
        }

        log::debug!(
            "{} connection map: {} of {} pairs connected",
            quantity.name(),
            cells.iter().filter(|&&c| c).count(),
            cells.len()
        );

        Self {
            n_peaks,
            n_targets,
            cells,
        }
    }

    /// (peaks, targets)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_peaks, self.n_targets)
    }

    /// Whether a pair is connected; out-of-range indices are never connected
    pub fn get(&self, peak_index: usize, target_index: usize) -> bool {
        peak_index < self.n_peaks
            && target_index < self.n_targets
            && self.cells[peak_index * self.n_targets + target_index]
    }

    /// Logical AND with another map of the same shape
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn and(mut self, other: &ConnectionMap) -> Self {
        assert_eq!(self.shape(), other.shape(), "connection map shapes differ");
        for (cell, &o) in self.cells.iter_mut().zip(&other.cells) {
            *cell &= o;
        }
        self
    }

    /// Number of connected pairs
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Connected pairs ordered by peak, then target
    pub fn edges(&self) -> Vec<MatchEdge> {
        if self.n_targets == 0 {
            return Vec::new();
        }
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(|(i, _)| MatchEdge::new(i / self.n_targets, i % self.n_targets))
            .collect()
    }
}
