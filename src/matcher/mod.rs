//! # Tolerance Matcher
//!
//! Decides, for every (peak, target) pair, whether the peak is a candidate
//! identification of the target.
//!
//! A pair is connected for a quantity when `|peak - target| < tolerance` (strict)
//! and a [`MatchEdge`] exists when it is connected for m/z AND retention time.
//! Targets with a null retention time match on retention time unconditionally.
//! The relation is many-to-many: a peak can identify several targets and a
//! target can collect several peaks.
//!
//! ## Strategies
//!
//! - [`MatchStrategy::Dense`] evaluates one [`ConnectionMap`] per quantity over
//!   the full peak x target grid and intersects them. Memory is O(peaks x targets).
//! - [`MatchStrategy::Indexed`] sorts targets by m/z and only checks the targets
//!   near each peak. Memory is O(targets + edges).
//!
//! Both produce the same edges in the same order (by peak, then target).
//!
//! ```rust
//! use mztarget::matcher::{match_peaks, MatchEdge};
//! use mztarget::table::{ExperimentalPeak, TargetCompound};
//! use mztarget::tolerance::ToleranceConfig;
//!
//! let peaks = vec![ExperimentalPeak::new(195.0870, 4.3, 1.0e5)];
//! let targets = vec![TargetCompound::new(17, "Caffeine", 195.0877).with_retention_time(4.2)];
//!
//! let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
//! assert_eq!(matches.edges(), &[MatchEdge::new(0, 0)]);
//! ```

mod connection;
mod indexed;
mod quantity;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::table::{ExperimentalPeak, TargetCompound};
use crate::tolerance::ToleranceConfig;

pub use connection::ConnectionMap;
pub use indexed::MzIndex;
pub use quantity::{MatchQuantity, MzQuantity, RetentionTimeQuantity};

/// A realized (peak, target) match, both identified by row index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchEdge {
    /// Row index into the peak table
    pub peak_index: usize,
    /// Row index into the target table
    pub target_index: usize,
}

impl MatchEdge {
    /// Create a new edge
    pub fn new(peak_index: usize, target_index: usize) -> Self {
        Self {
            peak_index,
            target_index,
        }
    }
}

/// Set of match edges, ordered by peak then target, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    edges: Vec<MatchEdge>,
}

impl MatchSet {
    /// Build a set from arbitrary edges
    pub fn from_edges(mut edges: Vec<MatchEdge>) -> Self {
        edges.sort_unstable();
        edges.dedup();
        Self { edges }
    }

    /// Edges ordered by peak, then target
    pub fn edges(&self) -> &[MatchEdge] {
        &self.edges
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether no pair matched
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over edges
    pub fn iter(&self) -> std::slice::Iter<'_, MatchEdge> {
        self.edges.iter()
    }

    /// Peak indices matched to each target, keyed by ascending target index.
    ///
    /// Peak indices within a group are ascending.
    pub fn peaks_by_target(&self) -> BTreeMap<usize, Vec<usize>> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for edge in &self.edges {
            groups.entry(edge.target_index).or_default().push(edge.peak_index);
        }
        groups
    }

    /// Number of distinct targets with at least one edge
    pub fn identified_target_count(&self) -> usize {
        self.peaks_by_target().len()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a MatchEdge;
    type IntoIter = std::slice::Iter<'a, MatchEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// How the connection relation is evaluated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Full peak x target connection maps per quantity
    Dense,
    /// Sorted m/z index with per-peak range queries
    #[default]
    Indexed,
}

impl MatchStrategy {
    /// Returns all available strategy names.
    pub fn variants() -> &'static [&'static str] {
        &["dense", "indexed"]
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Dense => write!(f, "dense"),
            MatchStrategy::Indexed => write!(f, "indexed"),
        }
    }
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dense" => Ok(MatchStrategy::Dense),
            "indexed" => Ok(MatchStrategy::Indexed),
            _ => Err(format!(
                "Unknown strategy '{}'. Valid options: {}",
                s,
                MatchStrategy::variants().join(", ")
            )),
        }
    }
}

/// Peak-to-target matcher for a fixed tolerance configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ToleranceMatcher {
    config: ToleranceConfig,
    strategy: MatchStrategy,
}

impl ToleranceMatcher {
    /// Create a matcher using the default strategy
    pub fn new(config: ToleranceConfig) -> Self {
        Self {
            config,
            strategy: MatchStrategy::default(),
        }
    }

    /// Select the evaluation strategy
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Tolerance configuration in use
    pub fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    /// Evaluation strategy in use
    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Per-quantity connection maps (m/z, retention time) over the full grid
    pub fn connection_maps(
        &self,
        peaks: &[ExperimentalPeak],
        targets: &[TargetCompound],
    ) -> (ConnectionMap, ConnectionMap) {
        let mz = MzQuantity::from_config(&self.config);
        let retention_time = RetentionTimeQuantity::from_config(&self.config);
        (
            ConnectionMap::build(peaks, targets, &mz),
            ConnectionMap::build(peaks, targets, &retention_time),
        )
    }

    /// Find every (peak, target) pair connected in both m/z and retention time
    pub fn match_peaks(&self, peaks: &[ExperimentalPeak], targets: &[TargetCompound]) -> MatchSet {
        if peaks.is_empty() || targets.is_empty() {
            return MatchSet::default();
        }

        let edges = match self.strategy {
            MatchStrategy::Dense => {
                let (mz_map, rt_map) = self.connection_maps(peaks, targets);
                mz_map.and(&rt_map).edges()
            }
            MatchStrategy::Indexed => indexed::match_indexed(
                peaks,
                targets,
                &MzQuantity::from_config(&self.config),
                &RetentionTimeQuantity::from_config(&self.config),
                self.config.mass_tolerance,
            ),
        };

        debug!(
            "{} strategy: {} edges between {} peaks and {} targets",
            self.strategy,
            edges.len(),
            peaks.len(),
            targets.len()
        );

        // Both strategies already emit ordered, unique edges
        MatchSet { edges }
    }
}

/// Match peaks to targets with the default strategy
pub fn match_peaks(
    peaks: &[ExperimentalPeak],
    targets: &[TargetCompound],
    config: &ToleranceConfig,
) -> MatchSet {
    ToleranceMatcher::new(*config).match_peaks(peaks, targets)
}
