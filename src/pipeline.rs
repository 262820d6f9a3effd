//! # Identification Pipeline
//!
//! [`IdentificationContext`] is the caller-constructed entry point that runs
//! the full identification: validated input tables in, ranked compound summary
//! plus provenance out. The context holds no I/O resources; table loading is
//! scoped to [`IdentificationContext::identify_files`].
//!
//! ```rust
//! use mztarget::pipeline::IdentificationContext;
//! use mztarget::table::{ExperimentalPeak, PeakTable, TargetCompound, TargetTable};
//! use mztarget::tolerance::ToleranceConfig;
//!
//! let peaks = PeakTable::new("run1", vec![
//!     ExperimentalPeak::new(195.0876, 4.25, 8.0e5),
//!     ExperimentalPeak::new(301.1410, 9.80, 2.0e5),
//! ]);
//! let targets = TargetTable::new("library", vec![
//!     TargetCompound::new(17, "Caffeine", 195.0877).with_retention_time(4.2),
//! ]);
//!
//! let context = IdentificationContext::new(ToleranceConfig::default())?;
//! let report = context.identify(&peaks, &targets)?;
//!
//! assert_eq!(report.compounds.len(), 1);
//! assert_eq!(report.rows()[0].total_intensity_ppm, 800_000);
//! # Ok::<(), mztarget::error::IdentificationError>(())
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::aggregate::{checked_total_intensity, IdentifiedCompound, TargetAggregator};
use crate::error::IdentificationError;
use crate::matcher::{MatchSet, MatchStrategy, ToleranceMatcher};
use crate::output::CompoundRow;
use crate::table::{PeakTable, TargetTable};
use crate::tolerance::ToleranceConfig;

/// Software name recorded in provenance
pub const SOFTWARE_NAME: &str = "mztarget";

/// Provenance of one identification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Software name
    pub software: String,

    /// Software version
    pub version: String,

    /// When the run completed (UTC)
    pub timestamp: DateTime<Utc>,

    /// Source label of the peak table
    pub peak_source: String,

    /// Source label of the target table
    pub target_source: String,

    /// Tolerances in effect
    pub tolerance: ToleranceConfig,

    /// Matching strategy in effect
    pub strategy: MatchStrategy,

    /// Number of experimental peaks
    pub peak_count: usize,

    /// Number of reference targets
    pub target_count: usize,

    /// Number of (peak, target) matches
    pub edge_count: usize,

    /// Number of targets with at least one match
    pub identified_count: usize,
}

/// Result of an identification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentificationReport {
    /// Run provenance
    pub metadata: RunMetadata,

    /// Identified compounds, sorted by total intensity descending
    pub compounds: Vec<IdentifiedCompound>,
}

impl IdentificationReport {
    /// Rounded display rows in report order
    pub fn rows(&self) -> Vec<CompoundRow> {
        self.compounds.iter().map(CompoundRow::from).collect()
    }

    /// Whether no target was identified
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

/// Configured matcher and aggregator for identification runs
#[derive(Debug, Clone, Copy)]
pub struct IdentificationContext {
    matcher: ToleranceMatcher,
}

impl IdentificationContext {
    /// Create a context, rejecting invalid tolerances
    pub fn new(config: ToleranceConfig) -> Result<Self, IdentificationError> {
        config.validate()?;
        Ok(Self {
            matcher: ToleranceMatcher::new(config),
        })
    }

    /// Select the matching strategy
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.matcher = self.matcher.with_strategy(strategy);
        self
    }

    /// Tolerances in effect
    pub fn config(&self) -> &ToleranceConfig {
        self.matcher.config()
    }

    /// Matching strategy in effect
    pub fn strategy(&self) -> MatchStrategy {
        self.matcher.strategy()
    }

    /// Match only, without aggregation
    pub fn match_tables(&self, peaks: &PeakTable, targets: &TargetTable) -> MatchSet {
        self.matcher.match_peaks(peaks.peaks(), targets.targets())
    }

    /// Run matching and aggregation over loaded tables
    pub fn identify(
        &self,
        peaks: &PeakTable,
        targets: &TargetTable,
    ) -> Result<IdentificationReport, IdentificationError> {
        // Fail before matching when normalization is impossible
        checked_total_intensity(peaks.peaks())?;

        let matches = self.match_tables(peaks, targets);
        let compounds = TargetAggregator::new(peaks.peaks(), targets.targets()).aggregate(&matches)?;

        info!("Identified {} target compounds.", compounds.len());

        let metadata = RunMetadata {
            software: SOFTWARE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            peak_source: peaks.source().to_string(),
            target_source: targets.source().to_string(),
            tolerance: *self.config(),
            strategy: self.strategy(),
            peak_count: peaks.len(),
            target_count: targets.len(),
            edge_count: matches.len(),
            identified_count: compounds.len(),
        };

        Ok(IdentificationReport {
            metadata,
            compounds,
        })
    }

    /// Load both tables from disk and run the identification
    pub fn identify_files<P, T>(
        &self,
        peak_path: P,
        target_path: T,
    ) -> Result<IdentificationReport, IdentificationError>
    where
        P: AsRef<Path>,
        T: AsRef<Path>,
    {
        let peaks = PeakTable::from_path(peak_path)?;
        let targets = TargetTable::from_path(target_path)?;
        info!(
            "Loaded {} peaks from {} and {} targets from {}",
            peaks.len(),
            peaks.source(),
            targets.len(),
            targets.source()
        );
        self.identify(&peaks, &targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ExperimentalPeak, TargetCompound};

    fn sample_tables() -> (PeakTable, TargetTable) {
        let peaks = PeakTable::new(
            "peaks",
            vec![
                ExperimentalPeak::new(100.000, 5.0, 10.0),
                ExperimentalPeak::new(100.004, 5.2, 30.0),
                ExperimentalPeak::new(250.000, 8.0, 60.0),
            ],
        );
        let targets = TargetTable::new(
            "targets",
            vec![
                TargetCompound::new(1, "A", 100.002).with_retention_time(5.0),
                TargetCompound::new(2, "B", 250.0005),
                TargetCompound::new(3, "C", 700.0),
            ],
        );
        (peaks, targets)
    }

    #[test]
    fn test_identify_records_provenance() {
        let (peaks, targets) = sample_tables();
        let context = IdentificationContext::new(ToleranceConfig::new(0.005, 0.5).unwrap()).unwrap();

        let report = context.identify(&peaks, &targets).unwrap();

        assert_eq!(report.compounds.len(), 2);
        assert_eq!(report.compounds[0].compound_id, 2);
        assert_eq!(report.metadata.peak_source, "peaks");
        assert_eq!(report.metadata.target_source, "targets");
        assert_eq!(report.metadata.edge_count, 3);
        assert_eq!(report.metadata.identified_count, 2);
        assert_eq!(report.metadata.strategy, MatchStrategy::Indexed);
        assert_eq!(report.metadata.software, SOFTWARE_NAME);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ToleranceConfig::default().with_mass_tolerance(0.0);
        let err = IdentificationContext::new(config).unwrap_err();
        assert!(matches!(err, IdentificationError::InvalidConfig(_)));
    }

    #[test]
    fn test_degenerate_input_checked_before_matching() {
        let peaks = PeakTable::new("zeros", vec![ExperimentalPeak::new(100.0, 1.0, 0.0)]);
        let targets = TargetTable::new("targets", vec![TargetCompound::new(1, "A", 900.0)]);
        let context = IdentificationContext::new(ToleranceConfig::default()).unwrap();

        let err = context.identify(&peaks, &targets).unwrap_err();
        assert_eq!(err.kind(), "DegenerateInputError");
    }

    #[test]
    fn test_strategies_produce_identical_reports() {
        let (peaks, targets) = sample_tables();
        let config = ToleranceConfig::new(0.005, 0.5).unwrap();
        let dense = IdentificationContext::new(config)
            .unwrap()
            .with_strategy(MatchStrategy::Dense)
            .identify(&peaks, &targets)
            .unwrap();
        let indexed = IdentificationContext::new(config)
            .unwrap()
            .identify(&peaks, &targets)
            .unwrap();

        assert_eq!(dense.compounds, indexed.compounds);
    }
}
