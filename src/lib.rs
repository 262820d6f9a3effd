//! # mztarget - Target Compound Identification for LC-MS
//!
//! `mztarget` matches experimentally observed LC-MS peaks to a reference list of
//! target compounds using per-quantity tolerance windows, and aggregates the
//! matched peaks into a ranked per-compound summary.
//!
//! ## Key Features
//!
//! - **Tolerance Matching**: A peak identifies a target when both its m/z and its
//!   retention time fall strictly inside the target's windows. Targets without a
//!   retention time match on m/z alone. The relation is many-to-many.
//!
//! - **Intensity-Weighted Summaries**: m/z, retention time and their errors are
//!   intensity-weighted over all peaks matched to a target; total intensity is
//!   reported in ppm of the whole peak list.
//!
//! - **Typed Inputs**: Peak lists and target databases are parsed once into
//!   fixed-schema records; schema violations surface before any matching.
//!
//! - **Portable Results**: CSV, JSON (full precision with provenance) or Parquet.
//!
//! ## Quick Start
//!
//! ```rust
//! use mztarget::matcher::match_peaks;
//! use mztarget::aggregate::aggregate;
//! use mztarget::table::{ExperimentalPeak, TargetCompound};
//! use mztarget::tolerance::ToleranceConfig;
//!
//! let peaks = vec![
//!     ExperimentalPeak::new(100.000, 5.0, 10.0),
//!     ExperimentalPeak::new(100.004, 5.1, 30.0),
//! ];
//! let targets = vec![TargetCompound::new(1, "Analyte", 100.002).with_retention_time(5.0)];
//! let config = ToleranceConfig::new(0.005, 0.5)?;
//!
//! let matches = match_peaks(&peaks, &targets, &config);
//! let compounds = aggregate(&peaks, &targets, &matches)?;
//!
//! assert_eq!(compounds[0].peak_count, 2);
//! assert!((compounds[0].mz_value - 100.003).abs() < 1e-9);
//! # Ok::<(), mztarget::error::IdentificationError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`table`]: Input boundary, CSV/TSV parsing into typed records
//! - [`tolerance`]: Tolerance windows and their defaults
//! - [`matcher`]: Peak x target connection relation (dense or m/z-indexed)
//! - [`aggregate`]: Per-target weighted statistics and ranking
//! - [`pipeline`]: Caller-constructed context running a full identification
//! - [`output`]: Display rounding and CSV/JSON/Parquet writers
//! - [`validate`]: Pre-flight input validation report

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod error;
pub mod matcher;
pub mod output;
pub mod pipeline;
pub mod table;
pub mod tolerance;
pub mod validate;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::aggregate::{aggregate, IdentifiedCompound, TargetAggregator};
    pub use crate::error::IdentificationError;
    pub use crate::matcher::{match_peaks, MatchEdge, MatchSet, MatchStrategy, ToleranceMatcher};
    pub use crate::output::{write_report, CompoundRow, OutputFormat};
    pub use crate::pipeline::{IdentificationContext, IdentificationReport, RunMetadata};
    pub use crate::table::{ExperimentalPeak, PeakTable, TargetCompound, TargetTable};
    pub use crate::tolerance::ToleranceConfig;
    pub use crate::validate::{validate_inputs, ValidationReport};
}
