//! # Input Validation
//!
//! Pre-flight checks over a peak table and a target table, reported the same
//! way regardless of whether identification would succeed:
//!
//! 1. **Configuration**: tolerances are strictly positive and finite
//! 2. **Peak table**: required columns present, values numeric, finite, intensities >= 0
//! 3. **Intensity**: total intensity is positive so ppm normalization is defined
//! 4. **Target table**: required columns present, typed values valid
//! 5. **Target coverage**: targets without m/z or retention time, duplicate IDs
//!
//! ```rust,no_run
//! use mztarget::tolerance::ToleranceConfig;
//! use mztarget::validate::validate_inputs;
//! use std::path::Path;
//!
//! let report = validate_inputs(
//!     Path::new("peaks.csv"),
//!     Path::new("targets.csv"),
//!     &ToleranceConfig::default(),
//! );
//! println!("{}", report);
//! ```

mod report;

use std::collections::HashSet;
use std::path::Path;

use crate::aggregate::checked_total_intensity;
use crate::table::{PeakTable, TableError, TargetTable};
use crate::tolerance::ToleranceConfig;

pub use report::{CheckKind, Outcome, ValidationReport};

/// Load and validate both input files
pub fn validate_inputs(peak_path: &Path, target_path: &Path, config: &ToleranceConfig) -> ValidationReport {
    validate_tables(
        PeakTable::from_path(peak_path),
        TargetTable::from_path(target_path),
        peak_path.display().to_string(),
        target_path.display().to_string(),
        config,
    )
}

/// Validate already-parsed tables (or the errors from parsing them)
pub fn validate_tables(
    peaks: Result<PeakTable, TableError>,
    targets: Result<TargetTable, TableError>,
    peak_source: String,
    target_source: String,
    config: &ToleranceConfig,
) -> ValidationReport {
    let mut report = ValidationReport::new(peak_source, target_source);

    report.record(
        CheckKind::Tolerances,
        match config.validate() {
            Ok(()) => Outcome::Pass(format!(
                "m/z {} Da, retention time {} min",
                config.mass_tolerance, config.default_retime_tolerance
            )),
            Err(e) => Outcome::Fail(e.to_string()),
        },
    );

    match peaks {
        Ok(peaks) => {
            report.record(CheckKind::PeakSchema, Outcome::Pass(format!("{} peaks", peaks.len())));
            report.record(
                CheckKind::TotalIntensity,
                match checked_total_intensity(peaks.peaks()) {
                    Ok(total) => Outcome::Pass(format!("{:.6e}", total)),
                    Err(e) => Outcome::Fail(e.to_string()),
                },
            );
        }
        Err(e) => report.record(CheckKind::PeakSchema, Outcome::Fail(e.to_string())),
    }

    match targets {
        Ok(targets) if targets.is_empty() => report.record(
            CheckKind::TargetSchema,
            Outcome::Warn("no targets; nothing can be identified".to_string()),
        ),
        Ok(targets) => {
            report.record(CheckKind::TargetSchema, Outcome::Pass(format!("{} targets", targets.len())));
            check_target_coverage(&mut report, &targets);
        }
        Err(e) => report.record(CheckKind::TargetSchema, Outcome::Fail(e.to_string())),
    }

    report
}

fn check_target_coverage(report: &mut ValidationReport, targets: &TargetTable) {
    let missing_mz = targets.missing_mz_count();
    report.record(
        CheckKind::TargetMz,
        if missing_mz > 0 {
            Outcome::Warn(format!("{} targets have no m/z and will never match", missing_mz))
        } else {
            Outcome::Pass(format!("all {} targets", targets.len()))
        },
    );

    let unconstrained = targets.unconstrained_retime_count();
    report.record(
        CheckKind::TargetRetentionTime,
        if unconstrained > 0 {
            Outcome::Warn(format!(
                "{} targets have no retention time and match on m/z alone",
                unconstrained
            ))
        } else {
            Outcome::Pass(format!("all {} targets", targets.len()))
        },
    );

    let mut seen = HashSet::new();
    let duplicates: Vec<i64> = targets
        .targets()
        .iter()
        .filter(|t| !seen.insert(t.compound_id))
        .map(|t| t.compound_id)
        .collect();
    report.record(
        CheckKind::CompoundIds,
        if duplicates.is_empty() {
            Outcome::Pass("unique".to_string())
        } else {
            Outcome::Warn(format!("duplicate compound_id values: {:?}", duplicates))
        },
    );
}
