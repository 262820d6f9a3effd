use super::*;
use crate::matcher::{match_peaks, MatchEdge};
use crate::tolerance::ToleranceConfig;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_intensity_weighted_average() {
    let peaks = vec![
        ExperimentalPeak::new(100.000, 5.0, 10.0),
        ExperimentalPeak::new(100.004, 6.0, 30.0),
    ];
    let targets = vec![TargetCompound::new(42, "Analyte", 100.002).with_retention_time(5.5)];
    let config = ToleranceConfig::new(0.005, 1.0).unwrap();

    let matches = match_peaks(&peaks, &targets, &config);
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();

    assert_eq!(compounds.len(), 1);
    let c = &compounds[0];
    assert_eq!(c.compound_id, 42);
    assert_eq!(c.name, "Analyte");
    assert_eq!(c.peak_count, 2);
    assert_close(c.mz_value, 100.003);
    assert_close(c.retime_value, 5.75);
    assert_close(c.retime_error_min.unwrap(), 0.5);
    assert!((c.mz_error_ppm - 0.002 * 1e6 / 100.002).abs() < 1e-6);
    assert_close(c.total_intensity_ppm, 1.0e6);
}

#[test]
fn test_total_intensity_uses_all_peaks() {
    let peaks = vec![
        ExperimentalPeak::new(100.0, 1.0, 25.0),
        ExperimentalPeak::new(500.0, 1.0, 75.0),
    ];
    let targets = vec![TargetCompound::new(1, "a", 100.0)];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();

    assert_close(compounds[0].total_intensity_ppm, 250_000.0);
}

#[test]
fn test_shared_peak_counts_for_every_target() {
    let peaks = vec![
        ExperimentalPeak::new(100.0015, 1.0, 50.0),
        ExperimentalPeak::new(100.0040, 1.0, 50.0),
    ];
    let targets = vec![
        TargetCompound::new(1, "t1", 100.000),
        TargetCompound::new(2, "t2", 100.003),
    ];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();

    let t1 = compounds.iter().find(|c| c.compound_id == 1).unwrap();
    let t2 = compounds.iter().find(|c| c.compound_id == 2).unwrap();
    assert_eq!(t1.peak_count, 1);
    assert_eq!(t2.peak_count, 2);
    assert_close(t1.total_intensity_ppm, 500_000.0);
    assert_close(t2.total_intensity_ppm, 1_000_000.0);
    assert_eq!(compounds[0].compound_id, 2);
}

#[test]
fn test_sorted_descending_with_stable_ties() {
    let peaks = vec![
        ExperimentalPeak::new(100.0, 1.0, 10.0),
        ExperimentalPeak::new(200.0, 1.0, 30.0),
        ExperimentalPeak::new(300.0, 1.0, 10.0),
    ];
    let targets = vec![
        TargetCompound::new(7, "c", 300.0),
        TargetCompound::new(8, "a", 100.0),
        TargetCompound::new(9, "b", 200.0),
    ];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();

    let order: Vec<usize> = compounds.iter().map(|c| c.target_index).collect();
    assert_eq!(order, vec![2, 0, 1]);
}

#[test]
fn test_null_retention_time_has_no_error() {
    let peaks = vec![ExperimentalPeak::new(100.0, 12.0, 1.0)];
    let targets = vec![TargetCompound::new(1, "a", 100.0)];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();

    assert_eq!(compounds[0].retime_error_min, None);
    assert_close(compounds[0].retime_value, 12.0);
    assert_close(compounds[0].mz_error_ppm, 0.0);
}

#[test]
fn test_zero_intensity_group_uses_plain_mean() {
    let peaks = vec![
        ExperimentalPeak::new(100.000, 1.0, 0.0),
        ExperimentalPeak::new(100.001, 3.0, 0.0),
        ExperimentalPeak::new(500.000, 1.0, 10.0),
    ];
    let targets = vec![TargetCompound::new(1, "a", 100.0005)];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();

    let c = &compounds[0];
    assert_eq!(c.peak_count, 2);
    assert_close(c.total_intensity_ppm, 0.0);
    assert_close(c.mz_value, 100.0005);
    assert_close(c.retime_value, 2.0);
    assert!(c.mz_value.is_finite() && c.mz_error_ppm.is_finite());
}

#[test]
fn test_zero_total_intensity_is_degenerate() {
    let peaks = vec![
        ExperimentalPeak::new(100.0, 1.0, 0.0),
        ExperimentalPeak::new(200.0, 1.0, 0.0),
    ];
    let targets = vec![TargetCompound::new(1, "a", 100.0)];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    assert_eq!(matches.len(), 1);

    let err = aggregate(&peaks, &targets, &matches).unwrap_err();
    assert_eq!(err.kind(), "DegenerateInputError");
}

#[test]
fn test_empty_peak_table_is_degenerate() {
    let targets = vec![TargetCompound::new(1, "a", 100.0)];
    let err = aggregate(&[], &targets, &MatchSet::default()).unwrap_err();
    assert!(matches!(err, IdentificationError::DegenerateInput(_)));
}

#[test]
fn test_no_matches_is_empty_not_error() {
    let peaks = vec![ExperimentalPeak::new(100.0, 1.0, 5.0)];
    let targets = vec![TargetCompound::new(1, "far", 900.0)];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();
    assert!(compounds.is_empty());
}

#[test]
fn test_out_of_bounds_edge() {
    let peaks = vec![ExperimentalPeak::new(100.0, 1.0, 5.0)];
    let targets = vec![TargetCompound::new(1, "a", 100.0)];
    let matches = MatchSet::from_edges(vec![MatchEdge::new(0, 3)]);

    let err = aggregate(&peaks, &targets, &matches).unwrap_err();
    assert!(matches!(
        err,
        IdentificationError::EdgeOutOfBounds { peak_index: 0, target_index: 3 }
    ));
}

fn ppm_sum(compounds: &[IdentifiedCompound]) -> f64 {
    compounds.iter().map(|c| c.total_intensity_ppm).sum()
}

#[test]
fn test_ppm_sums_to_one_million_when_every_peak_matches_once() {
    let peaks = vec![
        ExperimentalPeak::new(100.0, 1.0, 20.0),
        ExperimentalPeak::new(200.0, 1.0, 30.0),
        ExperimentalPeak::new(300.0, 1.0, 50.0),
    ];
    let targets = vec![
        TargetCompound::new(1, "a", 100.0),
        TargetCompound::new(2, "b", 200.0),
        TargetCompound::new(3, "c", 300.0),
    ];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();

    assert_eq!(compounds.len(), 3);
    assert!((ppm_sum(&compounds) - PPM).abs() < 1e-6);
}

#[test]
fn test_ppm_sum_below_one_million_with_unmatched_peaks() {
    let peaks = vec![
        ExperimentalPeak::new(100.0, 1.0, 20.0),
        ExperimentalPeak::new(200.0, 1.0, 30.0),
        ExperimentalPeak::new(900.0, 1.0, 50.0),
    ];
    let targets = vec![
        TargetCompound::new(1, "a", 100.0),
        TargetCompound::new(2, "b", 200.0),
    ];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();

    assert!((ppm_sum(&compounds) - 500_000.0).abs() < 1e-6);
}

#[test]
fn test_shared_peak_ppm_counted_per_target() {
    let peaks = vec![
        ExperimentalPeak::new(100.0015, 1.0, 50.0),
        ExperimentalPeak::new(500.0, 1.0, 50.0),
    ];
    let targets = vec![
        TargetCompound::new(1, "t1", 100.000),
        TargetCompound::new(2, "t2", 100.003),
        TargetCompound::new(3, "t3", 500.0),
    ];

    let matches = match_peaks(&peaks, &targets, &ToleranceConfig::default());
    let compounds = aggregate(&peaks, &targets, &matches).unwrap();

    // The shared peak's intensity is credited to both t1 and t2
    assert_eq!(compounds.len(), 3);
    assert!((ppm_sum(&compounds) - 1.5e6).abs() < 1e-6);
}
