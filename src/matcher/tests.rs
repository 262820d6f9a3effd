use super::*;

/// 2^-7, exactly representable so boundary distances are exact
const DYADIC_TOL: f64 = 0.0078125;

fn config(mass: f64, retime: f64) -> ToleranceConfig {
    ToleranceConfig::new(mass, retime).unwrap()
}

fn both_strategies(
    peaks: &[ExperimentalPeak],
    targets: &[TargetCompound],
    config: ToleranceConfig,
) -> MatchSet {
    let dense = ToleranceMatcher::new(config)
        .with_strategy(MatchStrategy::Dense)
        .match_peaks(peaks, targets);
    let indexed = ToleranceMatcher::new(config)
        .with_strategy(MatchStrategy::Indexed)
        .match_peaks(peaks, targets);
    assert_eq!(dense, indexed, "dense and indexed strategies disagree");
    dense
}

#[test]
fn test_mz_boundary_is_exclusive() {
    let targets = vec![TargetCompound::new(1, "t", 100.0)];
    let peaks = vec![
        ExperimentalPeak::new(100.0 + DYADIC_TOL, 1.0, 1.0),
        ExperimentalPeak::new(100.0 - DYADIC_TOL, 1.0, 1.0),
        ExperimentalPeak::new(100.0 + DYADIC_TOL - 1e-9, 1.0, 1.0),
    ];

    let matches = both_strategies(&peaks, &targets, config(DYADIC_TOL, 0.5));
    assert_eq!(matches.edges(), &[MatchEdge::new(2, 0)]);
}

#[test]
fn test_retention_time_boundary_is_exclusive() {
    let targets = vec![TargetCompound::new(1, "t", 100.0).with_retention_time(10.0)];
    let peaks = vec![
        ExperimentalPeak::new(100.0, 10.5, 1.0),
        ExperimentalPeak::new(100.0, 9.5, 1.0),
        ExperimentalPeak::new(100.0, 10.25, 1.0),
    ];

    let matches = both_strategies(&peaks, &targets, config(0.002, 0.5));
    assert_eq!(matches.edges(), &[MatchEdge::new(2, 0)]);
}

#[test]
fn test_null_retention_time_matches_any_peak() {
    let targets = vec![TargetCompound::new(1, "t", 250.0)];
    let peaks = vec![
        ExperimentalPeak::new(250.0005, 0.0, 1.0),
        ExperimentalPeak::new(250.0005, 57.3, 1.0),
        ExperimentalPeak::new(249.9995, 1.0e4, 1.0),
        ExperimentalPeak::new(250.1, 1.0, 1.0),
    ];

    let matches = both_strategies(&peaks, &targets, config(0.002, 0.5));
    assert_eq!(matches.len(), 3);
    assert!(matches.iter().all(|e| e.peak_index < 3));
}

#[test]
fn test_target_tolerance_overrides_default() {
    let targets = vec![
        TargetCompound::new(1, "wide", 100.0)
            .with_retention_time(10.0)
            .with_retention_time_tolerance(2.0),
        TargetCompound::new(2, "default", 100.0).with_retention_time(10.0),
    ];
    let peaks = vec![ExperimentalPeak::new(100.0, 11.5, 1.0)];

    let matches = both_strategies(&peaks, &targets, config(0.002, 0.5));
    assert_eq!(matches.edges(), &[MatchEdge::new(0, 0)]);
}

#[test]
fn test_missing_mz_never_connects() {
    let targets = vec![TargetCompound::new(1, "no mz", f64::NAN)];
    let peaks = vec![ExperimentalPeak::new(100.0, 1.0, 1.0)];

    let matches = both_strategies(&peaks, &targets, config(1.0e6, 0.5));
    assert!(matches.is_empty());
}

#[test]
fn test_empty_inputs() {
    let targets = vec![TargetCompound::new(1, "t", 100.0)];
    let peaks = vec![ExperimentalPeak::new(100.0, 1.0, 1.0)];

    assert!(both_strategies(&[], &targets, ToleranceConfig::default()).is_empty());
    assert!(both_strategies(&peaks, &[], ToleranceConfig::default()).is_empty());
}

#[test]
fn test_many_to_many() {
    let targets = vec![
        TargetCompound::new(10, "t1", 100.000),
        TargetCompound::new(20, "t2", 100.003),
    ];
    let peaks = vec![
        ExperimentalPeak::new(100.0015, 1.0, 1.0),
        ExperimentalPeak::new(99.9995, 1.0, 1.0),
        ExperimentalPeak::new(100.004, 1.0, 1.0),
    ];

    let matches = both_strategies(&peaks, &targets, config(0.002, 0.5));
    assert_eq!(
        matches.edges(),
        &[
            MatchEdge::new(0, 0),
            MatchEdge::new(0, 1),
            MatchEdge::new(1, 0),
            MatchEdge::new(2, 1),
        ]
    );

    let groups = matches.peaks_by_target();
    assert_eq!(groups[&0], vec![0, 1]);
    assert_eq!(groups[&1], vec![0, 2]);
    assert_eq!(matches.identified_target_count(), 2);
}

#[test]
fn test_strategies_agree_on_grid() {
    let targets: Vec<TargetCompound> = (0..40)
        .map(|i| {
            let target = TargetCompound::new(i, format!("t{i}"), 100.0 + (i as f64) * 0.0013);
            match i % 3 {
                0 => target,
                1 => target.with_retention_time((i as f64) * 0.25),
                _ => target
                    .with_retention_time((i as f64) * 0.25)
                    .with_retention_time_tolerance(0.1 + (i as f64) * 0.01),
            }
        })
        .collect();
    let peaks: Vec<ExperimentalPeak> = (0..120)
        .map(|i| ExperimentalPeak::new(99.99 + (i as f64) * 0.00057, (i as f64) * 0.09, 1.0 + i as f64))
        .collect();

    let matches = both_strategies(&peaks, &targets, config(0.002, 0.5));
    assert!(!matches.is_empty());
}

#[test]
fn test_connection_maps() {
    let targets = vec![
        TargetCompound::new(1, "a", 100.0).with_retention_time(5.0),
        TargetCompound::new(2, "b", 200.0).with_retention_time(5.0),
    ];
    let peaks = vec![
        ExperimentalPeak::new(100.001, 9.0, 1.0),
        ExperimentalPeak::new(200.0, 5.1, 1.0),
        ExperimentalPeak::new(100.0, 5.2, 1.0),
    ];

    let matcher = ToleranceMatcher::new(ToleranceConfig::default());
    let (mz_map, rt_map) = matcher.connection_maps(&peaks, &targets);

    assert_eq!(mz_map.shape(), (3, 2));
    assert!(mz_map.get(0, 0));
    assert!(!rt_map.get(0, 0));
    assert!(mz_map.get(1, 1));
    assert!(rt_map.get(1, 1));
    assert!(!mz_map.get(7, 0));

    let combined = mz_map.and(&rt_map);
    assert_eq!(combined.count(), 2);
    assert_eq!(combined.edges(), vec![MatchEdge::new(1, 1), MatchEdge::new(2, 0)]);
}

#[test]
fn test_match_set_from_edges() {
    let set = MatchSet::from_edges(vec![
        MatchEdge::new(2, 0),
        MatchEdge::new(0, 1),
        MatchEdge::new(2, 0),
        MatchEdge::new(0, 0),
    ]);

    assert_eq!(
        set.edges(),
        &[MatchEdge::new(0, 0), MatchEdge::new(0, 1), MatchEdge::new(2, 0)]
    );
}

#[test]
fn test_strategy_from_str() {
    assert_eq!("dense".parse::<MatchStrategy>().unwrap(), MatchStrategy::Dense);
    assert_eq!("INDEXED".parse::<MatchStrategy>().unwrap(), MatchStrategy::Indexed);
    assert!("fast".parse::<MatchStrategy>().is_err());
    assert!("matrix".parse::<MatchStrategy>().is_err());
    assert_eq!(MatchStrategy::default(), MatchStrategy::Indexed);
    assert_eq!(MatchStrategy::Dense.to_string(), "dense");
}
