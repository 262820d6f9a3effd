use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mztarget::aggregate::aggregate;
use mztarget::matcher::{MatchStrategy, ToleranceMatcher};
use mztarget::table::{ExperimentalPeak, TargetCompound};
use mztarget::tolerance::ToleranceConfig;

/// Peak list spread over a typical small-molecule m/z range
fn create_peaks(count: usize) -> Vec<ExperimentalPeak> {
    (0..count)
        .map(|i| {
            let mz = 100.0 + (i as f64 * 0.7919) % 900.0;
            let rt = (i as f64 * 0.0131) % 30.0;
            ExperimentalPeak::new(mz, rt, 1000.0 + (i % 97) as f64 * 50.0)
        })
        .collect()
}

fn create_targets(count: usize) -> Vec<TargetCompound> {
    (0..count)
        .map(|i| {
            let target = TargetCompound::new(i as i64, format!("compound_{i}"), 100.0 + i as f64 * 0.31);
            if i % 4 == 0 {
                target
            } else {
                target.with_retention_time((i as f64 * 0.17) % 30.0)
            }
        })
        .collect()
}

/// Benchmark both strategies over growing peak lists
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_peaks");
    let targets = create_targets(500);
    let config = ToleranceConfig::default();

    for num_peaks in [1_000, 10_000, 50_000] {
        let peaks = create_peaks(num_peaks);
        group.throughput(Throughput::Elements((num_peaks * targets.len()) as u64));

        for strategy in [MatchStrategy::Dense, MatchStrategy::Indexed] {
            let matcher = ToleranceMatcher::new(config).with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), num_peaks),
                &peaks,
                |b, peaks| b.iter(|| black_box(matcher.match_peaks(peaks, &targets))),
            );
        }
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let peaks = create_peaks(50_000);
    let targets = create_targets(500);
    let config = ToleranceConfig::default().with_mass_tolerance(0.05);
    let matches = ToleranceMatcher::new(config).match_peaks(&peaks, &targets);

    c.bench_function("aggregate", |b| {
        b.iter(|| black_box(aggregate(&peaks, &targets, &matches).unwrap()))
    });
}

criterion_group!(benches, bench_strategies, bench_aggregate);
criterion_main!(benches);
