use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qp_forecast::{
    aggregate_to_year, extend_series_to_year, ConfidenceBand, ExtensionOptions, ForecastSource,
    QuarterSeries,
};
use qp_time::Quarter;

fn labels(start: Quarter, n: usize) -> Vec<String> {
    std::iter::successors(Some(start), |q| Some(q.next()))
        .take(n)
        .map(|q| q.label())
        .collect()
}

fn history(n: usize) -> QuarterSeries {
    let demand: Vec<f64> = (0..n).map(|i| 100.0 + (i % 7) as f64 * 3.0).collect();
    let estimate = demand.iter().map(|d| d * 0.9).collect();
    let supply = demand.iter().map(|d| d * 0.8).collect();
    let lower = demand.iter().map(|d| d * 0.9).collect();
    let upper = demand.iter().map(|d| d * 1.1).collect();
    let start = Quarter::new(2035 - (n / 4) as i32, 1).expect("valid quarter");
    QuarterSeries::new(labels(start, n), estimate, demand, supply)
        .with_ci(ConfidenceBand::new(lower, upper))
}

fn bench_extend(c: &mut Criterion) {
    let mut group = c.benchmark_group("extend_series_to_year");
    for &n in &[8usize, 40, 160] {
        let base = history(n);
        let anchor = base.labels.last().and_then(|l| l.parse::<Quarter>().ok()).expect("anchor");
        let ml = ForecastSource::new(labels(anchor.next(), 16), vec![120.0; 16]);
        group.bench_with_input(BenchmarkId::from_parameter(n), &base, |b, base| {
            let opts = ExtensionOptions::default()
                .with_ml_forecast(&ml)
                .with_target_year(2060);
            b.iter(|| extend_series_to_year(black_box(base), black_box(&opts)))
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let extended = extend_series_to_year(
        &history(40),
        &ExtensionOptions::default().with_target_year(2060),
    );
    c.bench_function("aggregate_to_year", |b| {
        b.iter(|| aggregate_to_year(black_box(&extended)))
    });
}

criterion_group!(benches, bench_extend, bench_aggregate);
criterion_main!(benches);
