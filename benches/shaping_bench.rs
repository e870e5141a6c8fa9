//! Benchmarks for payload shaping
//!
//! Run with: cargo bench

use cradle::api::{ComprehensiveAnalysis, DailySeries, KeyedCounts, SummaryStats};
use cradle::charts::{hourly_distribution, zip_series};
use cradle::pages::DashboardView;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn dates(days: usize) -> Vec<String> {
    (0..days)
        .map(|d| format!("2024-{:02}-{:02}", 1 + (d / 28) % 12, 1 + d % 28))
        .collect()
}

fn values(days: usize) -> Vec<Option<f64>> {
    (0..days)
        .map(|d| if d % 7 == 0 { None } else { Some(400.0 + d as f64) })
        .collect()
}

fn analysis(days: usize) -> ComprehensiveAnalysis {
    let mut analysis = ComprehensiveAnalysis::default();
    analysis.summary.stats.insert(
        "sleep_minutes".to_string(),
        SummaryStats {
            mean: 600.0,
            ..Default::default()
        },
    );
    analysis.time_series.daily = Some(DailySeries {
        dates: dates(days),
        sleep_minutes: values(days),
        milk_amount: values(days),
        vomit_count: values(days),
        ..Default::default()
    });
    analysis
}

fn bench_zip_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("zip_series");

    for days in [30, 365] {
        let dates = dates(days);
        let values = values(days);

        group.throughput(Throughput::Elements(days as u64));
        group.bench_function(format!("days_{}", days), |b| {
            b.iter(|| zip_series(black_box(&dates), black_box(&values), |v| v / 60.0))
        });
    }

    group.finish();
}

fn bench_hourly(c: &mut Criterion) {
    let counts: KeyedCounts = (0..24)
        .map(|h| (format!("{}.0", h), Some((h * 3 % 7) as f64)))
        .collect();

    c.bench_function("hourly_distribution", |b| {
        b.iter(|| hourly_distribution(black_box(&counts)))
    });
}

fn bench_dashboard(c: &mut Criterion) {
    let payload = analysis(90);

    c.bench_function("dashboard_from_payload", |b| {
        b.iter(|| DashboardView::from_payload(black_box(&payload)))
    });
}

criterion_group!(benches, bench_zip_series, bench_hourly, bench_dashboard);
criterion_main!(benches);
