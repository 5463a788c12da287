use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use asklytics::{
    aggregate_metrics, build_response_time_histogram, normalize_questions, AsklyticsConfig,
    QuestionRecord,
};

fn sample_questions(count: usize) -> Vec<QuestionRecord> {
    (0..count)
        .map(|i| {
            let created = 1_754_000_000.0 + i as f64 * 600.0;
            let answered = (i % 3 != 0).then_some(created + (i % 90) as f64 * 3600.0);
            QuestionRecord {
                id: i as i64,
                created_at: Some(created),
                answered_at: answered,
                status: Some(if i % 3 == 0 { "paid" } else { "closed" }.to_string()),
                price_cents: Some(2_500 + (i % 10) as i64 * 500),
                sla_hours_snapshot: Some(24.0),
                ..Default::default()
            }
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let config = AsklyticsConfig::default();
    let now = Utc.with_ymd_and_hms(2025, 8, 6, 12, 0, 0).single().unwrap();
    let questions = normalize_questions(&sample_questions(10_000));

    c.bench_function("aggregate_metrics_10k", |b| {
        b.iter(|| black_box(aggregate_metrics(&questions, &[], now, &config)))
    });

    c.bench_function("response_time_histogram_10k", |b| {
        b.iter(|| black_box(build_response_time_histogram(&questions, &config)))
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
