//! Property tests for the aggregation invariants.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use asklytics::{
    aggregate_metrics, build_response_time_histogram, normalize_answers, normalize_questions,
    AnswerRecord, AsklyticsConfig, EpochSeconds, QuestionRecord, MILLIS_CUTOFF,
};

fn pinned_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).single().unwrap()
}

fn arb_status() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("paid".to_string())),
        Just(Some("closed".to_string())),
        Just(Some("draft".to_string())),
    ]
}

fn arb_pricing_status() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("offer_pending".to_string())),
        Just(Some("offer_declined".to_string())),
        Just(Some("accepted".to_string())),
    ]
}

fn arb_question() -> impl Strategy<Value = QuestionRecord> {
    (
        1i64..100_000,
        proptest::option::of(1_500_000_000.0f64..1_800_000_000.0),
        proptest::option::of(0.0f64..200_000.0),
        arb_status(),
        proptest::option::of(0i64..100_000),
        proptest::option::of(-5.0f64..200.0),
        arb_pricing_status(),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(
            |(id, created, answer_delay, status, price, sla, pricing, hidden)| QuestionRecord {
                id,
                created_at: created,
                answered_at: created.zip(answer_delay).map(|(c, d)| c + d),
                status,
                price_cents: price,
                sla_hours_snapshot: sla,
                pricing_status: pricing,
                hidden,
                question_tier: None,
            },
        )
}

fn arb_answer() -> impl Strategy<Value = AnswerRecord> {
    (1i64..100_000, 1i64..100_000, proptest::option::of(-2i64..9)).prop_map(
        |(id, question_id, rating)| AnswerRecord {
            id,
            question_id,
            rating,
            ..Default::default()
        },
    )
}

proptest! {
    // urgent is a subset of pending; averages stay in range
    #[test]
    fn prop_counts_and_ranges(
        questions in proptest::collection::vec(arb_question(), 0..50),
        answers in proptest::collection::vec(arb_answer(), 0..50),
    ) {
        let config = AsklyticsConfig::default();
        let questions = normalize_questions(&questions);
        let answers = normalize_answers(&answers);
        let metrics = aggregate_metrics(&questions, &answers, pinned_now(), &config);

        prop_assert!(metrics.urgent_count <= metrics.pending_count);
        prop_assert!(metrics.pending_count <= questions.len());
        prop_assert!((0.0..=5.0).contains(&metrics.avg_rating));
        prop_assert!(metrics.this_month_revenue >= 0.0);
    }

    // every answered question lands in exactly one histogram bucket
    #[test]
    fn prop_histogram_buckets_sum_to_answered(
        questions in proptest::collection::vec(arb_question(), 0..50),
    ) {
        let config = AsklyticsConfig::default();
        let questions = normalize_questions(&questions);
        let histogram = build_response_time_histogram(&questions, &config);

        let answered = questions
            .iter()
            .filter(|q| q.response_time_hours().is_some())
            .count();
        let total: usize = histogram.buckets.iter().map(|b| b.count).sum();
        prop_assert_eq!(total, answered);
        prop_assert_eq!(histogram.total_answered, answered);
    }

    // adding a terminal current-month question raises revenue by exactly
    // its price
    #[test]
    fn prop_revenue_monotonicity(
        questions in proptest::collection::vec(arb_question(), 0..30),
        price in 1i64..1_000_000,
    ) {
        let config = AsklyticsConfig::default();
        let now = pinned_now();
        let base = normalize_questions(&questions);
        let before = aggregate_metrics(&base, &[], now, &config);

        let created = now.timestamp() as f64 - 24.0 * 3600.0;
        let extra = QuestionRecord {
            id: 999_999,
            created_at: Some(created),
            answered_at: Some(created + 3_600.0),
            status: Some("closed".to_string()),
            price_cents: Some(price),
            ..Default::default()
        };
        let mut extended = questions.clone();
        extended.push(extra);
        let extended = normalize_questions(&extended);
        let after = aggregate_metrics(&extended, &[], now, &config);

        let delta = after.this_month_revenue - before.this_month_revenue;
        prop_assert!((delta - price as f64 / 100.0).abs() < 1e-6);
    }

    // seconds normalize to themselves; millis normalize below the cutoff
    #[test]
    fn prop_normalization_idempotent(secs in 1.0f64..MILLIS_CUTOFF) {
        let once = EpochSeconds::from_raw(secs);
        prop_assert_eq!(once.value(), secs);
        let twice = EpochSeconds::from_raw(once.value());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_millis_normalize_below_cutoff(secs in 1.0f64..1_800_000_000.0) {
        let millis = secs * 1000.0;
        prop_assume!(millis > MILLIS_CUTOFF);
        let normalized = EpochSeconds::from_raw(millis);
        prop_assert!(normalized.value() < MILLIS_CUTOFF);
        prop_assert!((normalized.value() - secs).abs() < 1e-6);
    }
}
