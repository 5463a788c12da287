//! Dashboard KPI aggregation
//!
//! Single-pass reduction over the question export plus an independent pass
//! over the answer export. Ratings live on a semantically distinct
//! collection and are never conflated with question traversal.

pub mod distribution;

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::config::AsklyticsConfig;
use crate::core::normalize::{EpochSeconds, NormalizedAnswer, NormalizedQuestion};
use crate::core::types::{
    AnalyticsReport, AnswerRecord, DashboardMetrics, QuestionRecord, STATUS_CLOSED, STATUS_PAID,
};
use crate::urgency::remaining_seconds;

/// Calendar-month revenue windows, in epoch seconds.
///
/// Current month is `[this_start, now)`; previous month is
/// `[prev_start, this_start)`.
#[derive(Debug, Clone, Copy)]
struct MonthWindow {
    prev_start: f64,
    this_start: f64,
    now: f64,
}

impl MonthWindow {
    fn at(now: DateTime<Utc>) -> Self {
        let this_start = month_start(now.year(), now.month()).unwrap_or(now);
        let (prev_year, prev_month) = if now.month() == 1 {
            (now.year() - 1, 12)
        } else {
            (now.year(), now.month() - 1)
        };
        let prev_start = month_start(prev_year, prev_month).unwrap_or(this_start);
        Self {
            prev_start: prev_start.timestamp() as f64,
            this_start: this_start.timestamp() as f64,
            now: now.timestamp() as f64,
        }
    }

    fn in_current(&self, t: EpochSeconds) -> bool {
        t.value() >= self.this_start && t.value() < self.now
    }

    fn in_previous(&self, t: EpochSeconds) -> bool {
        t.value() >= self.prev_start && t.value() < self.this_start
    }
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()
}

/// A question is terminal once it is answered or closed.
pub fn is_terminal(question: &NormalizedQuestion) -> bool {
    question.answered_at.is_some() || question.status.as_deref() == Some(STATUS_CLOSED)
}

/// A question is pending iff it is paid, unanswered, not excluded by its
/// pricing status, and not hidden. The four conditions are independent
/// filters; none implies another.
pub fn is_pending(question: &NormalizedQuestion, exclusion_tags: &[String]) -> bool {
    if question.status.as_deref() != Some(STATUS_PAID) {
        return false;
    }
    if question.answered_at.is_some() {
        return false;
    }
    if let Some(tag) = question.pricing_status.as_deref() {
        if exclusion_tags.iter().any(|t| t == tag) {
            return false;
        }
    }
    !question.hidden
}

/// A pending question is urgent iff it has a tracked SLA and its remaining
/// time is inside the open interval `(0, window_hours)`. Callers guard with
/// [`is_pending`]; urgency is never evaluated for non-pending records.
pub fn is_urgent(question: &NormalizedQuestion, now: EpochSeconds, window_hours: f64) -> bool {
    let (Some(created), Some(sla)) = (question.created_at, question.sla_hours_snapshot) else {
        return false;
    };
    let remaining = remaining_seconds(created, sla, now);
    remaining > 0.0 && remaining < window_hours * 3600.0
}

/// Aggregate the dashboard KPIs.
///
/// One forward pass over questions maintaining the running accumulators,
/// one independent pass over answers for ratings. Returns all zeros for an
/// empty question slice so no average ever divides by zero.
pub fn aggregate_metrics(
    questions: &[NormalizedQuestion],
    answers: &[NormalizedAnswer],
    now: DateTime<Utc>,
    config: &AsklyticsConfig,
) -> DashboardMetrics {
    if questions.is_empty() {
        return DashboardMetrics::default();
    }

    let window = MonthWindow::at(now);
    let now_ts = EpochSeconds::from_datetime(now);
    let urgent_window = config.urgency.aggregate_urgent_window_hours;

    let mut this_month_cents: i64 = 0;
    let mut prev_month_cents: i64 = 0;
    let mut response_sum_hours = 0.0;
    let mut response_count = 0usize;
    let mut pending_count = 0usize;
    let mut urgent_count = 0usize;

    for question in questions {
        if is_terminal(question) {
            // hidden questions stay in historical revenue
            if let Some(created) = question.created_at {
                if window.in_current(created) {
                    this_month_cents += question.price_cents;
                } else if window.in_previous(created) {
                    prev_month_cents += question.price_cents;
                }
            }
        }

        if let Some(rt) = question.response_time_hours() {
            response_sum_hours += rt;
            response_count += 1;
        }

        if is_pending(question, &config.pending_exclusion_tags) {
            pending_count += 1;
            if is_urgent(question, now_ts, urgent_window) {
                urgent_count += 1;
            }
        }
    }

    let mut rating_sum: i64 = 0;
    let mut rating_count = 0usize;
    for answer in answers {
        if let Some(rating) = answer.valid_rating() {
            rating_sum += rating;
            rating_count += 1;
        }
    }

    let this_month_revenue = this_month_cents as f64 / 100.0;
    let prev_month_revenue = prev_month_cents as f64 / 100.0;

    DashboardMetrics {
        this_month_revenue,
        revenue_change: if prev_month_revenue > 0.0 {
            (this_month_revenue - prev_month_revenue) / prev_month_revenue * 100.0
        } else {
            0.0
        },
        avg_response_time_hours: if response_count > 0 {
            response_sum_hours / response_count as f64
        } else {
            0.0
        },
        avg_rating: if rating_count > 0 {
            rating_sum as f64 / rating_count as f64
        } else {
            0.0
        },
        pending_count,
        urgent_count,
    }
}

/// Build the full analytics report from raw export slices.
pub fn build_report(
    questions: &[QuestionRecord],
    answers: &[AnswerRecord],
    now: DateTime<Utc>,
    config: &AsklyticsConfig,
) -> AnalyticsReport {
    let normalized_questions = crate::core::normalize::normalize_questions(questions);
    let normalized_answers = crate::core::normalize::normalize_answers(answers);

    AnalyticsReport {
        generated_at: now,
        question_count: questions.len(),
        answer_count: answers.len(),
        metrics: aggregate_metrics(&normalized_questions, &normalized_answers, now, config),
        response_times: distribution::build_response_time_histogram(
            &normalized_questions,
            config,
        ),
        ratings: distribution::build_rating_distribution(&normalized_answers),
        tiers: distribution::build_tier_split(&normalized_questions),
    }
}
