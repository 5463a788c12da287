//! Record and report type definitions used across the codebase

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status tag for a question awaiting an answer.
pub const STATUS_PAID: &str = "paid";
/// Status tag for a terminal (answered or resolved) question.
pub const STATUS_CLOSED: &str = "closed";

/// Raw question record as exported by the marketplace backend.
///
/// Timestamps are epoch values of ambiguous unit (seconds or milliseconds,
/// depending on which backend table the record came from) and must pass
/// through [`crate::core::normalize`] before any arithmetic. Every domain
/// field beyond `id` is optional in the wild.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: i64,
    #[serde(default)]
    pub created_at: Option<f64>,
    #[serde(default)]
    pub answered_at: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub sla_hours_snapshot: Option<f64>,
    #[serde(default)]
    pub pricing_status: Option<String>,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub question_tier: Option<String>,
}

/// Raw answer/feedback record. Ratings are attached after the fact and may
/// reference questions outside the currently fetched slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: i64,
    pub question_id: i64,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub feedback_at: Option<f64>,
    #[serde(default)]
    pub created_at: Option<f64>,
}

/// Engagement tier of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionTier {
    /// Short-form quick consult ("tier1", also every legacy record)
    Quick,
    /// Longer-form deep dive engagement ("tier2" / "deep_dive")
    DeepDive,
}

impl QuestionTier {
    /// Parse a raw tier tag. Unset and unrecognized tags resolve to `Quick`;
    /// most legacy records predate the tier field.
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            Some("tier2") | Some("deep_dive") => QuestionTier::DeepDive,
            _ => QuestionTier::Quick,
        }
    }

    /// Get the display name for this tier
    pub fn display_name(&self) -> &str {
        match self {
            QuestionTier::Quick => "Quick Consult",
            QuestionTier::DeepDive => "Deep Dive",
        }
    }
}

/// Scalar KPIs backing the expert dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// Revenue from terminal questions created this calendar month, in dollars
    pub this_month_revenue: f64,
    /// Percent change against the previous calendar month (0.0 when the
    /// previous month had no revenue)
    pub revenue_change: f64,
    /// Mean answer turnaround in hours, over questions with both timestamps
    pub avg_response_time_hours: f64,
    /// Mean of valid ratings, 0.0 when none exist
    pub avg_rating: f64,
    /// Questions awaiting an answer
    pub pending_count: usize,
    /// Pending questions inside the aggregate urgent window
    pub urgent_count: usize,
}

/// One histogram bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub label: String,
    pub count: usize,
}

/// Response-time histogram over answered questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimeHistogram {
    /// All buckets, in ascending order, zero counts included
    pub buckets: Vec<HistogramBucket>,
    pub total_answered: usize,
}

/// Per-star rating row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub stars: u8,
    pub count: usize,
    /// Share of total valid ratings, 0.0 when there are none
    pub percentage: f64,
}

/// Rating distribution over the answers collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub avg_rating: f64,
    pub total_ratings: usize,
    /// Rows ordered 5 stars down to 1
    pub distribution: Vec<RatingBucket>,
}

/// Mean response time for one tier partition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierStats {
    pub answered_count: usize,
    pub avg_response_time_hours: f64,
}

/// Response times split by engagement tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierSplit {
    pub quick: TierStats,
    pub deep_dive: TierStats,
}

/// Full analytics report: every field is a concrete, already-computed
/// number or string, suitable for direct display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub generated_at: DateTime<Utc>,
    pub question_count: usize,
    pub answer_count: usize,
    pub metrics: DashboardMetrics,
    pub response_times: ResponseTimeHistogram,
    pub ratings: RatingDistribution,
    pub tiers: TierSplit,
}
