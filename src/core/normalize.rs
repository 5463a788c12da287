//! Timestamp normalization and boundary record types.
//!
//! Backend exports mix epoch-seconds and epoch-milliseconds in the same
//! timestamp columns. Normalization happens exactly once, at the system
//! boundary: everything downstream of [`NormalizedQuestion`] and
//! [`NormalizedAnswer`] works with canonical epoch seconds and never
//! re-derives the unit heuristic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{AnswerRecord, QuestionRecord, QuestionTier};

/// Epoch-seconds value for 2100-01-01T00:00:00Z. Raw values above this are
/// taken to be milliseconds. A seconds value just under year 2100 would be
/// misread only for dates centuries away, so the cutoff is safe for
/// realistic data, but it is a convention, not a guarantee.
pub const MILLIS_CUTOFF: f64 = 4_102_444_800.0;

/// Canonical timestamp: seconds since the Unix epoch.
///
/// The unit heuristic lives in [`EpochSeconds::from_raw`] and nowhere else.
///
/// # Examples
///
/// ```rust
/// use asklytics::core::normalize::EpochSeconds;
///
/// // Seconds pass through unchanged
/// let t = EpochSeconds::from_raw(1_700_000_000.0);
/// assert_eq!(t.value(), 1_700_000_000.0);
///
/// // Milliseconds are detected and converted
/// let t = EpochSeconds::from_raw(1_700_000_000_000.0);
/// assert_eq!(t.value(), 1_700_000_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct EpochSeconds(f64);

impl EpochSeconds {
    /// Create from a raw backend value, resolving the unit ambiguity.
    pub fn from_raw(raw: f64) -> Self {
        if raw > MILLIS_CUTOFF {
            Self(raw / 1000.0)
        } else {
            Self(raw)
        }
    }

    /// Create from a value already known to be seconds.
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Create from a UTC instant.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp() as f64)
    }

    /// The current instant.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Get the raw seconds value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `self` to `other` (negative if `other` is earlier).
    pub fn seconds_until(self, other: EpochSeconds) -> f64 {
        other.0 - self.0
    }

    /// Hours elapsed from `self` to `other`.
    pub fn hours_until(self, other: EpochSeconds) -> f64 {
        self.seconds_until(other) / 3600.0
    }
}

/// Normalize an optional raw timestamp.
///
/// `None`, zero, negative, and non-finite values all map to `None`: an
/// absent timestamp is absent, never epoch zero.
pub fn normalize_timestamp(raw: Option<f64>) -> Option<EpochSeconds> {
    match raw {
        Some(t) if t > 0.0 && t.is_finite() => Some(EpochSeconds::from_raw(t)),
        _ => None,
    }
}

/// Question record after boundary normalization: canonical timestamps,
/// parsed tier, defaulted price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuestion {
    pub id: i64,
    pub created_at: Option<EpochSeconds>,
    pub answered_at: Option<EpochSeconds>,
    pub status: Option<String>,
    pub price_cents: i64,
    /// SLA commitment captured at question creation. Only positive values
    /// survive normalization; anything else means "no SLA tracked".
    pub sla_hours_snapshot: Option<f64>,
    pub pricing_status: Option<String>,
    pub hidden: bool,
    pub tier: QuestionTier,
}

impl NormalizedQuestion {
    pub fn from_raw(raw: &QuestionRecord) -> Self {
        Self {
            id: raw.id,
            created_at: normalize_timestamp(raw.created_at),
            answered_at: normalize_timestamp(raw.answered_at),
            status: raw.status.clone(),
            price_cents: raw.price_cents.unwrap_or(0).max(0),
            sla_hours_snapshot: raw
                .sla_hours_snapshot
                .filter(|h| *h > 0.0 && h.is_finite()),
            pricing_status: raw.pricing_status.clone(),
            hidden: raw.hidden.unwrap_or(false),
            tier: QuestionTier::parse(raw.question_tier.as_deref()),
        }
    }

    /// Answer turnaround in hours, when both timestamps are present.
    pub fn response_time_hours(&self) -> Option<f64> {
        match (self.created_at, self.answered_at) {
            (Some(created), Some(answered)) => Some(created.hours_until(answered)),
            _ => None,
        }
    }
}

/// Answer record after boundary normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAnswer {
    pub id: i64,
    pub question_id: i64,
    pub rating: Option<i64>,
    pub feedback_text: Option<String>,
    pub feedback_at: Option<EpochSeconds>,
    pub created_at: Option<EpochSeconds>,
}

impl NormalizedAnswer {
    pub fn from_raw(raw: &AnswerRecord) -> Self {
        Self {
            id: raw.id,
            question_id: raw.question_id,
            rating: raw.rating,
            feedback_text: raw.feedback_text.clone(),
            feedback_at: normalize_timestamp(raw.feedback_at),
            created_at: normalize_timestamp(raw.created_at),
        }
    }

    /// Rating if it is a valid 1-5 star value. Out-of-range ratings are
    /// excluded, not clamped.
    pub fn valid_rating(&self) -> Option<i64> {
        self.rating.filter(|r| (1..=5).contains(r))
    }
}

/// Normalize a question export slice.
pub fn normalize_questions(raw: &[QuestionRecord]) -> Vec<NormalizedQuestion> {
    raw.iter().map(NormalizedQuestion::from_raw).collect()
}

/// Normalize an answer export slice.
pub fn normalize_answers(raw: &[AnswerRecord]) -> Vec<NormalizedAnswer> {
    raw.iter().map(NormalizedAnswer::from_raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_pass_through() {
        let t = EpochSeconds::from_raw(1_700_000_000.0);
        assert_eq!(t.value(), 1_700_000_000.0);
    }

    #[test]
    fn test_millis_converted() {
        let t = EpochSeconds::from_raw(1_700_000_000_000.0);
        assert_eq!(t.value(), 1_700_000_000.0);
        assert!(t.value() < MILLIS_CUTOFF);
    }

    #[test]
    fn test_normalization_idempotent_for_seconds() {
        let once = EpochSeconds::from_raw(1_700_000_000.0);
        let twice = EpochSeconds::from_raw(once.value());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_and_absent_are_absent() {
        assert!(normalize_timestamp(None).is_none());
        assert!(normalize_timestamp(Some(0.0)).is_none());
        assert!(normalize_timestamp(Some(-5.0)).is_none());
        assert!(normalize_timestamp(Some(f64::NAN)).is_none());
    }

    #[test]
    fn test_non_positive_sla_dropped() {
        let raw = QuestionRecord {
            id: 1,
            sla_hours_snapshot: Some(0.0),
            ..Default::default()
        };
        assert!(NormalizedQuestion::from_raw(&raw).sla_hours_snapshot.is_none());

        let raw = QuestionRecord {
            id: 2,
            sla_hours_snapshot: Some(-4.0),
            ..Default::default()
        };
        assert!(NormalizedQuestion::from_raw(&raw).sla_hours_snapshot.is_none());
    }

    #[test]
    fn test_response_time_requires_both_timestamps() {
        let raw = QuestionRecord {
            id: 1,
            created_at: Some(1_700_000_000.0),
            ..Default::default()
        };
        assert!(NormalizedQuestion::from_raw(&raw)
            .response_time_hours()
            .is_none());

        let raw = QuestionRecord {
            id: 2,
            created_at: Some(1_700_000_000.0),
            answered_at: Some(1_700_018_000.0),
            ..Default::default()
        };
        let rt = NormalizedQuestion::from_raw(&raw).response_time_hours();
        assert_eq!(rt, Some(5.0));
    }

    #[test]
    fn test_mixed_unit_response_time() {
        // created in seconds, answered in milliseconds: still 5 hours
        let raw = QuestionRecord {
            id: 3,
            created_at: Some(1_700_000_000.0),
            answered_at: Some(1_700_018_000_000.0),
            ..Default::default()
        };
        let rt = NormalizedQuestion::from_raw(&raw).response_time_hours();
        assert_eq!(rt, Some(5.0));
    }

    #[test]
    fn test_out_of_range_ratings_excluded() {
        let mk = |rating| NormalizedAnswer {
            id: 1,
            question_id: 1,
            rating,
            feedback_text: None,
            feedback_at: None,
            created_at: None,
        };
        assert_eq!(mk(Some(5)).valid_rating(), Some(5));
        assert_eq!(mk(Some(1)).valid_rating(), Some(1));
        assert_eq!(mk(Some(0)).valid_rating(), None);
        assert_eq!(mk(Some(6)).valid_rating(), None);
        assert_eq!(mk(None).valid_rating(), None);
    }
}
