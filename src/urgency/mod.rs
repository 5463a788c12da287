//! SLA urgency classification
//!
//! Maps a question's creation time and SLA commitment to a discrete urgency
//! tier for countdown display, and backs the aggregate "urgent" count.

pub mod watch;

use serde::{Deserialize, Serialize};

use crate::core::normalize::{EpochSeconds, NormalizedQuestion};

/// Urgency tier for a pending question's SLA countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    /// SLA deadline has passed
    Overdue,
    /// Less than the urgent threshold (default 6h) remaining
    Urgent,
    /// Between the urgent and normal thresholds (default 6-24h) remaining
    Normal,
    /// At least the normal threshold (default 24h) remaining
    Comfortable,
}

impl UrgencyTier {
    /// Get tier label for display
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::Overdue => "Overdue",
            UrgencyTier::Urgent => "Urgent",
            UrgencyTier::Normal => "Due soon",
            UrgencyTier::Comfortable => "On track",
        }
    }

    /// Get short tier label
    pub fn short_label(&self) -> &'static str {
        match self {
            UrgencyTier::Overdue => "OVR",
            UrgencyTier::Urgent => "URG",
            UrgencyTier::Normal => "DUE",
            UrgencyTier::Comfortable => "OK",
        }
    }
}

/// Thresholds for urgency classification
///
/// The display classifier and the aggregate urgent count use different
/// windows: the countdown turns `Urgent` under `urgent_threshold_hours`,
/// while the dashboard's urgent counter uses the wider
/// `aggregate_urgent_window_hours`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyConfig {
    /// Remaining time below which a countdown shows as urgent
    #[serde(default = "default_urgent_threshold")]
    pub urgent_threshold_hours: f64,

    /// Remaining time below which a countdown shows as due soon
    #[serde(default = "default_normal_threshold")]
    pub normal_threshold_hours: f64,

    /// Remaining-time window for the dashboard urgent count
    #[serde(default = "default_urgent_window")]
    pub aggregate_urgent_window_hours: f64,
}

fn default_urgent_threshold() -> f64 {
    6.0
}

fn default_normal_threshold() -> f64 {
    24.0
}

fn default_urgent_window() -> f64 {
    12.0
}

impl Default for UrgencyConfig {
    fn default() -> Self {
        Self {
            urgent_threshold_hours: default_urgent_threshold(),
            normal_threshold_hours: default_normal_threshold(),
            aggregate_urgent_window_hours: default_urgent_window(),
        }
    }
}

/// SLA deadline for a question
pub fn sla_deadline(created_at: EpochSeconds, sla_hours: f64) -> EpochSeconds {
    EpochSeconds::from_secs(created_at.value() + sla_hours * 3600.0)
}

/// Seconds remaining until the SLA deadline (negative once overdue)
pub fn remaining_seconds(created_at: EpochSeconds, sla_hours: f64, now: EpochSeconds) -> f64 {
    now.seconds_until(sla_deadline(created_at, sla_hours))
}

/// Classify remaining SLA time into an urgency tier.
///
/// Pure function of `(now, created_at, sla_hours)`; the live countdown
/// re-invokes it on a timer (see [`watch`]).
pub fn classify_urgency(
    created_at: EpochSeconds,
    sla_hours: f64,
    now: EpochSeconds,
    config: &UrgencyConfig,
) -> UrgencyTier {
    let remaining = remaining_seconds(created_at, sla_hours, now);
    if remaining <= 0.0 {
        return UrgencyTier::Overdue;
    }

    let remaining_hours = remaining / 3600.0;
    if remaining_hours < config.urgent_threshold_hours {
        UrgencyTier::Urgent
    } else if remaining_hours < config.normal_threshold_hours {
        UrgencyTier::Normal
    } else {
        UrgencyTier::Comfortable
    }
}

/// Resolve the SLA hours that apply to a question.
///
/// The per-question snapshot is immutable history and always wins; the
/// expert's live setting is only a fallback for records that predate
/// snapshotting. Non-positive values mean "no SLA tracked".
pub fn resolve_sla_hours(snapshot: Option<f64>, fallback: Option<f64>) -> Option<f64> {
    snapshot
        .filter(|h| *h > 0.0)
        .or_else(|| fallback.filter(|h| *h > 0.0))
}

/// Classify a normalized question, resolving its SLA source first.
///
/// Returns `None` when the question has no creation time or no SLA to
/// count against.
pub fn classify_question(
    question: &NormalizedQuestion,
    now: EpochSeconds,
    config: &UrgencyConfig,
    fallback_sla_hours: Option<f64>,
) -> Option<UrgencyTier> {
    let created = question.created_at?;
    let sla = resolve_sla_hours(question.sla_hours_snapshot, fallback_sla_hours)?;
    Some(classify_urgency(created, sla, now, config))
}
