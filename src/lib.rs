// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod metrics;
pub mod urgency;

// Re-export commonly used types
pub use crate::core::normalize::{
    normalize_answers, normalize_questions, normalize_timestamp, EpochSeconds, NormalizedAnswer,
    NormalizedQuestion, MILLIS_CUTOFF,
};
pub use crate::core::types::{
    AnalyticsReport, AnswerRecord, DashboardMetrics, HistogramBucket, QuestionRecord, QuestionTier,
    RatingBucket, RatingDistribution, ResponseTimeHistogram, TierSplit, TierStats,
};

pub use crate::config::{get_config, load_config, AsklyticsConfig};
pub use crate::errors::AsklyticsError;

pub use crate::metrics::distribution::{
    build_rating_distribution, build_response_time_histogram, build_tier_split,
};
pub use crate::metrics::{aggregate_metrics, build_report, is_pending, is_terminal, is_urgent};

pub use crate::urgency::watch::{countdown_state, CountdownState, CountdownWatch};
pub use crate::urgency::{
    classify_question, classify_urgency, remaining_seconds, resolve_sla_hours, sla_deadline,
    UrgencyConfig, UrgencyTier,
};

pub use crate::io::input::{load_answers, load_questions};
pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
