pub mod normalize;
pub mod types;

pub use normalize::{
    normalize_answers, normalize_questions, normalize_timestamp, EpochSeconds, NormalizedAnswer,
    NormalizedQuestion,
};
pub use types::{
    AnalyticsReport, AnswerRecord, DashboardMetrics, HistogramBucket, QuestionRecord, QuestionTier,
    RatingBucket, RatingDistribution, ResponseTimeHistogram, TierSplit, TierStats,
};
