//! Distribution builders: response-time histogram, rating distribution,
//! tier-split response times. Each is an independent pure function over the
//! normalized export.

use crate::config::AsklyticsConfig;
use crate::core::normalize::{NormalizedAnswer, NormalizedQuestion};
use crate::core::types::{
    HistogramBucket, QuestionTier, RatingBucket, RatingDistribution, ResponseTimeHistogram,
    TierSplit, TierStats,
};

/// Build the response-time histogram over answered questions.
///
/// Buckets are half-open `[lo, hi)`: a value exactly on a boundary belongs
/// to the higher bucket. Unanswered questions are excluded. Every bucket is
/// present in the output even at zero count.
pub fn build_response_time_histogram(
    questions: &[NormalizedQuestion],
    config: &AsklyticsConfig,
) -> ResponseTimeHistogram {
    // config validation rejects empty edges at load time; guard anyway so
    // a hand-built config cannot panic the builder
    let default_edges = AsklyticsConfig::default().histogram_bucket_edges_hours;
    let edges = if config.histogram_bucket_edges_hours.is_empty() {
        &default_edges
    } else {
        &config.histogram_bucket_edges_hours
    };
    let mut counts = vec![0usize; edges.len()];
    let mut total_answered = 0usize;

    for question in questions {
        let Some(hours) = question.response_time_hours() else {
            continue;
        };
        total_answered += 1;
        counts[bucket_index(hours, edges)] += 1;
    }

    let buckets = edges
        .iter()
        .enumerate()
        .map(|(i, &lo)| HistogramBucket {
            label: bucket_label(lo, edges.get(i + 1).copied()),
            count: counts[i],
        })
        .collect();

    ResponseTimeHistogram {
        buckets,
        total_answered,
    }
}

/// Index of the bucket a value falls in: the last edge it is >= to.
/// Values below the first edge (bad data with answer before creation)
/// land in the first bucket rather than being dropped.
fn bucket_index(hours: f64, edges: &[f64]) -> usize {
    edges
        .iter()
        .rposition(|&lo| hours >= lo)
        .unwrap_or(0)
}

fn bucket_label(lo: f64, hi: Option<f64>) -> String {
    match hi {
        Some(hi) => format!("{}-{}h", lo as i64, hi as i64),
        None => format!("{}h+", lo as i64),
    }
}

/// Build the star-rating distribution over the answers collection.
///
/// Rows are ordered 5 stars down to 1; out-of-range ratings are excluded,
/// not clamped. With zero valid ratings every percentage is 0.0.
pub fn build_rating_distribution(answers: &[NormalizedAnswer]) -> RatingDistribution {
    let mut counts = [0usize; 5];
    let mut sum: i64 = 0;

    for answer in answers {
        if let Some(rating) = answer.valid_rating() {
            counts[(rating - 1) as usize] += 1;
            sum += rating;
        }
    }

    let total_ratings: usize = counts.iter().sum();
    let distribution = (1..=5u8)
        .rev()
        .map(|stars| {
            let count = counts[(stars - 1) as usize];
            RatingBucket {
                stars,
                count,
                percentage: if total_ratings > 0 {
                    count as f64 / total_ratings as f64 * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect();

    RatingDistribution {
        avg_rating: if total_ratings > 0 {
            sum as f64 / total_ratings as f64
        } else {
            0.0
        },
        total_ratings,
        distribution,
    }
}

/// Split mean response time by engagement tier. Unrecognized tier tags have
/// already failed open to `Quick` at normalization.
pub fn build_tier_split(questions: &[NormalizedQuestion]) -> TierSplit {
    let mut quick_sum = 0.0;
    let mut quick_count = 0usize;
    let mut deep_sum = 0.0;
    let mut deep_count = 0usize;

    for question in questions {
        let Some(hours) = question.response_time_hours() else {
            continue;
        };
        match question.tier {
            QuestionTier::Quick => {
                quick_sum += hours;
                quick_count += 1;
            }
            QuestionTier::DeepDive => {
                deep_sum += hours;
                deep_count += 1;
            }
        }
    }

    TierSplit {
        quick: tier_stats(quick_sum, quick_count),
        deep_dive: tier_stats(deep_sum, deep_count),
    }
}

fn tier_stats(sum_hours: f64, count: usize) -> TierStats {
    TierStats {
        answered_count: count,
        avg_response_time_hours: if count > 0 {
            sum_hours / count as f64
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AnswerRecord, QuestionRecord};

    fn answered_question(id: i64, hours: f64) -> NormalizedQuestion {
        NormalizedQuestion::from_raw(&QuestionRecord {
            id,
            created_at: Some(1_700_000_000.0),
            answered_at: Some(1_700_000_000.0 + hours * 3600.0),
            status: Some("closed".to_string()),
            ..Default::default()
        })
    }

    fn rated_answer(id: i64, rating: i64) -> NormalizedAnswer {
        NormalizedAnswer::from_raw(&AnswerRecord {
            id,
            question_id: id,
            rating: Some(rating),
            ..Default::default()
        })
    }

    #[test]
    fn test_histogram_boundary_goes_to_higher_bucket() {
        let config = AsklyticsConfig::default();
        let questions = vec![
            answered_question(1, 12.0),
            answered_question(2, 11.999),
        ];
        let histogram = build_response_time_histogram(&questions, &config);
        assert_eq!(histogram.buckets[0].label, "0-12h");
        assert_eq!(histogram.buckets[0].count, 1);
        assert_eq!(histogram.buckets[1].label, "12-24h");
        assert_eq!(histogram.buckets[1].count, 1);
        assert_eq!(histogram.total_answered, 2);
    }

    #[test]
    fn test_histogram_open_ended_last_bucket() {
        let config = AsklyticsConfig::default();
        let questions = vec![answered_question(1, 400.0), answered_question(2, 72.0)];
        let histogram = build_response_time_histogram(&questions, &config);
        let last = histogram.buckets.last().unwrap();
        assert_eq!(last.label, "72h+");
        assert_eq!(last.count, 2);
    }

    #[test]
    fn test_histogram_excludes_unanswered_but_keeps_buckets() {
        let config = AsklyticsConfig::default();
        let unanswered = NormalizedQuestion::from_raw(&QuestionRecord {
            id: 1,
            created_at: Some(1_700_000_000.0),
            status: Some("paid".to_string()),
            ..Default::default()
        });
        let histogram = build_response_time_histogram(&[unanswered], &config);
        assert_eq!(histogram.total_answered, 0);
        assert_eq!(histogram.buckets.len(), 6);
        assert!(histogram.buckets.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_histogram_counts_sum_to_answered() {
        let config = AsklyticsConfig::default();
        let questions: Vec<_> = [0.0, 5.0, 12.0, 24.0, 48.0, 59.9, 60.0, 71.0, 72.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, &h)| answered_question(i as i64, h))
            .collect();
        let histogram = build_response_time_histogram(&questions, &config);
        let total: usize = histogram.buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, histogram.total_answered);
        assert_eq!(total, questions.len());
    }

    #[test]
    fn test_rating_distribution_two_answers() {
        let answers = vec![rated_answer(1, 4), rated_answer(2, 2)];
        let dist = build_rating_distribution(&answers);
        assert_eq!(dist.avg_rating, 3.0);
        assert_eq!(dist.total_ratings, 2);

        let by_stars: Vec<(u8, usize)> = dist
            .distribution
            .iter()
            .map(|b| (b.stars, b.count))
            .collect();
        assert_eq!(by_stars, vec![(5, 0), (4, 1), (3, 0), (2, 1), (1, 0)]);
        assert_eq!(dist.distribution[1].percentage, 50.0);
    }

    #[test]
    fn test_rating_distribution_empty_is_well_formed() {
        let dist = build_rating_distribution(&[]);
        assert_eq!(dist.avg_rating, 0.0);
        assert_eq!(dist.total_ratings, 0);
        assert_eq!(dist.distribution.len(), 5);
        assert!(dist.distribution.iter().all(|b| b.percentage == 0.0));
    }

    #[test]
    fn test_rating_distribution_skips_invalid() {
        let answers = vec![rated_answer(1, 0), rated_answer(2, 6), rated_answer(3, 5)];
        let dist = build_rating_distribution(&answers);
        assert_eq!(dist.total_ratings, 1);
        assert_eq!(dist.avg_rating, 5.0);
    }

    #[test]
    fn test_tier_split_partitions_independently() {
        let mut deep = answered_question(1, 30.0);
        deep.tier = QuestionTier::DeepDive;
        let questions = vec![answered_question(2, 4.0), answered_question(3, 6.0), deep];

        let split = build_tier_split(&questions);
        assert_eq!(split.quick.answered_count, 2);
        assert_eq!(split.quick.avg_response_time_hours, 5.0);
        assert_eq!(split.deep_dive.answered_count, 1);
        assert_eq!(split.deep_dive.avg_response_time_hours, 30.0);
    }

    #[test]
    fn test_tier_split_empty_partition_is_zero() {
        let split = build_tier_split(&[]);
        assert_eq!(split.quick.avg_response_time_hours, 0.0);
        assert_eq!(split.deep_dive.answered_count, 0);
    }
}
