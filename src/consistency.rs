//! Consistency analysis
//!
//! Scores weekly training frequency against a fixed target. The score and
//! its label thresholds are policy constants from `ConsistencyConfig`, not
//! statistically derived boundaries.

use crate::config::ConsistencyConfig;
use crate::types::{ConsistencyLabel, ConsistencyReport, WeeklyBucket};

/// Consistency analyzer over trailing weekly workout counts
pub struct ConsistencyAnalyzer;

impl ConsistencyAnalyzer {
    /// Analyze the trailing weekly buckets.
    ///
    /// A window with no training at all yields the insufficient-data
    /// sentinel (`score: null`) rather than a zero score.
    pub fn analyze(weekly: &[WeeklyBucket], config: &ConsistencyConfig) -> ConsistencyReport {
        if weekly.is_empty() || weekly.iter().all(|week| week.workout_count == 0) {
            return ConsistencyReport {
                score: None,
                avg_per_week: 0.0,
                label: ConsistencyLabel::InsufficientData,
            };
        }

        let total: u32 = weekly.iter().map(|week| week.workout_count).sum();
        let avg_per_week = f64::from(total) / weekly.len() as f64;

        let raw_score = (avg_per_week / config.target_per_week * 100.0)
            .clamp(0.0, config.raw_score_cap);
        let score = raw_score.clamp(0.0, 100.0).round() as u32;

        let label = if score >= config.very_consistent_at {
            ConsistencyLabel::VeryConsistent
        } else if score <= config.inconsistent_at {
            ConsistencyLabel::Inconsistent
        } else {
            ConsistencyLabel::ModeratelyConsistent
        };

        ConsistencyReport {
            score: Some(score),
            avg_per_week,
            label,
        }
    }
}
