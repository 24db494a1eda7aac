//! Recovery classification
//!
//! Compares the trailing 7-day training load against the preceding 7 days
//! and classifies the change. Branch order matters: the zero-denominator
//! cases are decided before any ratio is computed.

use crate::config::RecoveryConfig;
use crate::types::{DailyBucket, RecoveryLabel, RecoveryReport};

/// Days of daily load data required for the week-over-week comparison
pub const MIN_RECOVERY_DAYS: usize = 14;

/// Recovery classifier over daily load buckets
pub struct RecoveryClassifier;

impl RecoveryClassifier {
    /// Classify the trailing week against the one before it.
    ///
    /// `daily` is oldest-first; the last 14 entries feed the comparison.
    /// Fewer than 14 days degrades to the insufficient-data sentinel.
    pub fn classify(daily: &[DailyBucket], config: &RecoveryConfig) -> RecoveryReport {
        if daily.len() < MIN_RECOVERY_DAYS {
            return RecoveryReport {
                last7_load: 0.0,
                prev7_load: 0.0,
                delta_pct: None,
                label: RecoveryLabel::InsufficientData,
            };
        }

        let last7_load: f64 = daily[daily.len() - 7..].iter().map(|day| day.load).sum();
        let prev7_load: f64 = daily[daily.len() - 14..daily.len() - 7]
            .iter()
            .map(|day| day.load)
            .sum();

        let (label, delta_pct) = if last7_load == 0.0 && prev7_load == 0.0 {
            (RecoveryLabel::InsufficientData, None)
        } else if prev7_load == 0.0 {
            (RecoveryLabel::RecentlyStarted, None)
        } else {
            let ratio = last7_load / prev7_load;
            let delta = (last7_load - prev7_load) / prev7_load * 100.0;
            let label = if ratio >= config.high_load_ratio {
                RecoveryLabel::ConsiderRest
            } else if ratio <= config.low_load_ratio {
                RecoveryLabel::Deload
            } else {
                RecoveryLabel::Balanced
            };
            (label, Some(delta))
        };

        RecoveryReport {
            last7_load,
            prev7_load,
            delta_pct,
            label,
        }
    }
}
