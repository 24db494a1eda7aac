//! Muscle-balance classification
//!
//! Buckets windowed set volume into five broad categories via keyword
//! matching on free-text muscle-group strings, then flags upper/lower
//! imbalance. The keyword list is best-effort: the source data carries no
//! canonical taxonomy, so unmapped or ambiguous strings fall back to
//! "Other" rather than being guessed into a bucket.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::config::BalanceConfig;
use crate::types::{BalanceFlag, MuscleBalanceReport, MuscleCategory, MuscleVolume, WorkoutRecord};

/// Keywords mapped per category, matched case-insensitively as substrings.
/// Checked in order; the first hit wins, so the lower-body check precedes
/// the upper-body one and "lower back" lands in Lower Body.
const CARDIO_KEYWORDS: [&str; 2] = ["cardio", "aerobic"];
const CORE_KEYWORDS: [&str; 2] = ["core", "abs"];
const LOWER_KEYWORDS: [&str; 3] = ["leg", "glute", "lower"];
const UPPER_KEYWORDS: [&str; 5] = ["chest", "shoulder", "back", "arm", "upper"];

/// Muscle-balance classifier over the trailing balance window
pub struct MuscleBalanceClassifier;

impl MuscleBalanceClassifier {
    /// Bucket windowed set volume per category and flag imbalance.
    pub fn classify(
        records: &[WorkoutRecord],
        now: DateTime<Utc>,
        config: &BalanceConfig,
    ) -> MuscleBalanceReport {
        let today = now.date_naive();
        let window_days = i64::from(config.window_days);

        let mut counts: HashMap<MuscleCategory, u32> = HashMap::new();

        for record in records {
            let offset = (today - record.date.date_naive()).num_days();
            if offset < 0 || offset >= window_days {
                continue;
            }
            for item in &record.items {
                let category = categorize(item.exercise.muscle_group());
                *counts.entry(category).or_insert(0) += item.sets.len() as u32;
            }
        }

        let volumes: Vec<MuscleVolume> = MuscleCategory::all()
            .iter()
            .map(|&category| MuscleVolume {
                category,
                set_count: counts.get(&category).copied().unwrap_or(0),
            })
            .collect();

        let upper = f64::from(counts.get(&MuscleCategory::UpperBody).copied().unwrap_or(0));
        let lower = f64::from(counts.get(&MuscleCategory::LowerBody).copied().unwrap_or(0));

        // Only judge balance when there is upper/lower volume to compare;
        // zero-volume categories must never trigger a false flag.
        let flag = if upper + lower > 0.0 {
            if lower < upper * config.lagging_ratio {
                BalanceFlag::LowerLagging
            } else if upper < lower * config.lagging_ratio {
                BalanceFlag::UpperLagging
            } else {
                BalanceFlag::Balanced
            }
        } else {
            BalanceFlag::InsufficientData
        };

        MuscleBalanceReport { volumes, flag }
    }
}

/// Map a free-text muscle-group string into a category
fn categorize(muscle_group: &str) -> MuscleCategory {
    let lowered = muscle_group.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|keyword| lowered.contains(keyword));

    if matches(&CARDIO_KEYWORDS) {
        MuscleCategory::Cardio
    } else if matches(&CORE_KEYWORDS) {
        MuscleCategory::Core
    } else if matches(&LOWER_KEYWORDS) {
        MuscleCategory::LowerBody
    } else if matches(&UPPER_KEYWORDS) {
        MuscleCategory::UpperBody
    } else {
        MuscleCategory::Other
    }
}
