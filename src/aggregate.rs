//! Workout aggregation
//!
//! Buckets the raw history snapshot into per-day and per-week aggregates and
//! collects the unbounded all-time totals. The snapshot may arrive in any
//! order with duplicate or overlapping dates; bucketing only looks at each
//! record's calendar day relative to the injected reference time.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::load::TrainingLoadModel;
use crate::types::{
    AllTimeTotals, DailyBucket, ExerciseFrequency, QualityFlag, WeeklyBucket, WorkoutRecord,
};

/// Everything the classifiers consume, derived in one pass over the snapshot
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Zero-filled daily buckets, oldest first, covering the full window
    pub daily: Vec<DailyBucket>,
    /// Fixed 7-day weekly buckets ending "today", oldest first
    pub weekly: Vec<WeeklyBucket>,
    /// All-time totals, unbounded by the window
    pub totals: AllTimeTotals,
    /// Per-exercise appearance counts across the full history,
    /// in first-encountered order
    pub exercise_frequency: Vec<ExerciseFrequency>,
    /// Data-quality issues observed while scanning the snapshot
    pub quality: Vec<QualityFlag>,
}

/// Aggregator turning a snapshot into daily/weekly buckets and totals
pub struct Aggregator;

impl Aggregator {
    /// Aggregate a snapshot relative to the injected reference time
    pub fn aggregate(
        records: &[WorkoutRecord],
        now: DateTime<Utc>,
        config: &EngineConfig,
    ) -> Aggregation {
        let today = now.date_naive();
        let window_days = config.effective_window_days();

        let daily = build_daily_buckets(records, today, window_days);
        let weekly = build_weekly_buckets(&daily, config.analysis_weeks);
        let totals = build_totals(records);
        let exercise_frequency = build_exercise_frequency(records);
        let quality = collect_quality_flags(records);

        debug!(
            workouts = totals.workouts,
            window_days,
            weeks = weekly.len(),
            "aggregated workout snapshot"
        );

        Aggregation {
            daily,
            weekly,
            totals,
            exercise_frequency,
            quality,
        }
    }
}

/// Build one zero-filled bucket per calendar day in
/// `[today - window_days + 1, today]`, oldest first.
fn build_daily_buckets(
    records: &[WorkoutRecord],
    today: NaiveDate,
    window_days: u32,
) -> Vec<DailyBucket> {
    let window_days = window_days as i64;
    let start = today - Duration::days(window_days - 1);

    let mut buckets: Vec<DailyBucket> = (0..window_days)
        .map(|offset| DailyBucket::empty(start + Duration::days(offset)))
        .collect();

    for record in records {
        let day = record.date.date_naive();
        let offset = (day - start).num_days();
        if offset < 0 || offset >= window_days {
            continue;
        }
        let bucket = &mut buckets[offset as usize];
        bucket.workout_count += 1;
        bucket.set_count += record.set_count();
        bucket.load += TrainingLoadModel::session_load(record);
    }

    buckets
}

/// Collapse daily buckets into fixed 7-day weeks ending on the newest day.
///
/// Week 0 is the oldest; the daily window is guaranteed to cover
/// `weeks * 7` days by `EngineConfig::effective_window_days`.
fn build_weekly_buckets(daily: &[DailyBucket], weeks: u32) -> Vec<WeeklyBucket> {
    let mut weekly: Vec<WeeklyBucket> = daily
        .rchunks(7)
        .take(weeks as usize)
        .map(|chunk| WeeklyBucket {
            week_index: 0,
            workout_count: chunk.iter().map(|day| day.workout_count).sum(),
            load: chunk.iter().map(|day| day.load).sum(),
        })
        .collect();

    // rchunks walks newest-first; flip to oldest-first and index
    weekly.reverse();
    for (index, week) in weekly.iter_mut().enumerate() {
        week.week_index = index as u32;
    }
    weekly
}

/// All-time totals, unbounded by any window
fn build_totals(records: &[WorkoutRecord]) -> AllTimeTotals {
    let workouts = records.len() as u32;
    let sets: u32 = records.iter().map(WorkoutRecord::set_count).sum();
    let avg_sets_per_workout = if workouts > 0 {
        round_one_decimal(f64::from(sets) / f64::from(workouts))
    } else {
        0.0
    };

    AllTimeTotals {
        workouts,
        sets,
        avg_sets_per_workout,
    }
}

/// Count how often each exercise appears across the full history.
///
/// The returned list preserves first-encountered order so that a later
/// stable sort breaks frequency ties deterministically.
fn build_exercise_frequency(records: &[WorkoutRecord]) -> Vec<ExerciseFrequency> {
    let mut frequency: Vec<ExerciseFrequency> = Vec::new();

    for record in records {
        for item in &record.items {
            let name = item.exercise.name();
            match frequency.iter_mut().find(|entry| entry.name == name) {
                Some(entry) => entry.count += 1,
                None => frequency.push(ExerciseFrequency {
                    name: name.to_string(),
                    count: 1,
                }),
            }
        }
    }

    frequency
}

/// Scan for malformed values and unresolved references.
///
/// Malformed sets are clamped at load time, never rejected; this only
/// surfaces that it happened.
fn collect_quality_flags(records: &[WorkoutRecord]) -> Vec<QualityFlag> {
    let mut flags = Vec::new();

    let clamped = records
        .iter()
        .flat_map(|record| record.items.iter())
        .flat_map(|item| item.sets.iter())
        .filter(|set| TrainingLoadModel::set_out_of_range(set))
        .count();
    if clamped > 0 {
        warn!(clamped, "clamped out-of-range set values");
        flags.push(QualityFlag::ClampedSetValues);
    }

    let unresolved = records
        .iter()
        .flat_map(|record| record.items.iter())
        .filter(|item| !item.exercise.is_resolved())
        .count();
    if unresolved > 0 {
        warn!(unresolved, "exercise references without catalog metadata");
        flags.push(QualityFlag::UnresolvedExercise);
    }

    flags
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
