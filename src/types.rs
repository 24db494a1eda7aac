//! Core types for the Coach-Fit insight pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: the workout history snapshot, intermediate aggregates, and the
//! final insight report.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fallback muscle-group label for exercises with no resolvable group
pub const UNKNOWN_MUSCLE_GROUP: &str = "Other";

/// Fallback exercise name for unresolved references
pub const UNKNOWN_EXERCISE_NAME: &str = "Exercise";

/// Reference to an exercise, either unresolved (bare id) or resolved with
/// its catalog fields.
///
/// The persistence layer sometimes returns a bare id and sometimes a
/// populated exercise object; the adapter collapses both into this variant
/// so that everything downstream only ever sees resolved strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExerciseRef {
    /// Fully resolved exercise with catalog metadata
    Resolved {
        id: String,
        name: String,
        /// May be absent in the catalog; treated as "Other"
        muscle_group: Option<String>,
    },
    /// Bare exercise id, not yet resolved against the catalog
    Reference(String),
}

impl ExerciseRef {
    /// Display name of the exercise, or the fallback for bare references
    pub fn name(&self) -> &str {
        match self {
            ExerciseRef::Resolved { name, .. } => name,
            ExerciseRef::Reference(_) => UNKNOWN_EXERCISE_NAME,
        }
    }

    /// Muscle-group string, or the fallback when unresolved or absent
    pub fn muscle_group(&self) -> &str {
        match self {
            ExerciseRef::Resolved {
                muscle_group: Some(group),
                ..
            } => group,
            _ => UNKNOWN_MUSCLE_GROUP,
        }
    }

    /// Whether this reference carries catalog metadata
    pub fn is_resolved(&self) -> bool {
        matches!(self, ExerciseRef::Resolved { .. })
    }
}

/// A single logged set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    /// Repetition count
    pub reps: u32,
    /// Weight moved; 0 for bodyweight work
    #[serde(default)]
    pub weight: f64,
    /// Rate of Perceived Exertion, 1-10; absent sets assume a moderate 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
}

/// One exercise entry within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutItem {
    /// Exercise performed
    pub exercise: ExerciseRef,
    /// Sets logged for this exercise
    pub sets: Vec<SetEntry>,
}

/// A logged workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Record identifier from the persistence layer
    pub id: String,
    /// When the workout happened
    pub date: DateTime<Utc>,
    /// Exercises performed
    pub items: Vec<WorkoutItem>,
    /// Free-text session notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutRecord {
    /// Total number of sets across all items
    pub fn set_count(&self) -> u32 {
        self.items.iter().map(|item| item.sets.len() as u32).sum()
    }
}

/// Per-day aggregate over the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Calendar day this bucket covers
    pub date: NaiveDate,
    /// Workouts logged on this day
    pub workout_count: u32,
    /// Sets logged on this day
    pub set_count: u32,
    /// Summed session load for this day
    pub load: f64,
}

impl DailyBucket {
    /// An empty bucket for a day with no logged training
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            workout_count: 0,
            set_count: 0,
            load: 0.0,
        }
    }
}

/// Per-week aggregate; weeks are fixed 7-day buckets ending "today"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// Week position, 0 = oldest in the window
    pub week_index: u32,
    /// Workouts logged during this week
    pub workout_count: u32,
    /// Summed session load for this week
    pub load: f64,
}

/// Broad anatomical category used for balance assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuscleCategory {
    #[serde(rename = "Upper Body")]
    UpperBody,
    #[serde(rename = "Lower Body")]
    LowerBody,
    Core,
    Cardio,
    Other,
}

impl MuscleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleCategory::UpperBody => "Upper Body",
            MuscleCategory::LowerBody => "Lower Body",
            MuscleCategory::Core => "Core",
            MuscleCategory::Cardio => "Cardio",
            MuscleCategory::Other => "Other",
        }
    }

    /// All categories in report order
    pub fn all() -> [MuscleCategory; 5] {
        [
            MuscleCategory::UpperBody,
            MuscleCategory::LowerBody,
            MuscleCategory::Core,
            MuscleCategory::Cardio,
            MuscleCategory::Other,
        ]
    }
}

/// Set volume attributed to one muscle category within the balance window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleVolume {
    /// Category the sets were bucketed into
    pub category: MuscleCategory,
    /// Sets logged for this category in the window
    pub set_count: u32,
}

/// Descriptive label for weekly training consistency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyLabel {
    #[serde(rename = "very consistent")]
    VeryConsistent,
    #[serde(rename = "moderately consistent")]
    ModeratelyConsistent,
    #[serde(rename = "inconsistent")]
    Inconsistent,
    #[serde(rename = "insufficient data")]
    InsufficientData,
}

impl ConsistencyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsistencyLabel::VeryConsistent => "very consistent",
            ConsistencyLabel::ModeratelyConsistent => "moderately consistent",
            ConsistencyLabel::Inconsistent => "inconsistent",
            ConsistencyLabel::InsufficientData => "insufficient data",
        }
    }
}

/// Consistency assessment over the trailing weekly window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Normalized 0-100 score; null when every week in the window is empty
    pub score: Option<u32>,
    /// Mean workouts per week over the window
    pub avg_per_week: f64,
    /// Descriptive label
    pub label: ConsistencyLabel,
}

/// Direction of the weekly workout-count trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Increasing => "increasing",
            TrendLabel::Decreasing => "decreasing",
            TrendLabel::Stable => "stable",
        }
    }
}

/// Linear trend over weekly workout counts with a next-week projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Least-squares slope in workouts per week
    pub slope: f64,
    /// Direction classification
    pub label: TrendLabel,
    /// Projected workout count for the coming week
    pub projected_next_week: u32,
}

/// Load-change classification comparing the trailing week to the one before
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryLabel {
    #[serde(rename = "load much higher than prior week, consider rest")]
    ConsiderRest,
    #[serde(rename = "load much lower, likely deload/recovery")]
    Deload,
    #[serde(rename = "load stable, recovery balanced")]
    Balanced,
    #[serde(rename = "recently started training, increase gradually")]
    RecentlyStarted,
    #[serde(rename = "not enough recent training data")]
    InsufficientData,
}

impl RecoveryLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryLabel::ConsiderRest => "load much higher than prior week, consider rest",
            RecoveryLabel::Deload => "load much lower, likely deload/recovery",
            RecoveryLabel::Balanced => "load stable, recovery balanced",
            RecoveryLabel::RecentlyStarted => "recently started training, increase gradually",
            RecoveryLabel::InsufficientData => "not enough recent training data",
        }
    }
}

/// Recovery assessment from trailing vs. preceding 7-day load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryReport {
    /// Summed load over the trailing 7 days
    pub last7_load: f64,
    /// Summed load over the 7 days before that
    pub prev7_load: f64,
    /// Week-over-week load change in percent; null when the prior week is empty
    pub delta_pct: Option<f64>,
    /// Classification
    pub label: RecoveryLabel,
}

/// Balance verdict between upper- and lower-body volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceFlag {
    #[serde(rename = "lower body lagging")]
    LowerLagging,
    #[serde(rename = "upper body lagging")]
    UpperLagging,
    #[serde(rename = "balanced")]
    Balanced,
    #[serde(rename = "insufficient data")]
    InsufficientData,
}

impl BalanceFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceFlag::LowerLagging => "lower body lagging",
            BalanceFlag::UpperLagging => "upper body lagging",
            BalanceFlag::Balanced => "balanced",
            BalanceFlag::InsufficientData => "insufficient data",
        }
    }
}

/// Muscle-balance assessment over the trailing balance window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleBalanceReport {
    /// Set volume per category; all five categories always present
    pub volumes: Vec<MuscleVolume>,
    /// Imbalance verdict
    pub flag: BalanceFlag,
}

/// How often one exercise appears across the full history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseFrequency {
    /// Exercise display name
    pub name: String,
    /// Number of workouts the exercise appears in
    pub count: u32,
}

/// All-time totals, unbounded by any analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllTimeTotals {
    /// Workouts ever logged
    pub workouts: u32,
    /// Sets ever logged
    pub sets: u32,
    /// Mean sets per workout, one decimal
    pub avg_sets_per_workout: f64,
}

impl AllTimeTotals {
    pub fn zero() -> Self {
        Self {
            workouts: 0,
            sets: 0,
            avg_sets_per_workout: 0.0,
        }
    }
}

/// Flag indicating a data-quality issue encountered while deriving the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    /// At least one set carried out-of-range reps/weight/RPE and was clamped
    ClampedSetValues,
    /// At least one exercise reference had no catalog metadata
    UnresolvedExercise,
    /// History too short for the recovery comparison window
    SparseHistory,
}

/// The final structured output combining all derived metrics.
///
/// Every field is always populated; sparse input degrades individual fields
/// to their explicit sentinels rather than dropping them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Weekly-frequency consistency assessment
    pub consistency: ConsistencyReport,
    /// Trailing vs. preceding week load comparison
    pub recovery: RecoveryReport,
    /// Weekly workout-count trend and projection
    pub trend: TrendReport,
    /// Upper/lower/core/cardio volume balance
    pub muscle_balance: MuscleBalanceReport,
    /// Most frequently logged exercises, highest count first
    pub top_exercises: Vec<ExerciseFrequency>,
    /// All-time totals, unbounded by the analysis window
    pub totals: AllTimeTotals,
    /// Data-quality issues encountered during derivation
    pub quality: Vec<QualityFlag>,
    /// Short coaching paragraph; absent when narrative output is disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
}

impl InsightReport {
    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_ref_resolution() {
        let resolved = ExerciseRef::Resolved {
            id: "ex-1".to_string(),
            name: "Bench Press".to_string(),
            muscle_group: Some("Chest".to_string()),
        };
        assert_eq!(resolved.name(), "Bench Press");
        assert_eq!(resolved.muscle_group(), "Chest");
        assert!(resolved.is_resolved());

        let bare = ExerciseRef::Reference("ex-2".to_string());
        assert_eq!(bare.name(), UNKNOWN_EXERCISE_NAME);
        assert_eq!(bare.muscle_group(), UNKNOWN_MUSCLE_GROUP);
        assert!(!bare.is_resolved());
    }

    #[test]
    fn test_exercise_ref_missing_group_falls_back() {
        let no_group = ExerciseRef::Resolved {
            id: "ex-3".to_string(),
            name: "Farmer Carry".to_string(),
            muscle_group: None,
        };
        assert_eq!(no_group.muscle_group(), UNKNOWN_MUSCLE_GROUP);
    }

    #[test]
    fn test_label_serialization_uses_sentinel_phrases() {
        let json = serde_json::to_string(&ConsistencyLabel::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient data\"");

        let json = serde_json::to_string(&RecoveryLabel::ConsiderRest).unwrap();
        assert_eq!(json, "\"load much higher than prior week, consider rest\"");

        let json = serde_json::to_string(&BalanceFlag::LowerLagging).unwrap();
        assert_eq!(json, "\"lower body lagging\"");
    }

    #[test]
    fn test_set_entry_weight_defaults_to_zero() {
        let set: SetEntry = serde_json::from_str(r#"{"reps": 10}"#).unwrap();
        assert_eq!(set.reps, 10);
        assert_eq!(set.weight, 0.0);
        assert!(set.rpe.is_none());
    }

    #[test]
    fn test_workout_set_count() {
        let record = WorkoutRecord {
            id: "w-1".to_string(),
            date: Utc::now(),
            items: vec![
                WorkoutItem {
                    exercise: ExerciseRef::Reference("a".to_string()),
                    sets: vec![
                        SetEntry {
                            reps: 8,
                            weight: 60.0,
                            rpe: Some(7.0),
                        },
                        SetEntry {
                            reps: 8,
                            weight: 60.0,
                            rpe: Some(8.0),
                        },
                    ],
                },
                WorkoutItem {
                    exercise: ExerciseRef::Reference("b".to_string()),
                    sets: vec![SetEntry {
                        reps: 12,
                        weight: 0.0,
                        rpe: None,
                    }],
                },
            ],
            notes: None,
        };
        assert_eq!(record.set_count(), 3);
    }
}
