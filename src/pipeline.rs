//! Pipeline orchestration
//!
//! This module provides the public API for the insight engine. It runs the
//! full pipeline from a workout history snapshot to a finished report:
//! aggregation → consistency/trend/recovery/balance classification →
//! composition.
//!
//! The pipeline is a pure function of `(snapshot, reference time, config)`:
//! it performs no I/O, holds no cross-call state, and two invocations over
//! the same inputs produce byte-identical reports.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::adapter::SnapshotAdapter;
use crate::aggregate::Aggregator;
use crate::balance::MuscleBalanceClassifier;
use crate::composer::{InsightComposer, NarrativeGenerator};
use crate::config::EngineConfig;
use crate::consistency::ConsistencyAnalyzer;
use crate::error::EngineError;
use crate::recovery::RecoveryClassifier;
use crate::trend::TrendEstimator;
use crate::types::{InsightReport, WorkoutRecord};

/// Derive a full insight report with default configuration.
///
/// # Arguments
/// * `records` - Workout history snapshot, in any order
/// * `now` - Injected reference time; "today" for all window bucketing
///
/// # Example
/// ```ignore
/// let report = derive_insights(&records, Utc::now());
/// println!("{}", report.to_json_pretty()?);
/// ```
pub fn derive_insights(records: &[WorkoutRecord], now: DateTime<Utc>) -> InsightReport {
    InsightEngine::new().derive(records, now)
}

/// Configured engine wrapping the pure pipeline.
///
/// Holds only configuration; every derivation is independent and
/// reentrant, so one engine can serve any number of concurrent callers.
pub struct InsightEngine {
    config: EngineConfig,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with default thresholds
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create an engine with specific thresholds
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline over a typed snapshot.
    pub fn derive(&self, records: &[WorkoutRecord], now: DateTime<Utc>) -> InsightReport {
        // Stage 1: Bucket the snapshot into daily/weekly aggregates
        let aggregation = Aggregator::aggregate(records, now, &self.config);

        // Stage 2: Run the classifiers over the aggregates
        let consistency = ConsistencyAnalyzer::analyze(&aggregation.weekly, &self.config.consistency);
        let trend = TrendEstimator::estimate(&aggregation.weekly, &self.config.trend);
        let recovery = RecoveryClassifier::classify(&aggregation.daily, &self.config.recovery);
        let muscle_balance = MuscleBalanceClassifier::classify(records, now, &self.config.balance);

        debug!(
            consistency = consistency.label.as_str(),
            trend = trend.label.as_str(),
            recovery = recovery.label.as_str(),
            balance = muscle_balance.flag.as_str(),
            "classified workout history"
        );

        // Stage 3: Compose the report
        InsightComposer::compose(
            &aggregation,
            consistency,
            trend,
            recovery,
            muscle_balance,
            &self.config,
        )
    }

    /// Run the pipeline and let an external collaborator rewrite the
    /// summary paragraph. Collaborator failure leaves the template
    /// summary in place.
    pub fn derive_with_narrative(
        &self,
        records: &[WorkoutRecord],
        now: DateTime<Utc>,
        generator: &dyn NarrativeGenerator,
    ) -> InsightReport {
        let report = self.derive(records, now);
        InsightComposer::with_narrative(report, generator)
    }

    /// Parse a persistence-layer JSON snapshot and run the pipeline.
    pub fn derive_from_json(
        &self,
        snapshot_json: &str,
        now: DateTime<Utc>,
    ) -> Result<InsightReport, EngineError> {
        let records = SnapshotAdapter::parse(snapshot_json)?;
        Ok(self.derive(&records, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BalanceFlag, ConsistencyLabel, ExerciseRef, RecoveryLabel, SetEntry, WorkoutItem,
    };
    use chrono::{Duration, TimeZone};

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
    }

    fn make_workout(days_ago: i64, group: &str, sets: u32) -> WorkoutRecord {
        WorkoutRecord {
            id: format!("w-{days_ago}-{group}"),
            date: reference_now() - Duration::days(days_ago),
            items: vec![WorkoutItem {
                exercise: ExerciseRef::Resolved {
                    id: format!("ex-{group}"),
                    name: format!("{group} Builder"),
                    muscle_group: Some(group.to_string()),
                },
                sets: vec![
                    SetEntry {
                        reps: 8,
                        weight: 60.0,
                        rpe: Some(7.0),
                    };
                    sets as usize
                ],
            }],
            notes: None,
        }
    }

    /// Two workouts a week for 8 weeks, alternating chest and legs
    fn steady_history() -> Vec<WorkoutRecord> {
        let mut records = Vec::new();
        for week in 0..8 {
            records.push(make_workout(week * 7 + 1, "Chest", 4));
            records.push(make_workout(week * 7 + 4, "Legs", 4));
        }
        records
    }

    #[test]
    fn test_empty_snapshot_fully_populated_report() {
        let report = derive_insights(&[], reference_now());

        assert_eq!(report.totals.workouts, 0);
        assert_eq!(report.consistency.score, None);
        assert_eq!(report.consistency.label, ConsistencyLabel::InsufficientData);
        assert_eq!(report.recovery.label, RecoveryLabel::InsufficientData);
        assert_eq!(report.muscle_balance.flag, BalanceFlag::InsufficientData);
        assert!(report.top_exercises.is_empty());
        assert!(report.summary_text.is_some());
    }

    #[test]
    fn test_steady_history_end_to_end() {
        let report = derive_insights(&steady_history(), reference_now());

        assert_eq!(report.totals.workouts, 16);
        // 2/week against a target of 3 -> score 67
        assert_eq!(report.consistency.score, Some(67));
        assert_eq!(
            report.consistency.label,
            ConsistencyLabel::ModeratelyConsistent
        );
        assert_eq!(report.recovery.label, RecoveryLabel::Balanced);
        assert_eq!(report.muscle_balance.flag, BalanceFlag::Balanced);
        assert_eq!(report.top_exercises.len(), 2);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let records = steady_history();
        let now = reference_now();

        let first = derive_insights(&records, now).to_json().unwrap();
        let second = derive_insights(&records, now).to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_order_does_not_matter() {
        let records = steady_history();
        let mut shuffled = records.clone();
        shuffled.reverse();

        let a = derive_insights(&records, reference_now());
        let b = derive_insights(&shuffled, reference_now());

        assert_eq!(a.consistency, b.consistency);
        assert_eq!(a.recovery, b.recovery);
        assert_eq!(a.trend, b.trend);
        assert_eq!(a.muscle_balance, b.muscle_balance);
        assert_eq!(a.totals, b.totals);
    }

    #[test]
    fn test_derive_from_json_snapshot() {
        let json = r#"[{
            "_id": "w-1",
            "date": "2024-03-14",
            "items": [{
                "exerciseId": { "_id": "ex", "name": "Squat", "muscleGroup": "Legs" },
                "sets": [ { "reps": 5, "weight": 100, "rpe": 8 } ]
            }]
        }]"#;

        let engine = InsightEngine::new();
        let report = engine.derive_from_json(json, reference_now()).unwrap();

        assert_eq!(report.totals.workouts, 1);
        assert_eq!(report.top_exercises[0].name, "Squat");
        assert_eq!(report.recovery.label, RecoveryLabel::RecentlyStarted);
    }

    #[test]
    fn test_report_serializes_with_sentinels() {
        let report = derive_insights(&[], reference_now());
        let json: serde_json::Value =
            serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["consistency"]["score"], serde_json::Value::Null);
        assert_eq!(json["consistency"]["label"], "insufficient data");
        assert_eq!(json["recovery"]["label"], "not enough recent training data");
    }

    #[test]
    fn test_heavy_recent_week_suggests_rest() {
        let mut records = steady_history();
        // pile extra volume into the trailing week
        for _ in 0..4 {
            records.push(make_workout(2, "Chest", 6));
        }
        let report = derive_insights(&records, reference_now());

        assert_eq!(report.recovery.label, RecoveryLabel::ConsiderRest);
        assert!(report.recovery.delta_pct.unwrap() > 0.0);
    }
}
