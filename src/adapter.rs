//! Snapshot adaptation
//!
//! Parses the persistence collaborator's JSON into engine types. The store
//! serves workouts in a loose shape: Mongo-style `_id` fields, camelCase
//! keys, date-only or full timestamps, and an exercise field that is either
//! a bare id or a populated catalog object. All of that is collapsed here,
//! once, so the rest of the pipeline only sees resolved records.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::error::EngineError;
use crate::types::{ExerciseRef, SetEntry, WorkoutItem, WorkoutRecord};

/// Raw workout as served by the persistence layer
#[derive(Debug, Deserialize)]
struct RawWorkout {
    #[serde(alias = "_id")]
    id: String,
    date: String,
    #[serde(default)]
    items: Vec<RawItem>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "exerciseId")]
    exercise: RawExerciseRef,
    #[serde(default)]
    sets: Vec<RawSet>,
}

/// The store's id-or-object union for exercise references
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawExerciseRef {
    Object {
        #[serde(alias = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(rename = "muscleGroup", default)]
        muscle_group: Option<String>,
    },
    Id(String),
}

#[derive(Debug, Deserialize)]
struct RawSet {
    reps: i64,
    #[serde(default)]
    weight: f64,
    #[serde(default)]
    rpe: Option<f64>,
}

/// Adapter from persistence JSON to engine records
pub struct SnapshotAdapter;

impl SnapshotAdapter {
    /// Parse a JSON array of workouts
    pub fn parse(json: &str) -> Result<Vec<WorkoutRecord>, EngineError> {
        let raw: Vec<RawWorkout> =
            serde_json::from_str(json).map_err(|e| EngineError::ParseError(e.to_string()))?;
        raw.into_iter().map(adapt_workout).collect()
    }

    /// Parse newline-delimited JSON, one workout per line
    pub fn parse_ndjson(input: &str) -> Result<Vec<WorkoutRecord>, EngineError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let raw: RawWorkout = serde_json::from_str(line)
                    .map_err(|e| EngineError::ParseError(e.to_string()))?;
                adapt_workout(raw)
            })
            .collect()
    }
}

fn adapt_workout(raw: RawWorkout) -> Result<WorkoutRecord, EngineError> {
    let date = parse_date(&raw.date)?;
    let items = raw.items.into_iter().map(adapt_item).collect();

    Ok(WorkoutRecord {
        id: raw.id,
        date,
        items,
        notes: raw.notes,
    })
}

fn adapt_item(raw: RawItem) -> WorkoutItem {
    let exercise = match raw.exercise {
        RawExerciseRef::Object {
            id,
            name: Some(name),
            muscle_group,
        } => ExerciseRef::Resolved {
            id,
            name,
            muscle_group,
        },
        // an object without a name carries no catalog metadata worth keeping
        RawExerciseRef::Object { id, .. } | RawExerciseRef::Id(id) => ExerciseRef::Reference(id),
    };

    let sets = raw.sets.into_iter().map(adapt_set).collect();

    WorkoutItem { exercise, sets }
}

fn adapt_set(raw: RawSet) -> SetEntry {
    if raw.reps < 0 {
        warn!(reps = raw.reps, "negative rep count clamped to 0");
    }
    SetEntry {
        reps: raw.reps.max(0) as u32,
        weight: raw.weight,
        rpe: raw.rpe,
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC)
fn parse_date(raw: &str) -> Result<DateTime<Utc>, EngineError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)));
    }
    Err(EngineError::DateParseError(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot_json() -> &'static str {
        r#"[
            {
                "_id": "6745a1",
                "date": "2024-03-14T18:30:00.000Z",
                "items": [
                    {
                        "exerciseId": {
                            "_id": "ex-bench",
                            "name": "Bench Press",
                            "muscleGroup": "Chest"
                        },
                        "sets": [
                            { "reps": 8, "weight": 60, "rpe": 7 },
                            { "reps": 8, "weight": 60, "rpe": 8 }
                        ]
                    },
                    {
                        "exerciseId": "ex-dangling",
                        "sets": [
                            { "reps": 12 }
                        ]
                    }
                ],
                "notes": "Felt good today"
            },
            {
                "_id": "6745a2",
                "date": "2024-03-12",
                "items": []
            }
        ]"#
    }

    #[test]
    fn test_parse_populated_and_bare_references() {
        let records = SnapshotAdapter::parse(sample_snapshot_json()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "6745a1");
        assert_eq!(first.notes.as_deref(), Some("Felt good today"));

        let resolved = &first.items[0].exercise;
        assert!(resolved.is_resolved());
        assert_eq!(resolved.name(), "Bench Press");
        assert_eq!(resolved.muscle_group(), "Chest");

        let bare = &first.items[1].exercise;
        assert!(!bare.is_resolved());
        assert_eq!(bare.muscle_group(), "Other");
    }

    #[test]
    fn test_date_only_strings_parse_to_midnight_utc() {
        let records = SnapshotAdapter::parse(sample_snapshot_json()).unwrap();
        let day = &records[1];
        assert_eq!(
            day.date,
            Utc.with_ymd_and_hms(2024, 3, 12, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_weight_and_rpe_default() {
        let records = SnapshotAdapter::parse(sample_snapshot_json()).unwrap();
        let set = &records[0].items[1].sets[0];
        assert_eq!(set.reps, 12);
        assert_eq!(set.weight, 0.0);
        assert!(set.rpe.is_none());
    }

    #[test]
    fn test_negative_reps_clamped() {
        let json = r#"[{
            "_id": "w",
            "date": "2024-03-12",
            "items": [{ "exerciseId": "ex", "sets": [{ "reps": -4, "weight": 20 }] }]
        }]"#;
        let records = SnapshotAdapter::parse(json).unwrap();
        assert_eq!(records[0].items[0].sets[0].reps, 0);
    }

    #[test]
    fn test_object_without_name_stays_unresolved() {
        let json = r#"[{
            "_id": "w",
            "date": "2024-03-12",
            "items": [{ "exerciseId": { "_id": "ex-1" }, "sets": [] }]
        }]"#;
        let records = SnapshotAdapter::parse(json).unwrap();
        assert!(!records[0].items[0].exercise.is_resolved());
    }

    #[test]
    fn test_parse_ndjson() {
        let input = concat!(
            r#"{"_id": "a", "date": "2024-03-10", "items": []}"#,
            "\n",
            "\n",
            r#"{"_id": "b", "date": "2024-03-11", "items": []}"#,
            "\n",
        );
        let records = SnapshotAdapter::parse_ndjson(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "b");
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let result = SnapshotAdapter::parse("not valid json");
        assert!(matches!(result, Err(EngineError::ParseError(_))));
    }

    #[test]
    fn test_unparseable_date_is_an_error() {
        let json = r#"[{"_id": "w", "date": "last tuesday", "items": []}]"#;
        let result = SnapshotAdapter::parse(json);
        assert!(matches!(result, Err(EngineError::DateParseError(_))));
    }
}
