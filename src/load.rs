//! Training load model
//!
//! Converts individual sets into a unitless scalar load and sums it per
//! session. The heuristic rewards high-rep, high-intensity work:
//!
//! Formula: `reps × (weight if weight > 0 else 1) × (rpe if present else 5)`
//!
//! Zero weight is treated as bodyweight work with factor 1. All inputs are
//! clamped to their valid range before multiplication, so the result is
//! never negative and never involves a division.

use crate::types::{SetEntry, WorkoutRecord};

/// RPE assumed for sets logged without one
pub const DEFAULT_RPE: f64 = 5.0;

/// Load factor standing in for weight on bodyweight sets
pub const BODYWEIGHT_FACTOR: f64 = 1.0;

/// Valid RPE range
pub const RPE_MIN: f64 = 1.0;
pub const RPE_MAX: f64 = 10.0;

/// Scalar load model for sets and sessions
pub struct TrainingLoadModel;

impl TrainingLoadModel {
    /// Load contributed by a single set
    pub fn set_load(set: &SetEntry) -> f64 {
        let reps = f64::from(set.reps);
        let weight = if set.weight > 0.0 {
            set.weight
        } else {
            BODYWEIGHT_FACTOR
        };
        let rpe = set
            .rpe
            .map_or(DEFAULT_RPE, |value| value.clamp(RPE_MIN, RPE_MAX));

        reps * weight * rpe
    }

    /// Summed load over every set in a workout
    pub fn session_load(record: &WorkoutRecord) -> f64 {
        record
            .items
            .iter()
            .flat_map(|item| item.sets.iter())
            .map(Self::set_load)
            .sum()
    }

    /// Whether a set carries values outside their valid range.
    ///
    /// Such sets are clamped rather than rejected; callers use this to
    /// surface a data-quality flag on the report.
    pub fn set_out_of_range(set: &SetEntry) -> bool {
        if set.weight < 0.0 {
            return true;
        }
        match set.rpe {
            Some(rpe) => !(RPE_MIN..=RPE_MAX).contains(&rpe),
            None => false,
        }
    }
}
