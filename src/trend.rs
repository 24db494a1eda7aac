//! Weekly trend estimation
//!
//! Fits an ordinary least-squares line to the trailing weekly workout counts
//! and projects the next week. This is a local linear extrapolation, not a
//! forecasting model; callers must not over-interpret its precision.

use crate::config::TrendConfig;
use crate::types::{TrendLabel, TrendReport, WeeklyBucket};

/// Trend estimator over weekly workout counts, oldest to newest
pub struct TrendEstimator;

impl TrendEstimator {
    /// Fit the trend line and classify its direction.
    pub fn estimate(weekly: &[WeeklyBucket], config: &TrendConfig) -> TrendReport {
        let counts: Vec<f64> = weekly
            .iter()
            .map(|week| f64::from(week.workout_count))
            .collect();

        let slope = least_squares_slope(&counts);

        let label = if slope > config.stable_band {
            TrendLabel::Increasing
        } else if slope < -config.stable_band {
            TrendLabel::Decreasing
        } else {
            TrendLabel::Stable
        };

        let last = counts.last().copied().unwrap_or(0.0);
        let projected_next_week = (last + slope).round().max(0.0) as u32;

        TrendReport {
            slope,
            label,
            projected_next_week,
        }
    }
}

/// Closed-form OLS slope against the index sequence `0..n-1`.
///
/// Formula: `Σ(x-x̄)(y-ȳ) / Σ(x-x̄)²`, 0 when the denominator is 0 (n ≤ 1).
fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (index, &value) in values.iter().enumerate() {
        let dx = index as f64 - x_mean;
        numerator += dx * (value - y_mean);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_weekly(counts: &[u32]) -> Vec<WeeklyBucket> {
        counts
            .iter()
            .enumerate()
            .map(|(index, &count)| WeeklyBucket {
                week_index: index as u32,
                workout_count: count,
                load: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_flat_counts_are_stable_with_zero_slope() {
        let weekly = make_weekly(&[3, 3, 3, 3, 3, 3, 3, 3]);
        let report = TrendEstimator::estimate(&weekly, &TrendConfig::default());

        assert_eq!(report.slope, 0.0);
        assert_eq!(report.label, TrendLabel::Stable);
        assert_eq!(report.projected_next_week, 3);
    }

    #[test]
    fn test_mixed_counts_within_stable_band() {
        let weekly = make_weekly(&[3, 3, 2, 4, 3, 3, 2, 4]);
        let report = TrendEstimator::estimate(&weekly, &TrendConfig::default());

        // slope = 2/42
        assert!((report.slope - 1.0 / 21.0).abs() < 1e-9);
        assert_eq!(report.label, TrendLabel::Stable);
        assert_eq!(report.projected_next_week, 4);
    }

    #[test]
    fn test_rising_counts_classified_increasing() {
        let weekly = make_weekly(&[1, 1, 2, 2, 3, 3, 4, 4]);
        let report = TrendEstimator::estimate(&weekly, &TrendConfig::default());

        assert!(report.slope > 0.3);
        assert_eq!(report.label, TrendLabel::Increasing);
        assert!(report.projected_next_week >= 4);
    }

    #[test]
    fn test_falling_counts_classified_decreasing() {
        let weekly = make_weekly(&[5, 4, 4, 3, 3, 2, 1, 1]);
        let report = TrendEstimator::estimate(&weekly, &TrendConfig::default());

        assert!(report.slope < -0.3);
        assert_eq!(report.label, TrendLabel::Decreasing);
    }

    #[test]
    fn test_projection_never_negative() {
        let weekly = make_weekly(&[8, 6, 4, 2, 1, 0, 0, 0]);
        let report = TrendEstimator::estimate(&weekly, &TrendConfig::default());

        assert!(report.slope < 0.0);
        assert_eq!(report.projected_next_week, 0);
    }

    #[test]
    fn test_single_week_has_zero_slope() {
        let weekly = make_weekly(&[4]);
        let report = TrendEstimator::estimate(&weekly, &TrendConfig::default());

        assert_eq!(report.slope, 0.0);
        assert_eq!(report.label, TrendLabel::Stable);
        assert_eq!(report.projected_next_week, 4);
    }

    #[test]
    fn test_empty_window_projects_zero() {
        let report = TrendEstimator::estimate(&[], &TrendConfig::default());

        assert_eq!(report.slope, 0.0);
        assert_eq!(report.projected_next_week, 0);
    }

    #[test]
    fn test_slope_at_band_edge_is_stable() {
        // classification requires slope strictly beyond the band
        let config = TrendConfig { stable_band: 1.0 / 6.0 };
        let weekly = make_weekly(&[2, 2, 2, 2, 2, 2, 2, 4]);
        let report = TrendEstimator::estimate(&weekly, &config);

        // slope = 7/42 = 1/6, exactly at the band edge
        assert!((report.slope - 1.0 / 6.0).abs() < 1e-9);
        assert_eq!(report.label, TrendLabel::Stable);
    }
}
