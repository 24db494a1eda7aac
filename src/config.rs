//! Analysis configuration
//!
//! Every threshold the classifiers apply lives here as a named, serializable
//! parameter with a documented default. The values are policy constants, not
//! statistically fitted boundaries; tests probe behavior exactly at each
//! threshold.

use serde::{Deserialize, Serialize};

/// Default daily-bucket window in days
pub const DEFAULT_WINDOW_DAYS: u32 = 56;

/// Default number of trailing 7-day weeks for consistency and trend analysis
pub const DEFAULT_ANALYSIS_WEEKS: u32 = 8;

/// Consistency scoring parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyConfig {
    /// Target workouts per week the score is normalized against
    pub target_per_week: f64,
    /// Raw score ceiling before display clamping
    pub raw_score_cap: f64,
    /// Display score at or above which training counts as "very consistent"
    pub very_consistent_at: u32,
    /// Display score at or below which training counts as "inconsistent"
    pub inconsistent_at: u32,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            target_per_week: 3.0,
            raw_score_cap: 110.0,
            very_consistent_at: 80,
            inconsistent_at: 40,
        }
    }
}

/// Trend classification parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Slope magnitude below which the weekly count is considered stable
    pub stable_band: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self { stable_band: 0.3 }
    }
}

/// Recovery classification parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Week-over-week load ratio at or above which rest is suggested
    pub high_load_ratio: f64,
    /// Week-over-week load ratio at or below which a deload is assumed
    pub low_load_ratio: f64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            high_load_ratio: 1.3,
            low_load_ratio: 0.7,
        }
    }
}

/// Muscle-balance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Trailing window in days for volume bucketing
    pub window_days: u32,
    /// Fraction of the dominant side below which the other side is lagging
    pub lagging_ratio: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            lagging_ratio: 0.6,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Daily-bucket window; must cover the weekly analysis span
    pub window_days: u32,
    /// Number of trailing 7-day weeks for consistency and trend analysis
    pub analysis_weeks: u32,
    /// How many top exercises the report lists
    pub top_exercise_count: usize,
    /// Whether the composer renders the built-in summary paragraph
    pub render_summary: bool,
    pub consistency: ConsistencyConfig,
    pub trend: TrendConfig,
    pub recovery: RecoveryConfig,
    pub balance: BalanceConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            analysis_weeks: DEFAULT_ANALYSIS_WEEKS,
            top_exercise_count: 5,
            render_summary: true,
            consistency: ConsistencyConfig::default(),
            trend: TrendConfig::default(),
            recovery: RecoveryConfig::default(),
            balance: BalanceConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Days needed so the daily window covers every weekly bucket
    pub fn effective_window_days(&self) -> u32 {
        self.window_days.max(self.analysis_weeks * 7)
    }
}
