//! Insight composition
//!
//! Assembles the classifier outputs into the final report, renders the
//! built-in summary paragraph, and optionally consults an external
//! narrative collaborator. The collaborator is strictly optional: any
//! failure is absorbed and the numeric report stands on its own.

use tracing::warn;

use crate::aggregate::Aggregation;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::recovery::MIN_RECOVERY_DAYS;
use crate::types::{
    ConsistencyReport, InsightReport, MuscleBalanceReport, QualityFlag, RecoveryReport,
    TrendReport,
};

/// Guidance shown before any workouts exist, so the report is useful on
/// day one.
const STARTER_GUIDANCE: &str = "Once you log a few workouts, I'll analyze them and suggest \
     how to balance your training. For now, aim for 2-3 full-body or upper/lower sessions \
     per week with at least one rest day in between.";

/// External free-text generator consulted with the structured report.
///
/// Implementations wrap whatever text service the host application uses;
/// the engine itself never performs I/O. The structured report is the
/// prompt payload, never the reverse.
pub trait NarrativeGenerator {
    /// Produce a coaching paragraph from the structured report
    fn generate(&self, report: &InsightReport) -> Result<String, EngineError>;
}

/// Composer producing the final, always-fully-populated report
pub struct InsightComposer;

impl InsightComposer {
    /// Assemble the report from the classifier outputs.
    pub fn compose(
        aggregation: &Aggregation,
        consistency: ConsistencyReport,
        trend: TrendReport,
        recovery: RecoveryReport,
        muscle_balance: MuscleBalanceReport,
        config: &EngineConfig,
    ) -> InsightReport {
        let mut top_exercises = aggregation.exercise_frequency.clone();
        // stable sort keeps first-encountered order on equal counts
        top_exercises.sort_by(|a, b| b.count.cmp(&a.count));
        top_exercises.truncate(config.top_exercise_count);

        let mut quality = aggregation.quality.clone();
        if aggregation.daily.len() < MIN_RECOVERY_DAYS {
            quality.push(QualityFlag::SparseHistory);
        }

        let mut report = InsightReport {
            consistency,
            recovery,
            trend,
            muscle_balance,
            top_exercises,
            totals: aggregation.totals.clone(),
            quality,
            summary_text: None,
        };

        if config.render_summary {
            report.summary_text = Some(render_summary(&report));
        }

        report
    }

    /// Replace the summary paragraph with collaborator-generated text.
    ///
    /// On failure the report is returned unchanged; the collaborator being
    /// down must never cost the caller the numeric report.
    pub fn with_narrative(
        mut report: InsightReport,
        generator: &dyn NarrativeGenerator,
    ) -> InsightReport {
        match generator.generate(&report) {
            Ok(text) => report.summary_text = Some(text),
            Err(error) => {
                warn!(%error, "narrative collaborator unavailable, keeping template summary");
            }
        }
        report
    }
}

/// Render the fixed-template coaching paragraph by substituting the
/// computed labels and numbers. No inference happens here.
pub fn render_summary(report: &InsightReport) -> String {
    if report.totals.workouts == 0 {
        return STARTER_GUIDANCE.to_string();
    }

    let score_part = match report.consistency.score {
        Some(score) => format!("{} (score {score}/100)", report.consistency.label.as_str()),
        None => report.consistency.label.as_str().to_string(),
    };

    format!(
        "You've logged {workouts} workouts with {avg_sets} sets per session on average. \
         Training consistency: {score_part}. Weekly workout count looks {trend}, \
         projecting {projection} sessions next week. Recovery check: {recovery}. \
         Muscle balance: {balance}.",
        workouts = report.totals.workouts,
        avg_sets = report.totals.avg_sets_per_workout,
        trend = report.trend.label.as_str(),
        projection = report.trend.projected_next_week,
        recovery = report.recovery.label.as_str(),
        balance = report.muscle_balance.flag.as_str(),
    )
}
