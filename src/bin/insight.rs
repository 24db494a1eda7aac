//! Insight CLI - Command-line interface for the Coach-Fit insight engine
//!
//! Commands:
//! - report: Derive an insight report from a workout snapshot
//! - validate: Validate a workout snapshot without deriving insights
//! - schema: Print example input/output shapes

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use serde::Serialize;

use coachfit_insight::adapter::SnapshotAdapter;
use coachfit_insight::pipeline::InsightEngine;
use coachfit_insight::types::WorkoutRecord;
use coachfit_insight::{EngineError, ENGINE_VERSION, PRODUCER_NAME};

/// Insight - Training analytics engine for logged workouts
#[derive(Parser)]
#[command(name = "insight")]
#[command(author = "Coach-Fit")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Derive coaching insights from a workout history snapshot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive an insight report from a workout snapshot
    Report {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,

        /// Reference time as RFC 3339; defaults to the current time
        #[arg(long)]
        now: Option<String>,
    },

    /// Validate a workout snapshot without deriving insights
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print example input/output shapes
    Schema {
        /// Schema to print
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of workouts
    Json,
    /// Newline-delimited JSON (one workout per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Human-readable text
    Text,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Workout snapshot input
    Input,
    /// Insight report output
    Output,
}

#[derive(Debug, Serialize)]
struct CliErrorOut {
    error: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let out = CliErrorOut {
                error: e.to_string(),
            };
            eprintln!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), EngineError> {
    match cli.command {
        Commands::Report {
            input,
            output,
            input_format,
            output_format,
            now,
        } => cmd_report(&input, &output, input_format, output_format, now.as_deref()),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_report(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    now: Option<&str>,
) -> Result<(), EngineError> {
    let records = read_snapshot(input, input_format)?;
    let now = resolve_now(now)?;

    let engine = InsightEngine::new();
    let report = engine.derive(&records, now);

    let rendered = match output_format {
        OutputFormat::Json => report.to_json()?,
        OutputFormat::JsonPretty => report.to_json_pretty()?,
        OutputFormat::Text => render_text_report(&report),
    };

    if output.to_string_lossy() == "-" {
        println!("{rendered}");
    } else {
        fs::write(output, rendered).map_err(|e| EngineError::EncodingError(e.to_string()))?;
    }

    Ok(())
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), EngineError> {
    let records = read_snapshot(input, input_format)?;

    let unresolved = records
        .iter()
        .flat_map(|record| record.items.iter())
        .filter(|item| !item.exercise.is_resolved())
        .count();
    let total_sets: u32 = records.iter().map(WorkoutRecord::set_count).sum();

    if json {
        let report = serde_json::json!({
            "producer": PRODUCER_NAME,
            "version": ENGINE_VERSION,
            "workouts": records.len(),
            "sets": total_sets,
            "unresolved_exercises": unresolved,
        });
        println!("{report}");
    } else {
        println!("workouts: {}", records.len());
        println!("sets: {total_sets}");
        println!("unresolved exercises: {unresolved}");
    }

    Ok(())
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), EngineError> {
    match schema_type {
        SchemaType::Input => println!("{}", sample_input()),
        SchemaType::Output => {
            let engine = InsightEngine::new();
            let report = engine.derive_from_json(sample_input(), resolve_now(None)?)?;
            println!("{}", report.to_json_pretty()?);
        }
    }
    Ok(())
}

fn read_snapshot(input: &Path, format: InputFormat) -> Result<Vec<WorkoutRecord>, EngineError> {
    let data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading snapshot from terminal; pipe a file or press Ctrl-D when done");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| EngineError::ParseError(e.to_string()))?;
        buffer
    } else {
        fs::read_to_string(input).map_err(|e| EngineError::ParseError(e.to_string()))?
    };

    match format {
        InputFormat::Json => SnapshotAdapter::parse(&data),
        InputFormat::Ndjson => SnapshotAdapter::parse_ndjson(&data),
    }
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>, EngineError> {
    match raw {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|timestamp| timestamp.with_timezone(&Utc))
            .map_err(|e| EngineError::DateParseError(e.to_string())),
        None => Ok(Utc::now()),
    }
}

fn render_text_report(report: &coachfit_insight::InsightReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Workouts: {} all time ({} sets, {} per session)",
        report.totals.workouts, report.totals.sets, report.totals.avg_sets_per_workout
    ));

    match report.consistency.score {
        Some(score) => lines.push(format!(
            "Consistency: {} ({score}/100, {:.1} workouts/week)",
            report.consistency.label.as_str(),
            report.consistency.avg_per_week
        )),
        None => lines.push(format!(
            "Consistency: {}",
            report.consistency.label.as_str()
        )),
    }

    lines.push(format!(
        "Trend: {} (slope {:+.2}), next week ~{} sessions",
        report.trend.label.as_str(),
        report.trend.slope,
        report.trend.projected_next_week
    ));

    match report.recovery.delta_pct {
        Some(delta) => lines.push(format!(
            "Recovery: {} ({delta:+.0}% week over week)",
            report.recovery.label.as_str()
        )),
        None => lines.push(format!("Recovery: {}", report.recovery.label.as_str())),
    }

    lines.push(format!(
        "Muscle balance: {}",
        report.muscle_balance.flag.as_str()
    ));
    for volume in &report.muscle_balance.volumes {
        if volume.set_count > 0 {
            lines.push(format!(
                "  {}: {} sets",
                volume.category.as_str(),
                volume.set_count
            ));
        }
    }

    if !report.top_exercises.is_empty() {
        lines.push("Top exercises:".to_string());
        for exercise in &report.top_exercises {
            lines.push(format!("  {} ({}x)", exercise.name, exercise.count));
        }
    }

    if let Some(summary) = &report.summary_text {
        lines.push(String::new());
        lines.push(summary.clone());
    }

    lines.join("\n")
}

fn sample_input() -> &'static str {
    r#"[
  {
    "_id": "6745a1",
    "date": "2025-11-18",
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
      }
    ],
    "notes": "Felt good today"
  }
]"#
}
