//! Coach-Fit Insight - Training analytics engine for logged workouts
//!
//! The engine turns a raw workout history snapshot into coaching-relevant
//! statistics through a deterministic pipeline: snapshot adaptation →
//! aggregation → classification (consistency, trend, recovery, muscle
//! balance) → insight composition.
//!
//! The pipeline is pure and stateless: it performs no I/O, the reference
//! time is injected, and recomputing over an identical snapshot yields a
//! byte-identical report.

pub mod adapter;
pub mod aggregate;
pub mod balance;
pub mod composer;
pub mod config;
pub mod consistency;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod recovery;
pub mod trend;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use adapter::SnapshotAdapter;
pub use composer::{InsightComposer, NarrativeGenerator};
pub use config::EngineConfig;
pub use error::EngineError;
pub use pipeline::{derive_insights, InsightEngine};
pub use types::{InsightReport, WorkoutRecord};

/// Engine version embedded in tooling output
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for tooling output
pub const PRODUCER_NAME: &str = "coachfit-insight";
