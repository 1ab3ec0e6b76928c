//! Shared application service layer for the cycle engine.
//!
//! Turns configuration files into solvable systems, runs them, and derives
//! the cycle metrics and summaries the CLI prints.

pub mod bench;
pub mod compile;
pub mod error;
pub mod metrics;
pub mod project_service;
pub mod run_service;
pub mod summary;

pub use bench::{BenchPoint, bench_project};
pub use compile::{compile_system, default_provider, resolve_enthalpy, resolve_pressure};
pub use error::{AppError, AppResult};
pub use metrics::{CycleMetrics, compute_cycle_metrics};
pub use project_service::{
    Demo, SystemOverview, describe_project, load_project, save_project, validate_project,
};
pub use run_service::{RunOptions, RunResponse, run_project, run_system};
pub use summary::{ComponentSummary, JunctionSummary, RunSummary, summarize};
