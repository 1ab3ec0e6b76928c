//! Solve execution service.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;
use vc_fluids::PropertyProvider;
use vc_project::schema::Project;
use vc_solver::{SolveReport, System};

use crate::compile::compile_system;
use crate::error::AppResult;
use crate::metrics::{CycleMetrics, compute_cycle_metrics};

/// Options for running a configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// After converging, seed the guesses from the solution and solve again.
    pub warm_restart: bool,
}

/// A solved system with its solve reports and derived metrics.
pub struct RunResponse {
    pub system: System,
    pub report: SolveReport,
    pub warm_report: Option<SolveReport>,
    pub metrics: CycleMetrics,
    pub compile_time_s: f64,
    pub solve_time_s: f64,
}

/// Initialize and solve `system` once.
pub fn run_system(system: &mut System) -> AppResult<SolveReport> {
    system.initialize()?;
    let report = system.run()?;
    info!(
        system = system.id(),
        iterations = report.iterations,
        max_residual = report.max_residual,
        "converged"
    );
    Ok(report)
}

/// Compile, solve, and evaluate the cycle metrics of a configuration.
pub fn run_project(
    project: &Project,
    props: Arc<dyn PropertyProvider>,
    options: &RunOptions,
) -> AppResult<RunResponse> {
    let compile_start = Instant::now();
    let mut system = compile_system(project, props)?;
    let compile_time_s = compile_start.elapsed().as_secs_f64();
    info!(
        system = system.id(),
        unknowns = system.unknown_count(),
        equations = system.equation_count(),
        "compiled"
    );

    let solve_start = Instant::now();
    let report = run_system(&mut system)?;
    let warm_report = if options.warm_restart {
        system.reseed_from_current();
        Some(run_system(&mut system)?)
    } else {
        None
    };
    let solve_time_s = solve_start.elapsed().as_secs_f64();

    let metrics = compute_cycle_metrics(&system, &project.report)?;

    Ok(RunResponse {
        system,
        report,
        warm_report,
        metrics,
        compile_time_s,
        solve_time_s,
    })
}
