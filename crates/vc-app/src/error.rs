//! Error types for the vc-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides one error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read configuration file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown demo: {0}")]
    UnknownDemo(String),

    #[error("Compilation failed: {0}")]
    Compile(String),

    #[error("Property error: {0}")]
    Fluid(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Not converged after {iterations} iterations (max residual {max_residual:.3e})")]
    NotConverged {
        iterations: usize,
        max_residual: f64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for vc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<vc_project::ProjectError> for AppError {
    fn from(err: vc_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<vc_solver::SolverError> for AppError {
    fn from(err: vc_solver::SolverError) -> Self {
        match err {
            vc_solver::SolverError::FailedToConverge {
                iterations,
                max_residual,
                ..
            } => AppError::NotConverged {
                iterations,
                max_residual,
            },
            other => AppError::Solver(other.to_string()),
        }
    }
}

impl From<vc_fluids::FluidError> for AppError {
    fn from(err: vc_fluids::FluidError) -> Self {
        AppError::Fluid(err.to_string())
    }
}
