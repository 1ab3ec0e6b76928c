//! Error types for solver operations.

use thiserror::Error;
use vc_components::ComponentError;
use vc_fluids::{FluidError, StreamState};
use vc_graph::GraphError;

/// Errors that can occur while configuring or solving a system.
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    /// Malformed graph, bad parameters, underdetermined equation set, a
    /// provider that cannot serve the request, or an invalid lifecycle call.
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    /// A component or property evaluation left its domain, or no finite
    /// Newton step exists. The junctions keep the last accepted iterate.
    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    /// Iteration cap reached or line search stalled.
    ///
    /// `last_iterate` holds the junction states in junction-id order; the
    /// same states remain on the system.
    #[error("Failed to converge after {iterations} iterations (max residual {max_residual:.3e})")]
    FailedToConverge {
        iterations: usize,
        max_residual: f64,
        last_iterate: Vec<StreamState>,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub(crate) fn configuration(what: impl Into<String>) -> Self {
        SolverError::Configuration { what: what.into() }
    }

    pub(crate) fn invalid_state(what: impl Into<String>) -> Self {
        SolverError::InvalidState { what: what.into() }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, SolverError::Configuration { .. })
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, SolverError::InvalidState { .. })
    }
}

impl From<GraphError> for SolverError {
    fn from(e: GraphError) -> Self {
        SolverError::Configuration {
            what: e.to_string(),
        }
    }
}

impl From<ComponentError> for SolverError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::InvalidState { what } => SolverError::InvalidState { what },
            ComponentError::InvalidParam { what } => SolverError::Configuration { what },
            ComponentError::MissingPort { port } => {
                SolverError::configuration(format!("no state supplied for port {port}"))
            }
            // Property failure at a concrete iterate.
            ComponentError::Fluid { message } => SolverError::InvalidState { what: message },
        }
    }
}

impl From<FluidError> for SolverError {
    fn from(e: FluidError) -> Self {
        if e.is_invalid_state() {
            SolverError::invalid_state(e.to_string())
        } else {
            SolverError::configuration(e.to_string())
        }
    }
}
