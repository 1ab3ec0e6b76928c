//! Error types for component operations.

use thiserror::Error;
use vc_fluids::FluidError;
use vc_graph::PortName;

/// Errors that can occur during component evaluation or parameter checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// The current port states lie outside the model's domain.
    #[error("Out of domain: {what}")]
    InvalidState { what: String },

    /// A parameter is non-physical (configuration error).
    #[error("Invalid parameter: {what}")]
    InvalidParam { what: String },

    /// The solver did not supply a state for a port the model reads.
    #[error("No state supplied for port {port}")]
    MissingPort { port: PortName },

    #[error("Fluid property error: {message}")]
    Fluid { message: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    pub(crate) fn invalid_state(what: impl Into<String>) -> Self {
        ComponentError::InvalidState { what: what.into() }
    }

    pub(crate) fn invalid_param(what: impl Into<String>) -> Self {
        ComponentError::InvalidParam { what: what.into() }
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, ComponentError::InvalidState { .. })
    }
}

impl From<FluidError> for ComponentError {
    fn from(e: FluidError) -> Self {
        if e.is_invalid_state() {
            ComponentError::InvalidState {
                what: e.to_string(),
            }
        } else {
            ComponentError::Fluid {
                message: e.to_string(),
            }
        }
    }
}
