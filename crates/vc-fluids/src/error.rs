//! Fluid property errors.

use crate::fluid::Fluid;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// The input pair does not describe a valid state of the fluid, or the
    /// requested output is undefined there.
    #[error("Invalid state for {fluid}: {what}")]
    InvalidState { fluid: Fluid, what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The backend does not model this fluid or property.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl FluidError {
    pub(crate) fn invalid_state(fluid: Fluid, what: impl Into<String>) -> Self {
        FluidError::InvalidState {
            fluid,
            what: what.into(),
        }
    }

    /// True for errors that mean "this state is outside the fluid's domain".
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, FluidError::InvalidState { .. })
    }
}
