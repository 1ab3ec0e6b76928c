//! Graph-specific error types.

use vc_fluids::Fluid;

use crate::graph::PortName;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
///
/// All of these are configuration errors: the graph cannot be solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two components or two junctions share a name.
    DuplicateName { what: &'static str, name: String },

    /// A junction endpoint refers to a component id that doesn't exist.
    InvalidCompRef { junction: String, index: u32 },

    /// A junction endpoint names a port the component doesn't have.
    UnknownPort {
        junction: String,
        component: String,
        port: PortName,
    },

    /// Upstream end is not an outlet, or downstream end is not an inlet.
    DirectionMismatch {
        junction: String,
        component: String,
        port: PortName,
    },

    /// A port is wired to more than one junction.
    PortConnectedTwice { component: String, port: PortName },

    /// A port is not wired to any junction.
    DanglingPort { component: String, port: PortName },

    /// Inlet and outlet of one stream pass carry different fluids.
    FluidMismatch {
        component: String,
        inlet: Fluid,
        outlet: Fluid,
    },

    /// The component graph splits into unconnected parts.
    Disconnected { unreachable: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateName { what, name } => {
                write!(f, "Duplicate {} name '{}'", what, name)
            }
            GraphError::InvalidCompRef { junction, index } => {
                write!(
                    f,
                    "Junction '{}' refers to non-existent component {}",
                    junction, index
                )
            }
            GraphError::UnknownPort {
                junction,
                component,
                port,
            } => write!(
                f,
                "Junction '{}' refers to port {} which component '{}' does not have",
                junction, port, component
            ),
            GraphError::DirectionMismatch {
                junction,
                component,
                port,
            } => write!(
                f,
                "Junction '{}' uses port {} of '{}' in the wrong direction",
                junction, port, component
            ),
            GraphError::PortConnectedTwice { component, port } => {
                write!(f, "Port {} of '{}' is connected twice", port, component)
            }
            GraphError::DanglingPort { component, port } => {
                write!(f, "Port {} of '{}' is not connected", port, component)
            }
            GraphError::FluidMismatch {
                component,
                inlet,
                outlet,
            } => write!(
                f,
                "Component '{}' receives {} but discharges {} on the same stream",
                component, inlet, outlet
            ),
            GraphError::Disconnected { unreachable } => {
                write!(
                    f,
                    "Component '{}' is not connected to the rest of the system",
                    unreachable
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}
