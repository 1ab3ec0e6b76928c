//! Core trait for component models.

use vc_fluids::PropertyProvider;
use vc_graph::PortName;

use crate::error::ComponentResult;
use crate::eval::{Equation, Evaluation, PortStates};

/// A device model in the cycle.
///
/// Implementations are deterministic functions of the port states and their
/// parameters, and never mutate themselves during a solve.
pub trait CycleComponent: Send + Sync {
    /// Ports the device exposes; each must be connected exactly once.
    fn ports(&self) -> &'static [PortName];

    /// Equations this device contributes, fixed for the whole solve.
    fn equations(&self) -> Vec<Equation>;

    /// Check parameters for physical sense (positive areas, efficiencies in (0, 1], ...).
    fn validate(&self) -> ComponentResult<()>;

    /// Evaluate the device at the current port states.
    fn evaluate(
        &self,
        props: &dyn PropertyProvider,
        ports: &PortStates,
    ) -> ComponentResult<Evaluation>;
}
