//! Steady-state solver for vapour-compression cycles.
//!
//! The unknowns are the (mdot, p, h) states of every junction. Each
//! component contributes target equations on its port states plus internal
//! closures; the system drives all residuals to zero with a damped
//! Newton / Gauss-Newton iteration on scaled variables.
//!
//! Lifecycle: `SystemBuilder::build` -> `System::initialize` -> `System::run`.

pub mod config;
pub mod error;
pub mod jacobian;
pub mod newton;
pub(crate) mod residual;
pub mod system;

pub use config::{SolverConfig, SystemConfig};
pub use error::{SolverError, SolverResult};
pub use newton::{NewtonOutcome, newton_solve};
pub use system::{JunctionView, SolveReport, SolveStatus, System, SystemBuilder};
