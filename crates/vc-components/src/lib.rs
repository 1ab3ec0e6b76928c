//! vc-components: device models for the vapour-compression cycle.
//!
//! Every component is a deterministic function of the current port states and
//! its parameters. `evaluate` returns the values the component imposes on its
//! ports (`Target`s), dimensionless internal closures, and a `Performance`
//! record. The solver turns targets and closures into residuals.
//!
//! Models:
//! - `Compressor` with a volumetric/isentropic map or an AHRI-540 polynomial map
//! - `Condenser` (desuperheating, condensing, subcooling zones; air as a parameter)
//! - `Evaporator` (evaporating and superheating zones; air through junctions)
//! - `InternalHeatExchanger` (UA coupling between two refrigerant streams)
//! - `Source` and `Sink` boundaries
//!
//! `ComponentKind` is the tagged union the solver dispatches on.

pub mod boundary;
pub mod common;
pub mod compressor;
pub mod condenser;
pub mod error;
pub mod eval;
pub mod evaporator;
pub mod hx;
pub mod ihx;
pub mod kind;
pub mod traits;

pub use boundary::{Sink, Source};
pub use compressor::{Ahri540Map, Compressor, CompressorMap, PolynomialCoefficients, VolumetricMap};
pub use condenser::Condenser;
pub use error::{ComponentError, ComponentResult};
pub use eval::{Equation, Evaluation, Performance, PortStates, StateVar, Target};
pub use evaporator::Evaporator;
pub use ihx::InternalHeatExchanger;
pub use kind::ComponentKind;
pub use traits::CycleComponent;
