//! vc-core: shared foundation for the vapour-compression cycle engine.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - ids (compact arena ids for components, ports and junctions)

pub mod ids;
pub mod units;

pub use ids::*;
pub use units::*;
