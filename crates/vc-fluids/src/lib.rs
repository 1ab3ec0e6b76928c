//! vc-fluids: fluid property access for the cycle engine.
//!
//! Provides:
//! - the `Fluid` vocabulary (refrigerants, air, water)
//! - the `Property` vocabulary with CoolProp-style codes
//! - the `PropertyProvider` trait: `lookup(fluid, out, in1, v1, in2, v2)`
//! - backends: CoolProp (via `rfluids`), a perfect-gas model, and a
//!   memoizing wrapper
//! - `StreamState`, the (fluid, mdot, p, h) state carried by junctions
//!
//! # Example
//!
//! ```no_run
//! use vc_fluids::{CoolPropProvider, Fluid, Property, PropertyProvider};
//!
//! let props = CoolPropProvider::new();
//! let h = props
//!     .lookup(Fluid::R290, Property::Enthalpy, Property::Pressure, 2.764e5, Property::Temperature, 291.6)
//!     .unwrap();
//! println!("h = {h} J/kg");
//! ```

pub mod cache;
pub mod coolprop;
pub mod error;
pub mod fluid;
pub mod perfect_gas;
pub mod property;
pub mod provider;
pub mod state;

pub use cache::CachedProvider;
pub use coolprop::CoolPropProvider;
pub use error::{FluidError, FluidResult};
pub use fluid::Fluid;
pub use perfect_gas::PerfectGasProvider;
pub use property::Property;
pub use provider::PropertyProvider;
pub use state::{SpecEnthalpy, StreamState};
