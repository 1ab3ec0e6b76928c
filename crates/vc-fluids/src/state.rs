//! Stream state carried by junctions.

use crate::error::FluidResult;
use crate::fluid::Fluid;
use crate::provider::PropertyProvider;

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set.
pub type SpecEnthalpy = f64;

/// Independent state of one fluid stream: (fluid, mdot, p, h).
///
/// Temperature, quality and density are derived on demand through a
/// `PropertyProvider` and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamState {
    pub fluid: Fluid,
    /// Mass flow rate [kg/s]
    pub mdot: f64,
    /// Pressure [Pa]
    pub p: f64,
    /// Specific enthalpy [J/kg]
    pub h: SpecEnthalpy,
}

impl StreamState {
    pub fn new(fluid: Fluid, mdot: f64, p: f64, h: SpecEnthalpy) -> Self {
        Self { fluid, mdot, p, h }
    }

    /// Build a state from pressure and temperature.
    pub fn from_pt(
        props: &dyn PropertyProvider,
        fluid: Fluid,
        mdot: f64,
        p: f64,
        t: f64,
    ) -> FluidResult<Self> {
        let h = props.enthalpy_pt(fluid, p, t)?;
        Ok(Self { fluid, mdot, p, h })
    }

    pub fn temperature(&self, props: &dyn PropertyProvider) -> FluidResult<f64> {
        props.temperature_ph(self.fluid, self.p, self.h)
    }

    pub fn density(&self, props: &dyn PropertyProvider) -> FluidResult<f64> {
        props.density_ph(self.fluid, self.p, self.h)
    }

    /// Vapour quality, or `None` outside the two-phase dome.
    pub fn quality(&self, props: &dyn PropertyProvider) -> Option<f64> {
        props.quality_ph(self.fluid, self.p, self.h).ok()
    }

    /// Volumetric flow rate [m3/s].
    pub fn volume_flow(&self, props: &dyn PropertyProvider) -> FluidResult<f64> {
        Ok(self.mdot / self.density(props)?)
    }

    /// Enthalpy flow [W] relative to the backend's reference state.
    pub fn enthalpy_flow(&self) -> f64 {
        self.mdot * self.h
    }

    pub fn is_finite(&self) -> bool {
        self.mdot.is_finite() && self.p.is_finite() && self.h.is_finite()
    }
}
