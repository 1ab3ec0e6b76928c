//! Constant-cp perfect-gas provider.
//!
//! A calorically perfect ideal gas with no two-phase region:
//!
//! ```text
//! h = cp (T - T_ref)
//! s = cp ln(T / T_ref) - R ln(p / p_ref)
//! rho = p / (R T)
//! ```
//!
//! Any quality request fails with `InvalidState`. Useful for air-side
//! streams when CoolProp is unnecessary and for deterministic tests.

use crate::error::{FluidError, FluidResult};
use crate::fluid::Fluid;
use crate::property::Property;
use crate::provider::{PropertyProvider, validation};

/// Universal gas constant [J/(kmol K)]
const R_UNIVERSAL: f64 = 8314.462618;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGasProvider {
    /// Isobaric specific heat [J/(kg K)]
    pub cp: f64,
    /// Reference temperature where h = 0 and s = 0 at `p_ref` [K]
    pub t_ref: f64,
    /// Reference pressure for entropy [Pa]
    pub p_ref: f64,
}

impl PerfectGasProvider {
    pub fn new(cp: f64) -> FluidResult<Self> {
        if !cp.is_finite() || cp <= 0.0 {
            return Err(FluidError::InvalidArg {
                what: "cp must be positive and finite",
            });
        }
        Ok(Self {
            cp,
            t_ref: 273.15,
            p_ref: 101_325.0,
        })
    }

    /// Dry air near ambient conditions.
    pub fn air() -> Self {
        Self {
            cp: 1006.0,
            t_ref: 273.15,
            p_ref: 101_325.0,
        }
    }

    fn gas_constant(fluid: Fluid) -> f64 {
        R_UNIVERSAL / fluid.molar_mass()
    }

    fn t_from_h(&self, h: f64) -> f64 {
        self.t_ref + h / self.cp
    }

    /// Resolve (p, T) from any supported input pair.
    fn resolve(&self, fluid: Fluid, a: (Property, f64), b: (Property, f64)) -> FluidResult<(f64, f64)> {
        use Property::*;

        let r = Self::gas_constant(fluid);
        let ((pa, va), (pb, vb)) = if a.0 <= b.0 { (a, b) } else { (b, a) };

        let (p, t) = match (pa, pb) {
            (Pressure, Temperature) => (va, vb),
            (Pressure, Enthalpy) => (va, self.t_from_h(vb)),
            (Pressure, Entropy) => {
                let t = self.t_ref * ((vb + r * (va / self.p_ref).ln()) / self.cp).exp();
                (va, t)
            }
            (Pressure, Density) => (va, va / (vb * r)),
            (Temperature, Entropy) => {
                let p = self.p_ref * ((self.cp * (va / self.t_ref).ln() - vb) / r).exp();
                (p, va)
            }
            (Temperature, Density) => (vb * r * va, va),
            (Enthalpy, Entropy) => {
                let t = self.t_from_h(va);
                let p = self.p_ref * ((self.cp * (t / self.t_ref).ln() - vb) / r).exp();
                (p, t)
            }
            (Enthalpy, Density) => {
                let t = self.t_from_h(va);
                (vb * r * t, t)
            }
            (Temperature, Enthalpy) => {
                return Err(FluidError::invalid_state(
                    fluid,
                    "temperature and enthalpy are not independent for a perfect gas",
                ));
            }
            (_, Quality) | (Quality, _) => {
                return Err(FluidError::invalid_state(
                    fluid,
                    "a perfect gas has no two-phase region",
                ));
            }
            _ => {
                return Err(FluidError::NotSupported {
                    what: "input pair not supported by the perfect-gas model",
                });
            }
        };

        if !(p.is_finite() && p > 0.0 && t.is_finite() && t > 0.0) {
            return Err(FluidError::invalid_state(
                fluid,
                format!("{pa}={va}, {pb}={vb} maps to p={p}, T={t}"),
            ));
        }
        Ok((p, t))
    }
}

impl PropertyProvider for PerfectGasProvider {
    fn name(&self) -> &str {
        "PerfectGas"
    }

    fn supports(&self, fluid: Fluid) -> bool {
        !fluid.is_refrigerant()
    }

    fn lookup(
        &self,
        fluid: Fluid,
        output: Property,
        in1: Property,
        v1: f64,
        in2: Property,
        v2: f64,
    ) -> FluidResult<f64> {
        validation::validate_inputs(fluid, in1, v1, in2, v2)?;
        let (p, t) = self.resolve(fluid, (in1, v1), (in2, v2))?;
        let r = Self::gas_constant(fluid);

        let value = match output {
            Property::Pressure => p,
            Property::Temperature => t,
            Property::Enthalpy => self.cp * (t - self.t_ref),
            Property::Entropy => self.cp * (t / self.t_ref).ln() - r * (p / self.p_ref).ln(),
            Property::Density => p / (r * t),
            Property::Cp => self.cp,
            Property::Quality => {
                return Err(FluidError::invalid_state(
                    fluid,
                    "a perfect gas has no two-phase region",
                ));
            }
        };
        validation::validate_output(fluid, output, value)
    }
}
