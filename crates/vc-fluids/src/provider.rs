//! The property-provider contract and input validation shared by backends.

use crate::error::{FluidError, FluidResult};
use crate::fluid::Fluid;
use crate::property::Property;

/// Source of thermodynamic properties.
///
/// `lookup` is a pure function of its arguments: identical inputs give
/// bit-identical outputs, and implementations are read-only so a provider can
/// be shared across threads. A state outside the fluid's domain (below the
/// triple point, quality outside the two-phase dome, unknown input pair)
/// yields `FluidError::InvalidState`.
pub trait PropertyProvider: Send + Sync {
    /// Backend name (for logging).
    fn name(&self) -> &str;

    /// Whether the backend models `fluid` at all.
    fn supports(&self, fluid: Fluid) -> bool;

    /// Return `output` for `fluid` at the state fixed by two independent inputs.
    fn lookup(
        &self,
        fluid: Fluid,
        output: Property,
        in1: Property,
        v1: f64,
        in2: Property,
        v2: f64,
    ) -> FluidResult<f64>;

    /// Temperature [K] from pressure and enthalpy.
    fn temperature_ph(&self, fluid: Fluid, p: f64, h: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Temperature,
            Property::Pressure,
            p,
            Property::Enthalpy,
            h,
        )
    }

    /// Enthalpy [J/kg] from pressure and temperature.
    fn enthalpy_pt(&self, fluid: Fluid, p: f64, t: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Enthalpy,
            Property::Pressure,
            p,
            Property::Temperature,
            t,
        )
    }

    /// Enthalpy [J/kg] from pressure and entropy (isentropic end states).
    fn enthalpy_ps(&self, fluid: Fluid, p: f64, s: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Enthalpy,
            Property::Pressure,
            p,
            Property::Entropy,
            s,
        )
    }

    fn entropy_ph(&self, fluid: Fluid, p: f64, h: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Entropy,
            Property::Pressure,
            p,
            Property::Enthalpy,
            h,
        )
    }

    fn density_ph(&self, fluid: Fluid, p: f64, h: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Density,
            Property::Pressure,
            p,
            Property::Enthalpy,
            h,
        )
    }

    fn density_pt(&self, fluid: Fluid, p: f64, t: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Density,
            Property::Pressure,
            p,
            Property::Temperature,
            t,
        )
    }

    fn cp_ph(&self, fluid: Fluid, p: f64, h: f64) -> FluidResult<f64> {
        self.lookup(fluid, Property::Cp, Property::Pressure, p, Property::Enthalpy, h)
    }

    fn cp_pt(&self, fluid: Fluid, p: f64, t: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Cp,
            Property::Pressure,
            p,
            Property::Temperature,
            t,
        )
    }

    /// Vapour quality from pressure and enthalpy; fails outside the dome.
    fn quality_ph(&self, fluid: Fluid, p: f64, h: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Quality,
            Property::Pressure,
            p,
            Property::Enthalpy,
            h,
        )
    }

    /// Dew-point temperature [K] at pressure `p`.
    fn saturation_temperature(&self, fluid: Fluid, p: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Temperature,
            Property::Pressure,
            p,
            Property::Quality,
            1.0,
        )
    }

    /// Bubble-point pressure [Pa] at temperature `t`.
    fn saturation_pressure(&self, fluid: Fluid, t: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Pressure,
            Property::Temperature,
            t,
            Property::Quality,
            0.0,
        )
    }

    /// Saturated-vapour enthalpy [J/kg] at pressure `p`.
    fn dew_enthalpy(&self, fluid: Fluid, p: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Enthalpy,
            Property::Pressure,
            p,
            Property::Quality,
            1.0,
        )
    }

    /// Saturated-liquid enthalpy [J/kg] at pressure `p`.
    fn bubble_enthalpy(&self, fluid: Fluid, p: f64) -> FluidResult<f64> {
        self.lookup(
            fluid,
            Property::Enthalpy,
            Property::Pressure,
            p,
            Property::Quality,
            0.0,
        )
    }
}

/// Input validation helpers shared by the backends.
pub(crate) mod validation {
    use super::*;

    /// Check an input pair before it reaches a backend.
    pub fn validate_inputs(
        fluid: Fluid,
        in1: Property,
        v1: f64,
        in2: Property,
        v2: f64,
    ) -> FluidResult<()> {
        if !in1.is_input() || !in2.is_input() {
            return Err(FluidError::InvalidArg {
                what: "cp cannot be used as a state input",
            });
        }
        if in1 == in2 {
            return Err(FluidError::InvalidArg {
                what: "the two state inputs must be different properties",
            });
        }
        validate_value(fluid, in1, v1)?;
        validate_value(fluid, in2, v2)
    }

    fn validate_value(fluid: Fluid, prop: Property, v: f64) -> FluidResult<()> {
        if !v.is_finite() {
            return Err(FluidError::invalid_state(
                fluid,
                format!("non-finite input {prop}={v}"),
            ));
        }
        let ok = match prop {
            Property::Pressure | Property::Temperature | Property::Density => v > 0.0,
            Property::Quality => (0.0..=1.0).contains(&v),
            _ => true,
        };
        if ok {
            Ok(())
        } else {
            Err(FluidError::invalid_state(
                fluid,
                format!("input {prop}={v} outside its physical range"),
            ))
        }
    }

    /// Check a backend output before handing it to callers.
    pub fn validate_output(fluid: Fluid, output: Property, v: f64) -> FluidResult<f64> {
        if !v.is_finite() {
            return Err(FluidError::invalid_state(
                fluid,
                format!("backend returned non-finite {output}"),
            ));
        }
        if output == Property::Quality && !(0.0..=1.0).contains(&v) {
            return Err(FluidError::invalid_state(
                fluid,
                "quality is undefined outside the two-phase region",
            ));
        }
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn rejects_identical_inputs() {
        let err = validate_inputs(
            Fluid::R290,
            Property::Pressure,
            1e5,
            Property::Pressure,
            2e5,
        )
        .unwrap_err();
        assert!(matches!(err, FluidError::InvalidArg { .. }));
    }

    #[test]
    fn rejects_cp_as_input() {
        assert!(validate_inputs(Fluid::Air, Property::Cp, 1000.0, Property::Pressure, 1e5).is_err());
    }

    #[test]
    fn rejects_non_physical_values() {
        let err =
            validate_inputs(Fluid::Air, Property::Pressure, -1.0, Property::Temperature, 300.0)
                .unwrap_err();
        assert!(err.is_invalid_state());
        assert!(
            validate_inputs(Fluid::R290, Property::Pressure, 1e5, Property::Quality, 1.5).is_err()
        );
        assert!(
            validate_inputs(Fluid::R290, Property::Pressure, f64::NAN, Property::Quality, 0.5)
                .is_err()
        );
        assert!(
            validate_inputs(Fluid::R290, Property::Pressure, 1e5, Property::Enthalpy, -2e5).is_ok()
        );
    }

    #[test]
    fn quality_outputs_outside_dome_are_invalid() {
        assert!(validate_output(Fluid::R290, Property::Quality, -1.0).is_err());
        assert!(validate_output(Fluid::R290, Property::Quality, 0.3).is_ok());
        assert!(validate_output(Fluid::R290, Property::Enthalpy, -1.0).is_ok());
        assert!(validate_output(Fluid::R290, Property::Density, f64::INFINITY).is_err());
    }
}
