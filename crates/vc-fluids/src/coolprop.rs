//! CoolProp-backed property provider.

use crate::error::{FluidError, FluidResult};
use crate::fluid::Fluid;
use crate::property::Property;
use crate::provider::{PropertyProvider, validation};
use rfluids::prelude::{Fluid as BackendFluid, FluidInput};

/// CoolProp backend (through `rfluids`) for pure fluids.
///
/// A fresh backend state is created for every lookup, so the provider holds
/// no mutable data and can be shared between threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoolPropProvider;

impl CoolPropProvider {
    pub fn new() -> Self {
        Self
    }

    fn input(prop: Property, v: f64) -> FluidResult<FluidInput> {
        match prop {
            Property::Pressure => Ok(FluidInput::pressure(v)),
            Property::Temperature => Ok(FluidInput::temperature(v)),
            Property::Enthalpy => Ok(FluidInput::enthalpy(v)),
            Property::Entropy => Ok(FluidInput::entropy(v)),
            Property::Density => Ok(FluidInput::density(v)),
            Property::Quality => Ok(FluidInput::quality(v)),
            Property::Cp => Err(FluidError::InvalidArg {
                what: "cp cannot be used as a state input",
            }),
        }
    }
}

impl PropertyProvider for CoolPropProvider {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, _fluid: Fluid) -> bool {
        true
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

        let mut state = BackendFluid::from(fluid.rfluids_pure())
            .in_state(Self::input(in1, v1)?, Self::input(in2, v2)?)
            .map_err(|e| {
                tracing::trace!(%fluid, %in1, v1, %in2, v2, error = %e, "backend rejected state");
                FluidError::invalid_state(fluid, format!("{in1}={v1}, {in2}={v2}: {e}"))
            })?;

        let value = match output {
            Property::Pressure => state.pressure(),
            Property::Temperature => state.temperature(),
            Property::Enthalpy => state.enthalpy(),
            Property::Entropy => state.entropy(),
            Property::Density => state.density(),
            Property::Quality => state.quality(),
            Property::Cp => state.specific_heat(),
        }
        .map_err(|e| {
            FluidError::invalid_state(
                fluid,
                format!("{output} undefined at {in1}={v1}, {in2}={v2}: {e}"),
            )
        })?;

        validation::validate_output(fluid, output, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cp_is_rejected_as_input_before_backend() {
        let props = CoolPropProvider::new();
        let err = props
            .lookup(
                Fluid::Air,
                Property::Enthalpy,
                Property::Cp,
                1000.0,
                Property::Pressure,
                1e5,
            )
            .unwrap_err();
        assert!(matches!(err, FluidError::InvalidArg { .. }));
    }

    #[test]
    fn air_enthalpy_increases_with_temperature() {
        let props = CoolPropProvider::new();
        let h1 = props.enthalpy_pt(Fluid::Air, 1e5, 253.15).unwrap();
        let h2 = props.enthalpy_pt(Fluid::Air, 1e5, 303.15).unwrap();
        // roughly cp * 50 K
        let dh = h2 - h1;
        assert!(dh > 45_000.0 && dh < 55_000.0, "dh = {dh}");
    }
}
