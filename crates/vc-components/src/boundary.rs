//! Boundary components: sources and sinks.

use vc_core::units::{MassRate, Pressure};
use vc_fluids::{PropertyProvider, SpecEnthalpy};
use vc_graph::PortName;

use crate::common::{check_positive, is_non_negative};
use crate::error::{ComponentError, ComponentResult};
use crate::eval::{Equation, Evaluation, Performance, PortStates, StateVar, Target};
use crate::traits::CycleComponent;

/// Fixed-state inflow on `outlet_A`.
///
/// `mdot = None` leaves the flow to be set by the component downstream.
#[derive(Clone, Debug, PartialEq)]
pub struct Source {
    pub p: Pressure,
    pub h: SpecEnthalpy,
    pub mdot: Option<MassRate>,
}

/// Outflow on `inlet_A`, optionally holding the inlet pressure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sink {
    pub p: Option<Pressure>,
}

impl CycleComponent for Source {
    fn ports(&self) -> &'static [PortName] {
        &[PortName::OutletA]
    }

    fn equations(&self) -> Vec<Equation> {
        let vars: &[StateVar] = if self.mdot.is_some() {
            &[StateVar::MassFlow, StateVar::Pressure, StateVar::Enthalpy]
        } else {
            &[StateVar::Pressure, StateVar::Enthalpy]
        };
        vars.iter()
            .map(|&var| Equation::Target {
                port: PortName::OutletA,
                var,
            })
            .collect()
    }

    fn validate(&self) -> ComponentResult<()> {
        check_positive(self.p.value, "source pressure")?;
        if !self.h.is_finite() {
            return Err(ComponentError::invalid_param("source enthalpy must be finite"));
        }
        if let Some(mdot) = self.mdot
            && !is_non_negative(mdot.value)
        {
            return Err(ComponentError::invalid_param("source mass flow cannot be negative"));
        }
        Ok(())
    }

    fn evaluate(&self, props: &dyn PropertyProvider, ports: &PortStates) -> ComponentResult<Evaluation> {
        let out = ports.get(PortName::OutletA)?;
        let t = props.temperature_ph(out.fluid, self.p.value, self.h)?;

        let mut targets = Vec::with_capacity(3);
        if let Some(mdot) = self.mdot {
            targets.push(Target::new(PortName::OutletA, StateVar::MassFlow, mdot.value));
        }
        targets.push(Target::new(PortName::OutletA, StateVar::Pressure, self.p.value));
        targets.push(Target::new(PortName::OutletA, StateVar::Enthalpy, self.h));

        Ok(Evaluation {
            targets,
            closures: Vec::new(),
            performance: Performance {
                outlet_temperature: Some(t),
                mdot: self.mdot.map(|m| m.value),
                ..Performance::default()
            },
        })
    }
}

impl CycleComponent for Sink {
    fn ports(&self) -> &'static [PortName] {
        &[PortName::InletA]
    }

    fn equations(&self) -> Vec<Equation> {
        match self.p {
            Some(_) => vec![Equation::Target {
                port: PortName::InletA,
                var: StateVar::Pressure,
            }],
            None => Vec::new(),
        }
    }

    fn validate(&self) -> ComponentResult<()> {
        match self.p {
            Some(p) => check_positive(p.value, "sink pressure"),
            None => Ok(()),
        }
    }

    fn evaluate(&self, _props: &dyn PropertyProvider, ports: &PortStates) -> ComponentResult<Evaluation> {
        let inlet = ports.get(PortName::InletA)?;
        let targets = self
            .p
            .map(|p| vec![Target::new(PortName::InletA, StateVar::Pressure, p.value)])
            .unwrap_or_default();
        Ok(Evaluation {
            targets,
            closures: Vec::new(),
            performance: Performance {
                mdot: Some(inlet.mdot),
                ..Performance::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{kgps, pa};
    use vc_fluids::{Fluid, PerfectGasProvider, StreamState};

    fn air_port() -> StreamState {
        StreamState::new(Fluid::Air, 0.5, 1e5, 3.0e5)
    }

    #[test]
    fn source_targets_its_state() {
        let props = PerfectGasProvider::air();
        let src = Source {
            p: pa(1e5),
            h: 3.0e5,
            mdot: Some(kgps(0.5)),
        };
        let ports = PortStates::new().with(PortName::OutletA, air_port());
        let eval = src.evaluate(&props, &ports).unwrap();
        assert_eq!(eval.targets.len(), src.equations().len());
        assert_eq!(eval.targets[0].value, 0.5);
        assert_eq!(eval.targets[2].value, 3.0e5);
        assert!(eval.performance.outlet_temperature.unwrap() > 0.0);
    }

    #[test]
    fn open_source_leaves_mass_flow_free() {
        let src = Source {
            p: pa(2e5),
            h: 5.8e5,
            mdot: None,
        };
        assert_eq!(src.equations().len(), 2);
        assert!(src.validate().is_ok());
    }

    #[test]
    fn invalid_source_state_is_reported() {
        let props = PerfectGasProvider::air();
        let src = Source {
            p: pa(1e5),
            h: -1.0e9,
            mdot: None,
        };
        let ports = PortStates::new().with(PortName::OutletA, air_port());
        let err = src.evaluate(&props, &ports).unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn sink_holds_pressure_only_when_asked() {
        let props = PerfectGasProvider::air();
        let ports = PortStates::new().with(
            PortName::InletA,
            StreamState::new(Fluid::Air, 0.5, 1.2e5, 3.0e5),
        );
        assert!(Sink::default().evaluate(&props, &ports).unwrap().targets.is_empty());
        let held = Sink { p: Some(pa(1e5)) };
        let eval = held.evaluate(&props, &ports).unwrap();
        assert_eq!(eval.targets, vec![Target::new(PortName::InletA, StateVar::Pressure, 1e5)]);
    }
}
