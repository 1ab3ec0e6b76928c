//! Evaporator with evaporating and superheating zones, air through junctions.

use vc_core::units::{Area, TempInterval};
use vc_fluids::PropertyProvider;
use vc_graph::PortName;

use crate::common::{check_positive, is_non_negative, is_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::eval::{Equation, Evaluation, Performance, PortStates, StateVar, Target};
use crate::hx::{area_closure, capacity_rate, overlap, Zone, LIMIT_APPROACH};
use crate::traits::CycleComponent;

const PORTS: &[PortName] = &[
    PortName::InletA,
    PortName::OutletA,
    PortName::InletB,
    PortName::OutletB,
];

/// Evaporator: refrigerant on stream A, air on stream B.
///
/// The refrigerant leaves `superheat` above the dew temperature at the inlet
/// pressure; the area closure fixes that pressure. Air enters at the
/// superheating end (counter-flow) and leaves with the duty removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaporator {
    /// Heat transfer coefficient per zone [W/(m2 K)]: evaporating, superheating.
    pub k: [f64; 2],
    pub area: Area,
    pub superheat: TempInterval,
    /// Accept inlets that are already superheated or subcooled.
    pub boundary_switch: bool,
    /// Keep the outlet temperature below the air inlet temperature.
    pub limit_temp: bool,
}

impl CycleComponent for Evaporator {
    fn ports(&self) -> &'static [PortName] {
        PORTS
    }

    fn equations(&self) -> Vec<Equation> {
        let mut eqs = Vec::with_capacity(7);
        for port in [PortName::OutletA, PortName::OutletB] {
            for var in [StateVar::MassFlow, StateVar::Pressure, StateVar::Enthalpy] {
                eqs.push(Equation::Target { port, var });
            }
        }
        eqs.push(Equation::Closure { name: "evaporator area" });
        eqs
    }

    fn validate(&self) -> ComponentResult<()> {
        for k in self.k {
            check_positive(k, "evaporator zone coefficient")?;
        }
        check_positive(self.area.value, "evaporator area")?;
        if !is_non_negative(self.superheat.value) {
            return Err(ComponentError::invalid_param("superheat cannot be negative"));
        }
        Ok(())
    }

    fn evaluate(&self, props: &dyn PropertyProvider, ports: &PortStates) -> ComponentResult<Evaluation> {
        let inlet = ports.get(PortName::InletA)?;
        let air_in = ports.get(PortName::InletB)?;
        let fluid = inlet.fluid;
        let (mdot, p0, h_in) = (inlet.mdot, inlet.p, inlet.h);

        let t_sat = props.saturation_temperature(fluid, p0)?;
        let h_dew = props.dew_enthalpy(fluid, p0)?;
        let h_bub = props.bubble_enthalpy(fluid, p0)?;
        if !self.boundary_switch && (h_in >= h_dew || h_in <= h_bub) {
            return Err(ComponentError::invalid_state(format!(
                "evaporator inlet not two-phase (h = {h_in:.0} J/kg, bubble {h_bub:.0}, dew {h_dew:.0})"
            )));
        }
        if !is_positive(air_in.mdot) {
            return Err(ComponentError::invalid_state("evaporator air mass flow must be positive"));
        }
        let t_air_in = props.temperature_ph(air_in.fluid, air_in.p, air_in.h)?;

        let mut t_out = t_sat + self.superheat.value;
        if self.limit_temp {
            t_out = t_out.min(t_air_in - LIMIT_APPROACH);
        }
        let h_out = if t_out <= t_sat || self.superheat.value == 0.0 {
            t_out = t_sat;
            h_dew
        } else {
            props.enthalpy_pt(fluid, p0, t_out)?
        };
        if h_out <= h_in {
            return Err(ComponentError::invalid_state(format!(
                "evaporator inlet enthalpy {h_in:.0} J/kg not below outlet {h_out:.0} J/kg"
            )));
        }

        let cp_air = props.cp_ph(air_in.fluid, air_in.p, air_in.h)?;
        let c_air = air_in.mdot * cp_air;

        let q_evap = mdot * overlap(h_in, h_out, f64::NEG_INFINITY, h_dew);
        let q_sh = mdot * overlap(h_in, h_out, h_dew, f64::INFINITY);
        let duty = q_evap + q_sh;

        // Superheating starts at the dew point, or at the inlet if already superheated.
        let t_sh_start = if h_in > h_dew {
            props.temperature_ph(fluid, p0, h_in)?
        } else {
            t_sat
        };
        let t_air_mid = t_air_in - q_sh / c_air;

        let zones = [
            Zone {
                duty: q_evap,
                k: self.k[0],
                c_ref: f64::INFINITY,
                c_air,
                dt_max: t_air_mid - t_sat,
            },
            Zone {
                duty: q_sh,
                k: self.k[1],
                c_ref: capacity_rate(q_sh, t_out - t_sh_start),
                c_air,
                dt_max: t_air_in - t_sh_start,
            },
        ];
        let areas: Vec<f64> = zones.iter().map(Zone::required_area).collect();
        let closure = area_closure(&areas, self.area.value);
        let h_air_out = air_in.h - duty / air_in.mdot;

        Ok(Evaluation {
            targets: vec![
                Target::new(PortName::OutletA, StateVar::MassFlow, mdot),
                Target::new(PortName::OutletA, StateVar::Pressure, p0),
                Target::new(PortName::OutletA, StateVar::Enthalpy, h_out),
                Target::new(PortName::OutletB, StateVar::MassFlow, air_in.mdot),
                Target::new(PortName::OutletB, StateVar::Pressure, air_in.p),
                Target::new(PortName::OutletB, StateVar::Enthalpy, h_air_out),
            ],
            closures: vec![closure],
            performance: Performance {
                duty: Some(duty),
                mdot: Some(mdot),
                p_sat: Some(p0),
                t_sat: Some(t_sat),
                outlet_temperature: Some(t_out),
                inlet_quality: inlet.quality(props),
                zone_areas: areas,
                ..Performance::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{delta_k, m2};

    #[test]
    fn declares_seven_equations() {
        let evap = Evaporator {
            k: [420.0, 420.0],
            area: m2(1.0),
            superheat: delta_k(5.0),
            boundary_switch: true,
            limit_temp: true,
        };
        assert!(evap.validate().is_ok());
        let eqs = evap.equations();
        assert_eq!(eqs.len(), 7);
        assert_eq!(
            eqs.iter().filter(|e| matches!(e, Equation::Closure { .. })).count(),
            1
        );
    }
}
