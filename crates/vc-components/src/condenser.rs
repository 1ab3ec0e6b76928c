//! Air-cooled condenser with desuperheating, condensing and subcooling zones.

use vc_core::units::{Area, MassRate, Pressure, TempInterval, Temperature};
use vc_fluids::{Fluid, PropertyProvider};
use vc_graph::PortName;

use crate::common::{check_positive, is_non_negative};
use crate::error::{ComponentError, ComponentResult};
use crate::eval::{Equation, Evaluation, Performance, PortStates, StateVar, Target};
use crate::hx::{area_closure, capacity_rate, overlap, Zone, LIMIT_APPROACH};
use crate::traits::CycleComponent;

const PORTS: &[PortName] = &[PortName::InletA, PortName::OutletA];

/// Refrigerant condenser on `inlet_A`/`outlet_A`, cooled by an air stream
/// given as parameters.
///
/// The refrigerant leaves `subcooling` below the saturation temperature at
/// the inlet pressure. The closure `ln(sum(A_zone) / area)` fixes that
/// pressure. Air flows in counter-flow, entering at the subcooling zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Condenser {
    /// Heat transfer coefficient per zone [W/(m2 K)]: desuperheating,
    /// condensing, subcooling.
    pub k: [f64; 3],
    pub area: Area,
    pub subcooling: TempInterval,
    pub air_inlet_temperature: Temperature,
    pub air_mass_flow: MassRate,
    pub air_pressure: Pressure,
    pub air_fluid: Fluid,
    /// Drop zones the inlet state has already passed instead of failing.
    pub boundary_switch: bool,
    /// Keep the outlet temperature above the air inlet temperature.
    pub limit_temp: bool,
}

impl CycleComponent for Condenser {
    fn ports(&self) -> &'static [PortName] {
        PORTS
    }

    fn equations(&self) -> Vec<Equation> {
        vec![
            Equation::Target {
                port: PortName::OutletA,
                var: StateVar::MassFlow,
            },
            Equation::Target {
                port: PortName::OutletA,
                var: StateVar::Pressure,
            },
            Equation::Target {
                port: PortName::OutletA,
                var: StateVar::Enthalpy,
            },
            Equation::Closure { name: "condenser area" },
        ]
    }

    fn validate(&self) -> ComponentResult<()> {
        for k in self.k {
            check_positive(k, "condenser zone coefficient")?;
        }
        check_positive(self.area.value, "condenser area")?;
        check_positive(self.air_mass_flow.value, "condenser air mass flow")?;
        check_positive(self.air_pressure.value, "condenser air pressure")?;
        check_positive(self.air_inlet_temperature.value, "condenser air temperature")?;
        if !is_non_negative(self.subcooling.value) {
            return Err(ComponentError::invalid_param("subcooling cannot be negative"));
        }
        Ok(())
    }

    fn evaluate(&self, props: &dyn PropertyProvider, ports: &PortStates) -> ComponentResult<Evaluation> {
        let inlet = ports.get(PortName::InletA)?;
        let fluid = inlet.fluid;
        let (mdot, pc, h_in) = (inlet.mdot, inlet.p, inlet.h);

        let t_sat = props.saturation_temperature(fluid, pc)?;
        let h_dew = props.dew_enthalpy(fluid, pc)?;
        let h_bub = props.bubble_enthalpy(fluid, pc)?;
        let t_in = props.temperature_ph(fluid, pc, h_in)?;
        let t_air_in = self.air_inlet_temperature.value;

        if h_in <= h_dew && !self.boundary_switch {
            return Err(ComponentError::invalid_state(format!(
                "condenser inlet not superheated (h = {h_in:.0} J/kg, dew {h_dew:.0} J/kg)"
            )));
        }

        let mut t_out = t_sat - self.subcooling.value;
        if self.limit_temp {
            t_out = t_out.max(t_air_in + LIMIT_APPROACH);
        }
        let h_out = if t_out >= t_sat || self.subcooling.value == 0.0 {
            t_out = t_sat;
            h_bub
        } else {
            props.enthalpy_pt(fluid, pc, t_out)?
        };
        if h_in <= h_out {
            return Err(ComponentError::invalid_state(format!(
                "condenser inlet enthalpy {h_in:.0} J/kg not above outlet {h_out:.0} J/kg"
            )));
        }

        let cp_air = props.cp_pt(self.air_fluid, self.air_pressure.value, t_air_in)?;
        let c_air = self.air_mass_flow.value * cp_air;

        // Duties per zone, from the enthalpy span each zone covers.
        let q_dsh = mdot * overlap(h_out, h_in, h_dew, f64::INFINITY);
        let q_cond = mdot * overlap(h_out, h_in, h_bub, h_dew);
        let q_sc = mdot * overlap(h_out, h_in, f64::NEG_INFINITY, h_bub);

        // Air warms from the subcooling end towards the desuperheating end.
        let t_air_sc_out = t_air_in + q_sc / c_air;
        let t_air_cond_out = t_air_sc_out + q_cond / c_air;

        let zones = [
            Zone {
                duty: q_dsh,
                k: self.k[0],
                c_ref: capacity_rate(q_dsh, t_in - t_sat),
                c_air,
                dt_max: t_in - t_air_cond_out,
            },
            Zone {
                duty: q_cond,
                k: self.k[1],
                c_ref: f64::INFINITY,
                c_air,
                dt_max: t_sat - t_air_sc_out,
            },
            Zone {
                duty: q_sc,
                k: self.k[2],
                c_ref: capacity_rate(q_sc, t_sat - t_out),
                c_air,
                dt_max: t_sat - t_air_in,
            },
        ];
        let areas: Vec<f64> = zones.iter().map(Zone::required_area).collect();
        let closure = area_closure(&areas, self.area.value);

        Ok(Evaluation {
            targets: vec![
                Target::new(PortName::OutletA, StateVar::MassFlow, mdot),
                Target::new(PortName::OutletA, StateVar::Pressure, pc),
                Target::new(PortName::OutletA, StateVar::Enthalpy, h_out),
            ],
            closures: vec![closure],
            performance: Performance {
                duty: Some(mdot * (h_in - h_out)),
                mdot: Some(mdot),
                p_sat: Some(pc),
                t_sat: Some(t_sat),
                outlet_temperature: Some(t_out),
                zone_areas: areas,
                ..Performance::default()
            },
        })
    }
}
