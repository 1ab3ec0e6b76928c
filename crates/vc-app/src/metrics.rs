//! Refrigeration cycle figures of merit.
//!
//! Derived from a solved system and the reporting section of the
//! configuration. Every figure is optional: a compressor bench has no
//! evaporator, so it reports neither duty nor COP.

use serde::{Deserialize, Serialize};
use vc_components::ComponentKind;
use vc_core::units::revolutions_per_second;
use vc_fluids::StreamState;
use vc_graph::PortName;
use vc_project::schema::ReportDef;
use vc_solver::System;

use crate::error::{AppError, AppResult};

const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CycleMetrics {
    /// Refrigerant-side evaporator duty [W]
    pub evaporator_duty_w: Option<f64>,
    pub evaporator_inlet_quality: Option<f64>,
    pub evaporating_temperature_k: Option<f64>,
    pub evaporating_pressure_pa: Option<f64>,
    pub refrigerant_mass_flow_kg_s: Option<f64>,
    /// Air entering the evaporator [m3/h]
    pub box_air_volume_flow_m3_h: Option<f64>,
    /// Air entering the condenser [m3/h]
    pub ambient_air_volume_flow_m3_h: Option<f64>,
    pub compressor_power_w: Option<f64>,
    pub compressor_speed_rpm: Option<f64>,
    pub cop_ref_cycle: Option<f64>,
    pub cop_atp: Option<f64>,
    /// Net cooling after fan power and housing loss [W]
    pub qdot_atp_w: Option<f64>,
}

impl CycleMetrics {
    pub fn has_data(&self) -> bool {
        self.evaporator_duty_w.is_some()
            || self.compressor_power_w.is_some()
            || self.ambient_air_volume_flow_m3_h.is_some()
    }
}

/// Compute the metrics for the components named in `report`.
pub fn compute_cycle_metrics(system: &System, report: &ReportDef) -> AppResult<CycleMetrics> {
    let props = system.props();
    let mut metrics = CycleMetrics::default();

    if let Some(evap) = &report.evaporator {
        let inlet = port_state(system, evap, PortName::InletA)?;
        let outlet = port_state(system, evap, PortName::OutletA)?;
        metrics.evaporator_duty_w = Some(inlet.mdot * (outlet.h - inlet.h));
        metrics.refrigerant_mass_flow_kg_s = Some(inlet.mdot);
        metrics.evaporator_inlet_quality = inlet.quality(props);

        let perf = system.performance(evap);
        metrics.evaporating_pressure_pa = perf.and_then(|p| p.p_sat).or(Some(inlet.p));
        metrics.evaporating_temperature_k = match perf.and_then(|p| p.t_sat) {
            Some(t) => Some(t),
            None => props.saturation_temperature(inlet.fluid, inlet.p).ok(),
        };

        if let Some(air) = system.port_state(evap, PortName::InletB) {
            metrics.box_air_volume_flow_m3_h =
                Some(air.volume_flow(props)? * SECONDS_PER_HOUR);
        }
    }

    if let Some(cpr) = &report.compressor {
        metrics.compressor_power_w = system.performance(cpr).and_then(|p| p.power);
        if let Some(ComponentKind::Compressor(c)) = system.component(cpr) {
            metrics.compressor_speed_rpm = Some(revolutions_per_second(c.speed) * 60.0);
        }
    }

    if let Some(cond) = &report.condenser
        && let Some(ComponentKind::Condenser(c)) = system.component(cond)
    {
        let rho = props.density_pt(
            c.air_fluid,
            c.air_pressure.value,
            c.air_inlet_temperature.value,
        )?;
        metrics.ambient_air_volume_flow_m3_h = Some(c.air_mass_flow.value / rho * SECONDS_PER_HOUR);
    }

    if let Some(qdot) = metrics.evaporator_duty_w {
        metrics.qdot_atp_w = Some(qdot_atp(qdot, report));
        if let Some(pel) = metrics.compressor_power_w {
            metrics.cop_ref_cycle = cop_ref_cycle(qdot, pel);
            metrics.cop_atp = cop_atp(qdot, pel, report);
        }
    }

    Ok(metrics)
}

fn port_state<'a>(
    system: &'a System,
    component: &str,
    port: PortName,
) -> AppResult<&'a StreamState> {
    system.port_state(component, port).ok_or_else(|| {
        AppError::InvalidInput(format!("no junction on {component}.{port}"))
    })
}

/// Evaporator duty over compressor electrical power.
pub fn cop_ref_cycle(qdot: f64, pel: f64) -> Option<f64> {
    (pel > 0.0).then(|| qdot / pel)
}

/// Appliance-level COP: the evaporator fan heats the box and both fans draw
/// power.
pub fn cop_atp(qdot: f64, pel: f64, report: &ReportDef) -> Option<f64> {
    let input = pel + report.evaporator_fan_power_w + report.condenser_fan_power_w;
    (input > 0.0).then(|| (qdot - report.evaporator_fan_power_w) / input)
}

pub fn qdot_atp(qdot: f64, report: &ReportDef) -> f64 {
    qdot - report.evaporator_fan_power_w - report.housing_loss_w
}
