//! Serializable run summaries and the plain-text report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::metrics::CycleMetrics;
use crate::run_service::RunResponse;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JunctionSummary {
    pub id: String,
    pub fluid: String,
    pub mdot_kg_s: f64,
    pub pressure_pa: f64,
    pub temperature_k: Option<f64>,
    pub enthalpy_j_kg: f64,
    pub quality: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_w: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duty_w: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mdot_kg_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation_pressure_pa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation_temperature_k: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlet_temperature_k: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inlet_quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zone_areas_m2: Vec<f64>,
}

/// Everything the CLI prints about a solved system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub name: String,
    pub system_id: String,
    pub iterations: usize,
    pub max_residual: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warm_restart_iterations: Option<usize>,
    pub unknowns: usize,
    pub equations: usize,
    pub solve_time_s: f64,
    pub junctions: Vec<JunctionSummary>,
    pub components: Vec<ComponentSummary>,
    pub metrics: CycleMetrics,
}

impl RunSummary {
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn summarize(name: &str, response: &RunResponse) -> RunSummary {
    let system = &response.system;
    let props = system.props();

    let junctions = system
        .junctions()
        .map(|view| {
            let s = view.state;
            JunctionSummary {
                id: view.junction.name.clone(),
                fluid: s.fluid.to_string(),
                mdot_kg_s: s.mdot,
                pressure_pa: s.p,
                temperature_k: s.temperature(props).ok(),
                enthalpy_j_kg: s.h,
                quality: s.quality(props),
            }
        })
        .collect();

    let components = system
        .components()
        .map(|(id, kind)| {
            let perf = system.performance(id).cloned().unwrap_or_default();
            ComponentSummary {
                id: id.to_string(),
                kind: kind.type_name().to_string(),
                power_w: perf.power,
                duty_w: perf.duty,
                mdot_kg_s: perf.mdot,
                saturation_pressure_pa: perf.p_sat,
                saturation_temperature_k: perf.t_sat,
                outlet_temperature_k: perf.outlet_temperature,
                inlet_quality: perf.inlet_quality,
                pressure_ratio: perf.pressure_ratio,
                effectiveness: perf.effectiveness,
                zone_areas_m2: perf.zone_areas,
            }
        })
        .collect();

    RunSummary {
        name: name.to_string(),
        system_id: system.id().to_string(),
        iterations: response.report.iterations,
        max_residual: response.report.max_residual,
        warm_restart_iterations: response.warm_report.as_ref().map(|r| r.iterations),
        unknowns: system.unknown_count(),
        equations: system.equation_count(),
        solve_time_s: response.solve_time_s,
        junctions,
        components,
        metrics: response.metrics.clone(),
    }
}

fn opt(v: Option<f64>, precision: usize) -> String {
    match v {
        Some(v) => format!("{v:.precision$}"),
        None => "-".to_string(),
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.system_id)?;
        writeln!(
            f,
            "  converged in {} iterations, max residual {:.3e}, {} unknowns / {} equations",
            self.iterations, self.max_residual, self.unknowns, self.equations
        )?;
        if let Some(n) = self.warm_restart_iterations {
            writeln!(f, "  warm restart: {n} iterations")?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "  {:<14} {:<6} {:>10} {:>12} {:>9} {:>12} {:>8}",
            "junction", "fluid", "mdot[kg/s]", "p[bar]", "T[K]", "h[kJ/kg]", "x[-]"
        )?;
        for j in &self.junctions {
            writeln!(
                f,
                "  {:<14} {:<6} {:>10.5} {:>12.4} {:>9} {:>12.2} {:>8}",
                j.id,
                j.fluid,
                j.mdot_kg_s,
                j.pressure_pa / 1e5,
                opt(j.temperature_k, 2),
                j.enthalpy_j_kg / 1e3,
                opt(j.quality, 3),
            )?;
        }
        writeln!(f)?;

        for c in &self.components {
            write!(f, "  {:<8} {:<22}", c.id, c.kind)?;
            if let Some(p) = c.power_w {
                write!(f, " Pel={p:.1} W")?;
            }
            if let Some(q) = c.duty_w {
                write!(f, " Q={q:.1} W")?;
            }
            if let Some(m) = c.mdot_kg_s {
                write!(f, " mdot={:.3} kg/h", m * 3600.0)?;
            }
            if let Some(t) = c.saturation_temperature_k {
                write!(f, " Tsat={t:.2} K")?;
            }
            if let Some(t) = c.outlet_temperature_k {
                write!(f, " Tout={t:.2} K")?;
            }
            if let Some(r) = c.pressure_ratio {
                write!(f, " PR={r:.3}")?;
            }
            if let Some(e) = c.effectiveness {
                write!(f, " eps={e:.3}")?;
            }
            writeln!(f)?;
        }

        let m = &self.metrics;
        if m.has_data() {
            writeln!(f)?;
            writeln!(f, "  Qdot          {:>10} W", opt(m.evaporator_duty_w, 1))?;
            writeln!(f, "  x_evap_in     {:>10}", opt(m.evaporator_inlet_quality, 3))?;
            writeln!(f, "  T0            {:>10} K", opt(m.evaporating_temperature_k, 2))?;
            writeln!(
                f,
                "  p0            {:>10} bar",
                opt(m.evaporating_pressure_pa.map(|p| p / 1e5), 4)
            )?;
            writeln!(f, "  Vdot_box      {:>10} m3/h", opt(m.box_air_volume_flow_m3_h, 1))?;
            writeln!(
                f,
                "  Vdot_ambient  {:>10} m3/h",
                opt(m.ambient_air_volume_flow_m3_h, 1)
            )?;
            writeln!(f, "  Pel           {:>10} W", opt(m.compressor_power_w, 1))?;
            writeln!(f, "  n             {:>10} rpm", opt(m.compressor_speed_rpm, 0))?;
            writeln!(f, "  COP_refCycle  {:>10}", opt(m.cop_ref_cycle, 3))?;
            writeln!(f, "  COP_ATP       {:>10}", opt(m.cop_atp, 3))?;
            writeln!(f, "  Qdot_ATP      {:>10} W", opt(m.qdot_atp_w, 1))?;
        }
        Ok(())
    }
}
