//! Compilation of a configuration into a solvable `System`.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use vc_components::{
    Ahri540Map, ComponentKind, Compressor, CompressorMap, Condenser, Evaporator,
    InternalHeatExchanger, PolynomialCoefficients, Sink, Source, VolumetricMap,
};
use vc_core::units::{delta_k, k, kgps, m2, m3, pa, rpm, w_per_k};
use vc_core::CompId;
use vc_fluids::{CachedProvider, CoolPropProvider, Fluid, PropertyProvider};
use vc_graph::PortName;
use vc_project::schema::{
    ComponentDef, ComponentKindDef, CompressorMapDef, EnthalpySpec, PressureSpec, Project,
    SystemDef,
};
use vc_solver::{SolverConfig, System, SystemBuilder, SystemConfig};

use crate::error::{AppError, AppResult};

/// Memoized CoolProp backend used by the CLI and the bundled demos.
pub fn default_provider() -> Arc<dyn PropertyProvider> {
    Arc::new(CachedProvider::new(CoolPropProvider::new()))
}

/// Compile the configured system, resolving derived guesses through `props`.
pub fn compile_system(project: &Project, props: Arc<dyn PropertyProvider>) -> AppResult<System> {
    let def = &project.system;
    let mut builder = SystemBuilder::new(system_config(def));

    let mut comp_ids: HashMap<&str, CompId> = HashMap::new();
    for component in &def.components {
        let kind = build_component(component, def, props.as_ref())?;
        let id = builder.add_component(component.id.as_str(), kind);
        comp_ids.insert(component.id.as_str(), id);
    }

    for junction in &def.junctions {
        let fluid = parse_fluid(&junction.fluid)?;
        let endpoint = |component: &str, port: &str| -> AppResult<(CompId, PortName)> {
            let id = comp_ids
                .get(component)
                .copied()
                .ok_or_else(|| AppError::Compile(format!("Component not found: {component}")))?;
            Ok((id, parse_port(port)?))
        };
        let from = endpoint(&junction.from.component, &junction.from.port)?;
        let to = endpoint(&junction.to.component, &junction.to.port)?;

        let guess = &junction.guess;
        let p = resolve_pressure(props.as_ref(), fluid, &guess.pressure)?;
        let h = resolve_enthalpy(props.as_ref(), fluid, p, &guess.enthalpy)?;
        debug!(junction = %junction.id, %fluid, mdot = guess.mdot_kg_s, p, h, "resolved guess");
        builder.add_junction(junction.id.as_str(), fluid, from, to, (guess.mdot_kg_s, p, h));
    }

    Ok(builder.build(props)?)
}

fn system_config(def: &SystemDef) -> SystemConfig {
    let mut config = SystemConfig::new(def.id.as_str());
    config.tolerance = def.tolerance;
    config.solver = SolverConfig {
        max_iterations: def.solver.max_iterations,
        relaxation: def.solver.relaxation,
        max_step: def.solver.max_step,
        parallel_jacobian: def.solver.parallel_jacobian,
        ..SolverConfig::default()
    };
    config
}

fn build_component(
    component: &ComponentDef,
    system: &SystemDef,
    props: &dyn PropertyProvider,
) -> AppResult<ComponentKind> {
    let kind: ComponentKind = match &component.kind {
        ComponentKindDef::Compressor { speed_rpm, map } => {
            Compressor::new(rpm(*speed_rpm), build_compressor_map(map)).into()
        }
        ComponentKindDef::Condenser {
            k: coefficients,
            area_m2,
            subcooling_k,
            air_inlet_temperature_k,
            air_mass_flow_kg_s,
            air_pressure_pa,
            air_fluid,
            boundary_switch,
            limit_temp,
        } => Condenser {
            k: *coefficients,
            area: m2(*area_m2),
            subcooling: delta_k(*subcooling_k),
            air_inlet_temperature: k(*air_inlet_temperature_k),
            air_mass_flow: kgps(*air_mass_flow_kg_s),
            air_pressure: pa(*air_pressure_pa),
            air_fluid: parse_fluid(air_fluid)?,
            boundary_switch: *boundary_switch,
            limit_temp: *limit_temp,
        }
        .into(),
        ComponentKindDef::Evaporator {
            k: coefficients,
            area_m2,
            superheat_k,
            boundary_switch,
            limit_temp,
        } => Evaporator {
            k: *coefficients,
            area: m2(*area_m2),
            superheat: delta_k(*superheat_k),
            boundary_switch: *boundary_switch,
            limit_temp: *limit_temp,
        }
        .into(),
        ComponentKindDef::InternalHeatExchanger {
            ua_w_per_k,
            expansion_at_outlet_a,
        } => InternalHeatExchanger {
            ua: w_per_k(*ua_w_per_k),
            expansion_at_outlet_a: *expansion_at_outlet_a,
        }
        .into(),
        ComponentKindDef::Source {
            pressure,
            enthalpy,
            mdot_kg_s,
        } => {
            let fluid = source_fluid(system, &component.id)?;
            let p = resolve_pressure(props, fluid, pressure)?;
            let h = resolve_enthalpy(props, fluid, p, enthalpy)?;
            Source {
                p: pa(p),
                h,
                mdot: mdot_kg_s.map(kgps),
            }
            .into()
        }
        ComponentKindDef::Sink { pressure_pa } => Sink {
            p: pressure_pa.map(pa),
        }
        .into(),
    };
    Ok(kind)
}

fn build_compressor_map(map: &CompressorMapDef) -> CompressorMap {
    match map {
        CompressorMapDef::Volumetric {
            displacement_m3,
            clearance,
            polytropic_exponent,
            isentropic_efficiency,
            motor_efficiency,
            min_speed_rpm,
            max_speed_rpm,
            max_pressure_ratio,
        } => CompressorMap::Volumetric(VolumetricMap {
            displacement: m3(*displacement_m3),
            clearance: *clearance,
            polytropic_exponent: *polytropic_exponent,
            isentropic_efficiency: *isentropic_efficiency,
            motor_efficiency: *motor_efficiency,
            speed_range: (rpm(*min_speed_rpm), rpm(*max_speed_rpm)),
            max_pressure_ratio: *max_pressure_ratio,
        }),
        CompressorMapDef::Ahri540 {
            mass_flow_coefficients,
            power_coefficients,
            rated_speed_rpm,
            rated_superheat_k,
            heat_loss_fraction,
            speed_range_rpm,
            evaporating_range_k,
            condensing_range_k,
        } => {
            let mut ahri = Ahri540Map::new(
                PolynomialCoefficients(*mass_flow_coefficients),
                PolynomialCoefficients(*power_coefficients),
                rpm(*rated_speed_rpm),
            );
            ahri.rated_superheat = delta_k(*rated_superheat_k);
            ahri.heat_loss_fraction = *heat_loss_fraction;
            if let Some([lo, hi]) = speed_range_rpm {
                ahri.speed_range = (rpm(*lo), rpm(*hi));
            }
            if let Some([lo, hi]) = evaporating_range_k {
                ahri.evaporating_range = (k(*lo), k(*hi));
            }
            if let Some([lo, hi]) = condensing_range_k {
                ahri.condensing_range = (k(*lo), k(*hi));
            }
            CompressorMap::Ahri540(ahri)
        }
    }
}

/// A source takes the fluid of the junction on its `outlet_A`.
fn source_fluid(system: &SystemDef, source_id: &str) -> AppResult<Fluid> {
    let junction = system
        .junctions
        .iter()
        .find(|j| {
            j.from.component == source_id
                && j.from.port.parse::<PortName>() == Ok(PortName::OutletA)
        })
        .ok_or_else(|| {
            AppError::Compile(format!("Source '{source_id}' has no junction on outlet_A"))
        })?;
    parse_fluid(&junction.fluid)
}

/// Pressure [Pa] from a direct value or a saturation temperature.
pub fn resolve_pressure(
    props: &dyn PropertyProvider,
    fluid: Fluid,
    spec: &PressureSpec,
) -> AppResult<f64> {
    match *spec {
        PressureSpec::Value { value_pa } => Ok(value_pa),
        PressureSpec::SaturationTemperature { temperature_k } => {
            Ok(props.saturation_pressure(fluid, temperature_k)?)
        }
    }
}

/// Specific enthalpy [J/kg] at pressure `p` from a direct value, a
/// temperature, or a vapour quality.
pub fn resolve_enthalpy(
    props: &dyn PropertyProvider,
    fluid: Fluid,
    p: f64,
    spec: &EnthalpySpec,
) -> AppResult<f64> {
    match *spec {
        EnthalpySpec::Value { value_j_kg } => Ok(value_j_kg),
        EnthalpySpec::Temperature { temperature_k } => {
            Ok(props.enthalpy_pt(fluid, p, temperature_k)?)
        }
        EnthalpySpec::Quality { quality } => {
            let h_liquid = props.bubble_enthalpy(fluid, p)?;
            let h_vapour = props.dew_enthalpy(fluid, p)?;
            Ok(h_liquid + quality * (h_vapour - h_liquid))
        }
    }
}

fn parse_fluid(name: &str) -> AppResult<Fluid> {
    name.parse::<Fluid>()
        .map_err(|e| AppError::Compile(format!("fluid '{name}': {e}")))
}

fn parse_port(name: &str) -> AppResult<PortName> {
    name.parse::<PortName>().map_err(AppError::Compile)
}
