//! Configuration validation logic.
//!
//! Structural checks only: identifiers, references, port and fluid names and
//! obviously out-of-range numbers. Physical parameter checks happen when the
//! components are built.

use crate::schema::{
    ComponentKindDef, CompressorMapDef, EnthalpySpec, GuessDef, JunctionDef, PressureSpec,
    Project, ReportDef, SystemDef,
};
use std::collections::HashSet;
use vc_fluids::Fluid;
use vc_graph::PortName;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > crate::schema::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_system(&project.system)?;
    validate_report(&project.report, &project.system)
}

fn validate_system(system: &SystemDef) -> Result<(), ValidationError> {
    if !(system.tolerance.is_finite() && system.tolerance > 0.0) {
        return Err(invalid("tolerance", system.tolerance, "must be positive"));
    }
    if system.solver.max_iterations == 0 {
        return Err(invalid(
            "solver.max_iterations",
            system.solver.max_iterations,
            "must be at least 1",
        ));
    }
    let relaxation = system.solver.relaxation;
    if !(relaxation > 0.0 && relaxation <= 1.0) {
        return Err(invalid("solver.relaxation", relaxation, "must be in (0, 1]"));
    }
    if !(system.solver.max_step.is_finite() && system.solver.max_step > 0.0) {
        return Err(invalid(
            "solver.max_step",
            system.solver.max_step,
            "must be positive",
        ));
    }

    let mut component_ids = HashSet::new();
    for component in &system.components {
        if !component_ids.insert(component.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: component.id.clone(),
                context: "components".to_string(),
            });
        }
        validate_component_kind(&component.id, &component.kind)?;
    }

    let mut junction_ids = HashSet::new();
    for junction in &system.junctions {
        if !junction_ids.insert(junction.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: junction.id.clone(),
                context: "junctions".to_string(),
            });
        }
        validate_junction(junction, &component_ids)?;
    }

    Ok(())
}

fn validate_component_kind(id: &str, kind: &ComponentKindDef) -> Result<(), ValidationError> {
    match kind {
        ComponentKindDef::Compressor { speed_rpm, map } => {
            require_positive(&format!("{id}.speed_rpm"), *speed_rpm)?;
            match map {
                CompressorMapDef::Volumetric {
                    min_speed_rpm,
                    max_speed_rpm,
                    ..
                } => {
                    if min_speed_rpm > max_speed_rpm {
                        return Err(invalid(
                            &format!("{id}.map.min_speed_rpm"),
                            min_speed_rpm,
                            "exceeds max_speed_rpm",
                        ));
                    }
                }
                CompressorMapDef::Ahri540 {
                    rated_speed_rpm, ..
                } => require_positive(&format!("{id}.map.rated_speed_rpm"), *rated_speed_rpm)?,
            }
        }
        ComponentKindDef::Condenser {
            area_m2,
            air_mass_flow_kg_s,
            air_fluid,
            ..
        } => {
            require_positive(&format!("{id}.area_m2"), *area_m2)?;
            require_positive(&format!("{id}.air_mass_flow_kg_s"), *air_mass_flow_kg_s)?;
            parse_fluid(&format!("{id}.air_fluid"), air_fluid)?;
        }
        ComponentKindDef::Evaporator { area_m2, .. } => {
            require_positive(&format!("{id}.area_m2"), *area_m2)?;
        }
        ComponentKindDef::InternalHeatExchanger { ua_w_per_k, .. } => {
            if !(ua_w_per_k.is_finite() && *ua_w_per_k >= 0.0) {
                return Err(invalid(
                    &format!("{id}.ua_w_per_k"),
                    ua_w_per_k,
                    "must be non-negative",
                ));
            }
        }
        ComponentKindDef::Source {
            pressure,
            enthalpy,
            mdot_kg_s,
        } => {
            validate_pressure_spec(&format!("{id}.pressure"), pressure)?;
            validate_enthalpy_spec(&format!("{id}.enthalpy"), enthalpy)?;
            if let Some(mdot) = mdot_kg_s {
                require_non_negative(&format!("{id}.mdot_kg_s"), *mdot)?;
            }
        }
        ComponentKindDef::Sink { pressure_pa } => {
            if let Some(p) = pressure_pa {
                require_positive(&format!("{id}.pressure_pa"), *p)?;
            }
        }
    }
    Ok(())
}

fn validate_junction(
    junction: &JunctionDef,
    component_ids: &HashSet<&str>,
) -> Result<(), ValidationError> {
    parse_fluid(&format!("{}.fluid", junction.id), &junction.fluid)?;

    for (end, port_ref) in [("from", &junction.from), ("to", &junction.to)] {
        if !component_ids.contains(port_ref.component.as_str()) {
            return Err(ValidationError::MissingReference {
                id: port_ref.component.clone(),
                context: format!("junction {} {end}", junction.id),
            });
        }
        if port_ref.port.parse::<PortName>().is_err() {
            return Err(invalid(
                &format!("{}.{end}.port", junction.id),
                &port_ref.port,
                "unknown port name",
            ));
        }
    }

    validate_guess(&junction.id, &junction.guess)
}

fn validate_guess(junction: &str, guess: &GuessDef) -> Result<(), ValidationError> {
    require_non_negative(&format!("{junction}.guess.mdot_kg_s"), guess.mdot_kg_s)?;
    validate_pressure_spec(&format!("{junction}.guess.pressure"), &guess.pressure)?;
    validate_enthalpy_spec(&format!("{junction}.guess.enthalpy"), &guess.enthalpy)
}

fn validate_pressure_spec(field: &str, spec: &PressureSpec) -> Result<(), ValidationError> {
    match spec {
        PressureSpec::Value { value_pa } => require_positive(field, *value_pa),
        PressureSpec::SaturationTemperature { temperature_k } => {
            require_positive(field, *temperature_k)
        }
    }
}

fn validate_enthalpy_spec(field: &str, spec: &EnthalpySpec) -> Result<(), ValidationError> {
    match spec {
        EnthalpySpec::Value { value_j_kg } => {
            if value_j_kg.is_finite() {
                Ok(())
            } else {
                Err(invalid(field, value_j_kg, "must be finite"))
            }
        }
        EnthalpySpec::Temperature { temperature_k } => require_positive(field, *temperature_k),
        EnthalpySpec::Quality { quality } => {
            if (0.0..=1.0).contains(quality) {
                Ok(())
            } else {
                Err(invalid(field, quality, "quality must be in [0, 1]"))
            }
        }
    }
}

fn validate_report(report: &ReportDef, system: &SystemDef) -> Result<(), ValidationError> {
    let refs = [
        ("report.evaporator", &report.evaporator),
        ("report.compressor", &report.compressor),
        ("report.condenser", &report.condenser),
    ];
    for (context, id) in refs {
        let Some(id) = id else { continue };
        if !system.components.iter().any(|c| &c.id == id) {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context: context.to_string(),
            });
        }
    }

    require_non_negative("report.evaporator_fan_power_w", report.evaporator_fan_power_w)?;
    require_non_negative("report.condenser_fan_power_w", report.condenser_fan_power_w)?;
    require_non_negative("report.housing_loss_w", report.housing_loss_w)
}

fn parse_fluid(field: &str, name: &str) -> Result<Fluid, ValidationError> {
    name.parse::<Fluid>()
        .map_err(|reason| invalid(field, name, reason))
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative"))
    }
}

fn invalid(field: &str, value: impl std::fmt::Display, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ComponentDef, PortRefDef, SolverDef};

    fn source_sink() -> Project {
        Project {
            version: 1,
            name: "open line".to_string(),
            system: SystemDef {
                id: "line".to_string(),
                tolerance: 1e-6,
                solver: SolverDef::default(),
                components: vec![
                    ComponentDef {
                        id: "src".to_string(),
                        kind: ComponentKindDef::Source {
                            pressure: PressureSpec::Value { value_pa: 1e5 },
                            enthalpy: EnthalpySpec::Temperature {
                                temperature_k: 300.0,
                            },
                            mdot_kg_s: Some(0.1),
                        },
                    },
                    ComponentDef {
                        id: "snk".to_string(),
                        kind: ComponentKindDef::Sink { pressure_pa: None },
                    },
                ],
                junctions: vec![JunctionDef {
                    id: "src_snk".to_string(),
                    fluid: "Air".to_string(),
                    from: PortRefDef {
                        component: "src".to_string(),
                        port: "outlet_A".to_string(),
                    },
                    to: PortRefDef {
                        component: "snk".to_string(),
                        port: "inlet_A".to_string(),
                    },
                    guess: GuessDef {
                        mdot_kg_s: 0.1,
                        pressure: PressureSpec::Value { value_pa: 1e5 },
                        enthalpy: EnthalpySpec::Temperature {
                            temperature_k: 300.0,
                        },
                    },
                }],
            },
            report: ReportDef::default(),
        }
    }

    #[test]
    fn accepts_minimal_config() {
        assert!(validate_config(&source_sink()).is_ok());
    }

    #[test]
    fn rejects_future_version() {
        let mut project = source_sink();
        project.version = 99;
        assert!(matches!(
            validate_config(&project),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn rejects_duplicate_component() {
        let mut project = source_sink();
        let dup = project.system.components[0].clone();
        project.system.components.push(dup);
        assert!(matches!(
            validate_config(&project),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_unknown_component_reference() {
        let mut project = source_sink();
        project.system.junctions[0].to.component = "nowhere".to_string();
        assert!(matches!(
            validate_config(&project),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn rejects_bad_port_name() {
        let mut project = source_sink();
        project.system.junctions[0].from.port = "outlet_C".to_string();
        assert!(matches!(
            validate_config(&project),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_unknown_fluid() {
        let mut project = source_sink();
        project.system.junctions[0].fluid = "unobtainium".to_string();
        let err = validate_config(&project).unwrap_err();
        assert!(err.to_string().contains("unobtainium"));
    }

    #[test]
    fn rejects_quality_out_of_range() {
        let mut project = source_sink();
        project.system.junctions[0].guess.enthalpy = EnthalpySpec::Quality { quality: 1.5 };
        assert!(validate_config(&project).is_err());
    }

    #[test]
    fn rejects_dangling_report_reference() {
        let mut project = source_sink();
        project.report.evaporator = Some("evap".to_string());
        assert!(matches!(
            validate_config(&project),
            Err(ValidationError::MissingReference { .. })
        ));
    }
}
