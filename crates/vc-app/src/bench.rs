//! Single-point compressor bench built on the bundled bench configuration.

use vc_project::schema::{ComponentKindDef, EnthalpySpec, PressureSpec, Project};

use crate::error::{AppError, AppResult};
use crate::project_service::Demo;

/// Operating point of the compressor bench.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchPoint {
    pub speed_rpm: f64,
    pub suction_pressure_pa: f64,
    pub suction_temperature_k: f64,
    pub discharge_pressure_pa: f64,
}

impl Default for BenchPoint {
    fn default() -> Self {
        Self {
            speed_rpm: 3000.0,
            suction_pressure_pa: 2.764e5,
            suction_temperature_k: 291.606,
            discharge_pressure_pa: 20.666e5,
        }
    }
}

/// The bundled bench with `point` applied to its source, compressor and sink.
pub fn bench_project(point: &BenchPoint) -> AppResult<Project> {
    let mut project = Demo::CompressorBench.load()?;
    let system = &mut project.system;

    for component in &mut system.components {
        match &mut component.kind {
            ComponentKindDef::Source {
                pressure, enthalpy, ..
            } => {
                *pressure = PressureSpec::Value {
                    value_pa: point.suction_pressure_pa,
                };
                *enthalpy = EnthalpySpec::Temperature {
                    temperature_k: point.suction_temperature_k,
                };
            }
            ComponentKindDef::Compressor { speed_rpm, .. } => *speed_rpm = point.speed_rpm,
            ComponentKindDef::Sink { pressure_pa } => {
                *pressure_pa = Some(point.discharge_pressure_pa);
            }
            _ => {}
        }
    }

    // Guesses follow the imposed pressures; the discharge enthalpy guess is kept.
    for junction in &mut system.junctions {
        let guess = &mut junction.guess;
        if junction.from.component == "src" {
            guess.pressure = PressureSpec::Value {
                value_pa: point.suction_pressure_pa,
            };
            guess.enthalpy = EnthalpySpec::Temperature {
                temperature_k: point.suction_temperature_k,
            };
        } else {
            guess.pressure = PressureSpec::Value {
                value_pa: point.discharge_pressure_pa,
            };
        }
    }

    vc_project::validate_config(&project)
        .map_err(|e| AppError::InvalidInput(format!("bench point: {e}")))?;
    Ok(project)
}
