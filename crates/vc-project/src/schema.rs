//! Configuration schema definitions.
//!
//! Field names carry their SI unit (`_pa`, `_k`, `_kg_s`, ...); speeds are
//! given in rpm.

use serde::{Deserialize, Serialize};

/// Newest schema version this crate reads.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub system: SystemDef,
    #[serde(default)]
    pub report: ReportDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemDef {
    pub id: String,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub solver: SolverDef,
    pub components: Vec<ComponentDef>,
    pub junctions: Vec<JunctionDef>,
}

fn default_tolerance() -> f64 {
    1e-6
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    pub max_iterations: usize,
    pub relaxation: f64,
    pub max_step: f64,
    pub parallel_jacobian: bool,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            relaxation: 1.0,
            max_step: 0.5,
            parallel_jacobian: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub id: String,
    pub kind: ComponentKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ComponentKindDef {
    Compressor {
        speed_rpm: f64,
        map: CompressorMapDef,
    },
    Condenser {
        /// Desuperheating, condensing, subcooling [W/(m2 K)].
        k: [f64; 3],
        area_m2: f64,
        subcooling_k: f64,
        air_inlet_temperature_k: f64,
        air_mass_flow_kg_s: f64,
        #[serde(default = "default_air_pressure")]
        air_pressure_pa: f64,
        #[serde(default = "default_air_fluid")]
        air_fluid: String,
        #[serde(default)]
        boundary_switch: bool,
        #[serde(default)]
        limit_temp: bool,
    },
    Evaporator {
        /// Evaporating, superheating [W/(m2 K)].
        k: [f64; 2],
        area_m2: f64,
        superheat_k: f64,
        #[serde(default)]
        boundary_switch: bool,
        #[serde(default)]
        limit_temp: bool,
    },
    InternalHeatExchanger {
        ua_w_per_k: f64,
        #[serde(default = "default_true")]
        expansion_at_outlet_a: bool,
    },
    Source {
        pressure: PressureSpec,
        enthalpy: EnthalpySpec,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mdot_kg_s: Option<f64>,
    },
    Sink {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pressure_pa: Option<f64>,
    },
}

impl ComponentKindDef {
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentKindDef::Compressor { .. } => "Compressor",
            ComponentKindDef::Condenser { .. } => "Condenser",
            ComponentKindDef::Evaporator { .. } => "Evaporator",
            ComponentKindDef::InternalHeatExchanger { .. } => "InternalHeatExchanger",
            ComponentKindDef::Source { .. } => "Source",
            ComponentKindDef::Sink { .. } => "Sink",
        }
    }
}

fn default_air_pressure() -> f64 {
    1e5
}

fn default_air_fluid() -> String {
    "Air".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CompressorMapDef {
    Volumetric {
        displacement_m3: f64,
        clearance: f64,
        polytropic_exponent: f64,
        isentropic_efficiency: f64,
        motor_efficiency: f64,
        min_speed_rpm: f64,
        max_speed_rpm: f64,
        max_pressure_ratio: f64,
    },
    Ahri540 {
        /// Mass flow [kg/h] in dew temperatures [degC].
        mass_flow_coefficients: [f64; 10],
        /// Electrical power [W] in dew temperatures [degC].
        power_coefficients: [f64; 10],
        rated_speed_rpm: f64,
        #[serde(default = "default_rated_superheat")]
        rated_superheat_k: f64,
        #[serde(default)]
        heat_loss_fraction: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed_range_rpm: Option<[f64; 2]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        evaporating_range_k: Option<[f64; 2]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condensing_range_k: Option<[f64; 2]>,
    },
}

fn default_rated_superheat() -> f64 {
    10.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortRefDef {
    pub component: String,
    pub port: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JunctionDef {
    pub id: String,
    pub fluid: String,
    pub from: PortRefDef,
    pub to: PortRefDef,
    pub guess: GuessDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuessDef {
    pub mdot_kg_s: f64,
    pub pressure: PressureSpec,
    pub enthalpy: EnthalpySpec,
}

/// Pressure given directly or as the saturation pressure at a temperature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PressureSpec {
    Value { value_pa: f64 },
    SaturationTemperature { temperature_k: f64 },
}

/// Enthalpy given directly, from a temperature, or from a vapour quality, each
/// at the accompanying pressure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum EnthalpySpec {
    Value { value_j_kg: f64 },
    Temperature { temperature_k: f64 },
    Quality { quality: f64 },
}

/// Inputs for the cycle metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportDef {
    pub evaporator: Option<String>,
    pub compressor: Option<String>,
    pub condenser: Option<String>,
    pub evaporator_fan_power_w: f64,
    pub condenser_fan_power_w: f64,
    pub housing_loss_w: f64,
}

impl Default for ReportDef {
    fn default() -> Self {
        Self {
            evaporator: None,
            compressor: None,
            condenser: None,
            evaporator_fan_power_w: 200.0,
            condenser_fan_power_w: 200.0,
            housing_loss_w: 50.0,
        }
    }
}
