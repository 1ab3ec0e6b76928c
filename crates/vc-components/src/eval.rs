//! Evaluation inputs and outputs shared by all component models.

use vc_fluids::StreamState;
use vc_graph::PortName;

use crate::error::{ComponentError, ComponentResult};

/// One of the three solved variables of a junction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateVar {
    MassFlow,
    Pressure,
    Enthalpy,
}

impl StateVar {
    pub fn of(self, state: &StreamState) -> f64 {
        match self {
            StateVar::MassFlow => state.mdot,
            StateVar::Pressure => state.p,
            StateVar::Enthalpy => state.h,
        }
    }
}

/// Static description of one equation a component contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equation {
    /// The component fixes `var` of the state at `port`.
    Target { port: PortName, var: StateVar },
    /// A dimensionless internal balance that must vanish.
    Closure { name: &'static str },
}

/// Value a component wants a port state variable to have.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub port: PortName,
    pub var: StateVar,
    pub value: f64,
}

impl Target {
    pub fn new(port: PortName, var: StateVar, value: f64) -> Self {
        Self { port, var, value }
    }
}

/// Reported operating data. Fields a component doesn't produce stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Performance {
    /// Electrical power drawn [W].
    pub power: Option<f64>,
    /// Heat transferred [W], positive into the refrigerant for evaporators.
    pub duty: Option<f64>,
    /// Refrigerant mass flow [kg/s].
    pub mdot: Option<f64>,
    /// Saturation pressure of a two-phase exchanger [Pa].
    pub p_sat: Option<f64>,
    /// Saturation (dew) temperature [K].
    pub t_sat: Option<f64>,
    /// Refrigerant outlet temperature [K].
    pub outlet_temperature: Option<f64>,
    /// Vapour quality at the refrigerant inlet, if two-phase.
    pub inlet_quality: Option<f64>,
    pub pressure_ratio: Option<f64>,
    pub effectiveness: Option<f64>,
    /// Required area per active zone [m2], in refrigerant flow order.
    pub zone_areas: Vec<f64>,
}

/// Result of one component evaluation.
///
/// `targets` and `closures` always have the shapes declared by the
/// component's `equations()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub targets: Vec<Target>,
    pub closures: Vec<f64>,
    pub performance: Performance,
}

impl Evaluation {
    pub fn equation_count(&self) -> usize {
        self.targets.len() + self.closures.len()
    }
}

/// Current states of a component's ports.
#[derive(Debug, Clone, Default)]
pub struct PortStates {
    states: [Option<StreamState>; 4],
}

fn slot(port: PortName) -> usize {
    match port {
        PortName::InletA => 0,
        PortName::OutletA => 1,
        PortName::InletB => 2,
        PortName::OutletB => 3,
    }
}

impl PortStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, port: PortName, state: StreamState) -> Self {
        self.set(port, state);
        self
    }

    pub fn set(&mut self, port: PortName, state: StreamState) {
        self.states[slot(port)] = Some(state);
    }

    pub fn get(&self, port: PortName) -> ComponentResult<&StreamState> {
        self.states[slot(port)]
            .as_ref()
            .ok_or(ComponentError::MissingPort { port })
    }
}
