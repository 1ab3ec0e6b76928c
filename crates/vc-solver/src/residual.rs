//! Residual assembly over junction states.

use nalgebra::DVector;
use vc_components::{ComponentKind, CycleComponent, Evaluation, PortStates, StateVar};
use vc_core::CompId;
use vc_fluids::{PropertyProvider, StreamState};
use vc_graph::Graph;

use crate::error::{SolverError, SolverResult};

/// Unknowns per junction: mdot, p, h.
pub(crate) const VARS_PER_JUNCTION: usize = 3;

pub(crate) fn var_offset(var: StateVar) -> usize {
    match var {
        StateVar::MassFlow => 0,
        StateVar::Pressure => 1,
        StateVar::Enthalpy => 2,
    }
}

/// Scale of each unknown, taken from the starting states.
pub(crate) fn scales_for(states: &[StreamState]) -> Vec<f64> {
    states
        .iter()
        .flat_map(|s| [s.mdot.abs().max(1e-4), s.p.abs().max(1e3), s.h.abs().max(1e4)])
        .collect()
}

/// Maps scaled unknown vectors to junction states and component residuals.
pub(crate) struct ResidualModel<'a> {
    pub graph: &'a Graph,
    pub components: &'a [ComponentKind],
    pub props: &'a dyn PropertyProvider,
    /// Template states carrying each junction's fluid.
    pub templates: &'a [StreamState],
    pub scales: Vec<f64>,
    pub min_pressure: f64,
}

impl ResidualModel<'_> {
    pub fn scale(&self, states: &[StreamState]) -> DVector<f64> {
        let raw = states.iter().flat_map(|s| [s.mdot, s.p, s.h]);
        DVector::from_iterator(
            states.len() * VARS_PER_JUNCTION,
            raw.zip(&self.scales).map(|(v, s)| v / s),
        )
    }

    pub fn unscale(&self, z: &DVector<f64>) -> Vec<StreamState> {
        self.templates
            .iter()
            .enumerate()
            .map(|(j, t)| {
                let b = j * VARS_PER_JUNCTION;
                StreamState::new(
                    t.fluid,
                    z[b] * self.scales[b],
                    z[b + 1] * self.scales[b + 1],
                    z[b + 2] * self.scales[b + 2],
                )
            })
            .collect()
    }

    /// Finite, non-negative mass flows, pressures above the floor.
    pub fn admissible(&self, z: &DVector<f64>) -> bool {
        self.unscale(z)
            .iter()
            .all(|s| s.is_finite() && s.mdot >= 0.0 && s.p > self.min_pressure)
    }

    fn port_states(&self, comp: CompId, kind: &ComponentKind, states: &[StreamState]) -> SolverResult<PortStates> {
        let mut ports = PortStates::new();
        for &port in kind.ports() {
            let j = self
                .graph
                .junction_at(comp, port)
                .ok_or_else(|| SolverError::configuration(format!("port {port} of component {comp} has no junction")))?;
            ports.set(port, states[j.slot()]);
        }
        Ok(ports)
    }

    /// Evaluate every component in arena order.
    pub fn evaluate(&self, states: &[StreamState]) -> SolverResult<Vec<Evaluation>> {
        self.graph
            .components()
            .iter()
            .zip(self.components)
            .map(|(c, kind)| {
                let ports = self.port_states(c.id, kind, states)?;
                kind.evaluate(self.props, &ports).map_err(|e| {
                    let err = SolverError::from(e);
                    match err {
                        SolverError::InvalidState { what } => SolverError::InvalidState {
                            what: format!("{}: {what}", c.name),
                        },
                        other => other,
                    }
                })
            })
            .collect()
    }

    /// Scaled residual vector: `(target - current) / scale` for every target,
    /// followed by each component's closures.
    pub fn residual(&self, z: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let states = self.unscale(z);
        let evaluations = self.evaluate(&states)?;
        let mut r = Vec::with_capacity(z.len() + 1);
        for ((c, kind), eval) in self.graph.components().iter().zip(self.components).zip(&evaluations) {
            let declared = kind.equations().len();
            if eval.equation_count() != declared {
                return Err(SolverError::configuration(format!(
                    "{} produced {} equations, declared {}",
                    c.name,
                    eval.equation_count(),
                    declared
                )));
            }
            for t in &eval.targets {
                let j = self
                    .graph
                    .junction_at(c.id, t.port)
                    .ok_or_else(|| SolverError::configuration(format!("{} targets unconnected port {}", c.name, t.port)))?;
                let idx = j.slot() * VARS_PER_JUNCTION + var_offset(t.var);
                let scale = self.scales[idx];
                r.push((t.value - z[idx] * scale) / scale);
            }
            r.extend_from_slice(&eval.closures);
        }
        if r.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::invalid_state("non-finite residual"));
        }
        Ok(DVector::from_vec(r))
    }
}
