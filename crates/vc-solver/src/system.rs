//! The cycle system: graph, component models, junction states and the
//! solve lifecycle.

use std::sync::Arc;

use tracing::{info, warn};
use vc_components::{ComponentKind, CycleComponent, Performance};
use vc_core::{CompId, JunctionId};
use vc_fluids::{Fluid, PropertyProvider, StreamState};
use vc_graph::{Graph, GraphBuilder, Junction, PortName};

use crate::config::SystemConfig;
use crate::error::{SolverError, SolverResult};
use crate::newton::newton_solve;
use crate::residual::{ResidualModel, VARS_PER_JUNCTION, scales_for};

/// Solver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Uninitialized,
    Initialized,
    Iterating,
    Converged,
    Failed,
}

/// Summary of a successful `run()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub iterations: usize,
    pub max_residual: f64,
}

/// Read-only view of one junction.
#[derive(Debug, Clone, Copy)]
pub struct JunctionView<'a> {
    pub junction: &'a Junction,
    pub state: &'a StreamState,
    pub guess: &'a StreamState,
}

/// Incremental construction of a `System`.
pub struct SystemBuilder {
    config: SystemConfig,
    graph: GraphBuilder,
    components: Vec<ComponentKind>,
    guesses: Vec<StreamState>,
}

impl SystemBuilder {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            graph: GraphBuilder::new(),
            components: Vec::new(),
            guesses: Vec::new(),
        }
    }

    /// Add a component; its ports follow from its kind.
    pub fn add_component(&mut self, name: impl Into<String>, kind: impl Into<ComponentKind>) -> CompId {
        let kind = kind.into();
        let id = self.graph.add_component(name, kind.ports());
        self.components.push(kind);
        id
    }

    /// Connect `from` (an outlet) to `to` (an inlet) with an initial guess
    /// `(mdot [kg/s], p [Pa], h [J/kg])`.
    pub fn add_junction(
        &mut self,
        name: impl Into<String>,
        fluid: Fluid,
        from: (CompId, PortName),
        to: (CompId, PortName),
        guess: (f64, f64, f64),
    ) -> JunctionId {
        let (mdot, p, h) = guess;
        self.guesses.push(StreamState::new(fluid, mdot, p, h));
        self.graph.add_junction(name, fluid, from, to)
    }

    /// Validate graph, parameters and guesses.
    pub fn build(self, props: Arc<dyn PropertyProvider>) -> SolverResult<System> {
        self.config.check().map_err(SolverError::configuration)?;
        let graph = self.graph.build()?;

        for (c, kind) in graph.components().iter().zip(&self.components) {
            kind.validate().map_err(|e| SolverError::configuration(format!("{}: {e}", c.name)))?;
        }
        for (j, guess) in graph.junctions().iter().zip(&self.guesses) {
            if !(guess.is_finite() && guess.p > 0.0 && guess.mdot >= 0.0) {
                return Err(SolverError::configuration(format!(
                    "junction '{}' has an invalid initial guess {:?}",
                    j.name, guess
                )));
            }
            if !props.supports(j.fluid) {
                return Err(SolverError::configuration(format!(
                    "property provider '{}' does not support {} on junction '{}'",
                    props.name(),
                    j.fluid,
                    j.name
                )));
            }
        }

        Ok(System {
            states: self.guesses.clone(),
            guesses: self.guesses,
            performance: vec![Performance::default(); self.components.len()],
            components: self.components,
            graph,
            config: self.config,
            props,
            status: SolveStatus::Uninitialized,
            iterations: 0,
            residual_history: Vec::new(),
        })
    }
}

/// A configured cycle, ready to be initialized and solved.
pub struct System {
    config: SystemConfig,
    graph: Graph,
    components: Vec<ComponentKind>,
    guesses: Vec<StreamState>,
    states: Vec<StreamState>,
    performance: Vec<Performance>,
    props: Arc<dyn PropertyProvider>,
    status: SolveStatus,
    iterations: usize,
    residual_history: Vec<f64>,
}

impl System {
    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Largest scaled residual after each iteration of the last run.
    pub fn residual_history(&self) -> &[f64] {
        &self.residual_history
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn props(&self) -> &dyn PropertyProvider {
        self.props.as_ref()
    }

    pub fn unknown_count(&self) -> usize {
        self.graph.junctions().len() * VARS_PER_JUNCTION
    }

    pub fn equation_count(&self) -> usize {
        self.components.iter().map(|c| c.equations().len()).sum()
    }

    /// Current junction states in junction-id order.
    pub fn states(&self) -> &[StreamState] {
        &self.states
    }

    pub fn junctions(&self) -> impl Iterator<Item = JunctionView<'_>> {
        self.graph
            .junctions()
            .iter()
            .zip(&self.states)
            .zip(&self.guesses)
            .map(|((junction, state), guess)| JunctionView {
                junction,
                state,
                guess,
            })
    }

    pub fn junction(&self, name: &str) -> Option<JunctionView<'_>> {
        self.junctions().find(|v| v.junction.name == name)
    }

    pub fn junction_state(&self, name: &str) -> Option<&StreamState> {
        self.junction(name).map(|v| v.state)
    }

    pub fn component(&self, name: &str) -> Option<&ComponentKind> {
        let c = self.graph.component_by_name(name)?;
        self.components.get(c.id.slot())
    }

    /// Performance of a component at the last accepted iterate.
    pub fn performance(&self, name: &str) -> Option<&Performance> {
        let c = self.graph.component_by_name(name)?;
        self.performance.get(c.id.slot())
    }

    /// Components with their names, in arena order.
    pub fn components(&self) -> impl Iterator<Item = (&str, &ComponentKind)> {
        self.graph
            .components()
            .iter()
            .zip(&self.components)
            .map(|(c, k)| (c.name.as_str(), k))
    }

    /// State of the junction attached to `port` of component `name`.
    pub fn port_state(&self, name: &str, port: PortName) -> Option<&StreamState> {
        let c = self.graph.component_by_name(name)?;
        let j = self.graph.junction_at(c.id, port)?;
        self.states.get(j.slot())
    }

    /// Seed every junction from its guess and check the equation balance.
    pub fn initialize(&mut self) -> SolverResult<()> {
        self.states.clone_from(&self.guesses);
        self.iterations = 0;
        self.residual_history.clear();
        self.performance = vec![Performance::default(); self.components.len()];

        let unknowns = self.unknown_count();
        let equations = self.equation_count();
        if equations < unknowns {
            self.status = SolveStatus::Uninitialized;
            return Err(SolverError::configuration(format!(
                "underdetermined system '{}': {equations} equations for {unknowns} unknowns",
                self.config.id
            )));
        }
        if equations > unknowns {
            warn!(
                system = %self.config.id,
                equations,
                unknowns,
                "more equations than unknowns; solving in the least-squares sense"
            );
        }
        self.status = SolveStatus::Initialized;
        Ok(())
    }

    /// Iterate to convergence from the initialized states.
    pub fn run(&mut self) -> SolverResult<SolveReport> {
        if self.status != SolveStatus::Initialized {
            return Err(SolverError::configuration(format!(
                "run() requires an initialized system (status {:?})",
                self.status
            )));
        }
        self.status = SolveStatus::Iterating;
        info!(
            system = %self.config.id,
            unknowns = self.unknown_count(),
            equations = self.equation_count(),
            "solving"
        );

        let model = ResidualModel {
            graph: &self.graph,
            components: &self.components,
            props: self.props.as_ref(),
            templates: &self.states,
            scales: scales_for(&self.states),
            min_pressure: self.config.solver.min_pressure,
        };
        let z0 = model.scale(&self.states);
        let outcome = newton_solve(
            z0,
            |z| model.residual(z),
            |z| model.admissible(z),
            self.config.tolerance,
            &self.config.solver,
        );

        let outcome = match outcome {
            Ok(o) => o,
            Err(e) => {
                self.status = SolveStatus::Failed;
                warn!(system = %self.config.id, error = %e, "solve aborted");
                return Err(e);
            }
        };

        let states = model.unscale(&outcome.x);
        let performance = model.evaluate(&states);
        self.states = states;
        self.iterations = outcome.iterations;
        self.residual_history = outcome.history;
        match performance {
            Ok(evals) => self.performance = evals.into_iter().map(|e| e.performance).collect(),
            Err(e) => {
                self.status = SolveStatus::Failed;
                return Err(e);
            }
        }
        if let Some(e) = outcome.failure {
            self.status = SolveStatus::Failed;
            warn!(
                system = %self.config.id,
                iterations = outcome.iterations,
                max_residual = outcome.max_residual,
                error = %e,
                "solve aborted at the last accepted iterate"
            );
            return Err(e);
        }

        if outcome.converged {
            self.status = SolveStatus::Converged;
            info!(
                system = %self.config.id,
                iterations = outcome.iterations,
                max_residual = outcome.max_residual,
                "converged"
            );
            Ok(SolveReport {
                iterations: outcome.iterations,
                max_residual: outcome.max_residual,
            })
        } else {
            self.status = SolveStatus::Failed;
            warn!(
                system = %self.config.id,
                iterations = outcome.iterations,
                max_residual = outcome.max_residual,
                stalled = outcome.stalled,
                "failed to converge"
            );
            Err(SolverError::FailedToConverge {
                iterations: outcome.iterations,
                max_residual: outcome.max_residual,
                last_iterate: self.states.clone(),
            })
        }
    }

    /// Copy the current junction states into the initial guesses.
    pub fn reseed_from_current(&mut self) {
        self.guesses.clone_from(&self.states);
    }

    /// Replace one junction's guess.
    pub fn set_guess(&mut self, name: &str, guess: StreamState) -> SolverResult<()> {
        let j = self
            .graph
            .junction_by_name(name)
            .ok_or_else(|| SolverError::configuration(format!("unknown junction '{name}'")))?;
        if guess.fluid != j.fluid {
            return Err(SolverError::configuration(format!(
                "guess for '{name}' is {} but the junction carries {}",
                guess.fluid, j.fluid
            )));
        }
        self.guesses[j.id.slot()] = guess;
        self.status = SolveStatus::Uninitialized;
        Ok(())
    }
}
