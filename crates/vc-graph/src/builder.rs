//! Incremental graph builder.

use vc_core::{CompId, JunctionId, PortId};
use vc_fluids::Fluid;

use crate::error::GraphResult;
use crate::graph::{Component, Graph, Port, PortName};
use crate::validate;

/// Junction as declared, before its endpoints are resolved to port ids.
#[derive(Debug, Clone)]
pub(crate) struct PendingJunction {
    pub name: String,
    pub fluid: Fluid,
    pub from: (CompId, PortName),
    pub to: (CompId, PortName),
}

/// Builder for constructing a graph incrementally.
///
/// Add components with their port sets, connect them with junctions, then
/// call `build()` to validate and freeze everything into an immutable `Graph`.
/// Endpoint errors (unknown ports, wrong direction) are reported by `build()`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    components: Vec<Component>,
    ports: Vec<Port>,
    junctions: Vec<PendingJunction>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component exposing `ports` and return its id.
    pub fn add_component(&mut self, name: impl Into<String>, ports: &[PortName]) -> CompId {
        let comp_id = CompId::from_index(self.components.len() as u32);
        let mut ids = Vec::with_capacity(ports.len());
        for &port in ports {
            let id = PortId::from_index(self.ports.len() as u32);
            self.ports.push(Port {
                id,
                comp: comp_id,
                name: port,
            });
            ids.push(id);
        }
        self.components.push(Component {
            id: comp_id,
            name: name.into(),
            ports: ids,
        });
        comp_id
    }

    /// Connect an outlet port (`from`) to an inlet port (`to`).
    pub fn add_junction(
        &mut self,
        name: impl Into<String>,
        fluid: Fluid,
        from: (CompId, PortName),
        to: (CompId, PortName),
    ) -> JunctionId {
        let id = JunctionId::from_index(self.junctions.len() as u32);
        self.junctions.push(PendingJunction {
            name: name.into(),
            fluid,
            from,
            to,
        });
        id
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> GraphResult<Graph> {
        validate::check_unique_names(&self.components, &self.junctions)?;
        let junctions = validate::resolve_junctions(&self.components, &self.ports, &self.junctions)?;
        let port_junction = validate::check_port_coverage(&self.components, &self.ports, &junctions)?;
        validate::check_stream_fluids(&self.components, &self.ports, &junctions, &port_junction)?;
        validate::check_connected(&self.components, &self.ports, &junctions)?;

        Ok(Graph {
            components: self.components,
            ports: self.ports,
            junctions,
            port_junction,
        })
    }
}
