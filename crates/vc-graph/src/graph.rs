//! Core graph data structures.

use std::fmt;
use std::str::FromStr;

use vc_core::{CompId, JunctionId, PortId};
use vc_fluids::Fluid;

/// Direction of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Fluid enters the component here.
    Inlet,
    /// Fluid leaves the component here.
    Outlet,
}

/// A component carries up to two separate streams through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stream {
    A,
    B,
}

/// Named ports. `inlet_X`/`outlet_X` belong to stream X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PortName {
    InletA,
    OutletA,
    InletB,
    OutletB,
}

impl PortName {
    pub const ALL: [PortName; 4] = [
        PortName::InletA,
        PortName::OutletA,
        PortName::InletB,
        PortName::OutletB,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PortName::InletA => "inlet_A",
            PortName::OutletA => "outlet_A",
            PortName::InletB => "inlet_B",
            PortName::OutletB => "outlet_B",
        }
    }

    pub fn kind(self) -> PortKind {
        match self {
            PortName::InletA | PortName::InletB => PortKind::Inlet,
            PortName::OutletA | PortName::OutletB => PortKind::Outlet,
        }
    }

    pub fn stream(self) -> Stream {
        match self {
            PortName::InletA | PortName::OutletA => Stream::A,
            PortName::InletB | PortName::OutletB => Stream::B,
        }
    }

    /// The other end of the same stream (inlet_A <-> outlet_A).
    pub fn partner(self) -> PortName {
        match self {
            PortName::InletA => PortName::OutletA,
            PortName::OutletA => PortName::InletA,
            PortName::InletB => PortName::OutletB,
            PortName::OutletB => PortName::InletB,
        }
    }

    pub fn inlet(stream: Stream) -> PortName {
        match stream {
            Stream::A => PortName::InletA,
            Stream::B => PortName::InletB,
        }
    }

    pub fn outlet(stream: Stream) -> PortName {
        match stream {
            Stream::A => PortName::OutletA,
            Stream::B => PortName::OutletB,
        }
    }
}

impl fmt::Display for PortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PortName::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown port '{s}' (expected inlet_A, outlet_A, inlet_B or outlet_B)"))
    }
}

/// A named connection point on a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub id: PortId,
    pub comp: CompId,
    pub name: PortName,
}

/// A device in the cycle. Holds only topology; physics lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: CompId,
    pub name: String,
    /// Port ids, in the order the ports were declared.
    pub ports: Vec<PortId>,
}

/// Directed edge from an outlet port to an inlet port, carrying one fluid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Junction {
    pub id: JunctionId,
    pub name: String,
    pub fluid: Fluid,
    pub upstream: PortId,
    pub downstream: PortId,
}

/// Validated, immutable component/junction graph.
///
/// Components, ports and junctions are stored in vectors indexed by their ids.
/// Every port is connected to exactly one junction.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) components: Vec<Component>,
    pub(crate) ports: Vec<Port>,
    pub(crate) junctions: Vec<Junction>,
    /// Junction attached to each port, indexed by port slot.
    pub(crate) port_junction: Vec<JunctionId>,
}

impl Graph {
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.slot())
    }

    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.slot())
    }

    pub fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.junctions.get(id.slot())
    }

    pub fn component_by_name(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn junction_by_name(&self, name: &str) -> Option<&Junction> {
        self.junctions.iter().find(|j| j.name == name)
    }

    /// Port of `comp` with the given name, if the component declares it.
    pub fn port_of(&self, comp: CompId, name: PortName) -> Option<&Port> {
        self.component(comp)?
            .ports
            .iter()
            .filter_map(|&pid| self.port(pid))
            .find(|p| p.name == name)
    }

    /// Junction connected to the named port of `comp`.
    pub fn junction_at(&self, comp: CompId, name: PortName) -> Option<JunctionId> {
        let port = self.port_of(comp, name)?;
        self.port_junction.get(port.id.slot()).copied()
    }

    /// Component on the upstream end of a junction.
    pub fn upstream_component(&self, junction: JunctionId) -> Option<CompId> {
        let j = self.junction(junction)?;
        self.port(j.upstream).map(|p| p.comp)
    }

    /// Component on the downstream end of a junction.
    pub fn downstream_component(&self, junction: JunctionId) -> Option<CompId> {
        let j = self.junction(junction)?;
        self.port(j.downstream).map(|p| p.comp)
    }
}
