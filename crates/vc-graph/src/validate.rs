//! Graph validation logic.

use std::collections::HashSet;

use vc_core::{CompId, JunctionId, PortId};

use crate::builder::PendingJunction;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Component, Junction, Port, PortKind, PortName};

pub(crate) fn check_unique_names(
    components: &[Component],
    junctions: &[PendingJunction],
) -> GraphResult<()> {
    let mut seen = HashSet::new();
    for comp in components {
        if !seen.insert(comp.name.as_str()) {
            return Err(GraphError::DuplicateName {
                what: "component",
                name: comp.name.clone(),
            });
        }
    }
    let mut seen = HashSet::new();
    for j in junctions {
        if !seen.insert(j.name.as_str()) {
            return Err(GraphError::DuplicateName {
                what: "junction",
                name: j.name.clone(),
            });
        }
    }
    Ok(())
}

/// Turn `(component, port name)` endpoints into port ids, checking direction.
pub(crate) fn resolve_junctions(
    components: &[Component],
    ports: &[Port],
    pending: &[PendingJunction],
) -> GraphResult<Vec<Junction>> {
    pending
        .iter()
        .enumerate()
        .map(|(i, j)| {
            let upstream = resolve_endpoint(components, ports, j, j.from, PortKind::Outlet)?;
            let downstream = resolve_endpoint(components, ports, j, j.to, PortKind::Inlet)?;
            Ok(Junction {
                id: JunctionId::from_index(i as u32),
                name: j.name.clone(),
                fluid: j.fluid,
                upstream,
                downstream,
            })
        })
        .collect()
}

fn resolve_endpoint(
    components: &[Component],
    ports: &[Port],
    junction: &PendingJunction,
    (comp_id, name): (CompId, PortName),
    expected: PortKind,
) -> GraphResult<PortId> {
    let comp = components
        .get(comp_id.slot())
        .ok_or_else(|| GraphError::InvalidCompRef {
            junction: junction.name.clone(),
            index: comp_id.index(),
        })?;
    let port = comp
        .ports
        .iter()
        .map(|&pid| &ports[pid.slot()])
        .find(|p| p.name == name)
        .ok_or_else(|| GraphError::UnknownPort {
            junction: junction.name.clone(),
            component: comp.name.clone(),
            port: name,
        })?;
    if name.kind() != expected {
        return Err(GraphError::DirectionMismatch {
            junction: junction.name.clone(),
            component: comp.name.clone(),
            port: name,
        });
    }
    Ok(port.id)
}

/// Every port must be attached to exactly one junction.
///
/// Returns the port -> junction table, indexed by port slot.
pub(crate) fn check_port_coverage(
    components: &[Component],
    ports: &[Port],
    junctions: &[Junction],
) -> GraphResult<Vec<JunctionId>> {
    let mut table: Vec<Option<JunctionId>> = vec![None; ports.len()];
    for j in junctions {
        for pid in [j.upstream, j.downstream] {
            let slot = &mut table[pid.slot()];
            if slot.is_some() {
                let port = &ports[pid.slot()];
                return Err(GraphError::PortConnectedTwice {
                    component: components[port.comp.slot()].name.clone(),
                    port: port.name,
                });
            }
            *slot = Some(j.id);
        }
    }
    table
        .into_iter()
        .zip(ports)
        .map(|(entry, port)| {
            entry.ok_or_else(|| GraphError::DanglingPort {
                component: components[port.comp.slot()].name.clone(),
                port: port.name,
            })
        })
        .collect()
}

/// A stream keeps its fluid through a component.
pub(crate) fn check_stream_fluids(
    components: &[Component],
    ports: &[Port],
    junctions: &[Junction],
    port_junction: &[JunctionId],
) -> GraphResult<()> {
    for comp in components {
        for &pid in &comp.ports {
            let port = &ports[pid.slot()];
            if port.name.kind() != PortKind::Inlet {
                continue;
            }
            let partner = comp
                .ports
                .iter()
                .map(|&q| &ports[q.slot()])
                .find(|q| q.name == port.name.partner());
            let Some(partner) = partner else {
                continue;
            };
            let inlet = junctions[port_junction[port.id.slot()].slot()].fluid;
            let outlet = junctions[port_junction[partner.id.slot()].slot()].fluid;
            if inlet != outlet {
                return Err(GraphError::FluidMismatch {
                    component: comp.name.clone(),
                    inlet,
                    outlet,
                });
            }
        }
    }
    Ok(())
}

/// All components must belong to one connected system.
pub(crate) fn check_connected(
    components: &[Component],
    ports: &[Port],
    junctions: &[Junction],
) -> GraphResult<()> {
    if components.is_empty() {
        return Ok(());
    }
    let mut parent: Vec<usize> = (0..components.len()).collect();

    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for j in junctions {
        let a = find(&mut parent, ports[j.upstream.slot()].comp.slot());
        let b = find(&mut parent, ports[j.downstream.slot()].comp.slot());
        if a != b {
            parent[a] = b;
        }
    }

    let root = find(&mut parent, 0);
    for (i, comp) in components.iter().enumerate() {
        if find(&mut parent, i) != root {
            return Err(GraphError::Disconnected {
                unreachable: comp.name.clone(),
            });
        }
    }
    Ok(())
}
