use vc_fluids::Fluid;
use vc_graph::{GraphBuilder, GraphError, PortName};

use PortName::*;

fn two_port(builder: &mut GraphBuilder, name: &str) -> vc_core::CompId {
    builder.add_component(name, &[InletA, OutletA])
}

fn four_port(builder: &mut GraphBuilder, name: &str) -> vc_core::CompId {
    builder.add_component(name, &[InletA, OutletA, InletB, OutletB])
}

#[test]
fn build_source_sink() {
    let mut b = GraphBuilder::new();
    let src = b.add_component("src", &[OutletA]);
    let snk = b.add_component("snk", &[InletA]);
    let j = b.add_junction("src_snk", Fluid::R290, (src, OutletA), (snk, InletA));
    let graph = b.build().unwrap();

    assert_eq!(graph.junction_at(src, OutletA), Some(j));
    assert_eq!(graph.junction_at(snk, InletA), Some(j));
    assert_eq!(graph.upstream_component(j), Some(src));
    assert_eq!(graph.downstream_component(j), Some(snk));
    assert_eq!(graph.junction_by_name("src_snk").unwrap().fluid, Fluid::R290);
}

/// Compressor, condenser, IHX, evaporator loop plus the evaporator air stream.
#[test]
fn freezer_topology_builds() {
    let mut b = GraphBuilder::new();
    let cpr = two_port(&mut b, "cpr");
    let cond = two_port(&mut b, "cond");
    let ihx = four_port(&mut b, "ihx");
    let evap = four_port(&mut b, "evap");
    let src = b.add_component("srcSL", &[OutletA]);
    let snk = b.add_component("snkSL", &[InletA]);

    let r = Fluid::R290;
    b.add_junction("cpr_cond", r, (cpr, OutletA), (cond, InletA));
    b.add_junction("cond_ihx", r, (cond, OutletA), (ihx, InletA));
    b.add_junction("ihx_evap", r, (ihx, OutletA), (evap, InletA));
    b.add_junction("evap_ihx", r, (evap, OutletA), (ihx, InletB));
    b.add_junction("ihx_cpr", r, (ihx, OutletB), (cpr, InletA));
    b.add_junction("srcSL_evap", Fluid::Air, (src, OutletA), (evap, InletB));
    b.add_junction("evap_snkSL", Fluid::Air, (evap, OutletB), (snk, InletA));

    let graph = b.build().unwrap();
    assert_eq!(graph.components().len(), 6);
    assert_eq!(graph.junctions().len(), 7);
    assert_eq!(graph.ports().len(), 14);
    let ihx_b_in = graph.junction_at(ihx, InletB).unwrap();
    assert_eq!(graph.junction(ihx_b_in).unwrap().name, "evap_ihx");
    assert_eq!(graph.component_by_name("evap").unwrap().id, evap);
}

#[test]
fn dangling_port_is_rejected() {
    let mut b = GraphBuilder::new();
    let src = b.add_component("src", &[OutletA]);
    let mid = two_port(&mut b, "mid");
    b.add_junction("j", Fluid::Air, (src, OutletA), (mid, InletA));
    let err = b.build().unwrap_err();
    assert_eq!(
        err,
        GraphError::DanglingPort {
            component: "mid".into(),
            port: OutletA
        }
    );
}

#[test]
fn port_connected_twice_is_rejected() {
    let mut b = GraphBuilder::new();
    let src = b.add_component("src", &[OutletA]);
    let s1 = b.add_component("s1", &[InletA]);
    let s2 = b.add_component("s2", &[InletA]);
    b.add_junction("j1", Fluid::Air, (src, OutletA), (s1, InletA));
    b.add_junction("j2", Fluid::Air, (src, OutletA), (s2, InletA));
    assert!(matches!(
        b.build().unwrap_err(),
        GraphError::PortConnectedTwice { .. }
    ));
}

#[test]
fn wrong_direction_is_rejected() {
    let mut b = GraphBuilder::new();
    let src = b.add_component("src", &[OutletA]);
    let snk = b.add_component("snk", &[InletA]);
    b.add_junction("backwards", Fluid::Air, (snk, InletA), (src, OutletA));
    let err = b.build().unwrap_err();
    assert!(matches!(err, GraphError::DirectionMismatch { .. }));
    assert!(err.to_string().contains("backwards"));
}

#[test]
fn unknown_port_is_rejected() {
    let mut b = GraphBuilder::new();
    let src = b.add_component("src", &[OutletA]);
    let snk = b.add_component("snk", &[InletA]);
    b.add_junction("j", Fluid::Air, (src, OutletB), (snk, InletA));
    assert!(matches!(
        b.build().unwrap_err(),
        GraphError::UnknownPort { port: OutletB, .. }
    ));
}

#[test]
fn fluid_change_across_component_is_rejected() {
    let mut b = GraphBuilder::new();
    let src = b.add_component("src", &[OutletA]);
    let mid = two_port(&mut b, "mid");
    let snk = b.add_component("snk", &[InletA]);
    b.add_junction("in", Fluid::R290, (src, OutletA), (mid, InletA));
    b.add_junction("out", Fluid::R600a, (mid, OutletA), (snk, InletA));
    assert!(matches!(
        b.build().unwrap_err(),
        GraphError::FluidMismatch {
            inlet: Fluid::R290,
            outlet: Fluid::R600a,
            ..
        }
    ));
}

#[test]
fn disconnected_parts_are_rejected() {
    let mut b = GraphBuilder::new();
    let s1 = b.add_component("s1", &[OutletA]);
    let k1 = b.add_component("k1", &[InletA]);
    let s2 = b.add_component("s2", &[OutletA]);
    let k2 = b.add_component("k2", &[InletA]);
    b.add_junction("a", Fluid::Air, (s1, OutletA), (k1, InletA));
    b.add_junction("b", Fluid::Air, (s2, OutletA), (k2, InletA));
    assert_eq!(
        b.build().unwrap_err(),
        GraphError::Disconnected {
            unreachable: "s2".into()
        }
    );
}

#[test]
fn duplicate_names_are_rejected() {
    let mut b = GraphBuilder::new();
    b.add_component("x", &[OutletA]);
    b.add_component("x", &[InletA]);
    assert!(matches!(
        b.build().unwrap_err(),
        GraphError::DuplicateName {
            what: "component",
            ..
        }
    ));
}

#[test]
fn long_chain_builds() {
    let mut b = GraphBuilder::new();
    let mut prev = b.add_component("src", &[OutletA]);
    for i in 0..50 {
        let c = two_port(&mut b, &format!("c{i}"));
        b.add_junction(format!("j{i}"), Fluid::Water, (prev, OutletA), (c, InletA));
        prev = c;
    }
    let snk = b.add_component("snk", &[InletA]);
    b.add_junction("last", Fluid::Water, (prev, OutletA), (snk, InletA));
    let graph = b.build().unwrap();
    assert_eq!(graph.components().len(), 52);
    assert_eq!(graph.junctions().len(), 51);
}
