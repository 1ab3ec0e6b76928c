use vc_components::{
    Ahri540Map, Compressor, CompressorMap, Condenser, CycleComponent, Evaporator,
    InternalHeatExchanger, PolynomialCoefficients, PortStates, StateVar, VolumetricMap,
};
use vc_core::{delta_k, k, kgps, m2, pa, rpm, w_per_k};
use vc_fluids::{
    CoolPropProvider, Fluid, PerfectGasProvider, Property, PropertyProvider, StreamState,
};
use vc_graph::PortName;

fn target(eval: &vc_components::Evaluation, port: PortName, var: StateVar) -> f64 {
    eval.targets
        .iter()
        .find(|t| t.port == port && t.var == var)
        .map(|t| t.value)
        .unwrap()
}

fn h_pq(props: &dyn PropertyProvider, p: f64, q: f64) -> f64 {
    props
        .lookup(Fluid::R290, Property::Enthalpy, Property::Pressure, p, Property::Quality, q)
        .unwrap()
}

fn ihx_ports(props: &dyn PropertyProvider, t_a: f64, m_a: f64, t_b: f64, m_b: f64) -> PortStates {
    let a = StreamState::from_pt(props, Fluid::Air, m_a, 2e5, t_a).unwrap();
    let b = StreamState::from_pt(props, Fluid::Air, m_b, 1e5, t_b).unwrap();
    PortStates::new()
        .with(PortName::InletA, a)
        .with(PortName::OutletA, a)
        .with(PortName::InletB, b)
        .with(PortName::OutletB, b)
}

#[test]
fn ihx_duty_balances_between_sides() {
    let props = PerfectGasProvider::air();
    let ihx = InternalHeatExchanger::new(w_per_k(40.0));
    let ports = ihx_ports(&props, 350.0, 0.2, 280.0, 0.1);
    let eval = ihx.evaluate(&props, &ports).unwrap();

    let a = ports.get(PortName::InletA).unwrap();
    let b = ports.get(PortName::InletB).unwrap();
    let q_hot = a.mdot * (a.h - target(&eval, PortName::OutletA, StateVar::Enthalpy));
    let q_cold = b.mdot * (target(&eval, PortName::OutletB, StateVar::Enthalpy) - b.h);
    assert!(q_hot > 0.0);
    assert!((q_hot - q_cold).abs() < 1e-9 * q_hot);

    // Constant cp: C_min = 0.1 * 1006, Cr = 0.5
    let c_min = 0.1 * 1006.0;
    let ntu: f64 = 40.0 / c_min;
    let e = (-ntu * 0.5).exp();
    let eps = (1.0 - e) / (1.0 - 0.5 * e);
    assert!((q_hot - eps * c_min * 70.0).abs() < 1e-6 * q_hot);
    assert_eq!(eval.performance.duty, Some(q_hot));
}

#[test]
fn ihx_heat_flows_from_hot_to_cold_only() {
    let props = PerfectGasProvider::air();
    let ihx = InternalHeatExchanger::new(w_per_k(10.0));

    // B is the hot side here.
    let ports = ihx_ports(&props, 260.0, 0.05, 320.0, 0.05);
    let eval = ihx.evaluate(&props, &ports).unwrap();
    let a = ports.get(PortName::InletA).unwrap();
    assert!(target(&eval, PortName::OutletA, StateVar::Enthalpy) > a.h);

    let ports = ihx_ports(&props, 300.0, 0.05, 300.0, 0.05);
    let eval = ihx.evaluate(&props, &ports).unwrap();
    assert_eq!(eval.performance.duty, Some(0.0));
}

#[test]
fn ihx_without_expansion_holds_a_side_pressure() {
    let props = PerfectGasProvider::air();
    let ihx = InternalHeatExchanger {
        ua: w_per_k(5.0),
        expansion_at_outlet_a: false,
    };
    let eval = ihx
        .evaluate(&props, &ihx_ports(&props, 330.0, 0.1, 290.0, 0.1))
        .unwrap();
    assert_eq!(eval.targets.len(), 6);
    assert_eq!(target(&eval, PortName::OutletA, StateVar::Pressure), 2e5);
}

fn bench_compressor() -> Compressor {
    Compressor::new(rpm(3000.0), CompressorMap::Volumetric(VolumetricMap::default()))
}

fn bench_ports(props: &dyn PropertyProvider, p_out: f64) -> PortStates {
    let suction = StreamState::from_pt(props, Fluid::R290, 0.005, 2.764e5, 291.606).unwrap();
    let discharge = StreamState::new(Fluid::R290, 0.005, p_out, suction.h + 1e5);
    PortStates::new()
        .with(PortName::InletA, suction)
        .with(PortName::OutletA, discharge)
}

#[test]
fn compressor_bench_point_is_deterministic() {
    let props = CoolPropProvider::new();
    let cpr = bench_compressor();
    let ports = bench_ports(&props, 20.666e5);

    let first = cpr.evaluate(&props, &ports).unwrap();
    let second = cpr.evaluate(&props, &ports).unwrap();
    assert_eq!(first, second);

    let perf = &first.performance;
    let mdot = perf.mdot.unwrap();
    let power = perf.power.unwrap();
    let t_out = perf.outlet_temperature.unwrap();
    assert!(mdot > 1e-3 && mdot < 1e-2, "mdot = {mdot}");
    assert!(power > 100.0 && power < 2000.0, "Pel = {power}");
    assert!(t_out > 340.0 && t_out < 450.0, "T_out = {t_out}");

    let h1 = ports.get(PortName::InletA).unwrap().h;
    let h2 = target(&first, PortName::OutletA, StateVar::Enthalpy);
    assert!((power - mdot * (h2 - h1) / 0.9).abs() < 1e-9 * power);
    assert_eq!(target(&first, PortName::InletA, StateVar::MassFlow), mdot);
}

#[test]
fn compressor_rejects_wet_suction() {
    let props = CoolPropProvider::new();
    let h_wet = h_pq(&props, 2.764e5, 0.8);
    let mut ports = bench_ports(&props, 20.666e5);
    ports.set(PortName::InletA, StreamState::new(Fluid::R290, 0.005, 2.764e5, h_wet));
    let err = bench_compressor().evaluate(&props, &ports).unwrap_err();
    assert!(err.is_invalid_state(), "{err}");
}

#[test]
fn compressor_rejects_reverse_pressure_ratio() {
    let props = CoolPropProvider::new();
    let ports = bench_ports(&props, 2.0e5);
    let err = bench_compressor().evaluate(&props, &ports).unwrap_err();
    assert!(err.to_string().contains("pressure ratio"));
}

fn condenser(boundary_switch: bool) -> Condenser {
    Condenser {
        k: [450.0, 450.0, 450.0],
        area: m2(1.0),
        subcooling: delta_k(0.1),
        air_inlet_temperature: k(303.15),
        air_mass_flow: kgps(0.75),
        air_pressure: pa(1e5),
        air_fluid: Fluid::Air,
        boundary_switch,
        limit_temp: false,
    }
}

#[test]
fn condenser_outlet_is_subcooled_liquid() {
    let props = CoolPropProvider::new();
    let inlet = StreamState::from_pt(&props, Fluid::R290, 0.007, 13e5, 360.0).unwrap();
    let ports = PortStates::new()
        .with(PortName::InletA, inlet)
        .with(PortName::OutletA, inlet);
    let eval = condenser(false).evaluate(&props, &ports).unwrap();

    let h_bub = props.bubble_enthalpy(Fluid::R290, 13e5).unwrap();
    let h_out = target(&eval, PortName::OutletA, StateVar::Enthalpy);
    assert!(h_out < h_bub);
    assert_eq!(target(&eval, PortName::OutletA, StateVar::Pressure), 13e5);
    assert_eq!(eval.closures.len(), 1);
    assert!(eval.closures[0].is_finite());
    assert_eq!(eval.performance.zone_areas.len(), 3);
    assert!(eval.performance.zone_areas.iter().all(|&a| a > 0.0));
}

#[test]
fn condenser_boundary_switch_drops_desuperheating_zone() {
    let props = CoolPropProvider::new();
    let h_two_phase = h_pq(&props, 13e5, 0.9);
    let inlet = StreamState::new(Fluid::R290, 0.007, 13e5, h_two_phase);
    let ports = PortStates::new()
        .with(PortName::InletA, inlet)
        .with(PortName::OutletA, inlet);

    let err = condenser(false).evaluate(&props, &ports).unwrap_err();
    assert!(err.is_invalid_state());

    let eval = condenser(true).evaluate(&props, &ports).unwrap();
    assert_eq!(eval.performance.zone_areas[0], 0.0);
    assert!(eval.performance.zone_areas[1] > 0.0);
}

fn evaporator(limit_temp: bool) -> Evaporator {
    Evaporator {
        k: [420.0, 420.0],
        area: m2(1.0),
        superheat: delta_k(5.0),
        boundary_switch: true,
        limit_temp,
    }
}

fn evaporator_ports(props: &dyn PropertyProvider, t_air: f64) -> PortStates {
    let p0 = 2.0e5;
    let h_in = h_pq(props, p0, 0.3);
    let refrigerant = StreamState::new(Fluid::R290, 0.007, p0, h_in);
    let air = StreamState::from_pt(props, Fluid::Air, 0.5, 1e5, t_air).unwrap();
    PortStates::new()
        .with(PortName::InletA, refrigerant)
        .with(PortName::OutletA, refrigerant)
        .with(PortName::InletB, air)
        .with(PortName::OutletB, air)
}

#[test]
fn evaporator_energy_balance_and_superheat() {
    let props = CoolPropProvider::new();
    let ports = evaporator_ports(&props, 263.15);
    let eval = evaporator(true).evaluate(&props, &ports).unwrap();

    let r = ports.get(PortName::InletA).unwrap();
    let air = ports.get(PortName::InletB).unwrap();
    let h_out = target(&eval, PortName::OutletA, StateVar::Enthalpy);
    let h_air_out = target(&eval, PortName::OutletB, StateVar::Enthalpy);
    let q_ref = r.mdot * (h_out - r.h);
    let q_air = air.mdot * (air.h - h_air_out);
    assert!(q_ref > 0.0);
    assert!((q_ref - q_air).abs() < 1e-9 * q_ref);

    let perf = &eval.performance;
    let t_sat = perf.t_sat.unwrap();
    assert!((perf.outlet_temperature.unwrap() - (t_sat + 5.0)).abs() < 1e-9);
    assert!((perf.inlet_quality.unwrap() - 0.3).abs() < 1e-6);
    assert_eq!(target(&eval, PortName::OutletB, StateVar::MassFlow), 0.5);
}

#[test]
fn evaporator_limit_temp_clamps_outlet_below_air() {
    let props = CoolPropProvider::new();
    let t_sat = props.saturation_temperature(Fluid::R290, 2.0e5).unwrap();
    let ports = evaporator_ports(&props, t_sat + 2.0);

    let eval = evaporator(true).evaluate(&props, &ports).unwrap();
    let t_out = eval.performance.outlet_temperature.unwrap();
    assert!((t_out - (t_sat + 2.0 - 0.1)).abs() < 1e-6);

    let free = evaporator(false).evaluate(&props, &ports).unwrap();
    assert!((free.performance.outlet_temperature.unwrap() - (t_sat + 5.0)).abs() < 1e-9);
}

#[test]
fn evaporator_without_boundary_switch_needs_two_phase_inlet() {
    let props = CoolPropProvider::new();
    let p0 = 2.0e5;
    let t_sat = props.saturation_temperature(Fluid::R290, p0).unwrap();
    let superheated = StreamState::from_pt(&props, Fluid::R290, 0.007, p0, t_sat + 2.0).unwrap();
    let mut ports = evaporator_ports(&props, 263.15);
    ports.set(PortName::InletA, superheated);

    let strict = Evaporator {
        boundary_switch: false,
        ..evaporator(false)
    };
    let err = strict.evaluate(&props, &ports).unwrap_err();
    assert!(err.is_invalid_state(), "{err}");
    assert!(err.to_string().contains("not two-phase"));

    let eval = evaporator(false).evaluate(&props, &ports).unwrap();
    assert_eq!(eval.performance.zone_areas[0], 0.0);
    assert!(eval.performance.zone_areas[1] > 0.0);
}

#[test]
fn condenser_limit_temp_keeps_outlet_above_air() {
    let props = CoolPropProvider::new();
    let pc = 13e5;
    let t_sat = props.saturation_temperature(Fluid::R290, pc).unwrap();
    let inlet = StreamState::from_pt(&props, Fluid::R290, 0.007, pc, 360.0).unwrap();
    let ports = PortStates::new()
        .with(PortName::InletA, inlet)
        .with(PortName::OutletA, inlet);
    let warm_air = |limit_temp| Condenser {
        subcooling: delta_k(8.0),
        air_inlet_temperature: k(t_sat - 3.0),
        limit_temp,
        ..condenser(false)
    };

    let eval = warm_air(true).evaluate(&props, &ports).unwrap();
    let t_out = eval.performance.outlet_temperature.unwrap();
    assert!((t_out - (t_sat - 3.0 + 0.1)).abs() < 1e-9);
    let h_clamped = props.enthalpy_pt(Fluid::R290, pc, t_out).unwrap();
    assert!((target(&eval, PortName::OutletA, StateVar::Enthalpy) - h_clamped).abs() < 1e-6);

    let free = warm_air(false).evaluate(&props, &ports).unwrap();
    assert!((free.performance.outlet_temperature.unwrap() - (t_sat - 8.0)).abs() < 1e-9);
}

fn ahri540_compressor(speed_rpm: f64, heat_loss_fraction: f64) -> Compressor {
    // Flat maps: 18 kg/h and 600 W anywhere in the envelope.
    let mut mass_flow = [0.0; 10];
    mass_flow[0] = 18.0;
    let mut power = [0.0; 10];
    power[0] = 600.0;
    let map = Ahri540Map {
        heat_loss_fraction,
        ..Ahri540Map::new(
            PolynomialCoefficients(mass_flow),
            PolynomialCoefficients(power),
            rpm(3000.0),
        )
    };
    Compressor::new(rpm(speed_rpm), CompressorMap::Ahri540(map))
}

/// Suction at the rated 10 K superheat.
fn rated_suction_ports(props: &dyn PropertyProvider, p_out: f64) -> PortStates {
    let p_in = 2.764e5;
    let t_evap = props.saturation_temperature(Fluid::R290, p_in).unwrap();
    let suction = StreamState::from_pt(props, Fluid::R290, 0.005, p_in, t_evap + 10.0).unwrap();
    let discharge = StreamState::new(Fluid::R290, 0.005, p_out, suction.h + 1e5);
    PortStates::new()
        .with(PortName::InletA, suction)
        .with(PortName::OutletA, discharge)
}

#[test]
fn ahri540_map_at_rated_point() {
    let props = CoolPropProvider::new();
    let ports = rated_suction_ports(&props, 20.666e5);
    let h1 = ports.get(PortName::InletA).unwrap().h;

    let eval = ahri540_compressor(3000.0, 0.0).evaluate(&props, &ports).unwrap();
    let mdot = eval.performance.mdot.unwrap();
    assert!((mdot - 18.0 / 3600.0).abs() < 1e-9, "mdot = {mdot}");
    assert_eq!(eval.performance.power, Some(600.0));
    let h2 = target(&eval, PortName::OutletA, StateVar::Enthalpy);
    assert!((h2 - (h1 + 600.0 / mdot)).abs() < 1e-6);

    // Half speed halves both; a heat loss share leaves the gas cooler.
    let half = ahri540_compressor(1500.0, 0.2).evaluate(&props, &ports).unwrap();
    assert!((half.performance.mdot.unwrap() - 0.5 * mdot).abs() < 1e-9);
    assert_eq!(half.performance.power, Some(300.0));
    let h2_half = target(&half, PortName::OutletA, StateVar::Enthalpy);
    assert!((h2_half - (h1 + 0.8 * 300.0 / half.performance.mdot.unwrap())).abs() < 1e-6);
}

#[test]
fn ahri540_map_rejects_points_outside_envelope() {
    let props = CoolPropProvider::new();
    // Condensing near 82 degC, above the 70 degC envelope.
    let ports = rated_suction_ports(&props, 30e5);
    let err = ahri540_compressor(3000.0, 0.0).evaluate(&props, &ports).unwrap_err();
    assert!(err.is_invalid_state(), "{err}");
    assert!(err.to_string().contains("envelope"));
}
