//! End-to-end runs of the bundled configurations.

use vc_app::{
    AppError, Demo, RunOptions, compile_system, default_provider, run_project, summarize,
};
use vc_solver::SolveStatus;

#[test]
fn compressor_demo_reports_bench_figures() {
    let project = Demo::CompressorBench.load().unwrap();
    let response = run_project(&project, default_provider(), &RunOptions::default()).unwrap();
    assert_eq!(response.system.status(), SolveStatus::Converged);

    let m = &response.metrics;
    assert!(m.evaporator_duty_w.is_none());
    assert!(m.cop_ref_cycle.is_none());
    assert!(m.compressor_power_w.unwrap() > 0.0);
    assert_eq!(m.compressor_speed_rpm.map(f64::round), Some(3000.0));

    let summary = summarize(&project.name, &response);
    let cpr = summary.components.iter().find(|c| c.id == "cpr").unwrap();
    assert!(cpr.outlet_temperature_k.unwrap() > 291.606);
    assert!(cpr.pressure_ratio.unwrap() > 7.0);
}

#[test]
fn freezer_demo_produces_cycle_metrics() {
    let project = Demo::Freezer.load().unwrap();
    let options = RunOptions { warm_restart: true };
    let response = run_project(&project, default_provider(), &options).unwrap();

    let m = &response.metrics;
    let qdot = m.evaporator_duty_w.unwrap();
    let pel = m.compressor_power_w.unwrap();
    assert!(qdot > 0.0, "Qdot = {qdot}");
    assert!(pel > 0.0, "Pel = {pel}");
    assert!((m.cop_ref_cycle.unwrap() - qdot / pel).abs() < 1e-12);
    assert!(m.cop_atp.unwrap() < m.cop_ref_cycle.unwrap());
    assert!((m.qdot_atp_w.unwrap() - (qdot - 250.0)).abs() < 1e-9);

    let x_in = m.evaporator_inlet_quality.unwrap();
    assert!(x_in > 0.0 && x_in < 1.0, "x_evap_in = {x_in}");
    assert!(m.box_air_volume_flow_m3_h.unwrap() > 0.0);
    assert!(m.ambient_air_volume_flow_m3_h.unwrap() > m.box_air_volume_flow_m3_h.unwrap());

    assert!(response.warm_report.unwrap().iterations <= 2);
}

#[test]
fn json_summary_round_trips() {
    let project = Demo::CompressorBench.load().unwrap();
    let response = run_project(&project, default_provider(), &RunOptions::default()).unwrap();
    let summary = summarize(&project.name, &response);

    let json = summary.to_json().unwrap();
    let parsed: vc_app::RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.system_id, "r290_compressor");
    assert_eq!(parsed.junctions.len(), 2);

    let text = summary.to_string();
    assert!(text.contains("src_cpr"));
    assert!(text.contains("Pel="));
}

#[test]
fn source_without_outlet_junction_fails_to_compile() {
    let mut project = Demo::CompressorBench.load().unwrap();
    project.system.junctions[0].from.port = "outlet_B".to_string();
    let err = compile_system(&project, default_provider()).err().unwrap();
    assert!(matches!(err, AppError::Compile(_)), "{err}");
}

#[test]
fn dangling_port_is_a_solver_configuration_error() {
    let mut project = Demo::CompressorBench.load().unwrap();
    project.system.junctions.pop();
    let err = compile_system(&project, default_provider()).err().unwrap();
    assert!(matches!(err, AppError::Solver(_)), "{err}");
}
