use std::path::PathBuf;
use vc_project::{from_yaml_str, load_json, load_yaml, save_json, save_yaml};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn freezer_demo_loads() {
    let project = load_yaml(&demo("r290_freezer.yaml")).unwrap();
    assert_eq!(project.version, vc_project::LATEST_VERSION);
    assert_eq!(project.system.components.len(), 6);
    assert_eq!(project.system.junctions.len(), 7);
    assert_eq!(project.report.evaporator.as_deref(), Some("evap"));
}

#[test]
fn compressor_demo_loads_with_defaults() {
    let project = load_yaml(&demo("r290_compressor.yaml")).unwrap();
    assert_eq!(project.system.tolerance, 1e-6);
    assert_eq!(project.system.solver.max_iterations, 100);
    assert_eq!(project.report.evaporator_fan_power_w, 200.0);
    assert_eq!(project.report.housing_loss_w, 50.0);
}

#[test]
fn roundtrip_yaml_freezer() {
    let project = load_yaml(&demo("r290_freezer.yaml")).unwrap();
    let path = std::env::temp_dir().join("vc_project_roundtrip_freezer.yaml");

    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_compressor() {
    let project = load_yaml(&demo("r290_compressor.yaml")).unwrap();
    let path = std::env::temp_dir().join("vc_project_roundtrip_compressor.json");

    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn unknown_component_type_is_a_yaml_error() {
    let text = r#"
version: 1
name: bad
system:
  id: bad
  components:
    - id: x
      kind:
        type: Turbine
  junctions: []
"#;
    let err = from_yaml_str(text).unwrap_err();
    assert!(matches!(err, vc_project::ProjectError::Yaml(_)));
}

#[test]
fn invalid_config_is_not_saved() {
    let mut project = load_yaml(&demo("r290_compressor.yaml")).unwrap();
    project.system.junctions[0].to.component = "missing".to_string();
    let path = std::env::temp_dir().join("vc_project_invalid.yaml");
    let err = save_yaml(&path, &project).unwrap_err();
    assert!(matches!(err, vc_project::ProjectError::Validation(_)));
}
