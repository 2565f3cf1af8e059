use std::path::Path;

use rd_config::schema::*;
use rd_config::{ConfigError, load, load_json, load_yaml, save_json, save_yaml, validate_config};

fn custom() -> RunConfig {
    RunConfig {
        name: "stiff shaft".to_string(),
        rotor: RotorDef {
            shaft_stiffness: 2e5,
            ..Default::default()
        },
        run_up: RunUpDef {
            t_max: 0.2,
            f_max: 100.0,
            ..Default::default()
        },
        solver: SolverDef {
            wall_clock_limit_s: Some(30.0),
            jacobian: JacobianDef::Central,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn roundtrip_yaml() {
    let config = custom();
    validate_config(&config).unwrap();

    let path = std::env::temp_dir().join("rd_config_roundtrip.yaml");
    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json() {
    let config = custom();

    let path = std::env::temp_dir().join("rd_config_roundtrip.json");
    save_json(&path, &config).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(config, loaded);
    assert_eq!(load_json(&path).unwrap(), loaded);
}

#[test]
fn save_refuses_invalid_configs() {
    let mut config = custom();
    config.bearing.viscosity = -1.0;

    let path = std::env::temp_dir().join("rd_config_invalid.yaml");
    let err = save_yaml(&path, &config).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn unknown_extension_is_rejected() {
    let err = load(Path::new("run.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownFormat { .. }));
}

#[test]
fn bundled_configs_load() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs");

    let nominal = load(&root.join("jeffcott_short_bearing.yaml")).unwrap();
    assert_eq!(nominal, RunConfig::default());

    let short = load(&root.join("short_run_up.yaml")).unwrap();
    assert_eq!(short.run_up.sample_count(), 37);
    let (a, b) = (
        short.run_up.angular_acceleration(),
        nominal.run_up.angular_acceleration(),
    );
    assert!((a - b).abs() < 1e-9 * b);
}
