//! End-to-end tests for the CLI entry point.

use std::fs;

use meshview::MeshviewError;
use meshview_cli::{Args, run};

fn args(output: &str) -> Args {
    Args {
        output: output.to_string(),
        config: None,
        inspect: None,
        log_level: "info".to_string(),
    }
}

#[test]
fn test_run_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("mesh.svg");

    run(&args(output.to_str().unwrap())).expect("run should succeed");

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert_eq!(svg.matches("class=\"detail-panel\"").count(), 23);
}

#[test]
fn test_run_with_config_and_inspect() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[window]\nwidth = 800.0\nheight = 600.0\n").unwrap();
    let output = dir.path().join("mesh.svg");

    let mut args = args(output.to_str().unwrap());
    args.config = Some(config.to_string_lossy().to_string());
    args.inspect = Some("Router0".to_string());
    run(&args).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("viewBox=\"0 0 800 600\""));
}

#[test]
fn test_run_rejects_unknown_node() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("mesh.svg");

    let mut args = args(output.to_str().unwrap());
    args.inspect = Some("Router42".to_string());

    let err = run(&args).unwrap_err();
    assert!(matches!(err, MeshviewError::UnknownNode(id) if id == "Router42"));
    assert!(!output.exists());
}

#[test]
fn test_run_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = args(dir.path().join("mesh.svg").to_str().unwrap());
    args.config = Some(dir.path().join("missing.toml").to_string_lossy().to_string());

    assert!(matches!(run(&args), Err(MeshviewError::Config(_))));
}
