use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn run(args: &[&str]) -> (bool, Value) {
    let output = Command::new(env!("CARGO_BIN_EXE_mapcircle"))
        .args(args)
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value = serde_json::from_str(&stdout).unwrap_or(Value::Null);
    (output.status.success(), value)
}

fn write_config(dir: &tempfile::TempDir, body: &str) -> String {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_polygon_prints_closed_ring() {
    let dir = tempdir().unwrap();
    let config = write_config(&dir, "[circle]\nfill_color = \"#3182BD\"\n");
    let (ok, feature) = run(&[
        "--config", &config, "polygon", "--lng", "-75.343", "--lat", "39.984", "--radius", "300",
    ]);

    assert!(ok);
    assert_eq!(feature["type"], "Feature");
    let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 65);
    assert_eq!(ring.first(), ring.last());
}

#[test]
fn test_bounds_surround_center() {
    let dir = tempdir().unwrap();
    let config = write_config(&dir, "");
    let (ok, corners) = run(&[
        "--config", &config, "bounds", "--lng", "-75.343", "--lat", "39.984", "--radius", "1000",
    ]);

    assert!(ok);
    let sw = corners[0].as_array().unwrap();
    let ne = corners[1].as_array().unwrap();
    assert!(sw[0].as_f64().unwrap() < -75.343 && ne[0].as_f64().unwrap() > -75.343);
    assert!(sw[1].as_f64().unwrap() < 39.984 && ne[1].as_f64().unwrap() > 39.984);
}

#[test]
fn test_refine_raises_step_count() {
    let dir = tempdir().unwrap();
    let config = write_config(&dir, "");
    let (ok, feature) = run(&[
        "--config", &config, "polygon", "--lng", "0", "--lat", "0", "--radius", "250000",
        "--zoom", "2", "--refine",
    ]);

    assert!(ok);
    let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 501);
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempdir().unwrap();
    let config = write_config(&dir, "[logging]\nlevel = \"chatty\"\n");
    let (ok, _) = run(&[
        "--config", &config, "polygon", "--lng", "0", "--lat", "0", "--radius", "10",
    ]);
    assert!(!ok);
}
