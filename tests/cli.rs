use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("vizlegend").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("vizlegend"));
}

#[test]
fn derive_prints_legend_and_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("chart.json");
    fs::write(
        &input,
        r#"{"data": [{"type": "pie", "labels": ["x", "x", "y"], "values": [5, 5, 10]}], "layout": {}}"#,
    )
    .unwrap();
    let out = dir.path().join("plot.json");
    let legend = dir.path().join("legend.csv");

    let mut cmd = Command::cargo_bin("vizlegend").unwrap();
    cmd.arg("derive")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--legend-out")
        .arg(&legend);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("x: 10 (50.0%)"))
        .stdout(predicate::str::contains("y: 10 (50.0%)"));

    let payload: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(payload["layout"]["showlegend"], serde_json::json!(false));
    assert_eq!(payload["data"][0]["labels"], serde_json::json!(["x", "y"]));
    assert_eq!(fs::read_to_string(&legend).unwrap().lines().count(), 3);
}

#[test]
fn derive_reports_native_legend() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("chart.json");
    fs::write(
        &input,
        r#"{"data": [{"type": "scatter", "x": [1, 2], "y": [3, 4]}]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("vizlegend").unwrap();
    cmd.args(["derive", "--input"]).arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Native legend"));
}

#[test]
fn derive_fails_on_missing_file() {
    let mut cmd = Command::cargo_bin("vizlegend").unwrap();
    cmd.args(["derive", "--input", "does/not/exist.json"]);
    cmd.assert().failure();
}
