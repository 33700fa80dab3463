// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the campusnav CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small campus: both dormitories, a crossing, and three teaching buildings.
/// F4 is cut off from everything else.
const MAP_JSON: &str = r#"{
    "nodes": [
        {"id": "A2", "x": 0,   "y": 0,   "label": "男生宿舍"},
        {"id": "A6", "x": 0,   "y": 100, "label": "女生宿舍"},
        {"id": "C1", "x": 100, "y": 50},
        {"id": "E3", "x": 200, "y": 50,  "label": "教一楼"},
        {"id": "G5", "x": 100, "y": 150, "label": "实验楼"},
        {"id": "F4", "x": 900, "y": 900, "label": "教二楼"}
    ],
    "edges": [
        {"from": "A2", "to": "C1", "length": 120},
        {"from": "A6", "to": "C1", "length": 60},
        {"from": "C1", "to": "E3", "length": 40},
        {"from": "C1", "to": "G5"},
        {"from": "G5", "to": "E3", "length": "oops"},
        {"from": "E3", "to": "Z9", "length": 5}
    ]
}"#;

/// Write the map and an empty config into a fresh directory
fn setup() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let map = dir.path().join("map.json");
    let config = dir.path().join("config.toml");
    fs::write(&map, MAP_JSON).unwrap();
    fs::write(&config, "").unwrap();
    (dir, map, config)
}

/// campusnav with isolated config and data
fn campusnav(map: &PathBuf, config: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("campusnav").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config)
        .arg("--data")
        .arg(map);
    cmd
}

#[test]
fn test_route_between_nodes() {
    let (_dir, map, config) = setup();

    campusnav(&map, &config)
        .args(["route", "A6", "E3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("女生宿舍 (A6) → C1 → 教一楼 (E3)"))
        .stdout(predicate::str::contains("distance: 100.00"));
}

#[test]
fn test_route_json() {
    let (_dir, map, config) = setup();

    let output = campusnav(&map, &config)
        .args(["--json", "route", "A2", "E3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let route: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(route["nodes"], serde_json::json!(["A2", "C1", "E3"]));
    assert_eq!(route["cost"], 160.0);
}

#[test]
fn test_route_no_path_is_not_failure() {
    let (_dir, map, config) = setup();

    campusnav(&map, &config)
        .args(["route", "A2", "F4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No path"));

    let output = campusnav(&map, &config)
        .args(["--json", "route", "A2", "F4"])
        .output()
        .unwrap();
    let route: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(route["nodes"], serde_json::json!([]));
    assert!(route["cost"].is_null());
}

#[test]
fn test_navigate_default_tables() {
    let (_dir, map, config) = setup();

    campusnav(&map, &config)
        .args(["navigate", "教一楼", "--attribute", "女"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Navigation: 女生宿舍 -> 教一楼 (E3)"))
        .stdout(predicate::str::contains("distance: 100.00"));

    campusnav(&map, &config)
        .args(["navigate", "教一楼", "-a", "male"])
        .assert()
        .success()
        .stdout(predicate::str::contains("distance: 160.00"));
}

#[test]
fn test_navigate_unknown_building() {
    let (_dir, map, config) = setup();

    campusnav(&map, &config)
        .args(["navigate", "未知楼"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot locate building '未知楼'"))
        .stderr(predicate::str::contains("实验楼"));
}

#[test]
fn test_navigate_missing_graph_node() {
    let (dir, map, _config) = setup();
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        r#"
[navigation]
default_attribute = "any"

[navigation.origins]
any = "A6"

[navigation.destinations]
"图书馆" = "L1"
"#,
    )
    .unwrap();

    campusnav(&map, &config)
        .args(["navigate", "图书馆"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Map location 'L1' is missing"));
}

#[test]
fn test_pick_sequence() {
    let (_dir, map, config) = setup();

    campusnav(&map, &config)
        .args(["pick", "A6", "E3", "G5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("click A6: origin set: A6"))
        .stdout(predicate::str::contains("click E3: route requested: A6 -> E3"))
        .stdout(predicate::str::contains("Arrived! Shortest route length 100.00"))
        .stdout(predicate::str::contains("click G5: reset, origin: G5"));
}

#[test]
fn test_pick_json_events() {
    let (_dir, map, config) = setup();

    let output = campusnav(&map, &config)
        .args(["--json", "pick", "A2", "F4"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let updates: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(updates[0]["event"]["event"], "origin_set");
    assert_eq!(updates[1]["event"]["event"], "route_requested");
    assert!(updates[1]["route"]["cost"].is_null());
    assert!(updates[1]["status"].as_str().unwrap().starts_with("No path"));
}

#[test]
fn test_neighbors() {
    let (_dir, map, config) = setup();

    let output = campusnav(&map, &config)
        .args(["--json", "neighbors", "C1"])
        .output()
        .unwrap();
    let neighbors: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(neighbors["A6"], 60.0);
    assert_eq!(neighbors["E3"], 40.0);
    assert_eq!(neighbors["G5"], 100.0);

    // the dangling E3 - Z9 row never shows up
    campusnav(&map, &config)
        .args(["neighbors", "Z9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not on the map"));
}

#[test]
fn test_info_reports_dropped_rows() {
    let (_dir, map, config) = setup();

    let output = campusnav(&map, &config)
        .args(["--json", "info"])
        .output()
        .unwrap();
    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["nodes"], 6);
    assert_eq!(info["edges"], 4);
    assert_eq!(info["dropped_edges"], 2);
    assert_eq!(info["components"], 2);
}

#[test]
fn test_export_dot_with_route() {
    let (dir, map, config) = setup();
    let out = dir.path().join("campus");

    campusnav(&map, &config)
        .args(["export", "--from", "A6", "--to", "E3", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let dot = fs::read_to_string(dir.path().join("campus.dot")).unwrap();
    assert!(dot.starts_with("graph campus {"));
    assert_eq!(dot.matches("color=red").count(), 2);
}

#[test]
fn test_export_requires_both_ends() {
    let (_dir, map, config) = setup();

    campusnav(&map, &config)
        .args(["export", "--from", "A6"])
        .assert()
        .failure();
}

#[test]
fn test_empty_map_fails() {
    let (dir, _map, config) = setup();
    let empty = dir.path().join("empty.toml");
    fs::write(&empty, "nodes = []\n").unwrap();

    campusnav(&empty, &config)
        .args(["route", "A", "B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no locations"));
}

#[test]
fn test_missing_map_file_fails() {
    let (dir, _map, config) = setup();

    campusnav(&dir.path().join("absent.json"), &config)
        .args(["info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load campus map"));
}

#[test]
fn test_config_prints_defaults() {
    let (_dir, map, config) = setup();

    campusnav(&map, &config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_attribute = \"female\""))
        .stdout(predicate::str::contains("教二楼"));
}

#[test]
fn test_no_color_env_accepts_conventional_values() {
    let (_dir, map, config) = setup();

    for value in ["1", "yes", "", "0"] {
        campusnav(&map, &config)
            .env("NO_COLOR", value)
            .args(["route", "A6", "E3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("distance: 100.00"));
    }
}

#[test]
fn test_navigate_unreachable_building() {
    let (_dir, map, config) = setup();

    campusnav(&map, &config)
        .args(["navigate", "教二楼"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No path to 教二楼"));

    let output = campusnav(&map, &config)
        .args(["--json", "navigate", "教二楼", "-a", "男"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let nav: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(nav["origin"], "A2");
    assert_eq!(nav["destination"], "F4");
    assert!(nav["route"]["cost"].is_null());
}
