use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn typegraph(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("typegraph").unwrap();
    cmd.env("HOME", home)
        .env_remove("TYPEGRAPH_GRAPH")
        .env_remove("RUST_LOG");
    cmd
}

/// Empty graph file inside a fresh home directory
fn empty_graph() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let graph = dir.path().join("graph.json");
    std::fs::write(&graph, r#"{"metadata": {"name": "test graph"}}"#).unwrap();
    (dir, graph)
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn add_nodes(home: &Path, graph: &Path, ids: &[&str]) {
    for id in ids {
        typegraph(home)
            .arg("--graph")
            .arg(graph)
            .args(["node", "add", id, "--id", id])
            .assert()
            .success();
    }
}

fn add_edge(home: &Path, graph: &Path, from: &str, to: &str, strength: &str) {
    typegraph(home)
        .arg("--graph")
        .arg(graph)
        .args(["edge", "add", from, to, "--relationship", "uses", "--strength", strength])
        .assert()
        .success();
}

#[test]
fn query_builtin_primitives() {
    let home = tempfile::tempdir().unwrap();
    let value = json_stdout(
        typegraph(home.path()).args(["--json", "query", "--category", "built-in", "--min", "1", "--max", "2"]),
    );

    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    for expected in ["string", "number", "boolean", "null", "undefined", "void", "any"] {
        assert!(ids.contains(&expected), "missing {expected}");
    }
    assert!(!ids.contains(&"never"));
    assert!(!ids.contains(&"unknown"));
}

#[test]
fn query_search_term_text_output() {
    let home = tempfile::tempdir().unwrap();
    typegraph(home.path())
        .args(["query", "optional"])
        .assert()
        .success()
        .stdout(predicate::str::contains("partial"));
}

#[test]
fn invalid_complexity_range_fails() {
    let home = tempfile::tempdir().unwrap();
    typegraph(home.path())
        .args(["query", "--min", "4", "--max", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid complexity range"));
}

#[test]
fn shortest_path_prefers_strong_edges() {
    let (home, graph) = empty_graph();
    add_nodes(home.path(), &graph, &["A", "B", "C"]);
    add_edge(home.path(), &graph, "A", "B", "9");
    add_edge(home.path(), &graph, "B", "C", "9");
    add_edge(home.path(), &graph, "A", "C", "1");

    let value = json_stdout(typegraph(home.path()).arg("--graph").arg(&graph).args(["--json", "path", "A", "C"]));
    assert_eq!(value["distance"], 4);
    assert_eq!(value["path"], serde_json::json!(["A", "B", "C"]));
}

#[test]
fn unreachable_path_is_not_an_error() {
    let (home, graph) = empty_graph();
    add_nodes(home.path(), &graph, &["A", "B"]);

    typegraph(home.path())
        .arg("--graph")
        .arg(&graph)
        .args(["path", "A", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No path from A to B"));
}

#[test]
fn edge_with_missing_endpoint_is_rejected() {
    let (home, graph) = empty_graph();
    add_nodes(home.path(), &graph, &["A"]);

    typegraph(home.path())
        .arg("--graph")
        .arg(&graph)
        .args(["edge", "add", "A", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));

    let value = json_stdout(typegraph(home.path()).arg("--graph").arg(&graph).args(["--json", "analyze", "--stats"]));
    assert_eq!(value["stats"]["edgeCount"], 0);
}

#[test]
fn removing_a_node_removes_its_edges() {
    let (home, graph) = empty_graph();
    add_nodes(home.path(), &graph, &["A", "B", "C"]);
    add_edge(home.path(), &graph, "A", "B", "5");
    add_edge(home.path(), &graph, "B", "C", "5");
    add_edge(home.path(), &graph, "A", "C", "5");

    typegraph(home.path())
        .arg("--graph")
        .arg(&graph)
        .args(["node", "remove", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed node B and 2 edges"));

    let value = json_stdout(typegraph(home.path()).arg("--graph").arg(&graph).args(["--json", "analyze", "--stats"]));
    assert_eq!(value["stats"]["nodeCount"], 2);
    assert_eq!(value["stats"]["edgeCount"], 1);
}

#[test]
fn node_complexity_is_clamped() {
    let (home, graph) = empty_graph();
    let value = json_stdout(
        typegraph(home.path())
            .arg("--graph")
            .arg(&graph)
            .args(["--json", "node", "add", "Deep", "--id", "deep", "--complexity", "9"]),
    );
    assert_eq!(value["complexity"], 5);

    typegraph(home.path())
        .arg("--graph")
        .arg(&graph)
        .args(["node", "get", "deep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complexity: 5"));
}

#[test]
fn missing_node_is_reported() {
    let home = tempfile::tempdir().unwrap();
    typegraph(home.path())
        .args(["node", "get", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Node not found"));
}

#[test]
fn mutation_without_graph_file_fails() {
    let home = tempfile::tempdir().unwrap();
    typegraph(home.path())
        .args(["node", "add", "Orphan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No graph file"));
}

#[test]
fn analyze_reports_ring_and_isolated_node() {
    let (home, graph) = empty_graph();
    add_nodes(home.path(), &graph, &["A", "B", "C", "Z"]);
    add_edge(home.path(), &graph, "A", "B", "5");
    add_edge(home.path(), &graph, "B", "C", "5");
    add_edge(home.path(), &graph, "C", "A", "5");

    let value = json_stdout(typegraph(home.path()).arg("--graph").arg(&graph).args(["--json", "analyze"]));
    let analysis = &value["analysis"];
    assert_eq!(analysis["circularDependencies"], serde_json::json!([["A", "B", "C"]]));
    assert_eq!(analysis["isolatedNodes"], serde_json::json!(["Z"]));
    assert_eq!(analysis["clusters"].as_array().unwrap().len(), 1);
    assert_eq!(analysis["criticalPath"].as_array().unwrap().len(), 3);
}

#[test]
fn neighbors_of_builtin_node() {
    let home = tempfile::tempdir().unwrap();
    let value = json_stdout(
        typegraph(home.path()).args(["--json", "edge", "neighbors", "literal", "--direction", "out"]),
    );
    let ids: Vec<&str> = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["boolean", "number", "string"]);
}

#[test]
fn export_formats() {
    let home = tempfile::tempdir().unwrap();

    typegraph(home.path())
        .args(["export", "--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph \"TypeScript Type System\" {"));

    let value = json_stdout(typegraph(home.path()).args(["export", "--format", "cytoscape"]));
    assert!(!value["nodes"].as_array().unwrap().is_empty());
    assert!(value["edges"][0]["data"]["source"].is_string());

    typegraph(home.path())
        .args(["export", "--format", "graphml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("graphml"));
}

#[test]
fn export_then_import_round_trip() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("catalogue.json");

    typegraph(home.path())
        .args(["export", "--output"])
        .arg(&file)
        .assert()
        .success();

    let exported: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    let node_count = exported["nodes"].as_array().unwrap().len();

    let summary = json_stdout(typegraph(home.path()).arg("--json").arg("import").arg(&file));
    assert_eq!(summary["name"], "TypeScript Type System");
    assert_eq!(summary["nodes"], node_count);
    assert_eq!(summary["danglingEdges"], 0);
    assert_eq!(summary["merged"], false);
}

#[test]
fn import_merge_into_graph() {
    let (home, graph) = empty_graph();
    add_nodes(home.path(), &graph, &["A"]);

    let extra = home.path().join("extra.json");
    std::fs::write(
        &extra,
        r#"{"nodes": [{"id": "B", "name": "B"}], "edges": [{"id": "e", "source": "A", "target": "B"}]}"#,
    )
    .unwrap();

    typegraph(home.path())
        .arg("--graph")
        .arg(&graph)
        .arg("import")
        .arg(&extra)
        .arg("--merge")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged"));

    let value = json_stdout(typegraph(home.path()).arg("--graph").arg(&graph).args(["--json", "path", "A", "B"]));
    assert_eq!(value["path"], serde_json::json!(["A", "B"]));
}

#[test]
fn config_set_get_and_use() {
    let home = tempfile::tempdir().unwrap();

    typegraph(home.path())
        .args(["config", "set", "export_format", "dot"])
        .assert()
        .success();
    typegraph(home.path())
        .args(["config", "get", "export_format"])
        .assert()
        .success()
        .stdout("dot\n");
    typegraph(home.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"));

    typegraph(home.path())
        .args(["config", "set", "critical_path_limit", "lots"])
        .assert()
        .failure();
    typegraph(home.path())
        .args(["config", "get", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn config_graph_file_and_seed() {
    let home = tempfile::tempdir().unwrap();
    let graph = home.path().join("mine.json");

    typegraph(home.path())
        .args(["config", "set", "seed_catalogue", "false"])
        .assert()
        .success();
    typegraph(home.path())
        .args(["config", "set", "graph_file"])
        .arg(&graph)
        .assert()
        .success();

    typegraph(home.path())
        .args(["node", "add", "Solo", "--id", "solo"])
        .assert()
        .success();

    let value = json_stdout(typegraph(home.path()).args(["--json", "node", "list"]));
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert!(graph.exists());
}

#[test]
fn completions_for_bash() {
    let home = tempfile::tempdir().unwrap();
    typegraph(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("typegraph"));
}
