//! Phase 4 tests: engine configuration, traces, file formats and the CLI.

use std::io::{Cursor, Write};

use tempfile::NamedTempFile;

use graph_trace::format::EdgeRecord;
use graph_trace::{
    Algorithm, Disposition, Engine, EngineConfig, Graph, GraphBuilder, GraphError, GraphFile,
    GraphKind, GraphReader, TraceDocument, TraceWriter,
};

// ==================== Helpers ====================

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const MST_JSON: &str = r#"{
    "kind": "undirected",
    "edges": [
        {"from": "A", "to": "V1", "weight": 4},
        {"from": "A", "to": "V3", "weight": 14},
        {"from": "V1", "to": "V2", "weight": 4},
        {"from": "V1", "to": "V4", "weight": 20},
        {"from": "V2", "to": "V3", "weight": 7},
        {"from": "V2", "to": "V5", "weight": 9},
        {"from": "V3", "to": "V6", "weight": 12},
        {"from": "V4", "to": "V5", "weight": 11},
        {"from": "V4", "to": "V7", "weight": 15},
        {"from": "V4", "to": "V8", "weight": 7},
        {"from": "V5", "to": "V6", "weight": 8},
        {"from": "V6", "to": "V7", "weight": 11},
        {"from": "V7", "to": "V8", "weight": 7},
        {"from": "V7", "to": "V9", "weight": 4},
        {"from": "V8", "to": "V9", "weight": 5},
        {"from": "V8", "to": "B", "weight": 7},
        {"from": "V9", "to": "B", "weight": 3}
    ]
}"#;

fn mst_graph() -> Graph<String> {
    GraphReader::from_json(MST_JSON).unwrap()
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(contents.as_bytes()).unwrap();
    tmp.flush().unwrap();
    tmp
}

// ==================== Engine Tests ====================

#[test]
fn test_engine_records_steps_by_default() {
    init_logging();
    let engine = Engine::new();
    assert!(engine.config().record_steps);

    let graph = mst_graph();
    let run = engine.kruskal(&graph).unwrap();
    assert_eq!(run.algorithm, Algorithm::Kruskal);
    assert_eq!(run.result.total_weight, 62.0);
    assert_eq!(run.steps.len(), 2 + 2 * graph.edge_count());
    assert!(!run.steps.is_truncated());
}

#[test]
fn test_engine_without_steps() {
    init_logging();
    let engine = Engine::with_config(EngineConfig {
        record_steps: false,
        max_steps: None,
    });
    let graph = mst_graph();
    let run = engine.prim(&graph, &"A".to_string()).unwrap();
    assert_eq!(run.result.total_weight, 62.0);
    assert!(run.steps.is_empty());
}

#[test]
fn test_engine_step_limit_truncates() {
    init_logging();
    let engine = Engine::with_config(EngineConfig {
        record_steps: true,
        max_steps: Some(5),
    });
    let graph = mst_graph();
    let run = engine.kruskal(&graph).unwrap();
    assert_eq!(run.result.total_weight, 62.0);
    assert_eq!(run.result.edges.len(), 10);
    assert_eq!(run.steps.len(), 5);
    assert!(run.steps.is_truncated());
}

#[test]
fn test_engine_runs_every_algorithm() {
    init_logging();
    let graph = GraphBuilder::new()
        .edges([
            ("a".to_string(), "b".to_string(), 1.0),
            ("b".to_string(), "c".to_string(), 2.0),
            ("a".to_string(), "c".to_string(), 5.0),
        ])
        .build()
        .unwrap();
    let a = "a".to_string();
    let c = "c".to_string();
    let engine = Engine::new();

    let bfs = engine.bfs(&graph, &a).unwrap();
    assert_eq!(bfs.algorithm, Algorithm::Bfs);
    assert_eq!(bfs.result.distance(&c), Some(1));

    let path = engine.bfs_path(&graph, &a, &c).unwrap();
    assert_eq!(path.result.unwrap().hops, 1);

    let components = engine.components(&graph).unwrap();
    assert_eq!(components.result.len(), 1);

    let dfs = engine.dfs(&graph, None).unwrap();
    assert!(!dfs.result.has_cycle());

    let topo = engine.topological_sort(&graph).unwrap();
    assert_eq!(topo.result, vec!["a", "b", "c"]);
    assert_eq!(topo.algorithm.name(), "topological_sort");

    let dijkstra = engine.dijkstra(&graph, &a).unwrap();
    assert_eq!(dijkstra.result.distance(&c), 3.0);
}

#[test]
fn test_engine_propagates_errors() {
    let graph = mst_graph();
    let engine = Engine::new();
    let err = engine.prim(&graph, &"nowhere".to_string()).unwrap_err();
    assert!(matches!(err, GraphError::VertexNotFound(_)));
}

#[test]
fn test_concurrent_runs_share_one_graph() {
    init_logging();
    let graph = mst_graph();
    let engine = Engine::new();

    let (kruskal, prims) = std::thread::scope(|scope| {
        let k = scope.spawn(|| engine.kruskal(&graph).unwrap());
        let p: Vec<_> = ["A", "V5", "B"]
            .into_iter()
            .map(|start| {
                let engine = &engine;
                let graph = &graph;
                scope.spawn(move || engine.prim(graph, &start.to_string()).unwrap())
            })
            .collect();
        (
            k.join().unwrap(),
            p.into_iter().map(|h| h.join().unwrap()).collect::<Vec<_>>(),
        )
    });

    assert_eq!(kruskal.result.total_weight, 62.0);
    for run in prims {
        assert_eq!(run.result.total_weight, kruskal.result.total_weight);
    }
}

// ==================== Step Cursor Tests ====================

#[test]
fn test_cursor_walks_forward_and_back() {
    let graph = mst_graph();
    let run = Engine::new().kruskal(&graph).unwrap();
    let mut cursor = run.steps.cursor();

    assert!(cursor.is_at_start());
    assert_eq!(cursor.current().unwrap().title, "Kruskal's algorithm");
    assert!(cursor.prev_step().is_none());
    assert_eq!(cursor.position(), 0);

    let second = cursor.next_step().unwrap();
    assert_eq!(second.disposition, Some(Disposition::Pending));
    assert_eq!(cursor.position(), 1);

    let end = cursor.seek_end().unwrap();
    assert_eq!(end.title, "Minimum spanning tree (Kruskal)");
    assert!(cursor.is_at_end());
    assert!(cursor.next_step().is_none());
    assert_eq!(cursor.position(), run.steps.len() - 1);

    assert!(cursor.seek(run.steps.len()).is_none());
    assert_eq!(cursor.position(), run.steps.len() - 1);
    assert!(cursor.seek(3).is_some());
    assert_eq!(cursor.prev_step().unwrap(), run.steps.get(2).unwrap());
    assert!(cursor.rewind().is_some());
    assert!(cursor.is_at_start());
}

#[test]
fn test_cursor_on_empty_sequence() {
    let graph: Graph<String> = Graph::new();
    let run = Engine::new().kruskal(&graph).unwrap();
    let mut cursor = run.steps.cursor();
    assert!(cursor.is_empty());
    assert!(cursor.current().is_none());
    assert!(cursor.next_step().is_none());
    assert!(cursor.prev_step().is_none());
    assert!(cursor.seek_end().is_none());
}

#[test]
fn test_steps_are_snapshots() {
    let graph = mst_graph();
    let run = Engine::new().kruskal(&graph).unwrap();
    let counts: Vec<usize> = run.steps.iter().map(|s| s.accepted_edges.len()).collect();
    assert_eq!(counts.first(), Some(&0));
    assert_eq!(counts.last(), Some(&10));
    assert!(counts.windows(2).all(|w| w[1] >= w[0]));
}

// ==================== Format Tests ====================

#[test]
fn test_read_graph_file() {
    init_logging();
    let tmp = write_temp(MST_JSON);
    let graph = GraphReader::read_from_file(tmp.path()).unwrap();
    assert_eq!(graph.kind(), GraphKind::Undirected);
    assert_eq!(graph.vertex_count(), 11);
    assert_eq!(graph.edge_count(), 17);
}

#[test]
fn test_read_defaults() {
    let json = r#"{"edges": [{"from": "a", "to": "b"}], "vertices": ["z"]}"#;
    let graph = GraphReader::read_from(&mut Cursor::new(json)).unwrap();
    assert!(graph.is_directed());
    assert_eq!(graph.edges()[0].weight, 1.0);
    assert!(graph.contains(&"z".to_string()));
}

#[test]
fn test_read_rejects_bad_documents() {
    assert!(matches!(
        GraphReader::from_json("{ not json"),
        Err(GraphError::Json(_))
    ));
    assert!(matches!(
        GraphReader::from_json(r#"{"kind": "sideways"}"#),
        Err(GraphError::Json(_))
    ));
    assert!(matches!(
        GraphReader::from_json(r#"{"edges": [{"from": "", "to": "b"}]}"#),
        Err(GraphError::InvalidGraphFile(_))
    ));
    assert!(matches!(
        GraphReader::from_json(r#"{"vertices": ["  "]}"#),
        Err(GraphError::InvalidGraphFile(_))
    ));
}

#[test]
fn test_read_missing_file() {
    let err = GraphReader::read_from_file(std::path::Path::new("/definitely/not/here.json"))
        .unwrap_err();
    assert!(matches!(err, GraphError::Io(_)));
}

#[test]
fn test_graph_file_snapshot() {
    let graph = mst_graph();
    let file = GraphFile::from_graph(&graph);
    assert_eq!(file.kind, GraphKind::Undirected);
    assert_eq!(file.vertices.len(), 11);
    assert_eq!(
        file.edges[0],
        EdgeRecord {
            from: "A".to_string(),
            to: "V1".to_string(),
            weight: Some(4.0),
        }
    );

    let json = serde_json::to_string(&file).unwrap();
    let reread = GraphReader::from_json(&json).unwrap();
    assert_eq!(reread.edges(), graph.edges());
    assert_eq!(reread.kind(), graph.kind());
}

#[test]
fn test_trace_document_json() {
    let graph = mst_graph();
    let run = Engine::new().kruskal(&graph).unwrap();
    let document = TraceDocument::new(&graph, &run);

    let mut buffer = Vec::new();
    TraceWriter::new().write_to(&document, &mut buffer).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(value["version"], 1);
    assert_eq!(value["algorithm"], "kruskal");
    assert_eq!(value["vertexCount"], 11);
    assert_eq!(value["edgeCount"], 17);
    assert_eq!(value["truncated"], false);
    assert!(value["generatedAt"].as_str().unwrap().contains('T'));

    let steps = value["steps"].as_array().unwrap();
    assert_eq!(steps.len(), run.steps.len());
    assert_eq!(steps[0]["auxiliary"]["components"], 11.0);
    assert!(steps[0].get("subtitle").is_none());

    let verdict = &steps[2];
    assert_eq!(verdict["disposition"], "accepted");
    assert_eq!(verdict["consideredEdge"]["from"], "V9");
    assert_eq!(verdict["acceptedEdges"].as_array().unwrap().len(), 1);
    assert_eq!(verdict["runningTotal"], 3.0);
}

#[test]
fn test_trace_file_written() {
    let graph = mst_graph();
    let run = Engine::new().prim(&graph, &"A".to_string()).unwrap();
    let tmp = NamedTempFile::new().unwrap();

    TraceWriter::pretty()
        .write_to_file(&TraceDocument::new(&graph, &run), tmp.path())
        .unwrap();

    let text = std::fs::read_to_string(tmp.path()).unwrap();
    assert!(text.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["algorithm"], "prim");
    let last = value["steps"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["auxiliary"]["visitedVertices"].as_array().unwrap().len(), 11);
}

// ==================== CLI Tests ====================

#[cfg(feature = "cli")]
mod cli {
    use std::process::{Command, Output};

    use super::{write_temp, MST_JSON};

    const DAG_JSON: &str = r#"{
        "edges": [
            {"from": "a", "to": "b"}, {"from": "a", "to": "d"}, {"from": "a", "to": "e"},
            {"from": "b", "to": "c"}, {"from": "b", "to": "d"}, {"from": "c", "to": "h"},
            {"from": "c", "to": "g"}, {"from": "d", "to": "f"}, {"from": "e", "to": "d"},
            {"from": "e", "to": "f"}, {"from": "f", "to": "j"}, {"from": "h", "to": "g"},
            {"from": "i", "to": "g"}, {"from": "i", "to": "h"}
        ]
    }"#;

    /// Run the `gtrace` CLI with the given arguments and return the output.
    fn run_gtrace(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gtrace"))
            .args(args)
            .output()
            .expect("Failed to run gtrace")
    }

    fn assert_success(output: &Output) {
        assert!(
            output.status.success(),
            "gtrace failed with status {:?}\nstdout: {}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }

    fn stdout_str(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    #[test]
    fn test_cli_info() {
        let tmp = write_temp(MST_JSON);
        let output = run_gtrace(&["info", tmp.path().to_str().unwrap()]);
        assert_success(&output);
        let out = stdout_str(&output);
        assert!(out.contains("Kind: undirected"));
        assert!(out.contains("Vertices: 11"));
        assert!(out.contains("Edges: 17"));
    }

    #[test]
    fn test_cli_kruskal_text() {
        let tmp = write_temp(MST_JSON);
        let output = run_gtrace(&["kruskal", tmp.path().to_str().unwrap()]);
        assert_success(&output);
        let out = stdout_str(&output);
        assert!(out.contains("(V9, B) = 3"));
        assert!(out.contains("Total weight: 62"));
    }

    #[test]
    fn test_cli_compare_json() {
        let tmp = write_temp(MST_JSON);
        let output = run_gtrace(&[
            "--format",
            "json",
            "compare",
            tmp.path().to_str().unwrap(),
            "--start",
            "V5",
        ]);
        assert_success(&output);
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["kruskal"], 62.0);
        assert_eq!(value["prim"], 62.0);
        assert_eq!(value["agree"], true);
    }

    #[test]
    fn test_cli_bfs_with_trace() {
        let tmp = write_temp(DAG_JSON);
        let trace = tempfile::NamedTempFile::new().unwrap();
        let output = run_gtrace(&[
            "--format",
            "json",
            "bfs",
            tmp.path().to_str().unwrap(),
            "a",
            "--trace",
            trace.path().to_str().unwrap(),
        ]);
        assert_success(&output);
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["distances"]["j"], 3);
        assert!(value["distances"].get("i").is_none());

        let document: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(trace.path()).unwrap()).unwrap();
        assert_eq!(document["algorithm"], "bfs");
        assert!(!document["steps"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_cli_max_steps_truncates_trace() {
        let tmp = write_temp(MST_JSON);
        let trace = tempfile::NamedTempFile::new().unwrap();
        let output = run_gtrace(&[
            "--max-steps",
            "3",
            "kruskal",
            tmp.path().to_str().unwrap(),
            "--trace",
            trace.path().to_str().unwrap(),
        ]);
        assert_success(&output);
        let document: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(trace.path()).unwrap()).unwrap();
        assert_eq!(document["truncated"], true);
        assert_eq!(document["steps"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_cli_topo_and_dfs() {
        let tmp = write_temp(DAG_JSON);
        let path = tmp.path().to_str().unwrap();

        let output = run_gtrace(&["topo", path]);
        assert_success(&output);
        assert!(stdout_str(&output).contains("i -> a -> e -> b -> d -> f -> j -> c -> h -> g"));

        let output = run_gtrace(&["dfs", path, "--start", "a"]);
        assert_success(&output);
        let out = stdout_str(&output);
        assert!(out.contains("e -> d: C"));
        assert!(out.contains("a -> d: F"));
        assert!(out.contains("Has cycle: false"));
    }

    #[test]
    fn test_cli_dijkstra_path() {
        let graph = r#"{"edges": [
            {"from": "s", "to": "u", "weight": 10}, {"from": "s", "to": "x", "weight": 5},
            {"from": "u", "to": "x", "weight": 2}, {"from": "x", "to": "u", "weight": 3},
            {"from": "x", "to": "v", "weight": 9}, {"from": "u", "to": "v", "weight": 1},
            {"from": "x", "to": "y", "weight": 2}, {"from": "y", "to": "v", "weight": 6},
            {"from": "v", "to": "y", "weight": 4}, {"from": "y", "to": "s", "weight": 7}
        ]}"#;
        let tmp = write_temp(graph);
        let output = run_gtrace(&[
            "--format",
            "json",
            "dijkstra",
            tmp.path().to_str().unwrap(),
            "s",
            "--target",
            "v",
        ]);
        assert_success(&output);
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["distances"]["v"], 9.0);
        assert_eq!(value["path"], serde_json::json!(["s", "x", "u", "v"]));
    }

    #[test]
    fn test_cli_path_unreachable() {
        let tmp = write_temp(DAG_JSON);
        let output = run_gtrace(&["path", tmp.path().to_str().unwrap(), "a", "i"]);
        assert_success(&output);
        assert!(stdout_str(&output).contains("distance: inf"));
    }

    #[test]
    fn test_cli_exit_codes() {
        let output = run_gtrace(&["info", "/definitely/not/here.json"]);
        assert_eq!(output.status.code(), Some(1));

        let bad = write_temp("{ not json");
        let output = run_gtrace(&["info", bad.path().to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(2));

        let negative = write_temp(r#"{"edges": [{"from": "a", "to": "b", "weight": -1}]}"#);
        let output = run_gtrace(&["kruskal", negative.path().to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(3));

        let dag = write_temp(DAG_JSON);
        let output = run_gtrace(&["bfs", dag.path().to_str().unwrap(), "zzz"]);
        assert_eq!(output.status.code(), Some(4));

        let cyclic = write_temp(r#"{"edges": [{"from": "a", "to": "b"}, {"from": "b", "to": "a"}]}"#);
        let output = run_gtrace(&["topo", cyclic.path().to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(5));
    }
}
