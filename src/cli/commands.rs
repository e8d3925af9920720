//! CLI command implementations.

use std::path::{Path, PathBuf};

use crate::engine::{AlgorithmRun, Engine, EngineConfig, MinimumSpanningTree};
use crate::format::{GraphReader, TraceDocument, TraceWriter};
use crate::graph::{EdgeClass, Graph};
use crate::types::{Edge, GraphResult};

/// Settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Print JSON instead of text.
    pub json: bool,
    /// Engine settings (step recording).
    pub engine: EngineConfig,
    /// Where to write the step trace, if anywhere.
    pub trace: Option<PathBuf>,
}

impl OutputOptions {
    fn engine(&self) -> Engine {
        Engine::with_config(self.engine.clone())
    }

    fn save_trace<T>(&self, graph: &Graph<String>, run: &AlgorithmRun<T, String>) -> GraphResult<()> {
        if let Some(path) = &self.trace {
            let document = TraceDocument::new(graph, run);
            TraceWriter::pretty().write_to_file(&document, path)?;
            if !self.json {
                println!("Trace: {} steps written to {}", run.steps.len(), path.display());
            }
        }
        Ok(())
    }
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

fn edge_json(edge: &Edge<String>) -> serde_json::Value {
    serde_json::json!({"from": edge.from, "to": edge.to, "weight": edge.weight})
}

fn format_edges(edges: &[Edge<String>]) -> String {
    if edges.is_empty() {
        return "(none)".to_string();
    }
    edges
        .iter()
        .map(|e| format!("{} -> {}", e.from, e.to))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display summary information about a graph file.
pub fn cmd_info(path: &Path, opts: &OutputOptions) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;

    if opts.json {
        print_json(&serde_json::json!({
            "file": path.display().to_string(),
            "kind": graph.kind().name(),
            "vertices": graph.vertex_count(),
            "edges": graph.edge_count(),
            "total_weight": graph.total_weight(),
        }));
    } else {
        println!("File: {}", path.display());
        println!("Kind: {}", graph.kind().name());
        println!("Vertices: {}", graph.vertex_count());
        println!("Edges: {}", graph.edge_count());
        println!("Total weight: {}", graph.total_weight());
        for vertex in graph.vertices() {
            let neighbors: Vec<String> = graph
                .neighbors(vertex)
                .into_iter()
                .map(|(v, _)| v.clone())
                .collect();
            if neighbors.is_empty() {
                println!("  {} -> (no outgoing edges)", vertex);
            } else {
                println!("  {} -> {}", vertex, neighbors.join(", "));
            }
        }
    }
    Ok(())
}

/// Breadth-first tree, distances and levels from a start vertex.
pub fn cmd_bfs(path: &Path, start: &str, opts: &OutputOptions) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let run = opts.engine().bfs(&graph, &start.to_string())?;
    let tree = &run.result;

    if opts.json {
        print_json(&serde_json::json!({
            "start": start,
            "order": tree.order,
            "tree_edges": tree.tree_edges.iter().map(edge_json).collect::<Vec<_>>(),
            "distances": tree.distances,
            "levels": tree.levels(),
            "steps": run.steps.len(),
        }));
    } else {
        println!("BFS tree from '{}'", start);
        println!("  Order: {}", tree.order.join(" -> "));
        println!("  Tree edges: {}", format_edges(&tree.tree_edges));
        for (depth, level) in tree.levels().iter().enumerate() {
            println!("  Level {}: {}", depth, level.join(", "));
        }
        let unreachable: Vec<&String> =
            graph.vertices().filter(|v| !tree.is_reachable(v)).collect();
        if !unreachable.is_empty() {
            let names: Vec<&str> = unreachable.iter().map(|v| v.as_str()).collect();
            println!("  Unreachable: {}", names.join(", "));
        }
    }
    opts.save_trace(&graph, &run)
}

/// Fewest-edges path between two vertices.
pub fn cmd_path(path: &Path, start: &str, target: &str, opts: &OutputOptions) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let run = opts
        .engine()
        .bfs_path(&graph, &start.to_string(), &target.to_string())?;

    match (&run.result, opts.json) {
        (Some(hop_path), true) => print_json(&serde_json::json!({
            "path": hop_path.vertices,
            "hops": hop_path.hops,
        })),
        (None, true) => print_json(&serde_json::json!({"path": null, "hops": null})),
        (Some(hop_path), false) => println!(
            "{} (distance: {})",
            hop_path.vertices.join(" -> "),
            hop_path.hops
        ),
        (None, false) => println!("No path from '{}' to '{}' (distance: inf)", start, target),
    }
    opts.save_trace(&graph, &run)
}

/// Components by repeated BFS.
pub fn cmd_components(path: &Path, opts: &OutputOptions) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let run = opts.engine().components(&graph)?;

    if opts.json {
        print_json(&serde_json::json!({"components": run.result}));
    } else {
        println!("Components: {}", run.result.len());
        for (i, component) in run.result.iter().enumerate() {
            println!("  {}: {}", i + 1, component.join(", "));
        }
    }
    opts.save_trace(&graph, &run)
}

/// DFS forest with timestamps and edge classes.
pub fn cmd_dfs(path: &Path, start: Option<&str>, opts: &OutputOptions) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let start = start.map(str::to_string);
    let run = opts.engine().dfs(&graph, start.as_ref())?;
    let forest = &run.result;

    if opts.json {
        let classified: Vec<serde_json::Value> = forest
            .classified
            .iter()
            .map(|c| serde_json::json!({"from": c.edge.from, "to": c.edge.to, "class": c.class.name()}))
            .collect();
        print_json(&serde_json::json!({
            "order": forest.order,
            "discovery": forest.discovery,
            "finish": forest.finish,
            "edges": classified,
            "trees": forest.trees.len(),
            "has_cycle": forest.has_cycle(),
        }));
    } else {
        println!("DFS order: {}", forest.order.join(" -> "));
        println!("Timestamps:");
        for vertex in &forest.order {
            if let Some((d, f)) = forest.timestamps(vertex) {
                println!("  {}: d={}, f={}", vertex, d, f);
            }
        }
        println!("Edge classes:");
        for c in &forest.classified {
            println!("  {} -> {}: {}", c.edge.from, c.edge.to, c.class.symbol());
        }
        for class in [EdgeClass::Tree, EdgeClass::Back, EdgeClass::Forward, EdgeClass::Cross] {
            println!("  {} edges: {}", class.name(), forest.count(class));
        }
        println!("Trees: {}", forest.trees.len());
        for (i, tree) in forest.trees.iter().enumerate() {
            println!(
                "  Tree {} (root {}): {}",
                i + 1,
                tree.root,
                tree.order.join(" -> ")
            );
        }
        println!("Has cycle: {}", forest.has_cycle());
    }
    opts.save_trace(&graph, &run)
}

/// Topological order, or an error naming a back edge.
pub fn cmd_topo(path: &Path, opts: &OutputOptions) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let run = opts.engine().topological_sort(&graph)?;

    if opts.json {
        print_json(&serde_json::json!({"order": run.result}));
    } else {
        println!("Topological order: {}", run.result.join(" -> "));
    }
    opts.save_trace(&graph, &run)
}

/// Dijkstra distances, optionally with the path to one target.
pub fn cmd_dijkstra(
    path: &Path,
    source: &str,
    target: Option<&str>,
    opts: &OutputOptions,
) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let run = opts.engine().dijkstra(&graph, &source.to_string())?;
    let paths = &run.result;
    let target = target.map(str::to_string);
    if let Some(t) = &target {
        graph.require_vertex(t)?;
    }

    if opts.json {
        let distances: serde_json::Map<String, serde_json::Value> = paths
            .distances
            .iter()
            .map(|(v, d)| {
                let value = if d.is_finite() {
                    serde_json::json!(d)
                } else {
                    serde_json::Value::Null
                };
                (v.clone(), value)
            })
            .collect();
        let path_value = target
            .as_ref()
            .and_then(|t| paths.path_to(t))
            .map(|p| serde_json::json!(p))
            .unwrap_or(serde_json::Value::Null);
        print_json(&serde_json::json!({
            "source": source,
            "distances": distances,
            "path": path_value,
        }));
    } else {
        println!("Distances from '{}':", source);
        for (vertex, d) in &paths.distances {
            if d.is_finite() {
                println!("  {}: {}", vertex, d);
            } else {
                println!("  {}: inf", vertex);
            }
        }
        if let Some(t) = &target {
            match paths.path_to(t) {
                Some(p) => println!("Path to '{}': {} (length {})", t, p.join(" -> "), paths.distance(t)),
                None => println!("'{}' is unreachable", t),
            }
        }
    }
    opts.save_trace(&graph, &run)
}

fn print_mst(name: &str, mst: &MinimumSpanningTree<String>, json: bool) {
    if json {
        print_json(&serde_json::json!({
            "algorithm": name,
            "edges": mst.edges.iter().map(edge_json).collect::<Vec<_>>(),
            "total_weight": mst.total_weight,
            "components": mst.component_count,
        }));
    } else {
        println!("{} MST edges:", name);
        for edge in &mst.edges {
            println!("  ({}, {}) = {}", edge.from, edge.to, edge.weight);
        }
        println!("Total weight: {}", mst.total_weight);
        if !mst.is_spanning() {
            println!("Components: {} (spanning forest)", mst.component_count);
        }
    }
}

/// Kruskal's minimum spanning forest.
pub fn cmd_kruskal(path: &Path, opts: &OutputOptions) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let run = opts.engine().kruskal(&graph)?;
    print_mst("Kruskal", &run.result, opts.json);
    opts.save_trace(&graph, &run)
}

/// Prim's minimum spanning tree. Defaults to the smallest vertex.
pub fn cmd_prim(path: &Path, start: Option<&str>, opts: &OutputOptions) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let start = resolve_start(&graph, start);
    let run = opts.engine().prim(&graph, &start)?;
    print_mst("Prim", &run.result, opts.json);
    opts.save_trace(&graph, &run)
}

/// Run both MST algorithms and compare totals.
pub fn cmd_compare(path: &Path, start: Option<&str>, opts: &OutputOptions) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let engine = opts.engine();
    let start = resolve_start(&graph, start);
    let kruskal = engine.kruskal(&graph)?;
    let prim = engine.prim(&graph, &start)?;
    let agree = (kruskal.result.total_weight - prim.result.total_weight).abs() < 1e-9;

    if opts.json {
        print_json(&serde_json::json!({
            "kruskal": kruskal.result.total_weight,
            "prim": prim.result.total_weight,
            "prim_start": start,
            "agree": agree,
        }));
    } else {
        println!("Kruskal total: {} ({} steps)", kruskal.result.total_weight, kruskal.steps.len());
        println!(
            "Prim total from '{}': {} ({} steps)",
            start,
            prim.result.total_weight,
            prim.steps.len()
        );
        println!("Totals agree: {}", if agree { "yes" } else { "no" });
    }
    Ok(())
}

fn resolve_start(graph: &Graph<String>, start: Option<&str>) -> String {
    match start {
        Some(s) => s.to_string(),
        None => graph.vertices().next().cloned().unwrap_or_default(),
    }
}
