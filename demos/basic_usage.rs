//! Build a small weighted graph, run every algorithm and step through a trace.

use graph_trace::{Engine, EngineConfig, GraphBuilder, GraphResult};

fn main() -> GraphResult<()> {
    let graph = GraphBuilder::undirected()
        .edges([
            ("A", "V1", 4.0),
            ("A", "V3", 14.0),
            ("V1", "V2", 4.0),
            ("V2", "V3", 7.0),
            ("V2", "V5", 9.0),
            ("V3", "V6", 12.0),
            ("V5", "V6", 8.0),
        ])
        .build()?;

    let engine = Engine::with_config(EngineConfig {
        record_steps: true,
        max_steps: Some(100),
    });

    let bfs = engine.bfs(&graph, &"A")?;
    println!("BFS levels from A: {:?}", bfs.result.levels());

    let dfs = engine.dfs(&graph, Some(&"A"))?;
    println!("DFS order: {:?} (cycle: {})", dfs.result.order, dfs.result.has_cycle());

    let paths = engine.dijkstra(&graph, &"A")?;
    println!(
        "Shortest A -> V6: {:?} = {}",
        paths.result.path_to(&"V6"),
        paths.result.distance(&"V6")
    );

    let kruskal = engine.kruskal(&graph)?;
    let prim = engine.prim(&graph, &"V6")?;
    println!(
        "MST total: Kruskal {} / Prim {}",
        kruskal.result.total_weight, prim.result.total_weight
    );

    println!("\nKruskal trace ({} steps):", kruskal.steps.len());
    let mut cursor = kruskal.steps.cursor();
    while let Some(step) = cursor.current() {
        println!(
            "  [{:>2}] {} | {} | total {}",
            cursor.position(),
            step.title,
            step.subtitle.as_deref().unwrap_or(""),
            step.running_total
        );
        if cursor.next_step().is_none() {
            break;
        }
    }

    Ok(())
}
