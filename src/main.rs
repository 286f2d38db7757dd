use anyhow::{Context, Result};
use clap::Parser;
use csv::{ReaderBuilder, Writer};
use fnv::FnvHashMap;

use drone_routes::{shortest_paths, AdjacencyMatrix, Route};

#[derive(Parser, Debug)]
#[command(name = "routes")]
#[command(about = "Build a graph from a CSV edge list and print the shortest routes from a meeting-point node.", long_about = None)]
struct Cli {
    /// Path to the .csv file (header: node_id,neighbor_node_id,weight)
    #[arg(short, long)]
    csv: String,

    /// Meeting-point node id to route from
    #[arg(short, long, default_value_t = 0)]
    source: i64,

    /// Print only the route to this node id, with a per-edge breakdown
    #[arg(short, long)]
    dest: Option<i64>,

    /// Output CSV (node_id, cost_mins, route). If omitted, prints routes to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Include unreachable nodes in the CSV output with infinite cost
    #[arg(long, default_value_t = false)]
    include_unreachable: bool,

    /// Treat edges as one-way. By default every edge is written in both directions.
    #[arg(long, default_value_t = false)]
    directed: bool,
}

struct LoadedGraph {
    matrix: AdjacencyMatrix,
    id_to_idx: FnvHashMap<i64, usize>,
    idx_to_id: Vec<i64>,
}

fn load_graph(path: &str, directed: bool) -> Result<LoadedGraph> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path))?;

    let mut raw_edges: Vec<(i64, i64, f64)> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let node_id: i64 = record[0].parse()?;
        let neighbor_node_id: i64 = record[1].parse()?;
        let weight: f64 = record[2].parse()?;
        raw_edges.push((node_id, neighbor_node_id, weight));
    }

    // Map raw node ids to dense indices for the matrix.
    let mut id_to_idx: FnvHashMap<i64, usize> = FnvHashMap::default();
    let mut idx_to_id: Vec<i64> = Vec::new();
    for &(u, v, _) in &raw_edges {
        for id in [u, v] {
            if !id_to_idx.contains_key(&id) {
                id_to_idx.insert(id, idx_to_id.len());
                idx_to_id.push(id);
            }
        }
    }

    let edges: Vec<(usize, usize, f64)> = raw_edges
        .iter()
        .map(|&(u, v, w)| (id_to_idx[&u], id_to_idx[&v], w))
        .collect();
    let matrix = AdjacencyMatrix::from_edges(&edges, idx_to_id.len(), directed)?;

    Ok(LoadedGraph {
        matrix,
        id_to_idx,
        idx_to_id,
    })
}

/// Route listing in the CSV's node ids, e.g. "0->2->1".
fn format_route(route: &Route, idx_to_id: &[i64]) -> String {
    route
        .path
        .iter()
        .map(|&idx| idx_to_id[idx].to_string())
        .collect::<Vec<_>>()
        .join("->")
}

fn print_route(route: &Route, source_id: i64, idx_to_id: &[i64]) {
    println!(
        "To get from Node {} to Node {}, the minimum cost is {} mins.",
        source_id, idx_to_id[route.destination], route.cost
    );
    if route.cost.is_unreachable() {
        println!("There is no route to this node.");
    } else {
        println!(
            "This is the most time-efficient route: {}",
            format_route(route, idx_to_id)
        );
    }
}

fn write_routes_csv(
    out_path: &str,
    routes: &[Route],
    idx_to_id: &[i64],
    include_unreachable: bool,
) -> Result<()> {
    let mut wtr =
        Writer::from_path(out_path).with_context(|| format!("creating CSV {}", out_path))?;
    wtr.write_record(["node_id", "cost_mins", "route"])?;
    let mut written = 0;
    for route in routes {
        if route.cost.is_unreachable() && !include_unreachable {
            continue;
        }
        wtr.write_record(&[
            idx_to_id[route.destination].to_string(),
            route.cost.to_string(),
            format_route(route, idx_to_id),
        ])?;
        written += 1;
    }
    wtr.flush()?;
    println!("Wrote routes for {} nodes to {}", written, out_path);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let graph = load_graph(&cli.csv, cli.directed)?;
    println!(
        "Graph: {} nodes, {} directed edges",
        graph.matrix.node_count(),
        graph.matrix.edge_count()
    );

    let &src_idx = graph
        .id_to_idx
        .get(&cli.source)
        .with_context(|| format!("source node {} not present in {}", cli.source, &cli.csv))?;

    let routes = shortest_paths(&graph.matrix, src_idx)?;

    if let Some(out_path) = cli.out {
        write_routes_csv(&out_path, &routes, &graph.idx_to_id, cli.include_unreachable)?;
    } else if let Some(dest) = cli.dest {
        let &dest_idx = graph
            .id_to_idx
            .get(&dest)
            .with_context(|| format!("destination node {} not present in {}", dest, &cli.csv))?;
        let route = routes
            .iter()
            .find(|r| r.destination == dest_idx)
            .with_context(|| format!("destination node {} is the source itself", dest))?;
        print_route(route, cli.source, &graph.idx_to_id);
        for (from, to) in route.segments() {
            println!(
                "  {} -> {} ({} mins)",
                graph.idx_to_id[from],
                graph.idx_to_id[to],
                graph.matrix.weight(from, to)
            );
        }
    } else {
        for route in &routes {
            print_route(route, cli.source, &graph.idx_to_id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drone_routes::Cost;
    use std::io::Write as _;

    fn write_temp_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "node_id,neighbor_node_id,weight").unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    #[test]
    fn loads_csv_edge_list_with_sparse_ids() {
        let file = write_temp_csv(&["100,200,4", "100,300,1", "300,200,2"]);
        let graph = load_graph(file.path().to_str().unwrap(), false).unwrap();
        assert_eq!(graph.matrix.node_count(), 3);

        // Undirected: the reverse direction is present too.
        let (u, v) = (graph.id_to_idx[&200], graph.id_to_idx[&100]);
        assert_eq!(graph.matrix.weight(u, v), 4.0);

        let routes = shortest_paths(&graph.matrix, graph.id_to_idx[&100]).unwrap();
        let to_200 = routes
            .iter()
            .find(|r| r.destination == graph.id_to_idx[&200])
            .unwrap();
        assert_eq!(to_200.cost, Cost::Finite(3.0));
        assert_eq!(format_route(to_200, &graph.idx_to_id), "100->300->200");
    }

    #[test]
    fn directed_load_keeps_edges_one_way() {
        let file = write_temp_csv(&["0,1,5"]);
        let graph = load_graph(file.path().to_str().unwrap(), true).unwrap();
        let (u, v) = (graph.id_to_idx[&0], graph.id_to_idx[&1]);
        assert_eq!(graph.matrix.weight(u, v), 5.0);
        assert_eq!(graph.matrix.weight(v, u), 0.0);
    }

    #[test]
    fn negative_weight_in_csv_is_rejected() {
        let file = write_temp_csv(&["0,1,-3"]);
        assert!(load_graph(file.path().to_str().unwrap(), false).is_err());
    }
}
