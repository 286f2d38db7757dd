use std::fmt;

use crate::matrix::AdjacencyMatrix;
use crate::InvalidInput;

/// Cost of reaching a destination. Unreachable is its own state rather than a
/// sentinel distance, so it can never be mistaken for a large finite cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cost {
    Finite(f64),
    Unreachable,
}

impl Cost {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Cost::Unreachable)
    }

    pub fn value(&self) -> Option<f64> {
        match *self {
            Cost::Finite(cost) => Some(cost),
            Cost::Unreachable => None,
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Cost::Finite(cost) => write!(f, "{}", cost),
            Cost::Unreachable => write!(f, "inf"),
        }
    }
}

/// One shortest route out of the source node.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub destination: usize,
    pub cost: Cost,
    /// Node indices from the source to the destination inclusive. A route to
    /// an unreachable destination holds only the destination itself.
    pub path: Vec<usize>,
}

impl Route {
    /// Consecutive (from, to) pairs, for callers that walk the route edge by
    /// edge (e.g. to highlight it in a rendering).
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.path.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl fmt::Display for Route {
    /// Renders as "0->2->1".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, "->")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

/// Index of the unvisited node with the smallest finite distance, or None
/// when every remaining node is at infinity. The strict `<` keeps the first
/// hit among equals, so the lowest index wins ties; that tie-break decides
/// which of several equal-cost routes gets reported and must not change.
fn min_distance_index(distances: &[f64], visited: &[bool]) -> Option<usize> {
    let mut minimum = f64::INFINITY;
    let mut min_index = None;
    for node in 0..distances.len() {
        if !visited[node] && distances[node] < minimum {
            minimum = distances[node];
            min_index = Some(node);
        }
    }
    min_index
}

/// Walk the parent links back from `node` and reverse, giving the path
/// source..=node. A node that was never reached has no parent and yields
/// just itself.
fn build_path(parents: &[Option<usize>], node: usize) -> Vec<usize> {
    let mut path = vec![node];
    let mut current = node;
    while let Some(parent) = parents[current] {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Dijkstra from `source` to every other node, with a linear minimum scan
/// (no heap; the target graphs are small). Returns one `Route` per node
/// other than the source, in ascending destination order. All working state
/// is scoped to the call, so repeated calls see none of each other's results.
pub fn shortest_paths(
    matrix: &AdjacencyMatrix,
    source: usize,
) -> Result<Vec<Route>, InvalidInput> {
    let n = matrix.node_count();
    if source >= n {
        return Err(InvalidInput::SourceOutOfRange { source, nodes: n });
    }

    let mut distances = vec![f64::INFINITY; n];
    let mut visited = vec![false; n];
    let mut parents: Vec<Option<usize>> = vec![None; n];
    distances[source] = 0.0;

    // n - 1 rounds: finalize the closest unvisited node, then relax its
    // unvisited neighbors through it.
    for _ in 1..n {
        let closest = match min_distance_index(&distances, &visited) {
            Some(index) => index,
            // Everything still unvisited is cut off from the source.
            None => break,
        };
        visited[closest] = true;

        for neighbor in 0..n {
            let weight = matrix.weight(closest, neighbor);
            if visited[neighbor] || weight == 0.0 {
                continue;
            }
            let candidate = distances[closest] + weight;
            if candidate < distances[neighbor] {
                distances[neighbor] = candidate;
                parents[neighbor] = Some(closest);
            }
        }
    }

    let mut routes = Vec::with_capacity(n.saturating_sub(1));
    for node in 0..n {
        if node == source {
            continue;
        }
        let cost = if distances[node].is_finite() {
            Cost::Finite(distances[node])
        } else {
            Cost::Unreachable
        };
        routes.push(Route {
            destination: node,
            cost,
            path: build_path(&parents, node),
        });
    }
    Ok(routes)
}
