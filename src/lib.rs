//! Shortest routes from a meeting-point node over an adjacency-matrix graph.
//!
//! The engine is a pure function: give it an [`AdjacencyMatrix`] and a source
//! node, get back one [`Route`] per other node. Graph loading and printing
//! live in the `routes` binary.

pub mod dijkstra;
pub mod matrix;

pub use dijkstra::{shortest_paths, Cost, Route};
pub use matrix::AdjacencyMatrix;

/// Rejected inputs. Unreachable destinations are not errors; they come back
/// as normal results with [`Cost::Unreachable`].
// Display/Error are implemented by hand: thiserror's derive treats any field
// named `source` as the error's source(), but `SourceOutOfRange::source` is a
// node index, not a nested error.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    NegativeWeight { from: usize, to: usize, weight: f64 },
    EndpointOutOfRange { node: usize, nodes: usize },
    SourceOutOfRange { source: usize, nodes: usize },
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::RaggedRow { row, len, expected } => write!(
                f,
                "row {row} has {len} entries, expected {expected} (matrix must be square)"
            ),
            InvalidInput::NegativeWeight { from, to, weight } => {
                write!(f, "negative weight {weight} on edge ({from}, {to})")
            }
            InvalidInput::EndpointOutOfRange { node, nodes } => write!(
                f,
                "edge endpoint {node} out of range for a graph of {nodes} nodes"
            ),
            InvalidInput::SourceOutOfRange { source, nodes } => write!(
                f,
                "source node {source} out of range for a graph of {nodes} nodes"
            ),
        }
    }
}

impl std::error::Error for InvalidInput {}
