use crate::InvalidInput;

/// n×n table of edge weights, row-major. A weight of 0.0 means "no edge".
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    weights: Vec<Vec<f64>>,
}

impl AdjacencyMatrix {
    /// Wrap raw rows, rejecting ragged rows and negative weights.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, InvalidInput> {
        let n = rows.len();
        for (u, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(InvalidInput::RaggedRow {
                    row: u,
                    len: row.len(),
                    expected: n,
                });
            }
            for (v, &weight) in row.iter().enumerate() {
                if weight < 0.0 {
                    return Err(InvalidInput::NegativeWeight {
                        from: u,
                        to: v,
                        weight,
                    });
                }
            }
        }
        Ok(Self { weights: rows })
    }

    /// Build an n-node matrix from (u, v, weight) triples. Unless `directed`,
    /// each edge is written in both directions.
    pub fn from_edges(
        edges: &[(usize, usize, f64)],
        n: usize,
        directed: bool,
    ) -> Result<Self, InvalidInput> {
        let mut rows = vec![vec![0.0; n]; n];
        for &(u, v, weight) in edges {
            for node in [u, v] {
                if node >= n {
                    return Err(InvalidInput::EndpointOutOfRange { node, nodes: n });
                }
            }
            if weight < 0.0 {
                return Err(InvalidInput::NegativeWeight {
                    from: u,
                    to: v,
                    weight,
                });
            }
            rows[u][v] = weight;
            if !directed {
                rows[v][u] = weight;
            }
        }
        Ok(Self { weights: rows })
    }

    pub fn node_count(&self) -> usize {
        self.weights.len()
    }

    pub fn weight(&self, u: usize, v: usize) -> f64 {
        self.weights[u][v]
    }

    /// Number of nonzero directed entries.
    pub fn edge_count(&self) -> usize {
        self.weights
            .iter()
            .flatten()
            .filter(|&&weight| weight > 0.0)
            .count()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.weights
    }
}
