use serde::{Deserialize, Serialize};

use crate::csr::CsrMatrix;
use crate::edge::{Edge, EdgeSet, IntEdge};
use crate::error::{GraphError, Result};
use crate::node::Node;
use crate::registry::IdentityRegistry;

/// How edge weights are folded into one score per node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum CostAggregate {
    Sum = 0,
    /// Sum divided by count; `0.0` for a node with no edges.
    Average = 1,
    Count = 2,
}

impl TryFrom<i32> for CostAggregate {
    type Error = GraphError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Sum),
            1 => Ok(Self::Average),
            2 => Ok(Self::Count),
            other => Err(GraphError::InvalidAggregationKind(other)),
        }
    }
}

/// Which edges count toward a node's aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateScope {
    /// Only edges leaving the node.
    Outgoing,
    /// Edges leaving and entering the node. A self-loop counts twice.
    #[default]
    Both,
}

impl AggregateScope {
    /// Map the legacy boolean flag, where `true` meant "include incoming
    /// edges as well" even though callers passed it as `directed`.
    pub fn from_include_incoming(include_incoming: bool) -> Self {
        if include_incoming {
            Self::Both
        } else {
            Self::Outgoing
        }
    }
}

/// Read side of a graph store.
///
/// Implementors provide the identity registry and, when it is current, the
/// compacted matrix. Everything else is built on those two. Reads that need
/// the matrix fail with [`GraphError::NotCompacted`] when it is stale.
pub trait GraphQuery {
    fn registry(&self) -> &IdentityRegistry;

    fn matrix(&self) -> Result<&CsrMatrix>;

    /// Number of ids ever assigned.
    fn node_count(&self) -> usize {
        self.registry().count()
    }

    fn node_by_id(&self, id: usize) -> Result<Node> {
        self.registry().node_at(id)
    }

    fn id_of(&self, node: &Node) -> Option<usize> {
        self.registry().lookup(node)
    }

    fn has_node(&self, node: &Node) -> bool {
        self.id_of(node).is_some()
    }

    /// All nodes in id order.
    fn nodes(&self) -> Vec<Node> {
        self.registry().nodes()
    }

    /// All positions in id order.
    fn positions(&self) -> Vec<[f32; 3]> {
        self.registry().positions()
    }

    /// Whether `parent → child` exists; with `include_reverse`, also
    /// `child → parent`. Scans the row(s) involved.
    fn has_edge(&self, parent: usize, child: usize, include_reverse: bool) -> Result<bool> {
        let matrix = self.matrix()?;
        Ok(matrix.contains(parent, child) || (include_reverse && matrix.contains(child, parent)))
    }

    /// [`has_edge`](Self::has_edge) by position. Unknown positions have no
    /// edges.
    fn has_edge_between(&self, parent: &Node, child: &Node, include_reverse: bool) -> Result<bool> {
        let matrix = self.matrix()?;
        match (self.id_of(parent), self.id_of(child)) {
            (Some(p), Some(c)) => {
                Ok(matrix.contains(p, c) || (include_reverse && matrix.contains(c, p)))
            }
            _ => Ok(false),
        }
    }

    /// Edges leaving `node`, children in id order.
    fn outgoing_edges(&self, node: &Node) -> Result<Vec<Edge>> {
        let matrix = self.matrix()?;
        let id = require_id(self.registry(), node)?;
        matrix
            .row_iter(id)
            .map(|(child, weight)| -> Result<Edge> {
                Ok(Edge {
                    child: self.node_by_id(child)?,
                    weight,
                })
            })
            .collect()
    }

    /// Edges leaving `node`, followed by edges entering it from every other
    /// node, each reported with the other endpoint as `child`.
    ///
    /// Finding incoming edges walks the whole matrix: O(total edges).
    fn adjacent_edges(&self, node: &Node) -> Result<Vec<Edge>> {
        let mut edges = self.outgoing_edges(node)?;
        let matrix = self.matrix()?;
        let id = require_id(self.registry(), node)?;

        for (parent, child, weight) in matrix.entries() {
            if child == id && parent != id {
                edges.push(Edge {
                    child: self.node_by_id(parent)?,
                    weight,
                });
            }
        }
        Ok(edges)
    }

    /// One [`EdgeSet`] per row in id order, childless rows included.
    fn all_edges(&self) -> Result<Vec<EdgeSet>> {
        let matrix = self.matrix()?;
        Ok((0..matrix.rows())
            .map(|parent| EdgeSet {
                parent,
                children: matrix
                    .row_iter(parent)
                    .map(|(child, weight)| IntEdge { child, weight })
                    .collect(),
            })
            .collect())
    }

    /// One score per node id.
    fn aggregate(&self, mode: CostAggregate, scope: AggregateScope) -> Result<Vec<f32>> {
        let matrix = self.matrix()?;
        let n = self.node_count();
        let mut sums = vec![0.0f32; n];
        let mut counts = vec![0u32; n];

        for (parent, child, weight) in matrix.entries() {
            sums[parent] += weight;
            counts[parent] += 1;
            if scope == AggregateScope::Both {
                sums[child] += weight;
                counts[child] += 1;
            }
        }

        Ok(match mode {
            CostAggregate::Sum => sums,
            CostAggregate::Count => counts.into_iter().map(|c| c as f32).collect(),
            CostAggregate::Average => sums
                .into_iter()
                .zip(counts)
                .map(|(sum, count)| if count == 0 { 0.0 } else { sum / count as f32 })
                .collect(),
        })
    }
}

fn require_id(registry: &IdentityRegistry, node: &Node) -> Result<usize> {
    registry.lookup(node).ok_or(GraphError::UnknownPosition {
        x: node.x,
        y: node.y,
        z: node.z,
    })
}
