//! Read-only graphs built in one shot from complete adjacency lists.

use crate::config::GraphConfig;
use crate::csr::CsrMatrix;
use crate::error::{GraphError, Result};
use crate::export::CsrView;
use crate::node::Node;
use crate::query::GraphQuery;
use crate::registry::IdentityRegistry;

/// A compacted graph with no edit log.
///
/// There is no way to stage edges on a `StaticGraph`; build a
/// [`Graph`](crate::Graph) instead when the graph has to change after
/// construction.
#[derive(Clone, Debug)]
pub struct StaticGraph {
    registry: IdentityRegistry,
    matrix: CsrMatrix,
}

impl StaticGraph {
    /// Build from parallel arrays: `nodes[i]` is the parent of every child
    /// index in `children[i]`, at the matching cost in `weights[i]`. Child
    /// values index into `nodes`.
    ///
    /// Repeated `(parent, child)` pairs are summed, as they would be by
    /// compacting the same edits.
    pub fn from_adjacency(
        children: &[Vec<usize>],
        weights: &[Vec<f32>],
        nodes: &[Node],
    ) -> Result<Self> {
        Self::from_adjacency_with_config(children, weights, nodes, &GraphConfig::default())
    }

    pub fn from_adjacency_with_config(
        children: &[Vec<usize>],
        weights: &[Vec<f32>],
        nodes: &[Node],
        config: &GraphConfig,
    ) -> Result<Self> {
        config.validate()?;
        check_len("children", nodes.len(), children.len())?;
        check_len("weights", nodes.len(), weights.len())?;
        for (i, (c, w)) in children.iter().zip(weights).enumerate() {
            check_len(&format!("weights of node {i}"), c.len(), w.len())?;
        }

        let mut registry = IdentityRegistry::with_capacity(config.position_precision, nodes.len());
        let ids: Vec<usize> = nodes
            .iter()
            .map(|node| registry.resolve_or_create(*node))
            .collect();

        let dim = registry.count();
        let mut rows: Vec<Vec<(usize, f32)>> = vec![Vec::new(); dim];
        for (i, (c, w)) in children.iter().zip(weights).enumerate() {
            let row = &mut rows[ids[i]];
            for (&child, &weight) in c.iter().zip(w) {
                let child = *ids.get(child).ok_or(GraphError::UnknownNode { id: child })?;
                row.push((child, weight));
            }
        }

        let matrix = CsrMatrix::from_rows(dim, rows);
        tracing::debug!(
            "bulk loaded {dim} nodes with {} edges",
            matrix.nnz()
        );
        Ok(Self { registry, matrix })
    }

    pub(crate) fn from_parts(registry: IdentityRegistry, matrix: CsrMatrix) -> Self {
        Self { registry, matrix }
    }

    pub fn csr_view(&self) -> CsrView<'_> {
        CsrView::new(&self.matrix)
    }
}

impl GraphQuery for StaticGraph {
    fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    fn matrix(&self) -> Result<&CsrMatrix> {
        Ok(&self.matrix)
    }
}

fn check_len(what: &str, expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(GraphError::ShapeMismatch {
            what: what.to_string(),
            expected,
            got,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::new(1.0, 1.0, 2.0),
            Node::new(2.0, 3.0, 4.0),
            Node::new(11.0, 22.0, 140.0),
        ]
    }

    #[test]
    fn test_builds_compacted_matrix() {
        let g = StaticGraph::from_adjacency(
            &[vec![1, 2], vec![2], vec![1]],
            &[vec![1.0, 2.5], vec![54.0], vec![39.0]],
            &sample_nodes(),
        )
        .unwrap();

        let view = g.csr_view();
        assert_eq!(view.outer, &[0, 2, 3, 4]);
        assert_eq!(view.inner, &[1, 2, 2, 1]);
        assert_eq!(view.data, &[1.0, 2.5, 54.0, 39.0]);
        assert!(g.has_edge(2, 1, false).unwrap());
    }

    #[test]
    fn test_outer_length_mismatch() {
        let err = StaticGraph::from_adjacency(&[vec![1]], &[vec![1.0]], &sample_nodes())
            .unwrap_err();
        assert!(
            matches!(err, GraphError::ShapeMismatch { expected: 3, got: 1, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_inner_length_mismatch() {
        let err = StaticGraph::from_adjacency(
            &[vec![1, 2], vec![], vec![]],
            &[vec![1.0], vec![], vec![]],
            &sample_nodes(),
        )
        .unwrap_err();
        match err {
            GraphError::ShapeMismatch { what, .. } => assert_eq!(what, "weights of node 0"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_child_out_of_range() {
        let err = StaticGraph::from_adjacency(
            &[vec![7], vec![], vec![]],
            &[vec![1.0], vec![], vec![]],
            &sample_nodes(),
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode { id: 7 }));
    }

    #[test]
    fn test_duplicate_nodes_merge_rows() {
        let nodes = vec![
            Node::new(0.0, 0.0, 0.0),
            Node::new(1.0, 0.0, 0.0),
            Node::new(0.0, 0.0, 0.0),
        ];
        let g = StaticGraph::from_adjacency(
            &[vec![1], vec![], vec![1]],
            &[vec![2.0], vec![], vec![3.0]],
            &nodes,
        )
        .unwrap();

        assert_eq!(g.node_count(), 2);
        let view = g.csr_view();
        assert_eq!(view.nnz, 1);
        assert_eq!(view.data, &[5.0]);
    }

    #[test]
    fn test_empty_input() {
        let g = StaticGraph::from_adjacency(&[], &[], &[]).unwrap();
        assert_eq!(g.node_count(), 0);
        assert!(g.all_edges().unwrap().is_empty());
        assert!(g.csr_view().is_valid());
    }
}
