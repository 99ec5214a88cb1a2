use crate::buffer::WriteBuffer;
use crate::bulk::StaticGraph;
use crate::config::GraphConfig;
use crate::constants::DEFAULT_EDGE_WEIGHT;
use crate::csr::CsrMatrix;
use crate::error::{GraphError, Result};
use crate::export::CsrView;
use crate::node::Node;
use crate::query::GraphQuery;
use crate::registry::{IdentityRegistry, check_id};

/// Where a [`Graph`] is in its edit/compact cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphState {
    /// No nodes, no edits.
    Empty,
    /// Edits recorded since the last compaction.
    Staged,
    /// The matrix reflects every recorded edit.
    Compacted,
}

/// Incrementally built spatial graph.
///
/// Edges are staged into an append-only log and only become visible to
/// queries after [`compact`](Self::compact), which rebuilds the CSR matrix
/// from the whole log. Queries go through [`GraphQuery`] and take `&self`,
/// so a compacted graph can be shared across reader threads; every mutation
/// takes `&mut self`.
#[derive(Clone, Debug)]
pub struct Graph {
    config: GraphConfig,
    registry: IdentityRegistry,
    buffer: WriteBuffer,
    matrix: CsrMatrix,
    fresh: bool,
}

impl Default for Graph {
    fn default() -> Self {
        Self::build(GraphConfig::default())
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GraphConfig) -> Self {
        Self {
            registry: IdentityRegistry::with_capacity(
                config.position_precision,
                config.expected_nodes,
            ),
            buffer: WriteBuffer::with_capacity(config.expected_edges),
            matrix: CsrMatrix::default(),
            fresh: true,
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn state(&self) -> GraphState {
        if self.registry.is_empty() && self.buffer.is_empty() {
            GraphState::Empty
        } else if self.fresh {
            GraphState::Compacted
        } else {
            GraphState::Staged
        }
    }

    pub fn is_compacted(&self) -> bool {
        self.fresh
    }

    /// Number of edits in the log, duplicates included.
    pub fn staged_edits(&self) -> usize {
        self.buffer.len()
    }

    /// Register a node without connecting it. Returns its id.
    pub fn register_node(&mut self, node: Node) -> usize {
        let before = self.registry.count();
        let id = self.registry.resolve_or_create(node);
        if self.registry.count() != before {
            self.fresh = false;
        }
        id
    }

    /// Stage `parent → child`, registering either endpoint if new.
    pub fn stage_edge(&mut self, parent: Node, child: Node, weight: f32) {
        let parent = self.registry.resolve_or_create(parent);
        let child = self.registry.resolve_or_create(child);
        self.buffer.push(parent, child, weight);
        self.fresh = false;
    }

    /// [`stage_edge`](Self::stage_edge) with the default weight of `1.0`.
    pub fn stage_unit_edge(&mut self, parent: Node, child: Node) {
        self.stage_edge(parent, child, DEFAULT_EDGE_WEIGHT);
    }

    /// Stage `parent → child` by id.
    ///
    /// Ids past the end of the registry become placeholder nodes at the
    /// origin (see [`place_node`](Self::place_node)), unless the config
    /// disables placeholders, in which case nothing is staged. Ids above
    /// [`MAX_NODE_ID`](crate::MAX_NODE_ID) are rejected with [`GraphError::IdOutOfRange`].
    pub fn stage_edge_ids(&mut self, parent: usize, child: usize, weight: f32) -> Result<()> {
        for id in [parent, child] {
            check_id(id)?;
            if !self.config.allow_placeholders && !self.registry.contains_id(id) {
                return Err(GraphError::PlaceholderRejected { id });
            }
        }
        let parent = self.registry.resolve_or_create_id(parent)?;
        let child = self.registry.resolve_or_create_id(child)?;
        self.buffer.push(parent, child, weight);
        self.fresh = false;
        Ok(())
    }

    /// Supply the position of a placeholder created by
    /// [`stage_edge_ids`](Self::stage_edge_ids).
    pub fn place_node(&mut self, id: usize, node: Node) -> Result<()> {
        self.registry.place(id, node)
    }

    pub fn is_placeholder(&self, id: usize) -> bool {
        self.registry.is_placeholder(id)
    }

    /// Rebuild the matrix from the full edit log. No-op when already fresh.
    pub fn compact(&mut self) {
        if self.fresh {
            tracing::trace!("compact skipped: graph already fresh");
            return;
        }
        let dim = self.registry.count();
        self.matrix = CsrMatrix::from_triplets(dim, self.buffer.triplets());
        self.fresh = true;
        tracing::debug!(
            "compacted {} staged edits into {dim}x{dim} matrix with {} entries",
            self.buffer.len(),
            self.matrix.nnz()
        );
    }

    /// Compact if needed and borrow the CSR arrays.
    pub fn csr_view(&mut self) -> CsrView<'_> {
        self.compact();
        CsrView::new(&self.matrix)
    }

    /// Drop every node and edit. Configuration is kept.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.buffer.clear();
        self.matrix = CsrMatrix::default();
        self.fresh = true;
    }

    /// Compact and give up the edit log, leaving a read-only graph.
    pub fn freeze(mut self) -> StaticGraph {
        self.compact();
        StaticGraph::from_parts(self.registry, self.matrix)
    }
}

impl GraphQuery for Graph {
    fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    fn matrix(&self) -> Result<&CsrMatrix> {
        if self.fresh {
            Ok(&self.matrix)
        } else {
            Err(GraphError::NotCompacted)
        }
    }
}
