//! Spatial graph store.
//!
//! Nodes are points in 3-D space, deduplicated by position into dense
//! integer ids. Edges carry scalar costs. Edits are staged into a log and
//! compacted into a compressed sparse-row matrix, which backs every query
//! and can be lent out to foreign consumers without copying.
//!
//! Two ways in:
//! - [`Graph`]: stage edges, [`compact`](Graph::compact), query, repeat.
//! - [`StaticGraph`]: build once from complete adjacency lists; read-only.
//!
//! Both answer queries through [`GraphQuery`].
//!
//! Pure in-memory computation: no I/O beyond optional config loading, no
//! internal locking.

pub mod buffer;
pub mod bulk;
pub mod config;
pub mod constants;
pub mod csr;
pub mod edge;
pub mod error;
pub mod export;
pub mod graph;
pub mod node;
pub mod query;
pub mod registry;

pub use buffer::WriteBuffer;
pub use bulk::StaticGraph;
pub use config::GraphConfig;
pub use constants::{DEFAULT_EDGE_WEIGHT, DEFAULT_POSITION_PRECISION, MAX_NODE_ID};
pub use csr::CsrMatrix;
pub use edge::{Edge, EdgeSet, IntEdge, Triplet};
pub use error::{GraphError, Result};
pub use export::CsrView;
pub use graph::{Graph, GraphState};
pub use node::{Node, NodeType, PositionKey};
pub use query::{AggregateScope, CostAggregate, GraphQuery};
pub use registry::IdentityRegistry;
