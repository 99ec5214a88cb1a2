use serde::{Deserialize, Serialize};

use crate::node::Node;

/// An edge seen from its parent: the node it reaches and what it costs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub child: Node,
    pub weight: f32,
}

/// An edge seen from its parent, by id.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntEdge {
    pub child: usize,
    pub weight: f32,
}

/// Every edge leaving one parent, children in ascending id order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSet {
    pub parent: usize,
    pub children: Vec<IntEdge>,
}

impl EdgeSet {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A staged edit awaiting compaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triplet {
    pub parent: usize,
    pub child: usize,
    pub weight: f32,
}
