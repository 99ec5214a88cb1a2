use std::collections::HashMap;

use crate::constants::MAX_NODE_ID;
use crate::error::{GraphError, Result};
use crate::node::{Node, PositionKey};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Slot {
    Placed(Node),
    /// Referenced by bare id before any geometry was supplied.
    Placeholder,
}

/// Arena of nodes indexed by id, plus a position index kept in lock-step.
///
/// Ids are dense: every id below `count()` has a slot. Ids are handed out
/// in increasing order and never reused until `clear`.
#[derive(Clone, Debug)]
pub struct IdentityRegistry {
    slots: Vec<Slot>,
    index: HashMap<PositionKey, usize>,
    precision: f32,
}

impl IdentityRegistry {
    pub fn new(precision: f32) -> Self {
        Self::with_capacity(precision, 0)
    }

    pub fn with_capacity(precision: f32, capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            precision,
        }
    }

    /// Id of the node at this position, assigning the next id on a miss.
    pub fn resolve_or_create(&mut self, node: Node) -> usize {
        let key = PositionKey::new(&node, self.precision);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.slots.len();
        self.slots.push(Slot::Placed(node));
        self.index.insert(key, id);
        id
    }

    /// Make sure `id` has a slot, padding the arena with placeholders.
    ///
    /// Fails with [`GraphError::IdOutOfRange`] past [`MAX_NODE_ID`], leaving
    /// the arena untouched.
    pub fn resolve_or_create_id(&mut self, id: usize) -> Result<usize> {
        check_id(id)?;
        if id >= self.slots.len() {
            let created = id + 1 - self.slots.len();
            tracing::warn!(
                "fabricating {created} placeholder node(s) at the origin up to id {id}"
            );
            self.slots.resize(id + 1, Slot::Placeholder);
        }
        Ok(id)
    }

    pub fn lookup(&self, node: &Node) -> Option<usize> {
        self.index
            .get(&PositionKey::new(node, self.precision))
            .copied()
    }

    /// The node stored under `id`. Placeholders read as a default node.
    pub fn node_at(&self, id: usize) -> Result<Node> {
        match self.slots.get(id) {
            Some(Slot::Placed(node)) => Ok(*node),
            Some(Slot::Placeholder) => Ok(Node::default()),
            None => Err(GraphError::UnknownNode { id }),
        }
    }

    pub fn contains_id(&self, id: usize) -> bool {
        id < self.slots.len()
    }

    pub fn is_placeholder(&self, id: usize) -> bool {
        matches!(self.slots.get(id), Some(Slot::Placeholder))
    }

    /// Give a placeholder slot its real position.
    pub fn place(&mut self, id: usize, node: Node) -> Result<()> {
        match self.slots.get(id) {
            None => return Err(GraphError::UnknownNode { id }),
            Some(Slot::Placed(_)) => return Err(GraphError::PositionTaken { id }),
            Some(Slot::Placeholder) => {}
        }
        let key = PositionKey::new(&node, self.precision);
        if let Some(&owner) = self.index.get(&key) {
            return Err(GraphError::PositionTaken { id: owner });
        }
        self.slots[id] = Slot::Placed(node);
        self.index.insert(key, id);
        Ok(())
    }

    /// Number of ids ever assigned, placeholders included.
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Placed(node) => *node,
                Slot::Placeholder => Node::default(),
            })
            .collect()
    }

    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.nodes().iter().map(Node::position).collect()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }
}

/// Reject raw ids the CSR export cannot index.
pub(crate) fn check_id(id: usize) -> Result<()> {
    if id > MAX_NODE_ID {
        return Err(GraphError::IdOutOfRange {
            id,
            max: MAX_NODE_ID,
        });
    }
    Ok(())
}
