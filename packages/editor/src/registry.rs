//! Key-addressed node storage, one per snapshot.
//!
//! Nodes are stored behind `Arc` so cloning a registry for a new session is a
//! shallow copy. A node is deep-copied only when a session first asks to
//! write it (see [`NodeRegistry::make_mut`]).

use crate::{Node, NodeKey};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeRegistry {
    nodes: HashMap<NodeKey, Arc<Node>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(&key).map(Arc::as_ref)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().map(Arc::as_ref)
    }

    /// True when both registries hold the same allocation for `key`, i.e. the
    /// node has not been written since the registries diverged.
    pub fn shares(&self, other: &NodeRegistry, key: NodeKey) -> bool {
        match (self.nodes.get(&key), other.nodes.get(&key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn insert(&mut self, node: Node) {
        self.nodes.insert(node.key(), Arc::new(node));
    }

    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<Arc<Node>> {
        self.nodes.remove(&key)
    }

    /// Exclusive access to a node, cloning it first if another registry still
    /// shares it. Once cloned, later calls return the same copy.
    pub(crate) fn make_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        let node = self.nodes.get_mut(&key)?;
        if Arc::strong_count(node) > 1 {
            trace!(%key, "copy-on-write clone");
        }
        Some(Arc::make_mut(node))
    }
}
