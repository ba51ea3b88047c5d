//! Dirty tracking for incremental reconciliation.
//!
//! `nodes` holds keys whose own rendering changed. `subtrees` holds every
//! ancestor of those keys, so a reconciler can skip any subtree whose root is
//! in neither set. Both sets only grow while edits run; commit forgets the
//! keys of nodes that never got attached.

use crate::NodeKey;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtySet {
    nodes: HashSet<NodeKey>,
    subtrees: HashSet<NodeKey>,
}

impl DirtySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was not already dirty
    pub(crate) fn mark_node(&mut self, key: NodeKey) -> bool {
        self.nodes.insert(key)
    }

    pub(crate) fn mark_subtree(&mut self, key: NodeKey) -> bool {
        self.subtrees.insert(key)
    }

    /// Drop a key that will not reach the committed snapshot
    pub(crate) fn forget(&mut self, key: NodeKey) {
        self.nodes.remove(&key);
        self.subtrees.remove(&key);
    }

    /// Key is dirty itself or roots a dirty subtree
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains(&key) || self.subtrees.contains(&key)
    }

    pub fn is_dirty_node(&self, key: NodeKey) -> bool {
        self.nodes.contains(&key)
    }

    pub fn is_dirty_subtree(&self, key: NodeKey) -> bool {
        self.subtrees.contains(&key)
    }

    pub fn nodes(&self) -> &HashSet<NodeKey> {
        &self.nodes
    }

    pub fn subtrees(&self) -> &HashSet<NodeKey> {
        &self.subtrees
    }

    /// Every key in either set, sorted and deduplicated
    pub fn all_keys(&self) -> Vec<NodeKey> {
        let mut keys: Vec<NodeKey> = self.nodes.union(&self.subtrees).copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.subtrees.is_empty()
    }
}
