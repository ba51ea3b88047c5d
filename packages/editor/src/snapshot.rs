//! # Snapshots
//!
//! A [`Snapshot`] is a complete, point-in-time view of the document: the root
//! key, the node registry and the selection. The editor holds the *current*
//! snapshot behind an `Arc`; an edit session owns a *pending* one.
//!
//! Read-only traversal lives on the [`NodeLookup`] trait so the same code
//! works against either snapshot. Every traversal re-resolves keys, so callers
//! always see the latest version of a node in that snapshot.

use crate::{Node, NodeKey, NodeKind, NodeRegistry, Selection};

/// Tag of the block created as the document root
pub const ROOT_TAG: &str = "root";

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    root: NodeKey,
    pub(crate) nodes: NodeRegistry,
    pub(crate) selection: Option<Selection>,
}

impl Snapshot {
    /// Snapshot holding only an empty root block
    pub fn new() -> Self {
        let root = Node::block(ROOT_TAG);
        let key = root.key();
        let mut nodes = NodeRegistry::new();
        nodes.insert(root);
        Self {
            root: key,
            nodes,
            selection: None,
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Key-based read access to a snapshot
pub trait NodeLookup {
    fn root_key(&self) -> NodeKey;

    /// Resolve a key, `None` if unknown or removed
    fn node(&self, key: NodeKey) -> Option<&Node>;

    fn selection(&self) -> Option<&Selection>;

    /// Re-resolve a possibly stale node value by its key
    fn latest(&self, node: &Node) -> Option<&Node> {
        self.node(node.key())
    }

    fn parent(&self, key: NodeKey) -> Option<&Node> {
        self.node(key)?.parent().and_then(|parent| self.node(parent))
    }

    /// Children in document order, skipping keys that no longer resolve
    fn children(&self, key: NodeKey) -> Vec<&Node> {
        match self.node(key).and_then(Node::as_block) {
            Some(block) => block
                .children()
                .iter()
                .filter_map(|child| self.node(*child))
                .collect(),
            None => Vec::new(),
        }
    }

    fn first_child(&self, key: NodeKey) -> Option<&Node> {
        let block = self.node(key)?.as_block()?;
        block.children().iter().find_map(|child| self.node(*child))
    }

    fn last_child(&self, key: NodeKey) -> Option<&Node> {
        let block = self.node(key)?.as_block()?;
        block.children().iter().rev().find_map(|child| self.node(*child))
    }

    fn previous_sibling(&self, key: NodeKey) -> Option<&Node> {
        let siblings = self.parent(key)?.as_block()?.children();
        let index = siblings.iter().position(|sibling| *sibling == key)?;
        siblings[..index].iter().rev().find_map(|sibling| self.node(*sibling))
    }

    fn next_sibling(&self, key: NodeKey) -> Option<&Node> {
        let siblings = self.parent(key)?.as_block()?.children();
        let index = siblings.iter().position(|sibling| *sibling == key)?;
        siblings[index + 1..].iter().find_map(|sibling| self.node(*sibling))
    }

    /// True if `ancestor` is a strict ancestor of `key`
    fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = self.node(key).and_then(Node::parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.node(parent).and_then(Node::parent);
        }
        false
    }

    fn tag(&self, key: NodeKey) -> Option<&str> {
        self.node(key)?.as_block().map(|block| block.tag())
    }

    /// Text of a text node, or the concatenated text of a block's descendants
    fn text_content(&self, key: NodeKey) -> String {
        let mut out = String::new();
        if let Some(node) = self.node(key) {
            collect_text(self, node, &mut out);
        }
        out
    }

    /// Compact structural rendering, e.g. `root[p["ab", "cd"]]`
    fn dump(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.node(self.root_key()) {
            dump_node(self, root, &mut out);
        }
        out
    }
}

fn collect_text<L: NodeLookup + ?Sized>(lookup: &L, node: &Node, out: &mut String) {
    match node.kind() {
        NodeKind::Text(text) => out.push_str(text.text()),
        NodeKind::Block(_) => {
            for child in lookup.children(node.key()) {
                collect_text(lookup, child, out);
            }
        }
    }
}

fn dump_node<L: NodeLookup + ?Sized>(lookup: &L, node: &Node, out: &mut String) {
    match node.kind() {
        NodeKind::Text(text) => out.push_str(&format!("{:?}", text.text())),
        NodeKind::Block(block) => {
            out.push_str(block.tag());
            out.push('[');
            for (i, child) in lookup.children(node.key()).into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                dump_node(lookup, child, out);
            }
            out.push(']');
        }
    }
}

impl NodeLookup for Snapshot {
    fn root_key(&self) -> NodeKey {
        self.root
    }

    fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }
}
