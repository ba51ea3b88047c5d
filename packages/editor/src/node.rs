//! # Nodes
//!
//! A node is a key, a parent back-reference, a flag set and a variant
//! payload. Variants form a closed set; code that needs variant-specific
//! behaviour matches on [`NodeKind`] or asks [`Node::node_type`].
//!
//! Nodes never own each other. A block lists its children by key and a child
//! points at its parent by key; both are resolved through a
//! [`NodeRegistry`](crate::NodeRegistry).

use crate::NodeKey;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Boolean traits of a node. Text normalization compares the whole set
    /// bit-for-bit, so format flags split runs as well.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Content owned by something else; never merged
        const IMMUTABLE       = 1 << 0;
        /// Atomic run (hashtag, mention), never merged with neighbours
        const SEGMENTED       = 1 << 1;
        const DIRECTION_KNOWN = 1 << 2;
        const BOLD            = 1 << 3;
        const ITALIC          = 1 << 4;
        const UNDERLINE       = 1 << 5;
        const STRIKETHROUGH   = 1 << 6;
        const CODE            = 1 << 7;
        const LINK            = 1 << 8;
        const HASHTAG         = 1 << 9;
    }
}

/// Variant tag, used for downcasting and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Block,
    Text,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Block => f.write_str("block"),
            NodeType::Text => f.write_str("text"),
        }
    }
}

/// Variant payload
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum NodeKind {
    Block(BlockNode),
    Text(TextNode),
}

/// Element with ordered children (document order)
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    pub(crate) tag: String,
    pub(crate) children: Vec<NodeKey>,
}

impl BlockNode {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Child keys, which may include keys that no longer resolve
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

/// Run of text sharing one set of flags
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub(crate) text: String,
}

impl TextNode {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars, the unit of selection offsets
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A node in a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    key: NodeKey,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) flags: NodeFlags,
    pub(crate) kind: NodeKind,
}

impl Node {
    /// Create a detached block with a fresh key
    pub(crate) fn block(tag: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Block(BlockNode {
            tag: tag.into(),
            children: Vec::new(),
        }))
    }

    /// Create a detached text node with a fresh key
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text(TextNode { text: text.into() }))
    }

    fn with_kind(kind: NodeKind) -> Self {
        Self {
            key: NodeKey::next(),
            parent: None,
            flags: NodeFlags::empty(),
            kind,
        }
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Block(_) => NodeType::Block,
            NodeKind::Text(_) => NodeType::Text,
        }
    }

    pub fn as_block(&self) -> Option<&BlockNode> {
        match &self.kind {
            NodeKind::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub(crate) fn as_block_mut(&mut self) -> Option<&mut BlockNode> {
        match &mut self.kind {
            NodeKind::Block(block) => Some(block),
            _ => None,
        }
    }

    pub(crate) fn as_text_mut(&mut self) -> Option<&mut TextNode> {
        match &mut self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_block(&self) -> bool {
        self.node_type() == NodeType::Block
    }

    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    pub fn is_immutable(&self) -> bool {
        self.flags.contains(NodeFlags::IMMUTABLE)
    }

    pub fn is_segmented(&self) -> bool {
        self.flags.contains(NodeFlags::SEGMENTED)
    }

    /// Text node with no content
    pub fn is_empty_text(&self) -> bool {
        self.as_text().is_some_and(|text| text.text.is_empty())
    }

    /// Whether normalization may merge this node with equal-flagged neighbours
    pub fn is_mergeable_text(&self) -> bool {
        self.is_text() && !self.is_immutable() && !self.is_segmented()
    }

    /// Builder-style flag setter for freshly created nodes
    pub(crate) fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }
}
