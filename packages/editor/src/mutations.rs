//! # Mutations
//!
//! Intent-level edits the input/command layer can hand to a session as data.
//! Each variant maps onto one [`EditSession`] operation; applying a mutation
//! is exactly equivalent to calling that operation.
//!
//! Creating nodes is not a mutation: creation returns a fresh key the caller
//! needs, so it stays on the session (`create_block`, `create_text`).

use crate::{EditSession, NodeFlags, NodeKey, NodeType};
use thiserror::Error;

/// Semantic edit on existing nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Move `child` to the end of `parent`
    Append { parent: NodeKey, child: NodeKey },

    /// Remove a node and its descendants
    Remove { key: NodeKey },

    /// Replace the text of a text node
    SetText { key: NodeKey, text: String },

    /// Delete and insert chars inside a text node
    SpliceText {
        key: NodeKey,
        offset: usize,
        delete_count: usize,
        text: String,
    },

    /// Turn flags on or off
    SetFlags {
        key: NodeKey,
        flags: NodeFlags,
        enabled: bool,
    },

    /// Select a range inside one text node
    Select {
        key: NodeKey,
        anchor_offset: usize,
        focus_offset: usize,
    },

    /// Merge adjacent compatible text children of a block
    NormalizeTextNodes {
        block: NodeKey,
        restore_selection: bool,
    },
}

/// Invariant violations raised by tree operations.
///
/// These signal a caller contract breach, not a condition to retry. The
/// operation that raised one is aborted; dropping the session discards any
/// partial work.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeKey),

    #[error("Node {key} is not a block (found {found})")]
    NotABlock { key: NodeKey, found: NodeType },

    #[error("Node {key} is not text (found {found})")]
    NotText { key: NodeKey, found: NodeType },

    #[error("Appending {child} to {parent} would create a cycle")]
    CycleDetected { parent: NodeKey, child: NodeKey },

    #[error("Cannot remove root node {0}")]
    CannotRemoveRoot(NodeKey),

    #[error("Offset {offset} out of bounds for {key} (length {len})")]
    OffsetOutOfBounds {
        key: NodeKey,
        offset: usize,
        len: usize,
    },
}

impl Mutation {
    /// Apply to a session
    pub fn apply(&self, session: &mut EditSession<'_>) -> Result<(), MutationError> {
        match self {
            Mutation::Append { parent, child } => session.append(*parent, *child),

            Mutation::Remove { key } => session.remove(*key),

            Mutation::SetText { key, text } => session.set_text(*key, text.as_str()),

            Mutation::SpliceText {
                key,
                offset,
                delete_count,
                text,
            } => session.splice_text(*key, *offset, *delete_count, text),

            Mutation::SetFlags {
                key,
                flags,
                enabled,
            } => session.set_flags(*key, *flags, *enabled),

            Mutation::Select {
                key,
                anchor_offset,
                focus_offset,
            } => session.select(*key, *anchor_offset, *focus_offset),

            Mutation::NormalizeTextNodes {
                block,
                restore_selection,
            } => session
                .normalize_text_nodes(*block, *restore_selection)
                .map(|_| ()),
        }
    }

    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Append { .. } => "append",
            Mutation::Remove { .. } => "remove",
            Mutation::SetText { .. } => "set_text",
            Mutation::SpliceText { .. } => "splice_text",
            Mutation::SetFlags { .. } => "set_flags",
            Mutation::Select { .. } => "select",
            Mutation::NormalizeTextNodes { .. } => "normalize_text_nodes",
        }
    }
}
