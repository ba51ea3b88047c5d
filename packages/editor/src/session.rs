//! # Edit Session Management
//!
//! An [`EditSession`] is the scoped unit of work that mutates the document.
//! It owns a *pending* snapshot cloned (shallowly) from the editor's current
//! one and holds the editor mutably, so only one session can be open at a
//! time.
//!
//! ## Copy-on-write
//!
//! Nodes in the pending registry start out shared with the current snapshot.
//! [`EditSession::get_writable`] clones a node the first time it is written
//! and hands back the same clone afterwards. The current snapshot is never
//! touched, which is what makes discarding a session free:
//!
//! ```text
//! begin ──► pending = current (shared nodes)
//!   │
//!   ├── get_writable(k) ──► clone k once, mark k dirty
//!   │
//!   ├── commit ──► post effects ──► pending becomes current
//!   └── drop   ──► pending is thrown away, current unchanged
//! ```

use crate::{
    BlockNode, DirtySet, Editor, EditorConfig, Mutation, MutationError, Node, NodeFlags, NodeKey,
    NodeLookup, NodeType, Point, Selection, Snapshot, TextNode,
};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Single in-progress edit against an [`Editor`]
pub struct EditSession<'e> {
    editor: &'e mut Editor,
    pending: Snapshot,
    dirty: DirtySet,
}

/// Result of committing a session, pulled by the reconciler
#[derive(Debug, Clone)]
pub struct CommittedUpdate {
    /// Editor version after the commit
    pub version: u64,

    /// Snapshot that was current before the commit
    pub previous: Arc<Snapshot>,

    /// Snapshot that is current now
    pub current: Arc<Snapshot>,

    /// Keys whose rendering must be refreshed
    pub dirty: DirtySet,
}

impl CommittedUpdate {
    /// Keys present now but not before
    pub fn created(&self) -> Vec<NodeKey> {
        let mut keys: Vec<NodeKey> = self
            .current
            .registry()
            .keys()
            .filter(|key| !self.previous.registry().contains(*key))
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Keys present before but not now
    pub fn removed(&self) -> Vec<NodeKey> {
        let mut keys: Vec<NodeKey> = self
            .previous
            .registry()
            .keys()
            .filter(|key| !self.current.registry().contains(*key))
            .collect();
        keys.sort_unstable();
        keys
    }
}

impl<'e> EditSession<'e> {
    pub(crate) fn new(editor: &'e mut Editor) -> Self {
        let pending = Snapshot::clone(&editor.current);
        Self {
            editor,
            pending,
            dirty: DirtySet::new(),
        }
    }

    /// The snapshot being edited
    pub fn pending(&self) -> &Snapshot {
        &self.pending
    }

    /// The snapshot this session started from
    pub fn base(&self) -> &Snapshot {
        &self.editor.current
    }

    pub fn dirty(&self) -> &DirtySet {
        &self.dirty
    }

    pub fn config(&self) -> &EditorConfig {
        &self.editor.config
    }

    // Copy-on-write

    /// Mutable access to a node in the pending snapshot.
    ///
    /// Clones the node on first write within this session; later calls return
    /// the same clone. The key (and its ancestors, as subtree roots) is
    /// recorded as dirty. Fails if the key does not resolve in the pending
    /// snapshot.
    pub fn get_writable(&mut self, key: NodeKey) -> Result<&mut Node, MutationError> {
        if !self.pending.nodes.contains(key) {
            return Err(MutationError::NodeNotFound(key));
        }
        self.mark_dirty(key);
        self.pending
            .nodes
            .make_mut(key)
            .ok_or(MutationError::NodeNotFound(key))
    }

    /// Record `key` as dirty and every ancestor as a dirty subtree
    pub fn mark_dirty(&mut self, key: NodeKey) {
        if self.dirty.mark_node(key) {
            trace!(%key, "marked dirty");
        }
        let mut parent = self.pending.node(key).and_then(Node::parent);
        while let Some(ancestor) = parent {
            self.dirty.mark_subtree(ancestor);
            parent = self.pending.node(ancestor).and_then(Node::parent);
        }
    }

    fn expect_type(&self, key: NodeKey, expected: NodeType) -> Result<(), MutationError> {
        let found = self
            .pending
            .node(key)
            .ok_or(MutationError::NodeNotFound(key))?
            .node_type();
        match (expected, found) {
            (NodeType::Block, NodeType::Block) | (NodeType::Text, NodeType::Text) => Ok(()),
            (NodeType::Block, found) => Err(MutationError::NotABlock { key, found }),
            (NodeType::Text, found) => Err(MutationError::NotText { key, found }),
        }
    }

    pub(crate) fn block_mut(&mut self, key: NodeKey) -> Result<&mut BlockNode, MutationError> {
        self.expect_type(key, NodeType::Block)?;
        let node = self.get_writable(key)?;
        let found = node.node_type();
        node.as_block_mut()
            .ok_or(MutationError::NotABlock { key, found })
    }

    pub(crate) fn text_mut(&mut self, key: NodeKey) -> Result<&mut TextNode, MutationError> {
        self.expect_type(key, NodeType::Text)?;
        let node = self.get_writable(key)?;
        let found = node.node_type();
        node.as_text_mut().ok_or(MutationError::NotText { key, found })
    }

    pub(crate) fn text_len(&self, key: NodeKey) -> Result<usize, MutationError> {
        self.expect_type(key, NodeType::Text)?;
        Ok(self
            .pending
            .node(key)
            .and_then(Node::as_text)
            .map_or(0, TextNode::char_len))
    }

    // Creation

    fn insert_detached(&mut self, node: Node) -> NodeKey {
        let key = node.key();
        self.pending.nodes.insert(node);
        self.dirty.mark_node(key);
        debug!(%key, "created node");
        key
    }

    /// Create a detached block; attach it with [`append`](Self::append)
    pub fn create_block(&mut self, tag: impl Into<String>) -> NodeKey {
        self.insert_detached(Node::block(tag))
    }

    /// Create a detached block with the configured default tag
    pub fn create_default_block(&mut self) -> NodeKey {
        let tag = self.editor.config.default_block_tag.clone();
        self.create_block(tag)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeKey {
        self.insert_detached(Node::text(text))
    }

    pub fn create_text_with_flags(&mut self, text: impl Into<String>, flags: NodeFlags) -> NodeKey {
        self.insert_detached(Node::text(text).with_flags(flags))
    }

    // Tree structure

    /// Append `child` as the last child of `parent`, detaching it from its
    /// previous parent first.
    #[instrument(level = "debug", skip(self))]
    pub fn append(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), MutationError> {
        self.expect_type(parent, NodeType::Block)?;
        if !self.pending.nodes.contains(child) {
            return Err(MutationError::NodeNotFound(child));
        }
        if parent == child || self.pending.is_ancestor(child, parent) {
            return Err(MutationError::CycleDetected { parent, child });
        }

        self.get_writable(parent)?;
        let old_parent = self.get_writable(child)?.parent;

        if let Some(old_parent) = old_parent {
            let siblings = &mut self.block_mut(old_parent)?.children;
            if let Some(index) = siblings.iter().position(|key| *key == child) {
                siblings.remove(index);
            }
        }

        self.get_writable(child)?.parent = Some(parent);

        // An empty trailing text run may appear or vanish once it gains a
        // sibling, so it has to be re-rendered even though it is unchanged.
        let last_child = self.block_mut(parent)?.children.last().copied();
        if let Some(last) = last_child {
            if self.pending.node(last).is_some_and(Node::is_empty_text) {
                trace!(key = %last, "empty trailing text marked dirty");
                self.mark_dirty(last);
            }
        }

        self.block_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Remove a node and its descendants, repairing the selection if it
    /// pointed into the removed subtree.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, key: NodeKey) -> Result<(), MutationError> {
        if key == self.pending.root() {
            return Err(MutationError::CannotRemoveRoot(key));
        }
        if !self.pending.nodes.contains(key) {
            return Err(MutationError::NodeNotFound(key));
        }
        self.repair_selection_for_removal(key);
        self.detach(key)?;
        self.delete_subtree(key);
        Ok(())
    }

    /// Unlink a node from its parent's child list
    pub(crate) fn detach(&mut self, key: NodeKey) -> Result<(), MutationError> {
        let parent = self
            .pending
            .node(key)
            .ok_or(MutationError::NodeNotFound(key))?
            .parent();
        if let Some(parent) = parent {
            let siblings = &mut self.block_mut(parent)?.children;
            if let Some(index) = siblings.iter().position(|sibling| *sibling == key) {
                siblings.remove(index);
            }
        }
        Ok(())
    }

    /// Drop a node and all of its descendants from the pending registry,
    /// returning the deleted keys
    pub(crate) fn delete_subtree(&mut self, key: NodeKey) -> Vec<NodeKey> {
        let mut deleted = Vec::new();
        let mut stack = vec![key];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.pending.nodes.remove(next) {
                trace!(key = %next, "deleted node");
                deleted.push(next);
                if let Some(block) = node.as_block() {
                    stack.extend(block.children().iter().copied());
                }
            }
        }
        deleted
    }

    /// Delete nodes created in this session that never got a parent, with
    /// their subtrees. Only created nodes can be parentless here: detaching
    /// an attached node always deletes it.
    fn prune_detached(&mut self) {
        let root = self.pending.root();
        let mut detached: Vec<NodeKey> = self
            .dirty
            .nodes()
            .iter()
            .copied()
            .filter(|key| *key != root)
            .filter(|key| self.pending.node(*key).is_some_and(|node| node.parent().is_none()))
            .collect();
        detached.sort_unstable();

        for key in detached {
            self.repair_selection_for_removal(key);
            for deleted in self.delete_subtree(key) {
                self.dirty.forget(deleted);
            }
            debug!(%key, "pruned detached node");
        }
    }

    fn repair_selection_for_removal(&mut self, removed: NodeKey) {
        let Some(mut selection) = self.pending.selection else {
            return;
        };
        let inside = |point: Point| point.key == removed || self.pending.is_ancestor(removed, point.key);
        if !inside(selection.anchor) && !inside(selection.focus) {
            return;
        }

        match self.removal_fallback(removed) {
            Some(fallback) => {
                for point in selection.points_mut() {
                    if inside(*point) {
                        *point = fallback;
                    }
                }
                debug!(?selection, "selection moved off removed node");
                self.pending.selection = Some(selection);
            }
            None => {
                debug!(%removed, "selection cleared with removed node");
                self.pending.selection = None;
            }
        }
    }

    /// End of the previous text sibling, else start of the next one
    fn removal_fallback(&self, removed: NodeKey) -> Option<Point> {
        if let Some(previous) = self.pending.previous_sibling(removed) {
            if let Some(text) = previous.as_text() {
                return Some(Point::new(previous.key(), text.char_len()));
            }
        }
        let next = self.pending.next_sibling(removed)?;
        next.as_text()?;
        Some(Point::new(next.key(), 0))
    }

    // Text content

    /// Replace the whole text of a text node
    pub fn set_text(&mut self, key: NodeKey, text: impl Into<String>) -> Result<(), MutationError> {
        let text = text.into();
        let len = text.chars().count();
        self.text_mut(key)?.text = text;

        if let Some(selection) = self.pending.selection.as_mut() {
            for point in selection.points_mut() {
                if point.key == key {
                    point.offset = point.offset.min(len);
                }
            }
        }
        Ok(())
    }

    /// Delete `delete_count` chars at `offset` and insert `insert` there.
    ///
    /// Selection points in the node after the edited range shift with it;
    /// points inside the deleted range move to the end of the insertion.
    #[instrument(level = "debug", skip(self))]
    pub fn splice_text(
        &mut self,
        key: NodeKey,
        offset: usize,
        delete_count: usize,
        insert: &str,
    ) -> Result<(), MutationError> {
        let len = self.text_len(key)?;
        let end = offset.saturating_add(delete_count);
        if end > len {
            return Err(MutationError::OffsetOutOfBounds { key, offset: end, len });
        }

        let node = self.text_mut(key)?;
        let start_byte = char_to_byte(&node.text, offset);
        let end_byte = char_to_byte(&node.text, end);
        node.text.replace_range(start_byte..end_byte, insert);

        let inserted = insert.chars().count();
        if let Some(selection) = self.pending.selection.as_mut() {
            for point in selection.points_mut() {
                if point.key != key || point.offset < offset {
                    continue;
                }
                point.offset = if point.offset >= end {
                    point.offset - delete_count + inserted
                } else {
                    offset + inserted
                };
            }
        }
        Ok(())
    }

    // Flags

    pub fn set_flags(&mut self, key: NodeKey, flags: NodeFlags, enabled: bool) -> Result<(), MutationError> {
        self.get_writable(key)?.flags.set(flags, enabled);
        Ok(())
    }

    pub fn toggle_flags(&mut self, key: NodeKey, flags: NodeFlags) -> Result<(), MutationError> {
        self.get_writable(key)?.flags.toggle(flags);
        Ok(())
    }

    // Selection

    /// Select a range inside one text node
    pub fn select(&mut self, key: NodeKey, anchor_offset: usize, focus_offset: usize) -> Result<(), MutationError> {
        let len = self.text_len(key)?;
        let offset = anchor_offset.max(focus_offset);
        if offset > len {
            return Err(MutationError::OffsetOutOfBounds { key, offset, len });
        }
        self.pending.selection = Some(Selection::new(
            Point::new(key, anchor_offset),
            Point::new(key, focus_offset),
        ));
        Ok(())
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.pending.selection = selection;
    }

    pub fn clear_selection(&mut self) {
        self.pending.selection = None;
    }

    // Lifecycle

    /// Apply a mutation command
    pub fn apply(&mut self, mutation: &Mutation) -> Result<(), MutationError> {
        debug!(mutation = mutation.name(), "applying mutation");
        mutation.apply(self)
    }

    /// Run post-edit effects and install the pending snapshot as current.
    ///
    /// Nodes created but never attached are dropped; only nodes reachable
    /// from the root are committed.
    #[instrument(skip(self), fields(dirty = self.dirty.nodes().len()))]
    pub fn commit(mut self) -> Result<CommittedUpdate, MutationError> {
        let effects = Arc::clone(&self.editor.effects);
        effects.run(&mut self)?;
        self.prune_detached();

        let EditSession {
            editor,
            pending,
            dirty,
        } = self;
        Ok(editor.install(pending, dirty))
    }

    /// Throw the pending snapshot away; the current snapshot is untouched
    pub fn discard(self) {
        debug!(dirty = self.dirty.nodes().len(), "discarding edit session");
    }
}

impl NodeLookup for EditSession<'_> {
    fn root_key(&self) -> NodeKey {
        self.pending.root()
    }

    fn node(&self, key: NodeKey) -> Option<&Node> {
        self.pending.node(key)
    }

    fn selection(&self) -> Option<&Selection> {
        self.pending.selection()
    }
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(session: &mut EditSession<'_>, texts: &[&str]) -> (NodeKey, Vec<NodeKey>) {
        let root = session.root_key();
        let p = session.create_block("p");
        session.append(root, p).unwrap();
        let keys = texts
            .iter()
            .map(|text| {
                let key = session.create_text(*text);
                session.append(p, key).unwrap();
                key
            })
            .collect();
        (p, keys)
    }

    #[test]
    fn test_get_writable_is_idempotent() {
        let mut editor = Editor::new();
        let root = editor.current().root();

        let mut session = editor.begin();
        let first = session.get_writable(root).unwrap() as *const Node;
        let second = session.get_writable(root).unwrap() as *const Node;
        assert_eq!(first, second);
        assert!(!session.pending().registry().shares(session.base().registry(), root));
    }

    #[test]
    fn test_get_writable_unknown_key_fails() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let missing = NodeKey::next();
        assert_eq!(
            session.get_writable(missing).unwrap_err(),
            MutationError::NodeNotFound(missing)
        );
    }

    #[test]
    fn test_append_reparents() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let root = session.root_key();
        let p1 = session.create_block("p");
        let p2 = session.create_block("p");
        let child = session.create_text("x");
        session.append(root, p1).unwrap();
        session.append(root, p2).unwrap();
        session.append(p1, child).unwrap();

        session.append(p2, child).unwrap();

        assert!(session.children(p1).is_empty());
        assert_eq!(session.children(p2).iter().map(|n| n.key()).collect::<Vec<_>>(), vec![child]);
        assert_eq!(session.node(child).unwrap().parent(), Some(p2));
    }

    #[test]
    fn test_append_to_same_parent_moves_to_end() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (p, keys) = paragraph(&mut session, &["a", "b", "c"]);

        session.append(p, keys[0]).unwrap();

        let order: Vec<NodeKey> = session.children(p).iter().map(|n| n.key()).collect();
        assert_eq!(order, vec![keys[1], keys[2], keys[0]]);
    }

    #[test]
    fn test_append_rejects_cycles_and_non_blocks() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let root = session.root_key();
        let outer = session.create_block("div");
        let inner = session.create_block("div");
        let text = session.create_text("t");
        session.append(root, outer).unwrap();
        session.append(outer, inner).unwrap();

        assert_eq!(
            session.append(inner, outer).unwrap_err(),
            MutationError::CycleDetected { parent: inner, child: outer }
        );
        assert_eq!(
            session.append(outer, outer).unwrap_err(),
            MutationError::CycleDetected { parent: outer, child: outer }
        );
        assert_eq!(
            session.append(text, inner).unwrap_err(),
            MutationError::NotABlock { key: text, found: NodeType::Text }
        );
    }

    #[test]
    fn test_append_marks_empty_trailing_text_dirty() {
        let mut editor = Editor::new();
        let (p, empty) = {
            let mut session = editor.begin();
            let (p, keys) = paragraph(&mut session, &[""]);
            session.commit().unwrap();
            (p, keys[0])
        };

        let mut session = editor.begin();
        let next = session.create_text("more");
        session.append(p, next).unwrap();

        assert!(session.dirty().contains(empty));
        assert!(session.pending().registry().shares(session.base().registry(), empty));
    }

    #[test]
    fn test_append_does_not_mark_non_empty_trailing_text() {
        let mut editor = Editor::new();
        let (p, last) = {
            let mut session = editor.begin();
            let (p, keys) = paragraph(&mut session, &["abc"]);
            session.commit().unwrap();
            (p, keys[0])
        };

        let mut session = editor.begin();
        let next = session.create_block("span");
        session.append(p, next).unwrap();

        assert!(!session.dirty().contains(last));
    }

    #[test]
    fn test_dirty_marks_ancestors_as_subtrees() {
        let mut editor = Editor::new();
        let (p, text) = {
            let mut session = editor.begin();
            let (p, keys) = paragraph(&mut session, &["abc"]);
            session.commit().unwrap();
            (p, keys[0])
        };
        let root = editor.current().root();

        let mut session = editor.begin();
        session.set_text(text, "xyz").unwrap();

        assert!(session.dirty().is_dirty_node(text));
        assert!(session.dirty().is_dirty_subtree(p));
        assert!(session.dirty().is_dirty_subtree(root));
        assert!(!session.dirty().is_dirty_node(p));
    }

    #[test]
    fn test_remove_deletes_descendants() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (p, keys) = paragraph(&mut session, &["a", "b"]);
        let root = session.root_key();

        session.remove(p).unwrap();

        assert!(session.node(p).is_none());
        assert!(keys.iter().all(|key| session.node(*key).is_none()));
        assert!(session.children(root).is_empty());
    }

    #[test]
    fn test_remove_root_fails() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let root = session.root_key();
        assert_eq!(session.remove(root).unwrap_err(), MutationError::CannotRemoveRoot(root));
    }

    #[test]
    fn test_remove_moves_selection_to_previous_text() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (_, keys) = paragraph(&mut session, &["ab", "cd"]);
        session.select(keys[1], 1, 1).unwrap();

        session.remove(keys[1]).unwrap();

        assert_eq!(session.selection(), Some(&Selection::collapsed(Point::new(keys[0], 2))));
    }

    #[test]
    fn test_remove_moves_selection_to_next_text() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (_, keys) = paragraph(&mut session, &["ab", "cd"]);
        session.select(keys[0], 0, 2).unwrap();

        session.remove(keys[0]).unwrap();

        assert_eq!(session.selection(), Some(&Selection::collapsed(Point::new(keys[1], 0))));
    }

    #[test]
    fn test_remove_clears_selection_without_fallback() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (p, keys) = paragraph(&mut session, &["ab"]);
        session.select(keys[0], 1, 1).unwrap();

        session.remove(p).unwrap();

        assert!(session.selection().is_none());
    }

    #[test]
    fn test_splice_text_shifts_selection() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (_, keys) = paragraph(&mut session, &["hello"]);
        session.select(keys[0], 1, 4).unwrap();

        session.splice_text(keys[0], 0, 0, ">>").unwrap();
        assert_eq!(session.text_content(keys[0]), ">>hello");
        let selection = *session.selection().unwrap();
        assert_eq!(selection.anchor.offset, 3);
        assert_eq!(selection.focus.offset, 6);

        session.splice_text(keys[0], 2, 3, "J").unwrap();
        assert_eq!(session.text_content(keys[0]), ">>Jlo");
        let selection = *session.selection().unwrap();
        assert_eq!(selection.anchor.offset, 3);
        assert_eq!(selection.focus.offset, 4);
    }

    #[test]
    fn test_splice_text_uses_char_offsets() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (_, keys) = paragraph(&mut session, &["héllo"]);

        session.splice_text(keys[0], 1, 1, "e").unwrap();

        assert_eq!(session.text_content(keys[0]), "hello");
    }

    #[test]
    fn test_splice_text_out_of_bounds() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (p, keys) = paragraph(&mut session, &["abc"]);

        assert_eq!(
            session.splice_text(keys[0], 2, 5, "").unwrap_err(),
            MutationError::OffsetOutOfBounds { key: keys[0], offset: 7, len: 3 }
        );
        assert_eq!(
            session.splice_text(p, 0, 0, "x").unwrap_err(),
            MutationError::NotText { key: p, found: NodeType::Block }
        );
    }

    #[test]
    fn test_set_text_clamps_selection() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (_, keys) = paragraph(&mut session, &["hello"]);
        session.select(keys[0], 5, 5).unwrap();

        session.set_text(keys[0], "hi").unwrap();

        assert_eq!(session.selection().unwrap().anchor.offset, 2);
    }

    #[test]
    fn test_flags() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (_, keys) = paragraph(&mut session, &["a"]);

        session.set_flags(keys[0], NodeFlags::BOLD | NodeFlags::ITALIC, true).unwrap();
        session.toggle_flags(keys[0], NodeFlags::ITALIC).unwrap();

        assert_eq!(session.node(keys[0]).unwrap().flags(), NodeFlags::BOLD);
    }

    #[test]
    fn test_select_validates_offsets() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (_, keys) = paragraph(&mut session, &["ab"]);

        assert_eq!(
            session.select(keys[0], 0, 3).unwrap_err(),
            MutationError::OffsetOutOfBounds { key: keys[0], offset: 3, len: 2 }
        );
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_commit_drops_unattached_nodes() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (_, keys) = paragraph(&mut session, &["kept"]);
        let orphan = session.create_block("div");
        let orphan_child = session.create_text("never attached");
        session.append(orphan, orphan_child).unwrap();
        session.select(orphan_child, 2, 2).unwrap();

        let update = session.commit().unwrap();

        assert!(update.current.node(orphan).is_none());
        assert!(update.current.node(orphan_child).is_none());
        assert!(!update.created().contains(&orphan));
        assert!(!update.created().contains(&orphan_child));
        assert!(!update.dirty.contains(orphan));
        assert!(!update.dirty.contains(orphan_child));
        assert!(update.current.node(keys[0]).is_some());
        assert!(update.current.selection().is_none());
    }

    #[test]
    fn test_committed_update_lists_created_and_removed() {
        let mut editor = Editor::new();
        let mut session = editor.begin();
        let (p, keys) = paragraph(&mut session, &["a"]);
        let update = session.commit().unwrap();
        assert_eq!(update.created(), vec![p, keys[0]]);
        assert!(update.removed().is_empty());

        let mut session = editor.begin();
        session.remove(keys[0]).unwrap();
        let update = session.commit().unwrap();
        assert!(update.created().is_empty());
        assert_eq!(update.removed(), vec![keys[0]]);
    }
}
