//! # Text Normalization
//!
//! After structural edits a block may hold several adjacent text nodes that
//! render identically. Normalization merges each maximal run of them into
//! its first node so the tree has a single canonical shape.
//!
//! A child joins a run when it is a text node that is neither immutable nor
//! segmented and its flags equal those of the run's first member. Anything
//! else ends the run. Runs of one node are left alone.

use crate::{EditSession, MutationError, Node, NodeFlags, NodeKey, NodeLookup, Point};
use tracing::{debug, instrument};

impl EditSession<'_> {
    /// Merge runs of compatible adjacent text children of `block`.
    ///
    /// With `restore_selection`, a selection point inside an absorbed node is
    /// translated into the merged node. Without it, the selection is put back
    /// exactly as it was before the merge, even if it now names a removed
    /// node.
    ///
    /// Returns the number of runs merged.
    #[instrument(level = "debug", skip(self))]
    pub fn normalize_text_nodes(
        &mut self,
        block: NodeKey,
        restore_selection: bool,
    ) -> Result<usize, MutationError> {
        let node = self.node(block).ok_or(MutationError::NodeNotFound(block))?;
        if !node.is_block() {
            return Err(MutationError::NotABlock {
                key: block,
                found: node.node_type(),
            });
        }

        let children: Vec<(NodeKey, Option<NodeFlags>)> = self
            .children(block)
            .into_iter()
            .map(|child| (child.key(), child.is_mergeable_text().then(|| child.flags())))
            .collect();

        let mut merged = 0;
        let mut run: Vec<NodeKey> = Vec::new();
        let mut run_flags: Option<NodeFlags> = None;

        for (key, flags) in children {
            match flags {
                Some(flags) if run_flags.map_or(true, |run_flags| run_flags == flags) => {
                    run.push(key);
                    run_flags = Some(flags);
                }
                Some(flags) => {
                    merged += self.flush_run(&mut run, restore_selection)?;
                    run.push(key);
                    run_flags = Some(flags);
                }
                None => {
                    merged += self.flush_run(&mut run, restore_selection)?;
                    run_flags = None;
                }
            }
        }
        merged += self.flush_run(&mut run, restore_selection)?;

        if merged > 0 {
            debug!(%block, merged, "normalized text runs");
        }
        Ok(merged)
    }

    /// Normalize every block touched in this session, in key order
    pub fn normalize_dirty_blocks(&mut self, restore_selection: bool) -> Result<usize, MutationError> {
        let blocks: Vec<NodeKey> = self
            .dirty()
            .all_keys()
            .into_iter()
            .filter(|key| self.node(*key).is_some_and(Node::is_block))
            .collect();

        let mut merged = 0;
        for block in blocks {
            merged += self.normalize_text_nodes(block, restore_selection)?;
        }
        Ok(merged)
    }

    fn flush_run(&mut self, run: &mut Vec<NodeKey>, restore_selection: bool) -> Result<usize, MutationError> {
        let run = std::mem::take(run);
        if run.len() < 2 {
            return Ok(0);
        }
        self.combine_adjacent_text_nodes(&run, restore_selection)?;
        Ok(1)
    }

    fn combine_adjacent_text_nodes(&mut self, run: &[NodeKey], restore_selection: bool) -> Result<(), MutationError> {
        let Some((&target, absorbed)) = run.split_first() else {
            return Ok(());
        };

        let captured = self.selection().copied();
        let mut restored = captured;
        let mut offset = self.text_len(target)?;

        for &key in absorbed {
            let node = self.node(key).ok_or(MutationError::NodeNotFound(key))?;
            let sibling_text = node
                .as_text()
                .ok_or(MutationError::NotText {
                    key,
                    found: node.node_type(),
                })?
                .text()
                .to_owned();

            if restore_selection {
                if let (Some(before), Some(after)) = (captured, restored.as_mut()) {
                    if before.anchor.key == key {
                        after.anchor = Point::new(target, offset + before.anchor.offset);
                    }
                    if before.focus.key == key {
                        after.focus = Point::new(target, offset + before.focus.offset);
                    }
                }
            }

            self.text_mut(target)?.text.push_str(&sibling_text);
            offset += sibling_text.chars().count();

            self.detach(key)?;
            self.delete_subtree(key);
        }

        self.set_selection(if restore_selection { restored } else { captured });
        Ok(())
    }
}
