//! # Editor Handle
//!
//! The [`Editor`] owns the current snapshot, the configuration and a version
//! counter. All edits go through an [`EditSession`] opened with
//! [`Editor::begin`]; the session borrows the editor mutably, so sessions
//! cannot nest or overlap.
//!
//! ## Lifecycle
//!
//! ```text
//! begin → edit → post effects → commit
//!   ↓       ↓          ↓            ↓
//! pending  COW +    normalize   pending → current,
//! clone    dirty    dirty text  dirty set returned
//! ```

use crate::{
    CommittedUpdate, DirtySet, EditSession, EditorConfig, EditorError, MutationError,
    PostEffectEngine, Snapshot,
};
use std::sync::Arc;
use tracing::info;

/// Editable document
#[derive(Debug)]
pub struct Editor {
    pub(crate) current: Arc<Snapshot>,
    pub(crate) config: EditorConfig,
    pub(crate) effects: Arc<PostEffectEngine>,
    version: u64,
}

impl Editor {
    /// Empty document with default config
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Empty document; post effects follow `config`
    pub fn with_config(config: EditorConfig) -> Self {
        let effects = PostEffectEngine::from_config(&config);
        Self::with_effects(config, effects)
    }

    /// Empty document with a custom post-effect engine
    pub fn with_effects(config: EditorConfig, effects: PostEffectEngine) -> Self {
        Self {
            current: Arc::new(Snapshot::new()),
            config,
            effects: Arc::new(effects),
            version: 0,
        }
    }

    /// Last committed snapshot
    pub fn current(&self) -> &Arc<Snapshot> {
        &self.current
    }

    /// Number of commits so far
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Open an edit session against the current snapshot
    pub fn begin(&mut self) -> EditSession<'_> {
        EditSession::new(self)
    }

    /// Run `edit` in a fresh session and commit it.
    ///
    /// If `edit` or a post effect fails, nothing is committed.
    pub fn update<T, F>(&mut self, edit: F) -> Result<(T, CommittedUpdate), EditorError>
    where
        F: FnOnce(&mut EditSession<'_>) -> Result<T, MutationError>,
    {
        let mut session = self.begin();
        let value = edit(&mut session)?;
        let update = session.commit()?;
        Ok((value, update))
    }

    pub(crate) fn install(&mut self, pending: Snapshot, dirty: DirtySet) -> CommittedUpdate {
        let previous = std::mem::replace(&mut self.current, Arc::new(pending));
        self.version += 1;
        info!(
            version = self.version,
            nodes = self.current.len(),
            dirty = dirty.nodes().len(),
            "committed edit session"
        );
        CommittedUpdate {
            version: self.version,
            previous,
            current: Arc::clone(&self.current),
            dirty,
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
