//! # Post-Effect System
//!
//! Effects run on a session right before it commits, to restore invariants
//! that individual edits are allowed to break. The default engine normalizes
//! text in every block the session touched.
//!
//! Effects are:
//! - **Ordered**: run in registration order
//! - **Fallible**: the first error aborts the commit and the session is dropped
//! - **Incremental**: they should look at `session.dirty()`, not the whole tree

use crate::{EditSession, EditorConfig, MutationError};
use std::fmt;
use tracing::debug;

/// Pass run on a session before commit
pub trait PostEffect: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, session: &mut EditSession<'_>) -> Result<(), MutationError>;
}

/// Merge adjacent compatible text nodes in every dirty block
#[derive(Debug, Clone, Copy)]
pub struct NormalizeDirtyText {
    pub restore_selection: bool,
}

impl PostEffect for NormalizeDirtyText {
    fn name(&self) -> &'static str {
        "normalize_dirty_text"
    }

    fn run(&self, session: &mut EditSession<'_>) -> Result<(), MutationError> {
        session.normalize_dirty_blocks(self.restore_selection)?;
        Ok(())
    }
}

/// Ordered list of post effects
#[derive(Debug, Default)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Engine with no effects
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the effects enabled in `config`
    pub fn from_config(config: &EditorConfig) -> Self {
        let engine = Self::new();
        if config.normalize_on_commit {
            engine.with_effect(NormalizeDirtyText {
                restore_selection: config.restore_selection,
            })
        } else {
            engine
        }
    }

    pub fn with_effect(mut self, effect: impl PostEffect + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn run(&self, session: &mut EditSession<'_>) -> Result<(), MutationError> {
        for effect in &self.effects {
            debug!(effect = effect.name(), "running post effect");
            effect.run(session)?;
        }
        Ok(())
    }
}
