//! # Outline Editor
//!
//! Document model core for a rich-text editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ input / commands: keystrokes → Mutation     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: sessions over node snapshots        │
//! │  - Copy-on-write pending snapshot           │
//! │  - Dirty tracking per node and subtree      │
//! │  - Text normalization + selection repair    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ reconciler: CommittedUpdate → rendering     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are immutable**: the current snapshot never changes in place
//! 2. **Keys, not pointers**: nodes refer to each other by [`NodeKey`]
//! 3. **One session at a time**: enforced by borrowing the [`Editor`] mutably
//! 4. **Canonical text**: adjacent compatible text nodes are merged on commit
//!
//! ## Usage
//!
//! ```rust
//! use outline_editor::{Editor, NodeLookup};
//!
//! let mut editor = Editor::new();
//! let mut session = editor.begin();
//! let root = session.root_key();
//! let p = session.create_block("p");
//! session.append(root, p)?;
//! for text in ["Hello", ", ", "world"] {
//!     let key = session.create_text(text);
//!     session.append(p, key)?;
//! }
//! let update = session.commit()?;
//!
//! assert_eq!(editor.current().dump(), r#"root[p["Hello, world"]]"#);
//! assert!(update.dirty.contains(p));
//! # Ok::<(), outline_editor::MutationError>(())
//! ```

mod config;
mod dirty;
mod document;
mod errors;
mod key;
mod mutations;
mod node;
mod normalize;
mod post_effects;
mod registry;
mod selection;
mod session;
mod snapshot;

pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use dirty::DirtySet;
pub use document::Editor;
pub use errors::EditorError;
pub use key::NodeKey;
pub use mutations::{Mutation, MutationError};
pub use node::{BlockNode, Node, NodeFlags, NodeKind, NodeType, TextNode};
pub use post_effects::{NormalizeDirtyText, PostEffect, PostEffectEngine};
pub use registry::NodeRegistry;
pub use selection::{Point, Selection};
pub use session::{CommittedUpdate, EditSession};
pub use snapshot::{NodeLookup, Snapshot, ROOT_TAG};
