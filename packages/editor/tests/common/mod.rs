//! Shared helpers for integration tests

#![allow(dead_code)]

use outline_editor::{EditSession, MutationError, NodeKey, NodeLookup};

/// Route tracing output to the test harness; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Append a `p` block under the root holding one text node per entry
pub fn paragraph(session: &mut EditSession<'_>, texts: &[&str]) -> Result<(NodeKey, Vec<NodeKey>), MutationError> {
    let root = session.root_key();
    let p = session.create_block("p");
    session.append(root, p)?;

    let mut keys = Vec::with_capacity(texts.len());
    for text in texts {
        let key = session.create_text(*text);
        session.append(p, key)?;
        keys.push(key);
    }
    Ok((p, keys))
}

pub fn child_keys(lookup: &impl NodeLookup, key: NodeKey) -> Vec<NodeKey> {
    lookup.children(key).iter().map(|node| node.key()).collect()
}
