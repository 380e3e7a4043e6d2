//! Node → selector generation.
//!
//! Walks the ancestor chain emitting one compound descriptor per
//! level: `#id` when the element carries a non-empty id,
//! `tag:nth-child(k)` otherwise. Descriptors join with the child
//! combinator, so feeding the result back through the engine from the
//! document root resolves to the original node.
//!
//! Ids are assumed document-unique. With duplicate ids an id-anchored
//! selector may resolve to the other claimant; that is a documented
//! limitation, not something this module tries to disambiguate.

use crate::error::{QueryError, Result};
use crate::tree::{NodeKind, TreeAccess};

/// Build a selector string addressing `node` from the document root.
///
/// Text and comment nodes are addressed through their nearest element
/// ancestor. A node with no path to a document root is an error —
/// callers must be able to tell "no selector possible" from "the
/// selector is empty".
pub fn node_css_selector<T: TreeAccess>(tree: &T, node: T::Node) -> Result<String> {
    let start = match tree.node_kind(node) {
        NodeKind::Element => node,
        // The document root has no selector of its own.
        NodeKind::Document => return Err(QueryError::DetachedNode),
        _ => tree.parent_element(node).ok_or(QueryError::DetachedNode)?,
    };

    let mut parts: Vec<String> = Vec::new();
    let mut anchored = false;
    let mut current = start;

    loop {
        let Some(parent) = tree.parent(current) else {
            return Err(QueryError::DetachedNode);
        };

        // Once an id anchors the chain, ancestors add nothing more;
        // the walk continues only to verify the node is attached.
        if !anchored {
            match tree.attribute(current, "id").filter(|id| !id.is_empty()) {
                Some(id) => {
                    parts.push(format!("#{id}"));
                    anchored = true;
                }
                None => {
                    let tag = tree.tag_name(current).unwrap_or("*").to_ascii_lowercase();
                    let (position, _) = tree.element_position(current);
                    parts.push(format!("{tag}:nth-child({position})"));
                }
            }
        }

        match tree.node_kind(parent) {
            NodeKind::Document => break,
            NodeKind::Element => current = parent,
            // An element hanging off a text or comment node is not a
            // document chain.
            _ => return Err(QueryError::DetachedNode),
        }
    }

    parts.reverse();
    Ok(parts.join(" > "))
}
