//! Document construction from a JSON node description.
//!
//! Markup parsing belongs to the host platform; what crosses this
//! boundary is an already-structured node tree:
//!
//! ```json
//! {
//!   "tag": "ul",
//!   "attrs": { "id": "menu" },
//!   "children": [
//!     { "tag": "li", "children": [ { "text": "A" } ] },
//!     { "comment": "todo" }
//!   ]
//! }
//! ```
//!
//! The root value may also be an array of such nodes. Everything is
//! wrapped under a document node.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::NodeId;
use serde_json::Value;

/// Build an arena from a JSON node description. `max_depth` bounds
/// the recursion so a hostile description cannot blow the stack.
pub fn build_from_json(value: &Value, max_depth: usize) -> Result<DomArena> {
    let mut arena = DomArena::new();
    let document = arena.create_document();

    match value {
        Value::Array(nodes) => {
            for node in nodes {
                build_node(&mut arena, document, node, 1, max_depth)?;
            }
        }
        _ => {
            build_node(&mut arena, document, value, 1, max_depth)?;
        }
    }

    tracing::debug!(nodes = arena.len(), "document built from JSON description");
    Ok(arena)
}

fn build_node(
    arena: &mut DomArena,
    parent: NodeId,
    value: &Value,
    depth: usize,
    max_depth: usize,
) -> Result<NodeId> {
    if depth > max_depth {
        return Err(DomError::MaxDepthExceeded {
            current: depth,
            max: max_depth,
        });
    }

    let object = value.as_object().ok_or_else(|| {
        DomError::InvalidStructure("node description must be a JSON object".to_string())
    })?;

    if let Some(text) = object.get("text") {
        let text = text.as_str().ok_or_else(|| {
            DomError::InvalidStructure("`text` must be a string".to_string())
        })?;
        let id = arena.create_text(text);
        arena.append_child(parent, id)?;
        return Ok(id);
    }

    if let Some(comment) = object.get("comment") {
        let comment = comment.as_str().ok_or_else(|| {
            DomError::InvalidStructure("`comment` must be a string".to_string())
        })?;
        let id = arena.create_comment(comment);
        arena.append_child(parent, id)?;
        return Ok(id);
    }

    let tag = object.get("tag").and_then(Value::as_str).ok_or_else(|| {
        DomError::InvalidStructure(
            "node description needs one of `tag`, `text` or `comment`".to_string(),
        )
    })?;

    let id = arena.create_element(tag);
    arena.append_child(parent, id)?;

    if let Some(attrs) = object.get("attrs") {
        let attrs = attrs.as_object().ok_or_else(|| {
            DomError::InvalidStructure("`attrs` must be a JSON object".to_string())
        })?;
        for (name, attr_value) in attrs {
            let attr_value = attr_value.as_str().ok_or_else(|| {
                DomError::InvalidStructure(format!("attribute `{name}` must be a string"))
            })?;
            arena.set_attribute(id, name, attr_value)?;
        }
    }

    if let Some(children) = object.get("children") {
        let children = children.as_array().ok_or_else(|| {
            DomError::InvalidStructure("`children` must be a JSON array".to_string())
        })?;
        for child in children {
            build_node(arena, id, child, depth + 1, max_depth)?;
        }
    }

    Ok(id)
}
