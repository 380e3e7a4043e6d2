//! Host-tree capability boundary.
//!
//! The engine never owns nodes. It reads tag names, attributes and
//! parent/child links through this trait and nothing else, so any
//! tree that can answer these questions can be queried — including
//! the minimal mock trees the tests use. Nothing here is cached:
//! sibling positions are recomputed on every call because the caller
//! may mutate the tree between queries.

use std::fmt::Debug;
use std::hash::Hash;

/// Node kind, as far as selector matching cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
}

/// Read-only view of a caller-owned node tree.
pub trait TreeAccess {
    /// Opaque node handle. Cheap to copy, stable for the duration of
    /// one call (an arena index, typically).
    type Node: Copy + PartialEq + Eq + Hash + Debug;

    fn node_kind(&self, node: Self::Node) -> NodeKind;

    /// Tag name, element nodes only.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// All child nodes in document order. Callers filter by kind.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Character data for text and comment nodes.
    fn text_value(&self, node: Self::Node) -> Option<&str>;

    /// Nearest ancestor that is an element.
    fn parent_element(&self, node: Self::Node) -> Option<Self::Node> {
        let mut current = self.parent(node);
        while let Some(candidate) = current {
            if self.node_kind(candidate) == NodeKind::Element {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Element children only, document order.
    fn element_children(&self, node: Self::Node) -> Vec<Self::Node> {
        self.children(node)
            .into_iter()
            .filter(|&child| self.node_kind(child) == NodeKind::Element)
            .collect()
    }

    /// 1-based position among the parent's element children, plus the
    /// sibling count. A parent-less element counts as an only child.
    fn element_position(&self, node: Self::Node) -> (usize, usize) {
        let Some(parent) = self.parent(node) else {
            return (1, 1);
        };
        let siblings = self.element_children(parent);
        let position = siblings
            .iter()
            .position(|&sibling| sibling == node)
            .map_or(1, |index| index + 1);
        (position, siblings.len().max(1))
    }
}
