//! [`TreeAccess`] implementation for the arena.
//!
//! This is the seam the selector engine queries through. Stale node
//! ids behave as inert comment nodes — no tag, no attributes, no
//! children — instead of panicking.

use crate::arena::DomArena;
use crate::types::{NodeId, NodeType};
use query::{NodeKind, TreeAccess};

impl TreeAccess for DomArena {
    type Node = NodeId;

    fn node_kind(&self, node: NodeId) -> NodeKind {
        self.node(node).map_or(NodeKind::Comment, |n| match n.node_type {
            NodeType::Document => NodeKind::Document,
            NodeType::Element => NodeKind::Element,
            NodeType::Text => NodeKind::Text,
            NodeType::Comment => NodeKind::Comment,
        })
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(|n| n.tag_name())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).and_then(|n| n.attr(name))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent_id)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children_ids.to_vec())
            .unwrap_or_default()
    }

    fn text_value(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(|n| match n.node_type {
            NodeType::Text | NodeType::Comment => Some(n.node_value.as_str()),
            _ => None,
        })
    }
}
