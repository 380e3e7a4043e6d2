//! Core node types for the arena-backed document tree.
//!
//! Design:
//! - u32 indices instead of pointers
//! - SmallVec for child lists (most nodes have <4 children)
//! - owned String/HashMap payloads, stored once in the arena

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Node identifier: index into the arena.
pub type NodeId = u32;

/// The node kinds this tree carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Document,
    Element,
    Text,
    Comment,
}

/// One node of the document tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>,

    /// Tag name for elements; `#document`, `#text` or `#comment`
    /// otherwise.
    pub node_name: String,
    /// Character data for text and comment nodes, empty otherwise.
    pub node_value: String,
    pub attributes: HashMap<String, String>,

    /// Stable identity that survives detaching and re-attaching.
    pub uuid: String,
}

impl DomNode {
    pub fn new(node_id: NodeId, node_type: NodeType, node_name: String) -> Self {
        Self {
            node_id,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name,
            node_value: String::new(),
            attributes: HashMap::new(),
            uuid: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Tag name for element nodes.
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|value| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }
}
