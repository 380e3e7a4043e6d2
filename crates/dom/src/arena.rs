//! Arena-based document tree storage.
//!
//! Nodes live in a single Vec and reference each other by index: no
//! Rc cycles, no recursive drops, cache-friendly traversal. Detached
//! nodes stay in the arena — callers may still hold their ids — they
//! just lose their place in a parent's child list.

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};

#[derive(Debug, Default)]
pub struct DomArena {
    nodes: Vec<DomNode>,
    root_id: Option<NodeId>,
}

impl DomArena {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
            root_id: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root_id: None,
        }
    }

    /// Create the document node. The first one becomes the root.
    pub fn create_document(&mut self) -> NodeId {
        let id = self.push_node(NodeType::Document, "#document".to_string(), String::new());
        if self.root_id.is_none() {
            self.root_id = Some(id);
        }
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeType::Element, tag.to_string(), String::new())
    }

    pub fn create_text(&mut self, value: &str) -> NodeId {
        self.push_node(NodeType::Text, "#text".to_string(), value.to_string())
    }

    pub fn create_comment(&mut self, value: &str) -> NodeId {
        self.push_node(NodeType::Comment, "#comment".to_string(), value.to_string())
    }

    fn push_node(&mut self, node_type: NodeType, name: String, value: String) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        let mut node = DomNode::new(node_id, node_type, name);
        node.node_value = value;
        self.nodes.push(node);
        node_id
    }

    /// Get node by ID (immutable).
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable).
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Non-erroring accessor, for read paths that treat stale ids as
    /// absent nodes.
    pub fn node(&self, node_id: NodeId) -> Option<&DomNode> {
        self.nodes.get(node_id as usize)
    }

    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    pub fn root(&self) -> Result<&DomNode> {
        let root_id = self.root_id.ok_or(DomError::MissingRoot)?;
        self.get(root_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|index| index as NodeId)
    }

    /// Append `child` to `parent`'s child list, detaching it from any
    /// previous parent first. Refuses to create cycles.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        self.get(parent_id)?;
        self.get(child_id)?;
        if parent_id == child_id || self.is_ancestor(child_id, parent_id) {
            return Err(DomError::InvalidStructure(format!(
                "cannot append node {child_id} inside its own subtree"
            )));
        }
        self.detach(child_id)?;
        self.get_mut(child_id)?.parent_id = Some(parent_id);
        self.get_mut(parent_id)?.children_ids.push(child_id);
        Ok(())
    }

    /// Is `candidate` an ancestor of `node`?
    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = self.node(node).and_then(|n| n.parent_id);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent_id);
        }
        false
    }

    /// Remove a node from its parent's child list. The node and its
    /// subtree stay in the arena, now detached. Detaching the root
    /// leaves the document without one.
    pub fn detach(&mut self, node_id: NodeId) -> Result<()> {
        let parent_id = self.get(node_id)?.parent_id;
        if let Some(parent_id) = parent_id {
            self.get_mut(parent_id)?
                .children_ids
                .retain(|child| *child != node_id);
            self.get_mut(node_id)?.parent_id = None;
        }
        if self.root_id == Some(node_id) {
            self.root_id = None;
        }
        Ok(())
    }

    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    pub fn set_attribute(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let node = self.get_mut(node_id)?;
        if !node.is_element() {
            return Err(DomError::NotAnElement(node_id));
        }
        node.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, node_id: NodeId, name: &str) -> Result<Option<String>> {
        let node = self.get_mut(node_id)?;
        if !node.is_element() {
            return Err(DomError::NotAnElement(node_id));
        }
        Ok(node.remove_attr(name))
    }

    /// Traverse a subtree depth-first, pre-order. Iterative: deep
    /// documents must not be limited by stack depth.
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse so they pop left-to-right.
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Find nodes matching a predicate, in arena order.
    pub fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| predicate(node).then(|| index as NodeId))
            .collect()
    }

    pub fn find_one<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes
            .iter()
            .enumerate()
            .find_map(|(index, node)| predicate(node).then(|| index as NodeId))
    }

    /// All elements with the given tag name, case-insensitive.
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find(|node| {
            node.is_element() && node.node_name.eq_ignore_ascii_case(tag)
        })
    }

    /// First element carrying `id="..."`. Linear scan: id lookups are
    /// not cached, so mutations can never leave a stale index behind.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_one(|node| node.is_element() && node.attr("id") == Some(id))
    }

    /// Clear the arena, keeping its allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root_id = None;
    }
}
