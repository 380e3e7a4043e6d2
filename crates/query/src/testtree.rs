//! Minimal in-memory tree for unit tests.
//!
//! Flat Vec of nodes addressed by index, just enough structure to
//! exercise the engine without a real document implementation.

use crate::tree::{NodeKind, TreeAccess};

pub struct TestNode {
    kind: NodeKind,
    tag: String,
    value: String,
    attrs: Vec<(String, String)>,
    parent: Option<usize>,
    children: Vec<usize>,
}

pub struct TestTree {
    nodes: Vec<TestNode>,
}

impl TestTree {
    /// New tree with a document node at index 0.
    pub fn new() -> Self {
        Self {
            nodes: vec![TestNode {
                kind: NodeKind::Document,
                tag: String::new(),
                value: String::new(),
                attrs: Vec::new(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn document(&self) -> usize {
        0
    }

    pub fn element(&mut self, parent: usize, tag: &str, attrs: &[(&str, &str)]) -> usize {
        let id = self.push(TestNode {
            kind: NodeKind::Element,
            tag: tag.to_string(),
            value: String::new(),
            attrs: attrs
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Element with no parent link, for detached-node cases.
    pub fn orphan_element(&mut self, tag: &str) -> usize {
        self.push(TestNode {
            kind: NodeKind::Element,
            tag: tag.to_string(),
            value: String::new(),
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        })
    }

    pub fn text(&mut self, parent: usize, value: &str) -> usize {
        let id = self.push(TestNode {
            kind: NodeKind::Text,
            tag: String::new(),
            value: value.to_string(),
            attrs: Vec::new(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn comment(&mut self, parent: usize, value: &str) -> usize {
        let id = self.push(TestNode {
            kind: NodeKind::Comment,
            tag: String::new(),
            value: value.to_string(),
            attrs: Vec::new(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    fn push(&mut self, node: TestNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

impl TreeAccess for TestTree {
    type Node = usize;

    fn node_kind(&self, node: usize) -> NodeKind {
        self.nodes[node].kind
    }

    fn tag_name(&self, node: usize) -> Option<&str> {
        (self.nodes[node].kind == NodeKind::Element).then(|| self.nodes[node].tag.as_str())
    }

    fn attribute(&self, node: usize, name: &str) -> Option<&str> {
        self.nodes[node]
            .attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    fn parent(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent
    }

    fn children(&self, node: usize) -> Vec<usize> {
        self.nodes[node].children.clone()
    }

    fn text_value(&self, node: usize) -> Option<&str> {
        matches!(self.nodes[node].kind, NodeKind::Text | NodeKind::Comment)
            .then(|| self.nodes[node].value.as_str())
    }
}
