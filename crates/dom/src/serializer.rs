//! Markup serialization with two output policies.
//!
//! `Encoded` entity-escapes text and attribute values and
//! percent-escapes unsafe characters inside `src`/`href` URLs;
//! `Exact` emits the tree's current values untouched, even where a
//! strict parser would have encoded them. Both render the same live
//! tree: a mutation made before export shows up identically in both
//! modes, because serialization is a rendering choice and never a
//! data change.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{DomNode, NodeId, NodeType};

/// Output policy for attribute and text values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Encoded,
    Exact,
}

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Attributes holding URLs, percent-escaped in encoded mode.
const URL_ATTRIBUTES: &[&str] = &["src", "href"];

#[derive(Debug, Clone)]
pub struct MarkupSerializer {
    mode: OutputMode,
}

impl MarkupSerializer {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Serialize a node and its subtree (outer markup).
    pub fn serialize(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.write_node(arena, node_id, &mut output)?;
        Ok(output)
    }

    /// Serialize only a node's children (inner markup).
    pub fn serialize_children(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        for &child_id in &arena.get(node_id)?.children_ids {
            self.write_node(arena, child_id, &mut output)?;
        }
        Ok(output)
    }

    fn write_node(&self, arena: &DomArena, node_id: NodeId, output: &mut String) -> Result<()> {
        let node = arena.get(node_id)?;

        match node.node_type {
            NodeType::Document => {
                for &child_id in &node.children_ids {
                    self.write_node(arena, child_id, output)?;
                }
            }
            NodeType::Element => self.write_element(arena, node, output)?,
            NodeType::Text => match self.mode {
                OutputMode::Encoded => output.push_str(&escape_text(&node.node_value)),
                OutputMode::Exact => output.push_str(&node.node_value),
            },
            NodeType::Comment => {
                output.push_str("<!--");
                output.push_str(&node.node_value);
                output.push_str("-->");
            }
        }

        Ok(())
    }

    fn write_element(&self, arena: &DomArena, node: &DomNode, output: &mut String) -> Result<()> {
        output.push('<');
        output.push_str(&node.node_name);

        // The attribute map does not track insertion order; sort for
        // stable output.
        let mut attributes: Vec<(&String, &String)> = node.attributes.iter().collect();
        attributes.sort_by(|left, right| left.0.cmp(right.0));

        for (name, value) in attributes {
            output.push(' ');
            output.push_str(name);
            output.push_str("=\"");
            output.push_str(&self.render_attribute(name, value));
            output.push('"');
        }
        output.push('>');

        let void = VOID_ELEMENTS.contains(&node.node_name.to_ascii_lowercase().as_str());
        if void && node.children_ids.is_empty() {
            return Ok(());
        }

        for &child_id in &node.children_ids {
            self.write_node(arena, child_id, output)?;
        }

        output.push_str("</");
        output.push_str(&node.node_name);
        output.push('>');
        Ok(())
    }

    fn render_attribute(&self, name: &str, value: &str) -> String {
        match self.mode {
            OutputMode::Exact => value.to_string(),
            OutputMode::Encoded => {
                if URL_ATTRIBUTES.contains(&name.to_ascii_lowercase().as_str()) {
                    escape_attr(&encode_url_value(value))
                } else {
                    escape_attr(value)
                }
            }
        }
    }
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

/// Percent-escape only the characters a URL cannot carry verbatim,
/// leaving the reserved syntax (`/`, `:`, `?`, ...) alone so the URL
/// still points where it pointed.
fn encode_url_value(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut buffer = [0u8; 4];
    for ch in value.chars() {
        if ch == ' ' || ch == '"' || ch == '<' || ch == '>' || !ch.is_ascii() {
            output.push_str(&urlencoding::encode(ch.encode_utf8(&mut buffer)));
        } else {
            output.push(ch);
        }
    }
    output
}
