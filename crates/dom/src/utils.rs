//! Utility functions for document processing.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{NodeId, NodeType};

/// Bounded heuristic: does the string contain tag-like markup?
///
/// Looks for `<` followed by a letter, `/` or `!`, with a closing `>`
/// somewhere after it. A gate, not a validator: plain text with a
/// stray `<` stays text.
pub fn looks_like_html(input: &str) -> bool {
    let mut rest = input;
    while let Some(position) = rest.find('<') {
        let after = &rest[position + 1..];
        let tag_like = after
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || c == '/' || c == '!');
        if tag_like && after.contains('>') {
            return true;
        }
        rest = after;
    }
    false
}

/// Read one declaration out of a `style` attribute value.
pub fn style_property(style: &str, property: &str) -> Option<String> {
    style.split(';').find_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case(property)
            .then(|| value.trim().to_string())
    })
}

/// Set one declaration in a `style` attribute value, preserving the
/// order of the others. Returns the rewritten attribute value.
pub fn set_style_property(style: &str, property: &str, value: &str) -> String {
    let mut declarations: Vec<(String, String)> = Vec::new();
    let mut replaced = false;

    for declaration in style.split(';') {
        let Some((name, existing)) = declaration.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if name.eq_ignore_ascii_case(property) {
            declarations.push((name.to_string(), value.trim().to_string()));
            replaced = true;
        } else {
            declarations.push((name.to_string(), existing.trim().to_string()));
        }
    }

    if !replaced {
        declarations.push((property.to_string(), value.trim().to_string()));
    }

    declarations
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Split a `data:` URI into content type and base64 payload. Only
/// base64 payloads qualify; anything else is not inline-image
/// material.
pub fn parse_data_uri(uri: &str) -> Option<(String, String)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    if !header.ends_with(";base64") {
        return None;
    }
    let content_type = header.trim_end_matches(";base64");
    let content_type = if content_type.is_empty() {
        "text/plain".to_string()
    } else {
        content_type.to_string()
    };
    Some((content_type, payload.to_string()))
}

/// Concatenated text content of a subtree.
pub fn text_content(arena: &DomArena, node_id: NodeId) -> Result<String> {
    let mut text = String::new();

    arena.traverse_df(node_id, |node| {
        if node.node_type == NodeType::Text {
            text.push_str(&node.node_value);
        }
        Ok(())
    })?;

    Ok(text.trim().to_string())
}
