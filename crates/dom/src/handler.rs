//! Document handler: the high-level API over one arena-backed tree.
//!
//! Mirrors the everyday manipulation surface: query by selector,
//! generate a selector for a node, read and write inline styles,
//! inspect and save inline (data-URI) images, resize images from
//! their declared dimensions, and export the document in encoded or
//! exact form.

use crate::arena::DomArena;
use crate::builder;
use crate::error::{DomError, Result};
use crate::serializer::{MarkupSerializer, OutputMode};
use crate::types::NodeId;
use crate::utils;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct DomHandlerConfig {
    /// Recursion bound for JSON document construction.
    pub max_build_depth: usize,
}

impl Default for DomHandlerConfig {
    fn default() -> Self {
        Self {
            max_build_depth: 256,
        }
    }
}

pub struct DomHandler {
    config: DomHandlerConfig,
    arena: DomArena,
}

impl DomHandler {
    pub fn new(arena: DomArena) -> Self {
        Self {
            config: DomHandlerConfig::default(),
            arena,
        }
    }

    pub fn with_config(arena: DomArena, config: DomHandlerConfig) -> Self {
        Self { config, arena }
    }

    /// Build a handler from a JSON node description.
    pub fn from_json(value: &Value) -> Result<Self> {
        Self::from_json_with_config(value, DomHandlerConfig::default())
    }

    pub fn from_json_with_config(value: &Value, config: DomHandlerConfig) -> Result<Self> {
        let arena = builder::build_from_json(value, config.max_build_depth)?;
        Ok(Self { config, arena })
    }

    /// Build a handler from JSON text.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json(&value)
    }

    pub fn config(&self) -> &DomHandlerConfig {
        &self.config
    }

    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut DomArena {
        &mut self.arena
    }

    pub fn root_id(&self) -> Result<NodeId> {
        self.arena.root_id().ok_or(DomError::MissingRoot)
    }

    // --- selector queries -------------------------------------------------

    /// All elements matching the selector, in document order. The
    /// search is scoped to `context` when given, the document root
    /// otherwise.
    pub fn query_selector_all(
        &self,
        selector: &str,
        context: Option<NodeId>,
    ) -> Result<Vec<NodeId>> {
        let context = match context {
            Some(node) => node,
            None => self.root_id()?,
        };
        let matches = query::select_all(&self.arena, context, selector)?;
        tracing::debug!(selector, matches = matches.len(), "query_selector_all");
        Ok(matches)
    }

    /// First match in document order, if any.
    pub fn query_selector(
        &self,
        selector: &str,
        context: Option<NodeId>,
    ) -> Result<Option<NodeId>> {
        let context = match context {
            Some(node) => node,
            None => self.root_id()?,
        };
        Ok(query::select_first(&self.arena, context, selector)?)
    }

    /// Selector string addressing `node` from the document root.
    pub fn node_css_selector(&self, node: NodeId) -> Result<String> {
        Ok(query::node_css_selector(&self.arena, node)?)
    }

    // --- styles -----------------------------------------------------------

    /// One declaration from the element's `style` attribute.
    pub fn element_style(&self, node: NodeId, property: &str) -> Result<Option<String>> {
        let element = self.arena.get(node)?;
        if !element.is_element() {
            return Err(DomError::NotAnElement(node));
        }
        Ok(element
            .attr("style")
            .and_then(|style| utils::style_property(style, property)))
    }

    /// Set one declaration in the element's `style` attribute,
    /// preserving the order of the others.
    pub fn set_element_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()> {
        let current = {
            let element = self.arena.get(node)?;
            if !element.is_element() {
                return Err(DomError::NotAnElement(node));
            }
            element.attr("style").unwrap_or("").to_string()
        };
        let updated = utils::set_style_property(&current, property, value);
        self.arena.set_attribute(node, "style", &updated)
    }

    // --- markup export ----------------------------------------------------

    /// Markup of the node's children, exact values.
    pub fn inner_html(&self, node: NodeId) -> Result<String> {
        MarkupSerializer::new(OutputMode::Exact).serialize_children(&self.arena, node)
    }

    /// Markup of the node and its subtree, exact values.
    pub fn outer_html(&self, node: NodeId) -> Result<String> {
        MarkupSerializer::new(OutputMode::Exact).serialize(&self.arena, node)
    }

    /// Whole document, encoded output: entity-escaped text, escaped
    /// attribute values, percent-escaped src/href.
    pub fn html(&self) -> Result<String> {
        MarkupSerializer::new(OutputMode::Encoded).serialize(&self.arena, self.root_id()?)
    }

    /// Whole document with the tree's current values verbatim.
    pub fn html_exact(&self) -> Result<String> {
        MarkupSerializer::new(OutputMode::Exact).serialize(&self.arena, self.root_id()?)
    }

    // --- structure --------------------------------------------------------

    /// Detach a node from its parent. The node keeps its subtree and
    /// its id; it simply stops being part of the document.
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        self.arena.detach(node)?;
        tracing::debug!(node, "node removed from document");
        Ok(())
    }

    // --- images -----------------------------------------------------------

    /// Mirror declared `width`/`height` attributes of every `img`
    /// into its style declarations. A missing counterpart becomes
    /// `auto` so the declared dimension keeps the aspect ratio
    /// instead of distorting it. Returns how many images changed.
    pub fn resize_images(&mut self) -> Result<usize> {
        let images = self.arena.find_by_tag("img");
        let mut resized = 0;

        for image in images {
            let (width, height) = {
                let node = self.arena.get(image)?;
                (
                    node.attr("width").map(str::to_string),
                    node.attr("height").map(str::to_string),
                )
            };
            if width.is_none() && height.is_none() {
                continue;
            }

            let width_value = width.map_or("auto".to_string(), |value| css_length(&value));
            let height_value = height.map_or("auto".to_string(), |value| css_length(&value));
            self.set_element_style(image, "width", &width_value)?;
            self.set_element_style(image, "height", &height_value)?;
            resized += 1;
        }

        tracing::debug!(resized, "images resized from declared dimensions");
        Ok(resized)
    }

    /// Is this an `img` element whose `src` is a base64 `data:` URI?
    pub fn is_inline_image(&self, node: NodeId) -> Result<bool> {
        let element = self.arena.get(node)?;
        Ok(element
            .tag_name()
            .map_or(false, |tag| tag.eq_ignore_ascii_case("img"))
            && element
                .attr("src")
                .and_then(utils::parse_data_uri)
                .is_some())
    }

    /// Content type declared in the image's data URI.
    pub fn inline_image_content_type(&self, node: NodeId) -> Result<String> {
        self.inline_image_parts(node).map(|(content_type, _)| content_type)
    }

    /// Raw base64 payload of the image's data URI.
    pub fn inline_image_base64_data(&self, node: NodeId) -> Result<String> {
        self.inline_image_parts(node).map(|(_, payload)| payload)
    }

    /// Decoded image bytes.
    pub fn inline_image_data(&self, node: NodeId) -> Result<Vec<u8>> {
        let (_, payload) = self.inline_image_parts(node)?;
        Ok(BASE64.decode(payload.as_bytes())?)
    }

    /// Decode the image and write it to `path`.
    pub fn save_inline_image(&self, node: NodeId, path: &Path) -> Result<()> {
        let data = self.inline_image_data(node)?;
        std::fs::write(path, &data)?;
        tracing::debug!(node, bytes = data.len(), path = %path.display(), "inline image saved");
        Ok(())
    }

    fn inline_image_parts(&self, node: NodeId) -> Result<(String, String)> {
        let element = self.arena.get(node)?;
        let is_img = element
            .tag_name()
            .map_or(false, |tag| tag.eq_ignore_ascii_case("img"));
        if !is_img {
            return Err(DomError::NotAnInlineImage(node));
        }
        element
            .attr("src")
            .and_then(utils::parse_data_uri)
            .ok_or(DomError::NotAnInlineImage(node))
    }
}

/// Bare numbers in width/height attributes are pixel counts; anything
/// else (`50%`, `3em`) passes through as written.
fn css_length(value: &str) -> String {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        format!("{trimmed}px")
    } else {
        trimmed.to_string()
    }
}
