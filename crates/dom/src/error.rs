//! Error types for document operations.
//!
//! Simple, flat hierarchy. Selector errors pass through unchanged so
//! callers can still match on the query taxonomy.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0} is not an inline image")]
    NotAnInlineImage(NodeId),

    #[error("document has no root node")]
    MissingRoot,

    #[error("maximum build depth exceeded: {current} > {max}")]
    MaxDepthExceeded { current: usize, max: usize },

    #[error("invalid document structure: {0}")]
    InvalidStructure(String),

    #[error("selector error: {0}")]
    Query(#[from] query::QueryError),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
