//! Error types for selector operations.
//!
//! Flat hierarchy, one enum. Callers can tell the three failure
//! classes apart without digging through nested sources.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Malformed selector string. Surfaced immediately: either the
    /// whole selector list parses or the call fails, never partially.
    #[error("selector syntax error: {message}")]
    Syntax { message: String },

    /// Pseudo-class outside the supported set. Raised at parse time,
    /// not deferred to match time.
    #[error("unsupported pseudo-class: :{name}")]
    UnsupportedPseudoClass { name: String },

    /// The node has no path to a document root. Distinct from an
    /// empty selector so callers can tell the two apart.
    #[error("node is detached from the document")]
    DetachedNode,
}

impl QueryError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        QueryError::Syntax {
            message: message.into(),
        }
    }
}
