//! Arena-backed document tree with selector queries and dual-mode
//! export.
//!
//! The tree is the host side of the selector engine in the `query`
//! crate: [`DomArena`] implements its `TreeAccess` boundary, and
//! [`DomHandler`] layers the everyday manipulation surface on top —
//! querySelector-style lookups, selector generation for a node,
//! inline-style edits, inline-image helpers and encoded/exact markup
//! export.
//!
//! Markup parsing is deliberately absent: documents are built
//! programmatically through the arena or from a JSON node
//! description (see [`builder`]).

mod access;
pub mod arena;
pub mod builder;
pub mod error;
pub mod handler;
pub mod serializer;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use builder::build_from_json;
pub use error::{DomError, Result};
pub use handler::{DomHandler, DomHandlerConfig};
pub use serializer::{MarkupSerializer, OutputMode};
pub use types::{DomNode, NodeId, NodeType};
