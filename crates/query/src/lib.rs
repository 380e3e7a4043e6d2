//! CSS selector engine over a generic node tree.
//!
//! The tree itself belongs to the caller: everything here reads it
//! through the [`TreeAccess`] trait and nothing else. Four pieces on
//! top of that boundary:
//!
//! - [`parser`] turns a selector string into selector groups
//! - [`matcher`] tests one node against one compound step
//! - [`engine`] drives depth-first queries over a context subtree
//! - [`generator`] produces a selector string addressing a node
//!
//! All operations are pure reads. Sibling positions and document
//! order are recomputed on every call, so queries stay correct when
//! the caller mutates the tree between calls.
//!
//! ```
//! use query::{select_all, select_first, node_css_selector};
//! # use query::TreeAccess;
//! # fn demo<T: TreeAccess>(tree: &T, root: T::Node) -> query::Result<()> {
//! let items = select_all(tree, root, "ul > li:nth-child(2), #special")?;
//! if let Some(item) = items.first() {
//!     let selector = node_css_selector(tree, *item)?;
//!     assert_eq!(select_first(tree, root, &selector)?, Some(*item));
//! }
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod parser;
pub mod selector;
pub mod tree;

#[cfg(test)]
pub(crate) mod testtree;

pub use engine::{query_all, query_first, select_all, select_first};
pub use error::{QueryError, Result};
pub use generator::node_css_selector;
pub use matcher::matches_compound;
pub use parser::parse_selector_list;
pub use selector::{
    AttrOperator, AttributeSelector, Combinator, CompoundSelector, NthArg, PseudoClass,
    SelectorGroup, SelectorStep, SimpleSelector,
};
pub use tree::{NodeKind, TreeAccess};
