//! Compound-step matching.
//!
//! One node against one compound step, all predicates ANDed.
//! Position-sensitive pseudo-classes count element siblings only and
//! recompute the position on every call; the caller may have mutated
//! the tree since the last query.

use crate::selector::{
    AttrOperator, AttributeSelector, CompoundSelector, NthArg, PseudoClass, SimpleSelector,
};
use crate::tree::{NodeKind, TreeAccess};

/// Does `node` satisfy every predicate of `compound`?
///
/// Only element nodes can match; an empty predicate set never reaches
/// this point (the parser rejects it), and `*` matches any element.
pub fn matches_compound<T: TreeAccess>(
    tree: &T,
    node: T::Node,
    compound: &CompoundSelector,
) -> bool {
    if tree.node_kind(node) != NodeKind::Element {
        return false;
    }
    compound
        .parts
        .iter()
        .all(|part| matches_simple(tree, node, part))
}

fn matches_simple<T: TreeAccess>(tree: &T, node: T::Node, part: &SimpleSelector) -> bool {
    match part {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(name) => tree
            .tag_name(node)
            .map_or(false, |tag| tag.eq_ignore_ascii_case(name)),
        SimpleSelector::Id(id) => tree.attribute(node, "id") == Some(id.as_str()),
        SimpleSelector::Class(class) => tree.attribute(node, "class").map_or(false, |classes| {
            classes.split_whitespace().any(|entry| entry == class)
        }),
        SimpleSelector::Attribute(attr) => matches_attribute(tree, node, attr),
        SimpleSelector::Pseudo(pseudo) => matches_pseudo(tree, node, pseudo),
    }
}

fn matches_attribute<T: TreeAccess>(tree: &T, node: T::Node, attr: &AttributeSelector) -> bool {
    let Some(value) = tree.attribute(node, &attr.name) else {
        return false;
    };
    match attr.operator {
        AttrOperator::Exists => true,
        AttrOperator::Equals => value == attr.value,
        AttrOperator::Includes => value.split_whitespace().any(|entry| entry == attr.value),
        AttrOperator::Prefix => !attr.value.is_empty() && value.starts_with(&attr.value),
        AttrOperator::Suffix => !attr.value.is_empty() && value.ends_with(&attr.value),
        AttrOperator::Substring => !attr.value.is_empty() && value.contains(&attr.value),
    }
}

fn matches_pseudo<T: TreeAccess>(tree: &T, node: T::Node, pseudo: &PseudoClass) -> bool {
    match pseudo {
        PseudoClass::FirstChild => tree.element_position(node).0 == 1,
        PseudoClass::LastChild => {
            let (position, count) = tree.element_position(node);
            position == count
        }
        PseudoClass::NthChild(arg) => {
            let (position, _) = tree.element_position(node);
            match arg {
                NthArg::Index(index) => position == *index,
                NthArg::Odd => position % 2 == 1,
                NthArg::Even => position % 2 == 0,
            }
        }
        PseudoClass::Empty => is_empty_element(tree, node),
    }
}

/// No element children and no non-whitespace text. Comments and
/// whitespace-only text nodes do not count as content.
fn is_empty_element<T: TreeAccess>(tree: &T, node: T::Node) -> bool {
    !tree.children(node).into_iter().any(|child| {
        match tree.node_kind(child) {
            NodeKind::Element => true,
            NodeKind::Text => tree
                .text_value(child)
                .map_or(false, |text| !text.trim().is_empty()),
            _ => false,
        }
    })
}
