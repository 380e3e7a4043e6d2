//! Tree query engine.
//!
//! Depth-first driver that applies parsed selector groups to a
//! context subtree. Candidates are tested against the last compound
//! step first; earlier steps are verified walking up through
//! ancestors or back through preceding siblings, so the common
//! non-match is rejected after a single compound test.

use crate::error::Result;
use crate::matcher::matches_compound;
use crate::parser::parse_selector_list;
use crate::selector::{Combinator, SelectorGroup};
use crate::tree::{NodeKind, TreeAccess};
use ahash::AHashSet;

/// All elements under `context` matching any group, in document
/// order, deduplicated by node identity. The context node itself is
/// never a candidate.
pub fn query_all<T: TreeAccess>(
    tree: &T,
    context: T::Node,
    groups: &[SelectorGroup],
) -> Vec<T::Node> {
    // Document order is assigned fresh on every call; the caller may
    // have mutated the tree since the last one.
    let ordered = document_order(tree, context);
    let mut seen: AHashSet<T::Node> = AHashSet::new();
    let mut hits: Vec<(usize, T::Node)> = Vec::new();

    for group in groups {
        if group.steps.is_empty() {
            continue;
        }
        for (index, &node) in ordered.iter().enumerate().skip(1) {
            if tree.node_kind(node) != NodeKind::Element {
                continue;
            }
            if group_matches(tree, group, node, context) && seen.insert(node) {
                hits.push((index, node));
            }
        }
    }

    hits.sort_by_key(|&(index, _)| index);
    tracing::trace!(
        groups = groups.len(),
        matches = hits.len(),
        "selector query complete"
    );
    hits.into_iter().map(|(_, node)| node).collect()
}

/// First match in document order, or None. Same engine as
/// [`query_all`], short-circuiting at the first hit.
pub fn query_first<T: TreeAccess>(
    tree: &T,
    context: T::Node,
    groups: &[SelectorGroup],
) -> Option<T::Node> {
    let ordered = document_order(tree, context);
    ordered.into_iter().skip(1).find(|&node| {
        tree.node_kind(node) == NodeKind::Element
            && groups
                .iter()
                .any(|group| !group.steps.is_empty() && group_matches(tree, group, node, context))
    })
}

/// Parse-and-query convenience over [`query_all`].
pub fn select_all<T: TreeAccess>(
    tree: &T,
    context: T::Node,
    selector: &str,
) -> Result<Vec<T::Node>> {
    let groups = parse_selector_list(selector)?;
    Ok(query_all(tree, context, &groups))
}

/// Parse-and-query convenience over [`query_first`].
pub fn select_first<T: TreeAccess>(
    tree: &T,
    context: T::Node,
    selector: &str,
) -> Result<Option<T::Node>> {
    let groups = parse_selector_list(selector)?;
    Ok(query_first(tree, context, &groups))
}

/// Pre-order enumeration of the context subtree, context first.
/// Iterative: selector queries must not be limited by stack depth.
fn document_order<T: TreeAccess>(tree: &T, context: T::Node) -> Vec<T::Node> {
    let mut ordered = Vec::new();
    let mut stack = vec![context];
    while let Some(node) = stack.pop() {
        ordered.push(node);
        let children = tree.children(node);
        for &child in children.iter().rev() {
            stack.push(child);
        }
    }
    ordered
}

fn group_matches<T: TreeAccess>(
    tree: &T,
    group: &SelectorGroup,
    candidate: T::Node,
    context: T::Node,
) -> bool {
    step_matches(tree, group, group.steps.len() - 1, candidate, context)
}

/// Can steps[0..=index] end at `node`? Evaluated right to left: the
/// compound at `index` must hold for `node`, then the combinator
/// decides where the previous step may sit. Descendant and
/// general-sibling branches backtrack over every admissible position.
fn step_matches<T: TreeAccess>(
    tree: &T,
    group: &SelectorGroup,
    index: usize,
    node: T::Node,
    context: T::Node,
) -> bool {
    if !matches_compound(tree, node, &group.steps[index].compound) {
        return false;
    }
    if index == 0 {
        // The leftmost step must still sit inside the context subtree.
        return within_subtree(tree, node, context);
    }

    match group.steps[index].combinator {
        Combinator::Child => tree
            .parent_element(node)
            .map_or(false, |parent| step_matches(tree, group, index - 1, parent, context)),
        Combinator::Descendant => {
            let mut ancestor = tree.parent_element(node);
            while let Some(candidate) = ancestor {
                if step_matches(tree, group, index - 1, candidate, context) {
                    return true;
                }
                ancestor = tree.parent_element(candidate);
            }
            false
        }
        Combinator::AdjacentSibling => preceding_element_siblings(tree, node)
            .last()
            .map_or(false, |&sibling| {
                step_matches(tree, group, index - 1, sibling, context)
            }),
        Combinator::GeneralSibling => preceding_element_siblings(tree, node)
            .iter()
            .any(|&sibling| step_matches(tree, group, index - 1, sibling, context)),
    }
}

fn preceding_element_siblings<T: TreeAccess>(tree: &T, node: T::Node) -> Vec<T::Node> {
    let Some(parent) = tree.parent(node) else {
        return Vec::new();
    };
    let siblings = tree.element_children(parent);
    match siblings.iter().position(|&sibling| sibling == node) {
        Some(position) => siblings[..position].to_vec(),
        None => Vec::new(),
    }
}

fn within_subtree<T: TreeAccess>(tree: &T, node: T::Node, context: T::Node) -> bool {
    let mut current = Some(node);
    while let Some(step) = current {
        if step == context {
            return true;
        }
        current = tree.parent(step);
    }
    false
}
