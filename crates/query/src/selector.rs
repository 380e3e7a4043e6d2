//! Parsed selector representation.
//!
//! A selector list is a comma-separated sequence of groups. A group
//! is a chain of compound steps linked by combinators, and a compound
//! step is a set of simple predicates that must all hold for a node
//! to satisfy that step. The `Display` impls reproduce canonical
//! selector text, so a parsed tree can be printed back into something
//! the parser accepts.

use std::fmt;

/// Relation between two adjacent compound steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: direct parent.
    Child,
    /// `+`: immediately preceding element sibling.
    AdjacentSibling,
    /// `~`: any preceding element sibling.
    GeneralSibling,
}

/// Attribute comparison drawn from the bracket form used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrOperator {
    /// `[attr]`
    Exists,
    /// `[attr=value]`
    Equals,
    /// `[attr~=value]`: whitespace-delimited list membership.
    Includes,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    pub operator: AttrOperator,
    /// Comparison value; empty and unused for `Exists`.
    pub value: String,
}

/// Argument of `:nth-child(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NthArg {
    /// 1-based sibling index.
    Index(usize),
    Odd,
    Even,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    NthChild(NthArg),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// `*`: any element.
    Universal,
    /// Tag name, matched case-insensitively.
    Type(String),
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
    Pseudo(PseudoClass),
}

/// One selector step: simple predicates combined with logical AND.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub parts: Vec<SimpleSelector>,
}

impl CompoundSelector {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// A compound step plus its relation to the previous step. The first
/// step of a group carries the implicit descendant-of-context
/// combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorStep {
    pub combinator: Combinator,
    pub compound: CompoundSelector,
}

/// One comma-separated entry of a selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorGroup {
    pub steps: Vec<SelectorStep>,
}

impl fmt::Display for AttrOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrOperator::Exists => Ok(()),
            AttrOperator::Equals => write!(f, "="),
            AttrOperator::Includes => write!(f, "~="),
            AttrOperator::Prefix => write!(f, "^="),
            AttrOperator::Suffix => write!(f, "$="),
            AttrOperator::Substring => write!(f, "*="),
        }
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PseudoClass::FirstChild => write!(f, ":first-child"),
            PseudoClass::LastChild => write!(f, ":last-child"),
            PseudoClass::NthChild(NthArg::Index(index)) => write!(f, ":nth-child({index})"),
            PseudoClass::NthChild(NthArg::Odd) => write!(f, ":nth-child(odd)"),
            PseudoClass::NthChild(NthArg::Even) => write!(f, ":nth-child(even)"),
            PseudoClass::Empty => write!(f, ":empty"),
        }
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::Universal => write!(f, "*"),
            SimpleSelector::Type(name) => write!(f, "{name}"),
            SimpleSelector::Id(id) => write!(f, "#{id}"),
            SimpleSelector::Class(class) => write!(f, ".{class}"),
            SimpleSelector::Attribute(attr) => match attr.operator {
                AttrOperator::Exists => write!(f, "[{}]", attr.name),
                _ => write!(f, "[{}{}\"{}\"]", attr.name, attr.operator, attr.value),
            },
            SimpleSelector::Pseudo(pseudo) => write!(f, "{pseudo}"),
        }
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, step) in self.steps.iter().enumerate() {
            if index > 0 {
                match step.combinator {
                    Combinator::Descendant => write!(f, " ")?,
                    Combinator::Child => write!(f, " > ")?,
                    Combinator::AdjacentSibling => write!(f, " + ")?,
                    Combinator::GeneralSibling => write!(f, " ~ ")?,
                }
            }
            write!(f, "{}", step.compound)?;
        }
        Ok(())
    }
}
