//! Selector string parser.
//!
//! Single left-to-right scan, one character of lookahead. The grammar
//! is the practical query subset: tag, `#id`, `.class`,
//! `[attr op value]`, a small pseudo-class set, the four combinators
//! and top-level comma lists. Parsing either consumes the whole input
//! or fails; there are no partial results.

use crate::error::{QueryError, Result};
use crate::selector::{
    AttrOperator, AttributeSelector, Combinator, CompoundSelector, NthArg, PseudoClass,
    SelectorGroup, SelectorStep, SimpleSelector,
};

/// Parse a selector string into its groups. Group order is preserved
/// and never deduplicated; the query engine re-sorts matches by
/// document order regardless.
pub fn parse_selector_list(input: &str) -> Result<Vec<SelectorGroup>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QueryError::syntax("empty selector"));
    }

    let mut cursor = Cursor::new(trimmed);
    let mut groups = Vec::new();

    loop {
        groups.push(parse_group(&mut cursor)?);
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(',') => {
                cursor.bump();
            }
            None => break,
            Some(other) => {
                return Err(cursor.stray(other));
            }
        }
    }

    Ok(groups)
}

fn parse_group(cursor: &mut Cursor<'_>) -> Result<SelectorGroup> {
    cursor.skip_whitespace();

    let first = parse_compound(cursor)?;
    if first.is_empty() {
        return Err(cursor.expected_compound());
    }

    let mut steps = vec![SelectorStep {
        combinator: Combinator::Descendant,
        compound: first,
    }];

    loop {
        let had_whitespace = cursor.skip_whitespace();
        let combinator = match cursor.peek() {
            None | Some(',') => break,
            Some('>') => {
                cursor.bump();
                cursor.skip_whitespace();
                Combinator::Child
            }
            Some('+') => {
                cursor.bump();
                cursor.skip_whitespace();
                Combinator::AdjacentSibling
            }
            Some('~') => {
                cursor.bump();
                cursor.skip_whitespace();
                Combinator::GeneralSibling
            }
            Some(other) => {
                if !had_whitespace {
                    return Err(cursor.stray(other));
                }
                Combinator::Descendant
            }
        };

        let compound = parse_compound(cursor)?;
        if compound.is_empty() {
            // Covers `a > > b`, trailing combinators and `a > , b`.
            return Err(cursor.expected_compound());
        }
        steps.push(SelectorStep {
            combinator,
            compound,
        });
    }

    Ok(SelectorGroup { steps })
}

fn parse_compound(cursor: &mut Cursor<'_>) -> Result<CompoundSelector> {
    let mut parts = Vec::new();

    loop {
        match cursor.peek() {
            Some('*') if parts.is_empty() => {
                cursor.bump();
                parts.push(SimpleSelector::Universal);
            }
            Some('#') => {
                cursor.bump();
                let id = cursor.identifier();
                if id.is_empty() {
                    return Err(cursor.syntax("expected an id after `#`"));
                }
                parts.push(SimpleSelector::Id(id));
            }
            Some('.') => {
                cursor.bump();
                let class = cursor.identifier();
                if class.is_empty() {
                    return Err(cursor.syntax("expected a class name after `.`"));
                }
                parts.push(SimpleSelector::Class(class));
            }
            Some('[') => {
                parts.push(SimpleSelector::Attribute(parse_attribute(cursor)?));
            }
            Some(':') => {
                parts.push(SimpleSelector::Pseudo(parse_pseudo(cursor)?));
            }
            Some(c) if parts.is_empty() && is_identifier_char(c) => {
                parts.push(SimpleSelector::Type(cursor.identifier()));
            }
            _ => break,
        }
    }

    Ok(CompoundSelector { parts })
}

fn parse_attribute(cursor: &mut Cursor<'_>) -> Result<AttributeSelector> {
    cursor.bump(); // consume `[`
    cursor.skip_whitespace();

    let name = cursor.identifier();
    if name.is_empty() {
        return Err(cursor.syntax("expected an attribute name after `[`"));
    }
    cursor.skip_whitespace();

    let operator = match cursor.peek() {
        Some(']') => {
            cursor.bump();
            return Ok(AttributeSelector {
                name,
                operator: AttrOperator::Exists,
                value: String::new(),
            });
        }
        Some('=') => {
            cursor.bump();
            AttrOperator::Equals
        }
        Some(op @ ('~' | '^' | '$' | '*')) => {
            cursor.bump();
            if cursor.peek() != Some('=') {
                return Err(cursor.syntax(format!("expected `=` after `{op}`")));
            }
            cursor.bump();
            match op {
                '~' => AttrOperator::Includes,
                '^' => AttrOperator::Prefix,
                '$' => AttrOperator::Suffix,
                _ => AttrOperator::Substring,
            }
        }
        Some(other) => return Err(cursor.stray(other)),
        None => return Err(cursor.syntax(format!("unclosed attribute selector `[{name}`"))),
    };

    cursor.skip_whitespace();
    let value = match cursor.peek() {
        Some(quote @ ('"' | '\'')) => {
            cursor.bump();
            let value = cursor.take_until(quote);
            if cursor.peek() != Some(quote) {
                return Err(cursor.syntax(format!("unterminated quoted value for `{name}`")));
            }
            cursor.bump();
            value
        }
        _ => cursor.identifier(),
    };

    cursor.skip_whitespace();
    if cursor.peek() != Some(']') {
        return Err(cursor.syntax(format!("unclosed attribute selector `[{name}`")));
    }
    cursor.bump();

    Ok(AttributeSelector {
        name,
        operator,
        value,
    })
}

fn parse_pseudo(cursor: &mut Cursor<'_>) -> Result<PseudoClass> {
    cursor.bump(); // consume `:`

    if cursor.peek() == Some(':') {
        return Err(cursor.syntax("pseudo-elements are not supported"));
    }

    let name = cursor.identifier();
    if name.is_empty() {
        return Err(cursor.syntax("expected a pseudo-class name after `:`"));
    }

    let argument = if cursor.peek() == Some('(') {
        cursor.bump();
        let raw = cursor.take_until(')');
        if cursor.peek() != Some(')') {
            return Err(cursor.syntax(format!("missing `)` after `:{name}(`")));
        }
        cursor.bump();
        Some(raw.trim().to_string())
    } else {
        None
    };

    match (name.to_ascii_lowercase().as_str(), argument) {
        ("first-child", None) => Ok(PseudoClass::FirstChild),
        ("last-child", None) => Ok(PseudoClass::LastChild),
        ("empty", None) => Ok(PseudoClass::Empty),
        ("nth-child", Some(arg)) => parse_nth_argument(cursor, &arg),
        ("nth-child", None) => Err(cursor.syntax("`:nth-child` requires an argument")),
        ("first-child" | "last-child" | "empty", Some(_)) => {
            Err(cursor.syntax(format!("`:{name}` takes no argument")))
        }
        _ => Err(QueryError::UnsupportedPseudoClass { name }),
    }
}

fn parse_nth_argument(cursor: &Cursor<'_>, argument: &str) -> Result<PseudoClass> {
    match argument.to_ascii_lowercase().as_str() {
        "odd" => Ok(PseudoClass::NthChild(NthArg::Odd)),
        "even" => Ok(PseudoClass::NthChild(NthArg::Even)),
        other => match other.parse::<usize>() {
            Ok(index) if index > 0 => Ok(PseudoClass::NthChild(NthArg::Index(index))),
            _ => Err(cursor.syntax(format!(
                "invalid `:nth-child` argument `{argument}` (expected a positive integer, `odd` or `even`)"
            ))),
        },
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

struct Cursor<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Skip whitespace, reporting whether any was consumed (whitespace
    /// between compounds is the descendant combinator).
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    fn identifier(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_char) {
            self.bump();
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Consume up to, but not including, `stop`. Leaves the cursor on
    /// the stop character (or at the end of input if never found).
    fn take_until(&mut self, stop: char) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != stop) {
            self.bump();
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn syntax(&self, message: impl Into<String>) -> QueryError {
        QueryError::syntax(format!(
            "{} at offset {} in `{}`",
            message.into(),
            self.pos,
            self.input
        ))
    }

    fn stray(&self, c: char) -> QueryError {
        self.syntax(format!("unexpected character `{c}`"))
    }

    fn expected_compound(&self) -> QueryError {
        self.syntax("expected a compound selector")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(input: &str) -> SelectorGroup {
        let mut groups = parse_selector_list(input).unwrap();
        assert_eq!(groups.len(), 1, "expected one group for `{input}`");
        groups.remove(0)
    }

    #[test]
    fn parses_type_selector() {
        let group = single("div");
        assert_eq!(group.steps.len(), 1);
        assert_eq!(
            group.steps[0].compound.parts,
            vec![SimpleSelector::Type("div".to_string())]
        );
    }

    #[test]
    fn parses_compound_selector_in_any_order() {
        let group = single("li.item#x[data-kind=\"row\"]:first-child");
        let parts = &group.steps[0].compound.parts;
        assert_eq!(parts.len(), 5);
        assert!(parts.contains(&SimpleSelector::Type("li".to_string())));
        assert!(parts.contains(&SimpleSelector::Class("item".to_string())));
        assert!(parts.contains(&SimpleSelector::Id("x".to_string())));
        assert!(parts.contains(&SimpleSelector::Pseudo(PseudoClass::FirstChild)));
    }

    #[test]
    fn whitespace_is_descendant_combinator() {
        let group = single("ul  li");
        assert_eq!(group.steps.len(), 2);
        assert_eq!(group.steps[1].combinator, Combinator::Descendant);
    }

    #[test]
    fn explicit_combinators_eat_surrounding_whitespace() {
        for (input, combinator) in [
            ("ul>li", Combinator::Child),
            ("ul > li", Combinator::Child),
            ("li + li", Combinator::AdjacentSibling),
            ("li ~ li", Combinator::GeneralSibling),
        ] {
            let group = single(input);
            assert_eq!(group.steps.len(), 2, "for `{input}`");
            assert_eq!(group.steps[1].combinator, combinator, "for `{input}`");
        }
    }

    #[test]
    fn parses_comma_list_preserving_order() {
        let groups = parse_selector_list("a, b.c , #d").unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].to_string(), "a");
        assert_eq!(groups[1].to_string(), "b.c");
        assert_eq!(groups[2].to_string(), "#d");
    }

    #[test]
    fn parses_attribute_forms() {
        let group = single("[href][rel=nofollow][class~='wide'][src^=\"http\"]");
        let parts = &group.steps[0].compound.parts;
        let operators: Vec<AttrOperator> = parts
            .iter()
            .map(|part| match part {
                SimpleSelector::Attribute(attr) => attr.operator,
                other => panic!("expected attribute selector, got {other:?}"),
            })
            .collect();
        assert_eq!(
            operators,
            vec![
                AttrOperator::Exists,
                AttrOperator::Equals,
                AttrOperator::Includes,
                AttrOperator::Prefix,
            ]
        );
    }

    #[test]
    fn parses_nth_child_arguments() {
        assert_eq!(
            single("li:nth-child(3)").steps[0].compound.parts,
            vec![
                SimpleSelector::Type("li".to_string()),
                SimpleSelector::Pseudo(PseudoClass::NthChild(NthArg::Index(3))),
            ]
        );
        assert!(matches!(
            single("li:nth-child(odd)").steps[0].compound.parts[1],
            SimpleSelector::Pseudo(PseudoClass::NthChild(NthArg::Odd))
        ));
        assert!(matches!(
            single("li:nth-child(EVEN)").steps[0].compound.parts[1],
            SimpleSelector::Pseudo(PseudoClass::NthChild(NthArg::Even))
        ));
    }

    #[test]
    fn rejects_unclosed_attribute_bracket() {
        assert!(matches!(
            parse_selector_list("li["),
            Err(QueryError::Syntax { .. })
        ));
        assert!(matches!(
            parse_selector_list("li[href"),
            Err(QueryError::Syntax { .. })
        ));
        assert!(matches!(
            parse_selector_list("a[href=\"x]"),
            Err(QueryError::Syntax { .. })
        ));
    }

    #[test]
    fn rejects_unknown_pseudo_class_at_parse_time() {
        match parse_selector_list("a:hover") {
            Err(QueryError::UnsupportedPseudoClass { name }) => assert_eq!(name, "hover"),
            other => panic!("expected UnsupportedPseudoClass, got {other:?}"),
        }
    }

    #[test]
    fn rejects_pseudo_elements() {
        assert!(matches!(
            parse_selector_list("p::before"),
            Err(QueryError::Syntax { .. })
        ));
    }

    #[test]
    fn rejects_empty_compounds() {
        for input in ["", "   ", ",a", "a,,b", "a >", "a > > b", "> a", "a !"] {
            assert!(
                parse_selector_list(input).is_err(),
                "`{input}` should not parse"
            );
        }
    }

    #[test]
    fn rejects_bad_nth_child_arguments() {
        for input in ["li:nth-child(0)", "li:nth-child(-1)", "li:nth-child(2n+1)", "li:nth-child()"] {
            assert!(matches!(
                parse_selector_list(input),
                Err(QueryError::Syntax { .. })
            ), "`{input}` should be a syntax error");
        }
    }
}
