//! End-to-end tests over the handler: build a document, query it,
//! generate selectors, mutate and export.

use dom::{DomError, DomHandler, OutputMode};
use serde_json::json;

fn list_document() -> DomHandler {
    // <ul><li>A</li><li id="x">B</li></ul>
    DomHandler::from_json(&json!({
        "tag": "ul",
        "children": [
            { "tag": "li", "children": [ { "text": "A" } ] },
            { "tag": "li", "attrs": { "id": "x" }, "children": [ { "text": "B" } ] }
        ]
    }))
    .unwrap()
}

#[test]
fn tag_query_finds_both_items() {
    let handler = list_document();
    let items = handler.query_selector_all("li", None).unwrap();
    assert_eq!(items.len(), 2);

    let texts: Vec<String> = items
        .iter()
        .map(|&li| dom::utils::text_content(handler.arena(), li).unwrap())
        .collect();
    assert_eq!(texts, vec!["A", "B"]);
}

#[test]
fn id_query_finds_the_second_item() {
    let handler = list_document();
    let found = handler.query_selector("#x", None).unwrap().unwrap();
    assert_eq!(
        dom::utils::text_content(handler.arena(), found).unwrap(),
        "B"
    );
}

#[test]
fn generated_selector_round_trips_through_the_query() {
    let handler = list_document();
    let li_b = handler.query_selector("#x", None).unwrap().unwrap();

    let selector = handler.node_css_selector(li_b).unwrap();
    assert!(selector.ends_with("#x"), "got `{selector}`");
    assert_eq!(
        handler.query_selector(&selector, None).unwrap(),
        Some(li_b)
    );
}

#[test]
fn nth_child_narrows_to_one_item() {
    let handler = list_document();
    let matches = handler
        .query_selector_all("ul > li:nth-child(2)", None)
        .unwrap();
    let li_b = handler.query_selector("#x", None).unwrap().unwrap();
    assert_eq!(matches, vec![li_b]);
}

#[test]
fn relative_selector_usage_pattern() {
    // The documented caller pattern: take a generated selector, strip
    // the outermost and innermost segments, and re-query relative to
    // a narrower context.
    let handler = DomHandler::from_json(&json!({
        "tag": "main",
        "children": [ {
            "tag": "section",
            "children": [
                { "tag": "p", "children": [ { "text": "one" } ] },
                { "tag": "p", "children": [ { "text": "two" } ] }
            ]
        } ]
    }))
    .unwrap();

    let p2 = handler.query_selector_all("p", None).unwrap()[1];
    let selector = handler.node_css_selector(p2).unwrap();
    let mut parts: Vec<&str> = selector.split(" > ").collect();
    assert!(parts.len() >= 3);
    parts.pop();
    parts.remove(0);
    let inner = parts.join(" > ");

    // `section:nth-child(1)` still matches from the root context.
    let section = handler.query_selector(&inner, None).unwrap().unwrap();
    assert_eq!(
        handler.arena().get(section).unwrap().node_name,
        "section"
    );
}

#[test]
fn malformed_selectors_fail_whole() {
    let handler = list_document();
    assert!(matches!(
        handler.query_selector_all("li[", None),
        Err(DomError::Query(query::QueryError::Syntax { .. }))
    ));
    assert!(matches!(
        handler.query_selector_all("li:hover", None),
        Err(DomError::Query(query::QueryError::UnsupportedPseudoClass { .. }))
    ));
}

#[test]
fn mutation_then_export_in_both_modes() {
    let mut handler = DomHandler::from_json(&json!({
        "tag": "div",
        "children": [ {
            "tag": "a",
            "attrs": { "href": "/a b" },
            "children": [ { "text": "x & y" } ]
        } ]
    }))
    .unwrap();

    let link = handler.query_selector("a", None).unwrap().unwrap();
    handler
        .arena_mut()
        .set_attribute(link, "href", "/c d")
        .unwrap();

    let encoded = handler.html().unwrap();
    let exact = handler.html_exact().unwrap();

    // The mutation is visible identically in both modes; only the
    // rendering differs.
    assert!(encoded.contains("href=\"/c%20d\""));
    assert!(encoded.contains("x &amp; y"));
    assert!(exact.contains("href=\"/c d\""));
    assert!(exact.contains("x & y"));
}

#[test]
fn inner_and_outer_html() {
    let handler = list_document();
    let li_b = handler.query_selector("#x", None).unwrap().unwrap();
    assert_eq!(handler.inner_html(li_b).unwrap(), "B");
    assert_eq!(handler.outer_html(li_b).unwrap(), "<li id=\"x\">B</li>");
}

#[test]
fn removed_nodes_disappear_from_queries_and_raise_on_generation() {
    let mut handler = list_document();
    let li_b = handler.query_selector("#x", None).unwrap().unwrap();

    handler.remove_node(li_b).unwrap();
    assert!(handler.query_selector_all("#x", None).unwrap().is_empty());
    assert_eq!(handler.query_selector_all("li", None).unwrap().len(), 1);
    assert!(matches!(
        handler.node_css_selector(li_b),
        Err(DomError::Query(query::QueryError::DetachedNode))
    ));
}

#[test]
fn serializer_modes_share_one_tree() {
    let handler = list_document();
    let root = handler.root_id().unwrap();
    let encoded = dom::MarkupSerializer::new(OutputMode::Encoded)
        .serialize(handler.arena(), root)
        .unwrap();
    let exact = dom::MarkupSerializer::new(OutputMode::Exact)
        .serialize(handler.arena(), root)
        .unwrap();
    // Nothing here needs encoding, so the outputs agree.
    assert_eq!(encoded, exact);
    assert_eq!(exact, "<ul><li>A</li><li id=\"x\">B</li></ul>");
}

#[test]
fn html_detection_gate() {
    assert!(dom::utils::looks_like_html("<ul><li>A</li></ul>"));
    assert!(!dom::utils::looks_like_html("A plain sentence, 1 < 2."));
}
