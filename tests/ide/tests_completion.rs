//! Keyword and placeholder completion through the public entry points.

use crate::helpers::completion_helpers::*;
use crate::helpers::source_fixtures::*;
use drlx::base::Position;
use drlx::ide::{CompletionKind, completions};
use rstest::rstest;

// =============================================================================
// KEYWORD CONTEXTS
// =============================================================================

#[test]
fn test_empty_file_offers_declaration_keywords() {
    let items = items_at(EMPTY, 0, 0);
    let labels = labels(&items);
    assert_contains_all(&labels, &["package", "import", "class", "interface", "enum", "rule"]);
    assert!(!labels.iter().any(|l| l == "IDENTIFIER"));
    assert!(items.iter().all(|item| item.kind == CompletionKind::Keyword));
    assert_no_duplicates(&labels);
}

#[test]
fn test_keywords_are_lowercase_without_quotes() {
    let labels = labels_at(EMPTY, 0, 0);
    for label in &labels {
        assert!(!label.contains('\''), "quoted keyword {label:?}");
        assert_eq!(label, &label.to_lowercase());
    }
}

#[test]
fn test_after_imports_offers_declarations() {
    let text = "package org.example;\nimport java.util.List;\n";
    let labels = labels_at(text, 2, 0);
    assert_contains_all(&labels, &["import", "class", "rule"]);
}

#[rstest]
#[case("rule R1 { do { ")]
#[case("rule R1 { do { int x = 1; ")]
#[case("rule R1 {\n  do {\n    System.out.println(1);\n    ")]
fn test_statement_start_offers_statement_keywords(#[case] text: &str) {
    let labels = labels_at_end(text);
    assert_contains_all(&labels, &["if", "for", "while", "return", "int", "var", "new", "this"]);
    assert!(!labels.iter().any(|l| l == "IDENTIFIER"));
}

#[test]
fn test_rule_body_offers_consequence_and_pattern_keywords() {
    let labels = labels_at_end("rule R1 { ");
    assert_contains_all(&labels, &["do", "var"]);
}

// =============================================================================
// NAME CONTEXTS
// =============================================================================

#[test]
fn test_rule_name_is_exactly_the_placeholder() {
    let items = items_at(RULE_HEADER, 0, 5);
    assert_eq!(labels(&items), vec!["IDENTIFIER"]);
    assert_eq!(items[0].kind, CompletionKind::Text);
}

#[rstest]
#[case("class ")]
#[case("rule R1 { var ")]
#[case("rule R1 { var a : /")]
#[case("rule R1 { Person ")]
#[case("class Foo { @")]
#[case("class Foo { @org.")]
fn test_name_positions_offer_the_placeholder(#[case] text: &str) {
    assert_eq!(labels_at_end(text), vec!["IDENTIFIER"]);
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

#[test]
fn test_free_function_matches_engine() {
    let caret = Some(Position::new(0, 5));
    assert_eq!(
        labels(&completions(RULE_HEADER, caret)),
        labels(&ENGINE.complete(RULE_HEADER, caret))
    );
}

#[test]
fn test_missing_caret_is_start_of_document() {
    let text = "rule R1 { do { System.";
    assert_eq!(labels(&completions(text, None)), labels_at(text, 0, 0));
}
