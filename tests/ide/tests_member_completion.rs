//! Member completion after `.`.

use crate::helpers::completion_helpers::*;
use crate::helpers::source_fixtures::*;
use drlx::base::Position;
use drlx::ide::{CompletionEngine, CompletionKind, CompletionOptions};
use rstest::rstest;
use tokio_util::sync::CancellationToken;

#[test]
fn test_system_members() {
    let labels = labels_at_end(SYSTEM_MEMBER_ACCESS);
    assert_contains_all(&labels, &["out", "in", "err", "gc", "currentTimeMillis"]);
    assert!(!labels.iter().any(|l| l == "IDENTIFIER"));
    assert_no_duplicates(&labels);
}

#[test]
fn test_system_members_at_explicit_caret() {
    // rule R1 {\n    do { System.|
    let labels = labels_at(SYSTEM_MEMBER_ACCESS, 1, 16);
    assert_contains_all(&labels, &["out", "gc"]);
}

#[test]
fn test_chained_field_access() {
    let labels = labels_at_end("rule R1 { do { System.out.");
    assert_contains_all(&labels, &["println", "print", "printf", "toString", "hashCode"]);
    assert_no_duplicates(&labels);
}

#[test]
fn test_unknown_scope_is_exactly_the_placeholder() {
    assert_eq!(labels_at_end(UNKNOWN_SCOPE), vec!["IDENTIFIER"]);
}

#[rstest]
#[case("rule R1 { do { String s = \"\"; s.", &["length", "charAt", "isEmpty", "empty", "bytes"])]
#[case("rule R1 { do { \"abc\".trim().", &["length", "toUpperCase"])]
#[case("rule R1 { do { var b = new StringBuilder(); b.", &["append", "toString"])]
#[case("rule R1 { do { Math.", &["PI", "max", "abs"])]
#[case("rule R1 { do { new StringBuilder().", &["append", "toString"])]
#[case("rule R1 { do { String é = \"😀\"; é.", &["length", "charAt"])]
#[case("rule R1 { do { long x = 8; String s = \"\" + (x >> 1 >>> 1); s.", &["length", "trim"])]
#[case("import java.util.ArrayList; rule R1 { do { ArrayList list = new ArrayList(); list.", &["size", "add", "get", "empty", "ensureCapacity"])]
#[case("rule R1 { do { String[] names = null; for (String n : names) { n.", &["length"])]
fn test_members_of_resolved_scope(#[case] text: &str, #[case] expected: &[&str]) {
    let labels = labels_at_end(text);
    assert_contains_all(&labels, expected);
    assert_no_duplicates(&labels);
}

#[test]
fn test_inaccessible_members_are_hidden() {
    let labels = labels_at_end(
        "import java.util.ArrayList; rule R1 { do { ArrayList list = new ArrayList(); list.",
    );
    assert!(!labels.iter().any(|l| l == "elementData"));
    let labels = labels_at_end("rule R1 { do { String s = \"\"; s.");
    assert!(!labels.iter().any(|l| l == "value"));
    assert!(!labels.iter().any(|l| l == "hash"));
}

#[test]
fn test_document_types_and_bindings() {
    let text = format!("{PERSON_MODEL}\nrule Adults {{\n    Person p : /persons,\n    do {{ p.");
    let labels = labels_at_end(&text);
    assert_contains_all(&labels, &["age", "children", "getName", "isAdult", "name", "adult"]);
    assert_no_duplicates(&labels);
}

#[test]
fn test_document_type_field_chain() {
    let text = format!("{PERSON_MODEL}\nrule Adults {{\n    Person p : /persons,\n    do {{ p.children.");
    let labels = labels_at_end(&text);
    assert_contains_all(&labels, &["size", "get", "stream"]);
}

#[test]
fn test_arrays_offer_length() {
    assert_eq!(labels_at_end("rule R1 { do { int[] xs = null; xs."), vec!["length"]);
}

#[rstest]
#[case("rule R1 { do { int n = 1; n.")]
#[case("rule R1 { do { (1 + 2).")]
#[case("rule R1 { do { System.nothing.")]
#[case("rule R1 { do { this.")]
fn test_no_members_is_the_placeholder(#[case] text: &str) {
    assert_eq!(labels_at_end(text), vec!["IDENTIFIER"]);
}

#[test]
fn test_member_kinds_and_details() {
    let items = items_at_end(SYSTEM_MEMBER_ACCESS);
    let out = items.iter().find(|i| &*i.label == "out").expect("out");
    assert_eq!(out.kind, CompletionKind::Field);
    assert_eq!(out.detail.as_deref(), Some("java.io.PrintStream"));
    let gc = items.iter().find(|i| &*i.label == "gc").expect("gc");
    assert_eq!(gc.kind, CompletionKind::Method);
    assert_eq!(gc.kind.to_lsp(), 2);
}

#[test]
fn test_cancelled_request_degrades_to_placeholder() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let items = ENGINE.complete_with_cancel(SYSTEM_MEMBER_ACCESS, Some(end_of(SYSTEM_MEMBER_ACCESS)), &cancel);
    assert_eq!(labels(&items), vec!["IDENTIFIER"]);
}

#[test]
fn test_custom_placeholder_label() {
    let engine = CompletionEngine::new(CompletionOptions::default().with_placeholder_label("<name>"));
    let items = engine.complete(UNKNOWN_SCOPE, Some(end_of(UNKNOWN_SCOPE)));
    assert_eq!(labels(&items), vec!["<name>"]);
    let items = engine.complete(RULE_HEADER, Some(Position::new(0, 5)));
    assert_eq!(labels(&items), vec!["<name>"]);
}
