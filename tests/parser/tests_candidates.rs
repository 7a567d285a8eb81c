//! Candidate collection through the public API.

use drlx::parser::{CandidateCollector, GrammarCollector, SyntaxKind, TokenStream};
use rstest::rstest;

fn collect_at_end(text: &str) -> drlx::parser::CandidateSet {
    let stream = TokenStream::lex(text);
    GrammarCollector::new().collect(&stream, stream.eof_index())
}

#[rstest]
#[case("rule ", SyntaxKind::RULE_DECL)]
#[case("class ", SyntaxKind::CLASS_DECL)]
#[case("rule R { var ", SyntaxKind::RULE_PATTERN)]
#[case("rule R { var a : /", SyntaxKind::OOPATH_CHUNK)]
#[case("rule R { do { System.", SyntaxKind::FIELD_ACCESS)]
#[case("class Foo { @", SyntaxKind::ANNOTATION_NAME)]
fn test_identifier_rule_context(#[case] text: &str, #[case] innermost: SyntaxKind) {
    let candidates = collect_at_end(text);
    let path = candidates.identifier_path().expect("identifier rule reached");
    assert_eq!(path.first(), Some(&SyntaxKind::SOURCE_FILE));
    assert_eq!(path.last(), Some(&innermost));
}

#[rstest]
#[case("")]
#[case("package a.b;\n")]
#[case("rule R { do { ")]
#[case("rule R { do { x = 1; ")]
fn test_keyword_positions_have_no_identifier_rule(#[case] text: &str) {
    let candidates = collect_at_end(text);
    assert!(candidates.identifier_path().is_none());
    assert!(!candidates.tokens.is_empty());
}

#[test]
fn test_candidates_only_depend_on_tokens_before_the_caret() {
    let stream = TokenStream::lex("rule R { do { System.out.println(1); } }");
    let shorter = TokenStream::lex("rule R { do { ");
    let caret = shorter.eof_index();
    assert_eq!(
        GrammarCollector::new().collect(&stream, caret),
        GrammarCollector::new().collect(&shorter, caret)
    );
}
