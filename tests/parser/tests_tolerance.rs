//! The parser never fails and never loses text.

use crate::helpers::completion_helpers::*;
use crate::helpers::source_fixtures::*;
use drlx::parser::{SyntaxKind, parse};
use rstest::rstest;

#[test]
fn test_well_formed_sources_parse_cleanly() {
    for text in WELL_FORMED {
        let parsed = parse(text);
        assert!(parsed.ok(), "{text:?}: {:?}", parsed.errors);
        assert_eq!(parsed.syntax().text().to_string(), *text);
    }
}

#[rstest]
#[case(MALFORMED[0])]
#[case(MALFORMED[1])]
#[case(MALFORMED[2])]
#[case(MALFORMED[3])]
#[case(MALFORMED[4])]
fn test_malformed_sources_are_lossless(#[case] text: &str) {
    let parsed = parse(text);
    assert!(!parsed.ok());
    assert_eq!(parsed.syntax().kind(), SyntaxKind::SOURCE_FILE);
    assert_eq!(parsed.syntax().text().to_string(), text);
}

#[test]
fn test_every_prefix_parses() {
    let text = ORDER_RULE;
    for end in (0..=text.len()).filter(|end| text.is_char_boundary(*end)) {
        let prefix = &text[..end];
        assert_eq!(parse(prefix).syntax().text().to_string(), prefix);
    }
}

#[rstest]
#[case("rule R { do { x = ", "(")]
#[case("rule R { do { x = ", "-")]
#[case("rule R { do { ", "{ ")]
#[case("rule R { do { ", "if (a) ")]
#[case("class A { java.util.List", "<java.util.List")]
fn test_deep_nesting_completes(#[case] head: &str, #[case] nested: &str) {
    let text = format!("{head}{}", nested.repeat(3000));
    let parsed = parse(&text);
    assert!(!parsed.ok());
    assert_eq!(parsed.syntax().text().to_string(), text);
    assert!(!items_at_end(&text).is_empty());
}
