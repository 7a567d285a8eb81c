//! Laws that hold for every input.

use crate::helpers::completion_helpers::*;
use crate::helpers::source_fixtures::*;
use drlx::base::Position;
use drlx::ide::{CandidateContext, classify, locate, token_index_at};
use drlx::parser::{
    CandidateCollector, GrammarCollector, NodeOrToken, SyntaxElement, TokenStream, parse,
};
use rstest::rstest;

fn all_sources() -> Vec<&'static str> {
    let mut sources = vec![EMPTY, RULE_HEADER, SYSTEM_MEMBER_ACCESS, UNKNOWN_SCOPE];
    sources.extend_from_slice(WELL_FORMED);
    sources.extend_from_slice(MALFORMED);
    sources
}

// =============================================================================
// CARET RESOLUTION
// =============================================================================

#[test]
fn test_token_index_is_monotonic_in_column() {
    for text in all_sources() {
        let stream = TokenStream::lex(text);
        for (line, content) in text.split('\n').enumerate() {
            let mut previous = 0;
            for column in 0..=content.len() + 2 {
                let index = token_index_at(&stream, Some(Position::new(line, column)));
                assert!(index >= previous, "{text:?} line {line} column {column}");
                previous = index;
            }
        }
    }
}

#[test]
fn test_token_index_is_monotonic_in_line() {
    let text = ORDER_RULE;
    let stream = TokenStream::lex(text);
    let mut previous = 0;
    for line in 0..text.lines().count() + 2 {
        let index = token_index_at(&stream, Some(Position::new(line, 0)));
        assert!(index >= previous);
        previous = index;
    }
}

// =============================================================================
// NODE LOCATOR
// =============================================================================

#[test]
fn test_locator_finds_every_token() {
    for text in all_sources() {
        let parsed = parse(text);
        let tokens = parsed.tokens();
        let root: SyntaxElement = NodeOrToken::Node(parsed.syntax());
        for token in &tokens.tokens()[..tokens.eof_index()] {
            let found = locate(&root, tokens, token.index)
                .unwrap_or_else(|| panic!("token {} of {text:?} not found", token.index));
            assert!(found.text_range().contains_range(token.range));
            assert_eq!(found.into_token().map(|t| t.text_range()), Some(token.range));
        }
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

#[test]
fn test_classifier_is_keyword_without_identifier_rule() {
    let collector = GrammarCollector::new();
    for text in all_sources() {
        let stream = TokenStream::lex(text);
        for caret in 0..=stream.len() {
            let candidates = collector.collect(&stream, caret);
            let context = classify(&candidates, &[]);
            if candidates.identifier_path().is_none_or(|path| path.is_empty()) {
                assert_eq!(context, CandidateContext::Keyword);
            } else {
                assert_eq!(context, CandidateContext::MajorIdentifier);
            }
        }
    }
}

// =============================================================================
// FALLBACK TOTALITY AND DEDUP
// =============================================================================

#[rstest]
#[case(None)]
#[case(Some(Position::new(0, 0)))]
#[case(Some(Position::new(0, 3)))]
#[case(Some(Position::new(2, 7)))]
#[case(Some(Position::new(1000, 1000)))]
fn test_every_request_returns_items(#[case] caret: Option<Position>) {
    for text in all_sources() {
        let items = ENGINE.complete(text, caret);
        assert!(!items.is_empty(), "no items for {text:?} at {caret:?}");
        assert_no_duplicates(&labels(&items));
    }
}

#[test]
fn test_every_caret_of_every_source_is_answered() {
    for text in all_sources() {
        for (line, content) in text.split('\n').enumerate() {
            for column in 0..=content.len() {
                let labels = labels_at(text, line, column);
                assert!(!labels.is_empty());
                assert_no_duplicates(&labels);
            }
        }
    }
}
