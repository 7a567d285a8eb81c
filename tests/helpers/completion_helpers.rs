//! Completion request helpers.

use drlx::base::Position;
use drlx::ide::{CompletionEngine, CompletionItem, completion_item_strings};
use drlx::parser::TokenStream;
use once_cell::sync::Lazy;

/// One engine shared by every test; it holds no per-request state.
pub static ENGINE: Lazy<CompletionEngine> = Lazy::new(CompletionEngine::default);

/// Position of the end of `text`.
pub fn end_of(text: &str) -> Position {
    let stream = TokenStream::lex(text);
    stream.tokens()[stream.eof_index()].start
}

pub fn items_at(text: &str, line: usize, column: usize) -> Vec<CompletionItem> {
    ENGINE.complete(text, Some(Position::new(line, column)))
}

pub fn items_at_end(text: &str) -> Vec<CompletionItem> {
    ENGINE.complete(text, Some(end_of(text)))
}

pub fn labels(items: &[CompletionItem]) -> Vec<String> {
    completion_item_strings(items)
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn labels_at(text: &str, line: usize, column: usize) -> Vec<String> {
    labels(&items_at(text, line, column))
}

pub fn labels_at_end(text: &str) -> Vec<String> {
    labels(&items_at_end(text))
}

pub fn assert_contains_all(labels: &[String], expected: &[&str]) {
    for label in expected {
        assert!(
            labels.iter().any(|l| l == label),
            "expected {label:?} in {labels:?}"
        );
    }
}

pub fn assert_no_duplicates(labels: &[String]) {
    let mut sorted = labels.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), labels.len(), "duplicates in {labels:?}");
}
