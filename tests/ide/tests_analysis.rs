//! Document store tests.

use std::sync::Arc;
use std::thread;

use crate::helpers::completion_helpers::*;
use crate::helpers::source_fixtures::*;
use drlx::base::Position;
use drlx::ide::AnalysisHost;

#[test]
fn test_completions_follow_document_edits() {
    let host = AnalysisHost::new();
    let uri = "file:///rules/order.drlx";

    host.set_file_content(uri, RULE_HEADER);
    assert_eq!(labels(&host.completions(uri, Some(Position::new(0, 5)))), vec!["IDENTIFIER"]);

    host.set_file_content(uri, SYSTEM_MEMBER_ACCESS);
    let caret = Some(end_of(SYSTEM_MEMBER_ACCESS));
    assert_contains_all(&labels(&host.completions(uri, caret)), &["out", "gc"]);

    assert!(host.remove_file(uri));
    assert!(!host.has_file(uri));
    assert_contains_all(&labels(&host.completions(uri, caret)), &["class", "rule"]);
}

#[test]
fn test_diagnostics_for_malformed_documents() {
    let host = AnalysisHost::new();
    host.set_file_content("good.drlx", ORDER_RULE);
    host.set_file_content("bad.drlx", MALFORMED[1]);
    assert!(host.diagnostics("good.drlx").is_empty());
    let diagnostics = host.diagnostics("bad.drlx");
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| d.span.start <= d.span.end));
}

#[test]
fn test_concurrent_reads_and_writes() {
    let host = Arc::new(AnalysisHost::new());
    host.set_file_content("shared.drlx", SYSTEM_MEMBER_ACCESS);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let host = Arc::clone(&host);
            thread::spawn(move || {
                let caret = Some(end_of(SYSTEM_MEMBER_ACCESS));
                for _ in 0..10 {
                    let items = host.completions("shared.drlx", caret);
                    assert!(!items.is_empty());
                }
            })
        })
        .collect();

    for i in 0..10 {
        host.set_file_content(&format!("other{i}.drlx"), RULE_HEADER);
    }
    for reader in readers {
        reader.join().expect("reader thread");
    }
    assert_eq!(host.file_count(), 11);
}
