//! AnalysisHost: open documents for an editor session.
//!
//! The host owns the text of every open document and a shared
//! [`CompletionEngine`]. Requests read a snapshot of the document text and
//! run without holding the lock, so one thread can update a document while
//! others complete.
//!
//! ## Usage
//!
//! ```ignore
//! let host = AnalysisHost::new();
//! host.set_file_content("file:///rules/order.drlx", "rule R { do { System.");
//! let items = host.completions("file:///rules/order.drlx", Some(Position::new(0, 21)));
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::completion::{CompletionEngine, CompletionItem};
use crate::base::{Position, Span};
use crate::parser::parse;

/// A syntax error in editor coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

/// Owns all open documents.
pub struct AnalysisHost {
    files: RwLock<FxHashMap<String, Arc<str>>>,
    engine: CompletionEngine,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost.
    pub fn new() -> Self {
        Self::with_engine(CompletionEngine::default())
    }

    pub fn with_engine(engine: CompletionEngine) -> Self {
        Self {
            files: RwLock::new(FxHashMap::default()),
            engine,
        }
    }

    pub fn engine(&self) -> &CompletionEngine {
        &self.engine
    }

    /// Open or replace a document.
    pub fn set_file_content(&self, uri: &str, content: &str) {
        debug!(uri, len = content.len(), "document updated");
        self.files.write().insert(uri.to_string(), Arc::from(content));
    }

    /// Close a document. Returns whether it was open.
    pub fn remove_file(&self, uri: &str) -> bool {
        debug!(uri, "document removed");
        self.files.write().remove(uri).is_some()
    }

    pub fn has_file(&self, uri: &str) -> bool {
        self.files.read().contains_key(uri)
    }

    pub fn file_count(&self) -> usize {
        self.files.read().len()
    }

    pub fn file_text(&self, uri: &str) -> Option<Arc<str>> {
        self.files.read().get(uri).cloned()
    }

    /// Completions in a document; an unknown document completes as empty.
    pub fn completions(&self, uri: &str, caret: Option<Position>) -> Vec<CompletionItem> {
        let text = self.file_text(uri).unwrap_or_else(|| Arc::from(""));
        self.engine.complete(&text, caret)
    }

    /// Syntax errors of a document; none for an unknown document.
    pub fn diagnostics(&self, uri: &str) -> Vec<Diagnostic> {
        let Some(text) = self.file_text(uri) else {
            return Vec::new();
        };
        let parsed = parse(&text);
        let tokens = parsed.tokens();
        parsed
            .errors
            .iter()
            .map(|error| Diagnostic {
                message: error.message.clone(),
                span: Span::new(
                    tokens.position(error.range.start()),
                    tokens.position(error.range.end()),
                ),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ide::completion_item_strings;

    #[test]
    fn documents_open_and_close() {
        let host = AnalysisHost::new();
        assert!(!host.has_file("a.drlx"));
        host.set_file_content("a.drlx", "rule R { }");
        host.set_file_content("b.drlx", "");
        assert!(host.has_file("a.drlx"));
        assert_eq!(host.file_count(), 2);
        assert!(host.remove_file("a.drlx"));
        assert!(!host.remove_file("a.drlx"));
        assert_eq!(host.file_count(), 1);
    }

    #[test]
    fn completes_the_latest_content() {
        let host = AnalysisHost::new();
        host.set_file_content("a.drlx", "rule ");
        let caret = Some(Position::new(0, 5));
        assert_eq!(completion_item_strings(&host.completions("a.drlx", caret)), vec!["IDENTIFIER"]);

        host.set_file_content("a.drlx", "");
        let items = host.completions("a.drlx", Some(Position::new(0, 0)));
        assert!(completion_item_strings(&items).contains(&"rule"));
    }

    #[test]
    fn unknown_document_completes_as_empty() {
        let host = AnalysisHost::new();
        let items = host.completions("missing.drlx", Some(Position::new(3, 4)));
        assert!(completion_item_strings(&items).contains(&"package"));
    }

    #[test]
    fn diagnostics_use_line_and_column() {
        let host = AnalysisHost::new();
        host.set_file_content("ok.drlx", "rule R { do { } }");
        assert!(host.diagnostics("ok.drlx").is_empty());

        host.set_file_content("bad.drlx", "rule R {\n  do { x = ; }\n}");
        let diagnostics = host.diagnostics("bad.drlx");
        assert!(!diagnostics.is_empty());
        assert!(diagnostics.iter().any(|d| d.span.start.line == 1));
        assert!(host.diagnostics("missing.drlx").is_empty());
    }
}
