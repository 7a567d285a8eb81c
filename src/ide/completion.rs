//! Completion suggestions implementation.

use std::sync::Arc;

use indexmap::IndexSet;
use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::caret::token_index_at;
use super::classify::{CandidateContext, classify};
use super::options::CompletionOptions;
use super::semantic_completion::semantic_completions;
use crate::base::Position;
use crate::parser::{CandidateCollector, CandidateSet, GrammarCollector, Parse, parse};
use crate::semantic::{SymbolTableResolver, TypeResolver};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Keyword,
    /// The generic identifier placeholder.
    Text,
    Field,
    Method,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Keyword => 14,
            CompletionKind::Text => 1,
            CompletionKind::Field => 5,
            CompletionKind::Method => 2,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// Shown in the list.
    pub label: Arc<str>,
    /// The text to insert; same as the label.
    pub insert_text: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: None,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The generic identifier item.
    pub fn placeholder(options: &CompletionOptions) -> Self {
        Self::new(options.placeholder_label.as_str(), CompletionKind::Text)
    }
}

/// Insert texts of `items`, in order.
pub fn completion_item_strings(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| &*item.insert_text).collect()
}

/// One document and caret for [`CompletionEngine::complete_batch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    pub text: String,
    pub caret: Option<Position>,
}

impl CompletionRequest {
    pub fn new(text: impl Into<String>, caret: Option<Position>) -> Self {
        Self {
            text: text.into(),
            caret,
        }
    }
}

/// Computes completions from source text and a caret.
///
/// Holds no per-document state: every call parses its own text, so one
/// engine can serve concurrent requests.
pub struct CompletionEngine {
    options: CompletionOptions,
    collector: Box<dyn CandidateCollector>,
    resolver: Box<dyn TypeResolver>,
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new(CompletionOptions::default())
    }
}

impl CompletionEngine {
    /// Engine with the grammar collector and the built-in symbol table.
    pub fn new(options: CompletionOptions) -> Self {
        let collector = GrammarCollector::new().with_ignored_tokens(options.ignored_tokens);
        Self {
            options,
            collector: Box::new(collector),
            resolver: Box::new(SymbolTableResolver::default()),
        }
    }

    pub fn with_collector(mut self, collector: impl CandidateCollector + 'static) -> Self {
        self.collector = Box::new(collector);
        self
    }

    pub fn with_resolver(mut self, resolver: impl TypeResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    /// Completion items at `caret`; `None` means the start of the document.
    ///
    /// Never empty: when nothing better applies the placeholder is returned.
    pub fn complete(&self, text: &str, caret: Option<Position>) -> Vec<CompletionItem> {
        self.complete_with_cancel(text, caret, &CancellationToken::new())
    }

    /// Like [`complete`](Self::complete); a cancelled token stops member
    /// resolution and yields the placeholder for member access.
    pub fn complete_with_cancel(
        &self,
        text: &str,
        caret: Option<Position>,
        cancel: &CancellationToken,
    ) -> Vec<CompletionItem> {
        let parsed = parse(text);
        let index = token_index_at(parsed.tokens(), caret);
        debug!(?caret, index, errors = parsed.errors.len(), "completion request");
        self.complete_at(&parsed, index, cancel)
    }

    /// Completion items before token `caret` of an existing parse.
    pub fn complete_at(&self, parse: &Parse, caret: usize, cancel: &CancellationToken) -> Vec<CompletionItem> {
        let candidates = self.collector.collect(parse.tokens(), caret);
        debug!(
            tokens = ?candidates.tokens,
            rules = ?candidates.rules,
            "candidates at caret"
        );

        let context = classify(&candidates, &self.options.minor_identifier_rules);
        trace!(?context, "classified candidates");

        match context {
            CandidateContext::Keyword => self.keyword_items(&candidates),
            CandidateContext::MinorIdentifier => vec![CompletionItem::placeholder(&self.options)],
            CandidateContext::MajorIdentifier => {
                semantic_completions(&self.options, self.resolver.as_ref(), parse, caret, cancel)
            }
        }
    }

    /// Completes independent requests in parallel, results in request order.
    pub fn complete_batch(&self, requests: &[CompletionRequest]) -> Vec<Vec<CompletionItem>> {
        requests
            .par_iter()
            .map(|request| self.complete(&request.text, request.caret))
            .collect()
    }

    fn keyword_items(&self, candidates: &CandidateSet) -> Vec<CompletionItem> {
        let keywords: IndexSet<String> = candidates
            .tokens
            .iter()
            .filter(|kind| !self.options.ignored_tokens.contains(**kind))
            .map(|kind| kind.display_name().trim_matches('\'').to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        if keywords.is_empty() {
            return vec![CompletionItem::placeholder(&self.options)];
        }
        keywords
            .into_iter()
            .map(|keyword| CompletionItem::new(keyword, CompletionKind::Keyword))
            .collect()
    }
}

/// Completion items for `text` at `caret` with the default engine.
pub fn completions(text: &str, caret: Option<Position>) -> Vec<CompletionItem> {
    CompletionEngine::default().complete(text, caret)
}
