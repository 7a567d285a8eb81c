//! Candidate collection
//!
//! Answers "what could come next at the caret?" by replaying the grammar
//! over the significant tokens before the caret. When the replay reaches
//! the caret, every token kind the grammar checks for is recorded as a
//! candidate token, and every attempt to parse a name records the stack of
//! open grammar nodes as a candidate rule path.

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use super::grammar::{self, DrlxParser, IGNORED_TOKENS, TokenSet};
use super::syntax_kind::SyntaxKind;
use super::token_stream::{Token, TokenStream};
use crate::base::constants::DEFAULT_STEP_BUDGET;

/// What the grammar accepts at the caret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    /// Token kinds the grammar checked for, in the order it checked them.
    pub tokens: IndexSet<SyntaxKind>,
    /// Preferred rule reached at the caret, mapped to the open node kinds
    /// (outermost first) when it was reached.
    pub rules: IndexMap<SyntaxKind, Vec<SyntaxKind>>,
}

impl CandidateSet {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.rules.is_empty()
    }

    /// Rule path recorded for the identifier rule, if it was reached.
    pub fn identifier_path(&self) -> Option<&[SyntaxKind]> {
        self.rules.get(&SyntaxKind::IDENTIFIER).map(Vec::as_slice)
    }
}

/// Computes the candidate set at a token index.
pub trait CandidateCollector: Send + Sync {
    /// `caret` is a token index into `tokens`; values past the end are
    /// treated as end of input.
    fn collect(&self, tokens: &TokenStream, caret: usize) -> CandidateSet;
}

/// Collector that replays the DRLX grammar up to the caret.
#[derive(Debug, Clone)]
pub struct GrammarCollector {
    preferred_rules: TokenSet,
    ignored_tokens: TokenSet,
    step_budget: usize,
}

impl Default for GrammarCollector {
    fn default() -> Self {
        Self {
            preferred_rules: TokenSet::new(&[SyntaxKind::IDENTIFIER]),
            ignored_tokens: IGNORED_TOKENS,
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }
}

impl GrammarCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignored_tokens(mut self, ignored: TokenSet) -> Self {
        self.ignored_tokens = ignored;
        self
    }

    /// Rules reported as rule candidates instead of by their tokens.
    pub fn with_preferred_rules(mut self, rules: TokenSet) -> Self {
        self.preferred_rules = rules;
        self
    }

    pub fn with_step_budget(mut self, budget: usize) -> Self {
        self.step_budget = budget;
        self
    }
}

impl CandidateCollector for GrammarCollector {
    fn collect(&self, tokens: &TokenStream, caret: usize) -> CandidateSet {
        let significant: Vec<Token> = tokens.significant_before(caret).copied().collect();
        let mut replay = Replay {
            tokens: &significant,
            pos: 0,
            nesting: 0,
            open_nodes: Vec::new(),
            candidates: CandidateSet::default(),
            frozen: false,
            steps: 0,
            collector: self,
        };
        grammar::parse_source_file(&mut replay);
        trace!(
            tokens = replay.candidates.tokens.len(),
            rules = replay.candidates.rules.len(),
            steps = replay.steps,
            "candidate replay finished"
        );
        replay.candidates
    }
}

/// Grammar driver over token kinds that stops at the caret.
///
/// Before the caret it behaves like the tree parser minus the tree. At the
/// caret, `at*` checks record candidates and answer false, so the grammar
/// keeps trying alternatives until it reports an error, consumes, or runs
/// out of step budget. Any of those freezes the replay; a frozen replay is
/// at end of input and records nothing more.
struct Replay<'a> {
    tokens: &'a [Token],
    pos: usize,
    nesting: usize,
    open_nodes: Vec<SyntaxKind>,
    candidates: CandidateSet,
    frozen: bool,
    steps: usize,
    collector: &'a GrammarCollector,
}

impl Replay<'_> {
    fn at_caret(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Count a check at the caret; false once recording is over.
    fn step(&mut self) -> bool {
        if self.frozen {
            return false;
        }
        self.steps += 1;
        if self.steps > self.collector.step_budget {
            self.frozen = true;
            return false;
        }
        true
    }

    fn record_token(&mut self, kind: SyntaxKind) {
        if !self.collector.ignored_tokens.contains(kind) {
            self.candidates.tokens.insert(kind);
        }
    }
}

impl DrlxParser for Replay<'_> {
    type Marker = ();

    fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map_or(SyntaxKind::EOF, |token| token.kind)
    }

    fn nth_joined(&self, n: usize) -> bool {
        let Some(prev) = n.checked_sub(1) else {
            return false;
        };
        match (self.tokens.get(self.pos + prev), self.tokens.get(self.pos + n)) {
            (Some(prev), Some(token)) => prev.range.end() == token.range.start(),
            _ => false,
        }
    }

    fn at(&mut self, kind: SyntaxKind) -> bool {
        if !self.at_caret() {
            return self.tokens[self.pos].kind == kind;
        }
        if self.step() {
            self.record_token(kind);
        }
        false
    }

    fn at_set(&mut self, kinds: TokenSet) -> bool {
        if !self.at_caret() {
            return kinds.contains(self.tokens[self.pos].kind);
        }
        if self.step() {
            for kind in kinds.iter() {
                self.record_token(kind);
            }
        }
        false
    }

    fn at_name(&mut self) -> bool {
        if !self.at_caret() {
            return self.tokens[self.pos].kind == SyntaxKind::IDENT;
        }
        if self.step() {
            if self.collector.preferred_rules.contains(SyntaxKind::IDENTIFIER) {
                // A later path to the same rule replaces an earlier one.
                self.candidates
                    .rules
                    .insert(SyntaxKind::IDENTIFIER, self.open_nodes.clone());
            } else {
                self.record_token(SyntaxKind::IDENT);
            }
        }
        false
    }

    fn at_eof(&self) -> bool {
        self.at_caret() && self.frozen
    }

    fn get_pos(&self) -> usize {
        self.pos
    }

    fn bump(&mut self) {
        if self.at_caret() {
            self.frozen = true;
        } else {
            self.pos += 1;
        }
    }

    fn error(&mut self, _message: String) {
        if self.at_caret() {
            self.frozen = true;
        }
    }

    fn nesting(&self) -> usize {
        self.nesting
    }

    fn set_nesting(&mut self, nesting: usize) {
        self.nesting = nesting;
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.open_nodes.push(kind);
    }

    fn finish_node(&mut self) {
        self.open_nodes.pop();
    }

    fn checkpoint(&mut self) {}

    fn start_node_at(&mut self, _marker: (), kind: SyntaxKind) {
        self.open_nodes.push(kind);
    }
}
