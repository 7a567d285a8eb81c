//! Recursive descent parser for DRLX
//!
//! Builds a rowan GreenNode tree from the token stream.
//! Supports error recovery and produces a lossless CST: every token except
//! the `EOF` sentinel ends up in the tree, in stream order.

use super::grammar::{self, DrlxParser, TokenSet};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use super::token_stream::{Token, TokenStream};
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use text_size::TextRange;

/// Parse result containing the green tree, the token stream it was built
/// from, and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
    tokens: TokenStream,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse DRLX source code into a CST
pub fn parse(input: &str) -> Parse {
    parse_tokens(TokenStream::lex(input))
}

/// Parse an already lexed token stream
pub fn parse_tokens(tokens: TokenStream) -> Parse {
    let (green, errors) = {
        let mut parser = Parser::new(&tokens);
        grammar::parse_source_file(&mut parser);
        parser.finish()
    };
    Parse {
        green,
        errors,
        tokens,
    }
}

/// The parser state
struct Parser<'a> {
    stream: &'a TokenStream,
    /// Real tokens (the stream without its `EOF` sentinel).
    tokens: &'a [Token],
    /// Indices of the non-trivia tokens, so lookahead is a slice lookup.
    significant: Vec<usize>,
    pos: usize,
    /// Number of significant tokens before `pos`.
    consumed: usize,
    /// Open nodes in the builder.
    depth: usize,
    nesting: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(stream: &'a TokenStream) -> Self {
        let tokens = &stream.tokens()[..stream.eof_index()];
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.is_trivia())
            .map(|(index, _)| index)
            .collect();
        Self {
            stream,
            tokens,
            significant,
            pos: 0,
            consumed: 0,
            depth: 0,
            nesting: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> (GreenNode, Vec<SyntaxError>) {
        (self.builder.finish(), self.errors)
    }

    /// Raw index of the nth significant token at or after `pos`.
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.significant.get(self.consumed + n).copied()
    }

    fn push_token(&mut self, token: Token) {
        let text = self.stream.token_text(&token);
        self.builder.token(token.kind.into(), text);
        if !token.is_trivia() {
            self.consumed += 1;
        }
    }

    /// Attach pending trivia to the innermost open node.
    fn flush_trivia(&mut self) {
        if self.depth == 0 {
            return;
        }
        while let Some(token) = self.tokens.get(self.pos).copied() {
            if !token.is_trivia() {
                break;
            }
            self.push_token(token);
            self.pos += 1;
        }
    }

    fn current_range(&self) -> TextRange {
        match self.nth_index(0) {
            Some(index) => self.tokens[index].range,
            None => self.stream.tokens()[self.stream.eof_index()].range,
        }
    }
}

impl DrlxParser for Parser<'_> {
    type Marker = Checkpoint;

    fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map(|index| self.tokens[index].kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    fn nth_joined(&self, n: usize) -> bool {
        match (n.checked_sub(1).and_then(|prev| self.nth_index(prev)), self.nth_index(n)) {
            (Some(prev), Some(index)) => {
                self.tokens[prev].range.end() == self.tokens[index].range.start()
            }
            _ => false,
        }
    }

    fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_set(&mut self, kinds: TokenSet) -> bool {
        kinds.contains(self.current_kind())
    }

    fn at_name(&mut self) -> bool {
        self.current_kind() == SyntaxKind::IDENT
    }

    fn at_eof(&self) -> bool {
        self.current_kind() == SyntaxKind::EOF
    }

    fn get_pos(&self) -> usize {
        self.nth_index(0).unwrap_or(self.tokens.len())
    }

    fn bump(&mut self) {
        self.flush_trivia();
        if let Some(token) = self.tokens.get(self.pos).copied() {
            self.push_token(token);
            self.pos += 1;
        }
    }

    fn error(&mut self, message: String) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range));
    }

    fn nesting(&self) -> usize {
        self.nesting
    }

    fn set_nesting(&mut self, nesting: usize) {
        self.nesting = nesting;
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
        self.depth += 1;
    }

    fn finish_node(&mut self) {
        if self.depth == 1 {
            // Closing the root: trailing trivia and anything left unparsed stays in the tree.
            while let Some(token) = self.tokens.get(self.pos).copied() {
                self.push_token(token);
                self.pos += 1;
            }
        }
        self.depth = self.depth.saturating_sub(1);
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, marker: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(marker, kind.into());
        self.depth += 1;
    }
}
