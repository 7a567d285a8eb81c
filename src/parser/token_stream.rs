//! Indexed token stream.
//!
//! Completion works in token indices rather than byte offsets. The stream
//! keeps every lexed token (trivia included), numbers them from 0 and ends
//! with a zero-width `EOF` sentinel, so the index one past the last real
//! token always exists.

use std::sync::Arc;

use text_size::{TextRange, TextSize};

use super::lexer::Lexer;
use super::syntax_kind::{SyntaxKind, SyntaxToken};
use crate::base::{LineIndex, Position};

/// A lexed token with its stream index and start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub index: usize,
    pub kind: SyntaxKind,
    pub range: TextRange,
    /// 0-based line and UTF-16 column of the first character.
    pub start: Position,
}

impl Token {
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

#[derive(Debug, Clone)]
pub struct TokenStream {
    text: Arc<str>,
    tokens: Vec<Token>,
    line_index: LineIndex,
}

impl TokenStream {
    pub fn lex(text: &str) -> Self {
        let text: Arc<str> = Arc::from(text);
        let line_index = LineIndex::new(&text);
        let mut tokens: Vec<Token> = Lexer::new(&text)
            .enumerate()
            .map(|(index, token)| Token {
                index,
                kind: token.kind,
                range: TextRange::at(token.offset, TextSize::of(token.text)),
                start: line_index.position(&text, token.offset),
            })
            .collect();

        let end = TextSize::of(&*text);
        tokens.push(Token {
            index: tokens.len(),
            kind: SyntaxKind::EOF,
            range: TextRange::empty(end),
            start: line_index.position(&text, end),
        });

        Self {
            text,
            tokens,
            line_index,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of tokens, including the trailing `EOF`.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false: the `EOF` sentinel is present even for empty input.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Index of the `EOF` sentinel.
    pub fn eof_index(&self) -> usize {
        self.tokens.len() - 1
    }

    pub fn token_text(&self, token: &Token) -> &str {
        &self.text[token.range]
    }

    pub fn position(&self, offset: TextSize) -> Position {
        self.line_index.position(&self.text, offset)
    }

    /// Index of the token starting at `offset`, if one does.
    pub fn index_at_offset(&self, offset: TextSize) -> Option<usize> {
        let real = &self.tokens[..self.eof_index()];
        real.binary_search_by(|token| token.range.start().cmp(&offset))
            .ok()
    }

    /// Stream index of a token taken from a syntax tree built over this stream.
    pub fn index_of(&self, token: &SyntaxToken) -> Option<usize> {
        self.index_at_offset(token.text_range().start())
    }

    /// Kinds of the non-trivia tokens strictly before `caret`.
    pub fn significant_kinds_before(&self, caret: usize) -> Vec<SyntaxKind> {
        self.significant_before(caret)
            .map(|token| token.kind)
            .collect()
    }

    /// Non-trivia tokens before token index `caret`.
    pub fn significant_before(&self, caret: usize) -> impl Iterator<Item = &Token> {
        self.tokens[..caret.min(self.eof_index())]
            .iter()
            .filter(|token| !token.is_trivia())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_only_eof() {
        let stream = TokenStream::lex("");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.tokens()[0].kind, SyntaxKind::EOF);
        assert_eq!(stream.tokens()[0].start, Position::new(0, 0));
    }

    #[test]
    fn tokens_carry_index_and_start() {
        let stream = TokenStream::lex("rule R1 {\n  var a");
        let kinds: Vec<_> = stream.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::RULE_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IDENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::L_BRACE,
                SyntaxKind::WHITESPACE,
                SyntaxKind::VAR_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IDENT,
                SyntaxKind::EOF,
            ]
        );
        assert!(stream.iter().enumerate().all(|(i, t)| t.index == i));
        assert_eq!(stream.tokens()[6].start, Position::new(1, 2));
        assert_eq!(stream.tokens()[9].start, Position::new(1, 7));
        assert_eq!(stream.token_text(&stream.tokens()[2]), "R1");
    }

    #[test]
    fn offset_lookup_hits_only_token_starts() {
        let stream = TokenStream::lex("a.b");
        assert_eq!(stream.index_at_offset(1.into()), Some(1));
        assert_eq!(stream.index_at_offset(3.into()), None);
    }

    #[test]
    fn significant_kinds_skip_trivia() {
        let stream = TokenStream::lex("System . out");
        assert_eq!(
            stream.significant_kinds_before(4),
            vec![SyntaxKind::IDENT, SyntaxKind::DOT]
        );
        assert_eq!(stream.significant_kinds_before(100).len(), 3);
    }
}
