//! Grammar for DRLX compilation units
//!
//! This module contains the parsing logic organized by construct:
//! - `declarations` - Compilation unit, imports, classes, members, annotations
//! - `rules` - DRLX rule declarations (patterns, OOPaths, consequences)
//! - `statements` - Java block statements used in consequences and method bodies
//! - `expressions` - Java expression precedence chain
//! - `types` - Type references, type arguments and type parameters
//!
//! The parsing functions are generic over [`DrlxParser`] so they can be driven
//! by the tree-building parser and by the candidate collector, which replays
//! the same grammar over the tokens before the caret.

mod declarations;
mod expressions;
mod rules;
mod statements;
mod types;

use crate::base::constants::MAX_NESTING;
pub(crate) use crate::parser::syntax_kind::SyntaxKind;

pub use declarations::parse_source_file;
pub use expressions::parse_expression;
pub use statements::parse_block;

/// A set of syntax kinds, stored as a 256-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet([u64; 4]);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet([0; 4]);

    pub const fn new(kinds: &[SyntaxKind]) -> TokenSet {
        let mut bits = [0u64; 4];
        let mut i = 0;
        while i < kinds.len() {
            let raw = kinds[i] as u16 as usize;
            bits[raw / 64] |= 1u64 << (raw % 64);
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet([
            self.0[0] | other.0[0],
            self.0[1] | other.0[1],
            self.0[2] | other.0[2],
            self.0[3] | other.0[3],
        ])
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let raw = kind as u16 as usize;
        self.0[raw / 64] & (1u64 << (raw % 64)) != 0
    }

    pub fn insert(&mut self, kind: SyntaxKind) {
        let raw = kind as u16 as usize;
        self.0[raw / 64] |= 1u64 << (raw % 64);
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|word| *word == 0)
    }

    /// Members in discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = SyntaxKind> + '_ {
        (0..256u16)
            .filter(|raw| self.0[*raw as usize / 64] & (1u64 << (raw % 64)) != 0)
            .filter_map(SyntaxKind::from_u16)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<SyntaxKind> for TokenSet {
    fn from_iter<I: IntoIterator<Item = SyntaxKind>>(iter: I) -> Self {
        let mut set = TokenSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

pub const MODIFIER_KEYWORDS: TokenSet = TokenSet::new(&[
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::STATIC_KW,
    SyntaxKind::ABSTRACT_KW,
    SyntaxKind::FINAL_KW,
    SyntaxKind::NATIVE_KW,
    SyntaxKind::SYNCHRONIZED_KW,
    SyntaxKind::TRANSIENT_KW,
    SyntaxKind::VOLATILE_KW,
    SyntaxKind::STRICTFP_KW,
    SyntaxKind::DEFAULT_KW,
]);

pub const PRIMITIVE_TYPES: TokenSet = TokenSet::new(&[
    SyntaxKind::BOOLEAN_KW,
    SyntaxKind::BYTE_KW,
    SyntaxKind::SHORT_KW,
    SyntaxKind::INT_KW,
    SyntaxKind::LONG_KW,
    SyntaxKind::CHAR_KW,
    SyntaxKind::FLOAT_KW,
    SyntaxKind::DOUBLE_KW,
]);

pub const LITERALS: TokenSet = TokenSet::new(&[
    SyntaxKind::INTEGER_LITERAL,
    SyntaxKind::FLOAT_LITERAL,
    SyntaxKind::BIG_DECIMAL_LITERAL,
    SyntaxKind::BIG_INTEGER_LITERAL,
    SyntaxKind::CHAR_LITERAL,
    SyntaxKind::STRING_LITERAL,
    SyntaxKind::TEXT_BLOCK,
    SyntaxKind::TRUE_KW,
    SyntaxKind::FALSE_KW,
    SyntaxKind::NULL_KW,
]);

pub const ASSIGNMENT_OPS: TokenSet = TokenSet::new(&[
    SyntaxKind::EQ,
    SyntaxKind::PLUS_EQ,
    SyntaxKind::MINUS_EQ,
    SyntaxKind::STAR_EQ,
    SyntaxKind::SLASH_EQ,
    SyntaxKind::AMP_EQ,
    SyntaxKind::PIPE_EQ,
    SyntaxKind::CARET_EQ,
    SyntaxKind::PERCENT_EQ,
    SyntaxKind::LT_LT_EQ,
    SyntaxKind::GT_GT_EQ,
    SyntaxKind::GT_GT_GT_EQ,
]);

/// Tokens that are never offered as keyword completions: trivia, literals,
/// punctuation, operators, identifiers and end of input.
pub const IGNORED_TOKENS: TokenSet = TokenSet::new(&[
    SyntaxKind::WHITESPACE,
    SyntaxKind::LINE_COMMENT,
    SyntaxKind::BLOCK_COMMENT,
    SyntaxKind::IDENT,
    SyntaxKind::L_PAREN,
    SyntaxKind::R_PAREN,
    SyntaxKind::L_BRACE,
    SyntaxKind::R_BRACE,
    SyntaxKind::L_BRACKET,
    SyntaxKind::R_BRACKET,
    SyntaxKind::SEMICOLON,
    SyntaxKind::COMMA,
    SyntaxKind::DOT,
    SyntaxKind::ELLIPSIS,
    SyntaxKind::AT,
    SyntaxKind::COLON_COLON,
    SyntaxKind::EQ,
    SyntaxKind::GT,
    SyntaxKind::LT,
    SyntaxKind::BANG,
    SyntaxKind::TILDE,
    SyntaxKind::QUESTION,
    SyntaxKind::COLON,
    SyntaxKind::ARROW,
    SyntaxKind::EQ_EQ,
    SyntaxKind::LT_EQ,
    SyntaxKind::GT_EQ,
    SyntaxKind::BANG_EQ,
    SyntaxKind::AMP_AMP,
    SyntaxKind::PIPE_PIPE,
    SyntaxKind::PLUS_PLUS,
    SyntaxKind::MINUS_MINUS,
    SyntaxKind::PLUS,
    SyntaxKind::MINUS,
    SyntaxKind::STAR,
    SyntaxKind::SLASH,
    SyntaxKind::AMP,
    SyntaxKind::PIPE,
    SyntaxKind::CARET,
    SyntaxKind::PERCENT,
    SyntaxKind::LT_LT,
    SyntaxKind::GT_GT,
    SyntaxKind::GT_GT_GT,
])
.union(ASSIGNMENT_OPS)
.union(LITERALS)
.union(TokenSet::new(&[SyntaxKind::EOF, SyntaxKind::ERROR]));

/// Trait for grammar-driving operations
///
/// Trivia is invisible to the grammar: `current_kind`, `nth` and the `at*`
/// checks all look at significant tokens only, and implementations decide
/// where the skipped trivia ends up.
///
/// The `at*` checks take `&mut self` because they are also the points where
/// a candidate collector learns what the grammar would accept next.
pub trait DrlxParser {
    /// Position token for wrapping already-parsed children in a new node.
    type Marker: Copy;

    // Token inspection
    fn current_kind(&self) -> SyntaxKind;
    /// Kind of the nth significant token ahead, `EOF` past the end.
    fn nth(&self, n: usize) -> SyntaxKind;
    /// Whether the nth significant token starts where the one before it ends.
    fn nth_joined(&self, n: usize) -> bool;
    fn at(&mut self, kind: SyntaxKind) -> bool;
    fn at_set(&mut self, kinds: TokenSet) -> bool;
    /// Whether a declared name or member selector can start here.
    fn at_name(&mut self) -> bool;
    fn at_eof(&self) -> bool;

    // Position tracking
    fn get_pos(&self) -> usize;

    // Token consumption
    fn bump(&mut self);

    // Errors
    fn error(&mut self, message: String);

    // Recursion depth of nested constructs
    fn nesting(&self) -> usize;
    fn set_nesting(&mut self, nesting: usize);

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn finish_node(&mut self);
    fn checkpoint(&mut self) -> Self::Marker;
    fn start_node_at(&mut self, marker: Self::Marker, kind: SyntaxKind);

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {kind}"));
            false
        }
    }

    /// Report an error and skip tokens until one in `recovery` (or EOF).
    fn error_recover(&mut self, message: &str, recovery: TokenSet) {
        self.error(message.to_string());
        if self.at_eof() || recovery.contains(self.current_kind()) {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        while !self.at_eof() && !recovery.contains(self.current_kind()) {
            self.bump();
        }
        self.finish_node();
    }
}

/// Parse a name introduced by a declaration or selected by `.`
///
/// This is the identifier rule: it wraps the `IDENT` token in an
/// `IDENTIFIER` node so completion can tell name positions apart from
/// keyword positions.
pub(crate) fn parse_name<P: DrlxParser>(p: &mut P) -> bool {
    if !p.at_name() {
        p.error("expected identifier".to_string());
        return false;
    }
    p.start_node(SyntaxKind::IDENTIFIER);
    p.bump();
    p.finish_node();
    true
}

/// Parse a dotted name of plain identifiers: `a.b.c`
pub(crate) fn parse_qualified_name<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::QUALIFIED_NAME);
    if !p.at(SyntaxKind::IDENT) {
        p.error("expected qualified name".to_string());
        p.finish_node();
        return;
    }
    p.bump();
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.bump();
        p.bump();
    }
    p.finish_node();
}

const NESTING_OPEN: TokenSet =
    TokenSet::new(&[SyntaxKind::L_PAREN, SyntaxKind::L_BRACE, SyntaxKind::L_BRACKET]);
const NESTING_CLOSE: TokenSet =
    TokenSet::new(&[SyntaxKind::R_PAREN, SyntaxKind::R_BRACE, SyntaxKind::R_BRACKET]);

/// Enter one level of a recursive construct.
///
/// Past [`MAX_NESTING`] levels this reports an error, skips the rest of
/// the construct into an `ERROR` node and returns false. The skip stops
/// at end of input, or at a `;` or closing bracket that belongs to an
/// enclosing level. Every `true` must be paired with [`exit_nested`].
pub(crate) fn enter_nested<P: DrlxParser>(p: &mut P) -> bool {
    let nesting = p.nesting();
    if nesting < MAX_NESTING {
        p.set_nesting(nesting + 1);
        return true;
    }
    p.error("nesting too deep".to_string());
    p.start_node(SyntaxKind::ERROR);
    let mut depth = 0usize;
    loop {
        let kind = p.current_kind();
        if kind == SyntaxKind::EOF {
            break;
        }
        if NESTING_CLOSE.contains(kind) {
            if depth == 0 {
                break;
            }
            depth -= 1;
        } else if NESTING_OPEN.contains(kind) {
            depth += 1;
        } else if kind == SyntaxKind::SEMICOLON && depth == 0 {
            break;
        }
        p.bump();
    }
    p.finish_node();
    false
}

pub(crate) fn exit_nested<P: DrlxParser>(p: &mut P) {
    let nesting = p.nesting();
    p.set_nesting(nesting.saturating_sub(1));
}

/// Guard for loops: report and skip one token if the body made no progress.
pub(crate) fn ensure_progress<P: DrlxParser>(p: &mut P, before: usize, message: &str) {
    if p.get_pos() == before {
        p.error(message.to_string());
        p.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_set_membership() {
        let set = TokenSet::new(&[SyntaxKind::CLASS_KW, SyntaxKind::IDENTIFIER]);
        assert!(set.contains(SyntaxKind::CLASS_KW));
        assert!(set.contains(SyntaxKind::IDENTIFIER));
        assert!(!set.contains(SyntaxKind::RULE_KW));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![SyntaxKind::CLASS_KW, SyntaxKind::IDENTIFIER]
        );
    }

    #[test]
    fn ignored_tokens_keep_keywords() {
        assert!(IGNORED_TOKENS.contains(SyntaxKind::IDENT));
        assert!(IGNORED_TOKENS.contains(SyntaxKind::TRUE_KW));
        assert!(IGNORED_TOKENS.contains(SyntaxKind::EOF));
        assert!(!IGNORED_TOKENS.contains(SyntaxKind::RULE_KW));
        assert!(!IGNORED_TOKENS.contains(SyntaxKind::THIS_KW));
    }
}
