//! Rowan-based parser for DRLX
//!
//! This module provides a lossless, error-tolerant parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The same grammar drives two consumers: the tree builder in `parser.rs`
//! and the candidate collector in `candidates.rs`.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → TokenStream (indexed tokens, EOF sentinel)
//!     ↓
//! grammar (generic over DrlxParser)
//!     ├─→ Parser → GreenNode tree → SyntaxNode (rowan)
//!     └─→ GrammarCollector → CandidateSet at the caret
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub mod candidates;
pub mod grammar;
mod lexer;
mod syntax_kind;
mod token_stream;

pub use candidates::{CandidateCollector, CandidateSet, GrammarCollector};
pub use grammar::{DrlxParser, IGNORED_TOKENS, TokenSet};
pub use lexer::{Lexer, Token as LexedToken, tokenize};
pub use parser::{Parse, SyntaxError, parse, parse_tokens};
pub use syntax_kind::{DrlxLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use token_stream::{Token, TokenStream};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, NodeOrToken, TextRange, TextSize};
