//! Caret to token index resolution.

use crate::base::Position;
use crate::parser::TokenStream;

/// Token index the caret sits in front of.
///
/// Completion is evaluated as "insert before token i": the result is the
/// number of tokens that start strictly before the caret. Trivia tokens
/// count like any other token. A missing caret means the start of the
/// document.
pub fn token_index_at(tokens: &TokenStream, caret: Option<Position>) -> usize {
    let Some(caret) = caret else {
        return 0;
    };
    tokens
        .iter()
        .position(|token| token.start.is_at_or_after(caret))
        .unwrap_or(tokens.len())
}
