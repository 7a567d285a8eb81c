//! Node lookup by token index.
//!
//! A top-down search: rowan can walk to parents, but the lookup only ever
//! needs to descend from the root, so it never does.

use rowan::NodeOrToken;

use crate::parser::{SyntaxElement, SyntaxNode, TokenStream};

/// Deepest element whose token span contains the token at `target`.
///
/// A token matches when its stream index is `target`. A node matches when
/// its first and last token indices enclose `target`; a node without tokens
/// has no determinable span and is searched anyway. Among matching children
/// the last one wins, except that a child with an undeterminable span never
/// replaces a real match. If no child matches, the node itself is returned.
pub fn locate(element: &SyntaxElement, tokens: &TokenStream, target: usize) -> Option<SyntaxElement> {
    locate_inner(element, tokens, target).map(|found| found.element)
}

struct Located {
    element: SyntaxElement,
    determinate: bool,
}

fn locate_inner(element: &SyntaxElement, tokens: &TokenStream, target: usize) -> Option<Located> {
    match element {
        NodeOrToken::Token(token) => {
            (tokens.index_of(token) == Some(target)).then(|| Located {
                element: element.clone(),
                determinate: true,
            })
        }
        NodeOrToken::Node(node) => {
            let determinate = match node_span(node, tokens) {
                Some((start, stop)) if start <= target && target <= stop => true,
                Some(_) => return None,
                None => false,
            };

            let mut best: Option<Located> = None;
            for child in node.children_with_tokens() {
                let Some(found) = locate_inner(&child, tokens, target) else {
                    continue;
                };
                let replaces = match &best {
                    None => true,
                    Some(current) => found.determinate || !current.determinate,
                };
                if replaces {
                    best = Some(found);
                }
            }

            Some(best.unwrap_or(Located {
                element: element.clone(),
                determinate,
            }))
        }
    }
}

/// First and last token index of a node, `None` when it has no tokens.
fn node_span(node: &SyntaxNode, tokens: &TokenStream) -> Option<(usize, usize)> {
    let start = tokens.index_of(&node.first_token()?)?;
    let stop = tokens.index_of(&node.last_token()?)?;
    Some((start, stop))
}
