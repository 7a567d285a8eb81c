//! Type references
//!
//! ```text
//! Type      → (PrimitiveType | ClassType) ('[' ']')*
//! ClassType → IDENT TypeArgs? ('.' IDENT TypeArgs?)*
//! TypeArgs  → '<' '>' | '<' TypeArg (',' TypeArg)* '>'
//! TypeArg   → '?' (('extends' | 'super') Type)? | Type
//! ```

use super::*;

/// Parse a type reference into a `TYPE` node
pub fn parse_type<P: DrlxParser>(p: &mut P) {
    if !enter_nested(p) {
        return;
    }
    p.start_node(SyntaxKind::TYPE);
    parse_type_head(p);
    while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
        p.bump();
        p.bump();
    }
    p.finish_node();
    exit_nested(p);
}

/// Parse a method return type: `void` or a type reference
pub fn parse_return_type<P: DrlxParser>(p: &mut P) {
    if p.at(SyntaxKind::VOID_KW) {
        p.start_node(SyntaxKind::TYPE);
        p.bump();
        p.finish_node();
    } else {
        parse_type(p);
    }
}

/// Primitive keyword or class type, without array dimensions
fn parse_type_head<P: DrlxParser>(p: &mut P) {
    if p.at_set(PRIMITIVE_TYPES) {
        p.bump();
        return;
    }
    if !p.at(SyntaxKind::IDENT) {
        p.error("expected type".to_string());
        return;
    }
    p.bump();
    if p.at(SyntaxKind::LT) {
        parse_type_args(p);
    }
    while p.at(SyntaxKind::DOT) {
        p.bump();
        if !p.at(SyntaxKind::IDENT) {
            p.error("expected type name after '.'".to_string());
            return;
        }
        p.bump();
        if p.at(SyntaxKind::LT) {
            parse_type_args(p);
        }
    }
}

pub fn parse_type_args<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::TYPE_ARGS);
    p.bump(); // <
    if !p.at(SyntaxKind::GT) {
        parse_type_arg(p);
        while p.eat(SyntaxKind::COMMA) {
            parse_type_arg(p);
        }
    }
    p.expect(SyntaxKind::GT);
    p.finish_node();
}

fn parse_type_arg<P: DrlxParser>(p: &mut P) {
    if p.at(SyntaxKind::QUESTION) {
        p.bump();
        if p.at(SyntaxKind::EXTENDS_KW) || p.at(SyntaxKind::SUPER_KW) {
            p.bump();
            parse_type(p);
        }
    } else {
        parse_type(p);
    }
}

/// TypeParams → '<' TypeParam (',' TypeParam)* '>'
/// TypeParam  → Name ('extends' Type ('&' Type)*)?
pub fn parse_type_params<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::TYPE_PARAMS);
    p.bump(); // <
    loop {
        p.start_node(SyntaxKind::TYPE_PARAM);
        parse_name(p);
        if p.eat(SyntaxKind::EXTENDS_KW) {
            parse_type(p);
            while p.eat(SyntaxKind::AMP) {
                parse_type(p);
            }
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::GT);
    p.finish_node();
}

/// Comma-separated type references (implements / throws lists)
pub fn parse_type_list<P: DrlxParser>(p: &mut P) {
    parse_type(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_type(p);
    }
}

/// Lookahead: does a `Type Name` pair start at the nth token?
///
/// Returns the lookahead distance of the name token when it does.
pub(super) fn type_then_name_at<P: DrlxParser>(p: &P, start: usize) -> Option<usize> {
    let mut n = start;
    if PRIMITIVE_TYPES.contains(p.nth(n)) {
        n += 1;
    } else {
        if p.nth(n) != SyntaxKind::IDENT {
            return None;
        }
        n += 1;
        loop {
            if p.nth(n) == SyntaxKind::LT {
                n = skip_type_args(p, n)?;
            }
            if p.nth(n) == SyntaxKind::DOT && p.nth(n + 1) == SyntaxKind::IDENT {
                n += 2;
            } else {
                break;
            }
        }
    }
    while p.nth(n) == SyntaxKind::L_BRACKET && p.nth(n + 1) == SyntaxKind::R_BRACKET {
        n += 2;
    }
    if p.nth(n) == SyntaxKind::ELLIPSIS {
        n += 1;
    }
    (p.nth(n) == SyntaxKind::IDENT).then_some(n)
}

/// Skip a balanced `<...>` starting at lookahead `n`, returning the distance past it.
fn skip_type_args<P: DrlxParser>(p: &P, mut n: usize) -> Option<usize> {
    let mut depth = 0usize;
    loop {
        match p.nth(n) {
            SyntaxKind::LT => depth += 1,
            SyntaxKind::GT => {
                depth -= 1;
                if depth == 0 {
                    return Some(n + 1);
                }
            }
            SyntaxKind::IDENT
            | SyntaxKind::DOT
            | SyntaxKind::COMMA
            | SyntaxKind::QUESTION
            | SyntaxKind::AMP
            | SyntaxKind::EXTENDS_KW
            | SyntaxKind::SUPER_KW
            | SyntaxKind::L_BRACKET
            | SyntaxKind::R_BRACKET => {}
            kind if PRIMITIVE_TYPES.contains(kind) => {}
            _ => return None,
        }
        n += 1;
    }
}
