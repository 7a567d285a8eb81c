//! Expression parsing
//!
//! This module implements the Java expression precedence chain:
//!
//! ```text
//! Expression → Lambda | Assignment
//! Assignment → Conditional (AssignOp Assignment)?
//! Conditional → ConditionalOr ('?' Expression ':' Conditional)?
//!     → ConditionalOr → ConditionalAnd → InclusiveOr → ExclusiveOr → And
//!     → Equality → Relational (with instanceof) → Shift → Additive
//!     → Multiplicative → Unary → Cast → Postfix → Primary
//! ```
//!
//! Binary levels wrap their left operand with `start_node_at`, so
//! `a.b.c` becomes `FIELD_ACCESS(FIELD_ACCESS(NAME_EXPR a, b), c)` and the
//! node ending at any token is the full expression up to that token.

use super::declarations::{parse_annotation, parse_class_body, parse_param};
use super::statements::parse_block;
use super::types::{parse_type, parse_type_args, type_then_name_at};
use super::*;

const PREFIX_OPS: TokenSet = TokenSet::new(&[
    SyntaxKind::PLUS,
    SyntaxKind::MINUS,
    SyntaxKind::PLUS_PLUS,
    SyntaxKind::MINUS_MINUS,
    SyntaxKind::BANG,
    SyntaxKind::TILDE,
]);

const CONDITIONAL_OR_OPS: TokenSet = TokenSet::new(&[SyntaxKind::PIPE_PIPE]);
const CONDITIONAL_AND_OPS: TokenSet = TokenSet::new(&[SyntaxKind::AMP_AMP]);
const INCLUSIVE_OR_OPS: TokenSet = TokenSet::new(&[SyntaxKind::PIPE]);
const EXCLUSIVE_OR_OPS: TokenSet = TokenSet::new(&[SyntaxKind::CARET]);
const AND_OPS: TokenSet = TokenSet::new(&[SyntaxKind::AMP]);
const EQUALITY_OPS: TokenSet = TokenSet::new(&[SyntaxKind::EQ_EQ, SyntaxKind::BANG_EQ]);
const RELATIONAL_OPS: TokenSet = TokenSet::new(&[
    SyntaxKind::LT,
    SyntaxKind::GT,
    SyntaxKind::LT_EQ,
    SyntaxKind::GT_EQ,
]);
const SHIFT_OPS: TokenSet = TokenSet::new(&[SyntaxKind::LT_LT]);
const ADDITIVE_OPS: TokenSet = TokenSet::new(&[SyntaxKind::PLUS, SyntaxKind::MINUS]);
const MULTIPLICATIVE_OPS: TokenSet =
    TokenSet::new(&[SyntaxKind::STAR, SyntaxKind::SLASH, SyntaxKind::PERCENT]);

/// Parse an expression, returning true if any tokens were consumed
pub fn parse_expression<P: DrlxParser>(p: &mut P) -> bool {
    let start_pos = p.get_pos();
    if enter_nested(p) {
        if at_lambda(p) {
            parse_lambda(p);
        } else {
            parse_assignment(p);
        }
        exit_nested(p);
    }
    p.get_pos() > start_pos
}

fn parse_assignment<P: DrlxParser>(p: &mut P) {
    let marker = p.checkpoint();
    parse_conditional(p);
    if p.at_set(ASSIGNMENT_OPS) {
        p.start_node_at(marker, SyntaxKind::ASSIGN_EXPR);
        p.bump();
        parse_expression(p);
        p.finish_node();
    }
}

fn parse_conditional<P: DrlxParser>(p: &mut P) {
    let marker = p.checkpoint();
    parse_conditional_or(p);
    if p.at(SyntaxKind::QUESTION) {
        p.start_node_at(marker, SyntaxKind::CONDITIONAL_EXPR);
        p.bump();
        parse_expression(p);
        p.expect(SyntaxKind::COLON);
        if at_lambda(p) {
            parse_lambda(p);
        } else {
            parse_conditional(p);
        }
        p.finish_node();
    }
}

/// One left-associative binary level
fn parse_binary_level<P: DrlxParser>(p: &mut P, ops: TokenSet, operand: fn(&mut P)) {
    let marker = p.checkpoint();
    operand(p);
    while p.at_set(ops) {
        p.start_node_at(marker, SyntaxKind::BINARY_EXPR);
        p.bump();
        operand(p);
        p.finish_node();
    }
}

fn parse_conditional_or<P: DrlxParser>(p: &mut P) {
    parse_binary_level(p, CONDITIONAL_OR_OPS, parse_conditional_and);
}

fn parse_conditional_and<P: DrlxParser>(p: &mut P) {
    parse_binary_level(p, CONDITIONAL_AND_OPS, parse_inclusive_or);
}

fn parse_inclusive_or<P: DrlxParser>(p: &mut P) {
    parse_binary_level(p, INCLUSIVE_OR_OPS, parse_exclusive_or);
}

fn parse_exclusive_or<P: DrlxParser>(p: &mut P) {
    parse_binary_level(p, EXCLUSIVE_OR_OPS, parse_and);
}

fn parse_and<P: DrlxParser>(p: &mut P) {
    parse_binary_level(p, AND_OPS, parse_equality);
}

fn parse_equality<P: DrlxParser>(p: &mut P) {
    parse_binary_level(p, EQUALITY_OPS, parse_relational);
}

/// Relational → Shift (RelOp Shift | 'instanceof' 'final'? Type Name?)*
fn parse_relational<P: DrlxParser>(p: &mut P) {
    let marker = p.checkpoint();
    parse_shift(p);
    loop {
        if p.at_set(RELATIONAL_OPS) {
            p.start_node_at(marker, SyntaxKind::BINARY_EXPR);
            p.bump();
            parse_shift(p);
            p.finish_node();
        } else if p.at(SyntaxKind::INSTANCEOF_KW) {
            p.start_node_at(marker, SyntaxKind::INSTANCEOF_EXPR);
            p.bump();
            p.eat(SyntaxKind::FINAL_KW);
            parse_type(p);
            if p.at_name() {
                parse_name(p);
            }
            p.finish_node();
        } else {
            break;
        }
    }
}

/// Shift → Additive (('<<' | '>' '>' | '>' '>' '>') Additive)*
///
/// `>` is always lexed singly so generic closers stay separate; a right
/// shift is two or three `>` tokens with nothing between them.
fn parse_shift<P: DrlxParser>(p: &mut P) {
    let marker = p.checkpoint();
    parse_additive(p);
    loop {
        let width = if p.at_set(SHIFT_OPS) { 1 } else { right_shift_width(p) };
        if width == 0 {
            break;
        }
        p.start_node_at(marker, SyntaxKind::BINARY_EXPR);
        for _ in 0..width {
            p.bump();
        }
        parse_additive(p);
        p.finish_node();
    }
}

/// Number of `>` tokens in a `>>` or `>>>` operator here, 0 if none.
fn right_shift_width<P: DrlxParser>(p: &P) -> usize {
    if p.nth(0) != SyntaxKind::GT || p.nth(1) != SyntaxKind::GT || !p.nth_joined(1) {
        return 0;
    }
    if p.nth(2) == SyntaxKind::GT && p.nth_joined(2) {
        3
    } else {
        2
    }
}

fn parse_additive<P: DrlxParser>(p: &mut P) {
    parse_binary_level(p, ADDITIVE_OPS, parse_multiplicative);
}

fn parse_multiplicative<P: DrlxParser>(p: &mut P) {
    parse_binary_level(p, MULTIPLICATIVE_OPS, parse_unary);
}

fn parse_unary<P: DrlxParser>(p: &mut P) {
    if p.at_set(PREFIX_OPS) {
        if !enter_nested(p) {
            return;
        }
        p.start_node(SyntaxKind::UNARY_EXPR);
        p.bump();
        parse_unary(p);
        p.finish_node();
        exit_nested(p);
    } else if at_cast(p) {
        if !enter_nested(p) {
            return;
        }
        p.start_node(SyntaxKind::CAST_EXPR);
        p.bump(); // (
        parse_type(p);
        while p.eat(SyntaxKind::AMP) {
            parse_type(p);
        }
        p.expect(SyntaxKind::R_PAREN);
        if at_lambda(p) {
            parse_lambda(p);
        } else {
            parse_unary(p);
        }
        p.finish_node();
        exit_nested(p);
    } else {
        parse_postfix(p);
    }
}

/// Cast lookahead: `(` Type `)` followed by something that can start an operand.
///
/// A primitive cast may precede any unary expression; a reference cast is
/// not followed by `+`/`-`, which would make it a parenthesized operand.
fn at_cast<P: DrlxParser>(p: &mut P) -> bool {
    if !p.at(SyntaxKind::L_PAREN) {
        return false;
    }
    let primitive = PRIMITIVE_TYPES.contains(p.nth(1));
    let Some(end) = type_end(p, 1) else {
        return false;
    };
    if p.nth(end) != SyntaxKind::R_PAREN {
        return false;
    }
    let next = p.nth(end + 1);
    if primitive {
        return next != SyntaxKind::EOF;
    }
    matches!(
        next,
        SyntaxKind::IDENT
            | SyntaxKind::L_PAREN
            | SyntaxKind::THIS_KW
            | SyntaxKind::SUPER_KW
            | SyntaxKind::NEW_KW
            | SyntaxKind::BANG
            | SyntaxKind::TILDE
    ) || LITERALS.contains(next)
}

/// Lookahead distance just past a type starting at `n`, if one parses there.
fn type_end<P: DrlxParser>(p: &P, n: usize) -> Option<usize> {
    let mut n = n;
    if PRIMITIVE_TYPES.contains(p.nth(n)) {
        n += 1;
    } else if p.nth(n) == SyntaxKind::IDENT {
        n += 1;
        let mut depth = 0usize;
        loop {
            match p.nth(n) {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT if depth > 0 => depth -= 1,
                SyntaxKind::DOT | SyntaxKind::IDENT => {}
                SyntaxKind::COMMA | SyntaxKind::QUESTION | SyntaxKind::EXTENDS_KW
                    if depth > 0 => {}
                kind if depth > 0 && PRIMITIVE_TYPES.contains(kind) => {}
                SyntaxKind::L_BRACKET | SyntaxKind::R_BRACKET => {}
                _ => break,
            }
            n += 1;
        }
        if depth != 0 {
            return None;
        }
    } else {
        return None;
    }
    while p.nth(n) == SyntaxKind::L_BRACKET && p.nth(n + 1) == SyntaxKind::R_BRACKET {
        n += 2;
    }
    Some(n)
}

/// Postfix → Primary Selector* ('++' | '--')*
/// Selector → '.' Name ArgList? | '.' 'this' | '.' 'class' | '[' Expression ']' | '::' Name
fn parse_postfix<P: DrlxParser>(p: &mut P) {
    let marker = p.checkpoint();
    if !parse_primary(p) {
        return;
    }
    loop {
        if p.at(SyntaxKind::DOT) {
            if p.nth(1) == SyntaxKind::CLASS_KW {
                p.start_node_at(marker, SyntaxKind::CLASS_LITERAL);
                p.bump();
                p.bump();
            } else if p.nth(1) == SyntaxKind::IDENT && p.nth(2) == SyntaxKind::L_PAREN {
                p.start_node_at(marker, SyntaxKind::METHOD_CALL);
                p.bump();
                parse_name(p);
                parse_arg_list(p);
            } else if p.nth(1) == SyntaxKind::NEW_KW {
                p.start_node_at(marker, SyntaxKind::NEW_EXPR);
                p.bump();
                parse_creator(p);
            } else {
                p.start_node_at(marker, SyntaxKind::FIELD_ACCESS);
                p.bump();
                if p.at(SyntaxKind::THIS_KW) {
                    p.bump();
                } else {
                    parse_name(p);
                }
            }
            p.finish_node();
        } else if p.at(SyntaxKind::L_BRACKET) {
            p.start_node_at(marker, SyntaxKind::ARRAY_ACCESS);
            p.bump();
            parse_expression(p);
            p.expect(SyntaxKind::R_BRACKET);
            p.finish_node();
        } else if p.at(SyntaxKind::COLON_COLON) {
            p.start_node_at(marker, SyntaxKind::METHOD_REF);
            p.bump();
            if !p.eat(SyntaxKind::NEW_KW) {
                parse_name(p);
            }
            p.finish_node();
        } else if p.at(SyntaxKind::PLUS_PLUS) || p.at(SyntaxKind::MINUS_MINUS) {
            p.start_node_at(marker, SyntaxKind::POSTFIX_EXPR);
            p.bump();
            p.finish_node();
        } else {
            break;
        }
    }
}

/// Primary → Literal | 'this' | 'super' | New | '(' Expression ')'
///         | PrimitiveType ('[' ']')* '.' 'class' | 'void' '.' 'class'
///         | IDENT ArgList? | IDENT
///
/// Returns false (after reporting) when no primary starts here.
fn parse_primary<P: DrlxParser>(p: &mut P) -> bool {
    if p.at_set(LITERALS) {
        p.start_node(SyntaxKind::LITERAL);
        p.bump();
        p.finish_node();
    } else if p.at(SyntaxKind::THIS_KW) {
        p.start_node(SyntaxKind::THIS_EXPR);
        p.bump();
        if p.at(SyntaxKind::L_PAREN) {
            parse_arg_list(p);
        }
        p.finish_node();
    } else if p.at(SyntaxKind::SUPER_KW) {
        p.start_node(SyntaxKind::SUPER_EXPR);
        p.bump();
        if p.at(SyntaxKind::L_PAREN) {
            parse_arg_list(p);
        }
        p.finish_node();
    } else if p.at(SyntaxKind::NEW_KW) {
        p.start_node(SyntaxKind::NEW_EXPR);
        parse_creator(p);
        p.finish_node();
    } else if p.at(SyntaxKind::L_PAREN) {
        p.start_node(SyntaxKind::PAREN_EXPR);
        p.bump();
        parse_expression(p);
        p.expect(SyntaxKind::R_PAREN);
        p.finish_node();
    } else if p.at_set(PRIMITIVE_TYPES) || p.at(SyntaxKind::VOID_KW) {
        p.start_node(SyntaxKind::CLASS_LITERAL);
        p.start_node(SyntaxKind::TYPE);
        p.bump();
        while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
            p.bump();
            p.bump();
        }
        p.finish_node();
        p.expect(SyntaxKind::DOT);
        p.expect(SyntaxKind::CLASS_KW);
        p.finish_node();
    } else if p.at(SyntaxKind::IDENT) {
        if p.nth(1) == SyntaxKind::L_PAREN {
            p.start_node(SyntaxKind::METHOD_CALL);
            p.bump();
            parse_arg_list(p);
        } else {
            p.start_node(SyntaxKind::NAME_EXPR);
            p.bump();
        }
        p.finish_node();
    } else {
        p.error("expected expression".to_string());
        return false;
    }
    true
}

/// Creator → TypeArgs? CreatedName (ArrayDims ArrayInitializer? | ArgList ClassBody?)
fn parse_creator<P: DrlxParser>(p: &mut P) {
    p.bump(); // new
    p.start_node(SyntaxKind::TYPE);
    if p.at_set(PRIMITIVE_TYPES) {
        p.bump();
    } else if p.at(SyntaxKind::IDENT) {
        p.bump();
        if p.at(SyntaxKind::LT) {
            parse_type_args(p);
        }
        while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
            p.bump();
            p.bump();
            if p.at(SyntaxKind::LT) {
                parse_type_args(p);
            }
        }
    } else {
        p.error("expected type after 'new'".to_string());
    }
    p.finish_node();

    if p.at(SyntaxKind::L_BRACKET) {
        while p.at(SyntaxKind::L_BRACKET) {
            p.bump();
            if !p.at(SyntaxKind::R_BRACKET) {
                parse_expression(p);
            }
            p.expect(SyntaxKind::R_BRACKET);
        }
        if p.at(SyntaxKind::L_BRACE) {
            parse_array_initializer(p);
        }
    } else if p.at(SyntaxKind::L_PAREN) {
        parse_arg_list(p);
        if p.at(SyntaxKind::L_BRACE) {
            parse_class_body(p);
        }
    } else {
        p.error("expected '(' or '['".to_string());
    }
}

/// ArgList → '(' (Expression (',' Expression)*)? ')'
pub(super) fn parse_arg_list<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARG_LIST);
    if p.expect(SyntaxKind::L_PAREN) {
        if !p.at(SyntaxKind::R_PAREN) {
            parse_expression(p);
            while p.eat(SyntaxKind::COMMA) {
                parse_expression(p);
            }
        }
        p.expect(SyntaxKind::R_PAREN);
    }
    p.finish_node();
}

/// ArrayInitializer → '{' (VariableInitializer (',' VariableInitializer)* ','?)? '}'
pub(super) fn parse_array_initializer<P: DrlxParser>(p: &mut P) {
    if !enter_nested(p) {
        return;
    }
    p.start_node(SyntaxKind::ARRAY_INITIALIZER);
    p.bump(); // {
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        let before = p.get_pos();
        if p.at(SyntaxKind::L_BRACE) {
            parse_array_initializer(p);
        } else {
            parse_expression(p);
        }
        if !p.eat(SyntaxKind::COMMA) {
            ensure_progress(p, before, "unexpected token in array initializer");
            break;
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
    exit_nested(p);
}

/// ElementValue → Annotation | ArrayInitializer | Expression
pub(super) fn parse_element_value<P: DrlxParser>(p: &mut P) {
    if p.at(SyntaxKind::AT) {
        if enter_nested(p) {
            parse_annotation(p);
            exit_nested(p);
        }
    } else if p.at(SyntaxKind::L_BRACE) {
        parse_array_initializer(p);
    } else {
        parse_expression(p);
    }
}

/// Lambda lookahead: `x ->`, `() ->`, `(a, b) ->` or `(Type a, Type b) ->`
fn at_lambda<P: DrlxParser>(p: &mut P) -> bool {
    if p.at(SyntaxKind::IDENT) {
        return p.nth(1) == SyntaxKind::ARROW;
    }
    if !p.at(SyntaxKind::L_PAREN) {
        return false;
    }
    let mut depth = 0usize;
    let mut n = 0;
    loop {
        match p.nth(n) {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => {
                depth -= 1;
                if depth == 0 {
                    return p.nth(n + 1) == SyntaxKind::ARROW;
                }
            }
            SyntaxKind::EOF | SyntaxKind::SEMICOLON | SyntaxKind::L_BRACE => return false,
            _ => {}
        }
        n += 1;
    }
}

/// Lambda → LambdaParams '->' (Block | Expression)
fn parse_lambda<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::LAMBDA_EXPR);
    p.start_node(SyntaxKind::LAMBDA_PARAMS);
    if p.at(SyntaxKind::L_PAREN) {
        p.bump();
        if !p.at(SyntaxKind::R_PAREN) {
            parse_lambda_param(p);
            while p.eat(SyntaxKind::COMMA) {
                parse_lambda_param(p);
            }
        }
        p.expect(SyntaxKind::R_PAREN);
    } else {
        p.start_node(SyntaxKind::PARAM);
        parse_name(p);
        p.finish_node();
    }
    p.finish_node();
    p.expect(SyntaxKind::ARROW);
    if p.at(SyntaxKind::L_BRACE) {
        parse_block(p);
    } else {
        parse_expression(p);
    }
    p.finish_node();
}

fn parse_lambda_param<P: DrlxParser>(p: &mut P) {
    if type_then_name_at(p, 0).is_some() || p.at(SyntaxKind::FINAL_KW) {
        parse_param(p);
    } else {
        p.start_node(SyntaxKind::PARAM);
        parse_name(p);
        p.finish_node();
    }
}
