//! Block statements
//!
//! ```text
//! Block          → '{' BlockStatement* '}'
//! BlockStatement → LocalVarDecl ';' | Statement
//! LocalVarDecl   → VariableModifiers ('var' | Type) VariableDeclarators
//! ```

use super::declarations::{parse_variable_declarators, parse_variable_modifiers};
use super::types::{parse_type, type_then_name_at};
use super::*;

const SWITCH_LABEL_RECOVERY: TokenSet = TokenSet::new(&[
    SyntaxKind::CASE_KW,
    SyntaxKind::DEFAULT_KW,
    SyntaxKind::R_BRACE,
    SyntaxKind::SEMICOLON,
]);

/// Block → '{' BlockStatement* '}'
pub fn parse_block<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::BLOCK);
    if p.expect(SyntaxKind::L_BRACE) {
        while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
            let before = p.get_pos();
            parse_block_statement(p);
            ensure_progress(p, before, "unexpected token in block");
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();
}

fn parse_block_statement<P: DrlxParser>(p: &mut P) {
    if at_local_var_decl(p) {
        p.start_node(SyntaxKind::LOCAL_VAR_DECL);
        parse_local_var_decl_rest(p);
        p.expect(SyntaxKind::SEMICOLON);
        p.finish_node();
    } else {
        parse_statement(p);
    }
}

/// Does a local variable declaration start here?
///
/// `var`, `final`, annotations and primitive types always start one; a
/// class type must be followed by a declared name.
fn at_local_var_decl<P: DrlxParser>(p: &mut P) -> bool {
    if p.at(SyntaxKind::VAR_KW)
        || p.at(SyntaxKind::FINAL_KW)
        || p.at(SyntaxKind::AT)
        || (p.at_set(PRIMITIVE_TYPES) && p.nth(1) != SyntaxKind::DOT)
    {
        return true;
    }
    p.at(SyntaxKind::IDENT) && type_then_name_at(p, 0).is_some()
}

/// Everything of a local variable declaration except the trailing ';'
fn parse_local_var_decl_rest<P: DrlxParser>(p: &mut P) {
    parse_variable_modifiers(p);
    if p.at(SyntaxKind::VAR_KW) {
        p.start_node(SyntaxKind::TYPE);
        p.bump();
        p.finish_node();
    } else {
        parse_type(p);
    }
    parse_variable_declarators(p);
}

pub(super) fn parse_statement<P: DrlxParser>(p: &mut P) {
    if enter_nested(p) {
        parse_statement_kind(p);
        exit_nested(p);
    }
}

fn parse_statement_kind<P: DrlxParser>(p: &mut P) {
    if p.at(SyntaxKind::L_BRACE) {
        parse_block(p);
    } else if p.at(SyntaxKind::SEMICOLON) {
        p.start_node(SyntaxKind::EMPTY_STMT);
        p.bump();
        p.finish_node();
    } else if p.at(SyntaxKind::IF_KW) {
        parse_if_stmt(p);
    } else if p.at(SyntaxKind::FOR_KW) {
        parse_for_stmt(p);
    } else if p.at(SyntaxKind::WHILE_KW) {
        parse_while_stmt(p);
    } else if p.at(SyntaxKind::DO_KW) {
        parse_do_while_stmt(p);
    } else if p.at(SyntaxKind::TRY_KW) {
        parse_try_stmt(p);
    } else if p.at(SyntaxKind::SWITCH_KW) {
        parse_switch_stmt(p);
    } else if p.at(SyntaxKind::RETURN_KW) {
        parse_simple_stmt(p, SyntaxKind::RETURN_STMT, true);
    } else if p.at(SyntaxKind::THROW_KW) {
        parse_simple_stmt(p, SyntaxKind::THROW_STMT, false);
    } else if p.at(SyntaxKind::BREAK_KW) {
        parse_jump_stmt(p, SyntaxKind::BREAK_STMT);
    } else if p.at(SyntaxKind::CONTINUE_KW) {
        parse_jump_stmt(p, SyntaxKind::CONTINUE_STMT);
    } else if p.at(SyntaxKind::ASSERT_KW) {
        parse_assert_stmt(p);
    } else if p.at(SyntaxKind::SYNCHRONIZED_KW) {
        p.start_node(SyntaxKind::SYNCHRONIZED_STMT);
        p.bump();
        parse_paren_condition(p);
        parse_block(p);
        p.finish_node();
    } else {
        p.start_node(SyntaxKind::EXPR_STMT);
        if parse_expression(p) {
            p.expect(SyntaxKind::SEMICOLON);
        }
        p.finish_node();
    }
}

fn parse_paren_condition<P: DrlxParser>(p: &mut P) {
    p.expect(SyntaxKind::L_PAREN);
    parse_expression(p);
    p.expect(SyntaxKind::R_PAREN);
}

/// IfStmt → 'if' '(' Expression ')' Statement ('else' Statement)?
fn parse_if_stmt<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::IF_STMT);
    p.bump(); // if
    parse_paren_condition(p);
    parse_statement(p);
    if p.eat(SyntaxKind::ELSE_KW) {
        parse_statement(p);
    }
    p.finish_node();
}

/// ForStmt → 'for' '(' ForInit? ';' Expression? ';' ExpressionList? ')' Statement
///         | 'for' '(' VariableModifiers Type Name ':' Expression ')' Statement
fn parse_for_stmt<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::FOR_STMT);
    p.bump(); // for
    if p.expect(SyntaxKind::L_PAREN) {
        if at_local_var_decl(p) {
            p.start_node(SyntaxKind::LOCAL_VAR_DECL);
            parse_local_var_decl_rest(p);
            p.finish_node();
        } else if !p.at(SyntaxKind::SEMICOLON) {
            parse_expression_list(p);
        }

        if p.eat(SyntaxKind::COLON) {
            parse_expression(p);
        } else {
            p.expect(SyntaxKind::SEMICOLON);
            if !p.at(SyntaxKind::SEMICOLON) {
                parse_expression(p);
            }
            p.expect(SyntaxKind::SEMICOLON);
            if !p.at(SyntaxKind::R_PAREN) {
                parse_expression_list(p);
            }
        }
        p.expect(SyntaxKind::R_PAREN);
    }
    parse_statement(p);
    p.finish_node();
}

fn parse_expression_list<P: DrlxParser>(p: &mut P) {
    parse_expression(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_expression(p);
    }
}

fn parse_while_stmt<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::WHILE_STMT);
    p.bump(); // while
    parse_paren_condition(p);
    parse_statement(p);
    p.finish_node();
}

fn parse_do_while_stmt<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::DO_WHILE_STMT);
    p.bump(); // do
    parse_statement(p);
    p.expect(SyntaxKind::WHILE_KW);
    parse_paren_condition(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// TryStmt → 'try' ResourceSpec? Block CatchClause* FinallyClause?
fn parse_try_stmt<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::TRY_STMT);
    p.bump(); // try
    let has_resources = p.at(SyntaxKind::L_PAREN);
    if has_resources {
        p.start_node(SyntaxKind::RESOURCE_SPEC);
        p.bump();
        while !p.at_eof() && !p.at(SyntaxKind::R_PAREN) {
            let before = p.get_pos();
            if at_local_var_decl(p) {
                p.start_node(SyntaxKind::LOCAL_VAR_DECL);
                parse_local_var_decl_rest(p);
                p.finish_node();
            } else {
                parse_expression(p);
            }
            if !p.eat(SyntaxKind::SEMICOLON) {
                ensure_progress(p, before, "unexpected token in resource specification");
                break;
            }
        }
        p.expect(SyntaxKind::R_PAREN);
        p.finish_node();
    }
    parse_block(p);

    let mut handled = has_resources;
    while p.at(SyntaxKind::CATCH_KW) {
        handled = true;
        p.start_node(SyntaxKind::CATCH_CLAUSE);
        p.bump();
        if p.expect(SyntaxKind::L_PAREN) {
            p.start_node(SyntaxKind::PARAM);
            parse_variable_modifiers(p);
            parse_type(p);
            while p.eat(SyntaxKind::PIPE) {
                parse_type(p);
            }
            parse_name(p);
            p.finish_node();
            p.expect(SyntaxKind::R_PAREN);
        }
        parse_block(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::FINALLY_KW) {
        handled = true;
        p.start_node(SyntaxKind::FINALLY_CLAUSE);
        p.bump();
        parse_block(p);
        p.finish_node();
    }
    if !handled {
        p.error("expected 'catch' or 'finally'".to_string());
    }
    p.finish_node();
}

/// SwitchStmt → 'switch' '(' Expression ')' '{' SwitchCase* '}'
/// SwitchCase → ('case' Expression (',' Expression)* | 'default') ':' BlockStatement*
fn parse_switch_stmt<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::SWITCH_STMT);
    p.bump(); // switch
    parse_paren_condition(p);
    if p.expect(SyntaxKind::L_BRACE) {
        while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
            let before = p.get_pos();
            parse_switch_case(p);
            ensure_progress(p, before, "unexpected token in switch");
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();
}

fn parse_switch_case<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::SWITCH_CASE);
    if p.at(SyntaxKind::CASE_KW) {
        p.bump();
        parse_expression_list(p);
        p.expect(SyntaxKind::COLON);
    } else if p.at(SyntaxKind::DEFAULT_KW) {
        p.bump();
        p.expect(SyntaxKind::COLON);
    } else {
        p.error_recover("expected 'case' or 'default'", SWITCH_LABEL_RECOVERY);
        p.finish_node();
        return;
    }
    while !p.at_eof()
        && !p.at(SyntaxKind::CASE_KW)
        && !p.at(SyntaxKind::DEFAULT_KW)
        && !p.at(SyntaxKind::R_BRACE)
    {
        let before = p.get_pos();
        parse_block_statement(p);
        ensure_progress(p, before, "unexpected token in switch case");
    }
    p.finish_node();
}

/// `return`/`throw` with an optional (or required) expression
fn parse_simple_stmt<P: DrlxParser>(p: &mut P, kind: SyntaxKind, optional_expr: bool) {
    p.start_node(kind);
    p.bump();
    if !(optional_expr && p.at(SyntaxKind::SEMICOLON)) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// `break`/`continue` with an optional label
fn parse_jump_stmt<P: DrlxParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.eat(SyntaxKind::IDENT);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

fn parse_assert_stmt<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::ASSERT_STMT);
    p.bump(); // assert
    parse_expression(p);
    if p.eat(SyntaxKind::COLON) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}
