//! Compilation units, type declarations and class members
//!
//! ```text
//! SourceFile  → PackageDecl? ImportDecl* TopLevelDecl*
//! PackageDecl → 'package' QualifiedName ';'
//! ImportDecl  → 'import' 'static'? QualifiedName ('.' '*')? ';'
//! TopLevelDecl → ';' | Modifiers (ClassDecl | InterfaceDecl | EnumDecl | RuleDecl)
//! ```

use super::expressions::{parse_arg_list, parse_array_initializer, parse_element_value};
use super::rules::parse_rule_decl;
use super::statements::parse_block;
use super::types::{parse_return_type, parse_type, parse_type_list, parse_type_params};
use super::*;

const TOP_LEVEL_RECOVERY: TokenSet = TokenSet::new(&[
    SyntaxKind::CLASS_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::RULE_KW,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::AT,
    SyntaxKind::SEMICOLON,
]);

const MEMBER_RECOVERY: TokenSet = TokenSet::new(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]);

/// Entry point: parse a whole DRLX compilation unit
pub fn parse_source_file<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::SOURCE_FILE);

    if p.at(SyntaxKind::PACKAGE_KW) {
        parse_package_decl(p);
    }
    while p.at(SyntaxKind::IMPORT_KW) {
        parse_import_decl(p);
    }

    while !p.at_eof() {
        let before = p.get_pos();
        parse_top_level_decl(p);
        ensure_progress(p, before, "unexpected token at top level");
    }

    p.finish_node();
}

fn parse_package_decl<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::PACKAGE_DECL);
    p.bump(); // package
    parse_qualified_name(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

fn parse_import_decl<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::IMPORT_DECL);
    p.bump(); // import
    p.eat(SyntaxKind::STATIC_KW);
    parse_qualified_name(p);
    if p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::STAR {
        p.bump();
        p.bump();
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

fn parse_top_level_decl<P: DrlxParser>(p: &mut P) {
    if p.eat(SyntaxKind::SEMICOLON) {
        return;
    }
    let marker = p.checkpoint();
    parse_modifiers(p);
    if p.at(SyntaxKind::CLASS_KW) {
        parse_class_decl(p, marker);
    } else if p.at(SyntaxKind::INTERFACE_KW) {
        parse_interface_decl(p, marker);
    } else if p.at(SyntaxKind::ENUM_KW) {
        parse_enum_decl(p, marker);
    } else if p.at(SyntaxKind::RULE_KW) {
        parse_rule_decl(p, marker);
    } else {
        p.error_recover(
            "expected class, interface, enum or rule declaration",
            TOP_LEVEL_RECOVERY,
        );
    }
}

/// Modifiers → (Modifier | Annotation)*
///
/// Produces a `MODIFIERS` node only when at least one modifier is present.
pub(super) fn parse_modifiers<P: DrlxParser>(p: &mut P) -> bool {
    let marker = p.checkpoint();
    let mut any = false;
    loop {
        if p.at_set(MODIFIER_KEYWORDS) {
            p.bump();
        } else if p.at(SyntaxKind::AT) {
            parse_annotation(p);
        } else {
            break;
        }
        any = true;
    }
    if any {
        p.start_node_at(marker, SyntaxKind::MODIFIERS);
        p.finish_node();
    }
    any
}

/// Annotation → '@' AnnotationName ('(' AnnotationArgs? ')')?
///
/// The name segments are identifier-rule positions nested in
/// `ANNOTATION_NAME`, which completion treats as a minor context.
pub(super) fn parse_annotation<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::ANNOTATION);
    p.bump(); // @
    p.start_node(SyntaxKind::ANNOTATION_NAME);
    parse_name(p);
    while p.at(SyntaxKind::DOT) {
        p.bump();
        if !parse_name(p) {
            break;
        }
    }
    p.finish_node();
    if p.at(SyntaxKind::L_PAREN) {
        parse_annotation_args(p);
    }
    p.finish_node();
}

fn parse_annotation_args<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::ANNOTATION_ARGS);
    p.bump(); // (
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::EQ {
                p.start_node(SyntaxKind::ELEMENT_VALUE_PAIR);
                parse_name(p);
                p.bump(); // =
                parse_element_value(p);
                p.finish_node();
            } else {
                parse_element_value(p);
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

/// ClassDecl → Modifiers 'class' Name TypeParams? ('extends' Type)? ('implements' TypeList)? ClassBody
pub(super) fn parse_class_decl<P: DrlxParser>(p: &mut P, marker: P::Marker) {
    p.start_node_at(marker, SyntaxKind::CLASS_DECL);
    p.bump(); // class
    parse_name(p);
    if p.at(SyntaxKind::LT) {
        parse_type_params(p);
    }
    if p.at(SyntaxKind::EXTENDS_KW) {
        p.start_node(SyntaxKind::EXTENDS_CLAUSE);
        p.bump();
        parse_type(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::IMPLEMENTS_KW) {
        p.start_node(SyntaxKind::IMPLEMENTS_CLAUSE);
        p.bump();
        parse_type_list(p);
        p.finish_node();
    }
    parse_class_body(p);
    p.finish_node();
}

/// InterfaceDecl → Modifiers 'interface' Name TypeParams? ('extends' TypeList)? ClassBody
fn parse_interface_decl<P: DrlxParser>(p: &mut P, marker: P::Marker) {
    p.start_node_at(marker, SyntaxKind::INTERFACE_DECL);
    p.bump(); // interface
    parse_name(p);
    if p.at(SyntaxKind::LT) {
        parse_type_params(p);
    }
    if p.at(SyntaxKind::EXTENDS_KW) {
        p.start_node(SyntaxKind::EXTENDS_CLAUSE);
        p.bump();
        parse_type_list(p);
        p.finish_node();
    }
    parse_class_body(p);
    p.finish_node();
}

/// EnumDecl → Modifiers 'enum' Name ('implements' TypeList)?
///            '{' EnumConstant (',' EnumConstant)* ','? (';' ClassMember*)? '}'
fn parse_enum_decl<P: DrlxParser>(p: &mut P, marker: P::Marker) {
    p.start_node_at(marker, SyntaxKind::ENUM_DECL);
    p.bump(); // enum
    parse_name(p);
    if p.at(SyntaxKind::IMPLEMENTS_KW) {
        p.start_node(SyntaxKind::IMPLEMENTS_CLAUSE);
        p.bump();
        parse_type_list(p);
        p.finish_node();
    }

    p.start_node(SyntaxKind::CLASS_BODY);
    if p.expect(SyntaxKind::L_BRACE) {
        while p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::AT) {
            parse_enum_constant(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        if p.eat(SyntaxKind::SEMICOLON) {
            parse_members(p);
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();

    p.finish_node();
}

fn parse_enum_constant<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::ENUM_CONSTANT);
    while p.at(SyntaxKind::AT) {
        parse_annotation(p);
    }
    parse_name(p);
    if p.at(SyntaxKind::L_PAREN) {
        parse_arg_list(p);
    }
    if p.at(SyntaxKind::L_BRACE) {
        parse_class_body(p);
    }
    p.finish_node();
}

/// ClassBody → '{' ClassMember* '}'
pub(super) fn parse_class_body<P: DrlxParser>(p: &mut P) {
    if !enter_nested(p) {
        return;
    }
    p.start_node(SyntaxKind::CLASS_BODY);
    if p.expect(SyntaxKind::L_BRACE) {
        parse_members(p);
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();
    exit_nested(p);
}

fn parse_members<P: DrlxParser>(p: &mut P) {
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        let before = p.get_pos();
        parse_class_member(p);
        ensure_progress(p, before, "unexpected token in class body");
    }
}

/// ClassMember → ';' | Initializer | Modifiers (NestedType | RuleDecl | Constructor | Method | Field)
fn parse_class_member<P: DrlxParser>(p: &mut P) {
    if p.eat(SyntaxKind::SEMICOLON) {
        return;
    }
    if p.at(SyntaxKind::L_BRACE)
        || (p.at(SyntaxKind::STATIC_KW) && p.nth(1) == SyntaxKind::L_BRACE)
    {
        p.start_node(SyntaxKind::INITIALIZER);
        p.eat(SyntaxKind::STATIC_KW);
        parse_block(p);
        p.finish_node();
        return;
    }

    let marker = p.checkpoint();
    parse_modifiers(p);
    if p.at(SyntaxKind::CLASS_KW) {
        parse_class_decl(p, marker);
    } else if p.at(SyntaxKind::INTERFACE_KW) {
        parse_interface_decl(p, marker);
    } else if p.at(SyntaxKind::ENUM_KW) {
        parse_enum_decl(p, marker);
    } else if p.at(SyntaxKind::RULE_KW) {
        parse_rule_decl(p, marker);
    } else if p.at(SyntaxKind::LT) {
        p.start_node_at(marker, SyntaxKind::METHOD_DECL);
        parse_type_params(p);
        if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::L_PAREN {
            parse_constructor_rest(p);
        } else {
            parse_return_type(p);
            parse_method_rest(p);
        }
        p.finish_node();
    } else if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::L_PAREN {
        p.start_node_at(marker, SyntaxKind::CONSTRUCTOR_DECL);
        parse_constructor_rest(p);
        p.finish_node();
    } else if p.at(SyntaxKind::VOID_KW) || p.at_set(PRIMITIVE_TYPES) || p.at(SyntaxKind::IDENT) {
        parse_field_or_method(p, marker);
    } else {
        p.error_recover("expected class member", MEMBER_RECOVERY);
    }
}

fn parse_field_or_method<P: DrlxParser>(p: &mut P, marker: P::Marker) {
    parse_return_type(p);
    if p.nth(1) == SyntaxKind::L_PAREN {
        p.start_node_at(marker, SyntaxKind::METHOD_DECL);
        parse_method_rest(p);
    } else {
        p.start_node_at(marker, SyntaxKind::FIELD_DECL);
        parse_variable_declarators(p);
        p.expect(SyntaxKind::SEMICOLON);
    }
    p.finish_node();
}

/// MethodRest → Name ParamList ('[' ']')* Throws? (Block | ';')
fn parse_method_rest<P: DrlxParser>(p: &mut P) {
    parse_name(p);
    parse_param_list(p);
    while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
        p.bump();
        p.bump();
    }
    parse_throws(p);
    if p.at(SyntaxKind::L_BRACE) {
        parse_block(p);
    } else {
        p.expect(SyntaxKind::SEMICOLON);
    }
}

fn parse_constructor_rest<P: DrlxParser>(p: &mut P) {
    parse_name(p);
    parse_param_list(p);
    parse_throws(p);
    parse_block(p);
}

fn parse_throws<P: DrlxParser>(p: &mut P) {
    if p.at(SyntaxKind::THROWS_KW) {
        p.start_node(SyntaxKind::THROWS_CLAUSE);
        p.bump();
        parse_type_list(p);
        p.finish_node();
    }
}

/// ParamList → '(' (Param (',' Param)*)? ')'
pub(super) fn parse_param_list<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::PARAM_LIST);
    if p.expect(SyntaxKind::L_PAREN) {
        if !p.at(SyntaxKind::R_PAREN) {
            parse_param(p);
            while p.eat(SyntaxKind::COMMA) {
                parse_param(p);
            }
        }
        p.expect(SyntaxKind::R_PAREN);
    }
    p.finish_node();
}

/// Param → VariableModifiers Type '...'? Name ('[' ']')*
pub(super) fn parse_param<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::PARAM);
    parse_variable_modifiers(p);
    parse_type(p);
    p.eat(SyntaxKind::ELLIPSIS);
    parse_name(p);
    while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
        p.bump();
        p.bump();
    }
    p.finish_node();
}

/// VariableModifiers → ('final' | Annotation)*
pub(super) fn parse_variable_modifiers<P: DrlxParser>(p: &mut P) {
    let marker = p.checkpoint();
    let mut any = false;
    loop {
        if p.at(SyntaxKind::FINAL_KW) {
            p.bump();
        } else if p.at(SyntaxKind::AT) {
            parse_annotation(p);
        } else {
            break;
        }
        any = true;
    }
    if any {
        p.start_node_at(marker, SyntaxKind::MODIFIERS);
        p.finish_node();
    }
}

/// VariableDeclarators → VariableDeclarator (',' VariableDeclarator)*
/// VariableDeclarator  → Name ('[' ']')* ('=' VariableInitializer)?
pub(super) fn parse_variable_declarators<P: DrlxParser>(p: &mut P) {
    loop {
        p.start_node(SyntaxKind::VARIABLE_DECLARATOR);
        parse_name(p);
        while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
            p.bump();
            p.bump();
        }
        if p.eat(SyntaxKind::EQ) {
            parse_variable_initializer(p);
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

pub(super) fn parse_variable_initializer<P: DrlxParser>(p: &mut P) {
    if p.at(SyntaxKind::L_BRACE) {
        parse_array_initializer(p);
    } else {
        parse_expression(p);
    }
}
