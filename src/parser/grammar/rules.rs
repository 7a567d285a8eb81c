//! DRLX rule declarations
//!
//! ```text
//! RuleDecl    → Modifiers 'rule' Name RuleBody
//! RuleBody    → '{' (RuleItem ','?)* '}'
//! RuleItem    → RulePattern | Consequence
//! RulePattern → ('var' | Type) Name ':' OOPath
//! OOPath      → OOPathChunk+
//! OOPathChunk → '/' Name ('[' Expression (',' Expression)* ']')?
//! Consequence → 'do' Block
//! ```

use super::statements::parse_block;
use super::types::parse_type;
use super::*;

const RULE_ITEM_RECOVERY: TokenSet = TokenSet::new(&[
    SyntaxKind::COMMA,
    SyntaxKind::R_BRACE,
    SyntaxKind::DO_KW,
    SyntaxKind::VAR_KW,
]);

pub(super) fn parse_rule_decl<P: DrlxParser>(p: &mut P, marker: P::Marker) {
    p.start_node_at(marker, SyntaxKind::RULE_DECL);
    p.bump(); // rule
    parse_name(p);
    parse_rule_body(p);
    p.finish_node();
}

fn parse_rule_body<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::RULE_BODY);
    if p.expect(SyntaxKind::L_BRACE) {
        while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
            let before = p.get_pos();
            parse_rule_item(p);
            p.eat(SyntaxKind::COMMA);
            ensure_progress(p, before, "unexpected token in rule body");
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();
}

fn parse_rule_item<P: DrlxParser>(p: &mut P) {
    if p.at(SyntaxKind::DO_KW) {
        parse_consequence(p);
    } else if p.at(SyntaxKind::VAR_KW) || p.at(SyntaxKind::IDENT) {
        parse_rule_pattern(p);
    } else {
        p.error_recover("expected pattern or consequence", RULE_ITEM_RECOVERY);
    }
}

fn parse_rule_pattern<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::RULE_PATTERN);
    if p.at(SyntaxKind::VAR_KW) {
        p.start_node(SyntaxKind::TYPE);
        p.bump();
        p.finish_node();
    } else {
        parse_type(p);
    }
    parse_name(p);
    p.expect(SyntaxKind::COLON);
    parse_oopath(p);
    p.finish_node();
}

fn parse_oopath<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::OOPATH);
    if !p.at(SyntaxKind::SLASH) {
        p.error("expected OOPath".to_string());
    }
    while p.at(SyntaxKind::SLASH) {
        parse_oopath_chunk(p);
    }
    p.finish_node();
}

fn parse_oopath_chunk<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::OOPATH_CHUNK);
    p.bump(); // /
    parse_name(p);
    if p.at(SyntaxKind::L_BRACKET) {
        p.bump();
        parse_expression(p);
        while p.eat(SyntaxKind::COMMA) {
            parse_expression(p);
        }
        p.expect(SyntaxKind::R_BRACKET);
    }
    p.finish_node();
}

fn parse_consequence<P: DrlxParser>(p: &mut P) {
    p.start_node(SyntaxKind::RULE_CONSEQUENCE);
    p.bump(); // do
    parse_block(p);
    p.finish_node();
}
