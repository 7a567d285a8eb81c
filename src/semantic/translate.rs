//! Lowering from the CST to the expression AST and symbol information
//!
//! [`translate`] walks a parsed document once and produces a [`Translation`]:
//! - every expression node lowered into an [`ExprArena`]
//! - a lookup from token index to the outermost expression ending at that token
//! - locals and parameters with the source range they are visible in
//! - the document's own type declarations, package and imports

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use tracing::trace;

use super::ast::{Expr, ExprArena, ExprData, ExprId, LiteralKind};
use super::types::{
    FieldDescriptor, Import, MethodDescriptor, TypeDecl, TypeKind, TypeName, TypeScope,
    TypeUniverse, Visibility,
};
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken, TokenStream};

/// A local variable, parameter or rule binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVar {
    pub name: SmolStr,
    pub ty: TypeName,
    /// Initializer of a `var` declaration.
    pub initializer: Option<ExprId>,
    /// Iterated expression of an enhanced `for` variable.
    pub iterable: Option<ExprId>,
    /// Visible from here...
    pub declared_at: TextSize,
    /// ...to the end of this range.
    pub scope: TextRange,
}

/// Result of lowering one document.
#[derive(Debug, Default)]
pub struct Translation {
    exprs: ExprArena,
    by_last_token: FxHashMap<usize, ExprId>,
    locals: Vec<LocalVar>,
    types: Vec<TypeDecl>,
    /// Names a document type can be referred to by, with its qualified name.
    type_names: Vec<(SmolStr, SmolStr)>,
    package: Option<SmolStr>,
    imports: Vec<Import>,
}

impl Translation {
    pub fn exprs(&self) -> &ExprArena {
        &self.exprs
    }

    pub fn expr(&self, id: ExprId) -> Option<&ExprData> {
        self.exprs.get(id)
    }

    /// The outermost expression whose last token is `index`.
    pub fn expr_at_token(&self, index: usize) -> Option<ExprId> {
        self.by_last_token.get(&index).copied()
    }

    pub fn locals(&self) -> &[LocalVar] {
        &self.locals
    }

    /// The innermost local named `name` visible at `offset`.
    pub fn local_at(&self, name: &str, offset: TextSize) -> Option<&LocalVar> {
        self.locals
            .iter()
            .filter(|local| {
                local.name == name
                    && local.declared_at <= offset
                    && local.scope.contains_inclusive(offset)
            })
            .max_by_key(|local| local.declared_at)
    }

    pub fn types(&self) -> &[TypeDecl] {
        &self.types
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Type scope of this document: its own types layered over `base`.
    pub fn type_scope(&self, base: Arc<TypeUniverse>) -> Arc<TypeScope> {
        let mut universe = TypeUniverse::with_parent(base);
        for decl in &self.types {
            universe.insert(decl.clone());
        }
        let scope = self.type_names.iter().fold(
            TypeScope::new(Arc::new(universe))
                .with_package(self.package.clone())
                .with_imports(self.imports.clone()),
            |scope, (name, qualified)| scope.with_local_type(name.clone(), qualified.clone()),
        );
        Arc::new(scope)
    }
}

/// Lower a parsed document.
pub fn translate(root: &SyntaxNode, tokens: &TokenStream) -> Translation {
    let mut lowering = Lowering {
        tokens,
        translation: Translation::default(),
        lowered: FxHashMap::default(),
        type_stack: Vec::new(),
    };
    lowering.walk(root);
    trace!(
        exprs = lowering.translation.exprs.len(),
        locals = lowering.translation.locals.len(),
        types = lowering.translation.types.len(),
        "translated document"
    );
    lowering.translation
}

fn is_expr_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::LITERAL
            | SyntaxKind::NAME_EXPR
            | SyntaxKind::THIS_EXPR
            | SyntaxKind::SUPER_EXPR
            | SyntaxKind::PAREN_EXPR
            | SyntaxKind::FIELD_ACCESS
            | SyntaxKind::METHOD_CALL
            | SyntaxKind::ARRAY_ACCESS
            | SyntaxKind::NEW_EXPR
            | SyntaxKind::CLASS_LITERAL
            | SyntaxKind::METHOD_REF
            | SyntaxKind::CAST_EXPR
            | SyntaxKind::UNARY_EXPR
            | SyntaxKind::POSTFIX_EXPR
            | SyntaxKind::BINARY_EXPR
            | SyntaxKind::INSTANCEOF_EXPR
            | SyntaxKind::CONDITIONAL_EXPR
            | SyntaxKind::ASSIGN_EXPR
            | SyntaxKind::LAMBDA_EXPR
    )
}

fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
}

fn first_token_of(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    significant_tokens(node).find(|token| token.kind() == kind)
}

fn child_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|child| child.kind() == kind)
}

fn expr_children(node: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> {
    node.children().filter(|child| is_expr_kind(child.kind()))
}

/// Text of the name inside an `IDENTIFIER` child.
fn declared_name(node: &SyntaxNode) -> Option<SmolStr> {
    let identifier = child_of_kind(node, SyntaxKind::IDENTIFIER)?;
    let ident = first_token_of(&identifier, SyntaxKind::IDENT)?;
    Some(SmolStr::new(ident.text()))
}

/// Erased type name of a `TYPE` node.
fn type_name(node: &SyntaxNode) -> TypeName {
    let mut name = String::new();
    let mut dims = 0;
    for token in significant_tokens(node) {
        match token.kind() {
            SyntaxKind::L_BRACKET => dims += 1,
            SyntaxKind::R_BRACKET => {}
            _ => name.push_str(token.text()),
        }
    }
    TypeName::new(name, dims)
}

/// Trailing `[]` pairs directly under a declarator or parameter.
fn extra_dims(node: &SyntaxNode) -> usize {
    significant_tokens(node)
        .filter(|token| token.kind() == SyntaxKind::L_BRACKET)
        .count()
}

fn modifier_keywords(node: &SyntaxNode) -> Vec<SyntaxKind> {
    child_of_kind(node, SyntaxKind::MODIFIERS)
        .map(|modifiers| significant_tokens(&modifiers).map(|token| token.kind()).collect())
        .unwrap_or_default()
}

fn visibility_of(modifiers: &[SyntaxKind], in_interface: bool) -> Visibility {
    if in_interface || modifiers.contains(&SyntaxKind::PUBLIC_KW) {
        Visibility::Public
    } else if modifiers.contains(&SyntaxKind::PROTECTED_KW) {
        Visibility::Protected
    } else if modifiers.contains(&SyntaxKind::PRIVATE_KW) {
        Visibility::Private
    } else {
        Visibility::Package
    }
}

fn literal_kind(token: &SyntaxToken) -> LiteralKind {
    let text = token.text();
    match token.kind() {
        SyntaxKind::INTEGER_LITERAL if text.ends_with(['l', 'L']) => LiteralKind::Long,
        SyntaxKind::INTEGER_LITERAL => LiteralKind::Int,
        SyntaxKind::FLOAT_LITERAL if text.ends_with(['f', 'F']) => LiteralKind::Float,
        SyntaxKind::FLOAT_LITERAL => LiteralKind::Double,
        SyntaxKind::BIG_DECIMAL_LITERAL => LiteralKind::BigDecimal,
        SyntaxKind::BIG_INTEGER_LITERAL => LiteralKind::BigInteger,
        SyntaxKind::CHAR_LITERAL => LiteralKind::Char,
        SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => LiteralKind::Boolean,
        SyntaxKind::NULL_KW => LiteralKind::Null,
        _ => LiteralKind::String,
    }
}

/// Operator token of a unary, binary or assignment node.
///
/// Adjacent `>` tokens of a right shift fold into `GT_GT` or `GT_GT_GT`.
fn operator(node: &SyntaxNode) -> SyntaxKind {
    let mut ops = significant_tokens(node)
        .map(|token| token.kind())
        .filter(|kind| kind.is_punct());
    match ops.next() {
        Some(SyntaxKind::GT) => match ops.take_while(|kind| *kind == SyntaxKind::GT).count() {
            0 => SyntaxKind::GT,
            1 => SyntaxKind::GT_GT,
            _ => SyntaxKind::GT_GT_GT,
        },
        Some(kind) => kind,
        None => SyntaxKind::ERROR,
    }
}

struct Lowering<'a> {
    tokens: &'a TokenStream,
    translation: Translation,
    lowered: FxHashMap<(SyntaxKind, TextRange), ExprId>,
    /// Qualified names of the type declarations being walked.
    type_stack: Vec<SmolStr>,
}

impl Lowering<'_> {
    fn walk(&mut self, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::PACKAGE_DECL => {
                self.translation.package = child_of_kind(node, SyntaxKind::QUALIFIED_NAME)
                    .map(|name| qualified_text(&name));
                return;
            }
            SyntaxKind::IMPORT_DECL => {
                self.import(node);
                return;
            }
            SyntaxKind::CLASS_DECL | SyntaxKind::INTERFACE_DECL | SyntaxKind::ENUM_DECL => {
                self.type_decl(node);
                return;
            }
            SyntaxKind::LOCAL_VAR_DECL => self.local_var_decl(node),
            SyntaxKind::PARAM => self.param(node),
            SyntaxKind::RULE_PATTERN => self.rule_pattern(node),
            kind if is_expr_kind(kind) => {
                let id = self.lower(node);
                if let Some(last) = self.last_token_index(node) {
                    // Preorder: the first expression registered for a token is the outermost.
                    self.translation.by_last_token.entry(last).or_insert(id);
                }
            }
            _ => {}
        }
        for child in node.children() {
            self.walk(&child);
        }
    }

    fn last_token_index(&self, node: &SyntaxNode) -> Option<usize> {
        let mut token = node.last_token()?;
        while token.kind().is_trivia() {
            token = token.prev_token()?;
            if !node.text_range().contains_range(token.text_range()) {
                return None;
            }
        }
        self.tokens.index_of(&token)
    }

    fn import(&mut self, node: &SyntaxNode) {
        let Some(name) = child_of_kind(node, SyntaxKind::QUALIFIED_NAME) else {
            return;
        };
        self.translation.imports.push(Import {
            path: qualified_text(&name),
            wildcard: first_token_of(node, SyntaxKind::STAR).is_some(),
            is_static: first_token_of(node, SyntaxKind::STATIC_KW).is_some(),
        });
    }

    fn type_decl(&mut self, node: &SyntaxNode) {
        let Some(name) = declared_name(node) else {
            return;
        };
        let qualified: SmolStr = match (self.type_stack.last(), self.translation.package.as_deref()) {
            (Some(outer), _) => format!("{outer}.{name}").into(),
            (None, Some(package)) => format!("{package}.{name}").into(),
            (None, None) => name.clone(),
        };
        let kind = match node.kind() {
            SyntaxKind::INTERFACE_DECL => TypeKind::Interface,
            SyntaxKind::ENUM_DECL => TypeKind::Enum,
            _ => TypeKind::Class,
        };

        let mut decl = TypeDecl::new(qualified.clone(), kind);
        for clause in [SyntaxKind::EXTENDS_CLAUSE, SyntaxKind::IMPLEMENTS_CLAUSE] {
            if let Some(clause) = child_of_kind(node, clause) {
                decl.supertypes.extend(
                    clause
                        .children()
                        .filter(|child| child.kind() == SyntaxKind::TYPE)
                        .map(|ty| type_name(&ty)),
                );
            }
        }
        if kind == TypeKind::Enum {
            decl.supertypes.push(TypeName::new("java.lang.Enum", 0));
        }
        if let Some(body) = child_of_kind(node, SyntaxKind::CLASS_BODY) {
            collect_members(&body, &mut decl, &name);
        }

        // Nested types are reachable as `Outer.Inner` and by simple name.
        if let Some(outer) = self.type_stack.last() {
            let outer_simple = outer.rsplit('.').next().unwrap_or(outer.as_str());
            self.translation
                .type_names
                .push((format!("{outer_simple}.{name}").into(), qualified.clone()));
        }
        self.translation.type_names.push((name, qualified.clone()));
        self.translation.types.push(decl);

        self.type_stack.push(qualified);
        for child in node.children() {
            self.walk(&child);
        }
        self.type_stack.pop();
    }

    fn local_var_decl(&mut self, node: &SyntaxNode) {
        let Some(ty) = child_of_kind(node, SyntaxKind::TYPE) else {
            return;
        };
        let ty = type_name(&ty);
        let Some(parent) = node.parent() else {
            return;
        };
        // Resources are visible in the whole try statement.
        let scope_node = match parent.kind() {
            SyntaxKind::RESOURCE_SPEC => parent.parent().unwrap_or(parent),
            _ => parent,
        };
        let iterable = if scope_node.kind() == SyntaxKind::FOR_STMT
            && first_token_of(&scope_node, SyntaxKind::COLON).is_some()
        {
            expr_children(&scope_node).next().map(|expr| self.lower(&expr))
        } else {
            None
        };
        for declarator in node
            .children()
            .filter(|child| child.kind() == SyntaxKind::VARIABLE_DECLARATOR)
        {
            let Some(name) = declared_name(&declarator) else {
                continue;
            };
            let initializer = expr_children(&declarator).next().map(|expr| self.lower(&expr));
            self.translation.locals.push(LocalVar {
                name,
                ty: TypeName::new(ty.name.clone(), ty.dims + extra_dims(&declarator)),
                initializer,
                iterable,
                declared_at: declarator.text_range().end(),
                scope: scope_node.text_range(),
            });
        }
    }

    fn param(&mut self, node: &SyntaxNode) {
        let Some(name) = declared_name(node) else {
            return;
        };
        let Some(owner) = node.ancestors().find(|ancestor| {
            matches!(
                ancestor.kind(),
                SyntaxKind::METHOD_DECL
                    | SyntaxKind::CONSTRUCTOR_DECL
                    | SyntaxKind::CATCH_CLAUSE
                    | SyntaxKind::LAMBDA_EXPR
            )
        }) else {
            return;
        };
        let ty = match child_of_kind(node, SyntaxKind::TYPE) {
            Some(ty) => {
                let ty = type_name(&ty);
                let varargs = usize::from(first_token_of(node, SyntaxKind::ELLIPSIS).is_some());
                TypeName::new(ty.name.clone(), ty.dims + varargs + extra_dims(node))
            }
            // Implicitly typed lambda parameter
            None => TypeName::new("var", 0),
        };
        self.translation.locals.push(LocalVar {
            name,
            ty,
            initializer: None,
            iterable: None,
            declared_at: node.text_range().end(),
            scope: owner.text_range(),
        });
    }

    fn rule_pattern(&mut self, node: &SyntaxNode) {
        let (Some(name), Some(ty)) = (declared_name(node), child_of_kind(node, SyntaxKind::TYPE))
        else {
            return;
        };
        let Some(body) = node.parent() else {
            return;
        };
        let declared_at = child_of_kind(node, SyntaxKind::IDENTIFIER)
            .map_or(node.text_range().end(), |identifier| identifier.text_range().end());
        self.translation.locals.push(LocalVar {
            name,
            ty: type_name(&ty),
            initializer: None,
            iterable: None,
            declared_at,
            scope: body.text_range(),
        });
    }

    /// Lower an expression node, reusing the result for nodes already lowered.
    fn lower(&mut self, node: &SyntaxNode) -> ExprId {
        let key = (node.kind(), node.text_range());
        if let Some(id) = self.lowered.get(&key) {
            return *id;
        }
        let expr = self.lower_kind(node);
        let id = self.translation.exprs.alloc(ExprData {
            expr,
            range: node.text_range(),
            enclosing_type: self.type_stack.last().cloned(),
        });
        self.lowered.insert(key, id);
        id
    }

    fn lower_opt(&mut self, node: Option<SyntaxNode>) -> ExprId {
        match node {
            Some(node) => self.lower(&node),
            None => self.missing(),
        }
    }

    fn missing(&mut self) -> ExprId {
        self.translation.exprs.alloc(ExprData {
            expr: Expr::Missing,
            range: TextRange::empty(TextSize::from(0)),
            enclosing_type: None,
        })
    }

    fn lower_kind(&mut self, node: &SyntaxNode) -> Expr {
        let mut operands = expr_children(node);
        match node.kind() {
            SyntaxKind::LITERAL => match significant_tokens(node).next() {
                Some(token) => Expr::Literal(literal_kind(&token)),
                None => Expr::Missing,
            },
            SyntaxKind::NAME_EXPR => match first_token_of(node, SyntaxKind::IDENT) {
                Some(ident) => Expr::Name(SmolStr::new(ident.text())),
                None => Expr::Missing,
            },
            SyntaxKind::THIS_EXPR => Expr::This,
            SyntaxKind::SUPER_EXPR => Expr::Super,
            SyntaxKind::PAREN_EXPR => Expr::Paren(self.lower_opt(operands.next())),
            SyntaxKind::FIELD_ACCESS => {
                let scope = self.lower_opt(operands.next());
                if first_token_of(node, SyntaxKind::THIS_KW).is_some() {
                    return Expr::This;
                }
                Expr::FieldAccess {
                    scope,
                    name: declared_name(node),
                }
            }
            SyntaxKind::METHOD_CALL => {
                let scope = operands.next().map(|scope| self.lower(&scope));
                let name = match scope {
                    Some(_) => declared_name(node),
                    None => first_token_of(node, SyntaxKind::IDENT)
                        .map(|ident| SmolStr::new(ident.text())),
                };
                let Some(name) = name else {
                    return Expr::Missing;
                };
                let args = self.lower_args(node);
                Expr::MethodCall { scope, name, args }
            }
            SyntaxKind::ARRAY_ACCESS => {
                let array = self.lower_opt(operands.next());
                let index = self.lower_opt(operands.next());
                Expr::ArrayAccess { array, index }
            }
            SyntaxKind::NEW_EXPR => {
                // Only `outer.new Inner()` has an operand before `new`.
                let new_at = first_token_of(node, SyntaxKind::NEW_KW)
                    .map_or(node.text_range().end(), |new| new.text_range().start());
                let scope = operands
                    .next()
                    .filter(|scope| scope.text_range().end() <= new_at)
                    .map(|scope| self.lower(&scope));
                let Some(ty) = child_of_kind(node, SyntaxKind::TYPE) else {
                    return Expr::Missing;
                };
                let ty = type_name(&ty);
                Expr::New {
                    ty: TypeName::new(ty.name, ty.dims + extra_dims(node)),
                    scope,
                }
            }
            SyntaxKind::CLASS_LITERAL => Expr::ClassLiteral,
            SyntaxKind::METHOD_REF => Expr::MethodRef {
                scope: self.lower_opt(operands.next()),
            },
            SyntaxKind::CAST_EXPR => {
                let ty = child_of_kind(node, SyntaxKind::TYPE)
                    .map_or_else(|| TypeName::new("", 0), |ty| type_name(&ty));
                let expr = self.lower_opt(operands.next());
                Expr::Cast { ty, expr }
            }
            SyntaxKind::UNARY_EXPR => Expr::Unary {
                op: operator(node),
                operand: self.lower_opt(operands.next()),
            },
            SyntaxKind::POSTFIX_EXPR => Expr::Postfix {
                op: operator(node),
                operand: self.lower_opt(operands.next()),
            },
            SyntaxKind::BINARY_EXPR => {
                let lhs = self.lower_opt(operands.next());
                let rhs = self.lower_opt(operands.next());
                Expr::Binary {
                    op: operator(node),
                    lhs,
                    rhs,
                }
            }
            SyntaxKind::INSTANCEOF_EXPR => {
                let expr = self.lower_opt(operands.next());
                let ty = child_of_kind(node, SyntaxKind::TYPE)
                    .map_or_else(|| TypeName::new("", 0), |ty| type_name(&ty));
                Expr::InstanceOf { expr, ty }
            }
            SyntaxKind::CONDITIONAL_EXPR => {
                let condition = self.lower_opt(operands.next());
                let then_branch = self.lower_opt(operands.next());
                let else_branch = self.lower_opt(operands.next());
                Expr::Conditional {
                    condition,
                    then_branch,
                    else_branch,
                }
            }
            SyntaxKind::ASSIGN_EXPR => {
                let target = self.lower_opt(operands.next());
                let value = self.lower_opt(operands.next());
                Expr::Assign {
                    op: operator(node),
                    target,
                    value,
                }
            }
            SyntaxKind::LAMBDA_EXPR => Expr::Lambda,
            _ => Expr::Missing,
        }
    }

    fn lower_args(&mut self, node: &SyntaxNode) -> Vec<ExprId> {
        let Some(args) = child_of_kind(node, SyntaxKind::ARG_LIST) else {
            return Vec::new();
        };
        expr_children(&args).map(|arg| self.lower(&arg)).collect()
    }
}

fn qualified_text(node: &SyntaxNode) -> SmolStr {
    significant_tokens(node)
        .map(|token| token.text().to_string())
        .collect::<String>()
        .into()
}

/// Fields, methods and enum constants declared directly in a class body.
fn collect_members(body: &SyntaxNode, decl: &mut TypeDecl, simple_name: &str) {
    let in_interface = decl.kind == TypeKind::Interface;
    for member in body.children() {
        match member.kind() {
            SyntaxKind::FIELD_DECL => {
                let modifiers = modifier_keywords(&member);
                let Some(ty) = child_of_kind(&member, SyntaxKind::TYPE) else {
                    continue;
                };
                let ty = type_name(&ty);
                for declarator in member
                    .children()
                    .filter(|child| child.kind() == SyntaxKind::VARIABLE_DECLARATOR)
                {
                    let Some(name) = declared_name(&declarator) else {
                        continue;
                    };
                    decl.fields.push(FieldDescriptor {
                        name,
                        ty: TypeName::new(ty.name.clone(), ty.dims + extra_dims(&declarator)),
                        visibility: visibility_of(&modifiers, in_interface),
                        is_static: in_interface || modifiers.contains(&SyntaxKind::STATIC_KW),
                    });
                }
            }
            SyntaxKind::METHOD_DECL => {
                let modifiers = modifier_keywords(&member);
                let (Some(name), Some(ty)) = (
                    declared_name(&member),
                    child_of_kind(&member, SyntaxKind::TYPE),
                ) else {
                    continue;
                };
                let param_count = child_of_kind(&member, SyntaxKind::PARAM_LIST)
                    .map_or(0, |params| {
                        params
                            .children()
                            .filter(|child| child.kind() == SyntaxKind::PARAM)
                            .count()
                    });
                decl.methods.push(MethodDescriptor {
                    name,
                    return_type: type_name(&ty),
                    param_count,
                    visibility: visibility_of(&modifiers, in_interface),
                    is_static: modifiers.contains(&SyntaxKind::STATIC_KW),
                });
            }
            SyntaxKind::ENUM_CONSTANT => {
                let Some(name) = declared_name(&member) else {
                    continue;
                };
                decl.fields.push(FieldDescriptor {
                    name,
                    ty: TypeName::new(simple_name, 0),
                    visibility: Visibility::Public,
                    is_static: true,
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn translate_text(text: &str) -> Translation {
        let parse = parse(text);
        translate(&parse.syntax(), parse.tokens())
    }

    #[test]
    fn collects_package_imports_and_types() {
        let translation = translate_text(
            "package org.example;\n\
             import java.util.List;\n\
             import java.util.*;\n\
             public class Person extends Base implements Named {\n\
                 private String name;\n\
                 public int age, scores[];\n\
                 public String getName() { return name; }\n\
                 static void reset(int a, String... rest) {}\n\
                 enum Kind { ADULT, CHILD }\n\
             }",
        );
        assert_eq!(translation.package(), Some("org.example"));
        assert_eq!(translation.imports().len(), 2);
        assert!(translation.imports()[1].wildcard);

        let person = &translation.types()[0];
        assert_eq!(person.qualified_name, "org.example.Person");
        assert_eq!(
            person.supertypes,
            vec![TypeName::new("Base", 0), TypeName::new("Named", 0)]
        );
        let fields: Vec<_> = person
            .fields
            .iter()
            .map(|field| (field.name.as_str(), field.visibility, field.ty.to_string()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("name", Visibility::Private, "String".to_string()),
                ("age", Visibility::Public, "int".to_string()),
                ("scores", Visibility::Public, "int[]".to_string()),
            ]
        );
        let reset = person.methods.iter().find(|method| method.name == "reset").unwrap();
        assert_eq!(reset.param_count, 2);
        assert_eq!(reset.visibility, Visibility::Package);
        assert!(reset.is_static);

        let kind = &translation.types()[1];
        assert_eq!(kind.qualified_name, "org.example.Person.Kind");
        assert_eq!(kind.fields.len(), 2);
    }

    #[test]
    fn outermost_expression_wins_for_shared_last_token() {
        let text = "rule R { do { x = a.b; y.c(); } }";
        let parse = parse(text);
        let translation = translate(&parse.syntax(), parse.tokens());
        let index_of = |text: &str| {
            parse
                .tokens()
                .iter()
                .find(|token| parse.tokens().token_text(token) == text)
                .map(|token| token.index)
                .unwrap()
        };

        let id = translation.expr_at_token(index_of("b")).unwrap();
        assert!(matches!(translation.expr(id).unwrap().expr, Expr::Assign { .. }));

        let id = translation.expr_at_token(index_of("a")).unwrap();
        assert_eq!(translation.expr(id).unwrap().expr, Expr::Name("a".into()));

        let id = translation.expr_at_token(index_of(")")).unwrap();
        assert!(matches!(
            translation.expr(id).unwrap().expr,
            Expr::MethodCall { ref name, .. } if name == "c"
        ));
    }

    #[test]
    fn array_creation_has_no_scope() {
        let translation = translate_text("rule R { do { int[] a = new int[n]; } }");
        let new = translation
            .exprs()
            .iter()
            .find_map(|(_, data)| match &data.expr {
                Expr::New { ty, scope } => Some((ty.clone(), *scope)),
                _ => None,
            })
            .unwrap();
        assert_eq!(new, (TypeName::new("int", 1), None));
    }

    #[test]
    fn locals_are_scoped_to_their_block() {
        let text = "rule R { do { String s = \"x\"; { int s2 = 1; } } }";
        let translation = translate_text(text);
        let s = translation.local_at("s", TextSize::from(30)).unwrap();
        assert_eq!(s.ty, TypeName::new("String", 0));
        assert!(s.initializer.is_some());
        assert!(translation.local_at("s", TextSize::from(15)).is_none());
        assert!(translation.local_at("s2", TextSize::from(text.len() as u32 - 3)).is_none());
    }

    #[test]
    fn rule_bindings_and_foreach_variables() {
        let text = "rule R { Person p : /persons, do { for (var x : arr) { } } }";
        let translation = translate_text(text);
        let p = translation.local_at("p", TextSize::from(40)).unwrap();
        assert_eq!(p.ty, TypeName::new("Person", 0));
        let x = translation.locals().iter().find(|local| local.name == "x").unwrap();
        assert!(x.ty.is_var());
        assert!(x.iterable.is_some());
    }

    #[test]
    fn literal_kinds() {
        let translation = translate_text("rule R { do { f(1, 2L, 1.5f, 2.0, 3B, 4I, 'c', \"s\", true, null); } }");
        let kinds: Vec<_> = translation
            .exprs()
            .iter()
            .filter_map(|(_, data)| match data.expr {
                Expr::Literal(kind) => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                LiteralKind::Int,
                LiteralKind::Long,
                LiteralKind::Float,
                LiteralKind::Double,
                LiteralKind::BigDecimal,
                LiteralKind::BigInteger,
                LiteralKind::Char,
                LiteralKind::String,
                LiteralKind::Boolean,
                LiteralKind::Null,
            ]
        );
    }
}
