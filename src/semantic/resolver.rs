//! Expression type resolution
//!
//! [`TypeResolver`] is the seam between completion and whatever knows about
//! types. [`SymbolTableResolver`] answers from a static [`TypeUniverse`]
//! (the built-in JDK subset by default) plus the document's own types.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::ast::{Expr, ExprId, LiteralKind};
use super::error::{ResolveError, ResolveResult};
use super::jdk::jdk_universe;
use super::translate::{LocalVar, Translation};
use super::types::{PrimitiveType, ResolvedType, TypeName, TypeScope, TypeUniverse};
use crate::base::constants::{ARRAY_LENGTH_FIELD, MAX_RESOLVE_DEPTH, OBJECT_TYPE};
use crate::parser::SyntaxKind;

/// Computes the static type of a translated expression.
pub trait TypeResolver: Send + Sync {
    fn resolve_type(
        &self,
        translation: &Translation,
        expr: ExprId,
        cancel: &CancellationToken,
    ) -> ResolveResult<ResolvedType>;
}

/// Resolver backed by a static symbol table.
#[derive(Debug, Clone)]
pub struct SymbolTableResolver {
    universe: Arc<TypeUniverse>,
}

impl Default for SymbolTableResolver {
    fn default() -> Self {
        Self {
            universe: jdk_universe(),
        }
    }
}

impl SymbolTableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve against `universe` instead of the built-in JDK subset.
    pub fn with_universe(universe: Arc<TypeUniverse>) -> Self {
        Self { universe }
    }
}

impl TypeResolver for SymbolTableResolver {
    fn resolve_type(
        &self,
        translation: &Translation,
        expr: ExprId,
        cancel: &CancellationToken,
    ) -> ResolveResult<ResolvedType> {
        let resolution = Resolution {
            translation,
            scope: translation.type_scope(self.universe.clone()),
            cancel,
        };
        let resolved = resolution.resolve(expr, 0);
        trace!(?expr, ok = resolved.is_ok(), "resolved expression type");
        resolved
    }
}

/// One resolution request.
struct Resolution<'a> {
    translation: &'a Translation,
    scope: Arc<TypeScope>,
    cancel: &'a CancellationToken,
}

impl Resolution<'_> {
    fn resolve(&self, id: ExprId, depth: usize) -> ResolveResult<ResolvedType> {
        if self.cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        if depth > MAX_RESOLVE_DEPTH {
            return Err(ResolveError::TooDeep(MAX_RESOLVE_DEPTH));
        }
        let data = self.translation.expr(id).ok_or(ResolveError::Incomplete)?;
        let depth = depth + 1;

        match &data.expr {
            Expr::Missing => Err(ResolveError::Incomplete),
            Expr::Literal(kind) => self.literal(*kind),
            Expr::Name(name) => {
                if let Some(local) = self.translation.local_at(name, data.range.start()) {
                    return self.local(local, depth);
                }
                if let Some(owner) = data.enclosing_type.as_deref() {
                    let owner = self.scope.reference(owner)?;
                    if let Some(field) = owner.field(name)? {
                        return owner.scope().resolve(&field.ty);
                    }
                }
                self.type_named(name)
                    .ok_or_else(|| ResolveError::UnknownName(name.clone()))
            }
            Expr::This => self.enclosing(data.enclosing_type.as_deref(), "this"),
            Expr::Super => {
                let this = self.enclosing(data.enclosing_type.as_deref(), "super")?;
                let ResolvedType::Reference(this) = this else {
                    return Err(ResolveError::Unsupported("super of a non-reference type"));
                };
                match this.decl().supertypes.first() {
                    Some(supertype) => this.scope().resolve(supertype),
                    None => self.named(OBJECT_TYPE),
                }
            }
            Expr::FieldAccess { scope, name } => {
                let Some(name) = name else {
                    return Err(ResolveError::Incomplete);
                };
                match self.resolve(*scope, depth) {
                    Ok(owner) => self.field_of(&owner, name),
                    Err(err) => {
                        // `java.util.List` parses as field accesses on `java`
                        let qualified = self
                            .qualified_path(*scope)
                            .map(|path| format!("{path}.{name}"))
                            .ok_or_else(|| err.clone())?;
                        self.type_named(&qualified).ok_or(err)
                    }
                }
            }
            Expr::MethodCall { scope, name, args } => {
                let owner = match scope {
                    Some(scope) => self.resolve(*scope, depth)?,
                    None => self.enclosing(data.enclosing_type.as_deref(), "method call")?,
                };
                self.method_of(&owner, name, args.len())
            }
            Expr::ArrayAccess { array, .. } => match self.resolve(*array, depth)? {
                ResolvedType::Array(element) => Ok(*element),
                _ => Err(ResolveError::Unsupported("indexing a non-array")),
            },
            Expr::New { ty, .. } => self.scope.resolve(ty),
            Expr::ClassLiteral => self.named("java.lang.Class"),
            Expr::Cast { ty, .. } => self.scope.resolve(ty),
            Expr::Paren(inner) => self.resolve(*inner, depth),
            Expr::Unary { op, operand } => {
                if *op == SyntaxKind::BANG {
                    return Ok(ResolvedType::Primitive(PrimitiveType::Boolean));
                }
                let operand = self.resolve(*operand, depth)?;
                match (*op, operand) {
                    (SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS, operand) => Ok(operand),
                    (_, ResolvedType::Primitive(primitive)) => primitive
                        .promote(PrimitiveType::Int)
                        .map(ResolvedType::Primitive)
                        .ok_or(ResolveError::Unsupported("unary operand type")),
                    (_, operand) => Ok(operand),
                }
            }
            Expr::Postfix { operand, .. } => self.resolve(*operand, depth),
            Expr::Binary { op, lhs, rhs } => self.binary(*op, *lhs, *rhs, depth),
            Expr::InstanceOf { .. } => Ok(ResolvedType::Primitive(PrimitiveType::Boolean)),
            Expr::Conditional {
                then_branch,
                else_branch,
                ..
            } => self
                .resolve(*then_branch, depth)
                .or_else(|_| self.resolve(*else_branch, depth)),
            Expr::Assign { target, .. } => self.resolve(*target, depth),
            Expr::Lambda => Err(ResolveError::Unsupported("lambda")),
            Expr::MethodRef { .. } => Err(ResolveError::Unsupported("method reference")),
        }
    }

    fn literal(&self, kind: LiteralKind) -> ResolveResult<ResolvedType> {
        let primitive = match kind {
            LiteralKind::Int => PrimitiveType::Int,
            LiteralKind::Long => PrimitiveType::Long,
            LiteralKind::Float => PrimitiveType::Float,
            LiteralKind::Double => PrimitiveType::Double,
            LiteralKind::Char => PrimitiveType::Char,
            LiteralKind::Boolean => PrimitiveType::Boolean,
            LiteralKind::String => return self.named("java.lang.String"),
            LiteralKind::BigDecimal => return self.named("java.math.BigDecimal"),
            LiteralKind::BigInteger => return self.named("java.math.BigInteger"),
            LiteralKind::Null => return Err(ResolveError::Unsupported("null literal")),
        };
        Ok(ResolvedType::Primitive(primitive))
    }

    fn local(&self, local: &LocalVar, depth: usize) -> ResolveResult<ResolvedType> {
        if !local.ty.is_var() {
            return self.scope.resolve(&local.ty);
        }
        if let Some(initializer) = local.initializer {
            return self.resolve(initializer, depth);
        }
        match local.iterable {
            Some(iterable) => match self.resolve(iterable, depth)? {
                ResolvedType::Array(element) => Ok(*element),
                _ => Err(ResolveError::Unsupported("element type of a non-array iterable")),
            },
            None => Err(ResolveError::Unsupported("implicitly typed variable")),
        }
    }

    fn named(&self, qualified_name: &str) -> ResolveResult<ResolvedType> {
        self.scope
            .reference(qualified_name)
            .map(ResolvedType::Reference)
    }

    fn type_named(&self, name: &str) -> Option<ResolvedType> {
        self.scope.resolve(&TypeName::new(name, 0)).ok()
    }

    fn enclosing(&self, owner: Option<&str>, what: &'static str) -> ResolveResult<ResolvedType> {
        let owner = owner.ok_or(ResolveError::NoEnclosingType(what))?;
        self.named(owner)
    }

    /// Dotted text of a chain of plain names, e.g. `java.util`.
    fn qualified_path(&self, id: ExprId) -> Option<String> {
        match &self.translation.expr(id)?.expr {
            Expr::Name(name) => Some(name.to_string()),
            Expr::FieldAccess {
                scope,
                name: Some(name),
            } => Some(format!("{}.{name}", self.qualified_path(*scope)?)),
            _ => None,
        }
    }

    fn field_of(&self, owner: &ResolvedType, name: &str) -> ResolveResult<ResolvedType> {
        match owner {
            ResolvedType::Array(_) if name == ARRAY_LENGTH_FIELD => {
                Ok(ResolvedType::Primitive(PrimitiveType::Int))
            }
            ResolvedType::Reference(reference) => {
                if let Some(field) = reference.field(name)? {
                    return reference.scope().resolve(&field.ty);
                }
                // Nested type selected through its outer type
                let nested = format!("{}.{name}", reference.qualified_name());
                reference
                    .scope()
                    .reference(&nested)
                    .map(ResolvedType::Reference)
                    .map_err(|_| ResolveError::NoSuchMember {
                        owner: reference.qualified_name().into(),
                        member: name.into(),
                    })
            }
            other => Err(ResolveError::NoSuchMember {
                owner: other.describe().into(),
                member: name.into(),
            }),
        }
    }

    fn method_of(
        &self,
        owner: &ResolvedType,
        name: &str,
        arg_count: usize,
    ) -> ResolveResult<ResolvedType> {
        let reference = match owner {
            ResolvedType::Reference(reference) => reference.clone(),
            // Arrays have the methods of Object
            ResolvedType::Array(_) => self.scope.reference(OBJECT_TYPE)?,
            ResolvedType::Primitive(primitive) => {
                return Err(ResolveError::NoSuchMember {
                    owner: primitive.keyword().into(),
                    member: name.into(),
                });
            }
        };
        let candidates = reference.methods_named(name)?;
        if candidates.is_empty() {
            return Err(ResolveError::NoSuchMember {
                owner: reference.qualified_name().into(),
                member: name.into(),
            });
        }
        let matching: Vec<_> = candidates
            .iter()
            .filter(|method| method.param_count == arg_count)
            .collect();
        let considered = if matching.is_empty() {
            candidates.iter().collect()
        } else {
            matching
        };
        let return_type = &considered[0].return_type;
        if considered
            .iter()
            .any(|method| &method.return_type != return_type)
        {
            return Err(ResolveError::AmbiguousCall(name.into()));
        }
        reference.scope().resolve(return_type)
    }

    fn binary(
        &self,
        op: SyntaxKind,
        lhs: ExprId,
        rhs: ExprId,
        depth: usize,
    ) -> ResolveResult<ResolvedType> {
        let boolean = Ok(ResolvedType::Primitive(PrimitiveType::Boolean));
        match op {
            SyntaxKind::AMP_AMP
            | SyntaxKind::PIPE_PIPE
            | SyntaxKind::EQ_EQ
            | SyntaxKind::BANG_EQ
            | SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::LT_EQ
            | SyntaxKind::GT_EQ => return boolean,
            _ => {}
        }
        let lhs = self.resolve(lhs, depth)?;
        let rhs = self.resolve(rhs, depth);
        if op == SyntaxKind::PLUS {
            let string = "java.lang.String";
            if lhs.is_reference_to(string)
                || rhs.as_ref().is_ok_and(|rhs| rhs.is_reference_to(string))
            {
                return self.named(string);
            }
        }
        match (lhs, rhs?) {
            (ResolvedType::Primitive(PrimitiveType::Boolean), ResolvedType::Primitive(PrimitiveType::Boolean))
                if matches!(op, SyntaxKind::AMP | SyntaxKind::PIPE | SyntaxKind::CARET) =>
            {
                boolean
            }
            (ResolvedType::Primitive(left), _)
                if matches!(op, SyntaxKind::LT_LT | SyntaxKind::GT_GT | SyntaxKind::GT_GT_GT) =>
            {
                left.promote(PrimitiveType::Int)
                    .map(ResolvedType::Primitive)
                    .ok_or(ResolveError::Unsupported("shift operand type"))
            }
            (ResolvedType::Primitive(left), ResolvedType::Primitive(right)) => left
                .promote(right)
                .map(ResolvedType::Primitive)
                .ok_or(ResolveError::Unsupported("binary operand types")),
            _ => Err(ResolveError::Unsupported("binary operand types")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    /// Resolve the outermost expression ending right before the last `.` of `text`.
    fn resolve_before_last_dot(text: &str) -> ResolveResult<ResolvedType> {
        let parse = parse(text);
        let translation = super::super::translate::translate(&parse.syntax(), parse.tokens());
        let dot = parse
            .tokens()
            .iter()
            .filter(|token| token.kind == SyntaxKind::DOT)
            .last()
            .unwrap();
        let scope = parse.tokens().tokens()[..dot.index]
            .iter()
            .rev()
            .find(|token| !token.is_trivia())
            .unwrap();
        let expr = translation.expr_at_token(scope.index).unwrap();
        SymbolTableResolver::new().resolve_type(&translation, expr, &CancellationToken::new())
    }

    fn describe(text: &str) -> String {
        resolve_before_last_dot(text).unwrap().describe()
    }

    #[test]
    fn type_names_and_static_fields() {
        assert_eq!(describe("rule R { do { System."), "java.lang.System");
        assert_eq!(describe("rule R { do { System.out."), "java.io.PrintStream");
        assert_eq!(describe("rule R { do { java.util.List."), "java.util.List");
        assert_eq!(describe("rule R { do { Math.PI."), "double");
    }

    #[test]
    fn locals_and_var_initializers() {
        assert_eq!(describe("rule R { do { String s = \"\"; s."), "java.lang.String");
        assert_eq!(describe("rule R { do { var b = new StringBuilder(); b."), "java.lang.StringBuilder");
        assert_eq!(describe("rule R { do { int[] xs = null; xs[0]."), "int");
        assert_eq!(describe("rule R { do { String[] xs = null; for (var x : xs) { x."), "java.lang.String");
        assert_eq!(
            describe("class Person { } rule R { Person p : /persons, do { p."),
            "Person"
        );
    }

    #[test]
    fn method_calls_and_expressions() {
        assert_eq!(describe("rule R { do { \"a\".trim()."), "java.lang.String");
        assert_eq!(describe("rule R { do { \"a\".length()."), "int");
        assert_eq!(describe("rule R { do { (\"a\" + 1)."), "java.lang.String");
        assert_eq!(describe("rule R { do { (1 + 2L)."), "long");
        assert_eq!(describe("rule R { do { ((Object) x)."), "java.lang.Object");
        assert_eq!(describe("rule R { do { 3.2B."), "java.math.BigDecimal");
        assert_eq!(describe("rule R { do { String.class."), "java.lang.Class");
    }

    #[test]
    fn shifts_keep_the_promoted_left_operand() {
        assert_eq!(describe("rule R { do { long x = 1; (x >> 1)."), "long");
        assert_eq!(describe("rule R { do { byte b = 1; (b >>> 2)."), "int");
        assert_eq!(describe("rule R { do { (1 << 3L)."), "int");
        assert_eq!(describe("rule R { do { (1 > 2)."), "boolean");
    }

    #[test]
    fn fields_and_methods_of_the_enclosing_class() {
        let text = "package p;\n\
                    class Address { }\n\
                    class Person {\n\
                        private Address address;\n\
                        Address home() { return address; }\n\
                        void run() { address.";
        assert_eq!(describe(text), "p.Address");
        let text = "class Person { String name; void run() { this.name.";
        assert_eq!(describe(text), "java.lang.String");
        let text = "class Person { String name() { return null; } void run() { name().";
        assert_eq!(describe(text), "java.lang.String");
    }

    #[test]
    fn failures() {
        assert_eq!(
            resolve_before_last_dot("rule R { do { foo."),
            Err(ResolveError::UnknownName("foo".into()))
        );
        assert_eq!(
            resolve_before_last_dot("rule R { do { this."),
            Err(ResolveError::NoEnclosingType("this"))
        );
        assert!(matches!(
            resolve_before_last_dot("rule R { do { System.nothing."),
            Err(ResolveError::NoSuchMember { .. })
        ));
    }

    #[test]
    fn conflicting_overload_return_types_are_ambiguous() {
        let text = "class A { int f(int a) { return 0; } String f(String s) { return s; } void g() { f(x).";
        assert_eq!(
            resolve_before_last_dot(text),
            Err(ResolveError::AmbiguousCall("f".into()))
        );
    }

    #[test]
    fn cancelled_resolution() {
        let parse = parse("rule R { do { System.");
        let translation = super::super::translate::translate(&parse.syntax(), parse.tokens());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (id, _) = translation.exprs().iter().next().unwrap();
        assert_eq!(
            SymbolTableResolver::new().resolve_type(&translation, id, &cancel),
            Err(ResolveError::Cancelled)
        );
    }
}
