//! # Semantic Analysis
//!
//! Answers "what type does this expression have?" for member completion:
//!
//! - [`translate`] lowers a parsed document into an expression AST plus
//!   symbol information (locals, declared types, imports)
//! - [`types`] models types and their members, [`jdk`] provides the built-in
//!   `java.*` subset
//! - [`resolver`] resolves an expression to a [`ResolvedType`] behind the
//!   [`TypeResolver`] trait

pub mod ast;
mod error;
pub mod jdk;
pub mod resolver;
pub mod translate;
pub mod types;

pub use ast::{Expr, ExprArena, ExprData, ExprId, LiteralKind};
pub use error::{ResolveError, ResolveResult};
pub use jdk::jdk_universe;
pub use resolver::{SymbolTableResolver, TypeResolver};
pub use translate::{LocalVar, Translation, translate};
pub use types::{
    FieldDescriptor, Import, MethodDescriptor, PrimitiveType, ReferenceType, ResolvedType,
    TypeDecl, TypeKind, TypeName, TypeScope, TypeUniverse, Visibility,
};
