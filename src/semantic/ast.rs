//! Expression AST
//!
//! A conventional expression tree lowered from the CST. Nodes live in an
//! arena and refer to each other by [`ExprId`]; a missing operand in
//! incomplete code is an explicit [`Expr::Missing`] node.

use smol_str::SmolStr;
use text_size::TextRange;

use super::types::TypeName;
use crate::parser::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl ExprId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    BigDecimal,
    BigInteger,
    Char,
    String,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Missing,
    Literal(LiteralKind),
    Name(SmolStr),
    This,
    Super,
    FieldAccess {
        scope: ExprId,
        name: Option<SmolStr>,
    },
    MethodCall {
        scope: Option<ExprId>,
        name: SmolStr,
        args: Vec<ExprId>,
    },
    ArrayAccess {
        array: ExprId,
        index: ExprId,
    },
    New {
        ty: TypeName,
        scope: Option<ExprId>,
    },
    ClassLiteral,
    Cast {
        ty: TypeName,
        expr: ExprId,
    },
    Paren(ExprId),
    Unary {
        op: SyntaxKind,
        operand: ExprId,
    },
    Postfix {
        op: SyntaxKind,
        operand: ExprId,
    },
    Binary {
        op: SyntaxKind,
        lhs: ExprId,
        rhs: ExprId,
    },
    InstanceOf {
        expr: ExprId,
        ty: TypeName,
    },
    Conditional {
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    Assign {
        op: SyntaxKind,
        target: ExprId,
        value: ExprId,
    },
    Lambda,
    MethodRef {
        scope: ExprId,
    },
}

/// An expression with the context it appeared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprData {
    pub expr: Expr,
    pub range: TextRange,
    /// Qualified name of the innermost type declaration around the expression.
    pub enclosing_type: Option<SmolStr>,
}

#[derive(Debug, Clone, Default)]
pub struct ExprArena {
    exprs: Vec<ExprData>,
}

impl ExprArena {
    pub fn alloc(&mut self, data: ExprData) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(data);
        id
    }

    pub fn get(&self, id: ExprId) -> Option<&ExprData> {
        self.exprs.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &ExprData)> {
        self.exprs
            .iter()
            .enumerate()
            .map(|(index, data)| (ExprId(index as u32), data))
    }
}

impl std::ops::Index<ExprId> for ExprArena {
    type Output = ExprData;

    fn index(&self, id: ExprId) -> &ExprData {
        &self.exprs[id.index()]
    }
}
