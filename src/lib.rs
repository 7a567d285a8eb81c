//! # drlx-base
//!
//! Context-aware code completion for DRLX rule files: a tolerant parser,
//! grammar-driven candidate collection and type-based member completion.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Completion orchestration, document store
//!   ↓
//! semantic  → Expression AST, type model, type resolution
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, candidate collection
//!   ↓
//! base      → Primitives (Position, Span, LineIndex, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → semantic → ide)
// ============================================================================

/// Foundation types: Position, Span, LineIndex, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, grammar traits
pub mod parser;

/// Semantic model: translation and type resolution
pub mod semantic;

/// IDE features: completion, document store
pub mod ide;

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextRange, TextSize};
pub use ide::{CompletionItem, CompletionKind, completions};
