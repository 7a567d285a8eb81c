//! Foundation types for the DRLX toolchain.
//!
//! This module provides fundamental types used throughout the library:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`Position`], [`Span`] - Line/column positions used by editor requests
//! - Domain constants (placeholder label, accessor prefixes, limits)
//!
//! This module has NO dependencies on other drlx modules.

pub mod constants;
mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Position, Span};
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
