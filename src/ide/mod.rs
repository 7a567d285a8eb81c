//! IDE features: code completion for DRLX documents.
//!
//! This module sits between the parser/semantic layers and an editor
//! protocol server. It uses its own types; conversion to protocol types
//! happens at the server boundary.
//!
//! ## Pipeline
//!
//! ```text
//! text, caret
//!     ↓ parse                     (parser)
//!     ↓ token_index_at            caret → token index
//!     ↓ CandidateCollector        what the grammar accepts there
//!     ↓ classify                  keyword / major name / minor name
//!     ├─ keywords                 candidate tokens as lowercase text
//!     ├─ placeholder              "IDENTIFIER"
//!     └─ semantic_completions     members of the type before the dot
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use drlx::base::Position;
//! use drlx::ide::completions;
//!
//! let items = completions("rule R { do { System.", Some(Position::new(0, 21)));
//! ```

mod analysis;
mod caret;
mod classify;
mod completion;
mod locate;
mod options;
mod semantic_completion;

pub use analysis::{AnalysisHost, Diagnostic};
pub use caret::token_index_at;
pub use classify::{CandidateContext, classify};
pub use completion::{
    CompletionEngine, CompletionItem, CompletionKind, CompletionRequest, completion_item_strings,
    completions,
};
pub use locate::locate;
pub use options::CompletionOptions;
pub use semantic_completion::{property_name, semantic_completions};
