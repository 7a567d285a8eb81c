//! Parser tests
//!
//! Tests for:
//! - Lossless, tolerant parsing
//! - Candidate collection at the caret

mod tests_candidates;
mod tests_tolerance;
