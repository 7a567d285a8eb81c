//! IDE feature tests
//!
//! Tests for:
//! - Keyword completion from grammar candidates
//! - Member completion after `.`
//! - Fallback behaviour for any input
//! - The document store

mod tests_analysis;
mod tests_completion;
mod tests_member_completion;
mod tests_properties;
