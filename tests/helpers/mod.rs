//! Shared test helpers.

pub mod completion_helpers;
pub mod source_fixtures;
