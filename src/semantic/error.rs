//! Error types for expression type resolution

use smol_str::SmolStr;
use thiserror::Error;

/// Why an expression's type could not be determined.
///
/// Completion treats every variant the same way (fall back to the
/// placeholder), the variants exist for logging and tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown name: {0}")]
    UnknownName(SmolStr),

    #[error("unknown type: {0}")]
    UnknownType(SmolStr),

    #[error("no member `{member}` in {owner}")]
    NoSuchMember { owner: SmolStr, member: SmolStr },

    #[error("ambiguous call to `{0}`")]
    AmbiguousCall(SmolStr),

    #[error("no enclosing type for `{0}`")]
    NoEnclosingType(&'static str),

    #[error("unsupported expression: {0}")]
    Unsupported(&'static str),

    #[error("incomplete expression")]
    Incomplete,

    #[error("resolution nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("resolution cancelled")]
    Cancelled,
}

pub type ResolveResult<T> = Result<T, ResolveError>;
