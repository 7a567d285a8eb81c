//! Domain constants shared across the library.

/// Label returned when the engine has nothing better to offer.
pub const PLACEHOLDER_LABEL: &str = "IDENTIFIER";

/// Members whose names start with this character are compiler-synthesized.
pub const SYNTHETIC_MEMBER_PREFIX: char = '$';

/// Package whose types are visible without an import.
pub const IMPLICIT_PACKAGE: &str = "java.lang";

/// Root of every class hierarchy.
pub const OBJECT_TYPE: &str = "java.lang.Object";

/// Accessor prefixes recognised when synthesizing property names.
pub const GETTER_PREFIX: &str = "get";
pub const BOOLEAN_GETTER_PREFIX: &str = "is";

/// Pseudo-field exposed by every array type.
pub const ARRAY_LENGTH_FIELD: &str = "length";

/// Candidate collection gives up after this many expectation checks at the caret.
pub const DEFAULT_STEP_BUDGET: usize = 4096;

/// Nesting limit when resolving chained expressions and `var` initializers.
pub const MAX_RESOLVE_DEPTH: usize = 64;

/// Parser recursion limit for nested expressions, statements and types.
pub const MAX_NESTING: usize = 128;
