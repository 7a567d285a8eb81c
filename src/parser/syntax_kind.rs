//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! Token kinds follow the Java lexical grammar extended with the DRLX
//! `rule` keyword and the `B`/`I` suffixed big-number literals.

/// All syntax kinds (tokens and nodes) in DRLX
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, rules, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,               // identifier
    INTEGER_LITERAL,     // 42, 0x2A, 42L
    FLOAT_LITERAL,       // 3.14, 1e3, 2f
    BIG_DECIMAL_LITERAL, // 3.2B
    BIG_INTEGER_LITERAL, // 10I
    CHAR_LITERAL,        // 'c'
    STRING_LITERAL,      // "hello"
    TEXT_BLOCK,          // """..."""

    // =========================================================================
    // PUNCTUATION AND OPERATORS
    // =========================================================================
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    SEMICOLON,          // ;
    COMMA,              // ,
    DOT,                // .
    ELLIPSIS,           // ...
    AT,                 // @
    COLON_COLON,        // ::
    EQ,                 // =
    GT,                 // >
    LT,                 // <
    BANG,               // !
    TILDE,              // ~
    QUESTION,           // ?
    COLON,              // :
    ARROW,              // ->
    EQ_EQ,              // ==
    LT_EQ,              // <=
    GT_EQ,              // >=
    BANG_EQ,            // !=
    AMP_AMP,            // &&
    PIPE_PIPE,          // ||
    PLUS_PLUS,          // ++
    MINUS_MINUS,        // --
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    SLASH,              // /
    AMP,                // &
    PIPE,               // |
    CARET,              // ^
    PERCENT,            // %
    LT_LT,              // <<
    GT_GT,              // >> (two adjacent GT tokens)
    GT_GT_GT,           // >>> (three adjacent GT tokens)
    PLUS_EQ,            // +=
    MINUS_EQ,           // -=
    STAR_EQ,            // *=
    SLASH_EQ,           // /=
    AMP_EQ,             // &=
    PIPE_EQ,            // |=
    CARET_EQ,           // ^=
    PERCENT_EQ,         // %=
    LT_LT_EQ,           // <<=
    GT_GT_EQ,           // >>=
    GT_GT_GT_EQ,        // >>>=

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    ABSTRACT_KW,
    ASSERT_KW,
    BOOLEAN_KW,
    BREAK_KW,
    BYTE_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CLASS_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EXTENDS_KW,
    FINAL_KW,
    FINALLY_KW,
    FLOAT_KW,
    FOR_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORT_KW,
    INSTANCEOF_KW,
    INT_KW,
    INTERFACE_KW,
    LONG_KW,
    NATIVE_KW,
    NEW_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    RULE_KW,
    SHORT_KW,
    STATIC_KW,
    STRICTFP_KW,
    SUPER_KW,
    SWITCH_KW,
    SYNCHRONIZED_KW,
    THIS_KW,
    THROW_KW,
    THROWS_KW,
    TRANSIENT_KW,
    TRY_KW,
    VAR_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,

    // Literal keywords
    TRUE_KW,
    FALSE_KW,
    NULL_KW,

    // =========================================================================
    // NODES
    // =========================================================================

    // File structure
    SOURCE_FILE,
    PACKAGE_DECL,
    IMPORT_DECL,
    QUALIFIED_NAME,
    MODIFIERS,
    ANNOTATION,
    ANNOTATION_NAME,
    ANNOTATION_ARGS,
    ELEMENT_VALUE_PAIR,

    // Type declarations
    CLASS_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    ENUM_CONSTANT,
    TYPE_PARAMS,
    TYPE_PARAM,
    EXTENDS_CLAUSE,
    IMPLEMENTS_CLAUSE,
    CLASS_BODY,

    // Members
    FIELD_DECL,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    INITIALIZER,
    PARAM_LIST,
    PARAM,
    THROWS_CLAUSE,
    VARIABLE_DECLARATOR,
    ARRAY_INITIALIZER,

    // Type references
    TYPE,
    TYPE_ARGS,

    // Rules
    RULE_DECL,
    RULE_BODY,
    RULE_PATTERN,
    OOPATH,
    OOPATH_CHUNK,
    RULE_CONSEQUENCE,

    // Statements
    BLOCK,
    LOCAL_VAR_DECL,
    IF_STMT,
    FOR_STMT,
    WHILE_STMT,
    DO_WHILE_STMT,
    TRY_STMT,
    RESOURCE_SPEC,
    CATCH_CLAUSE,
    FINALLY_CLAUSE,
    SWITCH_STMT,
    SWITCH_CASE,
    RETURN_STMT,
    THROW_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    ASSERT_STMT,
    SYNCHRONIZED_STMT,
    EMPTY_STMT,
    EXPR_STMT,

    // Expressions
    LITERAL,
    NAME_EXPR,
    THIS_EXPR,
    SUPER_EXPR,
    PAREN_EXPR,
    FIELD_ACCESS,
    METHOD_CALL,
    ARG_LIST,
    ARRAY_ACCESS,
    NEW_EXPR,
    CLASS_LITERAL,
    METHOD_REF,
    CAST_EXPR,
    UNARY_EXPR,
    POSTFIX_EXPR,
    BINARY_EXPR,
    INSTANCEOF_EXPR,
    CONDITIONAL_EXPR,
    ASSIGN_EXPR,
    LAMBDA_EXPR,
    LAMBDA_PARAMS,

    // Identifier rule: declared names and member selectors
    IDENTIFIER,

    // Special
    ERROR,
    EOF,

    #[doc(hidden)]
    __LAST,
}

const _: () = assert!((SyntaxKind::__LAST as u16) <= 256, "TokenSet holds at most 256 kinds");

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::NULL_KW as u16)
    }

    /// Check if this is a punctuation or operator token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::GT_GT_GT_EQ as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER_LITERAL
                | Self::FLOAT_LITERAL
                | Self::BIG_DECIMAL_LITERAL
                | Self::BIG_INTEGER_LITERAL
                | Self::CHAR_LITERAL
                | Self::STRING_LITERAL
                | Self::TEXT_BLOCK
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Check if this kind is produced by the lexer (as opposed to the parser)
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::NULL_KW as u16) || matches!(self, Self::ERROR | Self::EOF)
    }

    /// Vocabulary display name of a token kind.
    ///
    /// Fixed-text tokens render quoted (`'class'`, `'{'`), variable-text
    /// tokens render as their category name. Composite kinds have no display
    /// name and return an empty string.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::WHITESPACE => "WS",
            Self::LINE_COMMENT => "LINE_COMMENT",
            Self::BLOCK_COMMENT => "COMMENT",
            Self::IDENT => "IDENTIFIER",
            Self::INTEGER_LITERAL => "DECIMAL_LITERAL",
            Self::FLOAT_LITERAL => "FLOAT_LITERAL",
            Self::BIG_DECIMAL_LITERAL => "DRLX_BIG_DECIMAL_LITERAL",
            Self::BIG_INTEGER_LITERAL => "DRLX_BIG_INTEGER_LITERAL",
            Self::CHAR_LITERAL => "CHAR_LITERAL",
            Self::STRING_LITERAL => "STRING_LITERAL",
            Self::TEXT_BLOCK => "TEXT_BLOCK",
            Self::L_PAREN => "'('",
            Self::R_PAREN => "')'",
            Self::L_BRACE => "'{'",
            Self::R_BRACE => "'}'",
            Self::L_BRACKET => "'['",
            Self::R_BRACKET => "']'",
            Self::SEMICOLON => "';'",
            Self::COMMA => "','",
            Self::DOT => "'.'",
            Self::ELLIPSIS => "'...'",
            Self::AT => "'@'",
            Self::COLON_COLON => "'::'",
            Self::EQ => "'='",
            Self::GT => "'>'",
            Self::LT => "'<'",
            Self::BANG => "'!'",
            Self::TILDE => "'~'",
            Self::QUESTION => "'?'",
            Self::COLON => "':'",
            Self::ARROW => "'->'",
            Self::EQ_EQ => "'=='",
            Self::LT_EQ => "'<='",
            Self::GT_EQ => "'>='",
            Self::BANG_EQ => "'!='",
            Self::AMP_AMP => "'&&'",
            Self::PIPE_PIPE => "'||'",
            Self::PLUS_PLUS => "'++'",
            Self::MINUS_MINUS => "'--'",
            Self::PLUS => "'+'",
            Self::MINUS => "'-'",
            Self::STAR => "'*'",
            Self::SLASH => "'/'",
            Self::AMP => "'&'",
            Self::PIPE => "'|'",
            Self::CARET => "'^'",
            Self::PERCENT => "'%'",
            Self::LT_LT => "'<<'",
            Self::PLUS_EQ => "'+='",
            Self::MINUS_EQ => "'-='",
            Self::STAR_EQ => "'*='",
            Self::SLASH_EQ => "'/='",
            Self::AMP_EQ => "'&='",
            Self::PIPE_EQ => "'|='",
            Self::CARET_EQ => "'^='",
            Self::PERCENT_EQ => "'%='",
            Self::GT_GT => "'>>'",
            Self::GT_GT_GT => "'>>>'",
            Self::LT_LT_EQ => "'<<='",
            Self::GT_GT_EQ => "'>>='",
            Self::GT_GT_GT_EQ => "'>>>='",
            Self::ABSTRACT_KW => "'abstract'",
            Self::ASSERT_KW => "'assert'",
            Self::BOOLEAN_KW => "'boolean'",
            Self::BREAK_KW => "'break'",
            Self::BYTE_KW => "'byte'",
            Self::CASE_KW => "'case'",
            Self::CATCH_KW => "'catch'",
            Self::CHAR_KW => "'char'",
            Self::CLASS_KW => "'class'",
            Self::CONTINUE_KW => "'continue'",
            Self::DEFAULT_KW => "'default'",
            Self::DO_KW => "'do'",
            Self::DOUBLE_KW => "'double'",
            Self::ELSE_KW => "'else'",
            Self::ENUM_KW => "'enum'",
            Self::EXTENDS_KW => "'extends'",
            Self::FINAL_KW => "'final'",
            Self::FINALLY_KW => "'finally'",
            Self::FLOAT_KW => "'float'",
            Self::FOR_KW => "'for'",
            Self::IF_KW => "'if'",
            Self::IMPLEMENTS_KW => "'implements'",
            Self::IMPORT_KW => "'import'",
            Self::INSTANCEOF_KW => "'instanceof'",
            Self::INT_KW => "'int'",
            Self::INTERFACE_KW => "'interface'",
            Self::LONG_KW => "'long'",
            Self::NATIVE_KW => "'native'",
            Self::NEW_KW => "'new'",
            Self::PACKAGE_KW => "'package'",
            Self::PRIVATE_KW => "'private'",
            Self::PROTECTED_KW => "'protected'",
            Self::PUBLIC_KW => "'public'",
            Self::RETURN_KW => "'return'",
            Self::RULE_KW => "'rule'",
            Self::SHORT_KW => "'short'",
            Self::STATIC_KW => "'static'",
            Self::STRICTFP_KW => "'strictfp'",
            Self::SUPER_KW => "'super'",
            Self::SWITCH_KW => "'switch'",
            Self::SYNCHRONIZED_KW => "'synchronized'",
            Self::THIS_KW => "'this'",
            Self::THROW_KW => "'throw'",
            Self::THROWS_KW => "'throws'",
            Self::TRANSIENT_KW => "'transient'",
            Self::TRY_KW => "'try'",
            Self::VAR_KW => "'var'",
            Self::VOID_KW => "'void'",
            Self::VOLATILE_KW => "'volatile'",
            Self::WHILE_KW => "'while'",
            Self::TRUE_KW => "'true'",
            Self::FALSE_KW => "'false'",
            Self::NULL_KW => "'null'",
            Self::ERROR => "ERROR",
            Self::EOF => "EOF",
            _ => "",
        }
    }

    /// Convert a raw discriminant back into a kind, if it is in range.
    pub fn from_u16(raw: u16) -> Option<SyntaxKind> {
        if raw < SyntaxKind::__LAST as u16 {
            // Safety: the enum is repr(u16) with contiguous discriminants below __LAST
            Some(unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) })
        } else {
            None
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.display_name() {
            "" => write!(f, "{self:?}"),
            name => f.write_str(name),
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrlxLanguage {}

impl rowan::Language for DrlxLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<DrlxLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<DrlxLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<DrlxLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_range_covers_java_and_drlx_keywords() {
        assert!(SyntaxKind::CLASS_KW.is_keyword());
        assert!(SyntaxKind::RULE_KW.is_keyword());
        assert!(SyntaxKind::NULL_KW.is_keyword());
        assert!(!SyntaxKind::IDENT.is_keyword());
        assert!(!SyntaxKind::GT_GT_GT_EQ.is_keyword());
    }

    #[test]
    fn display_names_quote_fixed_text() {
        assert_eq!(SyntaxKind::CLASS_KW.display_name(), "'class'");
        assert_eq!(SyntaxKind::L_BRACE.display_name(), "'{'");
        assert_eq!(SyntaxKind::IDENT.display_name(), "IDENTIFIER");
        assert_eq!(SyntaxKind::BLOCK.display_name(), "");
    }

    #[test]
    fn raw_round_trip() {
        let raw: rowan::SyntaxKind = SyntaxKind::RULE_PATTERN.into();
        assert_eq!(SyntaxKind::from(raw), SyntaxKind::RULE_PATTERN);
        assert_eq!(SyntaxKind::from_u16(SyntaxKind::__LAST as u16), None);
    }
}
