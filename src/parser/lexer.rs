//! Logos-based lexer for DRLX
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up
//! in exactly one token; unrecognised characters become `ERROR` tokens.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\x0C]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$]*")]
    Ident,

    #[regex(r"(0|[1-9][0-9_]*)[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    #[regex(r"0[0-7_]+[lL]?")]
    #[regex(r"0[bB][01_]+[lL]?")]
    IntegerLiteral,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    FloatLiteral,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?[bB]")]
    BigDecimalLiteral,

    #[regex(r"[0-9][0-9_]*[iI]")]
    BigIntegerLiteral,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    CharLiteral,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    TextBlock,

    // =========================================================================
    // PUNCTUATION AND OPERATORS
    // =========================================================================
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("...")]
    Ellipsis,

    #[token("@")]
    At,

    #[token("::")]
    ColonColon,

    #[token("=")]
    Eq,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token("!")]
    Bang,

    #[token("~")]
    Tilde,

    #[token("?")]
    Question,

    #[token(":")]
    Colon,

    #[token("->")]
    Arrow,

    #[token("==")]
    EqEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("!=")]
    BangEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    #[token("%")]
    Percent,

    #[token("<<")]
    LtLt,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("&=")]
    AmpEq,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    #[token("%=")]
    PercentEq,

    #[token("<<=")]
    LtLtEq,

    #[token(">>=")]
    GtGtEq,

    #[token(">>>=")]
    GtGtGtEq,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("abstract")]
    AbstractKw,

    #[token("assert")]
    AssertKw,

    #[token("boolean")]
    BooleanKw,

    #[token("break")]
    BreakKw,

    #[token("byte")]
    ByteKw,

    #[token("case")]
    CaseKw,

    #[token("catch")]
    CatchKw,

    #[token("char")]
    CharKw,

    #[token("class")]
    ClassKw,

    #[token("continue")]
    ContinueKw,

    #[token("default")]
    DefaultKw,

    #[token("do")]
    DoKw,

    #[token("double")]
    DoubleKw,

    #[token("else")]
    ElseKw,

    #[token("enum")]
    EnumKw,

    #[token("extends")]
    ExtendsKw,

    #[token("final")]
    FinalKw,

    #[token("finally")]
    FinallyKw,

    #[token("float")]
    FloatKw,

    #[token("for")]
    ForKw,

    #[token("if")]
    IfKw,

    #[token("implements")]
    ImplementsKw,

    #[token("import")]
    ImportKw,

    #[token("instanceof")]
    InstanceofKw,

    #[token("int")]
    IntKw,

    #[token("interface")]
    InterfaceKw,

    #[token("long")]
    LongKw,

    #[token("native")]
    NativeKw,

    #[token("new")]
    NewKw,

    #[token("package")]
    PackageKw,

    #[token("private")]
    PrivateKw,

    #[token("protected")]
    ProtectedKw,

    #[token("public")]
    PublicKw,

    #[token("return")]
    ReturnKw,

    #[token("rule")]
    RuleKw,

    #[token("short")]
    ShortKw,

    #[token("static")]
    StaticKw,

    #[token("strictfp")]
    StrictfpKw,

    #[token("super")]
    SuperKw,

    #[token("switch")]
    SwitchKw,

    #[token("synchronized")]
    SynchronizedKw,

    #[token("this")]
    ThisKw,

    #[token("throw")]
    ThrowKw,

    #[token("throws")]
    ThrowsKw,

    #[token("transient")]
    TransientKw,

    #[token("try")]
    TryKw,

    #[token("var")]
    VarKw,

    #[token("void")]
    VoidKw,

    #[token("volatile")]
    VolatileKw,

    #[token("while")]
    WhileKw,

    #[token("true")]
    TrueKw,

    #[token("false")]
    FalseKw,

    #[token("null")]
    NullKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Ident => SyntaxKind::IDENT,
            IntegerLiteral => SyntaxKind::INTEGER_LITERAL,
            FloatLiteral => SyntaxKind::FLOAT_LITERAL,
            BigDecimalLiteral => SyntaxKind::BIG_DECIMAL_LITERAL,
            BigIntegerLiteral => SyntaxKind::BIG_INTEGER_LITERAL,
            CharLiteral => SyntaxKind::CHAR_LITERAL,
            StringLiteral => SyntaxKind::STRING_LITERAL,
            TextBlock => SyntaxKind::TEXT_BLOCK,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Semicolon => SyntaxKind::SEMICOLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Ellipsis => SyntaxKind::ELLIPSIS,
            At => SyntaxKind::AT,
            ColonColon => SyntaxKind::COLON_COLON,
            Eq => SyntaxKind::EQ,
            Gt => SyntaxKind::GT,
            Lt => SyntaxKind::LT,
            Bang => SyntaxKind::BANG,
            Tilde => SyntaxKind::TILDE,
            Question => SyntaxKind::QUESTION,
            Colon => SyntaxKind::COLON,
            Arrow => SyntaxKind::ARROW,
            EqEq => SyntaxKind::EQ_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            Percent => SyntaxKind::PERCENT,
            LtLt => SyntaxKind::LT_LT,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            AmpEq => SyntaxKind::AMP_EQ,
            PipeEq => SyntaxKind::PIPE_EQ,
            CaretEq => SyntaxKind::CARET_EQ,
            PercentEq => SyntaxKind::PERCENT_EQ,
            LtLtEq => SyntaxKind::LT_LT_EQ,
            GtGtEq => SyntaxKind::GT_GT_EQ,
            GtGtGtEq => SyntaxKind::GT_GT_GT_EQ,
            AbstractKw => SyntaxKind::ABSTRACT_KW,
            AssertKw => SyntaxKind::ASSERT_KW,
            BooleanKw => SyntaxKind::BOOLEAN_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            ByteKw => SyntaxKind::BYTE_KW,
            CaseKw => SyntaxKind::CASE_KW,
            CatchKw => SyntaxKind::CATCH_KW,
            CharKw => SyntaxKind::CHAR_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            DefaultKw => SyntaxKind::DEFAULT_KW,
            DoKw => SyntaxKind::DO_KW,
            DoubleKw => SyntaxKind::DOUBLE_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            ExtendsKw => SyntaxKind::EXTENDS_KW,
            FinalKw => SyntaxKind::FINAL_KW,
            FinallyKw => SyntaxKind::FINALLY_KW,
            FloatKw => SyntaxKind::FLOAT_KW,
            ForKw => SyntaxKind::FOR_KW,
            IfKw => SyntaxKind::IF_KW,
            ImplementsKw => SyntaxKind::IMPLEMENTS_KW,
            ImportKw => SyntaxKind::IMPORT_KW,
            InstanceofKw => SyntaxKind::INSTANCEOF_KW,
            IntKw => SyntaxKind::INT_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            LongKw => SyntaxKind::LONG_KW,
            NativeKw => SyntaxKind::NATIVE_KW,
            NewKw => SyntaxKind::NEW_KW,
            PackageKw => SyntaxKind::PACKAGE_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            ProtectedKw => SyntaxKind::PROTECTED_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            RuleKw => SyntaxKind::RULE_KW,
            ShortKw => SyntaxKind::SHORT_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            StrictfpKw => SyntaxKind::STRICTFP_KW,
            SuperKw => SyntaxKind::SUPER_KW,
            SwitchKw => SyntaxKind::SWITCH_KW,
            SynchronizedKw => SyntaxKind::SYNCHRONIZED_KW,
            ThisKw => SyntaxKind::THIS_KW,
            ThrowKw => SyntaxKind::THROW_KW,
            ThrowsKw => SyntaxKind::THROWS_KW,
            TransientKw => SyntaxKind::TRANSIENT_KW,
            TryKw => SyntaxKind::TRY_KW,
            VarKw => SyntaxKind::VAR_KW,
            VoidKw => SyntaxKind::VOID_KW,
            VolatileKw => SyntaxKind::VOLATILE_KW,
            WhileKw => SyntaxKind::WHILE_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            NullKw => SyntaxKind::NULL_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input)
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_lex_rule_header() {
        let tokens: Vec<_> = Lexer::new("rule R1 {").collect();
        assert_eq!(tokens.len(), 5); // rule, whitespace, R1, whitespace, {
        assert_eq!(tokens[0].kind, SyntaxKind::RULE_KW);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[4].kind, SyntaxKind::L_BRACE);
        assert_eq!(tokens[4].offset, TextSize::new(8));
    }

    #[test]
    fn test_lex_oopath_pattern() {
        assert_eq!(
            kinds("var a : /as,"),
            vec![
                SyntaxKind::VAR_KW,
                SyntaxKind::IDENT,
                SyntaxKind::COLON,
                SyntaxKind::SLASH,
                SyntaxKind::IDENT,
                SyntaxKind::COMMA,
            ]
        );
    }

    #[test]
    fn test_lex_big_number_literals() {
        assert_eq!(
            kinds("3.2B 10I 0b101 0x1F 42L 1.5f"),
            vec![
                SyntaxKind::BIG_DECIMAL_LITERAL,
                SyntaxKind::BIG_INTEGER_LITERAL,
                SyntaxKind::INTEGER_LITERAL,
                SyntaxKind::INTEGER_LITERAL,
                SyntaxKind::INTEGER_LITERAL,
                SyntaxKind::FLOAT_LITERAL,
            ]
        );
    }

    #[test]
    fn test_lex_keywords_need_word_boundary() {
        assert_eq!(kinds("classic rules"), vec![SyntaxKind::IDENT, SyntaxKind::IDENT]);
        assert_eq!(kinds("class rule"), vec![SyntaxKind::CLASS_KW, SyntaxKind::RULE_KW]);
    }

    #[test]
    fn test_lex_generic_closers_stay_single() {
        assert_eq!(
            kinds("List<List<String>>"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::LT,
                SyntaxKind::IDENT,
                SyntaxKind::LT,
                SyntaxKind::IDENT,
                SyntaxKind::GT,
                SyntaxKind::GT,
            ]
        );
    }

    #[test]
    fn test_lex_unicode_identifiers() {
        let tokens: Vec<_> = Lexer::new("é straße_1 $名前 x9").collect();
        let idents: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::IDENT)
            .map(|t| t.text)
            .collect();
        assert_eq!(idents, vec!["é", "straße_1", "$名前", "x9"]);
        assert_eq!(kinds("classé"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("9x"), vec![SyntaxKind::INTEGER_LITERAL, SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_comments() {
        let tokens: Vec<_> = Lexer::new("// note\n/* a ** b */rule").collect();
        assert_eq!(tokens[0].kind, SyntaxKind::LINE_COMMENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::BLOCK_COMMENT);
        assert_eq!(tokens[3].kind, SyntaxKind::RULE_KW);
    }

    #[test]
    fn test_lex_strings_and_chars() {
        assert_eq!(
            kinds(r#"s = "a\"b" + 'c';"#),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::EQ,
                SyntaxKind::STRING_LITERAL,
                SyntaxKind::PLUS,
                SyntaxKind::CHAR_LITERAL,
                SyntaxKind::SEMICOLON,
            ]
        );
    }

    #[test]
    fn test_lex_unknown_character_is_error() {
        assert_eq!(kinds("a # b"), vec![SyntaxKind::IDENT, SyntaxKind::ERROR, SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_covers_every_byte() {
        let input = "class Foo { void bar() { System.out.println(\"x\"); } }";
        let total: usize = Lexer::new(input).map(|t| t.text.len()).sum();
        assert_eq!(total, input.len());
    }
}
