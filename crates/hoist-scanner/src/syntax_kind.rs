//! Token kinds.
//!
//! `SyntaxKind` covers every token the scanner produces: literals, punctuation,
//! identifiers and keywords. Reserved words come first among the keywords and
//! contextual keywords after them, so a range check tells them apart. Node
//! kinds built by the parser live above the token range as `u16` constants.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

macro_rules! define_syntax_kinds {
    ($( $name:ident $(= $text:literal)? ),* $(,)?) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($name),*
        }

        impl SyntaxKind {
            /// Every kind, indexed by its discriminant.
            pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$name),*];

            /// Fixed source text of punctuation and keyword tokens.
            pub fn text(self) -> Option<&'static str> {
                match self {
                    $(SyntaxKind::$name => define_syntax_kinds!(@text $($text)?)),*
                }
            }
        }
    };
    (@text $text:literal) => { Some($text) };
    (@text) => { None };
}

define_syntax_kinds! {
    Unknown,
    EndOfFileToken,
    // Literals
    NumericLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,
    // Punctuation
    OpenBraceToken = "{",
    CloseBraceToken = "}",
    OpenParenToken = "(",
    CloseParenToken = ")",
    OpenBracketToken = "[",
    CloseBracketToken = "]",
    DotToken = ".",
    DotDotDotToken = "...",
    SemicolonToken = ";",
    CommaToken = ",",
    QuestionDotToken = "?.",
    LessThanToken = "<",
    GreaterThanToken = ">",
    LessThanEqualsToken = "<=",
    GreaterThanEqualsToken = ">=",
    EqualsEqualsToken = "==",
    ExclamationEqualsToken = "!=",
    EqualsEqualsEqualsToken = "===",
    ExclamationEqualsEqualsToken = "!==",
    EqualsGreaterThanToken = "=>",
    PlusToken = "+",
    MinusToken = "-",
    AsteriskToken = "*",
    AsteriskAsteriskToken = "**",
    SlashToken = "/",
    PercentToken = "%",
    PlusPlusToken = "++",
    MinusMinusToken = "--",
    LessThanLessThanToken = "<<",
    GreaterThanGreaterThanToken = ">>",
    GreaterThanGreaterThanGreaterThanToken = ">>>",
    AmpersandToken = "&",
    BarToken = "|",
    CaretToken = "^",
    ExclamationToken = "!",
    TildeToken = "~",
    AmpersandAmpersandToken = "&&",
    BarBarToken = "||",
    QuestionToken = "?",
    ColonToken = ":",
    AtToken = "@",
    QuestionQuestionToken = "??",
    EqualsToken = "=",
    PlusEqualsToken = "+=",
    MinusEqualsToken = "-=",
    AsteriskEqualsToken = "*=",
    SlashEqualsToken = "/=",
    // Identifiers
    Identifier,
    // Reserved words
    BreakKeyword = "break",
    CaseKeyword = "case",
    CatchKeyword = "catch",
    ClassKeyword = "class",
    ConstKeyword = "const",
    ContinueKeyword = "continue",
    DebuggerKeyword = "debugger",
    DefaultKeyword = "default",
    DeleteKeyword = "delete",
    DoKeyword = "do",
    ElseKeyword = "else",
    EnumKeyword = "enum",
    ExportKeyword = "export",
    ExtendsKeyword = "extends",
    FalseKeyword = "false",
    FinallyKeyword = "finally",
    ForKeyword = "for",
    FunctionKeyword = "function",
    IfKeyword = "if",
    ImportKeyword = "import",
    InKeyword = "in",
    InstanceOfKeyword = "instanceof",
    NewKeyword = "new",
    NullKeyword = "null",
    ReturnKeyword = "return",
    SuperKeyword = "super",
    SwitchKeyword = "switch",
    ThisKeyword = "this",
    ThrowKeyword = "throw",
    TrueKeyword = "true",
    TryKeyword = "try",
    TypeOfKeyword = "typeof",
    VarKeyword = "var",
    VoidKeyword = "void",
    WhileKeyword = "while",
    WithKeyword = "with",
    // Contextual keywords
    ImplementsKeyword = "implements",
    InterfaceKeyword = "interface",
    LetKeyword = "let",
    PackageKeyword = "package",
    PrivateKeyword = "private",
    ProtectedKeyword = "protected",
    PublicKeyword = "public",
    StaticKeyword = "static",
    YieldKeyword = "yield",
    AbstractKeyword = "abstract",
    AsKeyword = "as",
    AnyKeyword = "any",
    AsyncKeyword = "async",
    AwaitKeyword = "await",
    BigIntKeyword = "bigint",
    BooleanKeyword = "boolean",
    ConstructorKeyword = "constructor",
    DeclareKeyword = "declare",
    GetKeyword = "get",
    InferKeyword = "infer",
    IsKeyword = "is",
    KeyOfKeyword = "keyof",
    ModuleKeyword = "module",
    NamespaceKeyword = "namespace",
    NeverKeyword = "never",
    ReadonlyKeyword = "readonly",
    NumberKeyword = "number",
    ObjectKeyword = "object",
    SetKeyword = "set",
    StringKeyword = "string",
    SymbolKeyword = "symbol",
    TypeKeyword = "type",
    UndefinedKeyword = "undefined",
    UniqueKeyword = "unique",
    UnknownKeyword = "unknown",
    FromKeyword = "from",
    OfKeyword = "of",
    OverrideKeyword = "override",
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::SlashEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::ImplementsKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::OverrideKeyword;
    /// Node kinds (see the parser's `syntax_kind_ext`) start at or above this value.
    pub const FIRST_NODE: u16 = 300;

    /// Convert a raw `u16` kind back into a token kind.
    pub fn from_u16(kind: u16) -> Option<SyntaxKind> {
        Self::ALL.get(kind as usize).copied()
    }

    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    pub fn is_reserved_word(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_RESERVED_WORD
    }

    pub fn is_contextual_keyword(self) -> bool {
        self >= Self::FIRST_CONTEXTUAL_KEYWORD && self <= Self::LAST_KEYWORD
    }

    pub fn is_punctuation(self) -> bool {
        self >= Self::FIRST_PUNCTUATION && self <= Self::LAST_PUNCTUATION
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
        )
    }
}

static KEYWORDS: Lazy<FxHashMap<&'static str, SyntaxKind>> = Lazy::new(|| {
    SyntaxKind::ALL
        .iter()
        .copied()
        .filter(|kind| kind.is_keyword())
        .filter_map(|kind| kind.text().map(|text| (text, kind)))
        .collect()
});

/// Look up the keyword kind for an identifier-shaped word.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    KEYWORDS.get(text).copied()
}

/// Identifiers and keywords are both valid property names.
pub fn token_is_identifier_or_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || kind.is_keyword()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_index_all() {
        for (index, kind) in SyntaxKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, index);
        }
        assert!((SyntaxKind::LAST_KEYWORD as u16) < SyntaxKind::FIRST_NODE);
    }

    #[test]
    fn keyword_lookup_separates_reserved_and_contextual() {
        assert_eq!(text_to_keyword("const"), Some(SyntaxKind::ConstKeyword));
        assert!(SyntaxKind::ConstKeyword.is_reserved_word());
        assert_eq!(text_to_keyword("from"), Some(SyntaxKind::FromKeyword));
        assert!(SyntaxKind::FromKeyword.is_contextual_keyword());
        assert_eq!(text_to_keyword("routes"), None);
    }
}
