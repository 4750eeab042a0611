//! Lexer tokens and scope frames.
//!
//! A [`Token`] is one classified contiguous span of source text. Tokens are
//! produced fresh per lexer invocation and are not persisted across edits,
//! except as the lexer's "last token" used for chaining decisions.

use crate::dictionary::TypeKey;
use crate::span::Span;

/// Classification tag attached to every token.
///
/// Variants carrying a [`TypeKey`] record the semantic type of the value the
/// token denotes; the contextual resolver strips the classification down to
/// that key when picking a member namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Comment,
    Number,
    Str,
    Operator,
    Punct,
    /// Opens a block and indents (`If`).
    KeywordOpening,
    /// Branch keyword between opener and closer (`Else`).
    KeywordMiddle,
    /// Closes a block and dedents (`EndIf`).
    KeywordClosing,
    /// Declares the symbol that follows (`Dim`).
    KeywordDeclaration,
    /// Consumes the label that follows (`Goto`).
    KeywordLabelConsumer,
    /// Any other statement keyword.
    Keyword,
    /// A `.`/`::` member of some namespace, typed by its result.
    Member(TypeKey),
    /// A builtin function or constant, typed by its result.
    Builtin(TypeKey),
    /// A type name (`number`, `text`, ...).
    TypeName(TypeKey),
    /// A locally declared variable from the overlay.
    LocalSymbol(TypeKey),
    /// A locally declared function from the overlay.
    FunctionSymbol,
    /// `name:` at the start of a line.
    LabelDecl,
    /// A label name after a label-consumer keyword.
    LabelRef,
    /// A complete `%name%` delimited reference.
    Reference,
    /// An unterminated `%name` delimited-reference opener.
    ReferenceOpener,
    Error,
}

impl Classification {
    /// The classification stripped down to its result type, when it has one.
    pub fn result_type(self) -> Option<TypeKey> {
        match self {
            Classification::Member(key)
            | Classification::Builtin(key)
            | Classification::TypeName(key)
            | Classification::LocalSymbol(key) => Some(key),
            Classification::Number => Some(TypeKey::Number),
            Classification::Str => Some(TypeKey::Text),
            Classification::Reference | Classification::ReferenceOpener => Some(TypeKey::Question),
            _ => None,
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Classification::KeywordOpening
                | Classification::KeywordMiddle
                | Classification::KeywordClosing
                | Classification::KeywordDeclaration
                | Classification::KeywordLabelConsumer
                | Classification::Keyword
        )
    }

    /// True for classifications the backward walk may step across (members
    /// and member-typed accessors).
    pub fn is_member_like(self) -> bool {
        matches!(self, Classification::Member(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub span: Span,
    pub class: Classification,
}

impl Token {
    pub fn new(text: impl Into<String>, span: Span, class: Classification) -> Self {
        Self {
            text: text.into(),
            span,
            class,
        }
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self.class, Classification::Comment)
    }

    /// True for `.` and `::`, the member-access connectors.
    pub fn is_access_connector(&self) -> bool {
        self.class == Classification::Punct && (self.text == "." || self.text == "::")
    }

    pub fn is_open_punct(&self) -> bool {
        self.class == Classification::Punct && matches!(self.text.as_str(), "(" | "[" | "{")
    }

    pub fn is_close_punct(&self) -> bool {
        self.class == Classification::Punct && matches!(self.text.as_str(), ")" | "]" | "}")
    }
}

/// One level of bracket/paren/brace nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Paren,
    Bracket,
    Brace,
}

impl ScopeKind {
    pub fn for_open(ch: char) -> Option<ScopeKind> {
        match ch {
            '(' => Some(ScopeKind::Paren),
            '[' => Some(ScopeKind::Bracket),
            '{' => Some(ScopeKind::Brace),
            _ => None,
        }
    }

    pub fn for_close(ch: char) -> Option<ScopeKind> {
        match ch {
            ')' => Some(ScopeKind::Paren),
            ']' => Some(ScopeKind::Bracket),
            '}' => Some(ScopeKind::Brace),
            _ => None,
        }
    }
}

/// Stack entry pushed on open punctuation and popped on its matching close.
///
/// `owner` is the significant token immediately before the opener (for
/// `Abs(...)` the `Abs` token), used by the resolver to type a closed scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub kind: ScopeKind,
    pub owner: Option<Token>,
}
