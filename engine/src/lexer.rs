//! The stateful lexer and scope tracker.
//!
//! One [`Lexer`] holds the per-document state machine: the scope stack for
//! bracket/paren/brace nesting, the indent level derived from block keywords
//! and `[`/`{` nesting, and the chaining flags (`declaration_mode`,
//! `label_consumer`, `expect_member`) that let one token influence the
//! classification of the next.
//!
//! Matchers run in a fixed priority order: comment, number, string, operator,
//! punctuation, the five keyword classes, member, common keyword, builtin,
//! type name, local symbol, function symbol, label declaration, label
//! reference, delimited reference, reference opener, and finally an error
//! fallback that consumes exactly one character. The fallback guarantees
//! forward progress on arbitrary input; no input can make the lexer loop or
//! panic.

use crate::dictionary::TypeKey;
use crate::patterns::PatternSet;
use crate::span::Span;
use crate::symbols::Overlay;
use crate::token::{Classification, ScopeFrame, ScopeKind, Token};

/// Read cursor over a source string, tracking a byte position.
#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    text: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(text: &'s str) -> Cursor<'s> {
        Cursor { text, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if pred(ch) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn slice_from(&self, start: usize) -> &'s str {
        &self.text[start..self.pos]
    }
}

fn is_word_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_word_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Per-document incremental lexer.
#[derive(Debug, Clone)]
pub struct Lexer<'d> {
    patterns: &'d PatternSet,
    scope_stack: Vec<ScopeFrame>,
    indent_level: u32,
    last_token: Option<Token>,
    declaration_mode: bool,
    label_consumer: bool,
    expect_member: bool,
    at_line_start: bool,
}

impl<'d> Lexer<'d> {
    pub fn new(patterns: &'d PatternSet) -> Lexer<'d> {
        Lexer {
            patterns,
            scope_stack: Vec::new(),
            indent_level: 0,
            last_token: None,
            declaration_mode: false,
            label_consumer: false,
            expect_member: false,
            at_line_start: true,
        }
    }

    /// Resets all per-document state for a fresh pass.
    pub fn reset(&mut self) {
        self.scope_stack.clear();
        self.indent_level = 0;
        self.last_token = None;
        self.declaration_mode = false;
        self.label_consumer = false;
        self.expect_member = false;
        self.at_line_start = true;
    }

    /// Current bracket/paren/brace nesting.
    pub fn scope_stack(&self) -> &[ScopeFrame] {
        &self.scope_stack
    }

    /// Current indentation level (block keywords plus `[`/`{` nesting).
    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.last_token.as_ref()
    }

    /// Tokenizes a whole document with fresh state.
    pub fn tokenize(&mut self, text: &str, overlay: &Overlay) -> Vec<Token> {
        self.reset();
        let mut cursor = Cursor::new(text);
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token(&mut cursor, overlay) {
            tokens.push(token);
        }
        tokens
    }

    /// Per-line indent levels for the host's renderer.
    ///
    /// A line whose first significant token closes (or branches) a block is
    /// rendered one level shallower, matching the usual dedent-on-closer rule.
    pub fn line_indents(&mut self, text: &str, overlay: &Overlay) -> Vec<u32> {
        self.reset();
        let mut out = Vec::new();
        for line in text.split('\n') {
            let before = self.indent_level;
            let mut cursor = Cursor::new(line);
            let mut first = None;
            while let Some(token) = self.next_token(&mut cursor, overlay) {
                if first.is_none() && !token.is_trivia() {
                    first = Some(token.class);
                }
            }
            let indent = match first {
                Some(Classification::KeywordClosing) | Some(Classification::KeywordMiddle) => {
                    before.saturating_sub(1)
                }
                _ => before,
            };
            out.push(indent);
            // A physical line break resets the chaining flags.
            self.declaration_mode = false;
            self.label_consumer = false;
            self.expect_member = false;
            self.at_line_start = true;
        }
        out
    }

    /// Classifies the next lexical unit, or `None` at end of input.
    pub fn next_token(&mut self, cursor: &mut Cursor, overlay: &Overlay) -> Option<Token> {
        self.skip_whitespace(cursor);
        let start = cursor.pos();
        let ch = cursor.peek()?;

        // The chaining flag from a consumed `.`/`::` applies to this token.
        let member_expected = self.expect_member;
        self.expect_member = false;

        let mut token = self.match_token(cursor, start, ch, member_expected, overlay);

        // Access connectors must be followed by a valid member name; anything
        // else reclassifies the construct as an error.
        if member_expected
            && !matches!(token.class, Classification::Member(_) | Classification::Comment)
        {
            token.class = Classification::Error;
        }

        if !token.is_trivia() {
            self.at_line_start = false;
            self.last_token = Some(token.clone());
        }
        Some(token)
    }

    fn skip_whitespace(&mut self, cursor: &mut Cursor) {
        while let Some(ch) = cursor.peek() {
            if ch == '\n' {
                cursor.bump();
                self.at_line_start = true;
                self.declaration_mode = false;
                self.label_consumer = false;
                self.expect_member = false;
            } else if ch.is_whitespace() {
                cursor.bump();
            } else {
                break;
            }
        }
    }

    fn match_token(
        &mut self,
        cursor: &mut Cursor,
        start: usize,
        ch: char,
        member_expected: bool,
        overlay: &Overlay,
    ) -> Token {
        // Comment: `'` to end of line.
        if ch == '\'' {
            cursor.eat_while(|c| c != '\n');
            return self.finish(cursor, start, Classification::Comment);
        }

        // Number: digits with an optional decimal part.
        if ch.is_ascii_digit() {
            cursor.eat_while(|c| c.is_ascii_digit());
            if cursor.peek() == Some('.') && cursor.peek_second().is_some_and(|c| c.is_ascii_digit())
            {
                cursor.bump();
                cursor.eat_while(|c| c.is_ascii_digit());
            }
            return self.finish(cursor, start, Classification::Number);
        }

        // String: double-quoted, `""` is an embedded quote. An unterminated
        // string runs to end of line.
        if ch == '"' {
            cursor.bump();
            loop {
                match cursor.peek() {
                    None | Some('\n') => break,
                    Some('"') => {
                        cursor.bump();
                        if cursor.peek() == Some('"') {
                            cursor.bump();
                        } else {
                            break;
                        }
                    }
                    Some(_) => {
                        cursor.bump();
                    }
                }
            }
            return self.finish(cursor, start, Classification::Str);
        }

        // Symbolic operators, longest first.
        if let Some(len) = symbolic_operator_len(cursor) {
            for _ in 0..len {
                cursor.bump();
            }
            return self.finish(cursor, start, Classification::Operator);
        }

        // `::` member connector, then single-character punctuation.
        if ch == ':' && cursor.peek_second() == Some(':') {
            cursor.bump();
            cursor.bump();
            self.expect_member = true;
            return self.finish(cursor, start, Classification::Punct);
        }
        if ch == '.' {
            cursor.bump();
            self.expect_member = true;
            return self.finish(cursor, start, Classification::Punct);
        }
        if let Some(kind) = ScopeKind::for_open(ch) {
            cursor.bump();
            let owner = self.last_token.clone().filter(|t| !t.is_trivia());
            self.scope_stack.push(ScopeFrame { kind, owner });
            if matches!(kind, ScopeKind::Bracket | ScopeKind::Brace) {
                self.indent_level += 1;
            }
            return self.finish(cursor, start, Classification::Punct);
        }
        if let Some(kind) = ScopeKind::for_close(ch) {
            cursor.bump();
            let matched = self
                .scope_stack
                .last()
                .is_some_and(|frame| frame.kind == kind);
            if matched {
                self.scope_stack.pop();
                if matches!(kind, ScopeKind::Bracket | ScopeKind::Brace) {
                    self.indent_level = self.indent_level.saturating_sub(1);
                }
                return self.finish(cursor, start, Classification::Punct);
            }
            // Unmatched close: error token, no-op pop.
            return self.finish(cursor, start, Classification::Error);
        }
        if matches!(ch, ',' | ';' | ':') {
            cursor.bump();
            return self.finish(cursor, start, Classification::Punct);
        }

        // Identifier-led classes, in dictionary priority order.
        if is_word_start(ch) {
            cursor.eat_while(is_word_continue);
            let word = cursor.slice_from(start).to_string();
            let class = self.classify_word(&word, cursor, member_expected, overlay);
            return self.finish(cursor, start, class);
        }

        // Delimited reference: `%name%`, or an unterminated `%name` opener.
        if ch == '%' {
            cursor.bump();
            cursor.eat_while(|c| c != '%' && c != '\n');
            if cursor.peek() == Some('%') {
                cursor.bump();
                return self.finish(cursor, start, Classification::Reference);
            }
            return self.finish(cursor, start, Classification::ReferenceOpener);
        }

        // Error fallback: consume exactly one character.
        cursor.bump();
        self.finish(cursor, start, Classification::Error)
    }

    fn classify_word(
        &mut self,
        word: &str,
        cursor: &Cursor,
        member_expected: bool,
        overlay: &Overlay,
    ) -> Classification {
        let patterns = self.patterns;

        // After `.`/`::` the member table wins over every other class:
        // `Length` is a builtin at top level but a text member after a dot.
        if member_expected && let Some(result) = patterns.member(word) {
            return Classification::Member(result);
        }
        if patterns.operators.contains(word) {
            return Classification::Operator;
        }
        if patterns.opening.contains(word) {
            self.indent_level += 1;
            return Classification::KeywordOpening;
        }
        if patterns.middle.contains(word) {
            return Classification::KeywordMiddle;
        }
        if patterns.closing.contains(word) {
            if self.indent_level == 0 {
                // Closer with no open block: error, indent stays clamped.
                return Classification::Error;
            }
            self.indent_level -= 1;
            return Classification::KeywordClosing;
        }
        if patterns.declaration.contains(word) {
            self.declaration_mode = true;
            return Classification::KeywordDeclaration;
        }
        if patterns.label_consumer.contains(word) {
            self.label_consumer = true;
            return Classification::KeywordLabelConsumer;
        }
        if patterns.statements.contains(word) {
            return Classification::Keyword;
        }
        if let Some(result) = patterns.builtin(word) {
            return Classification::Builtin(result);
        }
        if let Some(result) = patterns.constant(word) {
            return Classification::Builtin(result);
        }
        if let Some(key) = patterns.type_name(word) {
            return Classification::TypeName(key);
        }
        if self.declaration_mode {
            // The identifier being declared after `Dim`; its type is not
            // known until the overlay rescan sees the full declaration.
            self.declaration_mode = false;
            return Classification::LocalSymbol(TypeKey::Any);
        }
        if let Some(symbol) = overlay.variable(word) {
            return Classification::LocalSymbol(symbol.ty);
        }
        if overlay.function(word).is_some() {
            return Classification::FunctionSymbol;
        }
        if self.at_line_start && cursor.peek() == Some(':') && cursor.peek_second() != Some(':') {
            return Classification::LabelDecl;
        }
        if self.label_consumer {
            self.label_consumer = false;
            return Classification::LabelRef;
        }
        if overlay.label(word).is_some() {
            return Classification::LabelRef;
        }
        if patterns.question(word) {
            return Classification::Reference;
        }
        Classification::Error
    }

    fn finish(&self, cursor: &Cursor, start: usize, class: Classification) -> Token {
        Token::new(
            cursor.slice_from(start),
            Span::new(start as u32, cursor.pos() as u32),
            class,
        )
    }
}

/// Length in chars of a symbolic operator at the cursor, longest match first.
fn symbolic_operator_len(cursor: &Cursor) -> Option<usize> {
    let first = cursor.peek()?;
    let second = cursor.peek_second();
    match (first, second) {
        ('<', Some('>')) | ('<', Some('=')) | ('>', Some('=')) => Some(2),
        ('+' | '-' | '*' | '/' | '^' | '=' | '<' | '>' | '&', _) => Some(1),
        _ => None,
    }
}
