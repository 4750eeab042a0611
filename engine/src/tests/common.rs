//! Shared test helpers.

use crate::{
    Classification, Collector, Lexer, Overlay, PatternSet, Registry, Token, default_registry,
};

pub fn registry() -> Registry {
    default_registry()
}

pub fn lex(text: &str) -> Vec<Token> {
    lex_with_overlay(text, &Overlay::default())
}

pub fn lex_with_overlay(text: &str, overlay: &Overlay) -> Vec<Token> {
    let registry = registry();
    let patterns = PatternSet::compile(&registry);
    let mut lexer = Lexer::new(&patterns);
    lexer.tokenize(text, overlay)
}

pub fn classes(text: &str) -> Vec<Classification> {
    lex(text).into_iter().map(|t| t.class).collect()
}

pub fn texts(text: &str) -> Vec<String> {
    lex(text).into_iter().map(|t| t.text).collect()
}

pub fn collect(text: &str) -> Overlay {
    Collector::new().collect(text)
}
