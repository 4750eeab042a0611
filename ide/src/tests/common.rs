//! Shared test helpers: registries with sample question references and a
//! small lex-then-resolve harness.

use engine::{
    Collector, Lexer, Overlay, PatternSet, RawEntry, Registry, Token, default_dictionary,
};

use crate::resolver::{Resolution, resolve};

pub fn registry() -> Registry {
    engine::default_registry()
}

/// Default registry plus `question`-kind entries for the given names.
pub fn registry_with_questions(names: &[&str]) -> Registry {
    let mut raw = default_dictionary();
    for name in names {
        raw.questions.push(RawEntry {
            kind: Some("question".into()),
            result_type: Some("question".into()),
            ..RawEntry::named(name)
        });
    }
    Registry::build(raw)
}

pub fn lex(registry: &Registry, text: &str, overlay: &Overlay) -> Vec<Token> {
    let patterns = PatternSet::compile(registry);
    let mut lexer = Lexer::new(&patterns);
    lexer.tokenize(text, overlay)
}

pub fn resolve_at(registry: &Registry, text: &str, cursor: u32) -> Resolution {
    let tokens = lex(registry, text, &Overlay::default());
    resolve(text, &tokens, cursor, registry)
}

pub fn collect(text: &str) -> Overlay {
    Collector::new().collect(text)
}
