//! Core language-intelligence engine for the embedded script language.
//!
//! Pipeline: dictionary build → pattern compile → lex/scope-track →
//! overlay collection. All spans are UTF-8 byte offsets into the original
//! source, using `[start, end)`. Contextual resolution and suggestion
//! filtering live in the `ide` crate on top of this one.

pub mod dictionary;
mod lexer;
mod patterns;
mod span;
mod symbols;
mod tests;
mod token;

pub use dictionary::{
    ArgSpec, BlockRole, DictionaryEntry, EntryKind, Module, RawArg, RawDictionary, RawEntry,
    RawModule, Registry, TypeKey, default_dictionary, default_locale, merge_dictionary,
    merge_entry,
};
pub use lexer::{Cursor, Lexer};
pub use patterns::{PatternSet, WordSet};
pub use span::Span;
pub use symbols::{
    Collector, DEFAULT_DEBOUNCE, Debounce, Overlay, OverlaySymbol, SymbolKind,
};
pub use token::{Classification, ScopeFrame, ScopeKind, Token};

/// Builds the default registry: compiled-in structural data merged with the
/// compiled-in description overlay.
pub fn default_registry() -> Registry {
    let mut raw = default_dictionary();
    merge_dictionary(&mut raw, default_locale());
    Registry::build(raw)
}
