//! Editor-facing intelligence for the script language: contextual resolution
//! and completion candidates on top of the `engine` crate.
//!
//! All coordinates are UTF-8 byte offsets into the input `text`; spans are
//! half-open ranges `[start, end)`. Everything here is pure data-in/data-out:
//! rendering, cursor movement, and text mutation stay in the host editor.

use engine::{Lexer, Overlay, PatternSet, Registry, Span, Token};

mod resolver;
mod suggest;
mod tests;

pub use resolver::{Context, DocTarget, MAX_INTERVENING_OPERATORS, Resolution, resolve};
pub use suggest::{
    Candidate, CandidateKind, PAGE_STEP, Session, SessionState, TRIGGER_PUNCTUATION,
    candidates, compile_prefix_regex, filter_and_rank,
};

/// Result of a hint query: the ranked visible candidates, the anchor span the
/// host should replace on accept, and the resolved documentation target.
#[derive(Debug, Clone, PartialEq)]
pub struct Hints {
    pub candidates: Vec<Candidate>,
    pub anchor: Span,
    pub doc: Option<DocTarget>,
}

/// Computes hint data at a byte cursor.
///
/// Tokenizes the document, resolves the governing context, and returns the
/// filtered candidate list. `active_module` scopes entries tagged with a
/// module through the registry's dependency graph.
pub fn hints(
    text: &str,
    cursor: u32,
    registry: &Registry,
    patterns: &PatternSet,
    overlay: &Overlay,
    active_module: Option<&str>,
) -> Hints {
    let mut lexer = Lexer::new(patterns);
    let tokens = lexer.tokenize(text, overlay);

    let (anchor, partial) = anchor_at(text, &tokens, cursor);
    let resolution = resolver::resolve(text, &tokens, cursor, registry);
    let pool = suggest::candidates(resolution.context, registry, overlay, active_module);
    let visible = suggest::filter_and_rank(&pool, &partial);

    tracing::debug!(
        cursor,
        context = ?resolution.context,
        visible = visible.len(),
        "resolved hints"
    );
    Hints {
        candidates: visible,
        anchor,
        doc: resolution.doc,
    }
}

/// The span the accepted candidate replaces, plus the partial text typed so
/// far. A word (or reference opener) touching the cursor anchors in place;
/// anywhere else hints insert at the cursor.
fn anchor_at(text: &str, tokens: &[Token], cursor: u32) -> (Span, String) {
    let anchored = tokens.iter().find(|t| {
        !t.is_trivia()
            && !t.is_access_connector()
            && t.span.start < cursor
            && cursor <= t.span.end
            && is_anchorable(t)
    });
    match anchored {
        Some(token) => {
            let upto = (cursor - token.span.start) as usize;
            let partial = token.text.get(..upto).unwrap_or(&token.text).to_string();
            (token.span, partial)
        }
        None => (Span::at(cursor), String::new()),
    }
}

fn is_anchorable(token: &Token) -> bool {
    token
        .text
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '%')
        && !text_is_number(&token.text)
}

fn text_is_number(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_digit())
}
