//! Contextual resolution: what semantic object governs the expression under
//! the cursor.
//!
//! Three outcomes, tried in order: a member-access context (`value.` or
//! `value::`), a governing reference found by the bounded backward walk, or
//! the top-level namespace. All coordinates are UTF-8 byte offsets into the
//! original source text.

use engine::{Classification, Registry, ScopeKind, Token, TypeKey};

/// Upper bound on intervening operators the backward walk may cross.
///
/// Tunable; the observed editor behavior allows exactly one comparison or
/// logical operator between the cursor context and its governing reference
/// (`refA Has {1 ...`).
pub const MAX_INTERVENING_OPERATORS: usize = 1;

/// The completion/documentation context at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Keywords, constants, builtins, and the local-symbol overlay.
    TopLevel,
    /// The member namespace of a value of this type (plus the common subset).
    Members(TypeKey),
    /// The module sub-collection, inside a `Uses` statement.
    Modules,
}

/// Documentation payload emitted whenever resolution names a governing token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTarget {
    pub name: String,
    pub ty: TypeKey,
    /// Description text from the dictionary, when the name resolves there.
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub context: Context,
    pub doc: Option<DocTarget>,
}

impl Resolution {
    fn top_level() -> Resolution {
        Resolution {
            context: Context::TopLevel,
            doc: None,
        }
    }
}

/// Resolves the context for `cursor` against a freshly lexed token stream.
pub fn resolve(text: &str, tokens: &[Token], cursor: u32, registry: &Registry) -> Resolution {
    if in_uses_statement(text, tokens, cursor) {
        return Resolution {
            context: Context::Modules,
            doc: None,
        };
    }

    if let Some(resolution) = member_access_context(tokens, cursor, registry) {
        return resolution;
    }

    if let Some(reference) = moonwalk(tokens, walk_start(tokens, cursor)) {
        let name = reference_name(reference);
        return Resolution {
            context: Context::Members(TypeKey::Question),
            doc: Some(doc_target(registry, name, TypeKey::Question)),
        };
    }

    Resolution::top_level()
}

fn doc_target(registry: &Registry, name: String, ty: TypeKey) -> DocTarget {
    let doc = registry.lookup(&name).and_then(|entry| entry.doc.clone());
    DocTarget { name, ty, doc }
}

/// True when the cursor's line is a `Uses` statement (module import).
fn in_uses_statement(text: &str, tokens: &[Token], cursor: u32) -> bool {
    let cursor = (cursor as usize).min(text.len());
    // A cursor off a UTF-8 boundary must not panic the slice.
    let head = text.get(..cursor).unwrap_or(text);
    let line_start = head.rfind('\n').map(|i| i + 1).unwrap_or(0) as u32;
    tokens
        .iter()
        .find(|t| t.span.start >= line_start && !t.is_trivia())
        .is_some_and(|t| t.span.start < cursor as u32 && t.text.eq_ignore_ascii_case("uses"))
}

/// Rule 1: the cursor sits on or right after a member-access connector.
fn member_access_context(
    tokens: &[Token],
    cursor: u32,
    registry: &Registry,
) -> Option<Resolution> {
    let connector_idx = connector_index(tokens, cursor)?;
    let (_, prior) = prev_significant(tokens, connector_idx)?;

    if prior.is_close_punct() {
        // Context comes from the closed scope's owner token.
        let ty = closed_scope_type(tokens, prior);
        return Some(Resolution {
            context: Context::Members(ty),
            doc: None,
        });
    }

    // The prior token's own classification, stripped to its result type.
    let ty = prior.class.result_type().unwrap_or(TypeKey::Any);
    let doc = match prior.class {
        Classification::Reference => {
            Some(doc_target(registry, reference_name(prior), TypeKey::Question))
        }
        Classification::Builtin(result) | Classification::LocalSymbol(result) => {
            Some(doc_target(registry, prior.text.clone(), result))
        }
        _ => None,
    };
    Some(Resolution {
        context: Context::Members(ty),
        doc,
    })
}

/// Finds the access connector governing the cursor, if any: the cursor is on
/// the connector itself, just after it, or inside/after the member word that
/// follows it.
fn connector_index(tokens: &[Token], cursor: u32) -> Option<usize> {
    if let Some((idx, token)) = token_at_cursor(tokens, cursor)
        && !token.is_access_connector()
        && let Some((prev_idx, prev)) = prev_significant(tokens, idx)
        && prev.is_access_connector()
    {
        return Some(prev_idx);
    }

    let (idx, token) = prev_insertion(tokens, cursor)?;
    if token.is_access_connector() {
        return Some(idx);
    }
    let (prev_idx, prev) = prev_significant(tokens, idx)?;
    prev.is_access_connector().then_some(prev_idx)
}

/// Member type for `(...)`/`[...]`/`{...}` followed by a connector.
fn closed_scope_type(tokens: &[Token], close: &Token) -> TypeKey {
    match close.text.as_str() {
        // A brace scope is a set literal.
        "}" => TypeKey::List,
        "]" => TypeKey::Any,
        _ => {
            let close_idx = tokens
                .iter()
                .position(|t| t.span == close.span)
                .unwrap_or(0);
            matching_open(tokens, close_idx)
                .and_then(|open_idx| prev_significant(tokens, open_idx))
                .and_then(|(_, owner)| owner.class.result_type())
                .unwrap_or(TypeKey::Any)
        }
    }
}

/// Index of the opener matching the closer at `close_idx`, by backward scan.
fn matching_open(tokens: &[Token], close_idx: usize) -> Option<usize> {
    let kind = ScopeKind::for_close(tokens[close_idx].text.chars().next()?)?;
    let mut depth = 0usize;
    for idx in (0..close_idx).rev() {
        let token = &tokens[idx];
        let first = token.text.chars().next()?;
        if ScopeKind::for_close(first) == Some(kind) && token.class == Classification::Punct {
            depth += 1;
        } else if ScopeKind::for_open(first) == Some(kind) && token.class == Classification::Punct {
            if depth == 0 {
                return Some(idx);
            }
            depth -= 1;
        }
    }
    None
}

/// Index of the token the backward walk starts from: the significant token
/// strictly left of the word being typed (or of the cursor itself).
fn walk_start(tokens: &[Token], cursor: u32) -> Option<usize> {
    if let Some((idx, token)) = token_at_cursor(tokens, cursor) {
        // Inside a word: start left of it.
        if token.span.start < cursor {
            return prev_significant(tokens, idx).map(|(i, _)| i);
        }
    }
    let (idx, token) = prev_insertion(tokens, cursor)?;
    if token.span.end == cursor && is_word_like(token) {
        // Cursor extends this word: start left of it.
        return prev_significant(tokens, idx).map(|(i, _)| i);
    }
    Some(idx)
}

fn is_word_like(token: &Token) -> bool {
    token
        .text
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// The bounded backward walk ("moonwalk").
///
/// Walks left one token at a time looking for a governing reference.
/// `ops` counts true operators; crossing the enclosing `{` of a set literal
/// resets the count, because operators inside a set (such as the range `To`)
/// do not separate the cursor from the reference. A closed set, stray
/// closing punctuation, or any non-skippable token ends the walk with no
/// result. The loop is capped at the token count, so termination does not
/// depend on the token shapes.
fn moonwalk(tokens: &[Token], start: Option<usize>) -> Option<&Token> {
    let mut idx = start?;
    let mut ops = 0usize;
    let mut first = true;

    for _ in 0..tokens.len() {
        let token = &tokens[idx];
        match token.class {
            Classification::Reference => {
                if first {
                    // The cursor itself sits on a reference; nothing governs it.
                    return None;
                }
                return (ops <= MAX_INTERVENING_OPERATORS).then_some(token);
            }
            Classification::Operator => {
                ops += 1;
            }
            Classification::Number | Classification::Str => {}
            Classification::Member(_) => {}
            Classification::Comment => {}
            Classification::Punct => match token.text.as_str() {
                // Crossing the set opener: everything seen so far was inside
                // the set and does not count.
                "{" => ops = 0,
                "," | "." | "::" => {}
                _ => return None,
            },
            _ => return None,
        }
        first = false;
        if idx == 0 {
            return None;
        }
        idx -= 1;
    }
    None
}

fn reference_name(token: &Token) -> String {
    token.text.trim_matches('%').to_string()
}

/// The non-trivia token whose span strictly contains `cursor`.
fn token_at_cursor(tokens: &[Token], cursor: u32) -> Option<(usize, &Token)> {
    tokens
        .iter()
        .enumerate()
        .find(|(_, t)| t.span.contains(cursor) && !t.is_trivia())
}

/// The last significant token ending at or before `cursor` (insertion
/// semantics: a token starting exactly at `cursor` counts as after it).
fn prev_insertion(tokens: &[Token], cursor: u32) -> Option<(usize, &Token)> {
    let mut prev = None;
    for (idx, token) in tokens.iter().enumerate() {
        if token.is_trivia() {
            continue;
        }
        if token.span.end <= cursor {
            prev = Some((idx, token));
        } else if token.span.start < cursor {
            // Cursor inside this token.
            prev = Some((idx, token));
        } else {
            break;
        }
    }
    prev
}

/// The significant token before index `idx`.
fn prev_significant(tokens: &[Token], idx: usize) -> Option<(usize, &Token)> {
    let mut i = idx;
    while i > 0 {
        i -= 1;
        let token = &tokens[i];
        if token.is_trivia() {
            continue;
        }
        return Some((i, token));
    }
    None
}
