//! Suggestion engine: builds, filters, and ranks completion candidates.

use engine::{DictionaryEntry, EntryKind, Overlay, OverlaySymbol, Registry, SymbolKind};

use crate::resolver::Context;

mod prefix;
mod session;

pub use prefix::{TRIGGER_PUNCTUATION, compile_prefix_regex};
pub use session::{PAGE_STEP, Session, SessionState};

/// High-level bucket for UI grouping and ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Variable,
    Function,
    Method,
    Property,
    Question,
    Constant,
    Keyword,
    Operator,
    Label,
    Snippet,
    Module,
}

/// One completion candidate for the host's hint panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub kind: CandidateKind,
    pub insert_text: String,
    pub detail: Option<String>,
    pub deprecated: bool,
    pub preferred_alternative: Option<String>,
    module: Option<String>,
}

impl Candidate {
    fn from_entry(entry: &DictionaryEntry) -> Candidate {
        let kind = match entry.kind {
            EntryKind::Statement | EntryKind::Core => CandidateKind::Keyword,
            EntryKind::Operator => CandidateKind::Operator,
            EntryKind::Function => CandidateKind::Function,
            EntryKind::Method => CandidateKind::Method,
            EntryKind::Property | EntryKind::Variable => CandidateKind::Property,
            EntryKind::Constant => CandidateKind::Constant,
            EntryKind::Question => CandidateKind::Question,
            EntryKind::Snippet => CandidateKind::Snippet,
        };
        Candidate {
            label: entry.name.clone(),
            kind,
            insert_text: entry.body.clone().unwrap_or_else(|| entry.name.clone()),
            detail: entry.doc.clone(),
            deprecated: entry.deprecated,
            preferred_alternative: entry.preferred_alternative.clone(),
            module: entry.module.clone(),
        }
    }

    fn from_symbol(symbol: &OverlaySymbol) -> Candidate {
        let kind = match symbol.kind {
            SymbolKind::Variable => CandidateKind::Variable,
            SymbolKind::Label => CandidateKind::Label,
            SymbolKind::Function => CandidateKind::Function,
        };
        Candidate {
            label: symbol.name.clone(),
            kind,
            insert_text: symbol.name.clone(),
            detail: None,
            deprecated: false,
            preferred_alternative: None,
            module: None,
        }
    }
}

fn kind_priority(kind: CandidateKind) -> u8 {
    match kind {
        CandidateKind::Variable => 0,
        CandidateKind::Question => 1,
        CandidateKind::Function => 2,
        CandidateKind::Method => 3,
        CandidateKind::Property => 4,
        CandidateKind::Constant => 5,
        CandidateKind::Keyword => 6,
        CandidateKind::Operator => 7,
        CandidateKind::Label => 8,
        CandidateKind::Snippet => 9,
        CandidateKind::Module => 10,
    }
}

/// Builds the unfiltered candidate pool for a resolved context.
///
/// Module visibility is applied here: an entry tagged with a module is kept
/// only if `active_module` equals it or transitively depends on it.
pub fn candidates(
    context: Context,
    registry: &Registry,
    overlay: &Overlay,
    active_module: Option<&str>,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    match context {
        Context::Modules => {
            // Import-like references get the named sub-collection directly.
            for module in &registry.modules {
                out.push(Candidate {
                    label: module.name.clone(),
                    kind: CandidateKind::Module,
                    insert_text: module.name.clone(),
                    detail: module.doc.clone(),
                    deprecated: false,
                    preferred_alternative: None,
                    module: None,
                });
            }
        }
        Context::Members(ty) => {
            for entry in registry.members_of(ty) {
                out.push(Candidate::from_entry(entry));
            }
        }
        Context::TopLevel => {
            for entry in registry
                .statements
                .iter()
                .chain(&registry.operators)
                .chain(&registry.builtins)
                .chain(&registry.constants)
                .chain(&registry.questions)
                .chain(&registry.snippets)
            {
                out.push(Candidate::from_entry(entry));
            }
            for symbol in overlay.variables().chain(overlay.functions()).chain(overlay.labels()) {
                out.push(Candidate::from_symbol(symbol));
            }
        }
    }

    out.retain(|c| registry.module_visible(c.module.as_deref(), active_module));
    tracing::trace!(count = out.len(), ?context, "built candidate pool");
    out
}

/// Filters the pool against the partial token and ranks the survivors.
///
/// Deprecated synonyms never shadow their canonical entries: they are shown
/// only when no non-deprecated candidate matches the partial at all.
pub fn filter_and_rank(pool: &[Candidate], partial: &str) -> Vec<Candidate> {
    let matcher = compile_prefix_regex(partial, false);
    let mut visible: Vec<Candidate> = pool
        .iter()
        .filter(|c| matcher.is_match(&c.label))
        .cloned()
        .collect();

    if visible.iter().any(|c| !c.deprecated) {
        visible.retain(|c| !c.deprecated);
    }

    visible.sort_by(|a, b| {
        kind_priority(a.kind)
            .cmp(&kind_priority(b.kind))
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
    });
    visible
}
