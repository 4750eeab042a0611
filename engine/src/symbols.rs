//! Document symbol collection.
//!
//! Scans the full document text (on a trailing debounce, host-driven) to
//! harvest locally declared variables, labels, and function signatures, and
//! feeds them back into the lexer as a mutable overlay dictionary. Each pass
//! fully replaces the previous overlay table.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::dictionary::{ArgSpec, TypeKey};

/// Default trailing-debounce delay between the last edit and a rescan.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Label,
    Function,
}

/// A symbol discovered in the current document, layered over the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySymbol {
    pub name: String,
    pub ty: TypeKey,
    pub kind: SymbolKind,
    pub args: Vec<ArgSpec>,
}

/// The overlay dictionary: locally declared variables, labels, and functions,
/// keyed by lowercase name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    variables: HashMap<String, OverlaySymbol>,
    labels: HashMap<String, OverlaySymbol>,
    functions: HashMap<String, OverlaySymbol>,
}

impl Overlay {
    pub fn variable(&self, name: &str) -> Option<&OverlaySymbol> {
        self.variables.get(&name.to_lowercase())
    }

    pub fn label(&self, name: &str) -> Option<&OverlaySymbol> {
        self.labels.get(&name.to_lowercase())
    }

    pub fn function(&self, name: &str) -> Option<&OverlaySymbol> {
        self.functions.get(&name.to_lowercase())
    }

    pub fn variables(&self) -> impl Iterator<Item = &OverlaySymbol> {
        self.variables.values()
    }

    pub fn labels(&self) -> impl Iterator<Item = &OverlaySymbol> {
        self.labels.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &OverlaySymbol> {
        self.functions.values()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.labels.is_empty() && self.functions.is_empty()
    }

    /// Records a variable observation. Conflicting inferred types widen to
    /// `Any` and never narrow back (monotone).
    fn observe_variable(&mut self, name: &str, ty: TypeKey) {
        let key = name.to_lowercase();
        match self.variables.get_mut(&key) {
            Some(existing) => {
                if existing.ty != ty {
                    existing.ty = TypeKey::Any;
                }
            }
            None => {
                self.variables.insert(
                    key,
                    OverlaySymbol {
                        name: name.to_string(),
                        ty,
                        kind: SymbolKind::Variable,
                        args: Vec::new(),
                    },
                );
            }
        }
    }
}

/// Full-document scanner, regexes compiled once.
#[derive(Debug)]
pub struct Collector {
    dim_re: Regex,
    loop_re: Regex,
    func_re: Regex,
    label_re: Regex,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Collector {
        // The patterns are fixed strings; construction cannot fail.
        Collector {
            dim_re: Regex::new(
                r"(?im)^\s*dim\s+([A-Za-z_][A-Za-z0-9_]*)(?:\s+as\s+([A-Za-z_][A-Za-z0-9_]*))?",
            )
            .unwrap(),
            loop_re: Regex::new(r#"(?i)\brepeat\s*\(\s*"([A-Za-z_][A-Za-z0-9_]*)""#).unwrap(),
            func_re: Regex::new(
                r"(?im)^\s*function\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)",
            )
            .unwrap(),
            label_re: Regex::new(r"(?m)^\s*([A-Za-z_][A-Za-z0-9_]*):[ \t]*$").unwrap(),
        }
    }

    /// Scans `text` and returns a fresh overlay table.
    pub fn collect(&self, text: &str) -> Overlay {
        let mut overlay = Overlay::default();

        // Explicit declarations: `Dim name [As type]`.
        for caps in self.dim_re.captures_iter(text) {
            let name = &caps[1];
            let ty = caps
                .get(2)
                .and_then(|m| TypeKey::parse(m.as_str()))
                .unwrap_or(TypeKey::Any);
            overlay.observe_variable(name, ty);
        }

        // Loop helpers: `Repeat("i", ...)` declares a numeric counter.
        for caps in self.loop_re.captures_iter(text) {
            overlay.observe_variable(&caps[1], TypeKey::Number);
        }

        // Function headers: the function itself plus its typed parameters.
        for caps in self.func_re.captures_iter(text) {
            let name = caps[1].to_string();
            let args = parse_params(&caps[2]);
            for arg in &args {
                overlay.observe_variable(&arg.name, arg.ty);
            }
            overlay.functions.insert(
                name.to_lowercase(),
                OverlaySymbol {
                    name,
                    ty: TypeKey::Any,
                    kind: SymbolKind::Function,
                    args,
                },
            );
        }

        // Label-declaration lines: `name:` alone on a line.
        for caps in self.label_re.captures_iter(text) {
            let name = caps[1].to_string();
            overlay.labels.insert(
                name.to_lowercase(),
                OverlaySymbol {
                    name,
                    ty: TypeKey::Any,
                    kind: SymbolKind::Label,
                    args: Vec::new(),
                },
            );
        }

        tracing::debug!(
            variables = overlay.variables.len(),
            labels = overlay.labels.len(),
            functions = overlay.functions.len(),
            "collected overlay symbols"
        );
        overlay
    }
}

/// Parses `a As number, b As text, c` parameter lists.
fn parse_params(raw: &str) -> Vec<ArgSpec> {
    raw.split(',')
        .filter_map(|piece| {
            let piece = piece.trim();
            if piece.is_empty() {
                return None;
            }
            let mut words = piece.split_whitespace();
            let name = words.next()?.to_string();
            if !name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_') {
                return None;
            }
            let ty = match (words.next(), words.next()) {
                (Some(kw), Some(ty)) if kw.eq_ignore_ascii_case("as") => {
                    TypeKey::parse(ty).unwrap_or(TypeKey::Any)
                }
                _ => TypeKey::Any,
            };
            Some(ArgSpec {
                name,
                ty,
                optional: false,
                repeatable: false,
            })
        })
        .collect()
}

/// Trailing debounce for the collector: every edit cancels and reschedules
/// the deadline; the host polls [`Debounce::fire`] from its event loop.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debounce {
    pub fn new(delay: Duration) -> Debounce {
        Debounce {
            delay,
            deadline: None,
        }
    }

    /// Cancel-and-reschedule on an edit.
    pub fn note_edit(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True once per elapsed deadline; a rescan that has started is never
    /// cancelled, a new edit merely schedules the next one.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
