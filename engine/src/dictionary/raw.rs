//! Raw dictionary input format.
//!
//! This is the shape the host hands to [`Registry::build`](super::Registry::build)
//! exactly once at startup: structural entry data plus optional locale overlays,
//! merged through [`merge`](super::merge) before the registry is assembled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level raw definition data.
///
/// `members` is keyed by type name (`"number"`, `"text"`, `"date"`, `"list"`,
/// `"question"`, or `"common"` for the subset shared by every type).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDictionary {
    pub versions: Vec<String>,
    pub statements: Vec<RawEntry>,
    pub operators: Vec<RawEntry>,
    pub builtins: Vec<RawEntry>,
    pub constants: Vec<RawEntry>,
    pub questions: Vec<RawEntry>,
    pub members: BTreeMap<String, Vec<RawEntry>>,
    pub snippets: Vec<RawEntry>,
    pub modules: Vec<RawModule>,
}

/// One raw language entry.
///
/// Entries without a `name` are malformed and skipped during the registry
/// build. The four block flags are partitioned into a
/// [`BlockRole`](super::BlockRole) once, at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub result_type: Option<String>,
    pub args: Vec<RawArg>,
    pub deprecated: Option<bool>,
    pub preferred_alternative: Option<String>,
    pub version: Option<String>,
    pub module: Option<String>,
    pub opens_block: Option<bool>,
    pub closes_block: Option<bool>,
    pub declares_symbol: Option<bool>,
    pub uses_label: Option<bool>,
    pub doc: Option<String>,
    /// Snippet body for `kind: "snippet"` entries.
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawArg {
    pub name: Option<String>,
    pub ty: Option<String>,
    pub optional: Option<bool>,
    pub repeatable: Option<bool>,
}

/// A named module (import target) and the modules it depends on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawModule {
    pub name: Option<String>,
    pub deps: Vec<String>,
    pub doc: Option<String>,
}

impl RawEntry {
    /// Convenience constructor used by the compiled-in definitions.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}
