//! Dictionary registry: the immutable-after-build table of language entries.
//!
//! The host builds a [`Registry`] exactly once from [`RawDictionary`] data
//! (compiled-in defaults merged with optional locale overlays) and passes it
//! by reference into the lexer, resolver, and suggestion engine. There is no
//! ambient global state.

use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

mod defs;
mod merge;
mod raw;

pub use defs::{default_dictionary, default_locale};
pub use merge::{merge_dictionary, merge_entry};
pub use raw::{RawArg, RawDictionary, RawEntry, RawModule};

/// Member-namespace key: the semantic type a value can have.
///
/// Every concrete type owns exactly one member namespace; [`TypeKey::Any`]
/// resolves to the union of all namespaces plus the common subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKey {
    Number,
    Text,
    Date,
    List,
    Question,
    Any,
}

impl TypeKey {
    pub const CONCRETE: [TypeKey; 5] = [
        TypeKey::Number,
        TypeKey::Text,
        TypeKey::Date,
        TypeKey::List,
        TypeKey::Question,
    ];

    /// Parses a raw type name, accepting the aliases the script language uses.
    pub fn parse(name: &str) -> Option<TypeKey> {
        match name.to_lowercase().as_str() {
            "number" | "numeric" => Some(TypeKey::Number),
            "text" | "string" => Some(TypeKey::Text),
            "date" => Some(TypeKey::Date),
            "list" | "array" | "set" => Some(TypeKey::List),
            "question" | "reference" => Some(TypeKey::Question),
            "any" | "variant" => Some(TypeKey::Any),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeKey::Number => "number",
            TypeKey::Text => "text",
            TypeKey::Date => "date",
            TypeKey::List => "list",
            TypeKey::Question => "question",
            TypeKey::Any => "any",
        }
    }
}

/// What kind of language object an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Statement,
    Operator,
    Function,
    Method,
    Property,
    Constant,
    Question,
    Variable,
    Snippet,
    Core,
}

impl EntryKind {
    fn parse(name: &str) -> Option<EntryKind> {
        match name.to_lowercase().as_str() {
            "statement" => Some(EntryKind::Statement),
            "operator" => Some(EntryKind::Operator),
            "function" => Some(EntryKind::Function),
            "method" => Some(EntryKind::Method),
            "property" => Some(EntryKind::Property),
            "constant" => Some(EntryKind::Constant),
            "question" => Some(EntryKind::Question),
            "variable" => Some(EntryKind::Variable),
            "snippet" => Some(EntryKind::Snippet),
            "core" => Some(EntryKind::Core),
            _ => None,
        }
    }
}

/// Block role of a statement keyword, decided once at registry build.
///
/// The raw flags follow the dictionary convention: a keyword that will later
/// be closed carries `closes_block`, a keyword that closes an earlier block
/// carries `opens_block`, and a branch keyword sitting between the two
/// carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockRole {
    /// Starts a block and indents the lines that follow (`If`, `For`, ...).
    Opening,
    /// Sits between an opener and its closer (`Else`).
    Middle,
    /// Ends a block and dedents (`EndIf`, `Next`, ...).
    Closing,
    /// Declares a local symbol (`Dim`).
    Declaration,
    /// Consumes a label name (`Goto`).
    LabelConsumer,
    /// Any other statement.
    Plain,
}

impl BlockRole {
    /// Four-way partition over the raw flags (plus declaration/label cases).
    pub fn from_flags(opens: bool, closes: bool, declares: bool, uses_label: bool) -> BlockRole {
        if opens && closes {
            BlockRole::Middle
        } else if closes {
            BlockRole::Opening
        } else if opens {
            BlockRole::Closing
        } else if declares {
            BlockRole::Declaration
        } else if uses_label {
            BlockRole::LabelConsumer
        } else {
            BlockRole::Plain
        }
    }
}

/// One typed argument of a function, method, or snippet entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSpec {
    pub name: String,
    pub ty: TypeKey,
    pub optional: bool,
    pub repeatable: bool,
}

/// A resolved dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub name: String,
    /// Member namespace this entry belongs to, if it is a member.
    pub namespace: Option<TypeKey>,
    pub kind: EntryKind,
    pub result_type: Option<TypeKey>,
    pub args: Vec<ArgSpec>,
    pub deprecated: bool,
    /// Canonical replacement name for a deprecated synonym.
    pub preferred_alternative: Option<String>,
    pub version: Option<String>,
    pub module: Option<String>,
    pub block_role: BlockRole,
    pub doc: Option<String>,
    /// Expansion body for snippet entries.
    pub body: Option<String>,
}

/// A named module and its direct dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub deps: Vec<String>,
    pub doc: Option<String>,
}

/// The immutable-after-build language table.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub statements: Vec<DictionaryEntry>,
    pub operators: Vec<DictionaryEntry>,
    pub builtins: Vec<DictionaryEntry>,
    pub constants: Vec<DictionaryEntry>,
    pub questions: Vec<DictionaryEntry>,
    pub snippets: Vec<DictionaryEntry>,
    pub modules: Vec<Module>,
    members: BTreeMap<TypeKey, Vec<DictionaryEntry>>,
    common: Vec<DictionaryEntry>,
    versions: BTreeMap<String, Vec<String>>,
}

impl Registry {
    /// Builds a registry from raw definition data.
    ///
    /// Pure and idempotent per input value; malformed entries (missing name)
    /// are skipped rather than aborting the build.
    pub fn build(raw: RawDictionary) -> Registry {
        let mut registry = Registry::default();

        registry.statements = resolve_entries(raw.statements, EntryKind::Statement, None);
        registry.operators = resolve_entries(raw.operators, EntryKind::Operator, None);
        registry.builtins = resolve_entries(raw.builtins, EntryKind::Function, None);
        registry.constants = resolve_entries(raw.constants, EntryKind::Constant, None);
        registry.questions = resolve_entries(raw.questions, EntryKind::Question, None);
        registry.snippets = resolve_entries(raw.snippets, EntryKind::Snippet, None);

        for (type_name, entries) in raw.members {
            if type_name.to_lowercase() == "common" {
                registry.common = resolve_entries(entries, EntryKind::Property, None);
                continue;
            }
            let Some(key) = TypeKey::parse(&type_name) else {
                tracing::debug!(type_name, "skipping member namespace with unknown type");
                continue;
            };
            registry
                .members
                .insert(key, resolve_entries(entries, EntryKind::Property, Some(key)));
        }

        for module in raw.modules {
            let Some(name) = module.name else { continue };
            registry.modules.push(Module {
                name,
                deps: module.deps,
                doc: module.doc,
            });
        }

        registry.versions = build_version_index(&registry);
        registry
    }

    /// All entries valid as members of a value of type `key`, including the
    /// common subset. [`TypeKey::Any`] yields the union of every namespace.
    pub fn members_of(&self, key: TypeKey) -> Vec<&DictionaryEntry> {
        let mut buckets: Vec<&[DictionaryEntry]> = Vec::new();
        match key {
            TypeKey::Any => {
                for concrete in TypeKey::CONCRETE {
                    if let Some(entries) = self.members.get(&concrete) {
                        buckets.push(entries);
                    }
                }
            }
            concrete => {
                if let Some(entries) = self.members.get(&concrete) {
                    buckets.push(entries);
                }
            }
        }
        buckets.push(&self.common);

        let mut out: Vec<&DictionaryEntry> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for bucket in buckets {
            for entry in bucket {
                if seen.insert(entry.name.to_lowercase()) {
                    out.push(entry);
                }
            }
        }
        out
    }

    /// The member subset shared by every type.
    pub fn common_members(&self) -> &[DictionaryEntry] {
        &self.common
    }

    /// Looks up a top-level entry by name, case-insensitively.
    ///
    /// A miss is not an error; it simply yields no candidate.
    pub fn lookup(&self, name: &str) -> Option<&DictionaryEntry> {
        let lower = name.to_lowercase();
        self.statements
            .iter()
            .chain(&self.operators)
            .chain(&self.builtins)
            .chain(&self.constants)
            .chain(&self.questions)
            .chain(&self.snippets)
            .find(|e| e.name.to_lowercase() == lower)
    }

    /// Looks up a member entry within a namespace (falling through to common).
    pub fn lookup_member(&self, key: TypeKey, name: &str) -> Option<&DictionaryEntry> {
        let lower = name.to_lowercase();
        self.members_of(key)
            .into_iter()
            .find(|e| e.name.to_lowercase() == lower)
    }

    /// True if an entry tagged `entry_module` is visible while editing
    /// `active`: equal, untagged, or reachable through the module
    /// dependency graph.
    pub fn module_visible(&self, entry_module: Option<&str>, active: Option<&str>) -> bool {
        let Some(wanted) = entry_module else {
            return true;
        };
        let Some(active) = active else {
            return false;
        };
        let wanted = wanted.to_lowercase();
        let start = active.to_lowercase();
        if wanted == start {
            return true;
        }

        // Breadth-first over direct deps; the graph is tiny.
        let mut queue = VecDeque::from([start]);
        let mut seen = HashSet::new();
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(module) = self
                .modules
                .iter()
                .find(|m| m.name.to_lowercase() == current)
            else {
                continue;
            };
            for dep in &module.deps {
                let dep = dep.to_lowercase();
                if dep == wanted {
                    return true;
                }
                queue.push_back(dep);
            }
        }
        false
    }

    /// Derived `version -> [entry name]` report for release notes.
    pub fn versions_report(&self) -> &BTreeMap<String, Vec<String>> {
        &self.versions
    }

    fn all_entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.statements
            .iter()
            .chain(&self.operators)
            .chain(&self.builtins)
            .chain(&self.constants)
            .chain(&self.questions)
            .chain(&self.snippets)
            .chain(self.members.values().flatten())
            .chain(&self.common)
    }
}

fn resolve_entries(
    raw: Vec<RawEntry>,
    default_kind: EntryKind,
    namespace: Option<TypeKey>,
) -> Vec<DictionaryEntry> {
    raw.into_iter()
        .filter_map(|entry| resolve_entry(entry, default_kind, namespace))
        .collect()
}

fn resolve_entry(
    raw: RawEntry,
    default_kind: EntryKind,
    namespace: Option<TypeKey>,
) -> Option<DictionaryEntry> {
    let Some(name) = raw.name.filter(|n| !n.trim().is_empty()) else {
        tracing::debug!("skipping dictionary entry with missing name");
        return None;
    };

    let kind = raw
        .kind
        .as_deref()
        .and_then(EntryKind::parse)
        .unwrap_or(default_kind);
    let block_role = BlockRole::from_flags(
        raw.opens_block.unwrap_or(false),
        raw.closes_block.unwrap_or(false),
        raw.declares_symbol.unwrap_or(false),
        raw.uses_label.unwrap_or(false),
    );

    Some(DictionaryEntry {
        name,
        namespace,
        kind,
        result_type: raw.result_type.as_deref().and_then(TypeKey::parse),
        args: raw
            .args
            .into_iter()
            .filter_map(|arg| {
                Some(ArgSpec {
                    name: arg.name?,
                    ty: arg.ty.as_deref().and_then(TypeKey::parse).unwrap_or(TypeKey::Any),
                    optional: arg.optional.unwrap_or(false),
                    repeatable: arg.repeatable.unwrap_or(false),
                })
            })
            .collect(),
        deprecated: raw.deprecated.unwrap_or(false) || raw.preferred_alternative.is_some(),
        preferred_alternative: raw.preferred_alternative,
        version: raw.version,
        module: raw.module,
        block_role,
        doc: raw.doc,
        body: raw.body,
    })
}

fn build_version_index(registry: &Registry) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in registry.all_entries() {
        if let Some(version) = &entry.version {
            index.entry(version.clone()).or_default().push(entry.name.clone());
        }
    }
    for names in index.values_mut() {
        names.sort();
    }
    index
}
