//! Matching rules derived from the dictionary registry.
//!
//! The lexer hands whole identifiers to these matchers, so the word-boundary
//! property of the original prefix rules falls out for free: matching is a
//! case-insensitive whole-word lookup against the entry names of each
//! lexical class. Compiled once per registry, right after the registry build.

use std::collections::{HashMap, HashSet};

use crate::dictionary::{BlockRole, Registry, TypeKey};

/// Case-insensitive word set for one lexical class.
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    fn insert(&mut self, word: &str) {
        self.words.insert(word.to_lowercase());
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Word lists and typed lookup tables for every lexical class the lexer
/// distinguishes.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    /// Word operators (`And`, `Or`, `Has`, ...). Symbolic operators are
    /// matched structurally by the lexer.
    pub operators: WordSet,
    pub opening: WordSet,
    pub middle: WordSet,
    pub closing: WordSet,
    pub declaration: WordSet,
    pub label_consumer: WordSet,
    /// Statement keywords with no block role.
    pub statements: WordSet,
    /// Builtin functions, name -> result type.
    builtins: HashMap<String, TypeKey>,
    /// Constants, name -> result type.
    constants: HashMap<String, TypeKey>,
    /// Type names, name -> key.
    type_names: HashMap<String, TypeKey>,
    /// Union of all member namespaces, name -> result type (widened to `Any`
    /// when namespaces disagree).
    members: HashMap<String, TypeKey>,
    /// Dictionary-provided question references.
    questions: WordSet,
}

impl PatternSet {
    /// Derives the pattern set from a built registry.
    pub fn compile(registry: &Registry) -> PatternSet {
        let mut set = PatternSet::default();

        for entry in &registry.statements {
            match entry.block_role {
                BlockRole::Opening => set.opening.insert(&entry.name),
                BlockRole::Middle => set.middle.insert(&entry.name),
                BlockRole::Closing => set.closing.insert(&entry.name),
                BlockRole::Declaration => set.declaration.insert(&entry.name),
                BlockRole::LabelConsumer => set.label_consumer.insert(&entry.name),
                BlockRole::Plain => set.statements.insert(&entry.name),
            }
        }

        for entry in &registry.operators {
            if entry.name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                set.operators.insert(&entry.name);
            }
        }

        for entry in &registry.builtins {
            set.builtins.insert(
                entry.name.to_lowercase(),
                entry.result_type.unwrap_or(TypeKey::Any),
            );
        }
        for entry in &registry.constants {
            set.constants.insert(
                entry.name.to_lowercase(),
                entry.result_type.unwrap_or(TypeKey::Any),
            );
        }
        for entry in &registry.questions {
            set.questions.insert(&entry.name);
        }

        for key in TypeKey::CONCRETE {
            set.type_names.insert(key.name().to_string(), key);
            for entry in registry.members_of(key) {
                let result = entry.result_type.unwrap_or(TypeKey::Any);
                set.members
                    .entry(entry.name.to_lowercase())
                    .and_modify(|existing| {
                        // Same member name with different result types across
                        // namespaces widens to Any.
                        if *existing != result {
                            *existing = TypeKey::Any;
                        }
                    })
                    .or_insert(result);
            }
        }
        set.type_names.insert("any".to_string(), TypeKey::Any);

        set
    }

    pub fn builtin(&self, word: &str) -> Option<TypeKey> {
        self.builtins.get(&word.to_lowercase()).copied()
    }

    pub fn constant(&self, word: &str) -> Option<TypeKey> {
        self.constants.get(&word.to_lowercase()).copied()
    }

    pub fn type_name(&self, word: &str) -> Option<TypeKey> {
        self.type_names.get(&word.to_lowercase()).copied()
    }

    /// Result type of `word` as a member of any namespace.
    pub fn member(&self, word: &str) -> Option<TypeKey> {
        self.members.get(&word.to_lowercase()).copied()
    }

    pub fn question(&self, word: &str) -> bool {
        self.questions.contains(word)
    }
}
