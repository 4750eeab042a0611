use crate::tests::common::registry;
use crate::{PatternSet, TypeKey};

#[test]
fn statement_partition_feeds_word_sets() {
    let registry = registry();
    let set = PatternSet::compile(&registry);

    assert!(set.opening.contains("if"));
    assert!(set.opening.contains("FOR"));
    assert!(set.middle.contains("Else"));
    assert!(set.closing.contains("endif"));
    assert!(set.declaration.contains("dim"));
    assert!(set.label_consumer.contains("goto"));
    assert!(set.statements.contains("return"));

    // A keyword lives in exactly one class.
    assert!(!set.statements.contains("if"));
    assert!(!set.opening.contains("endif"));
}

#[test]
fn word_operators_exclude_symbolic_ones() {
    let registry = registry();
    let set = PatternSet::compile(&registry);

    assert!(set.operators.contains("and"));
    assert!(set.operators.contains("Has"));
    assert!(set.operators.contains("to"));
    // `<=` is matched structurally by the lexer, not by the word set.
    assert!(!set.operators.contains("<="));
}

#[test]
fn lookups_are_case_insensitive_and_typed() {
    let registry = registry();
    let set = PatternSet::compile(&registry);

    assert_eq!(set.builtin("abs"), Some(TypeKey::Number));
    assert_eq!(set.builtin("ABS"), Some(TypeKey::Number));
    assert_eq!(set.builtin("nope"), None);
    assert_eq!(set.constant("true"), Some(TypeKey::Number));
    assert_eq!(set.type_name("text"), Some(TypeKey::Text));
    assert_eq!(set.type_name("any"), Some(TypeKey::Any));
}

#[test]
fn member_union_widens_conflicting_result_types() {
    let registry = registry();
    let set = PatternSet::compile(&registry);

    // `Year` only exists on date.
    assert_eq!(set.member("year"), Some(TypeKey::Number));
    // `Sum` is number-valued on list; `Upper` text-valued on text.
    assert_eq!(set.member("upper"), Some(TypeKey::Text));
    // `First` on list is any-valued.
    assert_eq!(set.member("first"), Some(TypeKey::Any));
    assert_eq!(set.member("missing"), None);
}
