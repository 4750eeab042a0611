use engine::{Overlay, TypeKey};

use crate::resolver::{Context, resolve};
use crate::tests::common::{collect, lex, registry, registry_with_questions, resolve_at};

#[test]
fn empty_input_is_top_level() {
    let registry = registry();
    let resolution = resolve_at(&registry, "", 0);
    assert_eq!(resolution.context, Context::TopLevel);
    assert!(resolution.doc.is_none());
}

#[test]
fn member_context_strips_to_the_result_type() {
    // `q1.` resolves to q1's classified type stripped of its member prefix:
    // the question namespace (union common, applied by the suggestion side).
    let registry = registry_with_questions(&["q1"]);
    let text = "q1.";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::Members(TypeKey::Question));
    let doc = resolution.doc.unwrap();
    assert_eq!(doc.name, "q1");
    assert_eq!(doc.ty, TypeKey::Question);
}

#[test]
fn member_context_from_local_symbol_type() {
    let registry = registry();
    let overlay = collect("Dim total As number");
    let text = "total.";
    let tokens = lex(&registry, text, &overlay);
    let resolution = resolve(text, &tokens, text.len() as u32, &registry);
    assert_eq!(resolution.context, Context::Members(TypeKey::Number));
}

#[test]
fn member_context_through_partial_member_word() {
    let registry = registry();
    let overlay = collect("Dim name As text");
    let text = "name.Le";
    let tokens = lex(&registry, text, &overlay);
    let resolution = resolve(text, &tokens, text.len() as u32, &registry);
    assert_eq!(resolution.context, Context::Members(TypeKey::Text));
}

#[test]
fn closed_paren_scope_takes_the_owner_type() {
    let registry = registry();
    let text = "Abs(3).";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::Members(TypeKey::Number));
}

#[test]
fn closed_brace_scope_is_a_set() {
    let registry = registry();
    let text = "{1 To 5}.";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::Members(TypeKey::List));
}

#[test]
fn moonwalk_finds_governing_reference_across_one_operator() {
    // Cursor inside the set literal, right after `1 `: the `To` inside the
    // braces does not count, `Has` is the single intervening operator.
    let registry = registry_with_questions(&["refA"]);
    let text = "refA Has {1 To 5}";
    let cursor = text.find("1 ").unwrap() as u32 + 2;
    let resolution = resolve_at(&registry, text, cursor);
    assert_eq!(resolution.context, Context::Members(TypeKey::Question));
    assert_eq!(resolution.doc.unwrap().name, "refA");
}

#[test]
fn moonwalk_counts_in_set_operators_only_after_crossing_the_opener() {
    // Typing after `5 `: both `To` and the earlier tokens are inside the set.
    let registry = registry_with_questions(&["refA"]);
    let text = "refA Has {1 To 5 ";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::Members(TypeKey::Question));
    assert_eq!(resolution.doc.unwrap().name, "refA");
}

#[test]
fn moonwalk_fails_past_two_operators() {
    let registry = registry_with_questions(&["refA"]);
    let text = "refA Has 1 And ";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::TopLevel);
    assert!(resolution.doc.is_none());
}

#[test]
fn moonwalk_fails_when_cursor_sits_on_the_reference() {
    // The walk's first step landing on a reference means the cursor itself
    // extends it; no governing lookup applies.
    let registry = registry_with_questions(&["refA"]);
    let text = "refA ";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::TopLevel);
}

#[test]
fn moonwalk_fails_on_closing_punctuation() {
    let registry = registry_with_questions(&["refA"]);
    let text = "refA Has {1 To 5} ";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::TopLevel);
}

#[test]
fn moonwalk_fails_on_disallowed_kinds() {
    let registry = registry_with_questions(&["refA"]);
    let text = "refA Has If ";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::TopLevel);
}

#[test]
fn moonwalk_terminates_on_long_operator_chains() {
    // Termination is bounded by the token count; a long pathological input
    // must resolve (to top level) rather than hang.
    let registry = registry_with_questions(&["refA"]);
    let mut text = String::from("refA ");
    for _ in 0..500 {
        text.push_str("+ 1 ");
    }
    let resolution = resolve_at(&registry, &text, text.len() as u32);
    assert_eq!(resolution.context, Context::TopLevel);
}

#[test]
fn delimited_references_also_govern() {
    let registry = registry();
    let text = "%age of respondent% Has {1 ";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::Members(TypeKey::Question));
    assert_eq!(resolution.doc.unwrap().name, "age of respondent");
}

#[test]
fn uses_line_resolves_to_modules() {
    let registry = registry();
    let text = "Uses ma";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_eq!(resolution.context, Context::Modules);

    // Other lines are unaffected.
    let text = "Uses math\nAbs";
    let resolution = resolve_at(&registry, text, text.len() as u32);
    assert_ne!(resolution.context, Context::Modules);
}

#[test]
fn cursor_off_a_utf8_boundary_does_not_panic() {
    let registry = registry();
    // Byte 6 sits inside the two-byte é; resolution must stay total.
    let text = "Uses é";
    let resolution = resolve_at(&registry, text, 6);
    assert_eq!(resolution.context, Context::Modules);
}

#[test]
fn doc_target_carries_dictionary_descriptions() {
    let registry = registry();
    let overlay = Overlay::default();
    let text = "Abs.";
    let tokens = lex(&registry, text, &overlay);
    let resolution = resolve(text, &tokens, text.len() as u32, &registry);
    let doc = resolution.doc.unwrap();
    assert_eq!(doc.name, "Abs");
    assert_eq!(doc.doc.as_deref(), Some("Absolute value of a number."));
}
