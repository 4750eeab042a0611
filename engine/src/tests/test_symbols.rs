use std::time::{Duration, Instant};

use crate::tests::common::collect;
use crate::{Debounce, SymbolKind, TypeKey};

#[test]
fn dim_declarations_are_collected() {
    let overlay = collect("Dim total As number\ndim name as TEXT\nDim loose");
    assert_eq!(overlay.variable("total").unwrap().ty, TypeKey::Number);
    assert_eq!(overlay.variable("NAME").unwrap().ty, TypeKey::Text);
    assert_eq!(overlay.variable("loose").unwrap().ty, TypeKey::Any);
    assert!(overlay.variable("absent").is_none());
}

#[test]
fn loop_helper_declares_numeric_counter() {
    let overlay = collect("Repeat(\"i\", 1, 10)");
    let counter = overlay.variable("i").unwrap();
    assert_eq!(counter.ty, TypeKey::Number);
    assert_eq!(counter.kind, SymbolKind::Variable);
}

#[test]
fn function_headers_yield_function_and_params() {
    let overlay = collect("Function Score(points As number, label As text)\nEndFunction");
    let func = overlay.function("score").unwrap();
    assert_eq!(func.kind, SymbolKind::Function);
    assert_eq!(func.args.len(), 2);
    assert_eq!(func.args[0].ty, TypeKey::Number);
    assert_eq!(func.args[1].ty, TypeKey::Text);

    // Parameters double as typed variables.
    assert_eq!(overlay.variable("points").unwrap().ty, TypeKey::Number);
}

#[test]
fn labels_match_whole_declaration_lines() {
    let overlay = collect("start:\n  retry: \nnot_a_label: x");
    assert!(overlay.label("start").is_some());
    assert!(overlay.label("retry").is_some());
    assert!(overlay.label("not_a_label").is_none());
}

#[test]
fn conflicting_types_widen_to_any() {
    // `x` observed as number (loop counter) and text (parameter).
    let overlay = collect("Repeat(\"x\", 1, 2)\nFunction F(x As text)\nEndFunction");
    assert_eq!(overlay.variable("x").unwrap().ty, TypeKey::Any);
}

#[test]
fn widening_is_monotone_never_narrowing() {
    // Once widened to any, later same-typed observations keep it any.
    let overlay = collect(
        "Dim x As number\nDim x As text\nDim x As number\nDim x As number",
    );
    assert_eq!(overlay.variable("x").unwrap().ty, TypeKey::Any);
}

#[test]
fn each_pass_fully_replaces_the_overlay() {
    let first = collect("Dim gone As number");
    assert!(first.variable("gone").is_some());

    let second = collect("Dim kept As text");
    assert!(second.variable("gone").is_none());
    assert!(second.variable("kept").is_some());
}

#[test]
fn debounce_cancels_and_reschedules() {
    let start = Instant::now();
    let mut debounce = Debounce::new(Duration::from_millis(50));
    assert!(!debounce.fire(start));

    debounce.note_edit(start);
    assert!(debounce.is_pending());
    // Not yet due.
    assert!(!debounce.fire(start + Duration::from_millis(30)));

    // A new edit pushes the deadline out.
    debounce.note_edit(start + Duration::from_millis(40));
    assert!(!debounce.fire(start + Duration::from_millis(60)));

    // Due after the trailing delay; fires exactly once.
    assert!(debounce.fire(start + Duration::from_millis(90)));
    assert!(!debounce.fire(start + Duration::from_millis(120)));
}
