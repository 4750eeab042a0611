use engine::{Overlay, TypeKey};

use crate::resolver::Context;
use crate::suggest::{Candidate, CandidateKind, candidates, filter_and_rank};
use crate::tests::common::{collect, registry, registry_with_questions};

fn labels(list: &[Candidate]) -> Vec<&str> {
    list.iter().map(|c| c.label.as_str()).collect()
}

fn top_level(overlay: &Overlay, active_module: Option<&str>) -> Vec<Candidate> {
    candidates(Context::TopLevel, &registry(), overlay, active_module)
}

#[test]
fn local_variables_join_the_top_level_pool() {
    let overlay = collect("Dim myVar As number\nmyV");
    let visible = filter_and_rank(&top_level(&overlay, None), "myV");
    assert_eq!(labels(&visible), ["myVar"]);
    assert_eq!(visible[0].kind, CandidateKind::Variable);
}

#[test]
fn builtins_not_matching_the_partial_are_dropped() {
    let overlay = collect("Dim myVar As number");
    let visible = filter_and_rank(&top_level(&overlay, None), "myV");
    assert!(!visible.iter().any(|c| c.label == "Abs"));
}

#[test]
fn question_references_appear_at_top_level() {
    let registry = registry_with_questions(&["q1", "q2"]);
    let pool = candidates(Context::TopLevel, &registry, &Overlay::default(), None);
    let visible = filter_and_rank(&pool, "q");
    assert_eq!(labels(&visible), ["q1", "q2"]);
    assert_eq!(visible[0].kind, CandidateKind::Question);
}

#[test]
fn deprecated_synonym_hides_behind_its_canonical_entry() {
    // "Len" matches both Len and the deprecated Length; only Len survives.
    let visible = filter_and_rank(&top_level(&Overlay::default(), None), "Len");
    assert!(visible.iter().any(|c| c.label == "Len"));
    assert!(!visible.iter().any(|c| c.label == "Length"));
}

#[test]
fn deprecated_entry_shows_when_nothing_else_matches() {
    let visible = filter_and_rank(&top_level(&Overlay::default(), None), "Lengt");
    assert_eq!(labels(&visible), ["Length"]);
    assert!(visible[0].deprecated);
    assert_eq!(visible[0].preferred_alternative.as_deref(), Some("Len"));
}

#[test]
fn module_tagged_entries_need_a_reachable_active_module() {
    // Median is tagged `math`.
    let pool = top_level(&Overlay::default(), None);
    assert!(!pool.iter().any(|c| c.label == "Median"));

    let pool = top_level(&Overlay::default(), Some("text"));
    assert!(!pool.iter().any(|c| c.label == "Median"));

    let pool = top_level(&Overlay::default(), Some("math"));
    assert!(pool.iter().any(|c| c.label == "Median"));

    // survey depends on math transitively.
    let pool = top_level(&Overlay::default(), Some("survey"));
    assert!(pool.iter().any(|c| c.label == "Median"));
}

#[test]
fn member_context_pools_the_type_bucket_plus_common() {
    let pool = candidates(
        Context::Members(TypeKey::Number),
        &registry(),
        &Overlay::default(),
        None,
    );
    let names = labels(&pool);
    assert!(names.contains(&"Floor"));
    assert!(names.contains(&"Ceil"));
    assert!(names.contains(&"Value"));
    assert!(names.contains(&"Format"));
    assert!(!names.contains(&"Substring"));
    assert!(!names.contains(&"Abs"));
}

#[test]
fn any_member_context_unions_every_concrete_bucket() {
    let pool = candidates(
        Context::Members(TypeKey::Any),
        &registry(),
        &Overlay::default(),
        None,
    );
    let names = labels(&pool);
    assert!(names.contains(&"Floor"));
    assert!(names.contains(&"Substring"));
    assert!(names.contains(&"AddDays"));
    assert!(names.contains(&"Answers"));
    assert!(names.contains(&"Value"));
}

#[test]
fn module_context_lists_the_module_collection() {
    let pool = candidates(Context::Modules, &registry(), &Overlay::default(), None);
    let visible = filter_and_rank(&pool, "ma");
    assert_eq!(labels(&visible), ["math"]);
    assert_eq!(visible[0].kind, CandidateKind::Module);
}

#[test]
fn ranking_orders_kinds_then_names() {
    let overlay = collect("Dim total As number");
    let visible = filter_and_rank(&top_level(&overlay, None), "t");
    // Variables outrank builtins, which outrank keywords and operators.
    let total = visible.iter().position(|c| c.label == "total").unwrap();
    let trim = visible.iter().position(|c| c.label == "Trim").unwrap();
    let then = visible.iter().position(|c| c.label == "Then").unwrap();
    let to = visible.iter().position(|c| c.label == "To").unwrap();
    assert!(total < trim);
    assert!(trim < then);
    assert!(then < to);
}

#[test]
fn names_sort_case_insensitively_within_a_kind() {
    let visible = filter_and_rank(&top_level(&Overlay::default(), None), "S");
    let names: Vec<&str> = visible
        .iter()
        .filter(|c| c.kind == CandidateKind::Function)
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(names, ["Size", "Str", "Sum"]);
}

#[test]
fn snippets_insert_their_body() {
    let visible = filter_and_rank(&top_level(&Overlay::default(), None), "ifblock");
    assert_eq!(labels(&visible), ["ifblock"]);
    assert_eq!(visible[0].kind, CandidateKind::Snippet);
    assert!(visible[0].insert_text.starts_with("If "));
    assert!(visible[0].insert_text.ends_with("EndIf"));
}

#[test]
fn labels_and_functions_from_the_overlay_are_pooled() {
    let overlay = collect("start:\nFunction Helper(x As number)\nEndFunction\nGoto start");
    let pool = top_level(&overlay, None);
    let start = pool.iter().find(|c| c.label == "start").unwrap();
    assert_eq!(start.kind, CandidateKind::Label);
    let helper = pool.iter().find(|c| c.label == "Helper").unwrap();
    assert_eq!(helper.kind, CandidateKind::Function);
}
