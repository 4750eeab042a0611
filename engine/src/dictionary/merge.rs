//! Typed merge of raw dictionary data.
//!
//! Locale/description overlays are merged into structural definitions with an
//! explicit rule per field kind:
//! - scalar fields: the overlay value overwrites when present;
//! - list fields: overlay elements append;
//! - map fields: recurse per key, pairing entries by lowercase name.
//!
//! Entries are keyed by lowercase `name`; an overlay entry with no structural
//! counterpart is appended as-is.

use std::collections::BTreeMap;

use super::raw::{RawDictionary, RawEntry, RawModule};

/// Merges `overlay` into `base`, field by field.
pub fn merge_dictionary(base: &mut RawDictionary, overlay: RawDictionary) {
    merge_list(&mut base.versions, overlay.versions);
    merge_entries(&mut base.statements, overlay.statements);
    merge_entries(&mut base.operators, overlay.operators);
    merge_entries(&mut base.builtins, overlay.builtins);
    merge_entries(&mut base.constants, overlay.constants);
    merge_entries(&mut base.questions, overlay.questions);
    merge_member_map(&mut base.members, overlay.members);
    merge_entries(&mut base.snippets, overlay.snippets);
    merge_modules(&mut base.modules, overlay.modules);
}

/// Merges one overlay entry into a structural entry.
pub fn merge_entry(base: &mut RawEntry, overlay: RawEntry) {
    // Scalars overwrite.
    merge_scalar(&mut base.name, overlay.name);
    merge_scalar(&mut base.kind, overlay.kind);
    merge_scalar(&mut base.result_type, overlay.result_type);
    merge_scalar(&mut base.deprecated, overlay.deprecated);
    merge_scalar(&mut base.preferred_alternative, overlay.preferred_alternative);
    merge_scalar(&mut base.version, overlay.version);
    merge_scalar(&mut base.module, overlay.module);
    merge_scalar(&mut base.opens_block, overlay.opens_block);
    merge_scalar(&mut base.closes_block, overlay.closes_block);
    merge_scalar(&mut base.declares_symbol, overlay.declares_symbol);
    merge_scalar(&mut base.uses_label, overlay.uses_label);
    merge_scalar(&mut base.doc, overlay.doc);
    merge_scalar(&mut base.body, overlay.body);

    // Lists append.
    base.args.extend(overlay.args);
}

fn merge_scalar<T>(base: &mut Option<T>, overlay: Option<T>) {
    if overlay.is_some() {
        *base = overlay;
    }
}

fn merge_list<T>(base: &mut Vec<T>, overlay: Vec<T>) {
    base.extend(overlay);
}

/// Pairs entries by lowercase name; unmatched overlay entries append.
fn merge_entries(base: &mut Vec<RawEntry>, overlay: Vec<RawEntry>) {
    for entry in overlay {
        let key = entry.name.as_ref().map(|n| n.to_lowercase());
        let existing = key.as_ref().and_then(|key| {
            base.iter_mut()
                .find(|e| e.name.as_ref().is_some_and(|n| n.to_lowercase() == *key))
        });
        match existing {
            Some(slot) => merge_entry(slot, entry),
            None => base.push(entry),
        }
    }
}

fn merge_member_map(
    base: &mut BTreeMap<String, Vec<RawEntry>>,
    overlay: BTreeMap<String, Vec<RawEntry>>,
) {
    for (key, entries) in overlay {
        merge_entries(base.entry(key).or_default(), entries);
    }
}

fn merge_modules(base: &mut Vec<RawModule>, overlay: Vec<RawModule>) {
    for module in overlay {
        let key = module.name.as_ref().map(|n| n.to_lowercase());
        let existing = key.as_ref().and_then(|key| {
            base.iter_mut()
                .find(|m| m.name.as_ref().is_some_and(|n| n.to_lowercase() == *key))
        });
        match existing {
            Some(slot) => {
                merge_scalar(&mut slot.name, module.name);
                merge_scalar(&mut slot.doc, module.doc);
                merge_list(&mut slot.deps, module.deps);
            }
            None => base.push(module),
        }
    }
}
