//! Prefix-matching regex compilation for the current partial token.

use regex::Regex;

/// Leading punctuation a user may type to trigger completion; it must not
/// prevent candidates from matching while the name is still empty.
pub const TRIGGER_PUNCTUATION: [char; 3] = ['.', ':', '%'];

/// Compiles the partial token into a case-insensitive prefix matcher.
///
/// Trailing whitespace is stripped and regex metacharacters escaped. The
/// leading one or two characters become optional when they belong to
/// [`TRIGGER_PUNCTUATION`], so a connector typed by itself still matches
/// everything and narrows progressively. An empty partial compiles to
/// match-everything. Re-compiling the same input yields the same pattern.
pub fn compile_prefix_regex(partial: &str, exact: bool) -> Regex {
    let trimmed = partial.trim_end();
    if trimmed.is_empty() {
        // Matches every non-empty candidate name.
        return new_regex("(?i)^");
    }

    let mut pattern = String::from("(?i)^");
    let mut rest = trimmed;
    for _ in 0..2 {
        let Some(first) = rest.chars().next() else {
            break;
        };
        if !TRIGGER_PUNCTUATION.contains(&first) {
            break;
        }
        pattern.push_str("(?:");
        pattern.push_str(&regex::escape(&first.to_string()));
        pattern.push_str(")?");
        rest = &rest[first.len_utf8()..];
    }
    pattern.push_str(&regex::escape(rest));
    if exact {
        pattern.push('$');
    }
    new_regex(&pattern)
}

fn new_regex(pattern: &str) -> Regex {
    // Generated from escaped text; always a valid pattern.
    Regex::new(pattern).unwrap()
}
