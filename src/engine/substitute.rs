//! Literal substring substitution honoring historical-context exclusions.
//!
//! When a cap is given and historical spans are present, replacements are
//! selected right-to-left, so the cap keeps the *rightmost* eligible
//! occurrences. The capped no-context path is leftmost. The asymmetry is
//! long-standing observed behavior and is kept deliberately; see
//! `test_capped_with_context_selects_rightmost`.

use crate::engine::context::{historical_spans, in_span};
use regex::{NoExpand, Regex};

/// Replace occurrences of `term` with `replacement`, skipping occurrences
/// inside historical-context spans, up to `max` replacements.
///
/// Occurrence offsets are computed once over the input snapshot and the
/// rewrites are spliced right-to-left so earlier offsets stay valid. An
/// absent term is a no-op, never an error.
pub fn replace_term(
    text: &str,
    term: &str,
    replacement: &str,
    max: Option<usize>,
) -> String {
    if term.is_empty() || !text.contains(term) {
        return text.to_string();
    }

    let spans = historical_spans(text, term);
    if spans.is_empty() {
        // Fast path: plain substring replacement, leftmost-first under a cap.
        return match max {
            Some(count) => text.replacen(term, replacement, count),
            None => text.replace(term, replacement),
        };
    }

    let starts: Vec<usize> = text.match_indices(term).map(|(start, _)| start).collect();

    let mut result = text.to_string();
    let mut replaced = 0;

    for &start in starts.iter().rev() {
        if in_span(&spans, start) {
            continue;
        }
        if max.is_some_and(|count| replaced >= count) {
            continue;
        }
        result.replace_range(start..start + term.len(), replacement);
        replaced += 1;
    }

    result
}

/// Whether a cleanup search term qualifies for whole-token matching: no
/// whitespace and none of the markup characters that defeat `\b` anchoring.
pub fn is_word_token(term: &str) -> bool {
    !term.is_empty()
        && !term.contains(char::is_whitespace)
        && !term.contains('[')
        && !term.contains('#')
}

/// Replace whole-token occurrences of `search` with `replace`.
///
/// Used by cleanup rules so that e.g. `an` -> `a` never touches "banana".
/// The replacement is inserted literally (`$` has no capture meaning).
pub fn word_boundary_replace(text: &str, search: &str, replace: &str) -> String {
    let pattern = format!(r"\b{}\b", regex::escape(search));
    let re = Regex::new(&pattern).expect("escaped term always forms a valid pattern");
    re.replace_all(text, NoExpand(replace)).into_owned()
}
