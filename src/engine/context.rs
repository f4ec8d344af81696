//! Historical-context detection.
//!
//! Documentation that renames a product typically keeps one parenthetical
//! aside naming the old brand, e.g. "Contoso Fabric (formerly Contoso
//! Studio)". Those asides must survive every substitution pass, so both
//! substituters build an exclusion set from the spans found here before
//! mutating any text.

use crate::engine::cache::context_pattern;
use std::ops::Range;

/// Find every historical-reference span for `term` in `text`.
///
/// A span is a parenthetical group (no nested close-paren) containing one of
/// the keywords "formerly", "previously", or "originally" followed by a
/// literal occurrence of `term`. Keyword matching is case-insensitive; the
/// term itself is matched case-sensitively. Returned ranges are byte offsets
/// into `text`, disjoint and in ascending order.
///
/// Any occurrence of `term` whose start falls inside one of these ranges is
/// excluded from substitution.
pub fn historical_spans(text: &str, term: &str) -> Vec<Range<usize>> {
    if term.is_empty() || !text.contains(term) {
        return Vec::new();
    }

    context_pattern(term)
        .find_iter(text)
        .map(|m| m.range())
        .collect()
}

/// Whether a match starting at `start` falls inside any of `spans`.
pub fn in_span(spans: &[Range<usize>], start: usize) -> bool {
    spans.iter().any(|span| span.contains(&start))
}
