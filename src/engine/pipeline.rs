//! First-mention substitution and the rule pipeline.
//!
//! The pipeline runs one document through the full pass order:
//! protect -> compound rules -> primary rules -> cleanup rules -> restore.
//! Every rule application works on the current state of the text, so rules
//! interact: a later rule sees an earlier rule's output. All rule
//! applications are total: an absent term is a no-op, never an error.

use crate::engine::context::{historical_spans, in_span};
use crate::engine::document::{extract_title, reassemble, split_front_matter};
use crate::engine::protect::{protect, restore};
use crate::engine::substitute::{is_word_token, replace_term, word_boundary_replace};
use crate::rules::RuleTables;

/// How the primary (first_mention) rule table is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementMode {
    /// Zone-aware first-mention differentiation (Markdown documents).
    FirstMention,
    /// Every occurrence takes the `first` replacement (YAML documents).
    Uniform,
}

/// Replace the first eligible occurrence of `term` with `first` and every
/// later eligible occurrence with `subsequent`.
///
/// Occurrences inside historical-context spans are ineligible and stay
/// byte-identical. Eligibility is judged left-to-right over one snapshot of
/// the text; the rewrites are then spliced right-to-left so earlier offsets
/// stay valid.
pub fn replace_first_mention(
    text: &str,
    term: &str,
    first: &str,
    subsequent: &str,
) -> String {
    if term.is_empty() || !text.contains(term) {
        return text.to_string();
    }

    let spans = historical_spans(text, term);
    let eligible: Vec<usize> = text
        .match_indices(term)
        .map(|(start, _)| start)
        .filter(|&start| !in_span(&spans, start))
        .collect();

    let Some(&first_start) = eligible.first() else {
        return text.to_string();
    };

    let mut result = text.to_string();
    for &start in eligible.iter().rev() {
        let replacement = if start == first_start { first } else { subsequent };
        result.replace_range(start..start + term.len(), replacement);
    }
    result
}

/// Zone-aware first-mention replacement over a whole document.
///
/// Metadata and title take `first` for every occurrence, with no
/// historical-context exclusion. Only the body goes through
/// [`replace_first_mention`].
pub fn replace_with_zones(text: &str, term: &str, first: &str, subsequent: &str) -> String {
    let (metadata, remainder) = split_front_matter(text);
    let (title, body) = extract_title(remainder);

    let new_metadata = metadata.map(|m| m.replace(term, first));
    let new_title = title.map(|t| t.replace(term, first));
    let new_body = replace_first_mention(body, term, first, subsequent);

    reassemble(new_metadata.as_deref(), new_title.as_deref(), &new_body)
}

/// Applies the loaded rule tables to documents, one at a time.
///
/// Rule tables are immutable for the life of the pipeline; each call to
/// [`Pipeline::apply`] is independent, so documents may be processed from
/// parallel workers sharing one pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    tables: &'a RuleTables,
}

impl<'a> Pipeline<'a> {
    pub fn new(tables: &'a RuleTables) -> Self {
        Self { tables }
    }

    /// Run one document through the full pass order and return the final
    /// text. The caller persists it only if it differs from the original.
    ///
    /// Re-running the pipeline on its own output is a no-op once no rule's
    /// search term remains in the text.
    pub fn apply(&self, text: &str, mode: ReplacementMode) -> String {
        let (mut current, restore_map) = protect(text, &self.tables.protected);

        // Compound phrases go first so partial matches never fire; they
        // honor historical context like any primary rule.
        for rule in &self.tables.compound {
            current = replace_term(&current, &rule.search, &rule.replace, None);
        }

        match mode {
            ReplacementMode::FirstMention => {
                for rule in &self.tables.first_mention {
                    current =
                        replace_with_zones(&current, &rule.term, &rule.first, &rule.subsequent);
                }
            }
            ReplacementMode::Uniform => {
                for rule in &self.tables.first_mention {
                    current = replace_term(&current, &rule.term, &rule.first, None);
                }
            }
        }

        // Cleanup is terminal and assumed safe: no historical-context
        // exclusion, whole-token matching where the term qualifies.
        for rule in &self.tables.cleanup {
            current = if is_word_token(&rule.search) {
                word_boundary_replace(&current, &rule.search, &rule.replace)
            } else {
                current.replace(&rule.search, &rule.replace)
            };
        }

        restore(&current, &restore_map)
    }
}
