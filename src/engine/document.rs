//! Document zone splitting.
//!
//! Substitution policy differs by zone: front-matter metadata and the title
//! line always take the full (first-mention) replacement, while the body gets
//! first/subsequent differentiation. Splitting is purely textual; the YAML
//! front matter and the Markdown body are never parsed into a tree.

use once_cell::sync::Lazy;
use regex::Regex;

/// Front-matter fence used by Markdown documentation files.
pub const FRONT_MATTER_DELIMITER: &str = "---";

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    // First `#` heading at the very start of the remainder, leading
    // whitespace allowed, captured including its trailing newline.
    Regex::new(r"^\s*#[^\n]*\n?").expect("valid title pattern")
});

/// Split `text` into front-matter metadata and the remainder.
///
/// Metadata is recognized only when the text begins with the delimiter and a
/// closing delimiter exists; a malformed or missing closing fence leaves the
/// whole text as remainder with no metadata, exactly as read.
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    if text.starts_with(FRONT_MATTER_DELIMITER) {
        let mut parts = text.splitn(3, FRONT_MATTER_DELIMITER);
        let _before_fence = parts.next();
        if let (Some(metadata), Some(remainder)) = (parts.next(), parts.next()) {
            return (Some(metadata), remainder);
        }
    }
    (None, text)
}

/// Extract the title line from the remainder after front matter.
///
/// Returns `(title, body)` where the title, if present, includes its
/// trailing newline. Absent title leaves the body equal to the remainder.
pub fn extract_title(remainder: &str) -> (Option<&str>, &str) {
    match TITLE_RE.find(remainder) {
        Some(m) => (Some(m.as_str()), &remainder[m.end()..]),
        None => (None, remainder),
    }
}

/// Reassemble a document from transformed zones, re-wrapping metadata in its
/// fences when it was present on input.
pub fn reassemble(metadata: Option<&str>, title: Option<&str>, body: &str) -> String {
    let mut out = String::with_capacity(
        metadata.map_or(0, |m| m.len() + 2 * FRONT_MATTER_DELIMITER.len())
            + title.map_or(0, str::len)
            + body.len(),
    );
    if let Some(metadata) = metadata {
        out.push_str(FRONT_MATTER_DELIMITER);
        out.push_str(metadata);
        out.push_str(FRONT_MATTER_DELIMITER);
    }
    if let Some(title) = title {
        out.push_str(title);
    }
    out.push_str(body);
    out
}
