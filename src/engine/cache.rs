//! Thread-local cache for compiled historical-context patterns.
//!
//! A rebranding run applies the same handful of search terms to thousands of
//! documents, so the per-term context regex is compiled once per thread and
//! reused. Cache is capped at 256 entries; it is cleared wholesale when full.

use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;

const MAX_CACHE_ENTRIES: usize = 256;

thread_local! {
    static PATTERN_CACHE: RefCell<HashMap<String, Regex>> =
        RefCell::new(HashMap::new());
}

/// Get the compiled historical-context pattern for a term, compiling and
/// caching it on first use.
///
/// The pattern matches a parenthetical group with no nested close-paren that
/// contains one of the keywords "formerly", "previously", or "originally"
/// (case-insensitive) followed by a literal, case-sensitive occurrence of
/// `term`.
pub fn context_pattern(term: &str) -> Regex {
    PATTERN_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();

        if let Some(re) = cache.get(term) {
            return re.clone();
        }

        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }

        let pattern = format!(
            r"\([^)]*(?i:formerly|previously|originally)[^)]*{}[^)]*\)",
            regex::escape(term)
        );
        let compiled =
            Regex::new(&pattern).expect("escaped term always forms a valid pattern");
        cache.insert(term.to_string(), compiled.clone());
        compiled
    })
}

/// Clear the pattern cache (mainly for testing).
pub fn clear_cache() {
    PATTERN_CACHE.with(|cache| {
        cache.borrow_mut().clear();
    });
}

/// Get cache statistics for monitoring.
pub fn cache_size() -> usize {
    PATTERN_CACHE.with(|cache| cache.borrow().len())
}
