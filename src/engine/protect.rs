//! Protected-term shielding.
//!
//! Terms on the protected list must appear byte-identical in the output no
//! matter what the rule tables say. Before any rule runs, every occurrence
//! is swapped for an index-unique placeholder that no rule's search text can
//! match; after the last pass the placeholders are swapped back.
//!
//! Overlapping protected terms (one a substring of another) resolve by list
//! order: the first listed term claims the text and later terms see its
//! placeholder, not the original. Callers that care about the outcome should
//! order the list explicitly.

/// Ordered placeholder-to-original pairs produced by [`protect`].
pub type RestoreMap = Vec<(String, String)>;

fn placeholder_for(index: usize) -> String {
    format!("__KEEP_TERM_{index}__")
}

/// Shield every occurrence of each protected term behind a placeholder.
///
/// Terms are processed in list order; a term not present in the current text
/// contributes no map entry. Empty terms are skipped (they would expand the
/// text without bound), and are additionally rejected at rule-load time.
pub fn protect(text: &str, terms: &[String]) -> (String, RestoreMap) {
    let mut map = RestoreMap::new();
    let mut shielded = text.to_string();

    for (index, term) in terms.iter().enumerate() {
        if term.is_empty() {
            continue;
        }
        if shielded.contains(term.as_str()) {
            let placeholder = placeholder_for(index);
            shielded = shielded.replace(term.as_str(), &placeholder);
            map.push((placeholder, term.clone()));
        }
    }

    (shielded, map)
}

/// Swap every placeholder back to its original term.
///
/// Applied unconditionally for all map entries, however many times each
/// placeholder now appears. Substitution rules never alter placeholders, so
/// no re-verification happens here.
pub fn restore(text: &str, map: &RestoreMap) -> String {
    let mut restored = text.to_string();
    for (placeholder, original) in map {
        restored = restored.replace(placeholder.as_str(), original.as_str());
    }
    restored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_protect_then_restore_roundtrip() {
        let text = "Keep Old Brand here and Old Brand there.";
        let protected = terms(&["Old Brand"]);

        let (shielded, map) = protect(text, &protected);
        assert!(!shielded.contains("Old Brand"));
        assert_eq!(shielded.matches("__KEEP_TERM_0__").count(), 2);

        assert_eq!(restore(&shielded, &map), text);
    }

    #[test]
    fn test_absent_term_contributes_no_entry() {
        let (shielded, map) = protect("nothing to see", &terms(&["Old Brand"]));
        assert_eq!(shielded, "nothing to see");
        assert!(map.is_empty());
    }

    #[test]
    fn test_empty_term_is_skipped() {
        let (shielded, map) = protect("text", &terms(&["", "text"]));
        assert_eq!(shielded, "__KEEP_TERM_1__");
        assert_eq!(map.len(), 1);
        assert_eq!(restore(&shielded, &map), "text");
    }

    #[test]
    fn test_overlapping_terms_resolve_by_list_order() {
        // "Old Brand Portal" is listed first, so it claims the longer match
        // and the shorter "Old Brand" only shields the free-standing one.
        let text = "Old Brand Portal and Old Brand.";
        let (shielded, map) =
            protect(text, &terms(&["Old Brand Portal", "Old Brand"]));
        assert_eq!(shielded, "__KEEP_TERM_0__ and __KEEP_TERM_1__.");
        assert_eq!(restore(&shielded, &map), text);
    }

    #[test]
    fn test_substring_listed_first_wins() {
        // Reversed order: the substring shields first, fragmenting the longer
        // term. Restore still reproduces the original text exactly.
        let text = "Old Brand Portal and Old Brand.";
        let (shielded, map) =
            protect(text, &terms(&["Old Brand", "Old Brand Portal"]));
        assert_eq!(shielded, "__KEEP_TERM_0__ Portal and __KEEP_TERM_0__.");
        assert_eq!(restore(&shielded, &map), text);
    }

    #[test]
    fn test_restore_is_byte_identical() {
        let text = "---\ntitle: Old Brand\n---\nOld Brand (formerly Older Brand)\n";
        let (shielded, map) = protect(text, &terms(&["Old Brand", "Older Brand"]));
        assert_eq!(restore(&shielded, &map), text);
    }
}
