//! Derived article cleanup rules.
//!
//! A compound rule that swaps a vowel-initial name for a consonant-initial
//! one (or the reverse) strands the indefinite article in front of every
//! rewritten occurrence: "an Azure Search index" rewritten to
//! "an Search index". For each such rule this module derives the cleanup
//! rule that repairs the article, e.g. `an Search` -> `a Search`. The
//! `sync-articles` subcommand appends the derived rules to the rule-table
//! file.

use crate::rules::schema::{ReplacementRule, RuleTables};

/// The indefinite article for a name, judged by its first letter. This is
/// the letter heuristic, not a phonetic one ("hour", "user" come out wrong);
/// the rule file can always be corrected by hand.
fn article_for(name: &str) -> Option<&'static str> {
    let first = name.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    match first.to_ascii_lowercase() {
        'a' | 'e' | 'i' | 'o' | 'u' => Some("an"),
        _ => Some("a"),
    }
}

/// Derive article cleanup rules from the compound table.
///
/// A rule is derived wherever a compound replacement changes which article
/// the text in front of it needs. Rules the cleanup table already contains
/// are skipped; the result is sorted by search term and free of duplicates.
pub fn derive_article_rules(tables: &RuleTables) -> Vec<ReplacementRule> {
    let mut derived = Vec::new();

    for rule in &tables.compound {
        let (Some(old_article), Some(new_article)) =
            (article_for(&rule.search), article_for(&rule.replace))
        else {
            continue;
        };
        if old_article == new_article {
            continue;
        }
        derived.push(ReplacementRule {
            search: format!("{old_article} {}", rule.replace),
            replace: format!("{new_article} {}", rule.replace),
        });
    }

    derived.sort_by(|a, b| a.search.cmp(&b.search));
    derived.dedup();
    derived.retain(|rule| !tables.cleanup.contains(rule));
    derived
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(search: &str, replace: &str) -> ReplacementRule {
        ReplacementRule {
            search: search.to_string(),
            replace: replace.to_string(),
        }
    }

    #[test]
    fn test_vowel_to_consonant_derives_an_to_a() {
        let tables = RuleTables {
            compound: vec![compound("Azure Search", "Search")],
            ..Default::default()
        };
        let derived = derive_article_rules(&tables);
        assert_eq!(derived, vec![compound("an Search", "a Search")]);
    }

    #[test]
    fn test_consonant_to_vowel_derives_a_to_an() {
        let tables = RuleTables {
            compound: vec![compound("Contoso Studio", "AI Studio")],
            ..Default::default()
        };
        let derived = derive_article_rules(&tables);
        assert_eq!(derived, vec![compound("a AI Studio", "an AI Studio")]);
    }

    #[test]
    fn test_same_article_derives_nothing() {
        let tables = RuleTables {
            compound: vec![compound("Contoso Studio", "Contoso Fabric")],
            ..Default::default()
        };
        assert!(derive_article_rules(&tables).is_empty());
    }

    #[test]
    fn test_existing_cleanup_rules_are_not_duplicated() {
        let tables = RuleTables {
            compound: vec![compound("Azure Search", "Search")],
            cleanup: vec![compound("an Search", "a Search")],
            ..Default::default()
        };
        assert!(derive_article_rules(&tables).is_empty());
    }

    #[test]
    fn test_result_is_sorted_and_deduplicated() {
        let tables = RuleTables {
            compound: vec![
                compound("Azure Zeta", "Zeta"),
                compound("Azure Alpha tooling", "Beta tooling"),
                compound("Entra Zeta", "Zeta"),
            ],
            ..Default::default()
        };
        let derived = derive_article_rules(&tables);
        assert_eq!(
            derived,
            vec![
                compound("an Beta tooling", "a Beta tooling"),
                compound("an Zeta", "a Zeta"),
            ]
        );
    }

    #[test]
    fn test_non_alphabetic_replacement_is_skipped() {
        let tables = RuleTables {
            compound: vec![compound("Azure Thing", "2nd Gen Thing")],
            ..Default::default()
        };
        assert!(derive_article_rules(&tables).is_empty());
    }
}
