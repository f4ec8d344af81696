use serde::Deserialize;
use std::fmt;

/// The full set of rule tables for one rebranding run.
///
/// All tables are optional in the source file; an entirely empty set is
/// rejected by [`RuleTables::validate`] since a run with no rules can only
/// be a configuration mistake. Order within each table is significant and
/// preserved: a later rule acts on text produced by an earlier one.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RuleTables {
    /// Primary term rules: first-mention differentiation on Markdown,
    /// uniform `first` replacement on YAML.
    #[serde(default)]
    pub first_mention: Vec<FirstMentionRule>,
    /// Multi-word phrases replaced before the primary rules so partial
    /// matches never fire.
    #[serde(default)]
    pub compound: Vec<ReplacementRule>,
    /// Terminal cleanup replacements, applied unconditionally.
    #[serde(default)]
    pub cleanup: Vec<ReplacementRule>,
    /// Literal strings that must never be altered by any rule.
    #[serde(default)]
    pub protected: Vec<String>,
    /// Directory names skipped during corpus discovery.
    #[serde(default)]
    pub skip_folders: Vec<String>,
}

/// Unconditional literal substitution: `search` -> `replace`.
///
/// Uniqueness of `search` within a table is expected but not enforced;
/// duplicates simply apply in sequence.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    pub search: String,
    pub replace: String,
}

/// Differentiated substitution by ordinal position: the first eligible
/// occurrence in a scope takes `first`, every later one takes `subsequent`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FirstMentionRule {
    pub term: String,
    pub first: String,
    pub subsequent: String,
}

impl RuleTables {
    /// Whether any substitution rule exists at all.
    pub fn is_empty(&self) -> bool {
        self.first_mention.is_empty() && self.compound.is_empty() && self.cleanup.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.is_empty() {
            issues.push(ValidationIssue::EmptyRuleTables);
        }

        for (index, rule) in self.first_mention.iter().enumerate() {
            if rule.term.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    table: "first_mention",
                    index,
                    field: "term",
                });
            }
        }

        for (index, rule) in self.compound.iter().enumerate() {
            if rule.search.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    table: "compound",
                    index,
                    field: "search",
                });
            }
        }

        for (index, rule) in self.cleanup.iter().enumerate() {
            if rule.search.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    table: "cleanup",
                    index,
                    field: "search",
                });
            }
        }

        // An empty protected term would expand without bound when shielded.
        for (index, term) in self.protected.iter().enumerate() {
            if term.is_empty() {
                issues.push(ValidationIssue::MissingField {
                    table: "protected",
                    index,
                    field: "term",
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    EmptyRuleTables,
    MissingField {
        table: &'static str,
        index: usize,
        field: &'static str,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyRuleTables => {
                write!(f, "rule tables contain no substitution rules")
            }
            ValidationIssue::MissingField {
                table,
                index,
                field,
            } => {
                write!(
                    f,
                    "{table} rule at index {index} has empty required field '{field}'"
                )
            }
        }
    }
}
