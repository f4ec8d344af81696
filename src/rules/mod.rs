//! Rule tables: the declarative inputs to the substitution engine.
//!
//! Tables live in one TOML file and are loaded once per run; validation
//! failures are fatal before any document is read.

pub mod articles;
pub mod loader;
pub mod schema;

pub use articles::derive_article_rules;
pub use loader::{load_from_path, load_from_str, ConfigError};
pub use schema::{
    FirstMentionRule, ReplacementRule, RuleTables, ValidationError, ValidationIssue,
};
