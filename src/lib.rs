//! Docbrand: terminology rebranding for documentation trees
//!
//! Replaces legacy product names across Markdown and YAML documentation
//! according to rule tables, while preserving historical references
//! ("formerly X" parentheticals) and protected strings.
//!
//! # Architecture
//!
//! All substitution compiles down to literal splices over one snapshot of a
//! document, applied right-to-left so earlier offsets stay valid.
//! Intelligence lives in occurrence selection (historical-context
//! exclusion, first-mention ordinals, zone policy), not in the splice.
//!
//! One document flows through a fixed pass order: protected terms are
//! shielded behind placeholders, compound phrase rules run first, then the
//! primary term rules (zone-aware first-mention on Markdown, uniform on
//! YAML), then cleanup rules, and finally the protected terms are restored
//! byte-identical.
//!
//! # Safety
//!
//! - Rule tables are validated before any document is read
//! - Atomic file writes (tempfile + fsync + rename)
//! - Files are rewritten only when their text actually changed
//! - BOM-tolerant reads, plain UTF-8 writes
//! - The pipeline is idempotent once all search terms are consumed
//!
//! # Example
//!
//! ```
//! use docbrand::engine::{Pipeline, ReplacementMode};
//! use docbrand::rules::load_from_str;
//!
//! let tables = load_from_str(
//!     r#"
//! [[first_mention]]
//! term = "Contoso Studio"
//! first = "Contoso Fabric"
//! subsequent = "Fabric"
//! "#,
//! )
//! .unwrap();
//!
//! let pipeline = Pipeline::new(&tables);
//! let out = pipeline.apply(
//!     "Contoso Studio is fast. Contoso Studio scales.",
//!     ReplacementMode::FirstMention,
//! );
//! assert_eq!(out, "Contoso Fabric is fast. Fabric scales.");
//! ```

pub mod corpus;
pub mod engine;
pub mod output;
pub mod rules;

// Re-exports
pub use corpus::{discover, read_document, CorpusError, DocKind, KindFilter};
pub use engine::{
    historical_spans, replace_first_mention, replace_term, replace_with_zones, Pipeline,
    ReplacementMode,
};
pub use output::{render_diff, write_if_changed, OutputError, WriteOutcome};
pub use rules::{
    load_from_path, load_from_str, ConfigError, FirstMentionRule, ReplacementRule, RuleTables,
};
