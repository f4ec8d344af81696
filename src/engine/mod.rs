//! The text-substitution engine.
//!
//! All substitution compiles down to literal splices over one snapshot of
//! the document text, applied right-to-left so earlier offsets stay valid.
//! Intelligence lives in occurrence selection (historical-context exclusion,
//! first-mention ordinals, zone policy), not in the splice itself.

pub mod cache;
pub mod context;
pub mod document;
pub mod pipeline;
pub mod protect;
pub mod substitute;

pub use context::historical_spans;
pub use document::{extract_title, split_front_matter, FRONT_MATTER_DELIMITER};
pub use pipeline::{replace_first_mention, replace_with_zones, Pipeline, ReplacementMode};
pub use protect::{protect, restore, RestoreMap};
pub use substitute::{is_word_token, replace_term, word_boundary_replace};
