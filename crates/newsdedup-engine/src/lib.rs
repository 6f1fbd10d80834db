//! Article deduplication engine.
//!
//! Collapses a finite batch of news articles in two passes: first by
//! canonical source URL, then by normalized headline within a time window.
//! Every surviving record is one of the inputs, untouched; duplicates are
//! resolved by [`choose_better`] rather than merged field by field.

pub mod batch;
pub mod canonical;
pub mod dedupe;
pub mod error;
pub mod merge;
pub mod title;

pub use batch::{read_batch, write_batch};
pub use canonical::canonicalize_url;
pub use dedupe::{dedupe, dedupe_with_report, DedupeReport};
pub use error::BatchError;
pub use merge::choose_better;
pub use newsdedup_core::{Article, DedupeOptions, PublishedAt};
pub use title::normalize_title;
