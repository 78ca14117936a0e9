//! The persisted compendium and the merge pass that fills it.

pub mod document;
pub mod error;
pub mod merge;

pub use crate::document::{DOCUMENT_VERSION, Document};
pub use crate::merge::{MergeReport, Outcome, merge, merge_one};
