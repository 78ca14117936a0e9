//! Reference-source lookups for the compendium builder.
//!
//! Given an item name, the [`Lookup`] consults the primary (SRD) source and
//! then the secondary (Open5e) source, in the fixed order of
//! [`Strategy::CHAIN`], and builds a [`CompendiumEntry`] from the first
//! record found.

pub mod build;
pub mod chain;
pub mod error;
pub mod fetch;
pub mod models;
pub mod source;
mod text;

pub use crate::build::equipment_summary;
pub use crate::chain::{Lookup, Resolved, Strategy};
pub use crate::fetch::Fetcher;
pub use crate::models::{Attunement, CompendiumEntry, roll20_url};
pub use crate::text::{SUMMARY_MAX_CHARS, summarize, truncate_summary};
use std::sync::Arc;

pub type FetcherHandle = Arc<dyn Fetcher + Send + Sync>;
