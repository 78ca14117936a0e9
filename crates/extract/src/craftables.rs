//! Craftable name extraction.

use crate::input::{Facility, FunctionOption, Tools};
use crate::normalize_display;
use std::collections::BTreeSet;
use tracing::instrument;

/// Collects every distinct craftable item name referenced by the facilities
/// and the tool tables.
///
/// Names are [display-normalised](crate::normalize_display) before being
/// de-duplicated, so duplicates are judged on the display form and not on
/// the match key. Blank names are dropped. The result is sorted
/// case-insensitively, with ties broken by exact (byte-wise) order so the
/// output is deterministic.
///
/// # Examples
///
/// ```rust
/// use compendium_extract::{craftables, Facilities, Tools};
/// let facilities: Facilities = serde_json::from_str(
///     r#"[{"functions": [{"options": ["rope", {"label": " Potion  of Healing "}]}]}]"#,
/// ).unwrap();
/// let tools: Tools = serde_json::from_str(r#"{"Tinker": ["Abacus", "rope"]}"#).unwrap();
/// assert_eq!(craftables(&facilities, &tools), vec!["Abacus", "Potion of Healing", "rope"]);
/// ```
#[instrument(skip_all, fields(facilities = facilities.len(), count))]
pub fn craftables(facilities: &[Facility], tools: &Tools) -> Vec<String> {
    let from_facilities = facilities
        .iter()
        .flat_map(|facility| facility.functions.iter())
        .flat_map(|function| function.options.iter())
        .filter_map(FunctionOption::label);
    let names: BTreeSet<String> = from_facilities
        .chain(tools.items())
        .map(normalize_display)
        .filter(|name| !name.is_empty())
        .collect();
    // BTreeSet iteration is byte-ordered; a stable sort keeps that order among
    // names that only differ by case.
    let mut names: Vec<String> = names.into_iter().collect();
    names.sort_by_cached_key(|name| name.to_lowercase());
    tracing::Span::current().record("count", names.len());
    names
}
