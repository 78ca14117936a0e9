//! Item name normalisation.
//!
//! Two forms exist: the *display* form, which is what gets stored as a
//! compendium key, and the *match key*, which is only ever compared for
//! equality while looking names up in a reference source.

use crate::consts::{KEY_STRIP_REGEX, WHITESPACE_REGEX};

/// Canonicalises a free-text item name for display and storage.
///
/// Trims surrounding whitespace, straightens curly quotes, and collapses
/// internal whitespace runs to a single space.
///
/// # Examples
///
/// ```rust
/// use compendium_extract::normalize_display;
/// assert_eq!(normalize_display("  Smith’s   Tools "), "Smith's Tools");
/// assert_eq!(normalize_display(""), "");
/// ```
pub fn normalize_display(name: impl AsRef<str>) -> String {
    let straightened = name
        .as_ref()
        .trim()
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"");
    WHITESPACE_REGEX.replace_all(&straightened, " ").into_owned()
}

/// Derives the comparison key for a name.
///
/// Two names refer to the same craftable if, and only if, their keys are
/// equal. Keys are never persisted.
///
/// # Examples
///
/// ```rust
/// use compendium_extract::normalize_key;
/// assert_eq!(normalize_key("Longsword, +1"), "longsword,+1");
/// assert_eq!(normalize_key("Potion of Healing!"), normalize_key("potion of healing"));
/// ```
pub fn normalize_key(name: impl AsRef<str>) -> String {
    let lowered = normalize_display(name).to_lowercase();
    let stripped = KEY_STRIP_REGEX.replace_all(&lowered, "");
    stripped.replace(" +", "+").trim().to_string()
}
