use serde::{Deserialize, Serialize};
use std::fmt;

/// Base of the generated vendor link; the escaped item name is appended.
pub const ROLL20_COMPENDIUM: &str = "https://roll20.net/compendium/dnd5e/";

/// Whether an item requires attunement, as far as the source can tell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attunement {
    Yes,
    No,
    /// The source doesn't say.
    Unknown,
    /// Stub entries: nothing was looked up.
    #[default]
    #[serde(rename = "")]
    Blank,
}
impl Attunement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "Unknown",
            Self::Blank => "",
        }
    }
}
impl From<bool> for Attunement {
    fn from(required: bool) -> Self {
        if required { Self::Yes } else { Self::No }
    }
}
impl fmt::Display for Attunement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single compendium record.
///
/// Field order is the serialised order. `roll20` is always populated; every
/// other field is empty on a [stub](CompendiumEntry::stub).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompendiumEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub attunement: Attunement,
    /// Short description, at most 420 characters.
    pub summary: String,
    /// Where the data came from, or empty.
    pub source: String,
    /// Vendor link generated from the requested item name.
    pub roll20: String,
}
impl CompendiumEntry {
    /// An entry for a name no reference source knows about.
    pub fn stub(name: &str) -> Self {
        Self {
            roll20: roll20_url(name),
            ..Default::default()
        }
    }
}

/// Generates the vendor link for an item name.
///
/// Every character outside the RFC 3986 unreserved set is percent-encoded,
/// except `/`, which is kept as-is.
///
/// # Examples
///
/// ```rust
/// use compendium_lookup::models::roll20_url;
/// assert_eq!(
///     roll20_url("Potion of Healing"),
///     "https://roll20.net/compendium/dnd5e/Potion%20of%20Healing",
/// );
/// assert_eq!(roll20_url("Ink/Pen"), "https://roll20.net/compendium/dnd5e/Ink/Pen");
/// ```
pub fn roll20_url(name: &str) -> String {
    let escaped = name.split('/').map(urlencoding::encode).collect::<Vec<_>>().join("/");
    format!("{ROLL20_COMPENDIUM}{escaped}")
}
