//! The persisted compendium document.
//!
//! ```json
//! {
//!   "version": 1,
//!   "items": {
//!     "Potion of Healing": {"type": "Potion", "attunement": "No", "summary": "…", "source": "…", "roll20": "…"}
//!   }
//! }
//! ```
//!
//! Items are kept as raw JSON objects rather than [`CompendiumEntry`] values:
//! entries curated by hand may have extra or missing fields, and those must
//! survive a run byte-for-byte.

use crate::error::{ErrorKind, Result};
use compendium_lookup::{CompendiumEntry, roll20_url};
use exn::ResultExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::instrument;

/// Version tag written to every document.
pub const DOCUMENT_VERSION: u64 = 1;

const ROLL20_FIELD: &str = "roll20";

/// What [`Document::backfill_roll20`] did to an existing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backfill {
    /// The item already had a vendor link.
    Present,
    /// The vendor link was missing and has been added.
    Added,
    /// The item isn't a JSON object, so nothing could be added.
    NotAnObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Whatever was read is replaced on [canonicalisation](Self::canonicalize).
    #[serde(default = "default_version", deserialize_with = "lenient_version")]
    pub version: u64,
    pub items: Map<String, Value>,
}
impl Default for Document {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            items: Map::new(),
        }
    }
}
fn default_version() -> u64 {
    DOCUMENT_VERSION
}
/// A version of any other shape (`"1"`, `1.0`, `null`) must not cost the items.
fn lenient_version<'de, D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_u64().unwrap_or(DOCUMENT_VERSION))
}

impl Document {
    /// Loads the document at `path`.
    ///
    /// Never fails: a missing file gives an empty document, and so does an
    /// unreadable or malformed one (after logging a warning).
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                tracing::info!("No existing compendium; starting empty");
                return Self::default();
            },
            Err(e) => {
                tracing::warn!(error = %e, "Existing compendium unreadable; starting empty");
                return Self::default();
            },
        };
        Self::from_json(&raw).unwrap_or_else(|| {
            tracing::warn!("Existing compendium malformed; starting empty");
            Self::default()
        })
    }

    /// Parses a document, or `None` if it isn't one.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.items.get(name)
    }

    /// Stores `entry` under `name`, replacing anything already there.
    pub fn insert(&mut self, name: impl Into<String>, entry: &CompendiumEntry) -> Result<()> {
        let value = serde_json::to_value(entry).or_raise(|| ErrorKind::Serialize)?;
        self.items.insert(name.into(), value);
        Ok(())
    }

    /// Adds a vendor link to the existing item `name` if it has none. No
    /// other field is touched.
    ///
    /// Returns `None` if there is no item called `name`.
    pub fn backfill_roll20(&mut self, name: &str) -> Option<Backfill> {
        let item = self.items.get_mut(name)?;
        Some(match item {
            Value::Object(fields) if fields.contains_key(ROLL20_FIELD) => Backfill::Present,
            Value::Object(fields) => {
                fields.insert(ROLL20_FIELD.to_string(), Value::String(roll20_url(name)));
                Backfill::Added
            },
            _ => Backfill::NotAnObject,
        })
    }

    /// Sorts items case-insensitively by name and stamps the current version.
    ///
    /// Names differing only by case keep their relative order.
    pub fn canonicalize(&mut self) {
        let mut items: Vec<(String, Value)> = std::mem::take(&mut self.items).into_iter().collect();
        items.sort_by_cached_key(|(name, _)| name.to_lowercase());
        self.items = items.into_iter().collect();
        self.version = DOCUMENT_VERSION;
    }

    /// Serialises as two-space indented JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).or_raise(|| ErrorKind::Serialize)
    }

    /// Writes the document to `path`, replacing the whole file at once.
    ///
    /// The JSON is written to a temporary file in the same directory which
    /// is then renamed over `path`, so a failed write leaves the previous
    /// document intact.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display(), items = self.items.len()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(directory).or_raise(|| ErrorKind::Io(path.to_path_buf()))?;
        file.write_all(json.as_bytes()).or_raise(|| ErrorKind::Io(path.to_path_buf()))?;
        file.flush().or_raise(|| ErrorKind::Io(path.to_path_buf()))?;
        file.persist(path).or_raise(|| ErrorKind::Io(path.to_path_buf()))?;
        tracing::debug!(bytes = json.len(), "Compendium written");
        Ok(())
    }
}
