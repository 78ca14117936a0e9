//! Input document shapes and loading.
//!
//! Both documents are hand-maintained JSON, so the models are lenient: any
//! option that is neither a string nor an object with a `label` is ignored,
//! as is any tool table that isn't an array.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use tracing::instrument;

/// A crafting facility and the functions it offers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Facility {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub functions: Vec<Function>,
}

/// One function of a facility (e.g. "Craft"), listing the options it can produce.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Function {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<FunctionOption>,
}

/// A facility function option: either a bare item name or an object with a `label`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FunctionOption {
    Name(String),
    Labelled { label: Value },
    Other(IgnoredAny),
}
impl FunctionOption {
    /// The raw (un-normalised) item name this option refers to, if any.
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Name(name) => Some(name.clone()),
            Self::Labelled { label } => Some(value_to_text(label)),
            Self::Other(_) => None,
        }
    }
}

/// Ordered sequence of facilities, as found in `facilities.json`.
pub type Facilities = Vec<Facility>;

/// A single tool table: a list of item names, or something to ignore.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolTable {
    Items(Vec<Value>),
    Other(IgnoredAny),
}

/// Tool tables keyed by table name, as found in `tools_tables.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Tools {
    Tables(BTreeMap<String, ToolTable>),
    Other(IgnoredAny),
}
impl Default for Tools {
    fn default() -> Self {
        Self::Tables(BTreeMap::new())
    }
}
impl Tools {
    /// Iterates every raw item name across all tables.
    pub fn items(&self) -> impl Iterator<Item = String> + '_ {
        let tables = match self {
            Self::Tables(tables) => Some(tables),
            Self::Other(_) => None,
        };
        tables
            .into_iter()
            .flat_map(|tables| tables.values())
            .filter_map(|table| match table {
                ToolTable::Items(items) => Some(items),
                ToolTable::Other(_) => None,
            })
            .flatten()
            .map(value_to_text)
    }
}

/// Renders a JSON scalar the way a person would write it: strings without
/// quotes, everything else in its JSON form.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads and parses a required JSON input document.
///
/// # Errors
///
/// - [`MissingInput`](ErrorKind::MissingInput) if the file does not exist,
/// - [`Io`](ErrorKind::Io) if it could not be read, and
/// - [`MalformedInput`](ErrorKind::MalformedInput) if it isn't JSON of the expected shape.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == IoErrorKind::NotFound => exn::bail!(ErrorKind::MissingInput(path.to_path_buf())),
        Err(e) => return Err(e).or_raise(|| ErrorKind::Io(path.to_path_buf())),
    };
    serde_json::from_str(&raw).or_raise(|| ErrorKind::MalformedInput(path.to_path_buf()))
}

/// Loads the facilities document.
pub fn load_facilities(path: impl AsRef<Path>) -> Result<Facilities> {
    load_json(path)
}

/// Loads the tool tables document.
pub fn load_tools(path: impl AsRef<Path>) -> Result<Tools> {
    load_json(path)
}
