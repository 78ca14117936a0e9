//! Record shapes served by the secondary (Open5e) reference source.

use serde::Deserialize;
use serde_json::Value;

/// A search response: `GET /{category}/?search={text}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<Item>,
}

/// A single search hit. Magic items, weapons and armor share this shape as
/// far as the entry builder is concerned.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub name: String,
    /// `None` when absent; an explicit `null` is kept as `Some(Value::Null)`.
    #[serde(default, rename = "type", deserialize_with = "super::present")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub desc: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default, rename = "document__url")]
    pub document_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
