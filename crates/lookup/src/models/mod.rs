mod entry;
pub mod open5e;
pub mod srd;

pub use self::entry::{Attunement, CompendiumEntry, ROLL20_COMPENDIUM, roll20_url};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a string field that some records send as `null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keeps an explicit `null` as `Some(Value::Null)` so it can be told apart
/// from a missing field (which `#[serde(default)]` turns into `None`).
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}
