//! Text helpers shared by the entry builders.

use serde_json::Value;

/// Summaries longer than this many characters are truncated.
pub const SUMMARY_MAX_CHARS: usize = 420;
/// Characters kept (before trimming) when a summary is truncated.
const SUMMARY_KEEP_CHARS: usize = SUMMARY_MAX_CHARS - 3;
const ELLIPSIS: char = '\u{2026}';

/// Approximates JSON "truthiness": null, `false`, zero, and empty
/// strings/arrays/objects are all falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Renders a JSON value as plain text: strings without quotes, everything
/// else in its JSON form.
pub(crate) fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Picks the first description that is actually present.
pub(crate) fn first_present<'a>(candidates: impl IntoIterator<Item = Option<&'a Value>>) -> Option<&'a Value> {
    candidates.into_iter().flatten().find(|value| is_truthy(value))
}

/// Builds a short, single-line summary from a description that is either a
/// string or a list of paragraphs.
///
/// Empty paragraphs are skipped, the rest joined with a space, whitespace
/// runs collapsed, and the result [truncated](truncate_summary).
pub fn summarize(desc: Option<&Value>) -> String {
    let text = match desc {
        None => return String::new(),
        Some(value) if !is_truthy(value) => return String::new(),
        Some(Value::Array(paragraphs)) => {
            paragraphs.iter().filter(|p| is_truthy(p)).map(to_text).collect::<Vec<_>>().join(" ")
        },
        Some(other) => to_text(other),
    };
    truncate_summary(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Cuts text longer than [`SUMMARY_MAX_CHARS`] characters down to its first
/// 417 characters, trims trailing whitespace, and appends an ellipsis.
///
/// # Examples
///
/// ```rust
/// use compendium_lookup::truncate_summary;
/// let long = "a".repeat(500);
/// let short = truncate_summary(long);
/// assert_eq!(short.chars().count(), 418);
/// assert!(short.ends_with('\u{2026}'));
/// assert_eq!(truncate_summary("short".to_string()), "short");
/// ```
pub fn truncate_summary(text: String) -> String {
    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text;
    }
    let mut kept: String = text.chars().take(SUMMARY_KEEP_CHARS).collect();
    kept.truncate(kept.trim_end().len());
    kept.push(ELLIPSIS);
    kept
}
