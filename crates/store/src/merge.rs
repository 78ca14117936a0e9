//! Merging looked-up entries into the compendium document.
//!
//! Existing items are authoritative: an item already in the document is never
//! looked up again, never overwritten, and only ever gains a vendor link if it
//! lacks one. Everything else is looked up; misses are stored as stubs so the
//! name still shows up (with its vendor link) next time.

use crate::document::{Backfill, Document};
use crate::error::{ErrorKind, Result};
use compendium_extract::normalize_display;
use compendium_lookup::{CompendiumEntry, Lookup, Resolved, Strategy};
use exn::ResultExt;
use std::fmt;
use tracing::instrument;

/// What happened to a single craftable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The document already had this item; `backfilled` if it gained a vendor link.
    Preserved { backfilled: bool },
    /// A reference source had it.
    Added(Strategy),
    /// Nobody had it; a stub was stored.
    NotFound,
}

/// Counters for a whole merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub scanned: usize,
    pub preserved: usize,
    pub added: usize,
    pub not_found: usize,
}
impl MergeReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Preserved { .. } => self.preserved += 1,
            Outcome::Added(_) => self.added += 1,
            Outcome::NotFound => self.not_found += 1,
        }
    }
}
impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Craftables scanned: {}", self.scanned)?;
        writeln!(f, "- Preserved existing entries: {}", self.preserved)?;
        writeln!(f, "- Added SRD/Open5e entries: {}", self.added)?;
        write!(f, "- Not found (stubs created): {}", self.not_found)
    }
}

/// Merges every craftable name into `document`, one name at a time, in the
/// order given, then [canonicalises](Document::canonicalize) the document.
///
/// Nothing is persisted here; on error the document may be half-merged and
/// should be discarded.
#[instrument(skip_all, fields(craftables = craftables.len(), existing = document.len()))]
pub async fn merge(document: &mut Document, craftables: &[String], lookup: &Lookup) -> Result<MergeReport> {
    let mut report = MergeReport {
        scanned: craftables.len(),
        ..Default::default()
    };
    for name in craftables {
        report.record(merge_one(document, name, lookup).await?);
    }
    document.canonicalize();
    tracing::info!(
        scanned = report.scanned,
        preserved = report.preserved,
        added = report.added,
        not_found = report.not_found,
        "Merge complete"
    );
    Ok(report)
}

/// Merges a single craftable name into `document`.
pub async fn merge_one(document: &mut Document, name: &str, lookup: &Lookup) -> Result<Outcome> {
    let name = normalize_display(name);
    if let Some(backfill) = document.backfill_roll20(&name) {
        match backfill {
            Backfill::Added => tracing::debug!(%name, "Preserved existing entry; added vendor link"),
            Backfill::Present => tracing::debug!(%name, "Preserved existing entry"),
            Backfill::NotAnObject => tracing::warn!(%name, "Preserved existing entry is not an object; left as-is"),
        }
        return Ok(Outcome::Preserved {
            backfilled: backfill == Backfill::Added,
        });
    }
    match lookup.resolve(&name).await.or_raise(|| ErrorKind::Lookup(name.clone()))? {
        Some(Resolved { strategy, entry }) => {
            tracing::info!(%name, %strategy, kind = %entry.kind, "Added entry");
            document.insert(name, &entry)?;
            Ok(Outcome::Added(strategy))
        },
        None => {
            tracing::info!(%name, "No match found; storing stub");
            document.insert(name.clone(), &CompendiumEntry::stub(&name))?;
            Ok(Outcome::NotFound)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compendium_lookup::fetch::MockFetcher;
    use compendium_lookup::roll20_url;
    use serde_json::json;
    use std::ops::Deref;
    use std::sync::Arc;
    use url::Url;

    const SRD: &str = "https://srd.test/api/2014";
    const OPEN5E: &str = "https://open5e.test";

    fn lookup(fetcher: MockFetcher) -> (Arc<MockFetcher>, Lookup) {
        let fetcher = Arc::new(fetcher);
        let lookup = Lookup::new(fetcher.clone(), Url::parse(SRD).unwrap(), Url::parse(OPEN5E).unwrap());
        (fetcher, lookup)
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn srd_fetcher() -> MockFetcher {
        MockFetcher::default()
            .with_json(
                format!("{SRD}/magic-items"),
                json!({"results": [{"name": "Potion of Healing", "url": "/api/2014/magic-items/potion-of-healing"}]}),
            )
            .with_json(
                format!("{SRD}/magic-items/potion-of-healing"),
                json!({"name": "Potion of Healing", "equipment_category": {"name": "Potion"},
                       "requires_attunement": false, "desc": ["Regain 2d4 + 2 hit points."]}),
            )
            .with_json(format!("{SRD}/equipment"), json!({"results": []}))
    }

    #[tokio::test]
    async fn test_counts_and_entries() {
        let (_, lookup) = lookup(srd_fetcher());
        let mut document = Document::from_json(r#"{"items": {"Homebrew Ale": {"type": "Homebrew"}}}"#).unwrap();
        let report =
            merge(&mut document, &names(&["Homebrew Ale", "Mystery Box", "Potion of Healing"]), &lookup).await.unwrap();
        assert_eq!(
            report,
            MergeReport {
                scanned: 3,
                preserved: 1,
                added: 1,
                not_found: 1
            }
        );
        assert_eq!(document.get("Potion of Healing").unwrap()["type"], "Potion");
        assert_eq!(
            document.get("Mystery Box").unwrap(),
            &serde_json::to_value(CompendiumEntry::stub("Mystery Box")).unwrap()
        );
        assert_eq!(
            document.get("Homebrew Ale").unwrap(),
            &json!({"type": "Homebrew", "roll20": roll20_url("Homebrew Ale")})
        );
    }

    #[tokio::test]
    async fn test_preserved_items_are_not_looked_up() {
        let (fetcher, lookup) = lookup(MockFetcher::default());
        let mut document = Document::from_json(r#"{"items": {"Rope": {"roll20": "x"}}}"#).unwrap();
        let outcome = merge_one(&mut document, "Rope", &lookup).await.unwrap();
        assert_eq!(outcome, Outcome::Preserved { backfilled: false });
        assert!(fetcher.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_names_are_display_normalised() {
        let (_, lookup) = lookup(MockFetcher::default());
        let mut document = Document::default();
        merge_one(&mut document, "  Mystery \u{2019}Box\u{2019} ", &lookup).await.unwrap();
        assert!(document.contains("Mystery 'Box'"));
    }

    #[tokio::test]
    async fn test_untouched_items_survive_and_are_sorted() {
        let (_, lookup) = lookup(MockFetcher::default());
        let mut document =
            Document::from_json(r#"{"version": 3, "items": {"zebra saddle": {"type": "Tack"}, "Anvil": {}}}"#).unwrap();
        merge(&mut document, &names(&["Mystery Box"]), &lookup).await.unwrap();
        let keys: Vec<&str> = document.items.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Anvil", "Mystery Box", "zebra saddle"]);
        // Items not among the craftables aren't backfilled.
        assert_eq!(document.get("zebra saddle").unwrap(), &json!({"type": "Tack"}));
        assert_eq!(document.version, 1);
    }

    #[tokio::test]
    async fn test_second_merge_preserves_everything() {
        let (_, lookup) = lookup(srd_fetcher());
        let craftables = names(&["Mystery Box", "Potion of Healing"]);
        let mut document = Document::default();
        merge(&mut document, &craftables, &lookup).await.unwrap();
        let first = document.to_json().unwrap();

        let report = merge(&mut document, &craftables, &lookup).await.unwrap();
        assert_eq!(report.preserved, 2);
        assert_eq!(report.added + report.not_found, 0);
        assert_eq!(document.to_json().unwrap(), first);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_fatal() {
        let (_, lookup) = lookup(MockFetcher::default().with_status(format!("{SRD}/magic-items"), 500));
        let mut document = Document::default();
        let err = merge(&mut document, &names(&["Rope"]), &lookup).await.unwrap_err();
        assert_eq!(err.deref(), &ErrorKind::Lookup("Rope".to_string()));
    }
}
