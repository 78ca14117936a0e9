use super::{decode, endpoint};
use crate::FetcherHandle;
use crate::error::{ErrorKind, Result};
use crate::models::srd::ResourceList;
use compendium_extract::normalize_key;
use exn::ResultExt;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::instrument;
use url::Url;

/// Categories of the primary source, in the order they are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrdCategory {
    MagicItems,
    /// Weapons, armor and adventuring gear.
    Equipment,
}
impl SrdCategory {
    pub fn path(&self) -> &'static str {
        match self {
            Self::MagicItems => "magic-items",
            Self::Equipment => "equipment",
        }
    }
}
impl fmt::Display for SrdCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The primary reference source: the 5e SRD API.
///
/// Lookups list a whole category and require an exact match-key match; there
/// is no fuzzy fallback.
#[derive(Clone)]
pub struct SrdSource {
    fetcher: FetcherHandle,
    base: Url,
}
impl SrdSource {
    pub fn new(fetcher: FetcherHandle, base: Url) -> Self {
        Self { fetcher, base }
    }

    /// Finds the record in `category` whose name has the same match key as
    /// `name`, returning it with the URL it was fetched from.
    ///
    /// `Ok(None)` when the listing has no such name, or either the listing or
    /// the record itself is "not found".
    #[instrument(skip(self), fields(source = "srd"))]
    pub async fn find<T: DeserializeOwned>(&self, category: SrdCategory, name: &str) -> Result<Option<(Url, T)>> {
        let listing_url = endpoint(&self.base, &[category.path()])?;
        let Some(body) = self.fetcher.get_json(&listing_url).await? else {
            return Ok(None);
        };
        let listing: ResourceList = decode(&listing_url, body)?;
        let target = normalize_key(name);
        let Some(reference) = listing.results.iter().find(|r| normalize_key(&r.name) == target) else {
            return Ok(None);
        };
        let Some(path) = reference.url.as_deref().filter(|p| !p.is_empty()) else {
            tracing::warn!(category = %category, name = %reference.name, "Listing entry has no record URL; skipping");
            return Ok(None);
        };
        // Record URLs are server-absolute paths, so joining drops the base's path.
        let record_url = self.base.join(path).or_raise(|| ErrorKind::InvalidUrl(path.to_string()))?;
        let Some(body) = self.fetcher.get_json(&record_url).await? else {
            return Ok(None);
        };
        Ok(Some((record_url.clone(), decode(&record_url, body)?)))
    }
}
