use super::{decode, endpoint};
use crate::FetcherHandle;
use crate::error::Result;
use crate::models::open5e::{Item, SearchResults};
use compendium_extract::normalize_key;
use std::fmt;
use tracing::instrument;
use url::Url;

/// Categories of the secondary source, in the order they are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Open5eCategory {
    MagicItems,
    Weapons,
    Armor,
}
impl Open5eCategory {
    pub fn path(&self) -> &'static str {
        match self {
            Self::MagicItems => "magicitems",
            Self::Weapons => "weapons",
            Self::Armor => "armor",
        }
    }
}
impl fmt::Display for Open5eCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The secondary reference source: the Open5e API.
///
/// Lookups use the source's substring search, then [pick](pick_best) a hit.
#[derive(Clone)]
pub struct Open5eSource {
    fetcher: FetcherHandle,
    base: Url,
}
impl Open5eSource {
    pub fn new(fetcher: FetcherHandle, base: Url) -> Self {
        Self { fetcher, base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The search URL for `name` in `category`.
    pub fn search_url(&self, category: Open5eCategory, name: &str) -> Result<Url> {
        let mut url = endpoint(&self.base, &[category.path(), ""])?;
        url.query_pairs_mut().append_pair("search", name);
        Ok(url)
    }

    /// Searches `category` for `name`.
    #[instrument(skip(self), fields(source = "open5e"))]
    pub async fn search(&self, category: Open5eCategory, name: &str) -> Result<Option<Item>> {
        let url = self.search_url(category, name)?;
        let Some(body) = self.fetcher.get_json(&url).await? else {
            return Ok(None);
        };
        let hits: SearchResults = decode(&url, body)?;
        Ok(pick_best(hits.results, name))
    }
}

/// Picks the search hit whose match key equals `name`'s, or else the first
/// hit in the order the source returned them.
///
/// The fallback is best-effort: a search for a name the source doesn't have
/// can still return *something*, and that something gets used.
///
/// # Examples
///
/// ```rust
/// use compendium_lookup::{models::open5e::Item, source::pick_best};
/// let hit = |name: &str| Item { name: name.to_string(), ..Default::default() };
///
/// let exact = pick_best(vec![hit("Chain Shirt"), hit("Chain Mail")], "chain mail").unwrap();
/// assert_eq!(exact.name, "Chain Mail");
///
/// let first = pick_best(vec![hit("Scale Mail"), hit("Chain Mail")], "Mail").unwrap();
/// assert_eq!(first.name, "Scale Mail");
///
/// assert!(pick_best(Vec::new(), "Mail").is_none());
/// ```
pub fn pick_best(mut hits: Vec<Item>, name: &str) -> Option<Item> {
    if hits.is_empty() {
        return None;
    }
    let target = normalize_key(name);
    let position = match hits.iter().position(|hit| normalize_key(&hit.name) == target) {
        Some(position) => position,
        None => {
            tracing::debug!(name, fallback = %hits[0].name, "No exact search hit; using the first result");
            0
        },
    };
    Some(hits.swap_remove(position))
}
