//! The ordered lookup chain.
//!
//! A name is tried against each [`Strategy`] in [`Strategy::CHAIN`] order and
//! the first one to produce an entry wins. A strategy that finds nothing is
//! not retried. Errors other than "not found" abort the chain.

use crate::FetcherHandle;
use crate::build;
use crate::error::Result;
use crate::models::CompendiumEntry;
use crate::models::srd::{Equipment, MagicItem};
use crate::source::{Open5eCategory, Open5eSource, SrdCategory, SrdSource};
use derive_more::Display;
use tracing::instrument;
use url::Url;

/// One step of the lookup chain.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Primary source, magic items, exact match only.
    #[display("srd/magic-items")]
    SrdMagicItem,
    /// Primary source, equipment, exact match only.
    #[display("srd/equipment")]
    SrdEquipment,
    /// Secondary source, magic items, best-effort match.
    #[display("open5e/magicitems")]
    Open5eMagicItem,
    /// Secondary source, weapons, best-effort match.
    #[display("open5e/weapons")]
    Open5eWeapon,
    /// Secondary source, armor, best-effort match.
    #[display("open5e/armor")]
    Open5eArmor,
}
impl Strategy {
    /// Every strategy, in priority order.
    pub const CHAIN: [Self; 5] =
        [Self::SrdMagicItem, Self::SrdEquipment, Self::Open5eMagicItem, Self::Open5eWeapon, Self::Open5eArmor];
}

/// A successful lookup: the entry, and which strategy produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub strategy: Strategy,
    pub entry: CompendiumEntry,
}

/// Resolves item names against both reference sources.
///
/// # Examples
///
/// ```no_run
/// use compendium_lookup::{Lookup, fetch::HttpFetcher};
/// use std::{sync::Arc, time::Duration};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = Arc::new(HttpFetcher::new("http", Duration::from_secs(20), "compendium")?);
/// let lookup = Lookup::new(
///     fetcher,
///     Url::parse("https://www.dnd5eapi.co/api/2014")?,
///     Url::parse("https://api.open5e.com")?,
/// );
/// match lookup.resolve("Potion of Healing").await? {
///     Some(resolved) => println!("{}: {}", resolved.strategy, resolved.entry.summary),
///     None => println!("not found"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Lookup {
    srd: SrdSource,
    open5e: Open5eSource,
}
impl Lookup {
    pub fn new(fetcher: FetcherHandle, srd_base: Url, open5e_base: Url) -> Self {
        Self {
            srd: SrdSource::new(fetcher.clone(), srd_base),
            open5e: Open5eSource::new(fetcher, open5e_base),
        }
    }

    /// Runs the chain for `name`, stopping at the first strategy that matches.
    ///
    /// `Ok(None)` means no strategy matched and the caller should stub it.
    #[instrument(skip(self))]
    pub async fn resolve(&self, name: &str) -> Result<Option<Resolved>> {
        for strategy in Strategy::CHAIN {
            if let Some(entry) = self.attempt(strategy, name).await? {
                tracing::debug!(%strategy, "Matched");
                return Ok(Some(Resolved { strategy, entry }));
            }
            tracing::trace!(%strategy, "No match");
        }
        Ok(None)
    }

    /// Runs a single strategy.
    pub async fn attempt(&self, strategy: Strategy, name: &str) -> Result<Option<CompendiumEntry>> {
        Ok(match strategy {
            Strategy::SrdMagicItem => self
                .srd
                .find::<MagicItem>(SrdCategory::MagicItems, name)
                .await?
                .map(|(url, item)| build::srd_magic_item(name, &item, &url)),
            Strategy::SrdEquipment => self
                .srd
                .find::<Equipment>(SrdCategory::Equipment, name)
                .await?
                .map(|(url, item)| build::srd_equipment(name, &item, &url)),
            Strategy::Open5eMagicItem => self.open5e_attempt(Open5eCategory::MagicItems, name).await?,
            Strategy::Open5eWeapon => self.open5e_attempt(Open5eCategory::Weapons, name).await?,
            Strategy::Open5eArmor => self.open5e_attempt(Open5eCategory::Armor, name).await?,
        })
    }

    async fn open5e_attempt(&self, category: Open5eCategory, name: &str) -> Result<Option<CompendiumEntry>> {
        let hit = self.open5e.search(category, name).await?;
        Ok(hit.map(|item| build::open5e_item(name, &item, category, self.open5e.base())))
    }
}
