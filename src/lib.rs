//! Builds the crafted-item compendium.
//!
//! A run reads every craftable name from the facilities and tool tables,
//! looks each new one up in the reference sources, and merges the results
//! into the persisted compendium without touching entries that already exist.

pub mod error;

use crate::error::{ErrorKind, Result};
use compendium_config::Config;
use compendium_extract::{craftables, load_facilities, load_tools};
use compendium_lookup::fetch::HttpFetcher;
use compendium_lookup::{FetcherHandle, Lookup};
use compendium_store::{Document, MergeReport, merge};
use exn::ResultExt;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::instrument;

/// What a completed run did, and where it wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub report: MergeReport,
    pub output: PathBuf,
}
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compendium built!")?;
        writeln!(f, "{}", self.report)?;
        write!(f, "Wrote: {}", self.output.display())
    }
}

/// Run against the live reference sources configured in `config`.
pub async fn run(config: &Config) -> Result<Summary> {
    let fetcher = HttpFetcher::new("http", config.http.timeout(), &config.http.user_agent)
        .or_raise(|| ErrorKind::Lookup)?
        .with_delay(config.http.delay());
    run_with_fetcher(config, Arc::new(fetcher)).await
}

/// Run with an arbitrary fetcher behind the reference-source base URLs.
///
/// Inputs are read before anything is fetched, and the compendium is only
/// written once every name has been merged.
#[instrument(skip_all, fields(data_dir = %config.paths.data_dir.display(), fetcher = fetcher.name()))]
pub async fn run_with_fetcher(config: &Config, fetcher: FetcherHandle) -> Result<Summary> {
    let facilities = load_facilities(config.paths.facilities_path()).or_raise(|| ErrorKind::Input)?;
    let tools = load_tools(config.paths.tools_path()).or_raise(|| ErrorKind::Input)?;
    let names = craftables(&facilities, &tools);

    let output = config.paths.output_path();
    let mut document = Document::load(&output);
    tracing::info!(craftables = names.len(), existing = document.len(), "Starting merge");

    let lookup = Lookup::new(fetcher, config.sources.srd.clone(), config.sources.open5e.clone());
    let report = merge(&mut document, &names, &lookup).await.or_raise(|| ErrorKind::Store)?;
    document.save(&output).or_raise(|| ErrorKind::Store)?;
    tracing::info!(path = %output.display(), items = document.len(), "Wrote compendium");
    Ok(Summary { report, output })
}
