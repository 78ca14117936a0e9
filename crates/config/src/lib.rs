//! Layered configuration for the compendium builder.
//!
//! Values come from (lowest to highest precedence) the built-in defaults, an
//! optional config file, and `COMPENDIUM_`-prefixed environment variables with
//! nested keys separated by `__`:
//!
//! ```toml
//! [paths]
//! data_dir = "data"
//!
//! [http]
//! request_delay_ms = 0
//! ```
//!
//! is equivalent to `COMPENDIUM_PATHS__DATA_DIR=data COMPENDIUM_HTTP__REQUEST_DELAY_MS=0`.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const ENV_PREFIX: &str = "COMPENDIUM_";
/// Looked for in the working directory when no config file is given.
pub const LOCAL_CONFIG_FILE: &str = "compendium.toml";
const DEFAULT_SRD_URL: &str = "https://www.dnd5eapi.co/api/2014";
const DEFAULT_OPEN5E_URL: &str = "https://api.open5e.com";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub sources: Sources,
    pub http: Http,
}

/// Where the input and output documents live.
///
/// Relative file names are resolved against `data_dir`; absolute ones are used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub facilities: PathBuf,
    pub tools: PathBuf,
    pub output: PathBuf,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            facilities: PathBuf::from("facilities.json"),
            tools: PathBuf::from("tools_tables.json"),
            output: PathBuf::from("compendium_items.json"),
        }
    }
}
impl Paths {
    pub fn facilities_path(&self) -> PathBuf {
        self.data_dir.join(&self.facilities)
    }

    pub fn tools_path(&self) -> PathBuf {
        self.data_dir.join(&self.tools)
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output)
    }
}

/// Base URLs of the reference sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub srd: Url,
    pub open5e: Url,
}
impl Default for Sources {
    fn default() -> Self {
        Self {
            srd: Url::parse(DEFAULT_SRD_URL).expect("default SRD URL is valid"),
            open5e: Url::parse(DEFAULT_OPEN5E_URL).expect("default Open5e URL is valid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Http {
    /// Pause before every outbound request.
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}
impl Default for Http {
    fn default() -> Self {
        Self {
            request_delay_ms: 80,
            timeout_secs: 20,
            user_agent: concat!("compendium/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
impl Http {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Build the layered provider stack without extracting it.
    ///
    /// `config_file` takes precedence over [`LOCAL_CONFIG_FILE`] and the user's
    /// config directory. A file that doesn't exist contributes nothing.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match config_file.map(Path::to_path_buf).or_else(discover_config_file) {
            Some(path) => merge_file(figment, &path),
            None => figment,
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate the configuration.
    ///
    /// # Errors
    ///
    /// - [`MissingFile`](ErrorKind::MissingFile) if `config_file` was given but doesn't exist.
    /// - [`Extract`](ErrorKind::Extract) if a provider holds values of the wrong shape.
    /// - [`Invalid`](ErrorKind::Invalid) if [validation](Self::validate) fails.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_file
            && !path.is_file()
        {
            exn::bail!(ErrorKind::MissingFile(path.to_path_buf()));
        }
        Self::from_figment(&Self::figment(config_file))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Extract)?;
        config.validate()?;
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (key, url) in [("sources.srd", &self.sources.srd), ("sources.open5e", &self.sources.open5e)] {
            if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
                exn::bail!(ErrorKind::Invalid(format!("{key} must be an http(s) URL, got {url}")));
            }
        }
        if self.http.timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid("http.timeout_secs must be greater than zero".to_string()));
        }
        Ok(())
    }
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    ProjectDirs::from("", "", "compendium")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .filter(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    tracing::debug!(path = %path.display(), "Using config file");
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}
