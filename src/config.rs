//! Service configuration, loaded once at startup from a TOML document.

mod zone;

use std::{collections::BTreeMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use thiserror::Error;

pub use self::zone::ZoneConfig;
use crate::prelude::*;

/// Value shipped in the sample configuration, never a real token.
pub const PLACEHOLDER_TOKEN: &str = "your-api-token-here";

pub const DEFAULT_BASE_URL: &str = "https://web-api.tp.entsoe.eu/api";

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read the configuration file `{path}`")]
    Read {
        path: String,

        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse the configuration")]
    Parse(#[from] toml::de::Error),

    #[error("missing required configuration section `{0}`")]
    MissingSection(&'static str),

    #[error("API token not found in configuration")]
    MissingToken,

    #[error("API token is a placeholder, get one from https://transparency.entsoe.eu/")]
    PlaceholderToken,

    #[error("no zones configured")]
    NoZones,

    #[error("default zone `{0}` is not configured")]
    UnknownDefaultZone(String),

    #[error("`default_days_back` must be positive")]
    NonPositiveDaysBack,
}

/// Validated configuration, read-only for the lifetime of the process.
#[must_use]
pub struct Config {
    pub api: ApiConfig,

    /// Bidding zones keyed by the zone identifier.
    pub zones: BTreeMap<String, ZoneConfig>,

    pub service: ServiceConfig,
}

#[must_use]
pub struct ApiConfig {
    pub token: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[must_use]
#[derive(Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "ServiceConfig::default_zones")]
    pub default_zones: Vec<String>,

    #[serde(default = "ServiceConfig::default_days_back")]
    pub default_days_back: u32,

    #[serde(default)]
    pub output: OutputOptions,
}

impl ServiceConfig {
    fn default_zones() -> Vec<String> {
        vec!["SE4".to_owned()]
    }

    const fn default_days_back() -> u32 {
        7
    }
}

#[must_use]
#[derive(Copy, Clone, Deserialize)]
pub struct OutputOptions {
    #[serde(default = "default_true")]
    pub include_time_columns: bool,

    #[serde(default = "default_true")]
    pub include_statistics: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { include_time_columns: true, include_statistics: true }
    }
}

const fn default_true() -> bool {
    true
}

impl Config {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path, token_override: Option<&str>) -> Result<Self, ConfigurationError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&text, token_override)?;
        info!(n_zones = config.zones.len(), "loaded the configuration");
        Ok(config)
    }

    pub fn parse(text: &str, token_override: Option<&str>) -> Result<Self, ConfigurationError> {
        let document: Document = toml::from_str(text)?;
        let api = document.api.ok_or(ConfigurationError::MissingSection("api"))?;
        let zones = document.zones.ok_or(ConfigurationError::MissingSection("zones"))?;
        let service = document.service.ok_or(ConfigurationError::MissingSection("service"))?;

        let token = match token_override.or(api.token.as_deref()).map(str::trim) {
            None | Some("") => return Err(ConfigurationError::MissingToken),
            Some(PLACEHOLDER_TOKEN) => return Err(ConfigurationError::PlaceholderToken),
            Some(token) => token.to_owned(),
        };

        if zones.is_empty() {
            return Err(ConfigurationError::NoZones);
        }
        let zones: BTreeMap<_, _> = zones
            .into_iter()
            .map(|(id, zone)| {
                let zone = ZoneConfig { id: id.clone(), ..zone };
                (id, zone)
            })
            .collect();

        if let Some(unknown) = service.default_zones.iter().find(|id| !zones.contains_key(*id)) {
            return Err(ConfigurationError::UnknownDefaultZone(unknown.clone()));
        }
        if service.default_days_back == 0 {
            return Err(ConfigurationError::NonPositiveDaysBack);
        }

        Ok(Self {
            api: ApiConfig {
                token,
                base_url: api.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
                timeout: api.timeout,
            },
            zones,
            service,
        })
    }

    #[must_use]
    pub fn zone(&self, id: &str) -> Option<&ZoneConfig> {
        self.zones.get(id)
    }
}

/// Raw document layout, sections are optional so that their absence is reported explicitly.
#[derive(Deserialize)]
struct Document {
    api: Option<ApiSection>,
    zones: Option<BTreeMap<String, ZoneConfig>>,
    service: Option<ServiceConfig>,
}

#[serde_as]
#[derive(Deserialize)]
struct ApiSection {
    token: Option<String>,

    base_url: Option<String>,

    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(rename = "timeout_seconds", default = "ApiSection::default_timeout")]
    timeout: Duration,
}

impl ApiSection {
    const fn default_timeout() -> Duration {
        Duration::from_secs(10)
    }
}
