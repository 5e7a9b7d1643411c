use crate::sdk::export::ExportSettings;
use crate::sdk::export::maps_url::DEFAULT_MAX_WAYPOINTS;
use crate::sdk::routing::geocode::PHOTON_URL;
use std::{env, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_EXPORT_DIR: &str = "./exports";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Where directions come from.
#[derive(Debug, Clone, PartialEq)]
pub enum OrsConfig {
    /// The hosted API, authenticated with a key.
    Remote { api_key: String },
    /// A self-hosted instance that needs no key.
    Local { base_url: String },
}

impl OrsConfig {
    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(base_url) = lookup("ORS_BASE_URL") {
            return Ok(OrsConfig::Local { base_url });
        }
        lookup("ORS_API_KEY")
            .map(|api_key| OrsConfig::Remote { api_key })
            .ok_or(ConfigError::Missing("ORS_API_KEY"))
    }
}

/// Process configuration. Loaded once at startup and passed explicitly to the
/// providers, the sinks and the exporter.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ors: OrsConfig,
    pub photon_base_url: String,
    /// Set when artifacts should be uploaded to blob storage.
    pub blob_token: Option<String>,
    pub export_dir: PathBuf,
    pub max_waypoints: usize,
}

impl Config {
    /// Reads the environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_waypoints = match lookup("LEETROUTE_MAX_WAYPOINTS") {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 2)
                .ok_or(ConfigError::Invalid {
                    var: "LEETROUTE_MAX_WAYPOINTS",
                    value,
                })?,
            None => DEFAULT_MAX_WAYPOINTS,
        };

        Ok(Config {
            ors: OrsConfig::from_lookup(lookup)?,
            photon_base_url: lookup("PHOTON_BASE_URL").unwrap_or_else(|| PHOTON_URL.to_string()),
            blob_token: lookup("BLOB_READ_WRITE_TOKEN"),
            export_dir: lookup("LEETROUTE_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR)),
            max_waypoints,
        })
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// `User-Agent` sent to the routing engine and the geocoder.
    pub fn user_agent() -> String {
        format!("leetRoute/{}", Self::version())
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            creator: format!("leetRoute {}", Self::version()),
            max_waypoints: self.max_waypoints,
        }
    }
}

// Unset and empty variables are treated the same.
fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
