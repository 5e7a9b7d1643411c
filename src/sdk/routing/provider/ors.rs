use super::types::{DirectionsOptions, DirectionsRequest};
use crate::sdk::config::{Config, OrsConfig};
use crate::sdk::geo::Point;
use crate::sdk::routing::directions::Directions;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::service::RoutingProvider;
use crate::sdk::util::rate_limit::{self, Limiter};
use reqwest::blocking::Client;
use std::time::Duration;

pub const ORS_API_URL: &str = "https://api.openrouteservice.org";

/// Blocking client for the openrouteservice directions API, either the
/// hosted service (keyed, rate limited) or a self-hosted instance.
pub struct OrsProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    limiter: Option<Limiter>,
}

impl OrsProvider {
    pub fn remote(api_key: String, limiter: Limiter, user_agent: &str) -> Result<Self, RoutingError> {
        Ok(Self {
            client: build_client(user_agent)?,
            api_key: Some(api_key),
            base_url: ORS_API_URL.to_string(),
            limiter: Some(limiter),
        })
    }

    pub fn local(base_url: String, user_agent: &str) -> Result<Self, RoutingError> {
        Ok(Self {
            client: build_client(user_agent)?,
            api_key: None,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RoutingError> {
        let user_agent = Config::user_agent();
        match &config.ors {
            OrsConfig::Remote { api_key } => Self::remote(api_key.clone(), rate_limit::ors_limiter(), &user_agent),
            OrsConfig::Local { base_url } => Self::local(base_url.clone(), &user_agent),
        }
    }

    /// Points a keyed provider at another host, e.g. a proxy or a test server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

fn build_client(user_agent: &str) -> Result<Client, RoutingError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(user_agent)
        .build()?)
}

impl RoutingProvider for OrsProvider {
    fn get_directions(
        &self,
        start: Point,
        end: Point,
        options: &DirectionsOptions,
    ) -> Result<Directions, RoutingError> {
        if let Some(limiter) = &self.limiter {
            rate_limit::wait(limiter);
        }

        let url = format!("{}/v2/directions/{}", self.base_url, options.profile);
        let (start_lon, start_lat) = start.to_pair(true);
        let (end_lon, end_lat) = end.to_pair(true);
        let body = DirectionsRequest {
            coordinates: [[start_lon, start_lat], [end_lon, end_lat]],
            units: options.units,
            alternative_routes: options.alternative_routes,
        };

        log::debug!("[PROVIDER] Requesting directions {} -> {} from {}", start, end, url);
        let mut request = self.client.post(&url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", api_key);
        }
        let response = request.send().map_err(|e| {
            log::error!("Failed to send directions request. URL: {}\nError: {}", url, e);
            e
        })?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            log::error!("Directions API returned {}. Body: {}", status, text);
            return Err(RoutingError::from_error_body(&text));
        }

        Directions::from_json(&text).map_err(|e| {
            log::error!("Failed to ingest directions response. URL: {}\nError: {}", url, e);
            e
        })
    }
}
