use super::error::RoutingError;
use super::service::Geocoder;
use crate::sdk::config::Config;
use crate::sdk::geo::{Location, Point};
use crate::sdk::util::rate_limit::{self, Limiter};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const PHOTON_URL: &str = "https://photon.komoot.io";

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

// --- Photon GeoJSON response ---

#[derive(Debug, Deserialize)]
pub struct GeoResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Option<PlaceProperties>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceProperties {
    pub housenumber: Option<String>,
    pub street: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub countrycode: Option<String>,
    pub osm_value: Option<String>,
}

/// A geocoder candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub displayname: String,
    pub coords: Point,
}

impl Place {
    /// Builds a place from a feature; features without properties are skipped.
    pub fn from_feature(feature: Feature) -> Option<Place> {
        let props = feature.properties?;
        let [lon, lat] = feature.geometry.coordinates;

        let kind = props.osm_value.as_deref().map(|value| {
            let label = capitalize(&value.replace('_', " "));
            (label, icon_for(value))
        });
        let street = props.street.or(props.name);
        let parts = [
            props.housenumber,
            street,
            props.city,
            props.state,
            props.countrycode,
        ];

        let mut plain: Vec<String> = Vec::new();
        let mut styled: Vec<String> = Vec::new();
        for (i, part) in parts.into_iter().enumerate() {
            let Some(part) = part.filter(|p| !p.is_empty()) else {
                continue;
            };
            styled.push(if i <= 1 {
                part.clone()
            } else {
                format!("{}{}{}", DIM, part, RESET)
            });
            plain.push(part);
        }
        if let Some((label, icon)) = kind {
            styled.push(format!("{}{} ({}){}", DIM, icon, label, RESET));
            plain.push(label);
        }

        Some(Place {
            name: plain.join(" "),
            displayname: styled.join(" "),
            coords: Point::new(lat, lon),
        })
    }

    pub fn into_location(self) -> Location {
        Location::new(self.coords, self.name).with_displayname(self.displayname)
    }
}

impl From<Place> for Location {
    fn from(place: Place) -> Self {
        place.into_location()
    }
}

pub fn places_from_response(response: GeoResponse) -> Vec<Place> {
    response
        .features
        .into_iter()
        .filter_map(Place::from_feature)
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn icon_for(osm_value: &str) -> &'static str {
    match osm_value {
        "house" => "🏠",
        "residential" => "🏘",
        "apartments" => "🏢",
        "trunk" | "primary" => "🛣",
        "secondary" | "tertiary" => "🛤",
        "footway" => "🚶",
        "cycleway" => "🚲",
        "bus_stop" => "🚌",
        "parking" => "🅿️",
        "school" | "university" | "college" => "🏫",
        "townhall" | "museum" => "🏛",
        "hospital" | "clinic" => "🏥",
        "pharmacy" => "💊",
        "supermarket" => "🛒",
        "restaurant" => "🍽",
        "cafe" => "☕",
        "park" => "🌳",
        "forest" => "🌲",
        "church" => "⛪",
        "water" | "lake" => "💧",
        "river" => "🌊",
        _ => "📍",
    }
}

/// Blocking client for the Photon geocoder.
pub struct PhotonGeocoder {
    client: Client,
    base_url: String,
    limiter: Limiter,
}

impl PhotonGeocoder {
    pub fn new(base_url: &str, user_agent: &str, limiter: Limiter) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .user_agent(user_agent)
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RoutingError> {
        Self::new(&config.photon_base_url, &Config::user_agent(), rate_limit::photon_limiter())
    }

    fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<Place>, RoutingError> {
        rate_limit::wait(&self.limiter);
        log::debug!("[GEOCODER] GET {} {:?}", url, query);

        let response = self.client.get(url).query(query).send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            log::error!("Geocoder returned {}. URL: {}. Body: {}", status, url, text);
            return Err(RoutingError::RawApiError(text));
        }

        let body: GeoResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!("Failed to parse GeoResponse. URL: {}\nError: {}. Body: {}", url, e, text);
            e
        })?;
        Ok(places_from_response(body))
    }
}

impl Geocoder for PhotonGeocoder {
    fn search(&self, query: &str, limit: usize, bias: Option<Point>) -> Result<Vec<Place>, RoutingError> {
        let mut params = vec![("q", query.to_string()), ("limit", limit.to_string())];
        if let Some(bias) = bias {
            params.push(("lat", bias.lat.to_string()));
            params.push(("lon", bias.lon.to_string()));
        }
        self.fetch(&format!("{}/api/", self.base_url), &params)
    }

    fn reverse(&self, point: Point, limit: usize) -> Result<Vec<Place>, RoutingError> {
        let params = [
            ("lat", point.lat.to_string()),
            ("lon", point.lon.to_string()),
            ("limit", limit.to_string()),
        ];
        self.fetch(&format!("{}/reverse", self.base_url), &params)
    }
}
