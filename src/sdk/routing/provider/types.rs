use serde::Serialize;

// --- Request types for the openrouteservice directions endpoint ---

/// Distance units the routing engine reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
pub enum Units {
    #[serde(rename = "m")]
    #[value(name = "m")]
    Meters,
    #[serde(rename = "km")]
    #[value(name = "km")]
    Kilometers,
    #[default]
    #[serde(rename = "mi")]
    #[value(name = "mi")]
    Miles,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlternativeRoutes {
    pub share_factor: f64,
    pub target_count: u32,
    pub weight_factor: f64,
}

impl Default for AlternativeRoutes {
    fn default() -> Self {
        Self {
            share_factor: 0.8,
            target_count: 2,
            weight_factor: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsOptions {
    pub profile: String,
    pub units: Units,
    pub alternative_routes: Option<AlternativeRoutes>,
}

impl Default for DirectionsOptions {
    fn default() -> Self {
        Self {
            profile: "driving-car".to_string(),
            units: Units::default(),
            alternative_routes: None,
        }
    }
}

/// Body of `POST /v2/directions/{profile}`. Coordinates are `[lon, lat]`.
#[derive(Debug, Serialize)]
pub struct DirectionsRequest {
    pub coordinates: [[f64; 2]; 2],
    pub units: Units,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_routes: Option<AlternativeRoutes>,
}
