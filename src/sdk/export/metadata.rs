use super::curvature::{analyse_curvature, CurvatureSummary};
use super::ExportError;
use crate::sdk::geo::Location;
use crate::sdk::routing::Route;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct EndpointMetadata<'a> {
    pub name: &'a str,
    /// `(lat, lon)`
    pub coords: (f64, f64),
}

impl<'a> From<&'a Location> for EndpointMetadata<'a> {
    fn from(location: &'a Location) -> Self {
        Self {
            name: &location.name,
            coords: location.coords.to_pair(false),
        }
    }
}

/// The JSON companion document of an export.
#[derive(Debug, Serialize)]
pub struct RouteMetadata<'a> {
    pub start: EndpointMetadata<'a>,
    pub dest: EndpointMetadata<'a>,
    /// The routing engine's summary, passed through untouched.
    pub summary: &'a Value,
    pub curvature: CurvatureSummary,
    pub polyline: &'a [(f64, f64)],
    pub google_maps_url: &'a str,
}

impl<'a> RouteMetadata<'a> {
    pub fn new(route: &'a Route, start: &'a Location, dest: &'a Location, google_maps_url: &'a str) -> Self {
        Self {
            start: start.into(),
            dest: dest.into(),
            summary: &route.summary,
            curvature: analyse_curvature(route),
            polyline: &route.polyline,
            google_maps_url,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
