use super::error::ExportError;
use super::gpx::generate_gpx;
use super::kml::generate_kml;
use super::maps_url::google_maps_url;
use super::metadata::RouteMetadata;
use super::sink::Sink;
use super::{route_base_name, ExportSettings};
use crate::sdk::geo::Location;
use crate::sdk::routing::Route;
use serde::Serialize;

/// Where each export ended up: download paths or URLs, keyed by format label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportLocators {
    #[serde(rename = "KML")]
    pub kml: String,
    #[serde(rename = "GPX")]
    pub gpx: String,
    #[serde(rename = "JSON")]
    pub json: String,
    #[serde(rename = "Google Maps")]
    pub google_maps: String,
}

impl ExportLocators {
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("KML", self.kml.as_str()),
            ("GPX", self.gpx.as_str()),
            ("JSON", self.json.as_str()),
            ("Google Maps", self.google_maps.as_str()),
        ]
    }
}

/// Renders every artifact for `route` and writes them to `sink`.
///
/// All documents are rendered before anything is written, so a route that
/// cannot be exported leaves no files behind. A sink failure part-way through
/// keeps whatever was already written.
pub fn export_route(
    route: &Route,
    start: &Location,
    dest: &Location,
    sink: &dyn Sink,
    settings: &ExportSettings,
) -> Result<ExportLocators, ExportError> {
    let base_name = route_base_name(start, dest);
    log::debug!("Exporting {}", base_name);

    let maps_url = google_maps_url(&route.polyline, settings.max_waypoints)?;
    let kml = generate_kml(route, start, dest)?;
    let gpx = generate_gpx(route, start, dest, &settings.creator)?;
    let json = RouteMetadata::new(route, start, dest, &maps_url).to_json()?;

    sink.prepare()?;
    let locators = ExportLocators {
        kml: sink.put(&format!("{}.kml", base_name), kml.as_bytes())?,
        gpx: sink.put(&format!("{}.gpx", base_name), gpx.as_bytes())?,
        json: sink.put(&format!("{}_data.json", base_name), json.as_bytes())?,
        google_maps: maps_url,
    };

    for (label, locator) in locators.entries() {
        log::info!("{} export: {}", label, locator);
    }
    Ok(locators)
}
