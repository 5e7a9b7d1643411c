use super::{ensure_drawable, escape_xml, route_title, ExportError};
use crate::sdk::geo::Location;
use crate::sdk::routing::Route;

pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

/// Minimal GPX 1.1 document: one track, one segment, one point per polyline
/// coordinate. GPX uses the native `lat`/`lon` order, no swap.
pub fn generate_gpx(
    route: &Route,
    start: &Location,
    dest: &Location,
    creator: &str,
) -> Result<String, ExportError> {
    ensure_drawable(route)?;

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!(
        "<gpx version=\"1.1\" creator=\"{}\" xmlns=\"{}\">\n",
        escape_xml(creator),
        GPX_NAMESPACE
    ));
    output.push_str("  <trk>\n");
    output.push_str(&format!(
        "    <name>{}</name>\n",
        escape_xml(&route_title(start, dest))
    ));
    output.push_str("    <trkseg>\n");
    for point in route.points() {
        output.push_str(&format!(
            "      <trkpt lat=\"{}\" lon=\"{}\"/>\n",
            point.lat, point.lon
        ));
    }
    output.push_str("    </trkseg>\n");
    output.push_str("  </trk>\n");
    output.push_str("</gpx>\n");

    Ok(output)
}
