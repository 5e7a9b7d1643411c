//! KML 2.2 document: the route line, start and end markers, and one marker
//! per maneuver step.

use super::{ensure_drawable, escape_xml, route_title, ExportError};
use crate::sdk::geo::{Location, Point};
use crate::sdk::routing::Route;

pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

const START_ICON: &str = "https://maps.google.com/mapfiles/kml/paddle/red-circle.png";
const END_ICON: &str = "https://maps.google.com/mapfiles/kml/paddle/grn-blank-lv.png";
const WAYPOINT_ICON: &str = "https://maps.google.com/mapfiles/kml/paddle/blu-blank-lv.png";
// aabbggrr
const LINE_COLOR: &str = "ffffff00";
const LINE_WIDTH: u32 = 5;

/// KML wants `lon,lat`: the reverse of [`Point`]'s native order.
fn kml_coordinate(point: Point) -> String {
    let (lon, lat) = point.to_pair(true);
    format!("{},{}", lon, lat)
}

fn icon_style(output: &mut String, id: &str, href: &str) {
    output.push_str(&format!("    <Style id=\"{}\">\n", id));
    output.push_str("      <IconStyle>\n");
    output.push_str(&format!("        <Icon><href>{}</href></Icon>\n", href));
    output.push_str("      </IconStyle>\n");
    output.push_str("    </Style>\n");
}

fn point_placemark(output: &mut String, name: &str, description: Option<&str>, style: &str, point: Point) {
    output.push_str("    <Placemark>\n");
    output.push_str(&format!("      <name>{}</name>\n", escape_xml(name)));
    if let Some(description) = description {
        output.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(description)
        ));
    }
    output.push_str(&format!("      <styleUrl>#{}</styleUrl>\n", style));
    output.push_str(&format!(
        "      <Point><coordinates>{}</coordinates></Point>\n",
        kml_coordinate(point)
    ));
    output.push_str("    </Placemark>\n");
}

pub fn generate_kml(route: &Route, start: &Location, dest: &Location) -> Result<String, ExportError> {
    ensure_drawable(route)?;
    let title = escape_xml(&route_title(start, dest));

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!("<kml xmlns=\"{}\">\n", KML_NAMESPACE));
    output.push_str("  <Document>\n");
    output.push_str(&format!("    <name>{}</name>\n", title));

    output.push_str("    <Style id=\"route-line\">\n");
    output.push_str(&format!(
        "      <LineStyle><color>{}</color><width>{}</width></LineStyle>\n",
        LINE_COLOR, LINE_WIDTH
    ));
    output.push_str("    </Style>\n");
    icon_style(&mut output, "start-icon", START_ICON);
    icon_style(&mut output, "end-icon", END_ICON);
    icon_style(&mut output, "waypoint-icon", WAYPOINT_ICON);

    let coordinates: Vec<String> = route.points().map(kml_coordinate).collect();
    output.push_str("    <Placemark>\n");
    output.push_str(&format!("      <name>{}</name>\n", title));
    output.push_str(&format!("      <description>{}</description>\n", title));
    output.push_str("      <styleUrl>#route-line</styleUrl>\n");
    output.push_str("      <LineString>\n");
    output.push_str("        <tessellate>1</tessellate>\n");
    output.push_str(&format!(
        "        <coordinates>{}</coordinates>\n",
        coordinates.join(" ")
    ));
    output.push_str("      </LineString>\n");
    output.push_str("    </Placemark>\n");

    point_placemark(&mut output, &start.name, None, "start-icon", start.coords);
    point_placemark(&mut output, &dest.name, None, "end-icon", dest.coords);

    for step in route.steps() {
        // way_points are validated against the polyline at ingestion
        if let Some(position) = route.step_start(step) {
            point_placemark(
                &mut output,
                &step.name,
                Some(&step.instruction),
                "waypoint-icon",
                position,
            );
        }
    }

    output.push_str("  </Document>\n");
    output.push_str("</kml>\n");

    Ok(output)
}
