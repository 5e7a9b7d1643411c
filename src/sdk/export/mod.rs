//! Route export: curvature summary, KML / GPX / JSON documents, a Google Maps
//! link, and the sinks the documents are written to.

pub mod curvature;
pub mod error;
pub mod gpx;
pub mod kml;
pub mod maps_url;
pub mod metadata;
pub mod orchestrator;
pub mod sink;

pub use curvature::CurvatureSummary;
pub use error::ExportError;
pub use orchestrator::{export_route, ExportLocators};
pub use sink::{BlobSink, LocalSink, Sink};

use crate::sdk::geo::Location;
use crate::sdk::routing::Route;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Written to the GPX `creator` attribute.
    pub creator: String,
    /// Total stops allowed in the map link, including start and end.
    pub max_waypoints: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            creator: "leetRoute".to_string(),
            max_waypoints: maps_url::DEFAULT_MAX_WAYPOINTS,
        }
    }
}

/// Artifact base name shared by every export of the same start/destination pair.
///
/// Spaces become underscores, and so does anything that is a path separator,
/// is not allowed in file names on common filesystems, or would be read as a
/// URL fragment or escape in a download link (`#`, `%`).
pub fn route_base_name(start: &Location, dest: &Location) -> String {
    format!("route_from_{}_to_{}", start.name, dest.name)
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '#' | '%' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Human-readable title used inside the documents.
pub fn route_title(start: &Location, dest: &Location) -> String {
    format!("Route from {} to {}", start.name, dest.name)
}

pub(crate) fn ensure_drawable(route: &Route) -> Result<(), ExportError> {
    if route.polyline.len() < 2 {
        return Err(ExportError::InsufficientPoints {
            found: route.polyline.len(),
        });
    }
    Ok(())
}

pub(crate) fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // not representable in XML 1.0, even as a character reference
            '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            c => out.push(c),
        }
    }
    out
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::sdk::geo::Point;

    #[test]
    fn base_name_replaces_spaces() {
        assert_eq!(
            route_base_name(&home(), &ramp()),
            "route_from_Home_to_GRCC_Parking_Ramp_A"
        );
    }

    #[test]
    fn base_name_cannot_escape_the_export_directory() {
        let sneaky = Location::new(Point::new(0.0, 0.0), "../../etc/passwd");
        let name = route_base_name(&home(), &sneaky);
        assert_eq!(name, "route_from_Home_to_.._.._etc_passwd");
        assert!(!name.contains('/'));

        let windows = Location::new(Point::new(0.0, 0.0), "C:\\Users\\x?");
        assert_eq!(route_base_name(&windows, &home()), "route_from_C__Users_x__to_Home");
    }

    #[test]
    fn base_name_is_safe_in_a_link() {
        let suite = Location::new(Point::new(0.0, 0.0), "Suite #200 (100% off)");
        assert_eq!(route_base_name(&home(), &suite), "route_from_Home_to_Suite__200_(100__off)");
    }

    #[test]
    fn base_name_keeps_other_characters() {
        let accented = Location::new(Point::new(0.0, 0.0), "Café Noir, Paris");
        assert_eq!(route_base_name(&accented, &home()), "route_from_Café_Noir,_Paris_to_Home");
    }

    #[test]
    fn title_keeps_spaces() {
        assert_eq!(route_title(&home(), &ramp()), "Route from Home to GRCC Parking Ramp A");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"A & B <"c"> 'd'"#), "A &amp; B &lt;&quot;c&quot;&gt; &apos;d&apos;");
    }

    #[test]
    fn escape_drops_characters_xml_cannot_hold() {
        assert_eq!(escape_xml("Turn\u{1} left\u{b}\u{ffff}"), "Turn left");
        assert_eq!(escape_xml("a\tb\nc\rd"), "a\tb\nc\rd");
    }

    #[test]
    fn single_point_route_is_not_drawable() {
        assert!(matches!(
            ensure_drawable(&route(&[(1.0, 1.0)])),
            Err(ExportError::InsufficientPoints { found: 1 })
        ));
        assert!(ensure_drawable(&home_to_ramp()).is_ok());
    }
}
