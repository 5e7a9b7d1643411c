use super::error::ExportError;
use crate::sdk::geo::Point;

pub const GOOGLE_MAPS_DIR_URL: &str = "https://www.google.com/maps/dir/";

/// Google Maps accepts at most 10 stops in a directions link.
pub const DEFAULT_MAX_WAYPOINTS: usize = 10;

/// Interior points to pass through, so that start + samples + end fit in
/// `max_waypoints` stops. Short polylines keep every interior point; longer
/// ones are sampled with an even integer stride.
pub fn sample_waypoints(polyline: &[(f64, f64)], max_waypoints: usize) -> Vec<(f64, f64)> {
    if polyline.len() < 3 {
        return Vec::new();
    }
    let max_waypoints = max_waypoints.max(2);
    let interior = &polyline[1..polyline.len() - 1];

    if polyline.len() > max_waypoints {
        let stride = (polyline.len() / (max_waypoints - 1)).max(1);
        interior
            .iter()
            .step_by(stride)
            .take(max_waypoints - 2)
            .copied()
            .collect()
    } else {
        interior.to_vec()
    }
}

/// Directions link from the first to the last polyline point through sampled
/// waypoints, as `.../dir/{lat},{lon}/.../{lat},{lon}`.
pub fn google_maps_url(polyline: &[(f64, f64)], max_waypoints: usize) -> Result<String, ExportError> {
    let (first, last) = match polyline {
        [first, .., last] => (*first, *last),
        _ => {
            return Err(ExportError::InsufficientPoints {
                found: polyline.len(),
            })
        }
    };

    let stops: Vec<String> = std::iter::once(first)
        .chain(sample_waypoints(polyline, max_waypoints))
        .chain(std::iter::once(last))
        .map(|coord| Point::from(coord).to_string())
        .collect();

    Ok(format!("{}{}", GOOGLE_MAPS_DIR_URL, stops.join("/")))
}
