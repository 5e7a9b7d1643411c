#![allow(dead_code)]

use leetroute::sdk::geo::{Location, Point};
use leetroute::sdk::routing::{polyline, Directions};
use serde_json::{json, Value};

pub const HOME_TO_RAMP: [(f64, f64); 5] = [
    (42.7196, -85.4587),
    (42.7402, -85.4711),
    (42.8315, -85.5480),
    (42.9021, -85.6013),
    (42.968, -85.6666),
];

pub fn home() -> Location {
    Location::new(Point::new(42.7196, -85.4587), "Home")
}

pub fn ramp() -> Location {
    Location::new(Point::new(42.968, -85.6666), "GRCC Parking Ramp A")
}

/// Directions response shaped like openrouteservice's, one step per leg of `points`.
pub fn directions_body(points: &[(f64, f64)]) -> Value {
    let steps: Vec<Value> = (0..points.len().saturating_sub(1))
        .map(|i| {
            json!({
                "distance": 4.1, "duration": 342.0, "type": if i == 0 { 11 } else { 1 },
                "instruction": format!("Continue on M-{}", 37 + i),
                "name": format!("M-{}", 37 + i),
                "way_points": [i, i + 1]
            })
        })
        .collect();
    json!({
        "bbox": [-85.6666, 42.7196, -85.4587, 42.968],
        "routes": [{
            "summary": {"distance": 20.4, "duration": 1710.3},
            "segments": [{"distance": 20.4, "duration": 1710.3, "steps": steps}],
            "bbox": [-85.6666, 42.7196, -85.4587, 42.968],
            "geometry": polyline::encode(points),
            "way_points": [0, points.len().saturating_sub(1)]
        }],
        "metadata": {"attribution": "openrouteservice.org", "service": "routing"}
    })
}

pub fn directions(points: &[(f64, f64)]) -> Directions {
    Directions::from_value(directions_body(points)).unwrap()
}
