//! Typed view of a routing engine response.
//!
//! Only the structure the exporters need is modelled. Everything else
//! (`summary`, `bbox`, `metadata`, unknown keys at any level) is kept as JSON
//! and serialised back unchanged.

use super::{error::RoutingError, polyline};
use crate::sdk::geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One maneuver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Metres.
    #[serde(default)]
    pub distance: f64,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
    /// Maneuver code.
    #[serde(rename = "type", default)]
    pub kind: u32,
    #[serde(default)]
    pub instruction: String,
    /// Road or path name.
    #[serde(default)]
    pub name: String,
    /// Start and end index into the parent route's polyline.
    pub way_points: [usize; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_number: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One origin-to-destination leg. Steps are in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    pub steps: Vec<Step>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One candidate path, with its geometry decoded into `polyline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRoute")]
pub struct Route {
    pub summary: Value,
    pub segments: Vec<Segment>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub bbox: Value,
    /// Decoded geometry as `(lat, lon)` pairs.
    pub polyline: Vec<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub way_points: Option<[usize; 2]>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Wire shape of a route: the encoded geometry is decoded exactly once, here.
#[derive(Deserialize)]
struct RawRoute {
    #[serde(default)]
    summary: Value,
    segments: Vec<Segment>,
    #[serde(default)]
    bbox: Value,
    geometry: String,
    #[serde(default)]
    way_points: Option<[usize; 2]>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawRoute> for Route {
    type Error = RoutingError;

    fn try_from(raw: RawRoute) -> Result<Self, Self::Error> {
        let polyline = polyline::decode(&raw.geometry)?;

        for (index, step) in raw.segments.iter().flat_map(|s| s.steps.iter()).enumerate() {
            if step.way_points.iter().any(|&wp| wp >= polyline.len()) {
                return Err(RoutingError::MalformedResponse(format!(
                    "step {} way_points {:?} outside polyline of {} points",
                    index,
                    step.way_points,
                    polyline.len()
                )));
            }
        }

        Ok(Route {
            summary: raw.summary,
            segments: raw.segments,
            bbox: raw.bbox,
            polyline,
            way_points: raw.way_points,
            extra: raw.extra,
        })
    }
}

impl Route {
    /// All steps across segments, in traversal order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.segments.iter().flat_map(|segment| segment.steps.iter())
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.polyline.iter().copied().map(Point::from)
    }

    /// Polyline position where `step` begins.
    pub fn step_start(&self, step: &Step) -> Option<Point> {
        self.polyline.get(step.way_points[0]).copied().map(Point::from)
    }
}

/// A full routing engine response. `routes[0]` is the engine's best route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub bbox: Value,
    pub routes: Vec<Route>,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Directions {
    pub fn from_value(value: Value) -> Result<Self, RoutingError> {
        let directions: Directions = serde_json::from_value(value)
            .map_err(|e| RoutingError::MalformedResponse(e.to_string()))?;
        log::debug!(
            "Ingested directions with {} route(s), {} polyline point(s) in the primary route",
            directions.routes.len(),
            directions.routes.first().map_or(0, |r| r.polyline.len())
        );
        Ok(directions)
    }

    pub fn from_json(body: &str) -> Result<Self, RoutingError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| RoutingError::MalformedResponse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn primary(&self) -> Result<&Route, RoutingError> {
        self.routes
            .first()
            .ok_or_else(|| RoutingError::MalformedResponse("response contains no routes".to_string()))
    }
}
