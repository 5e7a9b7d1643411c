use super::directions::Directions;
use super::error::RoutingError;
use super::geocode::Place;
use super::provider::DirectionsOptions;
use crate::sdk::geo::Point;

pub trait RoutingProvider: Send + Sync {
    /// Gets candidate routes between two points. The response is already
    /// ingested: every route carries its decoded polyline.
    fn get_directions(
        &self,
        start: Point,
        end: Point,
        options: &DirectionsOptions,
    ) -> Result<Directions, RoutingError>;
}

pub trait Geocoder: Send + Sync {
    /// Ranked candidates for a free-text query, optionally biased towards a position.
    fn search(&self, query: &str, limit: usize, bias: Option<Point>) -> Result<Vec<Place>, RoutingError>;

    /// Places near a coordinate, closest first.
    fn reverse(&self, point: Point, limit: usize) -> Result<Vec<Place>, RoutingError>;
}
