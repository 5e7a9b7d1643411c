pub mod directions;
pub mod error;
pub mod geocode;
pub mod polyline;
pub mod provider;
pub mod service;

pub use directions::{Directions, Route, Segment, Step};
pub use error::RoutingError;
pub use geocode::{Place, PhotonGeocoder};
pub use provider::{DirectionsOptions, OrsProvider, Units};
pub use service::{Geocoder, RoutingProvider};
