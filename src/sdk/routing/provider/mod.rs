pub mod ors;
pub mod types;

pub use ors::OrsProvider;
pub use types::{AlternativeRoutes, DirectionsOptions, DirectionsRequest, Units};
