pub mod sdk;

pub use sdk::config::{Config, ConfigError};
pub use sdk::export::{export_route, ExportError, ExportLocators, ExportSettings};
pub use sdk::geo::{Location, Point};
pub use sdk::routing::{Directions, Route, RoutingError};
