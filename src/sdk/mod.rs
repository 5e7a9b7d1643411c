pub mod config;
pub mod export;
pub mod geo;
pub mod routing;
pub mod util;
