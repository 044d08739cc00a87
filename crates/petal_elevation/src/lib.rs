pub mod cache;
pub mod open_meteo;

pub use cache::ElevationCache;
pub use open_meteo::{OpenMeteoClient, OpenMeteoClientParams, OpenMeteoError};
