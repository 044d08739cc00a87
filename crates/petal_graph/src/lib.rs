pub mod builder;
mod constants;
mod dijkstra;
pub mod distance;
pub mod error;
pub mod geo_index;
pub mod geometry;
pub mod geopoint;
mod location_index;
pub mod network_file;
pub mod road_network;
pub mod stopwatch;
pub mod types;

#[cfg(test)]
pub(crate) mod test_graph_utils;

pub use builder::{NewEdge, RoadNetworkBuilder};
pub use distance::{Distance, Kilometers, Meters};
pub use error::GraphError;
pub use geo_index::{EdgeAttributeProvider, EdgeAttributes, GeoIndex, ShortestPath};
pub use geopoint::GeoPoint;
pub use road_network::RoadNetwork;
pub use types::{EdgeId, NodeId};
