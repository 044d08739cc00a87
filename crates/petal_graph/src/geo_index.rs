//! Contracts the route planner consumes from a road network, and their
//! implementation for [`RoadNetwork`].

use serde::Serialize;
use tracing::instrument;

use crate::{
    dijkstra::Dijkstra,
    distance::{Distance, Kilometers, Meters},
    error::GraphError,
    geopoint::GeoPoint,
    road_network::RoadNetwork,
    types::NodeId,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub nodes: Vec<NodeId>,
    pub length: Distance<Kilometers>,
}

/// Attributes of one traversed edge, oriented in the direction of travel.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeAttributes {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "length_m", serialize_with = "serialize_meters")]
    pub length: Distance<Meters>,
    pub surface: Option<String>,
    pub name: Option<String>,
    pub highway: Option<String>,
    pub geometry: Vec<GeoPoint>,
}

fn serialize_meters<S: serde::Serializer>(
    distance: &Distance<Meters>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(distance.value())
}

/// Nearest-node and shortest-path primitives. Implementations must be safe to
/// query from many threads at once.
pub trait GeoIndex: Sync {
    fn nearest_node(&self, point: &GeoPoint) -> Option<NodeId>;

    fn node_position(&self, node: NodeId) -> Option<GeoPoint>;

    /// Fails with [`GraphError::NoPath`] when `to` cannot be reached from `from`.
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<ShortestPath, GraphError>;
}

pub trait EdgeAttributeProvider: Sync {
    /// One entry per consecutive node pair. Fails if any pair is not joined by a
    /// traversable edge.
    fn attributes_for_path(&self, path: &[NodeId]) -> Result<Vec<EdgeAttributes>, GraphError>;
}

impl GeoIndex for RoadNetwork {
    fn nearest_node(&self, point: &GeoPoint) -> Option<NodeId> {
        self.index.nearest_node(point)
    }

    fn node_position(&self, node: NodeId) -> Option<GeoPoint> {
        self.node(node).map(|node| *node.position())
    }

    #[instrument(level = "trace", skip(self))]
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<ShortestPath, GraphError> {
        for node in [from, to] {
            if node >= self.node_count() {
                return Err(GraphError::UnknownNode(node));
            }
        }

        let (nodes, length) = Dijkstra::new(self)
            .calc_path(from, to)
            .ok_or(GraphError::NoPath { from, to })?;

        Ok(ShortestPath {
            nodes,
            length: length.convert(),
        })
    }
}

impl EdgeAttributeProvider for RoadNetwork {
    fn attributes_for_path(&self, path: &[NodeId]) -> Result<Vec<EdgeAttributes>, GraphError> {
        path.windows(2)
            .map(|pair| {
                let (from, to) = (pair[0], pair[1]);
                let edge = self
                    .connecting_edge(from, to)
                    .ok_or(GraphError::MissingEdge { from, to })?;

                Ok(EdgeAttributes {
                    from,
                    to,
                    length: edge.distance(),
                    surface: edge.surface().map(str::to_owned),
                    name: edge.name().map(str::to_owned),
                    highway: edge.highway().map(str::to_owned),
                    geometry: self.oriented_geometry(edge.id(), from),
                })
            })
            .collect()
    }
}
