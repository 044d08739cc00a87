//! JSON road network files.
//!
//! ```json
//! {
//!   "nodes": [{ "id": 1, "lat": 50.96, "lng": 5.82, "elevation": 61.0 }],
//!   "edges": [{ "from": 1, "to": 2, "surface": ["asphalt", "paved"], "oneway": false }]
//! }
//! ```

use std::{fs::File, io::BufReader, io::Read, path::Path};

use serde::Deserialize;
use tracing::info;

use crate::{
    builder::{NewEdge, RoadNetworkBuilder},
    distance::Distance,
    error::GraphError,
    geopoint::GeoPoint,
    road_network::RoadNetwork,
};

#[derive(Deserialize)]
struct NetworkFile {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

#[derive(Deserialize)]
struct NodeRecord {
    id: i64,
    lat: f64,
    lng: f64,
    elevation: Option<f64>,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from: i64,
    to: i64,
    /// Meters
    length: Option<f64>,
    surface: Option<SurfaceTag>,
    name: Option<String>,
    highway: Option<String>,
    #[serde(default)]
    oneway: bool,
    /// `[lat, lng]` pairs
    #[serde(default)]
    geometry: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SurfaceTag {
    Single(String),
    Multiple(Vec<String>),
}

impl SurfaceTag {
    fn into_primary(self) -> Option<String> {
        match self {
            SurfaceTag::Single(surface) => Some(surface),
            SurfaceTag::Multiple(surfaces) => surfaces.into_iter().next(),
        }
    }
}

impl RoadNetwork {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<RoadNetwork, GraphError> {
        let file = File::open(path.as_ref())?;
        let network = Self::from_json_reader(BufReader::new(file))?;
        info!(
            path = %path.as_ref().display(),
            nodes = network.node_count(),
            edges = network.edge_count(),
            "Loaded road network"
        );
        Ok(network)
    }

    pub fn from_json_reader(reader: impl Read) -> Result<RoadNetwork, GraphError> {
        let file: NetworkFile = serde_json::from_reader(reader)?;
        let mut builder = RoadNetworkBuilder::new();

        for node in file.nodes {
            builder.add_node(node.id, GeoPoint::new(node.lat, node.lng), node.elevation);
        }

        for edge in file.edges {
            let from = builder
                .node_id(edge.from)
                .ok_or(GraphError::UnknownExternalNode(edge.from))?;
            let to = builder
                .node_id(edge.to)
                .ok_or(GraphError::UnknownExternalNode(edge.to))?;

            builder.add_edge(NewEdge {
                from,
                to,
                length: edge.length.map(Distance::from),
                surface: edge.surface.and_then(SurfaceTag::into_primary),
                name: edge.name,
                highway: edge.highway,
                oneway: edge.oneway,
                geometry: edge
                    .geometry
                    .into_iter()
                    .map(|[lat, lng]| GeoPoint::new(lat, lng))
                    .collect(),
            })?;
        }

        Ok(builder.build())
    }
}
