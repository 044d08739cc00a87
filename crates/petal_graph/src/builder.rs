use fxhash::FxHashMap;

use crate::{
    distance::{Distance, Meters},
    error::GraphError,
    geometry::compute_geometry_distance,
    geopoint::GeoPoint,
    road_network::{GraphEdge, GraphNode, RoadNetwork},
    types::{EdgeId, NodeId},
};

/// Attributes of an edge to be added with [`RoadNetworkBuilder::add_edge`].
#[derive(Debug, Clone, Default)]
pub struct NewEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Explicit length. When absent the length of the geometry is used.
    pub length: Option<Distance<Meters>>,
    pub surface: Option<String>,
    pub name: Option<String>,
    pub highway: Option<String>,
    pub oneway: bool,
    /// Polyline from `from` to `to`. Empty means a straight segment between the nodes.
    pub geometry: Vec<GeoPoint>,
}

impl NewEdge {
    pub fn between(from: NodeId, to: NodeId) -> Self {
        NewEdge {
            from,
            to,
            ..NewEdge::default()
        }
    }

    pub fn with_surface(mut self, surface: impl Into<String>) -> Self {
        self.surface = Some(surface.into());
        self
    }

    pub fn with_length(mut self, length: Distance<Meters>) -> Self {
        self.length = Some(length);
        self
    }

    pub fn oneway(mut self) -> Self {
        self.oneway = true;
        self
    }
}

#[derive(Default)]
pub struct RoadNetworkBuilder {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    geometry: Vec<Vec<GeoPoint>>,
    adjacency_list: Vec<Vec<EdgeId>>,
    external_ids: FxHashMap<i64, NodeId>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its dense id. Adding the same external id twice
    /// returns the id of the first node.
    pub fn add_node(&mut self, external_id: i64, position: GeoPoint, elevation: Option<f64>) -> NodeId {
        if let Some(&node_id) = self.external_ids.get(&external_id) {
            return node_id;
        }

        let node_id = self.nodes.len();
        self.nodes
            .push(GraphNode::new(external_id, position, elevation));
        self.adjacency_list.push(vec![]);
        self.external_ids.insert(external_id, node_id);
        node_id
    }

    pub fn node_id(&self, external_id: i64) -> Option<NodeId> {
        self.external_ids.get(&external_id).copied()
    }

    pub fn add_edge(&mut self, edge: NewEdge) -> Result<EdgeId, GraphError> {
        let from_position = *self
            .nodes
            .get(edge.from)
            .ok_or(GraphError::UnknownNode(edge.from))?
            .position();
        let to_position = *self
            .nodes
            .get(edge.to)
            .ok_or(GraphError::UnknownNode(edge.to))?
            .position();

        let geometry = if edge.geometry.len() < 2 {
            vec![from_position, to_position]
        } else {
            edge.geometry
        };

        let distance = edge
            .length
            .unwrap_or_else(|| compute_geometry_distance(&geometry));

        let edge_id = self.edges.len();
        self.edges.push(GraphEdge {
            id: edge_id,
            start_node: edge.from,
            end_node: edge.to,
            distance,
            oneway: edge.oneway,
            surface: edge.surface,
            name: edge.name,
            highway: edge.highway,
        });
        self.geometry.push(geometry);
        self.adjacency_list[edge.from].push(edge_id);
        if edge.to != edge.from {
            self.adjacency_list[edge.to].push(edge_id);
        }

        Ok(edge_id)
    }

    pub fn build(self) -> RoadNetwork {
        RoadNetwork::new(self.nodes, self.edges, self.geometry, self.adjacency_list)
    }
}
