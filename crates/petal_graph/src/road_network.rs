use crate::{
    distance::{Distance, Meters},
    geopoint::GeoPoint,
    location_index::LocationIndex,
    types::{EdgeId, NodeId},
};

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum EdgeDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone)]
pub struct GraphNode {
    external_id: i64,
    position: GeoPoint,
    elevation: Option<f64>,
}

impl GraphNode {
    pub(crate) fn new(external_id: i64, position: GeoPoint, elevation: Option<f64>) -> Self {
        GraphNode {
            external_id,
            position,
            elevation,
        }
    }

    /// Identifier of the node in the source data (usually an OSM node id).
    pub fn external_id(&self) -> i64 {
        self.external_id
    }

    pub fn position(&self) -> &GeoPoint {
        &self.position
    }

    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }
}

#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub(crate) id: EdgeId,
    pub(crate) start_node: NodeId,
    pub(crate) end_node: NodeId,
    pub(crate) distance: Distance<Meters>,
    pub(crate) oneway: bool,
    pub(crate) surface: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) highway: Option<String>,
}

impl GraphEdge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    pub fn adj_node(&self, node: NodeId) -> NodeId {
        if self.start_node == node {
            self.end_node
        } else {
            self.start_node
        }
    }

    pub fn distance(&self) -> Distance<Meters> {
        self.distance
    }

    pub fn is_oneway(&self) -> bool {
        self.oneway
    }

    /// Primary surface tag. Multi-valued tags keep only their first value.
    pub fn surface(&self) -> Option<&str> {
        self.surface.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn highway(&self) -> Option<&str> {
        self.highway.as_deref()
    }
}

/// Read-only road network: nodes, undirected adjacency with optional oneway
/// restrictions, per-edge geometry and a spatial index over routable nodes.
pub struct RoadNetwork {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) edges: Vec<GraphEdge>,
    pub(crate) geometry: Vec<Vec<GeoPoint>>,
    pub(crate) adjacency_list: Vec<Vec<EdgeId>>,
    pub(crate) index: LocationIndex,
}

impl RoadNetwork {
    pub(crate) fn new(
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
        geometry: Vec<Vec<GeoPoint>>,
        adjacency_list: Vec<Vec<EdgeId>>,
    ) -> Self {
        // Isolated nodes would snap waypoints onto places no path can reach.
        let index = LocationIndex::build(
            nodes
                .iter()
                .enumerate()
                .filter(|(node_id, _)| !adjacency_list[*node_id].is_empty())
                .map(|(node_id, node)| (node_id, node.position())),
        );

        RoadNetwork {
            nodes,
            edges,
            geometry,
            adjacency_list,
            index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of nodes with at least one edge, the only ones `nearest_node` can return.
    pub fn routable_node_count(&self) -> usize {
        self.index.len()
    }

    pub fn node(&self, node: NodeId) -> Option<&GraphNode> {
        self.nodes.get(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes.iter().enumerate()
    }

    pub fn edge(&self, edge: EdgeId) -> &GraphEdge {
        &self.edges[edge]
    }

    pub fn edge_geometry(&self, edge: EdgeId) -> &[GeoPoint] {
        &self.geometry[edge][..]
    }

    pub fn node_edges(&self, node: NodeId) -> &[EdgeId] {
        self.adjacency_list
            .get(node)
            .map(|edges| &edges[..])
            .unwrap_or(&[])
    }

    /// Direction in which `edge_id` is traversed when leaving `start`,
    /// or `None` if `start` is not one of its endpoints.
    pub fn edge_direction(&self, edge_id: EdgeId, start: NodeId) -> Option<EdgeDirection> {
        let edge = &self.edges[edge_id];

        if edge.start_node == start {
            Some(EdgeDirection::Forward)
        } else if edge.end_node == start {
            Some(EdgeDirection::Backward)
        } else {
            None
        }
    }

    pub fn can_traverse(&self, edge_id: EdgeId, from: NodeId) -> bool {
        match self.edge_direction(edge_id, from) {
            Some(EdgeDirection::Forward) => true,
            Some(EdgeDirection::Backward) => !self.edges[edge_id].oneway,
            None => false,
        }
    }

    /// Shortest edge that can be traversed from `from` to `to`.
    pub fn connecting_edge(&self, from: NodeId, to: NodeId) -> Option<&GraphEdge> {
        self.node_edges(from)
            .iter()
            .map(|&edge_id| &self.edges[edge_id])
            .filter(|edge| edge.adj_node(from) == to && self.can_traverse(edge.id, from))
            .min_by(|a, b| a.distance.cmp(&b.distance).then(a.id.cmp(&b.id)))
    }

    /// Geometry of `edge_id` oriented in the direction of travel from `from`.
    pub fn oriented_geometry(&self, edge_id: EdgeId, from: NodeId) -> Vec<GeoPoint> {
        let geometry = self.edge_geometry(edge_id);
        match self.edge_direction(edge_id, from) {
            Some(EdgeDirection::Backward) => geometry.iter().rev().copied().collect(),
            _ => geometry.to_vec(),
        }
    }

    /// Elevation samples carried by the network file, keyed by node position.
    pub fn node_elevations(&self) -> impl Iterator<Item = (GeoPoint, f64)> + '_ {
        self.nodes
            .iter()
            .filter_map(|node| node.elevation.map(|elevation| (node.position, elevation)))
    }
}
