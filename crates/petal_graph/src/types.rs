/// Dense index of a node inside a [`crate::road_network::RoadNetwork`].
pub type NodeId = usize;

/// Dense index of an edge inside a [`crate::road_network::RoadNetwork`].
pub type EdgeId = usize;
