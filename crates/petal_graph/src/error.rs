use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Node {0} does not exist in the road network")]
    UnknownNode(NodeId),
    #[error("Edge references node {0} which is not defined in the network file")]
    UnknownExternalNode(i64),
    #[error("No path between node {from} and node {to}")]
    NoPath { from: NodeId, to: NodeId },
    #[error("No traversable edge from node {from} to node {to}")]
    MissingEdge { from: NodeId, to: NodeId },
    #[error("The road network has no routable nodes")]
    EmptyNetwork,
    #[error("Failed to read road network file")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse road network file: {0}")]
    Parse(#[from] serde_json::Error),
}
