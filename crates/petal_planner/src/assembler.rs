use petal_graph::{Distance, GeoIndex, GraphError, Meters, NodeId};
use tracing::{debug, warn};

use crate::leaf::Leaf;

/// A node-level path expanded from one leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    id: usize,
    path: Vec<NodeId>,
    length: Distance<Meters>,
    skipped_segments: usize,
}

impl Candidate {
    /// Index of the leaf this candidate was assembled from.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn length(&self) -> Distance<Meters> {
        self.length
    }

    /// Waypoint pairs for which no path was found.
    pub fn skipped_segments(&self) -> usize {
        self.skipped_segments
    }
}

/// Chains shortest paths between consecutive waypoints of `leaf`.
///
/// Unreachable waypoint pairs are skipped, which leaves a gap in the path that
/// the validator rejects later. Returns `None` for degenerate leaves and for
/// leaves where nothing could be assembled.
pub fn assemble(leaf: &Leaf, geo: &dyn GeoIndex) -> Option<Candidate> {
    if leaf.is_degenerate() {
        debug!(leaf = leaf.index(), "degenerate leaf, nothing to assemble");
        return None;
    }

    let mut path: Vec<NodeId> = Vec::new();
    let mut length = Distance::<Meters>::ZERO;
    let mut skipped_segments = 0;

    for pair in leaf.waypoints().windows(2) {
        let (from, to) = (pair[0], pair[1]);

        match geo.shortest_path(from, to) {
            Ok(segment) => {
                for node in segment.nodes {
                    if path.last() != Some(&node) {
                        path.push(node);
                    }
                }
                length += segment.length;
            }
            Err(err @ GraphError::NoPath { .. }) => {
                warn!(leaf = leaf.index(), %err, "segment unreachable, skipping");
                skipped_segments += 1;
            }
            Err(err) => {
                warn!(leaf = leaf.index(), %err, "segment lookup failed, skipping");
                skipped_segments += 1;
            }
        }
    }

    if path.len() < 2 {
        debug!(leaf = leaf.index(), "no path assembled");
        return None;
    }

    Some(Candidate {
        id: leaf.index(),
        path,
        length,
        skipped_segments,
    })
}
