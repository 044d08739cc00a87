//! Leaf candidate generation: one ring of waypoints per direction of the flower.

use std::f64::consts::{PI, TAU};
use std::iter;

use fxhash::FxHashSet;
use petal_graph::{GeoIndex, GeoPoint, GraphError, NodeId};

/// Flat-earth conversion used to place leaf centers and ring points. Good
/// enough for loops of a few tens of kilometers away from the poles.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Shape shared by every leaf of one flower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafShape {
    /// Radius of each leaf ring, `target_length / 2π`.
    pub radius: f64,
    pub variance: f64,
    pub points_per_leaf: usize,
}

impl LeafShape {
    pub fn for_length(target_length: f64, variance: f64, points_per_leaf: usize) -> Self {
        LeafShape {
            radius: target_length / TAU,
            variance,
            points_per_leaf,
        }
    }
}

/// Ordered waypoints of one candidate loop. Starts and ends on the start node.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    index: usize,
    angle: f64,
    waypoints: Vec<NodeId>,
}

impl Leaf {
    pub fn from_waypoints(index: usize, angle: f64, waypoints: Vec<NodeId>) -> Self {
        Leaf {
            index,
            angle,
            waypoints,
        }
    }

    /// Position of this leaf in the flower, also the id of its candidate.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn waypoints(&self) -> &[NodeId] {
        &self.waypoints
    }

    /// A leaf whose ring collapsed onto the start node.
    pub fn is_degenerate(&self) -> bool {
        self.waypoints.len() < 3
    }
}

/// `leaf_count` equally spaced directions over a full circle, starting east.
pub fn flower_angles(leaf_count: usize) -> Vec<f64> {
    (0..leaf_count)
        .map(|i| TAU * i as f64 / leaf_count as f64)
        .collect()
}

/// Moves `origin` by `meters` in direction `angle` (radians, counter-clockwise
/// from east), converting each axis with [`METERS_PER_DEGREE`].
pub fn offset_point(origin: &GeoPoint, angle: f64, meters: f64) -> GeoPoint {
    GeoPoint::new(
        origin.lat + angle.sin() * meters / METERS_PER_DEGREE,
        origin.lng + angle.cos() * meters / METERS_PER_DEGREE,
    )
}

/// Where the start node belongs in a ring whose center lies in direction
/// `angle` from the start. The start sits at angular position
/// `(angle° / 360) · n + n / 2` on the ring. The position is rounded half to
/// even onto a ring slot.
pub fn start_point_index(angle: f64, points_per_leaf: usize) -> usize {
    if points_per_leaf == 0 {
        return 0;
    }

    let n = points_per_leaf as f64;
    let position = (angle * 180.0 / PI) / 360.0 * n + n / 2.0;
    let splice_at = position.round_ties_even() as i64;

    splice_at.rem_euclid(points_per_leaf as i64) as usize
}

/// Snapped ring points in counter-clockwise order around a leaf center.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointRing {
    nodes: Vec<NodeId>,
}

impl WaypointRing {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        WaypointRing { nodes }
    }

    /// Splices `start` in front of ring position `splice_at`, reads the ring
    /// from there, drops repeated nodes keeping their first occurrence and
    /// closes the loop on `start`.
    pub fn close_around(&self, start: NodeId, splice_at: usize) -> Vec<NodeId> {
        let splice_at = if self.nodes.is_empty() {
            0
        } else {
            splice_at % self.nodes.len()
        };
        let (before, after) = self.nodes.split_at(splice_at);

        let mut seen = FxHashSet::default();
        let mut waypoints: Vec<NodeId> = iter::once(start)
            .chain(after.iter().copied())
            .chain(before.iter().copied())
            .filter(|node| seen.insert(*node))
            .collect();

        waypoints.push(start);
        waypoints
    }
}

/// Builds the leaf for direction `angle`. Pure apart from read-only lookups on
/// `geo`, so leaves for different angles can be generated concurrently.
pub fn generate_leaf(
    index: usize,
    angle: f64,
    start_node: NodeId,
    shape: &LeafShape,
    geo: &dyn GeoIndex,
) -> Result<Leaf, GraphError> {
    let start = geo
        .node_position(start_node)
        .ok_or(GraphError::UnknownNode(start_node))?;

    let center = offset_point(&start, angle, shape.radius * shape.variance);

    let ring = (0..shape.points_per_leaf)
        .map(|k| {
            let ring_angle = TAU * k as f64 / shape.points_per_leaf as f64;
            geo.nearest_node(&offset_point(&center, ring_angle, shape.radius))
        })
        .collect::<Option<Vec<NodeId>>>()
        .ok_or(GraphError::EmptyNetwork)?;

    let waypoints = WaypointRing::new(ring)
        .close_around(start_node, start_point_index(angle, shape.points_per_leaf));

    Ok(Leaf {
        index,
        angle,
        waypoints,
    })
}
