use crate::types::{EdgeId, NodeId};

pub(crate) const INVALID_NODE: NodeId = usize::MAX;
pub(crate) const INVALID_EDGE: EdgeId = usize::MAX;

pub(crate) const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
