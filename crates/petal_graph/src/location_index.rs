use rstar::primitives::GeomWithData;
use rstar::{RStarInsertionStrategy, RTree, RTreeParams};
use tracing::debug;

use crate::{geopoint::GeoPoint, types::NodeId};

type LocationIndexObject = GeomWithData<[f64; 2], NodeId>;

struct LocationIndexTreeParams;

impl RTreeParams for LocationIndexTreeParams {
    type DefaultInsertionStrategy = RStarInsertionStrategy;

    const MAX_SIZE: usize = 64;
    const MIN_SIZE: usize = 28;
    const REINSERTION_COUNT: usize = 5;
}

/// Nearest-node lookups over the projected positions of routable nodes.
pub(crate) struct LocationIndex {
    tree: RTree<LocationIndexObject, LocationIndexTreeParams>,
}

impl LocationIndex {
    pub(crate) fn build<'a>(nodes: impl Iterator<Item = (NodeId, &'a GeoPoint)>) -> Self {
        let objects: Vec<LocationIndexObject> = nodes
            .map(|(node_id, position)| LocationIndexObject::new(position.project(), node_id))
            .collect();

        debug!(nodes = objects.len(), "Building location index");

        LocationIndex {
            tree: RTree::bulk_load_with_params(objects),
        }
    }

    pub(crate) fn nearest_node(&self, point: &GeoPoint) -> Option<NodeId> {
        self.tree
            .nearest_neighbor(&point.project())
            .map(|nearest| nearest.data)
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.size()
    }
}
