use petal_graph::{EdgeAttributeProvider, EdgeAttributes};
use rayon::prelude::*;
use tracing::debug;

use crate::assembler::Candidate;

/// A candidate whose every edge could be described by the network.
#[derive(Debug, Clone)]
pub struct ValidatedCandidate {
    pub candidate: Candidate,
    /// One entry per consecutive node pair of the candidate path.
    pub edges: Vec<EdgeAttributes>,
}

/// Drops candidates whose edge attributes cannot be retrieved. The relative
/// order of the remaining candidates is preserved.
pub fn validate(
    candidates: Vec<Candidate>,
    attributes: &dyn EdgeAttributeProvider,
) -> Vec<ValidatedCandidate> {
    candidates
        .into_par_iter()
        .filter_map(
            |candidate| match attributes.attributes_for_path(candidate.path()) {
                Ok(edges) => Some(ValidatedCandidate { candidate, edges }),
                Err(err) => {
                    debug!(candidate = candidate.id(), %err, "candidate invalid, dropping");
                    None
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use petal_graph::{GeoIndex, GeoPoint, NewEdge, RoadNetworkBuilder};

    use super::*;
    use crate::{
        assembler::assemble,
        leaf::{Leaf, LeafShape, WaypointRing, flower_angles, generate_leaf},
        test_utils::{START, create_grid_network},
    };

    #[test]
    fn keeps_connected_candidates_in_order() {
        let network = create_grid_network(21, 21, 100.0);
        let start = network.nearest_node(&START).unwrap();
        let shape = LeafShape::for_length(2500.0, 1.0, 4);

        let candidates: Vec<Candidate> = flower_angles(6)
            .into_iter()
            .enumerate()
            .map(|(index, angle)| generate_leaf(index, angle, start, &shape, &network).unwrap())
            .filter_map(|leaf| assemble(&leaf, &network))
            .collect();

        let valid = validate(candidates.clone(), &network);
        assert_eq!(valid.len(), candidates.len());

        for (validated, candidate) in valid.iter().zip(&candidates) {
            assert_eq!(&validated.candidate, candidate);
            assert_eq!(validated.edges.len(), candidate.path().len() - 1);
        }
    }

    #[test]
    fn drops_candidates_with_gaps() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(1, START, None);
        let b = builder.add_node(2, GeoPoint::new(START.lat + 0.001, START.lng), None);
        let c = builder.add_node(3, GeoPoint::new(START.lat, START.lng + 0.01), None);
        let d = builder.add_node(4, GeoPoint::new(START.lat + 0.001, START.lng + 0.01), None);
        builder.add_edge(NewEdge::between(a, b)).unwrap();
        builder.add_edge(NewEdge::between(c, d)).unwrap();
        let network = builder.build();

        let connected = Leaf::from_waypoints(0, 0.0, vec![a, b, a]);
        let broken = Leaf::from_waypoints(1, 0.0, WaypointRing::new(vec![b, c, d]).close_around(a, 0));
        let candidates: Vec<Candidate> = [connected, broken]
            .iter()
            .filter_map(|leaf| assemble(leaf, &network))
            .collect();
        assert_eq!(candidates.len(), 2);

        let valid = validate(candidates, &network);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].candidate.id(), 0);
    }
}
