mod setup;

use petal_graph::{GeoIndex, NodeId};
use petal_planner::{
    CircularRouteRequest, RoutePlanner, SurfaceTable,
    assembler::{Candidate, assemble},
    leaf::{Leaf, LeafShape, flower_angles, generate_leaf},
    length_filter::select_by_length,
    score::{ScoreInputs, ScoringContext, score_candidates},
    validator::{ValidatedCandidate, validate},
};

use crate::setup::{START, Terrain, hilly_grid, params};

fn leaves(terrain: &Terrain, leaf_count: usize, points: usize, length: f64) -> (NodeId, Vec<Leaf>) {
    let start = terrain.network.nearest_node(&START).unwrap();
    let shape = LeafShape::for_length(length, 1.0, points);

    let leaves = flower_angles(leaf_count)
        .into_iter()
        .enumerate()
        .map(|(index, angle)| generate_leaf(index, angle, start, &shape, &terrain.network).unwrap())
        .collect();

    (start, leaves)
}

fn validated(terrain: &Terrain, leaves: &[Leaf]) -> Vec<ValidatedCandidate> {
    let candidates: Vec<Candidate> = leaves
        .iter()
        .filter_map(|leaf| assemble(leaf, &terrain.network))
        .collect();
    validate(candidates, &terrain.network)
}

#[test]
fn every_leaf_visits_the_start_exactly_at_both_ends() {
    let terrain = hilly_grid(41);

    for points in [3, 4, 5, 7] {
        let (start, leaves) = leaves(&terrain, 24, points, 4000.0);

        for leaf in &leaves {
            let waypoints = leaf.waypoints();
            assert_eq!(waypoints.first(), Some(&start));
            assert_eq!(waypoints.last(), Some(&start));
            assert_eq!(waypoints.iter().filter(|&&node| node == start).count(), 2);
        }
    }
}

#[test]
fn length_filter_keeps_half_of_the_leaves() {
    let terrain = hilly_grid(41);
    let (_, leaves) = leaves(&terrain, 16, 5, 4000.0);
    let valid = validated(&terrain, &leaves);
    assert!(valid.len() >= 8);

    let target = petal_graph::meters!(4000);
    let lengths: Vec<_> = valid.iter().map(|v| v.candidate.length()).collect();
    let survivors = select_by_length(&lengths, target, params(16, 5).survivor_count());

    assert_eq!(survivors.len(), 8);

    let worst_survivor = survivors
        .iter()
        .map(|&i| lengths[i].abs_diff(target))
        .max()
        .unwrap();
    for i in (0..lengths.len()).filter(|i| !survivors.contains(i)) {
        assert!(lengths[i].abs_diff(target) >= worst_survivor);
    }
}

#[test]
fn steep_candidates_never_reach_the_score_map() {
    let terrain = hilly_grid(41);
    let (_, leaves) = leaves(&terrain, 16, 5, 4000.0);
    let valid = validated(&terrain, &leaves);
    let survivors: Vec<usize> = (0..valid.len()).collect();

    let surfaces = SurfaceTable::default();
    let context = ScoringContext {
        geo: &terrain.network,
        elevation: &terrain.elevations,
        surfaces: &surfaces,
    };
    let request = CircularRouteRequest {
        max_steepness: Some(3.0),
        ..CircularRouteRequest::new(START, 4000.0)
    };

    let scores = score_candidates(&valid, &survivors, &request.targets(), &context);

    for (index, candidate) in valid.iter().enumerate() {
        let grade = ScoreInputs::measure(candidate, &context).max_grade;
        let too_steep = grade.is_some_and(|grade| grade > 3.0);
        assert_eq!(scores.contains_key(&index), !too_steep);
    }
}

#[test]
fn selected_loop_has_the_best_elevation_term_among_survivors() {
    let terrain = hilly_grid(41);
    let request = CircularRouteRequest {
        elevation_gain: Some(50.0),
        ..CircularRouteRequest::new(START, 5000.0)
    };

    let planner = RoutePlanner::new(&terrain.network, &terrain.elevations, params(16, 5));
    let output = planner.plan_circular_route(&request).unwrap();
    let winning = output.diagnostics.unwrap().winning_analysis.unwrap();

    let (_, leaves) = leaves(&terrain, 16, 5, 5000.0);
    let valid = validated(&terrain, &leaves);
    let lengths: Vec<_> = valid.iter().map(|v| v.candidate.length()).collect();
    let survivors = select_by_length(&lengths, request.target_length(), 8);

    let surfaces = SurfaceTable::default();
    let context = ScoringContext {
        geo: &terrain.network,
        elevation: &terrain.elevations,
        surfaces: &surfaces,
    };
    let scores = score_candidates(&valid, &survivors, &request.targets(), &context);

    assert_eq!(scores.len(), survivors.len());
    for scored in scores.values() {
        assert!(winning.elevation <= scored.analysis.elevation);
    }
}
