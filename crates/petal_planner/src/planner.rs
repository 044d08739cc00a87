use petal_graph::{EdgeAttributeProvider, GeoIndex, NodeId, stopwatch::Stopwatch};
use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::{
    assembler::{Candidate, assemble},
    elevation::ElevationProvider,
    error::PlannerError,
    leaf::{Leaf, LeafShape, flower_angles, generate_leaf},
    length_filter::select_by_length,
    output::{PlanDiagnostics, RouteOutput},
    params::PlannerParams,
    request::{CircularRouteRequest, PointToPointRequest},
    score::{ScoringContext, score_candidates},
    selector::{SelectBestCandidate, select},
    validator::{ValidatedCandidate, validate},
};

/// Plans routes over a read-only road network. One planner can serve any
/// number of requests; nothing is cached between them.
pub struct RoutePlanner<'a, N> {
    network: &'a N,
    elevation: &'a dyn ElevationProvider,
    params: PlannerParams,
}

impl<'a, N> RoutePlanner<'a, N>
where
    N: GeoIndex + EdgeAttributeProvider,
{
    pub fn new(network: &'a N, elevation: &'a dyn ElevationProvider, params: PlannerParams) -> Self {
        RoutePlanner {
            network,
            elevation,
            params,
        }
    }

    fn context(&self) -> ScoringContext<'_> {
        ScoringContext {
            geo: self.network,
            elevation: self.elevation,
            surfaces: &self.params.surfaces,
        }
    }

    fn start_node(&self, request: &CircularRouteRequest) -> Result<NodeId, PlannerError> {
        self.network
            .nearest_node(&request.start)
            .ok_or(PlannerError::StartNotFound)
    }

    /// Generates a flower of candidate loops around the start and returns the
    /// one closest to the requested length, climbing and surface mix.
    #[instrument(skip_all, fields(length = request.length, leaves = self.params.leaf_count))]
    pub fn plan_circular_route(
        &self,
        request: &CircularRouteRequest,
    ) -> Result<RouteOutput, PlannerError> {
        request.validate()?;
        self.params.validate()?;

        let start_node = self.start_node(request)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.params.threads.number_of_threads())
            .build()?;

        let mut diagnostics = PlanDiagnostics::default();

        let (valid, winner) = pool.install(|| {
            let leaves = self.generate_leaves(start_node, request.length);
            diagnostics.leaves_generated = leaves.len();

            let candidates = self.assemble_candidates(&leaves);
            diagnostics.candidates_assembled = candidates.len();

            let stopwatch = Stopwatch::start("validate");
            let valid = validate(candidates, self.network);
            stopwatch.report(valid.len());
            diagnostics.candidates_valid = valid.len();

            let lengths: Vec<_> = valid.iter().map(|v| v.candidate.length()).collect();
            let survivors = select_by_length(
                &lengths,
                request.target_length(),
                self.params.survivor_count(),
            );
            diagnostics.candidates_surviving = survivors.len();

            let stopwatch = Stopwatch::start("score");
            let scores = score_candidates(&valid, &survivors, &request.targets(), &self.context());
            stopwatch.report(scores.len());
            diagnostics.candidates_scored = scores.len();

            let winner = select(&SelectBestCandidate, &scores).copied();
            (valid, winner)
        });

        let winner = winner?;
        diagnostics.winning_score = Some(winner.score);
        diagnostics.winning_analysis = Some(winner.analysis);

        let ValidatedCandidate { candidate, edges } = valid
            .into_iter()
            .nth(winner.index)
            .ok_or(PlannerError::NoCandidates)?;

        info!(
            candidate = candidate.id(),
            score = winner.score.value(),
            length_m = candidate.length().value(),
            "selected circular route"
        );

        let length = candidate.length();
        let output = RouteOutput::analyse(
            start_node,
            start_node,
            candidate.path().to_vec(),
            length,
            &edges,
            &self.context(),
        );

        Ok(output.with_diagnostics(diagnostics))
    }

    fn generate_leaves(&self, start_node: NodeId, length: f64) -> Vec<Leaf> {
        let stopwatch = Stopwatch::start("generate leaves");
        let shape = LeafShape::for_length(
            length,
            self.params.variance,
            self.params.points_per_leaf,
        );

        let leaves: Vec<Leaf> = flower_angles(self.params.leaf_count)
            .into_par_iter()
            .enumerate()
            .filter_map(|(index, angle)| {
                match generate_leaf(index, angle, start_node, &shape, self.network) {
                    Ok(leaf) => Some(leaf),
                    Err(err) => {
                        warn!(leaf = index, %err, "failed to generate leaf");
                        None
                    }
                }
            })
            .collect();

        stopwatch.report(leaves.len());
        leaves
    }

    fn assemble_candidates(&self, leaves: &[Leaf]) -> Vec<Candidate> {
        let stopwatch = Stopwatch::start("assemble");
        let candidates: Vec<Candidate> = leaves
            .par_iter()
            .filter_map(|leaf| assemble(leaf, self.network))
            .collect();

        stopwatch.report(candidates.len());
        candidates
    }

    /// Shortest route between two points with the same statistics as a loop.
    #[instrument(skip_all)]
    pub fn plan_route(&self, request: &PointToPointRequest) -> Result<RouteOutput, PlannerError> {
        request.validate()?;

        let start_node = self
            .network
            .nearest_node(&request.start)
            .ok_or(PlannerError::StartNotFound)?;
        let end_node = self
            .network
            .nearest_node(&request.end)
            .ok_or(PlannerError::EndNotFound)?;

        let path = self.network.shortest_path(start_node, end_node)?;
        let edges = self.network.attributes_for_path(&path.nodes)?;

        info!(
            start_node,
            end_node,
            length_m = path.length.value() * 1000.0,
            "found point to point route"
        );

        Ok(RouteOutput::analyse(
            start_node,
            end_node,
            path.nodes,
            path.length.convert(),
            &edges,
            &self.context(),
        ))
    }
}
