use std::collections::BTreeMap;

use petal_graph::{Distance, EdgeAttributes, GeoPoint, Meters, NodeId};
use serde::Serialize;

use crate::{
    elevation::ElevationProfile,
    score::{ScoreAnalysis, ScoringContext, Score},
    surface::{SurfaceClass, UNKNOWN_SURFACE, surface_distribution},
};

/// One traversed edge as reported to renderers.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeAnalysis {
    pub from: NodeId,
    pub to: NodeId,
    pub length_m: f64,
    pub surface: String,
    pub surface_class: SurfaceClass,
    pub name: Option<String>,
    pub highway: Option<String>,
    pub geometry: Vec<GeoPoint>,
}

/// How many candidates each stage of the circular planner let through.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanDiagnostics {
    pub leaves_generated: usize,
    pub candidates_assembled: usize,
    pub candidates_valid: usize,
    pub candidates_surviving: usize,
    pub candidates_scored: usize,
    pub winning_score: Option<Score>,
    pub winning_analysis: Option<ScoreAnalysis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteOutput {
    pub start_node: NodeId,
    pub end_node: NodeId,
    pub path: Vec<NodeId>,
    pub length_m: f64,
    pub elevation_gain_m: f64,
    pub hardened_fraction: f64,
    pub hardened_percentage: f64,
    /// Kilometers per surface tag.
    pub surface_distribution: BTreeMap<String, f64>,
    pub edges: Vec<EdgeAnalysis>,
    pub polyline: Vec<GeoPoint>,
    /// Available elevation samples in path order.
    pub elevation_profile: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<PlanDiagnostics>,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl RouteOutput {
    /// Computes the reported statistics for a chosen path.
    pub fn analyse(
        start_node: NodeId,
        end_node: NodeId,
        path: Vec<NodeId>,
        length: Distance<Meters>,
        edges: &[EdgeAttributes],
        context: &ScoringContext,
    ) -> Self {
        let profile = ElevationProfile::along_path(&path, context.geo, context.elevation);
        let hardened_fraction = context.surfaces.hardened_fraction(edges, length);

        let polyline = if edges.is_empty() {
            path.iter()
                .filter_map(|&node| context.geo.node_position(node))
                .collect()
        } else {
            build_polyline(edges)
        };

        RouteOutput {
            start_node,
            end_node,
            length_m: length.value().round(),
            elevation_gain_m: round_to(profile.gain(), 1),
            hardened_fraction,
            hardened_percentage: round_to(hardened_fraction * 100.0, 1),
            surface_distribution: surface_distribution(edges),
            edges: edges
                .iter()
                .map(|edge| EdgeAnalysis {
                    from: edge.from,
                    to: edge.to,
                    length_m: edge.length.value(),
                    surface: edge
                        .surface
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_SURFACE.to_owned()),
                    surface_class: context.surfaces.classify(edge.surface.as_deref()),
                    name: edge.name.clone(),
                    highway: edge.highway.clone(),
                    geometry: edge.geometry.clone(),
                })
                .collect(),
            polyline,
            elevation_profile: profile.available().collect(),
            path,
            diagnostics: None,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: PlanDiagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }
}

/// Joins edge geometries, dropping the point shared by consecutive edges.
fn build_polyline(edges: &[EdgeAttributes]) -> Vec<GeoPoint> {
    let mut polyline: Vec<GeoPoint> = Vec::new();

    for point in edges.iter().flat_map(|edge| edge.geometry.iter()) {
        if polyline.last() != Some(point) {
            polyline.push(*point);
        }
    }

    polyline
}
