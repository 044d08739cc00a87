use std::f64::consts::TAU;

use clap::ValueEnum;
use petal_elevation::{ElevationCache, OpenMeteoClient, OpenMeteoClientParams};
use petal_graph::{Distance, GeoPoint, Meters, RoadNetwork};
use petal_planner::{ElevationProvider, NoElevation, SampledElevations};
use tracing::{info, warn};

/// Slack added around the reachable area for snapping and path detours.
const AREA_MARGIN_METERS: f64 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ElevationSource {
    /// Ignore elevation entirely
    None,
    /// Use the elevations stored in the network file
    Graph,
    /// Fetch elevations for the nodes a route can reach from Open-Meteo
    OpenMeteo,
}

/// Circle around the request outside of which no route node can lie.
#[derive(Clone, Copy, Debug)]
pub struct ElevationArea {
    center: GeoPoint,
    radius: Distance<Meters>,
}

impl ElevationArea {
    /// Leaf centers sit `variance` leaf radii from the start and their rings
    /// one leaf radius further out.
    pub fn around_loop(start: GeoPoint, length: f64, variance: f64) -> Self {
        let leaf_radius = length / TAU;

        ElevationArea {
            center: start,
            radius: Distance::from(leaf_radius * (variance + 1.0) + AREA_MARGIN_METERS),
        }
    }

    pub fn around_route(start: GeoPoint, end: GeoPoint) -> Self {
        let center = GeoPoint::new((start.lat + end.lat) / 2.0, (start.lng + end.lng) / 2.0);
        let half = start.haversine_distance(&end).value() / 2.0;

        ElevationArea {
            center,
            radius: Distance::from(half * 1.5 + AREA_MARGIN_METERS),
        }
    }

    fn contains(&self, point: &GeoPoint) -> bool {
        self.center.haversine_distance(point) <= self.radius
    }
}

/// Positions of the routable nodes inside `area`.
fn routable_points_within(network: &RoadNetwork, area: &ElevationArea) -> Vec<GeoPoint> {
    network
        .nodes()
        .filter(|(id, _)| !network.node_edges(*id).is_empty())
        .map(|(_, node)| *node.position())
        .filter(|position| area.contains(position))
        .collect()
}

pub async fn load_elevations(
    source: ElevationSource,
    network: &RoadNetwork,
    area: ElevationArea,
) -> Result<Box<dyn ElevationProvider>, anyhow::Error> {
    match source {
        ElevationSource::None => Ok(Box::new(NoElevation)),
        ElevationSource::Graph => {
            let elevations: SampledElevations = network.node_elevations().collect();
            if elevations.is_empty() {
                warn!("The network file carries no elevations, elevation targets will be ignored");
            }
            info!(samples = elevations.len(), "Loaded elevations from the network");
            Ok(Box::new(elevations))
        }
        ElevationSource::OpenMeteo => {
            let points = routable_points_within(network, &area);
            info!(
                points = points.len(),
                radius_m = area.radius.value(),
                "Requesting elevations around the route"
            );

            let client = OpenMeteoClient::new(OpenMeteoClientParams {
                cache: ElevationCache::from_env()?,
                ..OpenMeteoClientParams::default()
            });

            Ok(Box::new(client.fetch_sampled(&points).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use petal_graph::{NewEdge, RoadNetworkBuilder};

    use super::*;

    const START: GeoPoint = GeoPoint {
        lat: 50.9662,
        lng: 5.8296,
    };

    fn north_of_start(meters: f64) -> GeoPoint {
        GeoPoint::new(START.lat + meters / 111_195.0, START.lng)
    }

    #[test]
    fn only_nodes_within_reach_are_requested() {
        let mut builder = RoadNetworkBuilder::new();
        let start = builder.add_node(1, START, None);
        let near = builder.add_node(2, north_of_start(600.0), None);
        let edge_of_reach = builder.add_node(3, north_of_start(1300.0), None);
        let far = builder.add_node(4, north_of_start(5000.0), None);
        let farther = builder.add_node(5, north_of_start(5100.0), None);
        builder.add_node(6, north_of_start(100.0), None);
        builder.add_edge(NewEdge::between(start, near)).unwrap();
        builder.add_edge(NewEdge::between(near, edge_of_reach)).unwrap();
        builder.add_edge(NewEdge::between(edge_of_reach, far)).unwrap();
        builder.add_edge(NewEdge::between(far, farther)).unwrap();
        let network = builder.build();

        // 2500 m loop: leaf radius ~398 m, reach ~1296 m with the margin.
        let area = ElevationArea::around_loop(START, 2500.0, 1.0);
        let points = routable_points_within(&network, &area);

        assert_eq!(points, vec![START, north_of_start(600.0)]);
    }

    #[test]
    fn longer_loops_reach_further() {
        let point = north_of_start(3000.0);

        assert!(!ElevationArea::around_loop(START, 5000.0, 1.0).contains(&point));
        assert!(ElevationArea::around_loop(START, 10_000.0, 1.0).contains(&point));
    }

    #[test]
    fn route_area_covers_both_ends() {
        let end = north_of_start(4000.0);
        let area = ElevationArea::around_route(START, end);

        assert!(area.contains(&START));
        assert!(area.contains(&end));
        assert!(!area.contains(&north_of_start(7500.0)));
    }
}
