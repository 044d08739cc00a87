#![allow(dead_code)]

use petal_graph::{GeoPoint, NewEdge, NodeId, RoadNetwork, RoadNetworkBuilder};
use petal_planner::{PlannerParams, SampledElevations, Threads};

pub const START: GeoPoint = GeoPoint {
    lat: 50.9662,
    lng: 5.8296,
};

const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

pub struct Terrain {
    pub network: RoadNetwork,
    pub elevations: SampledElevations,
}

/// `size` x `size` street grid centered on [`START`]. `elevation` and
/// `surface` receive offsets in meters east and north of the start.
pub fn create_grid(
    size: usize,
    spacing: f64,
    elevation: impl Fn(f64, f64) -> f64,
    surface: impl Fn(f64, f64, bool) -> &'static str,
) -> RoadNetwork {
    let mut builder = RoadNetworkBuilder::new();
    let lng_scale = METERS_PER_DEGREE_LAT * START.lat.to_radians().cos();
    let half = (size / 2) as f64;
    let offset = |i: usize| (i as f64 - half) * spacing;

    let mut ids: Vec<Vec<NodeId>> = Vec::with_capacity(size);
    for row in 0..size {
        let row_ids = (0..size)
            .map(|col| {
                let (east, north) = (offset(col), offset(row));
                let position = GeoPoint::new(
                    START.lat + north / METERS_PER_DEGREE_LAT,
                    START.lng + east / lng_scale,
                );
                builder.add_node((row * size + col) as i64, position, Some(elevation(east, north)))
            })
            .collect();
        ids.push(row_ids);
    }

    for row in 0..size {
        for col in 0..size {
            let (east, north) = (offset(col), offset(row));
            if col + 1 < size {
                let edge = NewEdge::between(ids[row][col], ids[row][col + 1])
                    .with_surface(surface(east, north, true));
                builder.add_edge(edge).unwrap();
            }
            if row + 1 < size {
                let edge = NewEdge::between(ids[row][col], ids[row + 1][col])
                    .with_surface(surface(east, north, false));
                builder.add_edge(edge).unwrap();
            }
        }
    }

    builder.build()
}

/// Flat grid with asphalt everywhere.
pub fn flat_grid(size: usize) -> RoadNetwork {
    create_grid(size, 100.0, |_, _| 50.0, |_, _, _| "asphalt")
}

/// Grid with a hill north-east of the start. Streets running east-west are
/// paved, those running north-south are gravel west of the start.
pub fn hilly_grid(size: usize) -> Terrain {
    let network = create_grid(
        size,
        100.0,
        |east, north| {
            let (dx, dy) = (east - 800.0, north - 800.0);
            50.0 + 60.0 * (-(dx * dx + dy * dy) / (2.0 * 600.0 * 600.0)).exp()
        },
        |east, _, east_west| {
            if east_west {
                "asphalt"
            } else if east < 0.0 {
                "gravel"
            } else {
                "paving_stones"
            }
        },
    );
    let elevations = network.node_elevations().collect();

    Terrain {
        network,
        elevations,
    }
}

pub fn params(leaf_count: usize, points_per_leaf: usize) -> PlannerParams {
    PlannerParams {
        leaf_count,
        points_per_leaf,
        threads: Threads::Multi(4),
        ..PlannerParams::default()
    }
}
