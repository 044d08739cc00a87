use petal_graph::{GeoPoint, NewEdge, NodeId, RoadNetwork, RoadNetworkBuilder};

pub const START: GeoPoint = GeoPoint {
    lat: 50.9662,
    lng: 5.8296,
};

const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Square grid centered on [`START`]. East-west streets are asphalt, north-south
/// streets are gravel and the terrain rises 1 m per 100 m northwards.
pub fn create_grid_network(rows: usize, cols: usize, spacing: f64) -> RoadNetwork {
    let mut builder = RoadNetworkBuilder::new();
    let lng_scale = METERS_PER_DEGREE_LAT * START.lat.to_radians().cos();

    let mut ids: Vec<Vec<NodeId>> = Vec::with_capacity(rows);
    for row in 0..rows {
        let north = (row as f64 - (rows / 2) as f64) * spacing;
        let mut row_ids = Vec::with_capacity(cols);
        for col in 0..cols {
            let east = (col as f64 - (cols / 2) as f64) * spacing;
            let position = GeoPoint::new(
                START.lat + north / METERS_PER_DEGREE_LAT,
                START.lng + east / lng_scale,
            );
            let external_id = (row * cols + col) as i64;
            row_ids.push(builder.add_node(external_id, position, Some(50.0 + north * 0.01)));
        }
        ids.push(row_ids);
    }

    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                builder
                    .add_edge(NewEdge::between(ids[row][col], ids[row][col + 1]).with_surface("asphalt"))
                    .unwrap();
            }
            if row + 1 < rows {
                builder
                    .add_edge(NewEdge::between(ids[row][col], ids[row + 1][col]).with_surface("gravel"))
                    .unwrap();
            }
        }
    }

    builder.build()
}
