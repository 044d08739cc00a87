use crate::{
    distance::{Distance, Meters},
    geopoint::GeoPoint,
};

pub fn compute_geometry_distance(geometry: &[GeoPoint]) -> Distance<Meters> {
    geometry
        .windows(2)
        .map(|pair| pair[0].haversine_distance(&pair[1]))
        .sum()
}
