use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{
    constants::EARTH_RADIUS_METERS,
    distance::{Distance, Meters},
};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn haversine_distance(&self, other: &GeoPoint) -> Distance<Meters> {
        Distance::from(haversine_distance(self.lat, self.lng, other.lat, other.lng))
    }

    /// Web Mercator coordinates in meters, used to index points in a planar R-tree.
    pub fn project(&self) -> [f64; 2] {
        let lat_rad = self.lat.to_radians();
        let lng_rad = self.lng.to_radians();
        let x = EARTH_RADIUS_METERS * lng_rad;
        let y = EARTH_RADIUS_METERS * (lat_rad / 2.0 + PI / 4.0).tan().ln();
        [x, y]
    }
}

impl From<&GeoPoint> for geo_types::Point {
    fn from(value: &GeoPoint) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lon1_rad = lon1.to_radians();
    let lat2_rad = lat2.to_radians();
    let lon2_rad = lon2.to_radians();

    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = lon2_rad - lon1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_of_one_degree_latitude() {
        let a = GeoPoint::new(50.0, 5.0);
        let b = GeoPoint::new(51.0, 5.0);
        let distance = a.haversine_distance(&b).value();
        assert!((distance - 111_195.0).abs() < 10.0, "got {distance}");
    }

    #[test]
    fn haversine_is_zero_for_same_point() {
        let a = GeoPoint::new(50.9662, 5.8296);
        assert!(a.haversine_distance(&a).is_zero());
    }

    #[test]
    fn projection_preserves_ordering_along_axes() {
        let origin = GeoPoint::new(50.0, 5.0).project();
        let north = GeoPoint::new(50.001, 5.0).project();
        let east = GeoPoint::new(50.0, 5.001).project();
        assert!(north[1] > origin[1]);
        assert!(east[0] > origin[0]);
    }

    #[test]
    fn converts_to_geo_types_point() {
        let point: geo_types::Point = (&GeoPoint::new(50.5, 5.5)).into();
        assert_eq!(point.x(), 5.5);
        assert_eq!(point.y(), 50.5);
    }
}
