use petal_graph::GeoPoint;

/// Parses `"lat, lng"`.
pub fn parse_coordinates(input: &str) -> Result<GeoPoint, String> {
    let coordinates = input
        .split(',')
        .map(|coordinate| coordinate.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("Invalid coordinate in \"{input}\": {err}"))?;

    match coordinates.as_slice() {
        [lat, lng] => Ok(GeoPoint::new(*lat, *lng)),
        _ => Err(format!("Expected \"lat, lng\", got \"{input}\"")),
    }
}
