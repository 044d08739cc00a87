use fxhash::FxHashMap;
use petal_graph::{EdgeAttributes, GeoIndex, GeoPoint, NodeId};
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElevationError {
    #[error("No elevation sample available at ({lat}, {lng})")]
    SampleUnavailable { lat: f64, lng: f64 },
}

impl ElevationError {
    pub fn unavailable(point: &GeoPoint) -> Self {
        ElevationError::SampleUnavailable {
            lat: point.lat,
            lng: point.lng,
        }
    }
}

/// Elevation in meters at a coordinate. A failure only means this one sample
/// is skipped.
pub trait ElevationProvider: Sync {
    fn elevation(&self, point: &GeoPoint) -> Result<f64, ElevationError>;
}

/// Provider without any data: every lookup is unavailable.
pub struct NoElevation;

impl ElevationProvider for NoElevation {
    fn elevation(&self, point: &GeoPoint) -> Result<f64, ElevationError> {
        Err(ElevationError::unavailable(point))
    }
}

/// Exact-coordinate lookup table, filled from a network file or a prefetch.
#[derive(Default, Debug, Clone)]
pub struct SampledElevations {
    samples: FxHashMap<(u64, u64), f64>,
}

fn sample_key(point: &GeoPoint) -> (u64, u64) {
    (point.lat.to_bits(), point.lng.to_bits())
}

impl SampledElevations {
    pub fn insert(&mut self, point: &GeoPoint, elevation: f64) {
        self.samples.insert(sample_key(point), elevation);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromIterator<(GeoPoint, f64)> for SampledElevations {
    fn from_iter<I: IntoIterator<Item = (GeoPoint, f64)>>(iter: I) -> Self {
        let mut elevations = SampledElevations::default();
        for (point, elevation) in iter {
            elevations.insert(&point, elevation);
        }
        elevations
    }
}

impl ElevationProvider for SampledElevations {
    fn elevation(&self, point: &GeoPoint) -> Result<f64, ElevationError> {
        self.samples
            .get(&sample_key(point))
            .copied()
            .ok_or_else(|| ElevationError::unavailable(point))
    }
}

fn lookup(provider: &dyn ElevationProvider, position: &GeoPoint) -> Option<f64> {
    match provider.elevation(position) {
        Ok(elevation) => Some(elevation),
        Err(err) => {
            trace!(%err, "skipping elevation sample");
            None
        }
    }
}

/// Per-node elevation samples along a path, `None` where the lookup failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationProfile {
    samples: Vec<Option<f64>>,
}

impl ElevationProfile {
    /// One sample per node of `path`, in path order.
    pub fn along_path(
        path: &[NodeId],
        geo: &dyn GeoIndex,
        provider: &dyn ElevationProvider,
    ) -> Self {
        let samples = path
            .iter()
            .map(|&node| lookup(provider, &geo.node_position(node)?))
            .collect();

        ElevationProfile { samples }
    }

    pub fn from_samples(samples: Vec<Option<f64>>) -> Self {
        ElevationProfile { samples }
    }

    pub fn samples(&self) -> &[Option<f64>] {
        &self.samples
    }

    pub fn available(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().flatten().copied()
    }

    /// Sum of positive deltas between consecutive available samples.
    pub fn gain(&self) -> f64 {
        let mut previous: Option<f64> = None;
        let mut gain = 0.0;

        for elevation in self.available() {
            if let Some(previous) = previous {
                let delta = elevation - previous;
                if delta > 0.0 {
                    gain += delta;
                }
            }
            previous = Some(elevation);
        }

        gain
    }

    /// Steepest absolute grade in percent over the traversed edges. `edges[i]`
    /// joins sample `i` and `i + 1`; pairs missing a sample are ignored.
    pub fn max_grade_percent(&self, edges: &[EdgeAttributes]) -> Option<f64> {
        edges
            .iter()
            .enumerate()
            .filter_map(|(i, edge)| {
                let start = (*self.samples.get(i)?)?;
                let end = (*self.samples.get(i + 1)?)?;
                let run = edge.length.value();
                if run <= 0.0 {
                    return None;
                }
                Some((end - start).abs() / run * 100.0)
            })
            .max_by(f64::total_cmp)
    }
}
