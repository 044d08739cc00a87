use std::{io, path::PathBuf};

use petal_graph::GeoPoint;
use petal_planner::SampledElevations;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::ElevationCache;

pub const OPEN_METEO_ELEVATION_API_URL: &str = "https://api.open-meteo.com/v1/elevation";

/// Open-Meteo accepts at most this many coordinates per request.
pub const MAX_POINTS_PER_REQUEST: usize = 100;

#[derive(Debug, Error)]
pub enum OpenMeteoError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Expected {expected} elevations, received {received}")]
    CountMismatch { expected: usize, received: usize },

    #[error("Cache folder {0} is not a directory")]
    CacheFolder(PathBuf),

    #[error("Cache I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ElevationResponse {
    elevation: Vec<f64>,
}

pub struct OpenMeteoClientParams {
    pub base_url: String,
    pub batch_size: usize,
    pub cache: Option<ElevationCache>,
}

impl Default for OpenMeteoClientParams {
    fn default() -> Self {
        OpenMeteoClientParams {
            base_url: OPEN_METEO_ELEVATION_API_URL.to_string(),
            batch_size: MAX_POINTS_PER_REQUEST,
            cache: None,
        }
    }
}

pub struct OpenMeteoClient {
    params: OpenMeteoClientParams,
    client: reqwest::Client,
}

/// Comma separated latitudes and longitudes, in point order.
fn coordinate_query(points: &[GeoPoint]) -> [(&'static str, String); 2] {
    let join = |value: fn(&GeoPoint) -> f64| {
        points
            .iter()
            .map(|point| value(point).to_string())
            .collect::<Vec<_>>()
            .join(",")
    };

    [("latitude", join(GeoPoint::lat)), ("longitude", join(GeoPoint::lng))]
}

impl OpenMeteoClient {
    pub fn new(params: OpenMeteoClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// One elevation per point, in point order. Served from the cache when
    /// the same points were fetched before.
    pub async fn fetch_elevations(&self, points: &[GeoPoint]) -> Result<Vec<f64>, OpenMeteoError> {
        if let Some(cache) = &self.params.cache
            && let Some(elevations) = cache.get(points)?
            && elevations.len() == points.len()
        {
            debug!(points = points.len(), "OpenMeteo: using cached elevations");
            return Ok(elevations);
        }

        let mut elevations = Vec::with_capacity(points.len());
        let batch_size = self.params.batch_size.clamp(1, MAX_POINTS_PER_REQUEST);

        for (batch, chunk) in points.chunks(batch_size).enumerate() {
            debug!(batch, points = chunk.len(), "OpenMeteo: requesting elevations");
            elevations.extend(self.request_batch(chunk).await?);
        }

        if let Some(cache) = &self.params.cache
            && let Err(err) = cache.store(points, &elevations)
        {
            warn!(%err, "OpenMeteo: failed to cache elevations");
        }

        info!(points = points.len(), "OpenMeteo: fetched elevations");
        Ok(elevations)
    }

    /// Elevation table for `points`, ready to be used as an elevation provider.
    pub async fn fetch_sampled(&self, points: &[GeoPoint]) -> Result<SampledElevations, OpenMeteoError> {
        let elevations = self.fetch_elevations(points).await?;
        Ok(points.iter().copied().zip(elevations).collect())
    }

    async fn request_batch(&self, points: &[GeoPoint]) -> Result<Vec<f64>, OpenMeteoError> {
        let response = self
            .client
            .get(&self.params.base_url)
            .query(&coordinate_query(points))
            .send()
            .await?;

        let elevations = handle_response(response).await?.elevation;

        if elevations.len() != points.len() {
            return Err(OpenMeteoError::CountMismatch {
                expected: points.len(),
                received: elevations.len(),
            });
        }

        Ok(elevations)
    }
}

async fn handle_response(response: reqwest::Response) -> Result<ElevationResponse, OpenMeteoError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(OpenMeteoError::Api { status, message })
    }
}
