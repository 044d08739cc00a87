use petal_graph::{Distance, GeoPoint, Meters};
use serde::{Deserialize, Serialize};

use crate::{error::PlannerError, score::ScoreTargets};

/// A loop starting and ending at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularRouteRequest {
    pub start: GeoPoint,
    /// Target loop length in meters.
    pub length: f64,
    /// Meters of climbing.
    #[serde(default)]
    pub elevation_gain: Option<f64>,
    /// Share of hardened surface in percent.
    #[serde(default)]
    pub hardened_percentage: Option<f64>,
    /// Steepest grade allowed, in percent.
    #[serde(default)]
    pub max_steepness: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointToPointRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

fn validate_point(name: &str, point: &GeoPoint) -> Result<(), PlannerError> {
    if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lng) {
        return Err(PlannerError::InvalidRequest(format!(
            "{name} ({}, {}) is not a valid coordinate",
            point.lat, point.lng
        )));
    }
    Ok(())
}

impl CircularRouteRequest {
    pub fn new(start: GeoPoint, length: f64) -> Self {
        CircularRouteRequest {
            start,
            length,
            elevation_gain: None,
            hardened_percentage: None,
            max_steepness: None,
        }
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        validate_point("start", &self.start)?;

        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(PlannerError::InvalidRequest(format!(
                "length must be positive, got {}",
                self.length
            )));
        }

        if let Some(gain) = self.elevation_gain
            && (!gain.is_finite() || gain < 0.0)
        {
            return Err(PlannerError::InvalidRequest(format!(
                "elevation gain must not be negative, got {gain}"
            )));
        }

        if let Some(percentage) = self.hardened_percentage
            && !(0.0..=100.0).contains(&percentage)
        {
            return Err(PlannerError::InvalidRequest(format!(
                "hardened percentage must be between 0 and 100, got {percentage}"
            )));
        }

        if let Some(steepness) = self.max_steepness
            && (!steepness.is_finite() || steepness <= 0.0)
        {
            return Err(PlannerError::InvalidRequest(format!(
                "max steepness must be positive, got {steepness}"
            )));
        }

        Ok(())
    }

    pub fn target_length(&self) -> Distance<Meters> {
        Distance::from(self.length)
    }

    pub fn targets(&self) -> ScoreTargets {
        ScoreTargets {
            length: self.target_length(),
            elevation_gain: self.elevation_gain,
            hardened_percentage: self.hardened_percentage,
            max_steepness: self.max_steepness,
        }
    }
}

impl PointToPointRequest {
    pub fn validate(&self) -> Result<(), PlannerError> {
        validate_point("start", &self.start)?;
        validate_point("end", &self.end)
    }
}
