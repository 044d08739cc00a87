use crate::{error::PlannerError, surface::SurfaceTable};

#[derive(Clone, Debug)]
pub struct PlannerParams {
    /// Number of leaves in the flower, one per equally spaced direction.
    pub leaf_count: usize,
    /// Waypoints placed on the ring of each leaf.
    pub points_per_leaf: usize,
    /// Scales how far each leaf center is pushed away from the start.
    pub variance: f64,
    /// Share of `leaf_count` kept by the length pre-filter.
    pub survivor_fraction: f64,
    pub threads: Threads,
    pub surfaces: SurfaceTable,
}

#[derive(Clone, Debug)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            leaf_count: 64,
            points_per_leaf: 5,
            variance: 1.0,
            survivor_fraction: 0.5,
            threads: Threads::Auto,
            surfaces: SurfaceTable::default(),
        }
    }
}

impl PlannerParams {
    /// Number of candidates handed to the scorer, proportional to the leaf
    /// count rather than to how many candidates survived validation.
    pub fn survivor_count(&self) -> usize {
        ((self.leaf_count as f64 * self.survivor_fraction).round() as usize).max(1)
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.leaf_count == 0 {
            return Err(PlannerError::InvalidRequest(
                "leaf count must be at least 1".into(),
            ));
        }

        if self.points_per_leaf < 2 {
            return Err(PlannerError::InvalidRequest(format!(
                "points per leaf must be at least 2, got {}",
                self.points_per_leaf
            )));
        }

        if !self.variance.is_finite() || self.variance <= 0.0 {
            return Err(PlannerError::InvalidRequest(format!(
                "variance must be positive, got {}",
                self.variance
            )));
        }

        if !(self.survivor_fraction > 0.0 && self.survivor_fraction <= 1.0) {
            return Err(PlannerError::InvalidRequest(format!(
                "survivor fraction must be in (0, 1], got {}",
                self.survivor_fraction
            )));
        }

        Ok(())
    }
}
