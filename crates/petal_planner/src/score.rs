use std::{cmp::Ordering, collections::BTreeMap, iter, ops::Add};

use petal_graph::{Distance, GeoIndex, Meters};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{
    elevation::{ElevationProfile, ElevationProvider},
    surface::SurfaceTable,
    validator::ValidatedCandidate,
};

/// Deviation from the requested route. Lower is better.
#[derive(Debug, Copy, Clone, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub const ZERO: Score = Score(0.0);

    pub fn new(value: f64) -> Self {
        Score(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl Add<Score> for Score {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Score(self.0 + other.0)
    }
}

impl iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, score| acc + score)
    }
}

/// The terms that make up a candidate score. Absent terms were not requested.
#[derive(Default, Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ScoreAnalysis {
    pub elevation: Option<Score>,
    pub surface: Option<Score>,
    pub length: Option<Score>,
}

impl ScoreAnalysis {
    pub fn total_score(&self) -> Score {
        [self.elevation, self.surface, self.length]
            .into_iter()
            .flatten()
            .sum()
    }
}

/// What the rider asked for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreTargets {
    pub length: Distance<Meters>,
    /// Meters of climbing. Zero is treated as no target.
    pub elevation_gain: Option<f64>,
    /// Share of hardened surface in percent, 0 to 100.
    pub hardened_percentage: Option<f64>,
    /// Steepest grade allowed anywhere on the route, in percent.
    pub max_steepness: Option<f64>,
}

impl ScoreTargets {
    pub fn for_length(length: Distance<Meters>) -> Self {
        ScoreTargets {
            length,
            elevation_gain: None,
            hardened_percentage: None,
            max_steepness: None,
        }
    }

    fn elevation_target(&self) -> Option<f64> {
        self.elevation_gain.filter(|target| *target > 0.0)
    }

    /// Whether `inputs` has a segment steeper than the cap.
    pub fn exceeds_steepness(&self, inputs: &ScoreInputs) -> bool {
        match (self.max_steepness, inputs.max_grade) {
            (Some(cap), Some(grade)) => grade > cap,
            _ => false,
        }
    }

    /// Elevation deviation is a ratio of the target while surface deviation
    /// is in percentage points, and the two are summed unweighted. Without
    /// either target the relative length deviation is used instead.
    pub fn analyse(&self, inputs: &ScoreInputs) -> ScoreAnalysis {
        let elevation = self
            .elevation_target()
            .map(|target| Score::new((target - inputs.elevation_gain).abs() / target));

        let surface = self
            .hardened_percentage
            .map(|target| Score::new((target - inputs.hardened_fraction * 100.0).abs()));

        let length = match (elevation, surface) {
            (None, None) if !self.length.is_zero() => {
                Some(Score::new((inputs.length / self.length - 1.0).abs()))
            }
            _ => None,
        };

        ScoreAnalysis {
            elevation,
            surface,
            length,
        }
    }
}

/// Per-candidate measurements the score is computed from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreInputs {
    pub elevation_gain: f64,
    /// Hardened meters over total length, 0 to 1.
    pub hardened_fraction: f64,
    pub length: Distance<Meters>,
    /// Steepest grade in percent, `None` without elevation data.
    pub max_grade: Option<f64>,
}

/// Read-only collaborators needed to measure a candidate.
#[derive(Clone, Copy)]
pub struct ScoringContext<'a> {
    pub geo: &'a dyn GeoIndex,
    pub elevation: &'a dyn ElevationProvider,
    pub surfaces: &'a SurfaceTable,
}

impl ScoreInputs {
    pub fn measure(validated: &ValidatedCandidate, context: &ScoringContext) -> Self {
        let candidate = &validated.candidate;
        let profile = ElevationProfile::along_path(candidate.path(), context.geo, context.elevation);

        ScoreInputs {
            elevation_gain: profile.gain(),
            hardened_fraction: context
                .surfaces
                .hardened_fraction(&validated.edges, candidate.length()),
            length: candidate.length(),
            max_grade: profile.max_grade_percent(&validated.edges),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// Position in the validated candidate list.
    pub index: usize,
    pub score: Score,
    pub analysis: ScoreAnalysis,
}

/// Scores keyed by position in the validated candidate list.
pub type ScoreMap = BTreeMap<usize, ScoredCandidate>;

/// Scores the survivors of the length filter. Candidates steeper than the cap
/// are left out of the map entirely.
pub fn score_candidates(
    candidates: &[ValidatedCandidate],
    survivors: &[usize],
    targets: &ScoreTargets,
    context: &ScoringContext,
) -> ScoreMap {
    survivors
        .par_iter()
        .filter_map(|&index| {
            let validated = candidates.get(index)?;
            let inputs = ScoreInputs::measure(validated, context);

            if targets.exceeds_steepness(&inputs) {
                debug!(
                    candidate = validated.candidate.id(),
                    grade = inputs.max_grade,
                    "candidate too steep, excluded"
                );
                return None;
            }

            let analysis = targets.analyse(&inputs);
            Some((
                index,
                ScoredCandidate {
                    index,
                    score: analysis.total_score(),
                    analysis,
                },
            ))
        })
        .collect()
}
