use std::collections::BTreeMap;

use petal_graph::{Distance, EdgeAttributes, Meters};
use serde::Serialize;

pub const UNKNOWN_SURFACE: &str = "unknown";

const DEFAULT_HARDENED: &[&str] = &[
    "paved",
    "asphalt",
    "chipseal",
    "concrete",
    "concrete:lanes",
    "concrete:plates",
    "paving_stones",
    "paving_stones:lanes",
    "sett",
    "unhewn_cobblestone",
    "cobblestone",
    "bricks",
    "metal",
    "wood",
];

const DEFAULT_UNHARDENED: &[&str] = &[
    "unpaved",
    "compacted",
    "fine_gravel",
    "gravel",
    "shells",
    "rock",
    "pebblestone",
    "ground",
    "dirt",
    "earth",
    "grass",
    "grass_paver",
    "mud",
    "sand",
    "woodchips",
    "snow",
    "ice",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceClass {
    Hardened,
    Unhardened,
    Unknown,
}

/// OSM `surface` values considered paved or firm, and those considered loose.
#[derive(Debug, Clone)]
pub struct SurfaceTable {
    pub hardened: Vec<String>,
    pub unhardened: Vec<String>,
}

impl Default for SurfaceTable {
    fn default() -> Self {
        SurfaceTable {
            hardened: DEFAULT_HARDENED.iter().map(|s| s.to_string()).collect(),
            unhardened: DEFAULT_UNHARDENED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SurfaceTable {
    pub fn classify(&self, surface: Option<&str>) -> SurfaceClass {
        match surface {
            Some(surface) if self.hardened.iter().any(|s| s == surface) => SurfaceClass::Hardened,
            Some(surface) if self.unhardened.iter().any(|s| s == surface) => {
                SurfaceClass::Unhardened
            }
            _ => SurfaceClass::Unknown,
        }
    }

    pub fn is_hardened(&self, surface: Option<&str>) -> bool {
        self.classify(surface) == SurfaceClass::Hardened
    }

    /// Meters on hardened edges divided by `length`. Zero for an empty route.
    pub fn hardened_fraction(&self, edges: &[EdgeAttributes], length: Distance<Meters>) -> f64 {
        if length.is_zero() {
            return 0.0;
        }

        let hardened: Distance<Meters> = edges
            .iter()
            .filter(|edge| self.is_hardened(edge.surface.as_deref()))
            .map(|edge| edge.length)
            .sum();

        hardened / length
    }
}

/// Kilometers per surface tag, rounded to two decimals. Edges without a tag
/// are reported under [`UNKNOWN_SURFACE`].
pub fn surface_distribution(edges: &[EdgeAttributes]) -> BTreeMap<String, f64> {
    let mut meters: BTreeMap<String, Distance<Meters>> = BTreeMap::new();

    for edge in edges {
        let surface = edge.surface.as_deref().unwrap_or(UNKNOWN_SURFACE);
        *meters.entry(surface.to_owned()).or_insert(Distance::ZERO) += edge.length;
    }

    meters
        .into_iter()
        .map(|(surface, length)| {
            let kilometers = length.value() / 1000.0;
            (surface, (kilometers * 100.0).round() / 100.0)
        })
        .collect()
}
