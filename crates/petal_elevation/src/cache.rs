use std::{
    hash::{Hash, Hasher},
    io::{BufWriter, Write},
    path::PathBuf,
};

use fxhash::FxHasher64;
use tracing::debug;

use crate::open_meteo::OpenMeteoError;

pub const CACHE_FOLDER_ENV_VAR: &str = "PETAL_CACHE_FOLDER";

fn hash_points<H, P>(points: &[P], hasher: &mut H)
where
    H: Hasher,
    for<'a> &'a P: Into<geo_types::Point>,
{
    points.len().hash(hasher);
    for point in points {
        let point = point.into();
        hasher.write_u64(point.x().to_bits());
        hasher.write_u64(point.y().to_bits());
    }
}

fn get_filename<P>(points: &[P]) -> String
where
    for<'a> &'a P: Into<geo_types::Point>,
{
    let mut hasher = FxHasher64::default();
    hash_points(points, &mut hasher);
    format!("{:016x}.json", hasher.finish())
}

/// Elevations stored as JSON files named after a hash of the requested points.
#[derive(Debug, Clone)]
pub struct ElevationCache {
    folder: PathBuf,
}

impl ElevationCache {
    pub fn new(folder: impl Into<PathBuf>) -> Result<Self, OpenMeteoError> {
        let folder = folder.into();
        if !folder.is_dir() {
            return Err(OpenMeteoError::CacheFolder(folder));
        }
        Ok(ElevationCache { folder })
    }

    /// Cache in the folder named by `PETAL_CACHE_FOLDER`, `None` if unset.
    pub fn from_env() -> Result<Option<Self>, OpenMeteoError> {
        match std::env::var(CACHE_FOLDER_ENV_VAR) {
            Ok(folder) => Self::new(folder).map(Some),
            Err(_) => Ok(None),
        }
    }

    pub fn get<P>(&self, points: &[P]) -> Result<Option<Vec<f64>>, OpenMeteoError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let file_path = self.folder.join(get_filename(points));

        if !file_path.is_file() {
            return Ok(None);
        }

        let file = std::fs::File::open(&file_path)?;
        let elevations: Vec<f64> = serde_json::from_reader(file)?;
        debug!(path = %file_path.display(), "elevations read from cache");

        Ok(Some(elevations))
    }

    pub fn store<P>(&self, points: &[P], elevations: &[f64]) -> Result<(), OpenMeteoError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let file = std::fs::File::create(self.folder.join(get_filename(points)))?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        serde_json::to_writer(&mut writer, elevations)?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use petal_graph::GeoPoint;

    use super::*;

    fn scratch_folder(name: &str) -> PathBuf {
        let folder = std::env::temp_dir().join(format!("petal-cache-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&folder);
        std::fs::create_dir_all(&folder).unwrap();
        folder
    }

    #[test]
    fn filename_depends_on_points() {
        let a = [GeoPoint::new(50.0, 5.0), GeoPoint::new(50.1, 5.1)];
        let b = [GeoPoint::new(50.1, 5.1), GeoPoint::new(50.0, 5.0)];

        assert_eq!(get_filename(&a), get_filename(&a));
        assert_ne!(get_filename(&a), get_filename(&b));
        assert!(get_filename(&a).ends_with(".json"));
    }

    #[test]
    fn stores_and_reads_elevations() {
        let cache = ElevationCache::new(scratch_folder("roundtrip")).unwrap();
        let points = [GeoPoint::new(50.9662, 5.8296), GeoPoint::new(50.97, 5.83)];

        assert_eq!(cache.get(&points).unwrap(), None);

        cache.store(&points, &[61.0, 64.5]).unwrap();
        assert_eq!(cache.get(&points).unwrap(), Some(vec![61.0, 64.5]));
    }

    #[test]
    fn rejects_missing_folder() {
        let missing = std::env::temp_dir().join("petal-cache-does-not-exist-7f3a");
        assert!(matches!(
            ElevationCache::new(missing),
            Err(OpenMeteoError::CacheFolder(_))
        ));
    }
}
