//! Hazard zone loading from GeoJSON files
//!
//! One FeatureCollection per (hazard type, risk level) combination, e.g.
//! `flood_high.geojson` or `landslide_very_high.geojson`. A missing or
//! unparseable file is fatal for the whole resolution; individual features
//! with bad geometry are skipped with a warning inside `risk-engine`.

use crate::{ResolveError, Result};
use geojson::FeatureCollection;
use risk_engine::{HazardKind, RiskLevel, RiskZoneSet, ZoneCollection};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Levels published per hazard. The detailed landslide survey adds a
/// very-high class the flood datasets do not have.
pub const FLOOD_LEVELS: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];
pub const LANDSLIDE_LEVELS: [RiskLevel; 4] = [
    RiskLevel::VeryHigh,
    RiskLevel::High,
    RiskLevel::Medium,
    RiskLevel::Low,
];

/// File name for one zone collection, e.g. `landslide_very_high.geojson`.
pub fn zone_file_name(kind: HazardKind, level: RiskLevel) -> String {
    format!("{}_{}.geojson", kind.as_str(), level.as_str().replace('-', "_"))
}

/// Immutable zone sets for both hazard dimensions, loaded once per
/// resolution.
#[derive(Debug, Clone)]
pub struct ZoneStore {
    pub flood: RiskZoneSet,
    pub landslide: RiskZoneSet,
}

impl ZoneStore {
    /// Load every expected zone file from `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        info!("loading hazard zones from {:?}", dir);

        let flood = load_zone_set(dir, HazardKind::Flood, &FLOOD_LEVELS)?;
        let landslide = load_zone_set(dir, HazardKind::Landslide, &LANDSLIDE_LEVELS)?;

        Ok(Self { flood, landslide })
    }
}

fn load_zone_set(dir: &Path, kind: HazardKind, levels: &[RiskLevel]) -> Result<RiskZoneSet> {
    let mut collections = Vec::with_capacity(levels.len());
    for &level in levels {
        collections.push(load_collection(dir.join(zone_file_name(kind, level)), level)?);
    }
    let set = RiskZoneSet::new(kind, collections);
    info!(
        hazard = %kind,
        zones = set
            .collections()
            .iter()
            .map(|c| c.zones.len())
            .sum::<usize>(),
        "loaded zone set"
    );
    Ok(set)
}

fn load_collection(path: impl AsRef<Path>, level: RiskLevel) -> Result<ZoneCollection> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ResolveError::ZoneLoad {
        path: path.to_path_buf(),
        cause: e.to_string(),
    })?;
    let collection: FeatureCollection =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ResolveError::ZoneLoad {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;
    Ok(ZoneCollection::from_feature_collection(level, &collection))
}
