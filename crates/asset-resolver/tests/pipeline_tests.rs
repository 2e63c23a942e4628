//! End-to-end pipeline tests over temp-dir zone fixtures.

use asset_resolver::zones::{zone_file_name, FLOOD_LEVELS, LANDSLIDE_LEVELS};
use asset_resolver::{classify_candidates, ZoneStore};
use risk_engine::{AssetType, CandidateEntity, GeoPoint, HazardKind, RiskLevel};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const EMPTY: &str = r#"{"type": "FeatureCollection", "features": []}"#;

fn polygon_collection(ring: &str) -> String {
    format!(
        r#"{{"type": "FeatureCollection", "features": [
            {{"type": "Feature", "properties": {{}},
              "geometry": {{"type": "Polygon", "coordinates": [{ring}]}}}}
        ]}}"#
    )
}

/// Square ring around the city center, [lng, lat] positions.
const CENTER_RING: &str =
    "[[-51.24, -30.06], [-51.19, -30.06], [-51.19, -30.01], [-51.24, -30.01], [-51.24, -30.06]]";

fn seed_zones(dir: &Path, overrides: &[(HazardKind, RiskLevel, String)]) {
    for level in FLOOD_LEVELS {
        fs::write(dir.join(zone_file_name(HazardKind::Flood, level)), EMPTY).unwrap();
    }
    for level in LANDSLIDE_LEVELS {
        fs::write(dir.join(zone_file_name(HazardKind::Landslide, level)), EMPTY).unwrap();
    }
    for (kind, level, body) in overrides {
        fs::write(dir.join(zone_file_name(*kind, *level)), body).unwrap();
    }
}

fn candidate(id: &str, lat: f64, lng: f64, tags: &[(&str, &str)]) -> CandidateEntity {
    let tags: HashMap<String, String> = tags
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    CandidateEntity {
        id: id.to_string(),
        name: risk_engine::tags::display_name(&tags),
        location: GeoPoint::new(lat, lng),
        tags,
    }
}

#[test]
fn hospital_in_flood_zone_scenario() {
    // One high-risk flood polygon containing P, a hospital at P, and no
    // landslide zone containing P.
    let dir = TempDir::new().unwrap();
    seed_zones(
        dir.path(),
        &[(
            HazardKind::Flood,
            RiskLevel::High,
            polygon_collection(CENTER_RING),
        )],
    );
    let store = ZoneStore::load_from_dir(dir.path()).unwrap();

    let candidates = vec![candidate(
        "node/1",
        -30.0389,
        -51.2097,
        &[("amenity", "hospital"), ("name", "Hospital de Clínicas")],
    )];
    let assets = classify_candidates(&store, candidates, RiskLevel::Medium);

    assert_eq!(assets.len(), 1);
    let asset = &assets[0];
    assert_eq!(asset.asset_type, AssetType::Healthcare);
    assert_eq!(asset.flood_risk, RiskLevel::High);
    assert_eq!(asset.landslide_risk, RiskLevel::Low);
    let composite = asset.composite();
    assert_eq!(composite.score, 4);
    assert_eq!(composite.label, "High Risk");
}

#[test]
fn low_exposure_candidates_are_excluded() {
    let dir = TempDir::new().unwrap();
    seed_zones(dir.path(), &[]);
    let store = ZoneStore::load_from_dir(dir.path()).unwrap();

    // No zones anywhere: everything classifies low/low.
    let candidates = vec![
        candidate("node/1", -30.03, -51.21, &[("amenity", "hospital")]),
        candidate("node/2", -30.04, -51.22, &[("amenity", "bank")]),
    ];
    let assets = classify_candidates(&store, candidates.clone(), RiskLevel::Medium);
    assert!(assets.is_empty(), "low/low assets must be dropped");

    // The threshold is policy: low keeps them.
    let assets = classify_candidates(&store, candidates, RiskLevel::Low);
    assert_eq!(assets.len(), 2);
}

#[test]
fn both_hazards_are_classified_independently() {
    let dir = TempDir::new().unwrap();
    seed_zones(
        dir.path(),
        &[
            (
                HazardKind::Flood,
                RiskLevel::Medium,
                polygon_collection(CENTER_RING),
            ),
            (
                HazardKind::Landslide,
                RiskLevel::VeryHigh,
                polygon_collection(CENTER_RING),
            ),
        ],
    );
    let store = ZoneStore::load_from_dir(dir.path()).unwrap();

    let assets = classify_candidates(
        &store,
        vec![candidate("node/1", -30.03, -51.21, &[("power", "substation")])],
        RiskLevel::Medium,
    );

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].flood_risk, RiskLevel::Medium);
    assert_eq!(assets[0].landslide_risk, RiskLevel::VeryHigh);
    assert_eq!(assets[0].composite().score, 6);
    assert_eq!(assets[0].composite().label, "Critical Risk");
}

#[test]
fn output_is_ranked_and_deterministic() {
    let dir = TempDir::new().unwrap();
    seed_zones(
        dir.path(),
        &[
            (
                HazardKind::Flood,
                RiskLevel::High,
                polygon_collection(CENTER_RING),
            ),
            (
                HazardKind::Landslide,
                RiskLevel::Medium,
                polygon_collection(CENTER_RING),
            ),
        ],
    );
    let store = ZoneStore::load_from_dir(dir.path()).unwrap();

    // All inside both zones (score 5); one bank outside everything.
    let candidates = vec![
        candidate("node/1", -30.03, -51.21, &[("tourism", "museum")]),
        candidate("node/2", -30.03, -51.22, &[("amenity", "hospital")]),
        candidate("node/3", -30.04, -51.21, &[("power", "plant")]),
        candidate("node/4", -29.50, -51.21, &[("amenity", "bank")]),
    ];

    let first = classify_candidates(&store, candidates.clone(), RiskLevel::Medium);
    let second = classify_candidates(&store, candidates, RiskLevel::Medium);

    // Identical ordered output on identical input: no hidden randomness.
    assert_eq!(first, second);

    // Equal composite scores rank by asset-type priority.
    let types: Vec<AssetType> = first.iter().map(|a| a.asset_type).collect();
    assert_eq!(
        types,
        vec![
            AssetType::Healthcare,
            AssetType::Utility,
            AssetType::Cultural
        ]
    );
}

#[test]
fn empty_result_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    seed_zones(dir.path(), &[]);
    let store = ZoneStore::load_from_dir(dir.path()).unwrap();

    let assets = classify_candidates(&store, Vec::new(), RiskLevel::Medium);
    assert!(assets.is_empty());
}
