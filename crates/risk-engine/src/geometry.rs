//! Point-in-polygon zone classification
//!
//! Implements the even-odd (ray casting) rule over GeoJSON Polygon and
//! MultiPolygon geometries. Crossing counts are XOR-ed across all rings of
//! a polygon, so a point inside a subtracted hole does not count as
//! contained. Zone collections are checked in descending severity order and
//! the first containment match wins.

use crate::{GeoPoint, HazardKind, RiskLevel};
use geojson::{Feature, FeatureCollection, Value};
use serde_json::Map;
use tracing::warn;

/// A polygon ring as GeoJSON positions, `[lng, lat]` order.
type Ring = Vec<[f64; 2]>;

/// One hazard zone feature: one or more polygons, each with an outer ring
/// and zero or more hole rings. Properties are opaque pass-through fields
/// for display (neighbourhood name, textual risk score, vulnerability,
/// suggested intervention, source citation).
#[derive(Debug, Clone)]
pub struct HazardZone {
    polygons: Vec<Vec<Ring>>,
    pub properties: Map<String, serde_json::Value>,
}

impl HazardZone {
    /// Extract a zone from a GeoJSON feature.
    ///
    /// Returns `None` for features with missing or non-areal geometry, or
    /// with malformed positions. The caller decides whether that is worth a
    /// warning; it is never fatal.
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        let geometry = feature.geometry.as_ref()?;
        let polygons = match &geometry.value {
            Value::Polygon(rings) => vec![convert_rings(rings)?],
            Value::MultiPolygon(polys) => polys
                .iter()
                .map(|rings| convert_rings(rings))
                .collect::<Option<Vec<_>>>()?,
            _ => return None,
        };
        if polygons.is_empty() {
            return None;
        }
        let properties = feature.properties.clone().unwrap_or_default();
        Some(Self {
            polygons,
            properties,
        })
    }

    /// True when the point falls inside any constituent polygon, holes
    /// excluded.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.polygons
            .iter()
            .any(|rings| point_in_polygon(point, rings))
    }

    /// Free-text risk score carried by the detailed landslide datasets
    /// (e.g. "Alto", "Muito alto"). Display-only.
    pub fn risk_text(&self) -> Option<&str> {
        self.properties.get("risco").and_then(|v| v.as_str())
    }
}

fn convert_rings(rings: &[Vec<Vec<f64>>]) -> Option<Vec<Ring>> {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|pos| match pos.as_slice() {
                    // GeoJSON position order is [lng, lat]; altitude ignored
                    [lng, lat, ..] => Some([*lng, *lat]),
                    _ => None,
                })
                .collect::<Option<Ring>>()
        })
        .collect()
}

/// Ray casting test of a point against a single ring.
///
/// Ring vertices are `[lng, lat]`; the query point swaps into that frame
/// here and nowhere else.
fn point_in_ring(point: GeoPoint, ring: &[[f64; 2]]) -> bool {
    let (px, py) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Even-odd containment over all rings of a polygon: an odd crossing count
/// means inside the outer ring and outside every hole.
fn point_in_polygon(point: GeoPoint, rings: &[Ring]) -> bool {
    rings
        .iter()
        .fold(false, |inside, ring| inside ^ point_in_ring(point, ring))
}

/// All zones carrying one risk level for one hazard.
#[derive(Debug, Clone)]
pub struct ZoneCollection {
    pub level: RiskLevel,
    pub zones: Vec<HazardZone>,
}

impl ZoneCollection {
    pub fn new(level: RiskLevel, zones: Vec<HazardZone>) -> Self {
        Self { level, zones }
    }

    /// Build from a parsed FeatureCollection, skipping malformed features.
    pub fn from_feature_collection(level: RiskLevel, collection: &FeatureCollection) -> Self {
        let total = collection.features.len();
        let zones: Vec<HazardZone> = collection
            .features
            .iter()
            .filter_map(HazardZone::from_feature)
            .collect();
        let skipped = total - zones.len();
        if skipped > 0 {
            warn!(
                level = %level,
                skipped,
                total,
                "skipped features with missing or invalid geometry"
            );
        }
        Self { level, zones }
    }

    fn contains(&self, point: GeoPoint) -> bool {
        self.zones.iter().any(|zone| zone.contains(point))
    }
}

/// Ordered zone collections for one hazard dimension.
///
/// Loaded once per resolution and read-only thereafter.
#[derive(Debug, Clone)]
pub struct RiskZoneSet {
    pub kind: HazardKind,
    collections: Vec<ZoneCollection>,
}

impl RiskZoneSet {
    /// Collections are re-ordered to strict descending severity so the
    /// first containment match is always the worst applicable level.
    pub fn new(kind: HazardKind, mut collections: Vec<ZoneCollection>) -> Self {
        collections.sort_by(|a, b| b.level.cmp(&a.level));
        Self { kind, collections }
    }

    /// A set with no zones; every point classifies as `low`.
    pub fn empty(kind: HazardKind) -> Self {
        Self {
            kind,
            collections: Vec::new(),
        }
    }

    pub fn collections(&self) -> &[ZoneCollection] {
        &self.collections
    }

    /// Classify a point: first containment match in descending severity
    /// order wins; no match at any level is `low` by design.
    pub fn classify(&self, point: GeoPoint) -> RiskLevel {
        for collection in &self.collections {
            if collection.contains(point) {
                return collection.level;
            }
        }
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Feature, GeoJson, Geometry};

    fn square(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Vec<Vec<Vec<f64>>> {
        vec![vec![
            vec![min_lng, min_lat],
            vec![max_lng, min_lat],
            vec![max_lng, max_lat],
            vec![min_lng, max_lat],
            vec![min_lng, min_lat],
        ]]
    }

    fn zone_from_polygon(rings: Vec<Vec<Vec<f64>>>) -> HazardZone {
        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(rings))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        HazardZone::from_feature(&feature).unwrap()
    }

    #[test]
    fn point_inside_square() {
        let zone = zone_from_polygon(square(-51.3, -30.2, -51.0, -30.0));
        assert!(zone.contains(GeoPoint::new(-30.1, -51.2)));
        assert!(!zone.contains(GeoPoint::new(-29.5, -51.2)));
    }

    #[test]
    fn lat_lng_axes_are_not_interchangeable() {
        // A square spanning lng [10, 11], lat [40, 41]. A point with the
        // axes swapped must land outside.
        let zone = zone_from_polygon(square(10.0, 40.0, 11.0, 41.0));
        assert!(zone.contains(GeoPoint::new(40.5, 10.5)));
        assert!(!zone.contains(GeoPoint::new(10.5, 40.5)));
    }

    #[test]
    fn hole_is_not_contained() {
        // Outer square with an inner hole ring.
        let mut rings = square(0.0, 0.0, 10.0, 10.0);
        rings.push(vec![
            vec![4.0, 4.0],
            vec![6.0, 4.0],
            vec![6.0, 6.0],
            vec![4.0, 6.0],
            vec![4.0, 4.0],
        ]);
        let zone = zone_from_polygon(rings);
        assert!(zone.contains(GeoPoint::new(2.0, 2.0)));
        assert!(!zone.contains(GeoPoint::new(5.0, 5.0)), "hole must not count");
    }

    #[test]
    fn multipolygon_matches_any_part() {
        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::MultiPolygon(vec![
                square(0.0, 0.0, 1.0, 1.0),
                square(5.0, 5.0, 6.0, 6.0),
            ]))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        let zone = HazardZone::from_feature(&feature).unwrap();
        assert!(zone.contains(GeoPoint::new(0.5, 0.5)));
        assert!(zone.contains(GeoPoint::new(5.5, 5.5)));
        assert!(!zone.contains(GeoPoint::new(3.0, 3.0)));
    }

    #[test]
    fn non_areal_geometry_is_rejected() {
        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![-51.2, -30.0]))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert!(HazardZone::from_feature(&feature).is_none());

        let no_geometry = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert!(HazardZone::from_feature(&no_geometry).is_none());
    }

    #[test]
    fn classify_prefers_highest_severity() {
        // Overlapping high and medium zones: high must win regardless of
        // the order collections were supplied in.
        let high = ZoneCollection::new(
            RiskLevel::High,
            vec![zone_from_polygon(square(0.0, 0.0, 10.0, 10.0))],
        );
        let medium = ZoneCollection::new(
            RiskLevel::Medium,
            vec![zone_from_polygon(square(0.0, 0.0, 20.0, 20.0))],
        );
        let set = RiskZoneSet::new(HazardKind::Landslide, vec![medium, high]);

        assert_eq!(set.classify(GeoPoint::new(5.0, 5.0)), RiskLevel::High);
        assert_eq!(set.classify(GeoPoint::new(15.0, 15.0)), RiskLevel::Medium);
    }

    #[test]
    fn classify_defaults_to_low_outside_everything() {
        let set = RiskZoneSet::new(
            HazardKind::Flood,
            vec![ZoneCollection::new(
                RiskLevel::High,
                vec![zone_from_polygon(square(0.0, 0.0, 1.0, 1.0))],
            )],
        );
        assert_eq!(set.classify(GeoPoint::new(50.0, 50.0)), RiskLevel::Low);
        assert_eq!(
            RiskZoneSet::empty(HazardKind::Flood).classify(GeoPoint::new(0.0, 0.0)),
            RiskLevel::Low
        );
    }

    #[test]
    fn feature_collection_skips_malformed_features() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                    },
                    "properties": {"risco": "Alto"}
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": {}
                }
            ]
        }"#;
        let collection = match json.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => fc,
            other => panic!("unexpected geojson: {:?}", other),
        };
        let zones = ZoneCollection::from_feature_collection(RiskLevel::High, &collection);
        assert_eq!(zones.zones.len(), 1);
        assert_eq!(zones.zones[0].risk_text(), Some("Alto"));
    }
}
