//! GeoJSON export of a resolved asset list

use risk_engine::ClassifiedAsset;

/// Build a GeoJSON FeatureCollection from a resolved asset list, with
/// composite risk and display color in each feature's properties.
pub fn to_geojson(assets: &[ClassifiedAsset]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = assets
        .iter()
        .map(|asset| {
            let composite = asset.composite();
            serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [asset.location.lng, asset.location.lat]
                },
                "properties": {
                    "id": asset.id,
                    "name": asset.name,
                    "type": asset.asset_type,
                    "type_label": asset.asset_type.label(),
                    "flood_risk": asset.flood_risk,
                    "landslide_risk": asset.landslide_risk,
                    "composite_score": composite.score,
                    "composite_label": composite.label,
                    "color": asset.peak_risk().color(),
                }
            })
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
        "metadata": {
            "total": assets.len(),
            "generated_at": chrono::Utc::now().to_rfc3339(),
        }
    })
}
