//! Open-data tag taxonomy mapping
//!
//! Maps raw OSM-style tag bags to the fixed asset taxonomy with ordered
//! first-match-wins rules: healthcare, financial, transportation, cultural,
//! utility, education, then the `other` catch-all. A bag matching several
//! rules resolves to the first in this order, so the mapping is total and
//! deterministic over all inputs.

use crate::AssetType;
use std::collections::HashMap;

fn tag_is(tags: &HashMap<String, String>, key: &str, value: &str) -> bool {
    tags.get(key).map(String::as_str) == Some(value)
}

fn tag_is_any(tags: &HashMap<String, String>, key: &str, values: &[&str]) -> bool {
    values.iter().any(|v| tag_is(tags, key, v))
}

/// Resolve a tag bag to an asset type. Never fails; unmatched bags are
/// `Other`.
pub fn map_tags(tags: &HashMap<String, String>) -> AssetType {
    if tag_is_any(tags, "amenity", &["hospital", "clinic"]) || tags.contains_key("healthcare") {
        return AssetType::Healthcare;
    }
    if tag_is(tags, "amenity", "bank") || tag_is(tags, "office", "financial") {
        return AssetType::Financial;
    }
    if tag_is(tags, "amenity", "bus_station")
        || tag_is(tags, "public_transport", "station")
        || tag_is(tags, "railway", "station")
        || tag_is(tags, "aeroway", "aerodrome")
        || tag_is(tags, "highway", "bus_stop")
    {
        return AssetType::Transportation;
    }
    if tag_is_any(tags, "amenity", &["theatre", "cinema"])
        || tag_is(tags, "tourism", "museum")
        || tags.contains_key("historic")
    {
        return AssetType::Cultural;
    }
    if tag_is_any(tags, "power", &["plant", "substation"])
        || tag_is_any(tags, "man_made", &["water_tower", "water_works"])
    {
        return AssetType::Utility;
    }
    if tag_is_any(tags, "amenity", &["school", "university", "college"]) {
        return AssetType::Education;
    }
    AssetType::Other
}

/// Display name for an entity: explicit name first, then localized
/// variants, then a fixed fallback.
pub fn display_name(tags: &HashMap<String, String>) -> String {
    tags.get("name")
        .or_else(|| tags.get("name:en"))
        .or_else(|| tags.get("name:pt"))
        .cloned()
        .unwrap_or_else(|| "Unnamed Asset".to_string())
}
