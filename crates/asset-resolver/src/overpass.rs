//! Overpass API client for candidate entities
//!
//! Queries OpenStreetMap for critical infrastructure inside the survey
//! bounding box: healthcare, transportation, utility, education, financial
//! and cultural facilities. Ways and relations resolve through `out center`
//! to a centroid; elements without usable coordinates are dropped silently.
//!
//! A failed or timed-out query is fatal for the resolution. No fallback
//! candidate data is ever synthesized in its place.

use crate::{BoundingBox, ResolveError, Result};
use risk_engine::{tags, CandidateEntity, GeoPoint};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Queried category selectors, `(key, value)` pairs. Each is emitted for
/// nodes, ways and relations. The tag mapper owns the taxonomy; this list
/// only scopes the query.
const CATEGORY_SELECTORS: [(&str, &str); 14] = [
    ("amenity", "hospital"),
    ("amenity", "clinic"),
    ("public_transport", "station"),
    ("railway", "station"),
    ("aeroway", "aerodrome"),
    ("power", "plant"),
    ("power", "substation"),
    ("man_made", "water_tower"),
    ("man_made", "water_works"),
    ("amenity", "school"),
    ("amenity", "university"),
    ("amenity", "bank"),
    ("tourism", "museum"),
    ("amenity", "theatre"),
];

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OsmElement>,
}

#[derive(Debug, Deserialize)]
struct OsmElement {
    #[serde(rename = "type")]
    kind: String,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OsmCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OsmCenter {
    lat: f64,
    lon: f64,
}

impl OsmElement {
    /// Coordinates for a node directly, for ways and relations via the
    /// centroid. `None` when absent or out of range; such elements are
    /// dropped, not counted as results.
    fn location(&self) -> Option<GeoPoint> {
        let (lat, lon) = match self.kind.as_str() {
            "node" => (self.lat?, self.lon?),
            _ => {
                let center = self.center.as_ref()?;
                (center.lat, center.lon)
            }
        };
        GeoPoint::checked(lat, lon).ok()
    }
}

/// HTTP client for the Overpass interpreter endpoint.
pub struct OverpassClient {
    endpoint: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ResolveError::CandidateFetch {
                cause: format!("http client init: {e}"),
            })?;
        Ok(Self {
            endpoint: endpoint.into(),
            timeout_secs,
            client,
        })
    }

    /// Overpass QL query for all category selectors over the bounding box.
    pub fn build_query(&self, bbox: &BoundingBox) -> String {
        let bounds = format!(
            "({},{},{},{})",
            bbox.south, bbox.west, bbox.north, bbox.east
        );
        let mut query = format!("[out:json][timeout:{}];\n(\n", self.timeout_secs);
        for (key, value) in CATEGORY_SELECTORS {
            for element in ["node", "way", "relation"] {
                query.push_str(&format!("  {element}[\"{key}\"=\"{value}\"]{bounds};\n"));
            }
        }
        query.push_str(");\nout center;\n");
        query
    }

    /// Fetch candidate entities inside the bounding box.
    pub async fn fetch_candidates(&self, bbox: &BoundingBox) -> Result<Vec<CandidateEntity>> {
        let query = self.build_query(bbox);
        debug!(endpoint = %self.endpoint, "posting overpass query");

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| ResolveError::CandidateFetch {
                cause: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ResolveError::CandidateFetch {
                cause: format!("overpass returned status {}", response.status()),
            });
        }

        let body: OverpassResponse =
            response
                .json()
                .await
                .map_err(|e| ResolveError::CandidateFetch {
                    cause: format!("response decode: {e}"),
                })?;

        Ok(candidates_from_elements(body.elements))
    }
}

fn candidates_from_elements(elements: Vec<OsmElement>) -> Vec<CandidateEntity> {
    let total = elements.len();
    let candidates: Vec<CandidateEntity> = elements
        .into_iter()
        .filter_map(|element| {
            let location = element.location()?;
            Some(CandidateEntity {
                id: format!("{}/{}", element.kind, element.id),
                name: tags::display_name(&element.tags),
                location,
                tags: element.tags,
            })
        })
        .collect();

    info!(
        "fetched {} candidates ({} dropped for missing coords)",
        candidates.len(),
        total - candidates.len()
    );

    candidates
}
