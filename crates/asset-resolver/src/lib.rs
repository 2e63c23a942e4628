//! Critical Asset Resolution Pipeline
//!
//! Resolves the ranked list of at-risk critical infrastructure assets for
//! the hazard dashboard:
//!
//! ```text
//! LoadingZones -> LoadingCandidates -> Classifying -> Filtering -> Sorting
//! ```
//!
//! Zone loading and the Overpass candidate fetch are the only suspension
//! points; classification and ranking are pure CPU work delegated to
//! `risk-engine`. A failed stage aborts the whole resolution with a typed
//! error carrying the phase it failed in. Per-feature and per-candidate
//! defects are recovered locally by exclusion and never abort.
//!
//! Every resolution is independent: zones are loaded fresh, candidates are
//! re-fetched, nothing is cached, and dropping the future mid-fetch leaves
//! no shared state behind. Retry is a caller-level policy.

use risk_engine::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub mod catalog;
pub mod export;
pub mod overpass;
pub mod pipeline;
pub mod zones;

pub use overpass::OverpassClient;
pub use pipeline::{classify_candidates, resolve_assets};
pub use zones::ZoneStore;

/// Public Overpass API endpoint.
pub const OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// External fetch timeout in seconds, applied both to the HTTP client and
/// to the Overpass `[timeout:]` directive. Expiry is a fetch failure, not
/// a hang.
pub const FETCH_TIMEOUT_SECS: u64 = 25;

/// Geographic bounding box in degrees, `south < north`, `west < east`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Survey area for the Porto Alegre deployment.
    pub const PORTO_ALEGRE: BoundingBox = BoundingBox {
        south: -30.25,
        west: -51.30,
        north: -29.95,
        east: -51.05,
    };
}

/// Pipeline stage, reported on fatal errors and in stage logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPhase {
    LoadingZones,
    LoadingCandidates,
    Classifying,
    Filtering,
    Sorting,
}

impl fmt::Display for ResolutionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionPhase::LoadingZones => "loading-zones",
            ResolutionPhase::LoadingCandidates => "loading-candidates",
            ResolutionPhase::Classifying => "classifying",
            ResolutionPhase::Filtering => "filtering",
            ResolutionPhase::Sorting => "sorting",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    /// A hazard geometry source is unreachable or malformed. Fatal: no
    /// partial zone data is ever used.
    #[error("failed to load hazard zones from {path:?}: {cause}")]
    ZoneLoad { path: PathBuf, cause: String },

    /// The external point-of-interest query failed or timed out. Fatal:
    /// no fallback data is synthesized in its place.
    #[error("candidate fetch failed: {cause}")]
    CandidateFetch { cause: String },
}

impl ResolveError {
    /// Stage the resolution failed in.
    pub fn phase(&self) -> ResolutionPhase {
        match self {
            ResolveError::ZoneLoad { .. } => ResolutionPhase::LoadingZones,
            ResolveError::CandidateFetch { .. } => ResolutionPhase::LoadingCandidates,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Resolution policy knobs.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub bbox: BoundingBox,
    pub endpoint: String,
    pub timeout_secs: u64,
    /// An asset is operationally relevant when at least one hazard reaches
    /// this level. Policy, not business law: `low` keeps everything.
    pub min_qualifying_level: RiskLevel,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            bbox: BoundingBox::PORTO_ALEGRE,
            endpoint: OVERPASS_ENDPOINT.to_string(),
            timeout_secs: FETCH_TIMEOUT_SECS,
            min_qualifying_level: RiskLevel::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_phase_mapping() {
        let zone = ResolveError::ZoneLoad {
            path: PathBuf::from("data/zones/flood_high.geojson"),
            cause: "No such file".into(),
        };
        assert_eq!(zone.phase(), ResolutionPhase::LoadingZones);

        let fetch = ResolveError::CandidateFetch {
            cause: "timed out after 25s".into(),
        };
        assert_eq!(fetch.phase(), ResolutionPhase::LoadingCandidates);
    }

    #[test]
    fn default_config_policy() {
        let config = ResolverConfig::default();
        assert_eq!(config.min_qualifying_level, RiskLevel::Medium);
        assert_eq!(config.timeout_secs, 25);
        assert!(config.bbox.south < config.bbox.north);
        assert!(config.bbox.west < config.bbox.east);
    }
}
