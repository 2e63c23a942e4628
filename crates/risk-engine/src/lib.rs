//! Hazard Risk Classification Engine
//!
//! Classifies geographic points against flood and landslide hazard zone
//! polygons, maps open-data tag bags to a fixed asset taxonomy, and combines
//! per-hazard risk levels into a composite score used for ranking and
//! color-coding.
//!
//! # Classification Model
//!
//! ```text
//! composite(asset) = weight(flood) + weight(landslide)
//! ```
//!
//! | Level     | Weight | Color   |
//! |-----------|--------|---------|
//! | low       | 1      | #2A9D8F |
//! | medium    | 2      | #F4A261 |
//! | high      | 3      | #E76F51 |
//! | very-high | 4      | #7E22CE |
//!
//! Zone collections are checked in strict descending severity order; the
//! first polygon containment match wins. A point matching no zone at any
//! level classifies as `low` by design, never as an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod geometry;
pub mod rank;
pub mod state;
pub mod tags;

pub use geometry::{HazardZone, RiskZoneSet, ZoneCollection};
pub use rank::CompositeRisk;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("unknown risk level: {0}")]
    UnknownRiskLevel(String),
}

pub type Result<T> = std::result::Result<T, RiskError>;

/// A geographic point in degrees.
///
/// Hazard zone geometry is stored in GeoJSON `[lng, lat]` position order;
/// this type keeps the two axes named so the conversion at the containment
/// boundary stays explicit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validating constructor for externally-sourced coordinates.
    pub fn checked(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(RiskError::InvalidLatitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(RiskError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }
}

/// Discrete risk severity, totally ordered low < medium < high < very-high.
///
/// The order drives zone-check priority, list sorting, and color mapping.
/// `very-high` occurs only in the detailed landslide datasets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// All levels in descending severity, the order zone sets are checked.
    pub const DESCENDING: [RiskLevel; 4] = [
        RiskLevel::VeryHigh,
        RiskLevel::High,
        RiskLevel::Medium,
        RiskLevel::Low,
    ];

    /// Per-hazard weight in the composite score.
    pub fn weight(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
            RiskLevel::VeryHigh => 4,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }

    /// Map marker / legend color.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#2A9D8F",
            RiskLevel::Medium => "#F4A261",
            RiskLevel::High => "#E76F51",
            RiskLevel::VeryHigh => "#7E22CE",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very-high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "very-high" | "very_high" => Ok(RiskLevel::VeryHigh),
            other => Err(RiskError::UnknownRiskLevel(other.to_string())),
        }
    }
}

/// Hazard dimension a zone set covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    Flood,
    Landslide,
}

impl HazardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Flood => "flood",
            HazardKind::Landslide => "landslide",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed 7-way taxonomy for critical infrastructure assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Healthcare,
    Financial,
    Transportation,
    Cultural,
    Utility,
    Education,
    Other,
}

impl AssetType {
    /// Tie-break priority when composite scores are equal (higher first).
    pub fn priority(&self) -> u8 {
        match self {
            AssetType::Healthcare => 5,
            AssetType::Utility => 4,
            AssetType::Transportation => 3,
            AssetType::Education => 2,
            AssetType::Cultural => 1,
            AssetType::Financial | AssetType::Other => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetType::Healthcare => "Healthcare",
            AssetType::Financial => "Financial",
            AssetType::Transportation => "Transportation",
            AssetType::Cultural => "Cultural",
            AssetType::Utility => "Utility",
            AssetType::Education => "Education",
            AssetType::Other => "Other",
        }
    }
}

/// An unclassified point of interest sourced from an open geodata query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateEntity {
    /// Stable identifier (OSM element type and id, e.g. `node/240109189`).
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    /// Raw open-data tag bag.
    pub tags: HashMap<String, String>,
}

/// A candidate after risk classification and type resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedAsset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub flood_risk: RiskLevel,
    pub landslide_risk: RiskLevel,
    pub location: GeoPoint,
}

impl ClassifiedAsset {
    /// Composite risk, derived on demand and never stored.
    pub fn composite(&self) -> CompositeRisk {
        rank::aggregate(self.flood_risk, self.landslide_risk)
    }

    /// Worst exposure across both hazard dimensions.
    pub fn peak_risk(&self) -> RiskLevel {
        self.flood_risk.max(self.landslide_risk)
    }
}
