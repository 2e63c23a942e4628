//! Composite risk aggregation and canonical ordering
//!
//! Combines the two independent hazard levels into a single score and
//! label, and defines the total order used everywhere a classified list is
//! sorted or color-ranked:
//!
//! ```text
//! score = weight(flood) + weight(landslide)        range [2, 8]
//! ```
//!
//! Primary sort key is the score (descending); ties break on the fixed
//! asset-type priority (descending). Labels are threshold based and
//! open-ended at the top, so the very-high weight extension changes no
//! label below Critical.

use crate::{ClassifiedAsset, RiskLevel};
use serde::Serialize;
use std::cmp::Ordering;

/// Derived composite risk; computed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompositeRisk {
    pub score: u8,
    pub label: &'static str,
}

/// Combine per-hazard risk levels into a composite score and label.
pub fn aggregate(flood: RiskLevel, landslide: RiskLevel) -> CompositeRisk {
    let score = flood.weight() + landslide.weight();
    let label = match score {
        s if s >= 6 => "Critical Risk",
        5 => "Severe Risk",
        4 => "High Risk",
        3 => "Moderate Risk",
        _ => "Low Risk",
    };
    CompositeRisk { score, label }
}

/// Canonical ordering: composite score descending, then asset-type
/// priority descending. Deterministic for equal keys only up to input
/// order; a stable sort preserves it.
pub fn severity_cmp(a: &ClassifiedAsset, b: &ClassifiedAsset) -> Ordering {
    b.composite()
        .score
        .cmp(&a.composite().score)
        .then_with(|| b.asset_type.priority().cmp(&a.asset_type.priority()))
}

/// Sort a classified list into the canonical display order.
pub fn sort_by_severity(assets: &mut [ClassifiedAsset]) {
    assets.sort_by(severity_cmp);
}
