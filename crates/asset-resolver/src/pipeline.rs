//! Resolution pipeline orchestration
//!
//! Sequential async stages over the two I/O boundaries (zone load,
//! candidate fetch), then pure classification, filtering and sorting. The
//! CPU-bound part lives in [`classify_candidates`] so it stays testable
//! without any network or filesystem.

use crate::{OverpassClient, ResolutionPhase, ResolverConfig, Result, ZoneStore};
use risk_engine::{rank, tags, CandidateEntity, ClassifiedAsset, RiskLevel};
use std::path::Path;
use tracing::info;

/// Run a full resolution: load zones, fetch candidates, classify, filter,
/// sort. An empty list is a valid, non-error result.
pub async fn resolve_assets(
    config: &ResolverConfig,
    zones_dir: impl AsRef<Path>,
) -> Result<Vec<ClassifiedAsset>> {
    info!(phase = %ResolutionPhase::LoadingZones, "resolution started");
    let store = ZoneStore::load_from_dir(zones_dir)?;

    info!(phase = %ResolutionPhase::LoadingCandidates, "zones ready");
    let client = OverpassClient::new(&config.endpoint, config.timeout_secs)?;
    let candidates = client.fetch_candidates(&config.bbox).await?;

    let assets = classify_candidates(&store, candidates, config.min_qualifying_level);
    info!("resolution finished with {} qualifying assets", assets.len());
    Ok(assets)
}

/// Classify, filter and rank candidates against loaded zone sets.
///
/// Both hazard dimensions are classified with the same rigor against their
/// real zone sets. Candidates whose worst exposure stays below
/// `min_qualifying_level` are dropped; survivors are sorted into the
/// canonical severity order. Deterministic for identical inputs.
pub fn classify_candidates(
    store: &ZoneStore,
    candidates: Vec<CandidateEntity>,
    min_qualifying_level: RiskLevel,
) -> Vec<ClassifiedAsset> {
    info!(
        phase = %ResolutionPhase::Classifying,
        candidates = candidates.len(),
        "classifying candidates"
    );
    let mut assets: Vec<ClassifiedAsset> = candidates
        .into_iter()
        .map(|candidate| ClassifiedAsset {
            asset_type: tags::map_tags(&candidate.tags),
            flood_risk: store.flood.classify(candidate.location),
            landslide_risk: store.landslide.classify(candidate.location),
            id: candidate.id,
            name: candidate.name,
            location: candidate.location,
        })
        .collect();

    info!(phase = %ResolutionPhase::Filtering, threshold = %min_qualifying_level, "applying exposure threshold");
    assets.retain(|asset| asset.peak_risk() >= min_qualifying_level);

    info!(phase = %ResolutionPhase::Sorting, qualifying = assets.len(), "ranking");
    rank::sort_by_severity(&mut assets);
    assets
}
