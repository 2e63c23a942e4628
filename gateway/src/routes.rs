use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::str::FromStr;

use crate::AppState;
use asset_resolver::{catalog, pipeline, ResolveError};
use risk_engine::{ClassifiedAsset, HazardKind, RiskLevel};

#[derive(Serialize)]
pub struct AssetInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: risk_engine::AssetType,
    pub flood_risk: RiskLevel,
    pub landslide_risk: RiskLevel,
    pub composite_score: u8,
    pub composite_label: &'static str,
    pub color: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&ClassifiedAsset> for AssetInfo {
    fn from(asset: &ClassifiedAsset) -> Self {
        let composite = asset.composite();
        Self {
            id: asset.id.clone(),
            name: asset.name.clone(),
            asset_type: asset.asset_type,
            flood_risk: asset.flood_risk,
            landslide_risk: asset.landslide_risk,
            composite_score: composite.score,
            composite_label: composite.label,
            color: asset.peak_risk().color(),
            latitude: asset.location.lat,
            longitude: asset.location.lng,
        }
    }
}

#[derive(Serialize)]
pub struct AssetsResponse {
    pub assets: Vec<AssetInfo>,
    pub total: usize,
    pub generated_at: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub phase: asset_resolver::ResolutionPhase,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn upstream_error(err: ResolveError) -> ApiError {
    tracing::error!("asset resolution failed: {err}");
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorBody {
            phase: err.phase(),
            error: err.to_string(),
        }),
    )
}

/// Run a full resolution. Fatal pipeline errors surface as 502 with the
/// failing phase; retry is the caller's affordance.
pub async fn resolve_assets(
    State(state): State<AppState>,
) -> Result<Json<AssetsResponse>, ApiError> {
    let assets = pipeline::resolve_assets(&state.config, state.zones_dir.as_path())
        .await
        .map_err(upstream_error)?;

    Ok(Json(AssetsResponse {
        total: assets.len(),
        assets: assets.iter().map(AssetInfo::from).collect(),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn list_neighborhoods(
    State(_state): State<AppState>,
) -> Json<Vec<catalog::Neighborhood>> {
    Json(catalog::neighborhoods())
}

pub async fn list_events(State(_state): State<AppState>) -> Json<Vec<catalog::HistoricalEvent>> {
    Json(catalog::historical_events())
}

/// Serve one raw zone FeatureCollection for map overlays, addressed as
/// `/zones/:hazard/:level` (e.g. `/zones/landslide/very-high`).
pub async fn zone_collection(
    State(state): State<AppState>,
    Path((hazard, level)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let kind = match hazard.as_str() {
        "flood" => HazardKind::Flood,
        "landslide" => HazardKind::Landslide,
        _ => return Err(StatusCode::NOT_FOUND),
    };
    let level = RiskLevel::from_str(&level).map_err(|_| StatusCode::NOT_FOUND)?;

    let path = state
        .zones_dir
        .join(asset_resolver::zones::zone_file_name(kind, level));
    let body = tokio::fs::read_to_string(&path).await.map_err(|e| {
        tracing::warn!("zone file {:?} unavailable: {e}", path);
        StatusCode::NOT_FOUND
    })?;
    let collection: serde_json::Value =
        serde_json::from_str(&body).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(collection))
}
