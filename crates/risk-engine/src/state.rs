//! Dashboard UI state container
//!
//! Explicit state with a pure transition function over a tagged action
//! type. This is a consumer-side concern: nothing in the classification
//! pipeline reads it, and filtering of an already-classified list happens
//! here, not in the pipeline.

use crate::{GeoPoint, HazardKind, RiskLevel};
use serde::{Deserialize, Serialize};

/// Default map center (Porto Alegre) and zoom.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(-30.0346, -51.2177);
pub const DEFAULT_ZOOM: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    Neighborhoods,
    #[default]
    Assets,
    History,
}

/// Per-level and per-hazard visibility toggles. `very-high` shares the
/// high toggle, matching the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub show_high: bool,
    pub show_medium: bool,
    pub show_low: bool,
    pub show_flood: bool,
    pub show_landslide: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            show_high: true,
            show_medium: true,
            show_low: true,
            show_flood: true,
            show_landslide: true,
        }
    }
}

impl FilterState {
    pub fn shows_level(&self, level: RiskLevel) -> bool {
        match level {
            RiskLevel::High | RiskLevel::VeryHigh => self.show_high,
            RiskLevel::Medium => self.show_medium,
            RiskLevel::Low => self.show_low,
        }
    }

    pub fn shows_hazard(&self, kind: HazardKind) -> bool {
        match kind {
            HazardKind::Flood => self.show_flood,
            HazardKind::Landslide => self.show_landslide,
        }
    }
}

/// Selection of a specific entity in the side panel or on the map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Neighborhood(u32),
    Asset(String),
    Event(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardState {
    pub active_tab: ActiveTab,
    pub filters: FilterState,
    pub selection: Selection,
    pub map_view: MapView,
}

/// Tagged state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetActiveTab(ActiveTab),
    SetLevelVisible(RiskLevel, bool),
    SetHazardVisible(HazardKind, bool),
    ResetFilters,
    Select(Selection),
    ClearSelection,
    SetMapCenter(GeoPoint),
    SetMapZoom(u8),
}

/// Pure transition function: consumes the current state, returns the next.
pub fn reduce(mut state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::SetActiveTab(tab) => state.active_tab = tab,
        Action::SetLevelVisible(level, visible) => match level {
            RiskLevel::High | RiskLevel::VeryHigh => state.filters.show_high = visible,
            RiskLevel::Medium => state.filters.show_medium = visible,
            RiskLevel::Low => state.filters.show_low = visible,
        },
        Action::SetHazardVisible(kind, visible) => match kind {
            HazardKind::Flood => state.filters.show_flood = visible,
            HazardKind::Landslide => state.filters.show_landslide = visible,
        },
        Action::ResetFilters => state.filters = FilterState::default(),
        Action::Select(selection) => state.selection = selection,
        Action::ClearSelection => state.selection = Selection::None,
        Action::SetMapCenter(center) => state.map_view.center = center,
        Action::SetMapZoom(zoom) => state.map_view.zoom = zoom,
    }
    state
}
