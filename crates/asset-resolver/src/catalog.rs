//! Static reference dataset for the dashboard
//!
//! Neighborhoods with surveyed risk levels and the historical hazard event
//! record for the Porto Alegre deployment. Served for display alongside
//! live resolution results, never substituted for them.

use chrono::NaiveDate;
use risk_engine::{GeoPoint, HazardKind, RiskLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: u32,
    pub name: String,
    pub flood_risk: RiskLevel,
    pub landslide_risk: RiskLevel,
    pub population_at_risk: u32,
    pub location: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub id: u32,
    pub title: String,
    pub kind: HazardKind,
    pub date: NaiveDate,
    pub description: String,
    pub areas_affected: Vec<String>,
    pub location: GeoPoint,
}

fn neighborhood(
    id: u32,
    name: &str,
    flood: RiskLevel,
    landslide: RiskLevel,
    population: u32,
    lat: f64,
    lng: f64,
) -> Neighborhood {
    Neighborhood {
        id,
        name: name.to_string(),
        flood_risk: flood,
        landslide_risk: landslide,
        population_at_risk: population,
        location: GeoPoint::new(lat, lng),
    }
}

/// Surveyed neighborhoods, ordered by id.
pub fn neighborhoods() -> Vec<Neighborhood> {
    use RiskLevel::{High, Low, Medium};
    vec![
        neighborhood(1, "Centro Histórico", High, Medium, 48_500, -30.0346, -51.2177),
        neighborhood(2, "Cidade Baixa", High, Low, 23_700, -30.0413, -51.2227),
        neighborhood(3, "Menino Deus", Medium, Low, 32_100, -30.0542, -51.2211),
        neighborhood(4, "Bom Fim", Medium, Medium, 15_800, -30.0311, -51.2069),
        neighborhood(5, "Sarandi", High, Medium, 52_300, -29.9927, -51.1092),
        neighborhood(6, "Ipanema", Medium, Low, 18_400, -30.1362, -51.2121),
        neighborhood(7, "Moinhos de Vento", Low, Low, 9_200, -30.0256, -51.2034),
    ]
}

fn event(
    id: u32,
    title: &str,
    kind: HazardKind,
    date: (i32, u32, u32),
    description: &str,
    areas: &[&str],
    lat: f64,
    lng: f64,
) -> HistoricalEvent {
    HistoricalEvent {
        id,
        title: title.to_string(),
        kind,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
        description: description.to_string(),
        areas_affected: areas.iter().map(|a| a.to_string()).collect(),
        location: GeoPoint::new(lat, lng),
    }
}

/// Recorded hazard events, newest first.
pub fn historical_events() -> Vec<HistoricalEvent> {
    vec![
        event(
            1,
            "January 2023 Major Flooding",
            HazardKind::Flood,
            (2023, 1, 15),
            "Severe flooding in Centro Histórico and Cidade Baixa following intense rainfall. Affected approximately 32,000 residents.",
            &["Centro Histórico", "Cidade Baixa", "Menino Deus"],
            -30.0370,
            -51.2227,
        ),
        event(
            2,
            "March 2022 Landslide",
            HazardKind::Landslide,
            (2022, 3, 8),
            "Multiple landslides near Morro Santana following a week of persistent rain. Damaged infrastructure and roads.",
            &["Morro Santana", "Sarandi"],
            -29.9927,
            -51.1092,
        ),
        event(
            3,
            "November 2021 Flash Flood",
            HazardKind::Flood,
            (2021, 11, 25),
            "Flash flooding along Guaíba riverfront caused by sudden rainfall and river level rise. Damaged waterfront infrastructure.",
            &["Centro Histórico", "Cidade Baixa", "Menino Deus"],
            -30.0400,
            -51.2300,
        ),
        event(
            4,
            "July 2020 Storm Surge",
            HazardKind::Flood,
            (2020, 7, 12),
            "Storm surge along Guaíba Lake caused flooding in low-lying areas. Water levels rose 2.4 meters above normal.",
            &["Ipanema", "Centro Histórico"],
            -30.1362,
            -51.2121,
        ),
        event(
            5,
            "April 2020 Landslide",
            HazardKind::Landslide,
            (2020, 4, 3),
            "Moderate landslide in hillside areas following heavy rainfall. Some property damage reported.",
            &["Sarandi", "northern hillsides"],
            -29.9927,
            -51.1092,
        ),
        event(
            6,
            "October 2019 Heavy Rains",
            HazardKind::Flood,
            (2019, 10, 17),
            "Sustained heavy rainfall caused flooding in low-lying neighborhoods. Several streets made impassable.",
            &["Cidade Baixa", "Menino Deus", "Bom Fim"],
            -30.0413,
            -51.2227,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_ids_are_unique_and_ordered() {
        let hoods = neighborhoods();
        assert_eq!(hoods.len(), 7);
        for (i, hood) in hoods.iter().enumerate() {
            assert_eq!(hood.id, i as u32 + 1);
        }
    }

    #[test]
    fn events_are_newest_first() {
        let events = historical_events();
        assert_eq!(events.len(), 6);
        for pair in events.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn catalog_coordinates_are_in_range() {
        for hood in neighborhoods() {
            assert!(GeoPoint::checked(hood.location.lat, hood.location.lng).is_ok());
        }
        for event in historical_events() {
            assert!(GeoPoint::checked(event.location.lat, event.location.lng).is_ok());
        }
    }
}
