//! Free-text location lookup
//!
//! A query is normalized and then matched as a case-insensitive substring of
//! each record's `location` or `area`. Matching is deliberately loose: one
//! hit resolves, several hits are reported back as candidates.

use crate::error::{AnalysisError, Result};
use crate::metrics::PriceRank;
use crate::model::{DerivedMetrics, LocationRecord, ScoredLocation};
use crate::store::RecordStore;
use serde::Serialize;
use tracing::debug;

/// Outcome of matching a query against the store
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a ScoredLocation),
    /// Candidate location names, in store order
    Ambiguous(Vec<String>),
    NotFound,
}

/// Strip everything but ASCII letters, digits, commas and whitespace, collapse
/// whitespace runs, and lowercase
pub fn normalize(query: &str) -> String {
    let kept: String = query
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ',' || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Match a query against every record
pub fn find<'a>(store: &'a RecordStore, query: &str) -> Result<Resolution<'a>> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Err(AnalysisError::EmptyQuery);
    }

    let matches: Vec<&ScoredLocation> = store
        .locations()
        .iter()
        .filter(|l| {
            l.record.location.to_lowercase().contains(&needle)
                || l.record.area.to_lowercase().contains(&needle)
        })
        .collect();

    debug!(query = %needle, matches = matches.len(), "Location lookup");

    Ok(match matches.as_slice() {
        [] => Resolution::NotFound,
        [single] => Resolution::Found(*single),
        many => Resolution::Ambiguous(many.iter().map(|l| l.record.location.clone()).collect()),
    })
}

/// Match a query that must identify exactly one record
pub fn resolve<'a>(store: &'a RecordStore, query: &str) -> Result<&'a ScoredLocation> {
    match find(store, query)? {
        Resolution::Found(location) => Ok(location),
        Resolution::Ambiguous(candidates) => Err(AnalysisError::Ambiguous {
            query: query.to_string(),
            candidates,
        }),
        Resolution::NotFound => Err(AnalysisError::NotFound {
            query: query.to_string(),
        }),
    }
}

/// Derived metrics plus store-relative context for one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMetrics {
    #[serde(flatten)]
    pub derived: DerivedMetrics,
    pub population_density: Option<f64>,
    pub price_per_sqft_rank: PriceRank,
}

/// Everything known about a single location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationProfile {
    #[serde(flatten)]
    pub record: LocationRecord,
    pub calculated_metrics: ProfileMetrics,
}

impl LocationProfile {
    pub fn build(store: &RecordStore, location: &ScoredLocation) -> Self {
        Self {
            record: location.record.clone(),
            calculated_metrics: ProfileMetrics {
                derived: location.metrics,
                population_density: location.record.population_density,
                price_per_sqft_rank: store.price_rank(location.record.avg_price_per_sqft),
            },
        }
    }
}

pub fn profile(store: &RecordStore, query: &str) -> Result<LocationProfile> {
    let location = resolve(store, query)?;
    Ok(LocationProfile::build(store, location))
}

/// One line of the location directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSummary {
    pub location: String,
    pub city: String,
    pub area: String,
    pub avg_price_per_sqft: f64,
    pub safety_score: f64,
    pub investment_score: f64,
}

/// Directory of loaded locations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationListing {
    pub total: usize,
    pub cities: Vec<String>,
    pub locations: Vec<LocationSummary>,
}

/// List locations sorted by city then area, optionally for one city
pub fn list_locations(store: &RecordStore, city: Option<&str>) -> LocationListing {
    let mut locations: Vec<LocationSummary> = store
        .locations()
        .iter()
        .filter(|l| city.is_none_or(|c| l.record.city.eq_ignore_ascii_case(c.trim())))
        .map(|l| LocationSummary {
            location: l.record.location.clone(),
            city: l.record.city.clone(),
            area: l.record.area.clone(),
            avg_price_per_sqft: l.record.avg_price_per_sqft,
            safety_score: l.record.safety_score,
            investment_score: l.record.investment_score,
        })
        .collect();

    locations.sort_by(|a, b| a.city.cmp(&b.city).then_with(|| a.area.cmp(&b.area)));

    LocationListing {
        total: locations.len(),
        cities: store.cities(),
        locations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::metrics::PriceCategory;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Satellite,   AHMEDABAD!! "), "satellite, ahmedabad");
        assert_eq!(normalize("Sector-21"), "sector21");
        assert_eq!(normalize("\tGift\nCity"), "gift city");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_empty_query() {
        let store = fixtures::store();
        assert!(matches!(find(&store, ""), Err(AnalysisError::EmptyQuery)));
        assert!(matches!(find(&store, "   "), Err(AnalysisError::EmptyQuery)));
        assert!(matches!(find(&store, "@#$"), Err(AnalysisError::EmptyQuery)));
    }

    #[test]
    fn test_unique_substring_found() {
        let store = fixtures::store();
        match find(&store, "satell").unwrap() {
            Resolution::Found(loc) => assert_eq!(loc.name(), "Satellite, Ahmedabad"),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_area_match() {
        let store = fixtures::store();
        let loc = resolve(&store, "GIFT CITY").unwrap();
        assert_eq!(loc.record.area, "Gift City");
    }

    #[test]
    fn test_ambiguous_lists_candidates_in_store_order() {
        let store = fixtures::store();
        match find(&store, "nagar").unwrap() {
            Resolution::Ambiguous(candidates) => assert_eq!(
                candidates,
                vec![
                    "Maninagar, Ahmedabad".to_string(),
                    "Gift City, Gandhinagar".to_string(),
                    "Sector 21, Gandhinagar".to_string(),
                ]
            ),
            other => panic!("expected Ambiguous, got {other:?}"),
        }

        let err = resolve(&store, "nagar").unwrap_err();
        assert!(matches!(err, AnalysisError::Ambiguous { .. }));
    }

    #[test]
    fn test_not_found() {
        let store = fixtures::store();
        assert_eq!(find(&store, "Atlantis").unwrap(), Resolution::NotFound);
        let err = resolve(&store, "Atlantis").unwrap_err();
        assert!(err.to_string().to_lowercase().contains("not found"));
    }

    #[test]
    fn test_profile() {
        let store = fixtures::store();
        let profile = profile(&store, "Bopal").unwrap();
        assert_eq!(profile.record.location, "Bopal, Ahmedabad");
        assert_eq!(profile.calculated_metrics.population_density, Some(6500.0));

        // Bopal (4800) is the second cheapest of six
        let rank = profile.calculated_metrics.price_per_sqft_rank;
        assert_eq!(rank.rank, 2);
        assert_eq!(rank.percentile, 33.3);
        assert_eq!(rank.category, PriceCategory::Moderate);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["location"], "Bopal, Ahmedabad");
        assert!(json["calculated_metrics"]["livability_score"].is_number());
        assert_eq!(json["calculated_metrics"]["price_per_sqft_rank"]["category"], "Moderate");
    }

    #[test]
    fn test_list_locations() {
        let store = fixtures::store();
        let listing = list_locations(&store, None);
        assert_eq!(listing.total, 6);
        assert_eq!(listing.locations[0].area, "Bopal");
        assert_eq!(listing.locations[5].area, "Sector 21");

        let gandhinagar = list_locations(&store, Some("GANDHINAGAR"));
        assert_eq!(gandhinagar.total, 2);
        assert_eq!(gandhinagar.cities.len(), 2);
    }
}
