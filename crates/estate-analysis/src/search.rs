//! Multi-filter search

use crate::attribute::Attribute;
use crate::error::{AnalysisError, Result};
use crate::model::{GrowthOutlook, ScoredLocation};
use crate::ranking::rank_by;
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Search filters; every unset filter admits everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub min_safety_score: Option<f64>,
    pub max_traffic_score: Option<f64>,
    pub min_schools: Option<u32>,
    pub min_hospitals: Option<u32>,
    pub max_price_per_sqft: Option<f64>,
    pub min_rental_yield: Option<f64>,
    pub future_growth: Option<GrowthOutlook>,
    pub city: Option<String>,
    pub metro_required: bool,
    /// Descending sort key, investment_score when unset
    pub sort_by: Option<Attribute>,
    /// Capped at the configured maximum
    pub limit: Option<usize>,
}

/// Parse a growth filter where `Any` means no filter
pub fn parse_growth_filter(s: &str) -> Result<Option<GrowthOutlook>> {
    if s.trim().eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    GrowthOutlook::parse(s).map(Some).ok_or_else(|| {
        AnalysisError::InvalidFilter(format!(
            "unknown growth '{s}' (expected High, Medium, Low or Any)"
        ))
    })
}

impl SearchFilters {
    fn admits(&self, location: &ScoredLocation) -> bool {
        let r = &location.record;
        self.min_safety_score.is_none_or(|v| r.safety_score >= v)
            && self.max_traffic_score.is_none_or(|v| r.traffic_score <= v)
            && self.min_schools.is_none_or(|v| r.schools >= v)
            && self.min_hospitals.is_none_or(|v| r.hospitals >= v)
            && self.max_price_per_sqft.is_none_or(|v| r.avg_price_per_sqft <= v)
            && self.min_rental_yield.is_none_or(|v| r.rental_yield >= v)
            && self.future_growth.is_none_or(|g| r.future_growth == g)
            && self
                .city
                .as_deref()
                .is_none_or(|c| r.city.eq_ignore_ascii_case(c.trim()))
            && (!self.metro_required || r.has_metro())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub total_found: usize,
    pub showing: usize,
    pub filters_applied: SearchFilters,
    pub results: Vec<ScoredLocation>,
}

pub fn search(
    store: &RecordStore,
    filters: &SearchFilters,
    default_limit: usize,
    max_limit: usize,
) -> Result<SearchResults> {
    let limit = filters.limit.unwrap_or(default_limit).min(max_limit);
    if limit == 0 {
        return Err(AnalysisError::InvalidFilter(
            "limit must be at least 1".to_string(),
        ));
    }

    let mut matched: Vec<&ScoredLocation> = store
        .locations()
        .iter()
        .filter(|l| filters.admits(l))
        .collect();

    rank_by(
        &mut matched,
        filters.sort_by.unwrap_or(Attribute::InvestmentScore),
    );
    let total_found = matched.len();
    let results: Vec<ScoredLocation> = matched.into_iter().take(limit).cloned().collect();

    debug!(total_found, showing = results.len(), "Search completed");

    Ok(SearchResults {
        total_found,
        showing: results.len(),
        filters_applied: filters.clone(),
        results,
    })
}
