//! Top-N selection under a named criterion

use crate::attribute::Attribute;
use crate::error::{AnalysisError, Result};
use crate::metrics::format_decimal;
use crate::model::ScoredLocation;
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// What "best" means for a top-N query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankCriteria {
    Investment,
    Safety,
    Affordability,
    Lifestyle,
    Connectivity,
    /// Ranks by livability
    #[default]
    Overall,
}

impl RankCriteria {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investment => "investment",
            Self::Safety => "safety",
            Self::Affordability => "affordability",
            Self::Lifestyle => "lifestyle",
            Self::Connectivity => "connectivity",
            Self::Overall => "overall",
        }
    }

    /// The attribute ranked on
    pub fn attribute(&self) -> Attribute {
        match self {
            Self::Investment => Attribute::InvestmentAttractiveness,
            Self::Safety => Attribute::Safety,
            Self::Affordability => Attribute::Affordability,
            Self::Lifestyle => Attribute::Lifestyle,
            Self::Connectivity => Attribute::Connectivity,
            Self::Overall => Attribute::Livability,
        }
    }
}

impl fmt::Display for RankCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankCriteria {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "investment" => Ok(Self::Investment),
            "safety" => Ok(Self::Safety),
            "affordability" => Ok(Self::Affordability),
            "lifestyle" => Ok(Self::Lifestyle),
            "connectivity" => Ok(Self::Connectivity),
            "overall" => Ok(Self::Overall),
            _ => Err(AnalysisError::InvalidFilter(format!(
                "unknown criteria '{s}' (expected investment, safety, affordability, lifestyle, connectivity or overall)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopQuery {
    pub criteria: RankCriteria,
    /// Inclusive upper bound on price per sq ft
    pub budget_max: Option<f64>,
    /// Case-insensitive city name
    pub city: Option<String>,
    pub limit: usize,
}

impl TopQuery {
    pub fn new(criteria: RankCriteria, limit: usize) -> Self {
        Self {
            criteria,
            budget_max: None,
            city: None,
            limit,
        }
    }

    pub fn budget_max(mut self, budget: f64) -> Self {
        self.budget_max = Some(budget);
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    fn admits(&self, location: &ScoredLocation) -> bool {
        let record = &location.record;
        self.budget_max.is_none_or(|max| record.avg_price_per_sqft <= max)
            && self
                .city
                .as_deref()
                .is_none_or(|c| record.city.eq_ignore_ascii_case(c.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLocation {
    pub location: String,
    pub city: String,
    pub score: f64,
    pub price_per_sqft: f64,
    pub key_highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopLocations {
    pub criteria: RankCriteria,
    /// Locations passing the filters, before truncation
    pub total_found: usize,
    pub showing_top: usize,
    pub locations: Vec<RankedLocation>,
}

const HIGHLIGHTS: [fn(&ScoredLocation) -> Option<String>; 5] = [
    |l| {
        (l.record.safety_score >= 9.0)
            .then(|| format!("Excellent Safety Score: {}/10", format_decimal(l.record.safety_score)))
    },
    |l| l.record.has_metro().then(|| "Metro Connectivity Available".to_string()),
    |l| {
        (l.record.appreciation_rate >= 10.0)
            .then(|| format!("High Appreciation: {}%", format_decimal(l.record.appreciation_rate)))
    },
    |l| (l.record.schools >= 15).then(|| "Educational Hub".to_string()),
    |l| (l.record.lifestyle_score >= 9.0).then(|| "Premium Lifestyle Amenities".to_string()),
];

/// Up to `limit` highlights in rule order
pub fn highlights(location: &ScoredLocation, limit: usize) -> Vec<String> {
    HIGHLIGHTS
        .iter()
        .filter_map(|rule| rule(location))
        .take(limit)
        .collect()
}

/// Sort descending on `attribute`; equal values keep store order
pub(crate) fn rank_by(locations: &mut [&ScoredLocation], attribute: Attribute) {
    locations.sort_by(|a, b| attribute.value(b).total_cmp(&attribute.value(a)));
}

pub fn top(store: &RecordStore, query: &TopQuery, highlight_limit: usize) -> Result<TopLocations> {
    if query.limit == 0 {
        return Err(AnalysisError::InvalidFilter(
            "limit must be at least 1".to_string(),
        ));
    }

    let mut candidates: Vec<&ScoredLocation> = store
        .locations()
        .iter()
        .filter(|l| query.admits(l))
        .collect();

    if candidates.is_empty() {
        return Err(AnalysisError::InvalidFilter(
            "No locations match the specified criteria".to_string(),
        ));
    }

    let attribute = query.criteria.attribute();
    rank_by(&mut candidates, attribute);
    let total_found = candidates.len();

    let locations: Vec<RankedLocation> = candidates
        .into_iter()
        .take(query.limit)
        .map(|l| RankedLocation {
            location: l.record.location.clone(),
            city: l.record.city.clone(),
            score: attribute.value(l),
            price_per_sqft: l.record.avg_price_per_sqft,
            key_highlights: highlights(l, highlight_limit),
        })
        .collect();

    debug!(
        criteria = %query.criteria,
        total_found,
        showing = locations.len(),
        "Top locations selected"
    );

    Ok(TopLocations {
        criteria: query.criteria,
        total_found,
        showing_top: locations.len(),
        locations,
    })
}
