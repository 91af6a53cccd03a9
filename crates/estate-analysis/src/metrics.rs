//! Composite metric derivation
//!
//! Every derived value is rounded to two decimals when computed, and later
//! formulas consume the rounded values.

use crate::config::OverallWeights;
use crate::model::{DerivedMetrics, LocationRecord, ScoredLocation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Round to `places` decimals, exact halves going to the even neighbour
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Print with at least one decimal: 9 -> "9.0", 9.25 -> "9.25"
pub(crate) fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

pub fn livability(record: &LocationRecord) -> f64 {
    round2(
        record.safety_score * 0.30
            + record.infrastructure_score * 0.25
            + record.lifestyle_score * 0.20
            + record.environment_score * 0.15
            + (10.0 - record.traffic_score) * 0.10,
    )
}

/// Rental yield is scaled ×10 to sit on the same footing as the scores
pub fn investment_attractiveness(record: &LocationRecord) -> f64 {
    round2(
        record.appreciation_rate * 0.40
            + record.rental_yield * 10.0 * 0.30
            + record.connectivity_score * 0.20
            + record.investment_score * 0.10,
    )
}

/// Price position within `[min_price, max_price]`: 10 at the cheapest, 0 at the dearest
///
/// A degenerate range (all prices equal) scores 10.
pub fn affordability(price: f64, min_price: f64, max_price: f64) -> f64 {
    let range = max_price - min_price;
    if range <= 0.0 {
        return 10.0;
    }
    round2((max_price - price) / range * 10.0)
}

pub fn overall_rating(
    record: &LocationRecord,
    livability_score: f64,
    investment_attractiveness: f64,
    affordability_index: f64,
    weights: &OverallWeights,
) -> f64 {
    round2(
        record.safety_score * weights.safety_score
            + livability_score * weights.livability_score
            + investment_attractiveness * weights.investment_attractiveness
            + record.connectivity_score * weights.connectivity_score
            + record.infrastructure_score * weights.infrastructure_score
            + record.lifestyle_score * weights.lifestyle_score
            + record.environment_score * weights.environment_score
            + affordability_index * weights.affordability_index,
    )
}

/// Derive metrics for every record
///
/// Affordability depends on the whole set, so this takes all records at once.
/// Output order matches input order.
pub fn derive(records: Vec<LocationRecord>, weights: &OverallWeights) -> Vec<ScoredLocation> {
    let (min_price, max_price) = records.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), r| (lo.min(r.avg_price_per_sqft), hi.max(r.avg_price_per_sqft)),
    );

    debug!(
        count = records.len(),
        min_price, max_price, "Deriving location metrics"
    );

    records
        .into_iter()
        .map(|record| {
            let livability_score = livability(&record);
            let attractiveness = investment_attractiveness(&record);
            let affordability_index =
                affordability(record.avg_price_per_sqft, min_price, max_price);
            let overall = overall_rating(
                &record,
                livability_score,
                attractiveness,
                affordability_index,
                weights,
            );

            ScoredLocation {
                record,
                metrics: DerivedMetrics {
                    livability_score,
                    investment_attractiveness: attractiveness,
                    affordability_index,
                    overall_rating: overall,
                },
            }
        })
        .collect()
}

/// Price band of a location within the whole store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceCategory {
    #[serde(rename = "Budget-friendly")]
    BudgetFriendly,
    Moderate,
    Premium,
    Luxury,
}

impl PriceCategory {
    const LADDER: [(f64, PriceCategory); 3] = [
        (25.0, PriceCategory::BudgetFriendly),
        (50.0, PriceCategory::Moderate),
        (75.0, PriceCategory::Premium),
    ];

    pub fn from_percentile(percentile: f64) -> Self {
        Self::LADDER
            .iter()
            .find(|(ceiling, _)| percentile <= *ceiling)
            .map_or(Self::Luxury, |(_, category)| *category)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetFriendly => "Budget-friendly",
            Self::Moderate => "Moderate",
            Self::Premium => "Premium",
            Self::Luxury => "Luxury",
        }
    }
}

/// Where a price sits among all loaded prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRank {
    /// Number of locations priced at or below this one
    pub rank: usize,
    pub total_locations: usize,
    pub percentile: f64,
    pub category: PriceCategory,
}

pub fn price_rank(locations: &[ScoredLocation], price: f64) -> PriceRank {
    let total = locations.len();
    let rank = locations
        .iter()
        .filter(|l| l.record.avg_price_per_sqft <= price)
        .count();
    let percentile = if total == 0 {
        0.0
    } else {
        round1(rank as f64 / total as f64 * 100.0)
    };

    PriceRank {
        rank,
        total_locations: total,
        percentile,
        category: PriceCategory::from_percentile(percentile),
    }
}
