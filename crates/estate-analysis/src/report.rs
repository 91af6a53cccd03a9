//! Full analysis report for one location

use crate::investment::InvestmentReport;
use crate::lookup::LocationProfile;
use crate::metrics::round1;
use crate::model::{GrowthOutlook, LocationRecord, ScoredLocation};
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const REPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    /// The query as the caller typed it
    pub location: String,
    pub generated_at: DateTime<Utc>,
    pub report_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileRankings {
    pub price: f64,
    pub safety: f64,
    pub investment: f64,
}

/// Standing within the location's own city
///
/// A rank `k/n` counts the `k` locations of the city whose value is at or
/// below this one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketPosition {
    pub city: String,
    pub total_locations_in_city: usize,
    pub price_rank: String,
    pub safety_rank: String,
    pub investment_rank: String,
    pub percentile_rankings: PercentileRankings,
}

fn at_or_below(
    peers: &[&ScoredLocation],
    own: &ScoredLocation,
    value: fn(&ScoredLocation) -> f64,
) -> usize {
    let threshold = value(own);
    peers.iter().filter(|l| value(l) <= threshold).count()
}

pub fn market_position(store: &RecordStore, location: &ScoredLocation) -> MarketPosition {
    let peers: Vec<&ScoredLocation> = store
        .locations()
        .iter()
        .filter(|l| l.record.city == location.record.city)
        .collect();
    let total = peers.len();

    let price = at_or_below(&peers, location, |l| l.record.avg_price_per_sqft);
    let safety = at_or_below(&peers, location, |l| l.record.safety_score);
    let investment = at_or_below(&peers, location, |l| l.metrics.investment_attractiveness);

    let percentile = |rank: usize| {
        if total == 0 {
            0.0
        } else {
            round1(rank as f64 / total as f64 * 100.0)
        }
    };

    MarketPosition {
        city: location.record.city.clone(),
        total_locations_in_city: total,
        price_rank: format!("{price}/{total}"),
        safety_rank: format!("{safety}/{total}"),
        investment_rank: format!("{investment}/{total}"),
        percentile_rankings: PercentileRankings {
            price: percentile(price),
            safety: percentile(safety),
            investment: percentile(investment),
        },
    }
}

type Rule = (fn(&LocationRecord) -> bool, &'static str);

const TARGET_DEMOGRAPHICS: [Rule; 3] = [
    (
        |r| r.schools >= 15 && r.safety_score >= 8.0,
        "Families with school-age children",
    ),
    (|r| r.connectivity_score >= 8.0, "Working professionals"),
    (
        |r| r.lifestyle_score >= 8.5,
        "Affluent individuals seeking premium lifestyle",
    ),
];

const INVESTMENT_STRATEGY: [Rule; 3] = [
    (|r| r.appreciation_rate >= 10.0, "Buy and hold for capital appreciation"),
    (|r| r.rental_yield >= 3.5, "Rental income generation strategy"),
    (|r| r.future_growth == GrowthOutlook::High, "Long-term growth investment"),
];

const LIFESTYLE_BENEFITS: [Rule; 3] = [
    (LocationRecord::has_metro, "Excellent public transportation"),
    (|r| r.environment_score >= 8.0, "Clean and green environment"),
    (|r| r.malls().len() >= 2, "Shopping and entertainment options"),
];

const POTENTIAL_CONCERNS: [Rule; 3] = [
    (|r| r.traffic_score >= 7.0, "High traffic congestion during peak hours"),
    (
        |r| r.avg_price_per_sqft >= 7500.0,
        "High property prices may limit affordability",
    ),
    (|r| r.safety_score < 8.0, "Safety measures may need attention"),
];

fn apply(rules: &[Rule], record: &LocationRecord) -> Vec<String> {
    rules
        .iter()
        .filter(|(applies, _)| applies(record))
        .map(|(_, text)| (*text).to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedRecommendations {
    pub target_demographics: Vec<String>,
    pub investment_strategy: Vec<String>,
    pub lifestyle_benefits: Vec<String>,
    pub potential_concerns: Vec<String>,
}

pub fn recommendations(record: &LocationRecord) -> DetailedRecommendations {
    DetailedRecommendations {
        target_demographics: apply(&TARGET_DEMOGRAPHICS, record),
        investment_strategy: apply(&INVESTMENT_STRATEGY, record),
        lifestyle_benefits: apply(&LIFESTYLE_BENEFITS, record),
        potential_concerns: apply(&POTENTIAL_CONCERNS, record),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub report_metadata: ReportMetadata,
    pub location_overview: LocationProfile,
    pub investment_analysis: InvestmentReport,
    pub market_position: MarketPosition,
    pub recommendations: DetailedRecommendations,
}

impl AnalysisReport {
    pub fn build(
        store: &RecordStore,
        query: &str,
        location: &ScoredLocation,
        investment: InvestmentReport,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            report_metadata: ReportMetadata {
                location: query.to_string(),
                generated_at,
                report_version: REPORT_VERSION.to_string(),
            },
            location_overview: LocationProfile::build(store, location),
            investment_analysis: investment,
            market_position: market_position(store, location),
            recommendations: recommendations(&location.record),
        }
    }

    /// Default file name for this report
    pub fn file_name(&self) -> String {
        report_file_name(
            &self.report_metadata.location,
            self.report_metadata.generated_at,
        )
    }
}

/// `analysis_report_{name}_{YYYYmmdd_HHMMSS}.json`, non-alphanumerics in the
/// name replaced by `_`
pub fn report_file_name(location: &str, at: DateTime<Utc>) -> String {
    let safe: String = location
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("analysis_report_{safe}_{}.json", at.format("%Y%m%d_%H%M%S"))
}
