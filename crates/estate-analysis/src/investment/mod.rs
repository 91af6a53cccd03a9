//! Investment projection for a single location
//!
//! A projection combines the cash-flow arithmetic for a capital amount with
//! risk scoring, a market outlook, and comparable locations in a price band.

mod risk;
mod trend;

pub use risk::{Recommendation, RiskAssessment, RiskLevel, assess, recommend};
pub use trend::{MarketOutlook, MarketTrend, growth_drivers, market_trend, trend_score};

use crate::error::{AnalysisError, Result};
use crate::metrics::{round1, round2};
use crate::model::{LocationRecord, ScoredLocation};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cash flows, risk and recommendation for a capital amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProjection {
    pub area_purchased_sqft: f64,
    pub monthly_rental_income: f64,
    pub annual_rental_income: f64,
    pub yearly_appreciation: f64,
    pub total_annual_return: f64,
    pub roi_percentage: f64,
    /// One decimal
    pub payback_period_years: f64,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub risk_factors: Vec<String>,
    pub recommendation: Recommendation,
}

/// A nearby-priced alternative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparable {
    pub location: String,
    pub price_per_sqft: f64,
    pub rental_yield: f64,
    pub appreciation_rate: f64,
    pub investment_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReport {
    pub location: String,
    pub investment_amount: f64,
    pub analysis: InvestmentProjection,
    pub market_trends: MarketTrend,
    pub comparable_locations: Vec<Comparable>,
}

/// Project returns of investing `capital` in `record`
pub fn project(record: &LocationRecord, capital: f64) -> Result<InvestmentProjection> {
    if !capital.is_finite() || capital <= 0.0 {
        return Err(AnalysisError::DivisionHazard(format!(
            "investment amount must be positive, got {capital}"
        )));
    }

    let area = capital / record.avg_price_per_sqft;
    let monthly_rental = (capital * record.rental_yield / 100.0) / 12.0;
    let yearly_appreciation = capital * (record.appreciation_rate / 100.0);
    let annual_rental = monthly_rental * 12.0;
    let total_return = annual_rental + yearly_appreciation;

    if !total_return.is_finite() || total_return <= 0.0 {
        return Err(AnalysisError::DivisionHazard(format!(
            "'{}' has no positive annual return, payback is undefined",
            record.location
        )));
    }

    let roi = total_return / capital * 100.0;
    let risk = assess(record);
    let recommendation = recommend(roi, risk.level);

    debug!(
        location = %record.location,
        capital,
        roi,
        risk_score = risk.score,
        recommendation = recommendation.as_str(),
        "Investment projected"
    );

    Ok(InvestmentProjection {
        area_purchased_sqft: round2(area),
        monthly_rental_income: round2(monthly_rental),
        annual_rental_income: round2(annual_rental),
        yearly_appreciation: round2(yearly_appreciation),
        total_annual_return: round2(total_return),
        roi_percentage: round2(roi),
        payback_period_years: round1(capital / total_return),
        risk_level: risk.level,
        risk_score: risk.score,
        risk_factors: risk.factors,
        recommendation,
    })
}

/// Other locations priced within `band` of this one, in store order
pub fn comparables(
    store: &RecordStore,
    location: &ScoredLocation,
    band: f64,
    limit: usize,
) -> Vec<Comparable> {
    let price = location.record.avg_price_per_sqft;
    let (lower, upper) = (price * (1.0 - band), price * (1.0 + band));

    store
        .locations()
        .iter()
        .filter(|l| l.record.location != location.record.location)
        .filter(|l| (lower..=upper).contains(&l.record.avg_price_per_sqft))
        .take(limit)
        .map(|l| Comparable {
            location: l.record.location.clone(),
            price_per_sqft: l.record.avg_price_per_sqft,
            rental_yield: l.record.rental_yield,
            appreciation_rate: l.record.appreciation_rate,
            investment_score: l.record.investment_score,
        })
        .collect()
}

/// Full investment report for a resolved location
pub fn analyze(
    store: &RecordStore,
    location: &ScoredLocation,
    capital: f64,
    band: f64,
    limit: usize,
) -> Result<InvestmentReport> {
    Ok(InvestmentReport {
        location: location.record.location.clone(),
        investment_amount: capital,
        analysis: project(&location.record, capital)?,
        market_trends: market_trend(&location.record),
        comparable_locations: comparables(store, location, band, limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn benchmark() -> LocationRecord {
        let mut record = fixtures::record("Test Location 1");
        record.avg_price_per_sqft = 5000.0;
        record.rental_yield = 4.0;
        record.appreciation_rate = 8.0;
        record.traffic_score = 5.0;
        record.safety_score = 8.0;
        record
    }

    #[test]
    fn test_projection_arithmetic() {
        let p = project(&benchmark(), 1_000_000.0).unwrap();

        assert_eq!(p.area_purchased_sqft, 200.0);
        assert_eq!(p.monthly_rental_income, 3333.33);
        assert_eq!(p.annual_rental_income, 40000.0);
        assert_eq!(p.yearly_appreciation, 80000.0);
        assert_eq!(p.total_annual_return, 120_000.0);
        assert_eq!(p.roi_percentage, 12.0);
        assert_eq!(p.payback_period_years, 8.3);
        assert_eq!(p.risk_level, RiskLevel::Low);
        assert!(p.risk_factors.is_empty());
        // ROI of exactly 12 is not above the top threshold
        assert_eq!(p.recommendation, Recommendation::Recommended);
    }

    #[test]
    fn test_recommendation_uses_unrounded_roi() {
        let mut record = benchmark();
        record.appreciation_rate = 8.004;
        let p = project(&record, 1_000_000.0).unwrap();

        assert_eq!(p.roi_percentage, 12.0);
        assert_eq!(p.risk_level, RiskLevel::Low);
        assert_eq!(p.recommendation, Recommendation::HighlyRecommended);
    }

    #[test]
    fn test_non_positive_capital() {
        for capital in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                project(&benchmark(), capital),
                Err(AnalysisError::DivisionHazard(_))
            ));
        }
    }

    #[test]
    fn test_zero_return() {
        let mut record = benchmark();
        record.rental_yield = 0.0;
        record.appreciation_rate = 0.0;
        assert!(matches!(
            project(&record, 1_000_000.0),
            Err(AnalysisError::DivisionHazard(_))
        ));
    }

    #[test]
    fn test_comparables_band_is_inclusive_and_excludes_self() {
        let store = fixtures::store();
        // Maninagar 5200: band [4160, 6240] holds Bopal 4800 and Sector 21 4200
        let maninagar = store.get("Maninagar, Ahmedabad").unwrap();
        let names: Vec<String> = comparables(&store, maninagar, 0.20, 3)
            .into_iter()
            .map(|c| c.location)
            .collect();
        assert_eq!(names, vec!["Bopal, Ahmedabad", "Sector 21, Gandhinagar"]);

        let mut edge = maninagar.clone();
        edge.record.location = "Edge Case".to_string();
        edge.record.avg_price_per_sqft = 4000.0;
        // upper bound 4800 exactly
        let names: Vec<String> = comparables(&store, &edge, 0.20, 3)
            .into_iter()
            .map(|c| c.location)
            .collect();
        assert_eq!(names, vec!["Bopal, Ahmedabad", "Sector 21, Gandhinagar"]);
    }

    #[test]
    fn test_comparables_respect_limit() {
        let store = fixtures::store();
        let maninagar = store.get("Maninagar, Ahmedabad").unwrap();
        assert_eq!(comparables(&store, maninagar, 0.20, 1).len(), 1);
        assert!(comparables(&store, maninagar, 0.0, 3).is_empty());
    }

    #[test]
    fn test_analyze_report() {
        let store = fixtures::store();
        let gift = store.get("Gift City, Gandhinagar").unwrap();
        let report = analyze(&store, gift, 10_000_000.0, 0.20, 3).unwrap();

        assert_eq!(report.location, "Gift City, Gandhinagar");
        assert_eq!(report.investment_amount, 10_000_000.0);
        // yield 4.5 + appreciation 15
        assert_eq!(report.analysis.roi_percentage, 19.5);
        assert_eq!(report.analysis.recommendation, Recommendation::HighlyRecommended);
        assert_eq!(report.market_trends.market_outlook, MarketOutlook::VeryPositive);
        // band [7600, 11400]: Vastrapur 8500
        assert_eq!(report.comparable_locations.len(), 1);
        assert_eq!(report.comparable_locations[0].location, "Vastrapur, Ahmedabad");
    }
}
