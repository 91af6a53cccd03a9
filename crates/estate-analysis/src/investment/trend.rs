//! Market outlook scoring

use crate::model::{GrowthOutlook, LocationRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketOutlook {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    Positive,
    Stable,
    Uncertain,
}

impl MarketOutlook {
    const LADDER: [(u32, MarketOutlook); 3] = [
        (6, MarketOutlook::VeryPositive),
        (4, MarketOutlook::Positive),
        (2, MarketOutlook::Stable),
    ];

    pub fn from_score(score: u32) -> Self {
        Self::LADDER
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map_or(Self::Uncertain, |(_, outlook)| *outlook)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryPositive => "Very Positive",
            Self::Positive => "Positive",
            Self::Stable => "Stable",
            Self::Uncertain => "Uncertain",
        }
    }

    pub fn forecast(&self) -> &'static str {
        match self {
            Self::VeryPositive => "15-20% over next 3 years",
            Self::Positive => "10-15% over next 3 years",
            Self::Stable => "5-10% over next 3 years",
            Self::Uncertain => "0-5% over next 3 years",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTrend {
    pub market_outlook: MarketOutlook,
    pub price_growth_forecast: String,
    pub trend_score: u32,
    pub key_drivers: Vec<String>,
}

fn tiered(score: f64) -> u32 {
    if score > 8.0 {
        2
    } else if score > 6.0 {
        1
    } else {
        0
    }
}

pub fn trend_score(record: &LocationRecord) -> u32 {
    let growth = match record.future_growth {
        GrowthOutlook::High => 3,
        GrowthOutlook::Medium => 2,
        GrowthOutlook::Low => 1,
    };
    growth + tiered(record.infrastructure_score) + tiered(record.connectivity_score)
}

const DRIVERS: [(fn(&LocationRecord) -> bool, &str); 5] = [
    (LocationRecord::has_metro, "Metro connectivity"),
    (|r| r.infrastructure_score > 8.0, "Excellent infrastructure"),
    (|r| r.schools > 15, "Educational hub"),
    (|r| r.connectivity_score > 8.0, "Strategic location"),
    (|r| r.lifestyle_score > 8.0, "Premium lifestyle amenities"),
];

/// Growth drivers in display order
pub fn growth_drivers(record: &LocationRecord) -> Vec<String> {
    DRIVERS
        .iter()
        .filter(|(applies, _)| applies(record))
        .map(|(_, label)| (*label).to_string())
        .collect()
}

pub fn market_trend(record: &LocationRecord) -> MarketTrend {
    let score = trend_score(record);
    let outlook = MarketOutlook::from_score(score);

    MarketTrend {
        market_outlook: outlook,
        price_growth_forecast: outlook.forecast().to_string(),
        trend_score: score,
        key_drivers: growth_drivers(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_outlook_ladder() {
        assert_eq!(MarketOutlook::from_score(7), MarketOutlook::VeryPositive);
        assert_eq!(MarketOutlook::from_score(6), MarketOutlook::VeryPositive);
        assert_eq!(MarketOutlook::from_score(4), MarketOutlook::Positive);
        assert_eq!(MarketOutlook::from_score(3), MarketOutlook::Stable);
        assert_eq!(MarketOutlook::from_score(1), MarketOutlook::Uncertain);
    }

    #[test]
    fn test_gift_city_trend() {
        let trend = market_trend(&fixtures::record("Gift City, Gandhinagar"));
        // High (3) + infrastructure 9.5 (2) + connectivity 8.8 (2)
        assert_eq!(trend.trend_score, 7);
        assert_eq!(trend.market_outlook, MarketOutlook::VeryPositive);
        assert_eq!(trend.price_growth_forecast, "15-20% over next 3 years");
        assert_eq!(
            trend.key_drivers,
            vec!["Metro connectivity", "Excellent infrastructure", "Strategic location"]
        );
    }

    #[test]
    fn test_satellite_drivers() {
        let drivers = growth_drivers(&fixtures::record("Satellite, Ahmedabad"));
        assert_eq!(
            drivers,
            vec![
                "Metro connectivity",
                "Excellent infrastructure",
                "Educational hub",
                "Strategic location",
                "Premium lifestyle amenities"
            ]
        );
    }

    #[test]
    fn test_sparse_record() {
        let record = fixtures::record("North Twin");
        // Medium growth (2), missing infrastructure and connectivity count as 0
        assert_eq!(trend_score(&record), 2);
        assert_eq!(market_trend(&record).market_outlook, MarketOutlook::Stable);
        assert!(growth_drivers(&record).is_empty());
    }
}
