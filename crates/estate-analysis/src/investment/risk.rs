//! Risk scoring and the investment recommendation ladder

use crate::model::LocationRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// 0-1 low, 2-3 medium, 4+ high
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=1 => Self::Low,
            2..=3 => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }
}

struct RiskRule {
    applies: fn(&LocationRecord) -> bool,
    weight: u32,
    label: &'static str,
}

const RISK_RULES: [RiskRule; 4] = [
    RiskRule {
        applies: |r| r.traffic_score > 7.0,
        weight: 1,
        label: "High traffic congestion",
    },
    RiskRule {
        applies: |r| r.safety_score < 7.0,
        weight: 2,
        label: "Below average safety",
    },
    RiskRule {
        applies: |r| r.appreciation_rate < 5.0,
        weight: 1,
        label: "Low appreciation rate",
    },
    RiskRule {
        applies: |r| r.rental_yield < 3.0,
        weight: 1,
        label: "Low rental yield",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub level: RiskLevel,
    /// Triggered factors, in rule order
    pub factors: Vec<String>,
}

pub fn assess(record: &LocationRecord) -> RiskAssessment {
    let triggered: Vec<&RiskRule> = RISK_RULES.iter().filter(|rule| (rule.applies)(record)).collect();
    let score = triggered.iter().map(|rule| rule.weight).sum();

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        factors: triggered.iter().map(|rule| rule.label.to_string()).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    Recommended,
    #[serde(rename = "Consider with Caution")]
    ConsiderWithCaution,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Highly Recommended",
            Self::Recommended => "Recommended",
            Self::ConsiderWithCaution => "Consider with Caution",
            Self::NotRecommended => "Not Recommended",
        }
    }
}

type RecommendationRule = (fn(f64, RiskLevel) -> bool, Recommendation);

/// First match wins; thresholds are strict
const RECOMMENDATION_LADDER: [RecommendationRule; 3] = [
    (
        |roi, risk| roi > 12.0 && risk == RiskLevel::Low,
        Recommendation::HighlyRecommended,
    ),
    (
        |roi, risk| roi > 10.0 && matches!(risk, RiskLevel::Low | RiskLevel::Medium),
        Recommendation::Recommended,
    ),
    (|roi, _| roi > 8.0, Recommendation::ConsiderWithCaution),
];

/// `roi` is the unrounded ROI percentage
pub fn recommend(roi: f64, risk: RiskLevel) -> Recommendation {
    RECOMMENDATION_LADDER
        .iter()
        .find(|(applies, _)| applies(roi, risk))
        .map_or(Recommendation::NotRecommended, |(_, outcome)| *outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_risk_levels() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(1), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(2), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(4), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(5), RiskLevel::High);
    }

    #[test]
    fn test_assess_orders_factors() {
        let mut record = fixtures::record("Test Location 2");
        record.safety_score = 6.0;
        record.appreciation_rate = 4.0;
        record.rental_yield = 2.5;

        let risk = assess(&record);
        // traffic 8 (+1), safety 6 (+2), appreciation 4 (+1), yield 2.5 (+1)
        assert_eq!(risk.score, 5);
        assert_eq!(risk.level, RiskLevel::High);
        assert_eq!(
            risk.factors,
            vec![
                "High traffic congestion",
                "Below average safety",
                "Low appreciation rate",
                "Low rental yield"
            ]
        );
    }

    #[test]
    fn test_boundaries_are_strict() {
        let mut record = fixtures::record("Test Location 1");
        record.traffic_score = 7.0;
        record.safety_score = 7.0;
        record.appreciation_rate = 5.0;
        record.rental_yield = 3.0;
        let risk = assess(&record);
        assert_eq!(risk.score, 0);
        assert!(risk.factors.is_empty());
    }

    #[test]
    fn test_recommendation_ladder() {
        assert_eq!(recommend(12.01, RiskLevel::Low), Recommendation::HighlyRecommended);
        assert_eq!(recommend(12.0, RiskLevel::Low), Recommendation::Recommended);
        assert_eq!(recommend(13.0, RiskLevel::Medium), Recommendation::Recommended);
        assert_eq!(recommend(13.0, RiskLevel::High), Recommendation::ConsiderWithCaution);
        assert_eq!(recommend(10.0, RiskLevel::Low), Recommendation::ConsiderWithCaution);
        assert_eq!(recommend(8.0, RiskLevel::Low), Recommendation::NotRecommended);
    }

    #[test]
    fn test_serialized_labels() {
        assert_eq!(serde_json::to_value(RiskLevel::Medium).unwrap(), "Medium Risk");
        assert_eq!(
            serde_json::to_value(Recommendation::ConsiderWithCaution).unwrap(),
            "Consider with Caution"
        );
    }
}
