//! Named numeric attributes of a scored location
//!
//! Comparison, ranking and search all select a number off a
//! [`ScoredLocation`] by name. [`Attribute`] is that name, with its direction.

use crate::error::{AnalysisError, Result};
use crate::model::ScoredLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which direction of an attribute is desirable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "safety_score")]
    Safety,
    #[serde(rename = "traffic_score")]
    Traffic,
    #[serde(rename = "schools")]
    Schools,
    #[serde(rename = "hospitals")]
    Hospitals,
    #[serde(rename = "avg_price_per_sqft")]
    Price,
    #[serde(rename = "rental_yield")]
    RentalYield,
    #[serde(rename = "appreciation_rate")]
    Appreciation,
    #[serde(rename = "connectivity_score")]
    Connectivity,
    #[serde(rename = "infrastructure_score")]
    Infrastructure,
    #[serde(rename = "lifestyle_score")]
    Lifestyle,
    #[serde(rename = "environment_score")]
    Environment,
    #[serde(rename = "investment_score")]
    InvestmentScore,
    #[serde(rename = "livability_score")]
    Livability,
    #[serde(rename = "investment_attractiveness")]
    InvestmentAttractiveness,
    #[serde(rename = "affordability_index")]
    Affordability,
    #[serde(rename = "overall_rating")]
    OverallRating,
}

impl Attribute {
    /// Raw attributes compared side by side, in display order
    pub const COMPARED: [Attribute; 12] = [
        Attribute::Safety,
        Attribute::Traffic,
        Attribute::Schools,
        Attribute::Hospitals,
        Attribute::Price,
        Attribute::RentalYield,
        Attribute::Appreciation,
        Attribute::Connectivity,
        Attribute::Infrastructure,
        Attribute::Lifestyle,
        Attribute::Environment,
        Attribute::InvestmentScore,
    ];

    const ALL: [Attribute; 16] = [
        Attribute::Safety,
        Attribute::Traffic,
        Attribute::Schools,
        Attribute::Hospitals,
        Attribute::Price,
        Attribute::RentalYield,
        Attribute::Appreciation,
        Attribute::Connectivity,
        Attribute::Infrastructure,
        Attribute::Lifestyle,
        Attribute::Environment,
        Attribute::InvestmentScore,
        Attribute::Livability,
        Attribute::InvestmentAttractiveness,
        Attribute::Affordability,
        Attribute::OverallRating,
    ];

    /// Field name as it appears in records and reports
    pub fn key(&self) -> &'static str {
        match self {
            Self::Safety => "safety_score",
            Self::Traffic => "traffic_score",
            Self::Schools => "schools",
            Self::Hospitals => "hospitals",
            Self::Price => "avg_price_per_sqft",
            Self::RentalYield => "rental_yield",
            Self::Appreciation => "appreciation_rate",
            Self::Connectivity => "connectivity_score",
            Self::Infrastructure => "infrastructure_score",
            Self::Lifestyle => "lifestyle_score",
            Self::Environment => "environment_score",
            Self::InvestmentScore => "investment_score",
            Self::Livability => "livability_score",
            Self::InvestmentAttractiveness => "investment_attractiveness",
            Self::Affordability => "affordability_index",
            Self::OverallRating => "overall_rating",
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Self::Traffic | Self::Price => Polarity::LowerIsBetter,
            _ => Polarity::HigherIsBetter,
        }
    }

    pub fn value(&self, loc: &ScoredLocation) -> f64 {
        let r = &loc.record;
        let m = &loc.metrics;
        match self {
            Self::Safety => r.safety_score,
            Self::Traffic => r.traffic_score,
            Self::Schools => f64::from(r.schools),
            Self::Hospitals => f64::from(r.hospitals),
            Self::Price => r.avg_price_per_sqft,
            Self::RentalYield => r.rental_yield,
            Self::Appreciation => r.appreciation_rate,
            Self::Connectivity => r.connectivity_score,
            Self::Infrastructure => r.infrastructure_score,
            Self::Lifestyle => r.lifestyle_score,
            Self::Environment => r.environment_score,
            Self::InvestmentScore => r.investment_score,
            Self::Livability => m.livability_score,
            Self::InvestmentAttractiveness => m.investment_attractiveness,
            Self::Affordability => m.affordability_index,
            Self::OverallRating => m.overall_rating,
        }
    }

    /// Index of the best candidate; ties go to the earliest
    pub fn best_index<'a, I>(&self, candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a ScoredLocation>,
    {
        let mut best: Option<(usize, f64)> = None;
        for (idx, loc) in candidates.into_iter().enumerate() {
            let v = self.value(loc);
            let better = match best {
                None => true,
                Some((_, current)) => match self.polarity() {
                    Polarity::HigherIsBetter => v > current,
                    Polarity::LowerIsBetter => v < current,
                },
            };
            if better {
                best = Some((idx, v));
            }
        }
        best.map(|(idx, _)| idx)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Attribute {
    type Err = AnalysisError;

    /// Accepts field names, plus a few short forms (`price`, `safety`, ...)
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        if let Some(attr) = Self::ALL.iter().find(|a| a.key() == wanted) {
            return Ok(*attr);
        }
        match wanted.as_str() {
            "safety" => Ok(Self::Safety),
            "traffic" => Ok(Self::Traffic),
            "price" => Ok(Self::Price),
            "appreciation" => Ok(Self::Appreciation),
            "connectivity" => Ok(Self::Connectivity),
            "infrastructure" => Ok(Self::Infrastructure),
            "lifestyle" => Ok(Self::Lifestyle),
            "environment" => Ok(Self::Environment),
            "livability" => Ok(Self::Livability),
            "affordability" => Ok(Self::Affordability),
            _ => Err(AnalysisError::InvalidFilter(format!(
                "unknown attribute '{s}'"
            ))),
        }
    }
}
