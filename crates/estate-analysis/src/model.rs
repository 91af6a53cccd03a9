//! Location record and derived metric types

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Expected growth of a neighbourhood
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthOutlook {
    #[serde(alias = "high", alias = "HIGH")]
    High,
    #[default]
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "low", alias = "LOW")]
    Low,
}

impl GrowthOutlook {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parse case-insensitively; `None` for anything unrecognised
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for GrowthOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Null and absent both mean Medium
fn growth_or_default<'de, D>(deserializer: D) -> Result<GrowthOutlook, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<GrowthOutlook>::deserialize(deserializer)?.unwrap_or_default())
}

/// Metro rail access
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metro {
    #[serde(default)]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// A named point of interest with a precomputed distance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Lifestyle amenities around a neighbourhood
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Amenities {
    #[serde(default)]
    pub malls: Vec<String>,
    #[serde(default)]
    pub parks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gyms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cinemas: Option<u32>,
}

/// One neighbourhood as loaded from the dataset
///
/// Missing scores, economics and counts deserialize as zero. Unknown fields
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub location: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub area: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_density: Option<f64>,

    #[serde(default)]
    pub safety_score: f64,
    /// Lower is better
    #[serde(default)]
    pub traffic_score: f64,
    #[serde(default)]
    pub connectivity_score: f64,
    #[serde(default)]
    pub infrastructure_score: f64,
    #[serde(default)]
    pub lifestyle_score: f64,
    #[serde(default)]
    pub environment_score: f64,
    #[serde(default)]
    pub investment_score: f64,

    #[serde(default)]
    pub avg_price_per_sqft: f64,
    /// Percent per year
    #[serde(default)]
    pub rental_yield: f64,
    /// Percent per year
    #[serde(default)]
    pub appreciation_rate: f64,

    #[serde(default)]
    pub schools: u32,
    #[serde(default)]
    pub hospitals: u32,

    #[serde(default, deserialize_with = "growth_or_default")]
    pub future_growth: GrowthOutlook,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metro: Option<Metro>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Amenities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub police_station: Option<Landmark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_airport: Option<Landmark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_railway: Option<Landmark>,
}

impl LocationRecord {
    pub fn has_metro(&self) -> bool {
        self.metro.as_ref().is_some_and(|m| m.available)
    }

    pub fn malls(&self) -> &[String] {
        self.amenities
            .as_ref()
            .map(|a| a.malls.as_slice())
            .unwrap_or_default()
    }

    /// The raw scores that must lie on [0, 10], with their field names
    pub(crate) fn scores(&self) -> [(&'static str, f64); 7] {
        [
            ("safety_score", self.safety_score),
            ("traffic_score", self.traffic_score),
            ("connectivity_score", self.connectivity_score),
            ("infrastructure_score", self.infrastructure_score),
            ("lifestyle_score", self.lifestyle_score),
            ("environment_score", self.environment_score),
            ("investment_score", self.investment_score),
        ]
    }
}

/// Composite indices computed once at load time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub livability_score: f64,
    pub investment_attractiveness: f64,
    pub affordability_index: f64,
    pub overall_rating: f64,
}

/// A record paired with its derived metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredLocation {
    #[serde(flatten)]
    pub record: LocationRecord,
    #[serde(rename = "calculated_metrics")]
    pub metrics: DerivedMetrics,
}

impl ScoredLocation {
    pub fn name(&self) -> &str {
        &self.record.location
    }
}
