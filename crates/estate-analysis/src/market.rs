//! Market overview and dataset statistics

use crate::attribute::{Attribute, Polarity};
use crate::error::{AnalysisError, Result};
use crate::metrics::{round1, round2};
use crate::model::{GrowthOutlook, ScoredLocation};
use crate::ranking::rank_by;
use crate::store::RecordStore;
use serde::Serialize;
use std::collections::BTreeMap;

const LEADERBOARD_SIZE: usize = 3;

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Sample standard deviation; 0 with fewer than two values
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values.iter().copied());
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// A location name with the value it was ranked on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
    pub location: String,
    pub value: f64,
}

/// Best `n` by `attribute`, honouring its direction; ties keep store order
fn leaders(locations: &[&ScoredLocation], attribute: Attribute, n: usize) -> Vec<Ranked> {
    let mut sorted = locations.to_vec();
    match attribute.polarity() {
        Polarity::HigherIsBetter => rank_by(&mut sorted, attribute),
        Polarity::LowerIsBetter => {
            sorted.sort_by(|a, b| attribute.value(a).total_cmp(&attribute.value(b)));
        }
    }
    sorted
        .into_iter()
        .take(n)
        .map(|l| Ranked {
            location: l.record.location.clone(),
            value: attribute.value(l),
        })
        .collect()
}

/// First location holding the best value of `attribute`
fn leader(locations: &[&ScoredLocation], attribute: Attribute) -> String {
    attribute
        .best_index(locations.iter().copied())
        .map(|idx| locations[idx].record.location.clone())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketOverview {
    pub total_locations: usize,
    pub avg_price_per_sqft: f64,
    pub price_range: PriceRange,
    pub avg_safety_score: f64,
    pub avg_rental_yield: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthAnalysis {
    pub high_growth_areas: usize,
    pub medium_growth_areas: usize,
    pub low_growth_areas: usize,
    pub avg_appreciation_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketTrends {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub market_overview: MarketOverview,
    pub growth_analysis: GrowthAnalysis,
    pub investment_hotspots: Vec<Ranked>,
    pub most_affordable: Vec<Ranked>,
    pub safest_areas: Vec<Ranked>,
}

/// Market overview, optionally for one city
pub fn market_trends(store: &RecordStore, city: Option<&str>) -> Result<MarketTrends> {
    let locations: Vec<&ScoredLocation> = match city {
        Some(c) => store.in_city(c).collect(),
        None => store.locations().iter().collect(),
    };

    if locations.is_empty() {
        return Err(AnalysisError::InvalidFilter(match city {
            Some(c) => format!("No data available for city '{c}'"),
            None => "No data available".to_string(),
        }));
    }

    let prices = || locations.iter().map(|l| l.record.avg_price_per_sqft);
    let growth_count =
        |g: GrowthOutlook| locations.iter().filter(|l| l.record.future_growth == g).count();

    Ok(MarketTrends {
        city: city.map(|c| c.trim().to_string()),
        market_overview: MarketOverview {
            total_locations: locations.len(),
            avg_price_per_sqft: round2(mean(prices())),
            price_range: PriceRange {
                min: round2(prices().fold(f64::INFINITY, f64::min)),
                max: round2(prices().fold(f64::NEG_INFINITY, f64::max)),
            },
            avg_safety_score: round2(mean(locations.iter().map(|l| l.record.safety_score))),
            avg_rental_yield: round2(mean(locations.iter().map(|l| l.record.rental_yield))),
        },
        growth_analysis: GrowthAnalysis {
            high_growth_areas: growth_count(GrowthOutlook::High),
            medium_growth_areas: growth_count(GrowthOutlook::Medium),
            low_growth_areas: growth_count(GrowthOutlook::Low),
            avg_appreciation_rate: round2(mean(
                locations.iter().map(|l| l.record.appreciation_rate),
            )),
        },
        investment_hotspots: leaders(&locations, Attribute::InvestmentScore, LEADERBOARD_SIZE),
        most_affordable: leaders(&locations, Attribute::Price, LEADERBOARD_SIZE),
        safest_areas: leaders(&locations, Attribute::Safety, LEADERBOARD_SIZE),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataOverview {
    pub total_locations: usize,
    pub cities: usize,
    pub city_breakdown: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStatistics {
    pub average_price_per_sqft: f64,
    pub median_price_per_sqft: f64,
    pub price_std_dev: f64,
    pub most_expensive: String,
    pub most_affordable: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyDistribution {
    pub excellent_9_plus: usize,
    pub good_7_to_9: usize,
    pub average_5_to_7: usize,
    pub below_average_less_5: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyStatistics {
    pub average_safety_score: f64,
    pub safest_location: String,
    pub safety_distribution: SafetyDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentStatistics {
    pub average_rental_yield: f64,
    pub average_appreciation_rate: f64,
    pub best_rental_yield: String,
    pub best_appreciation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfrastructureStatistics {
    pub locations_with_metro: usize,
    pub average_schools: f64,
    pub average_hospitals: f64,
    pub most_schools: String,
    pub most_hospitals: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub data_overview: DataOverview,
    pub price_statistics: PriceStatistics,
    pub safety_statistics: SafetyStatistics,
    pub investment_statistics: InvestmentStatistics,
    pub infrastructure: InfrastructureStatistics,
}

fn safety_distribution(locations: &[&ScoredLocation]) -> SafetyDistribution {
    let mut dist = SafetyDistribution {
        excellent_9_plus: 0,
        good_7_to_9: 0,
        average_5_to_7: 0,
        below_average_less_5: 0,
    };
    for l in locations {
        let bucket = match l.record.safety_score {
            s if s >= 9.0 => &mut dist.excellent_9_plus,
            s if s >= 7.0 => &mut dist.good_7_to_9,
            s if s >= 5.0 => &mut dist.average_5_to_7,
            _ => &mut dist.below_average_less_5,
        };
        *bucket += 1;
    }
    dist
}

/// Whole-dataset statistics
pub fn statistics(store: &RecordStore) -> Result<Statistics> {
    if store.is_empty() {
        return Err(AnalysisError::EmptyStore);
    }

    let locations: Vec<&ScoredLocation> = store.locations().iter().collect();
    let prices: Vec<f64> = locations.iter().map(|l| l.record.avg_price_per_sqft).collect();

    let mut city_breakdown = BTreeMap::new();
    for l in &locations {
        *city_breakdown.entry(l.record.city.clone()).or_insert(0) += 1;
    }

    // first of equal maxima
    let most_expensive = locations
        .iter()
        .fold(None::<&ScoredLocation>, |best, l| match best {
            Some(b) if b.record.avg_price_per_sqft >= l.record.avg_price_per_sqft => best,
            _ => Some(l),
        })
        .map(|l| l.record.location.clone())
        .unwrap_or_default();

    Ok(Statistics {
        data_overview: DataOverview {
            total_locations: locations.len(),
            cities: city_breakdown.len(),
            city_breakdown,
        },
        price_statistics: PriceStatistics {
            average_price_per_sqft: round2(mean(prices.iter().copied())),
            median_price_per_sqft: round2(median(prices.clone())),
            price_std_dev: round2(sample_std_dev(&prices)),
            most_expensive,
            most_affordable: leader(&locations, Attribute::Price),
        },
        safety_statistics: SafetyStatistics {
            average_safety_score: round2(mean(locations.iter().map(|l| l.record.safety_score))),
            safest_location: leader(&locations, Attribute::Safety),
            safety_distribution: safety_distribution(&locations),
        },
        investment_statistics: InvestmentStatistics {
            average_rental_yield: round2(mean(locations.iter().map(|l| l.record.rental_yield))),
            average_appreciation_rate: round2(mean(
                locations.iter().map(|l| l.record.appreciation_rate),
            )),
            best_rental_yield: leader(&locations, Attribute::RentalYield),
            best_appreciation: leader(&locations, Attribute::Appreciation),
        },
        infrastructure: InfrastructureStatistics {
            locations_with_metro: locations.iter().filter(|l| l.record.has_metro()).count(),
            average_schools: round1(mean(locations.iter().map(|l| f64::from(l.record.schools)))),
            average_hospitals: round1(mean(
                locations.iter().map(|l| f64::from(l.record.hospitals)),
            )),
            most_schools: leader(&locations, Attribute::Schools),
            most_hospitals: leader(&locations, Attribute::Hospitals),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverallWeights;
    use crate::fixtures;

    #[test]
    fn test_helpers() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!((sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.138_09).abs() < 1e-5);
        assert_eq!(sample_std_dev(&[5.0]), 0.0);
        assert_eq!(mean(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_market_trends_for_city() {
        let store = fixtures::store();
        let trends = market_trends(&store, Some("gandhinagar")).unwrap();
        let overview = &trends.market_overview;

        assert_eq!(overview.total_locations, 2);
        assert_eq!(overview.avg_price_per_sqft, 6850.0);
        assert_eq!(overview.price_range, PriceRange { min: 4200.0, max: 9500.0 });
        assert_eq!(overview.avg_safety_score, 9.1);
        assert_eq!(trends.growth_analysis.high_growth_areas, 1);
        assert_eq!(trends.growth_analysis.medium_growth_areas, 1);
        assert_eq!(trends.growth_analysis.avg_appreciation_rate, 11.5);
        assert_eq!(trends.most_affordable[0].location, "Sector 21, Gandhinagar");
        assert_eq!(trends.investment_hotspots[0].location, "Gift City, Gandhinagar");
    }

    #[test]
    fn test_market_trends_leaderboards() {
        let store = fixtures::store();
        let trends = market_trends(&store, None).unwrap();
        let cheapest: Vec<&str> = trends.most_affordable.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(
            cheapest,
            vec!["Sector 21, Gandhinagar", "Bopal, Ahmedabad", "Maninagar, Ahmedabad"]
        );
        assert_eq!(trends.safest_areas.len(), 3);
        assert_eq!(trends.safest_areas[0].location, "Gift City, Gandhinagar");
        // Vastrapur and Sector 21 tie on 9.0; store order decides
        assert_eq!(trends.safest_areas[1].location, "Vastrapur, Ahmedabad");
        assert_eq!(trends.safest_areas[2].location, "Sector 21, Gandhinagar");
    }

    #[test]
    fn test_market_trends_unknown_city() {
        let store = fixtures::store();
        assert!(matches!(
            market_trends(&store, Some("Surat")),
            Err(AnalysisError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_statistics() {
        let store = fixtures::store();
        let stats = statistics(&store).unwrap();

        assert_eq!(stats.data_overview.total_locations, 6);
        assert_eq!(stats.data_overview.cities, 2);
        assert_eq!(stats.data_overview.city_breakdown["Ahmedabad"], 4);
        // 4200 4800 5200 7200 8500 9500
        assert_eq!(stats.price_statistics.median_price_per_sqft, 6200.0);
        assert_eq!(stats.price_statistics.most_expensive, "Gift City, Gandhinagar");
        assert_eq!(stats.price_statistics.most_affordable, "Sector 21, Gandhinagar");
        assert_eq!(stats.safety_statistics.safest_location, "Gift City, Gandhinagar");
        assert_eq!(
            stats.safety_statistics.safety_distribution,
            SafetyDistribution {
                excellent_9_plus: 3,
                good_7_to_9: 3,
                average_5_to_7: 0,
                below_average_less_5: 0,
            }
        );
        assert_eq!(stats.investment_statistics.best_rental_yield, "Gift City, Gandhinagar");
        assert_eq!(stats.infrastructure.locations_with_metro, 4);
        assert_eq!(stats.infrastructure.most_schools, "Satellite, Ahmedabad");
        // (18 + 16 + 14 + 12 + 6 + 15) / 6 = 13.5
        assert_eq!(stats.infrastructure.average_schools, 13.5);
    }

    #[test]
    fn test_statistics_on_empty_store() {
        let store = RecordStore::from_records(Vec::new(), &OverallWeights::default()).unwrap();
        assert!(matches!(statistics(&store), Err(AnalysisError::EmptyStore)));
    }
}
