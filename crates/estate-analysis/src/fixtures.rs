//! Shared test records

use crate::config::OverallWeights;
use crate::model::LocationRecord;
use crate::store::RecordStore;
use serde_json::{Value, json};

fn parse(value: Value) -> Vec<LocationRecord> {
    serde_json::from_value(value).unwrap()
}

/// Six neighbourhoods across two cities
pub(crate) fn records() -> Vec<LocationRecord> {
    parse(json!([
        {
            "location": "Satellite, Ahmedabad", "city": "Ahmedabad", "area": "Satellite",
            "population": 185000, "population_density": 12500,
            "safety_score": 8.5, "traffic_score": 7.5, "connectivity_score": 8.5,
            "infrastructure_score": 8.5, "lifestyle_score": 9.0, "environment_score": 7.0,
            "investment_score": 8.5, "avg_price_per_sqft": 7200, "rental_yield": 3.2,
            "appreciation_rate": 9.5, "schools": 18, "hospitals": 8, "future_growth": "Medium",
            "metro": { "available": true, "station": "Shivranjani", "distance_km": 0.8 },
            "amenities": {
                "malls": ["Iscon Mega Mall", "Himalaya Mall", "Alpha One", "Acropolis"],
                "parks": ["Vastrapur Lake", "Law Garden", "Parimal Garden"],
                "restaurants": 150, "gyms": 25, "banks": 30, "cinemas": 6
            },
            "police_station": { "name": "Satellite Police Station", "distance_km": 1.1 }
        },
        {
            "location": "Vastrapur, Ahmedabad", "city": "Ahmedabad", "area": "Vastrapur",
            "population": 95000, "population_density": 11000,
            "safety_score": 9.0, "traffic_score": 6.5, "connectivity_score": 8.0,
            "infrastructure_score": 8.8, "lifestyle_score": 9.2, "environment_score": 8.2,
            "investment_score": 8.8, "avg_price_per_sqft": 8500, "rental_yield": 3.0,
            "appreciation_rate": 11.0, "schools": 16, "hospitals": 10, "future_growth": "High",
            "metro": { "available": true, "station": "Vastrapur", "distance_km": 0.5 },
            "amenities": { "malls": ["Alpha One", "Himalaya Mall"], "parks": ["Vastrapur Lake"], "restaurants": 120 }
        },
        {
            "location": "Maninagar, Ahmedabad", "city": "Ahmedabad", "area": "Maninagar",
            "population": 210000, "population_density": 18500,
            "safety_score": 7.5, "traffic_score": 8.0, "connectivity_score": 7.5,
            "infrastructure_score": 7.0, "lifestyle_score": 7.0, "environment_score": 6.0,
            "investment_score": 7.0, "avg_price_per_sqft": 5200, "rental_yield": 4.0,
            "appreciation_rate": 7.0, "schools": 14, "hospitals": 9, "future_growth": "Medium",
            "metro": { "available": true, "station": "Maninagar", "distance_km": 1.0 }
        },
        {
            "location": "Bopal, Ahmedabad", "city": "Ahmedabad", "area": "Bopal",
            "population": 120000, "population_density": 6500,
            "safety_score": 8.0, "traffic_score": 5.0, "connectivity_score": 6.5,
            "infrastructure_score": 7.5, "lifestyle_score": 7.5, "environment_score": 8.5,
            "investment_score": 8.0, "avg_price_per_sqft": 4800, "rental_yield": 3.8,
            "appreciation_rate": 12.0, "schools": 12, "hospitals": 5, "future_growth": "High",
            "metro": { "available": false }
        },
        {
            "location": "Gift City, Gandhinagar", "city": "Gandhinagar", "area": "Gift City",
            "population": 25000, "population_density": 2100,
            "safety_score": 9.2, "traffic_score": 3.0, "connectivity_score": 8.8,
            "infrastructure_score": 9.5, "lifestyle_score": 8.0, "environment_score": 9.0,
            "investment_score": 9.5, "avg_price_per_sqft": 9500, "rental_yield": 4.5,
            "appreciation_rate": 15.0, "schools": 6, "hospitals": 4, "future_growth": "High",
            "metro": { "available": true, "station": "GIFT City", "distance_km": 0.3 }
        },
        {
            "location": "Sector 21, Gandhinagar", "city": "Gandhinagar", "area": "Sector 21",
            "population": 40000, "population_density": 3200,
            "safety_score": 9.0, "traffic_score": 3.5, "connectivity_score": 7.0,
            "infrastructure_score": 8.5, "lifestyle_score": 7.0, "environment_score": 9.2,
            "investment_score": 7.5, "avg_price_per_sqft": 4200, "rental_yield": 3.5,
            "appreciation_rate": 8.0, "schools": 15, "hospitals": 6, "future_growth": "Medium"
        }
    ]))
}

/// The two-record dataset used for hand-checked arithmetic
pub(crate) fn pair() -> Vec<LocationRecord> {
    parse(json!([
        {
            "location": "Test Location 1", "city": "Test City", "area": "Test Area 1",
            "population": 10000, "population_density": 5000,
            "safety_score": 8.5, "traffic_score": 6.0, "schools": 10, "hospitals": 5,
            "future_growth": "High", "avg_price_per_sqft": 5000, "rental_yield": 4.0,
            "appreciation_rate": 8.0, "connectivity_score": 8.0, "infrastructure_score": 7.5,
            "lifestyle_score": 8.0, "environment_score": 7.0, "investment_score": 8.5
        },
        {
            "location": "Test Location 2", "city": "Test City", "area": "Test Area 2",
            "population": 15000, "population_density": 6000,
            "safety_score": 7.0, "traffic_score": 8.0, "schools": 8, "hospitals": 3,
            "future_growth": "Medium", "avg_price_per_sqft": 4000, "rental_yield": 3.5,
            "appreciation_rate": 6.0, "connectivity_score": 6.5, "infrastructure_score": 6.0,
            "lifestyle_score": 6.5, "environment_score": 6.0, "investment_score": 6.5
        }
    ]))
}

/// Two records with identical safety and price
pub(crate) fn tied() -> Vec<LocationRecord> {
    parse(json!([
        {
            "location": "North Twin", "city": "Twin City", "area": "North",
            "safety_score": 8.0, "traffic_score": 5.0, "avg_price_per_sqft": 6000,
            "rental_yield": 3.0, "appreciation_rate": 8.0
        },
        {
            "location": "South Twin", "city": "Twin City", "area": "South",
            "safety_score": 8.0, "traffic_score": 5.0, "avg_price_per_sqft": 6000,
            "rental_yield": 3.0, "appreciation_rate": 8.0
        }
    ]))
}

/// Find a fixture record by exact name across all fixture sets
pub(crate) fn record(name: &str) -> LocationRecord {
    records()
        .into_iter()
        .chain(pair())
        .chain(tied())
        .find(|r| r.location == name)
        .unwrap()
}

pub(crate) fn store() -> RecordStore {
    RecordStore::from_records(records(), &OverallWeights::default()).unwrap()
}

pub(crate) fn pair_store() -> RecordStore {
    RecordStore::from_records(pair(), &OverallWeights::default()).unwrap()
}

pub(crate) fn tied_store() -> RecordStore {
    RecordStore::from_records(tied(), &OverallWeights::default()).unwrap()
}
