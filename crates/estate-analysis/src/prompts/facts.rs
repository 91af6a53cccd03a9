//! The bullet list of facts every location prompt carries

use crate::metrics::format_decimal;
use crate::model::ScoredLocation;
use estate_prompt::group_thousands;

/// Facts in display order; optional ones appear only when known
pub fn location_facts(location: &ScoredLocation) -> Vec<String> {
    let r = &location.record;
    let mut facts = Vec::with_capacity(24);

    if !r.city.is_empty() {
        facts.push(format!("City: {}", r.city));
    }
    if !r.area.is_empty() {
        facts.push(format!("Area: {}", r.area));
    }
    if let Some(population) = r.population.filter(|p| *p > 0) {
        facts.push(format!("Population: {}", group_thousands(population as f64)));
    }
    if let Some(density) = r.population_density.filter(|d| *d > 0.0) {
        facts.push(format!("Population Density: {} per sq km", group_thousands(density)));
    }

    for (label, score, suffix) in [
        ("Safety", r.safety_score, ""),
        ("Traffic", r.traffic_score, " (lower is better)"),
        ("Infrastructure", r.infrastructure_score, ""),
        ("Connectivity", r.connectivity_score, ""),
        ("Lifestyle", r.lifestyle_score, ""),
        ("Environment", r.environment_score, ""),
    ] {
        facts.push(format!("{label} Score: {}/10{suffix}", format_decimal(score)));
    }

    facts.push(format!("Schools: {}", r.schools));
    facts.push(format!("Hospitals: {}", r.hospitals));

    match r.metro.as_ref().filter(|m| m.available) {
        Some(metro) => facts.push(format!(
            "Metro: Yes, {} station ({} km away)",
            metro.station.as_deref().unwrap_or("N/A"),
            metro.distance_km.map_or_else(|| "N/A".to_string(), format_decimal),
        )),
        None => facts.push("Metro: Not available".to_string()),
    }

    facts.push(format!(
        "Average Price per Sq Ft: ₹{}",
        group_thousands(r.avg_price_per_sqft)
    ));
    facts.push(format!("Rental Yield: {}%", format_decimal(r.rental_yield)));
    facts.push(format!(
        "Historical Appreciation Rate: {}%",
        format_decimal(r.appreciation_rate)
    ));
    facts.push(format!("Future Growth Potential: {}", r.future_growth));
    facts.push(format!(
        "Overall Rating: {}/10",
        format_decimal(location.metrics.overall_rating)
    ));
    facts.push(format!(
        "Affordability Index: {}/10",
        format_decimal(location.metrics.affordability_index)
    ));

    if let Some(amenities) = &r.amenities {
        if !amenities.malls.is_empty() {
            let malls: Vec<&str> = amenities.malls.iter().take(3).map(String::as_str).collect();
            facts.push(format!("Major Malls: {}", malls.join(", ")));
        }
        if let Some(restaurants) = amenities.restaurants {
            facts.push(format!("Restaurants: {restaurants}+"));
        }
        if !amenities.parks.is_empty() {
            let parks: Vec<&str> = amenities.parks.iter().take(2).map(String::as_str).collect();
            facts.push(format!("Parks/Recreation: {}", parks.join(", ")));
        }
    }

    facts
}
