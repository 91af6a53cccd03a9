//! Terminal tables for analysis results

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use estate_analysis::lookup::LocationListing;
use estate_analysis::market::{MarketTrends, Ranked, Statistics};
use estate_analysis::{
    ComparisonResult, InvestmentReport, LocationProfile, SearchResults, TopLocations,
};
use estate_prompt::group_thousands;

fn table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<comfy_table::Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn rupees(value: f64) -> String {
    format!("₹{}", group_thousands(value))
}

fn key_values(rows: &[(&str, String)]) -> Table {
    let mut t = table(["Field", "Value"]);
    for (key, value) in rows {
        t.add_row([(*key).to_string(), value.clone()]);
    }
    t
}

fn ranked(title: &str, entries: &[Ranked]) -> String {
    let names: Vec<String> = entries
        .iter()
        .map(|r| format!("{} ({})", r.location, r.value))
        .collect();
    format!("{title}: {}", names.join(", "))
}

pub fn listing(listing: &LocationListing) -> Table {
    let mut t = table(["Location", "City", "Price/sqft", "Safety", "Investment"]);
    for l in &listing.locations {
        t.add_row([
            l.location.clone(),
            l.city.clone(),
            rupees(l.avg_price_per_sqft),
            l.safety_score.to_string(),
            l.investment_score.to_string(),
        ]);
    }
    t
}

pub fn profile(profile: &LocationProfile) -> Table {
    let r = &profile.record;
    let m = &profile.calculated_metrics;
    let metro = match &r.metro {
        Some(metro) if metro.available => metro.station.clone().unwrap_or_else(|| "Yes".to_string()),
        _ => "Not available".to_string(),
    };
    key_values(&[
        ("Location", r.location.clone()),
        ("City", r.city.clone()),
        ("Price per sqft", rupees(r.avg_price_per_sqft)),
        (
            "Price rank",
            format!(
                "{}/{} ({})",
                m.price_per_sqft_rank.rank,
                m.price_per_sqft_rank.total_locations,
                m.price_per_sqft_rank.category.as_str()
            ),
        ),
        ("Safety", r.safety_score.to_string()),
        ("Traffic", r.traffic_score.to_string()),
        ("Connectivity", r.connectivity_score.to_string()),
        ("Rental yield", format!("{}%", r.rental_yield)),
        ("Appreciation", format!("{}%", r.appreciation_rate)),
        ("Future growth", r.future_growth.to_string()),
        ("Metro", metro),
        ("Livability", m.derived.livability_score.to_string()),
        (
            "Investment attractiveness",
            m.derived.investment_attractiveness.to_string(),
        ),
        ("Affordability", m.derived.affordability_index.to_string()),
        ("Overall rating", m.derived.overall_rating.to_string()),
    ])
}

pub fn investment(report: &InvestmentReport) -> Table {
    let a = &report.analysis;
    let comparables: Vec<&str> = report
        .comparable_locations
        .iter()
        .map(|c| c.location.as_str())
        .collect();
    key_values(&[
        ("Location", report.location.clone()),
        ("Investment", rupees(report.investment_amount)),
        ("Area purchased", format!("{} sqft", a.area_purchased_sqft)),
        ("Monthly rent", rupees(a.monthly_rental_income)),
        ("Annual rent", rupees(a.annual_rental_income)),
        ("Yearly appreciation", rupees(a.yearly_appreciation)),
        ("Total annual return", rupees(a.total_annual_return)),
        ("ROI", format!("{}%", a.roi_percentage)),
        ("Payback", format!("{} years", a.payback_period_years)),
        ("Risk", format!("{} ({})", a.risk_level.as_str(), a.risk_factors.join(", "))),
        ("Recommendation", a.recommendation.as_str().to_string()),
        ("Outlook", report.market_trends.market_outlook.as_str().to_string()),
        ("Forecast", report.market_trends.price_growth_forecast.clone()),
        ("Comparables", comparables.join(", ")),
    ])
}

pub fn comparison(result: &ComparisonResult) -> Table {
    let mut header = vec!["Attribute".to_string()];
    header.extend(result.locations.iter().cloned());
    header.push("Winner".to_string());

    let mut t = table(header);
    for (attribute, values) in &result.metrics {
        let mut row = vec![attribute.key().to_string()];
        row.extend(result.locations.iter().map(|name| {
            values
                .get(name)
                .map(ToString::to_string)
                .unwrap_or_default()
        }));
        row.push(result.winner(*attribute).unwrap_or_default().to_string());
        t.add_row(row);
    }
    t
}

pub fn top(top: &TopLocations) -> Table {
    let mut t = table(["#", "Location", "City", top.criteria.as_str(), "Price/sqft", "Highlights"]);
    for (i, l) in top.locations.iter().enumerate() {
        t.add_row([
            (i + 1).to_string(),
            l.location.clone(),
            l.city.clone(),
            l.score.to_string(),
            rupees(l.price_per_sqft),
            l.key_highlights.join("; "),
        ]);
    }
    t
}

pub fn search(results: &SearchResults) -> Table {
    let mut t = table(["Location", "City", "Price/sqft", "Safety", "Yield", "Investment"]);
    for l in &results.results {
        let r = &l.record;
        t.add_row([
            r.location.clone(),
            r.city.clone(),
            rupees(r.avg_price_per_sqft),
            r.safety_score.to_string(),
            format!("{}%", r.rental_yield),
            r.investment_score.to_string(),
        ]);
    }
    t
}

pub fn market(trends: &MarketTrends) -> Table {
    let o = &trends.market_overview;
    let g = &trends.growth_analysis;
    key_values(&[
        ("Scope", trends.city.clone().unwrap_or_else(|| "All cities".to_string())),
        ("Locations", o.total_locations.to_string()),
        ("Average price/sqft", rupees(o.avg_price_per_sqft)),
        (
            "Price range",
            format!("{} - {}", rupees(o.price_range.min), rupees(o.price_range.max)),
        ),
        ("Average safety", o.avg_safety_score.to_string()),
        ("Average yield", format!("{}%", o.avg_rental_yield)),
        (
            "Growth (high/medium/low)",
            format!(
                "{}/{}/{}",
                g.high_growth_areas, g.medium_growth_areas, g.low_growth_areas
            ),
        ),
        ("Average appreciation", format!("{}%", g.avg_appreciation_rate)),
        ("Leaders", ranked("Investment", &trends.investment_hotspots)),
        ("", ranked("Affordable", &trends.most_affordable)),
        ("", ranked("Safest", &trends.safest_areas)),
    ])
}

pub fn statistics(stats: &Statistics) -> Table {
    let d = &stats.data_overview;
    let p = &stats.price_statistics;
    let s = &stats.safety_statistics;
    let i = &stats.investment_statistics;
    let infra = &stats.infrastructure;
    let cities: Vec<String> = d
        .city_breakdown
        .iter()
        .map(|(city, n)| format!("{city}: {n}"))
        .collect();
    key_values(&[
        ("Locations", d.total_locations.to_string()),
        ("Cities", cities.join(", ")),
        ("Average price/sqft", rupees(p.average_price_per_sqft)),
        ("Median price/sqft", rupees(p.median_price_per_sqft)),
        ("Price std dev", p.price_std_dev.to_string()),
        ("Most expensive", p.most_expensive.clone()),
        ("Most affordable", p.most_affordable.clone()),
        ("Average safety", s.average_safety_score.to_string()),
        ("Safest", s.safest_location.clone()),
        ("Average yield", format!("{}%", i.average_rental_yield)),
        ("Best yield", i.best_rental_yield.clone()),
        ("Best appreciation", i.best_appreciation.clone()),
        ("With metro", infra.locations_with_metro.to_string()),
        ("Most schools", infra.most_schools.clone()),
        ("Most hospitals", infra.most_hospitals.clone()),
    ])
}
