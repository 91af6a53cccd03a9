//! Side-by-side comparison of several locations

use crate::attribute::Attribute;
use crate::error::{AnalysisError, Result};
use crate::lookup;
use crate::model::ScoredLocation;
use crate::store::RecordStore;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

type NoteRule = (fn(&ScoredLocation) -> bool, &'static str);

const NOTES: [NoteRule; 5] = [
    (|l| l.record.safety_score >= 9.0, "Excellent for families with children"),
    (|l| l.record.appreciation_rate >= 10.0, "High investment potential"),
    (|l| l.record.avg_price_per_sqft <= 6000.0, "Budget-friendly option"),
    (|l| l.record.lifestyle_score >= 9.0, "Premium lifestyle destination"),
    (|l| l.record.connectivity_score >= 9.0, "Excellent for professionals"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub best_for_safety: String,
    pub best_for_investment: String,
    pub most_affordable: String,
    pub best_connectivity: String,
    pub best_lifestyle: String,
    /// Notes per location
    pub recommendations: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Compared locations in input order
    pub locations: Vec<String>,
    /// Attribute -> location -> value
    pub metrics: BTreeMap<Attribute, BTreeMap<String, f64>>,
    /// Attribute -> winning location
    pub winners: BTreeMap<Attribute, String>,
    pub overall_winner: String,
    pub summary: ComparisonSummary,
    /// Queries that resolved to nothing or to several locations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

impl ComparisonResult {
    pub fn winner(&self, attribute: Attribute) -> Option<&str> {
        self.winners.get(&attribute).map(String::as_str)
    }
}

/// Resolve every query, dropping repeats of an already selected location
pub(crate) fn select<'a, S: AsRef<str>>(
    store: &'a RecordStore,
    queries: &[S],
) -> (Vec<&'a ScoredLocation>, Vec<String>) {
    let mut selected: Vec<&ScoredLocation> = Vec::new();
    let mut unresolved = Vec::new();

    for query in queries {
        let query = query.as_ref();
        match lookup::resolve(store, query) {
            Ok(location) => {
                if !selected.iter().any(|s| s.name() == location.name()) {
                    selected.push(location);
                }
            }
            Err(err) => {
                debug!(query, error = %err, "Comparison query unresolved");
                unresolved.push(query.to_string());
            }
        }
    }

    (selected, unresolved)
}

fn name_at(locations: &[&ScoredLocation], attribute: Attribute) -> String {
    attribute
        .best_index(locations.iter().copied())
        .map(|idx| locations[idx].name().to_string())
        .unwrap_or_default()
}

pub fn notes(location: &ScoredLocation) -> Vec<String> {
    NOTES
        .iter()
        .filter(|(applies, _)| applies(location))
        .map(|(_, note)| (*note).to_string())
        .collect()
}

/// Compare two or more locations named by free-text queries
pub fn compare<S: AsRef<str>>(store: &RecordStore, queries: &[S]) -> Result<ComparisonResult> {
    let (selected, unresolved) = select(store, queries);

    if selected.len() < 2 {
        return Err(AnalysisError::InsufficientInputs {
            resolved: selected.len(),
            unresolved,
        });
    }

    let mut metrics: BTreeMap<Attribute, BTreeMap<String, f64>> = BTreeMap::new();
    let mut winners: BTreeMap<Attribute, String> = BTreeMap::new();
    for attribute in Attribute::COMPARED {
        let values = selected
            .iter()
            .map(|l| (l.name().to_string(), attribute.value(l)))
            .collect();
        metrics.insert(attribute, values);
        winners.insert(attribute, name_at(&selected, attribute));
    }

    let summary = ComparisonSummary {
        best_for_safety: name_at(&selected, Attribute::Safety),
        best_for_investment: name_at(&selected, Attribute::Appreciation),
        most_affordable: name_at(&selected, Attribute::Price),
        best_connectivity: name_at(&selected, Attribute::Connectivity),
        best_lifestyle: name_at(&selected, Attribute::Lifestyle),
        recommendations: selected
            .iter()
            .map(|l| (l.name().to_string(), notes(l)))
            .collect(),
    };

    Ok(ComparisonResult {
        locations: selected.iter().map(|l| l.name().to_string()).collect(),
        overall_winner: name_at(&selected, Attribute::OverallRating),
        metrics,
        winners,
        summary,
        unresolved,
    })
}
