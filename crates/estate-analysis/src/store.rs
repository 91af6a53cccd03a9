//! Immutable record store and its reloadable handle

use crate::config::OverallWeights;
use crate::error::{AnalysisError, Result};
use crate::metrics::{self, PriceRank};
use crate::model::{LocationRecord, ScoredLocation};
use arc_swap::ArcSwap;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Every loaded location with its derived metrics, in dataset order
///
/// Built once and never mutated. Dataset order is significant: it is the
/// tie-break order for rankings and the order of comparable investments.
#[derive(Debug, Clone)]
pub struct RecordStore {
    locations: Vec<ScoredLocation>,
}

impl RecordStore {
    /// Validate records and derive their metrics
    pub fn from_records(records: Vec<LocationRecord>, weights: &OverallWeights) -> Result<Self> {
        weights.validate()?;
        validate_records(&records)?;

        Ok(Self {
            locations: metrics::derive(records, weights),
        })
    }

    /// Parse a JSON array of records
    pub fn from_json_str(json: &str, weights: &OverallWeights) -> Result<Self> {
        let records: Vec<LocationRecord> = serde_json::from_str(json)?;
        Self::from_records(records, weights)
    }

    /// Read and parse a JSON dataset file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>, weights: &OverallWeights) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_json_str(&raw, weights)?;
        info!(count = store.len(), "Loaded location records");
        Ok(store)
    }

    pub fn locations(&self) -> &[ScoredLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Exact lookup by location name
    pub fn get(&self, location: &str) -> Option<&ScoredLocation> {
        self.locations.iter().find(|l| l.record.location == location)
    }

    /// Distinct city names, sorted
    pub fn cities(&self) -> Vec<String> {
        self.locations
            .iter()
            .map(|l| l.record.city.clone())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Locations in `city` (case-insensitive), in dataset order
    pub fn in_city<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a ScoredLocation> + 'a {
        self.locations
            .iter()
            .filter(move |l| l.record.city.eq_ignore_ascii_case(city.trim()))
    }

    pub fn price_rank(&self, price: f64) -> PriceRank {
        metrics::price_rank(&self.locations, price)
    }
}

fn validate_records(records: &[LocationRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        let invalid = |reason: String| AnalysisError::InvalidRecord {
            location: record.location.clone(),
            reason,
        };

        if record.location.trim().is_empty() {
            return Err(invalid("location name is blank".to_string()));
        }
        if !seen.insert(record.location.as_str()) {
            return Err(invalid("duplicate location name".to_string()));
        }
        if !record.avg_price_per_sqft.is_finite() || record.avg_price_per_sqft <= 0.0 {
            return Err(invalid(format!(
                "avg_price_per_sqft must be positive, got {}",
                record.avg_price_per_sqft
            )));
        }
        for (field, value) in record.scores() {
            if !(0.0..=10.0).contains(&value) {
                return Err(invalid(format!("{field} must be within [0, 10], got {value}")));
            }
        }
        if !record.rental_yield.is_finite() || !record.appreciation_rate.is_finite() {
            return Err(invalid("rental_yield and appreciation_rate must be finite".to_string()));
        }
    }

    Ok(())
}

/// Shared, atomically replaceable store
///
/// Readers take a snapshot and keep a consistent view for as long as they hold
/// it, even across a reload.
#[derive(Debug)]
pub struct StoreHandle {
    current: ArcSwap<RecordStore>,
}

impl StoreHandle {
    pub fn new(store: RecordStore) -> Self {
        Self {
            current: ArcSwap::from_pointee(store),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<RecordStore> {
        self.current.load_full()
    }

    /// Publish a new store, returning the one it replaced
    pub fn replace(&self, store: RecordStore) -> Arc<RecordStore> {
        self.current.swap(Arc::new(store))
    }

    /// Rebuild from a dataset file and publish it
    ///
    /// On failure the current snapshot stays in place.
    pub fn reload_from_path(&self, path: impl AsRef<Path>, weights: &OverallWeights) -> Result<usize> {
        let store = RecordStore::from_path(path, weights)?;
        let count = store.len();
        self.replace(store);
        info!(count, "Published reloaded record store");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::io::Write;

    #[test]
    fn test_from_records_preserves_order() {
        let store = fixtures::store();
        let names: Vec<&str> = store.locations().iter().map(ScoredLocation::name).collect();
        let expected: Vec<String> = fixtures::records().into_iter().map(|r| r.location).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_rejects_duplicate_location() {
        let records = vec![
            fixtures::record("Test Location 1"),
            fixtures::record("Test Location 1"),
        ];
        let err = RecordStore::from_records(records, &OverallWeights::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRecord { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_score() {
        let mut record = fixtures::record("Test Location 1");
        record.safety_score = 11.0;
        let err = RecordStore::from_records(vec![record], &OverallWeights::default()).unwrap_err();
        assert!(err.to_string().contains("safety_score"));
    }

    #[test]
    fn test_rejects_missing_price() {
        let json = r#"[{ "location": "Nowhere", "city": "X" }]"#;
        let err = RecordStore::from_json_str(json, &OverallWeights::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRecord { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = RecordStore::from_json_str("{ not json", &OverallWeights::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Json(_)));
    }

    #[test]
    fn test_empty_dataset_is_allowed() {
        let store = RecordStore::from_json_str("[]", &OverallWeights::default()).unwrap();
        assert!(store.is_empty());
        assert!(store.cities().is_empty());
    }

    #[test]
    fn test_cities_and_city_filter() {
        let store = fixtures::store();
        assert_eq!(store.cities(), vec!["Ahmedabad".to_string(), "Gandhinagar".to_string()]);
        assert_eq!(store.in_city("gandhinagar").count(), 2);
        assert!(store.get("Bopal, Ahmedabad").is_some());
        assert!(store.get("bopal, ahmedabad").is_none());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&fixtures::records()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let store = RecordStore::from_path(file.path(), &OverallWeights::default()).unwrap();
        assert_eq!(store.len(), fixtures::records().len());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordStore::from_path(dir.path().join("absent.json"), &OverallWeights::default())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Io(_)));
    }

    #[test]
    fn test_handle_reload_keeps_old_snapshots_consistent() {
        let handle = StoreHandle::new(fixtures::store());
        let before = handle.snapshot();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&vec![
            fixtures::record("Test Location 1"),
            fixtures::record("Test Location 2"),
        ])
        .unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let count = handle
            .reload_from_path(file.path(), &OverallWeights::default())
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(handle.snapshot().len(), 2);
        assert_eq!(before.len(), fixtures::records().len());
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let handle = StoreHandle::new(fixtures::store());
        let dir = tempfile::tempdir().unwrap();
        let result = handle.reload_from_path(dir.path().join("missing.json"), &OverallWeights::default());
        assert!(result.is_err());
        assert_eq!(handle.snapshot().len(), fixtures::records().len());
    }
}
