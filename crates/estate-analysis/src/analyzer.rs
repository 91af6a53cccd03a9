//! Facade over a record store snapshot

use crate::compare::{self, ComparisonResult};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::investment::{self, InvestmentReport};
use crate::lookup::{self, LocationListing, LocationProfile, Resolution};
use crate::market::{self, MarketTrends, Statistics};
use crate::model::ScoredLocation;
use crate::ranking::{self, RankCriteria, TopLocations, TopQuery};
use crate::report::AnalysisReport;
use crate::search::{self, SearchFilters, SearchResults};
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

/// Location analysis over one immutable store snapshot
///
/// Cheap to clone. Build a new analyzer from a fresh snapshot after a reload.
#[derive(Debug, Clone)]
pub struct Analyzer {
    store: Arc<RecordStore>,
    config: Arc<AnalysisConfig>,
}

impl Analyzer {
    pub fn new(store: Arc<RecordStore>, config: Arc<AnalysisConfig>) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn find(&self, query: &str) -> Result<Resolution<'_>> {
        lookup::find(&self.store, query)
    }

    pub fn resolve(&self, query: &str) -> Result<&ScoredLocation> {
        lookup::resolve(&self.store, query)
    }

    pub fn profile(&self, query: &str) -> Result<LocationProfile> {
        lookup::profile(&self.store, query)
    }

    pub fn locations(&self, city: Option<&str>) -> LocationListing {
        lookup::list_locations(&self.store, city)
    }

    /// Investment report; `capital` defaults to the configured amount
    #[instrument(skip(self))]
    pub fn analyze_investment(&self, query: &str, capital: Option<f64>) -> Result<InvestmentReport> {
        let location = self.resolve(query)?;
        investment::analyze(
            &self.store,
            location,
            capital.unwrap_or(self.config.default_investment_amount),
            self.config.comparable_price_band,
            self.config.comparable_limit,
        )
    }

    #[instrument(skip_all, fields(count = queries.len()))]
    pub fn compare<S: AsRef<str>>(&self, queries: &[S]) -> Result<ComparisonResult> {
        compare::compare(&self.store, queries)
    }

    /// A top-N query using the configured default size
    pub fn top_query(&self, criteria: RankCriteria) -> TopQuery {
        TopQuery::new(criteria, self.config.default_top_limit)
    }

    pub fn top(&self, query: &TopQuery) -> Result<TopLocations> {
        ranking::top(&self.store, query, self.config.highlight_limit)
    }

    pub fn search(&self, filters: &SearchFilters) -> Result<SearchResults> {
        search::search(
            &self.store,
            filters,
            self.config.default_search_limit,
            self.config.max_search_limit,
        )
    }

    pub fn market_trends(&self, city: Option<&str>) -> Result<MarketTrends> {
        market::market_trends(&self.store, city)
    }

    pub fn statistics(&self) -> Result<Statistics> {
        market::statistics(&self.store)
    }

    /// Full report stamped with the current time
    pub fn report(&self, query: &str, capital: Option<f64>) -> Result<AnalysisReport> {
        self.report_at(query, capital, Utc::now())
    }

    pub fn report_at(
        &self,
        query: &str,
        capital: Option<f64>,
        generated_at: DateTime<Utc>,
    ) -> Result<AnalysisReport> {
        let location = self.resolve(query)?;
        let investment = investment::analyze(
            &self.store,
            location,
            capital.unwrap_or(self.config.default_investment_amount),
            self.config.comparable_price_band,
            self.config.comparable_limit,
        )?;
        Ok(AnalysisReport::build(
            &self.store,
            query,
            location,
            investment,
            generated_at,
        ))
    }

    /// Distinct locations for a side-by-side view, at least two
    ///
    /// Unresolvable queries are skipped the same way [`Analyzer::compare`]
    /// skips them.
    pub fn resolve_distinct<S: AsRef<str>>(&self, queries: &[S]) -> Result<Vec<&ScoredLocation>> {
        let (selected, unresolved) = compare::select(&self.store, queries);
        if selected.len() < 2 {
            return Err(AnalysisError::InsufficientInputs {
                resolved: selected.len(),
                unresolved,
            });
        }
        Ok(selected)
    }
}
