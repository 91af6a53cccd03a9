//! Real-estate location scoring and ranking
//!
//! This crate turns a static dataset of location records into comparable,
//! explainable numbers. It includes:
//!
//! - Derived metrics (livability, investment attractiveness, affordability,
//!   weighted overall rating)
//! - Name lookup with exact, case-insensitive and substring matching
//! - Rental and appreciation projections with risk and recommendations
//! - Side-by-side comparison with per-attribute winners
//! - Top-N selection, multi-criteria search and market statistics
//! - Structured analysis reports
//! - Prompt rendering and text-generation scorecards via an external provider
//!
//! # Architecture
//!
//! A [`RecordStore`] is built once from the dataset and never mutated. The
//! [`Analyzer`] facade borrows one snapshot and exposes every synchronous
//! operation. [`StoreHandle`] publishes reloaded snapshots atomically.
//! [`InsightService`] is the only asynchronous component.
//!
//! # Example
//!
//! ```rust,ignore
//! use estate_analysis::{AnalysisConfig, Analyzer, RecordStore};
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AnalysisConfig::builder().with_env().build()?;
//!     let store = RecordStore::from_path("data/locations.json", &config.weights)?;
//!     let analyzer = Analyzer::new(Arc::new(store), Arc::new(config));
//!
//!     let report = analyzer.analyze_investment("bopal", Some(5_000_000.0))?;
//!     println!("ROI: {}%", report.analysis.roi_percentage);
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod attribute;
pub mod compare;
pub mod config;
pub mod error;
pub mod insight;
pub mod investment;
pub mod lookup;
pub mod market;
pub mod metrics;
pub mod model;
pub mod prompts;
pub mod ranking;
pub mod report;
pub mod search;
pub mod store;

#[cfg(test)]
mod fixtures;

// Re-export main types for convenience
pub use analyzer::Analyzer;
pub use attribute::{Attribute, Polarity};
pub use compare::ComparisonResult;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, InsightConfig, OverallWeights};
pub use error::{AnalysisError, Result};
pub use insight::{InsightService, InsightStats, Scorecard};
pub use investment::{InvestmentReport, Recommendation, RiskLevel};
pub use lookup::{LocationProfile, Resolution};
pub use model::{GrowthOutlook, LocationRecord, ScoredLocation};
pub use prompts::PromptKind;
pub use ranking::{RankCriteria, TopLocations, TopQuery};
pub use report::AnalysisReport;
pub use search::{SearchFilters, SearchResults};
pub use store::{RecordStore, StoreHandle};
