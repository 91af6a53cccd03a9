//! Configuration for location analysis operations

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding the default investment amount
pub const DEFAULT_INVESTMENT_VAR: &str = "ESTATE_DEFAULT_INVESTMENT";
/// Environment variable overriding the text-generation model
pub const MODEL_VAR: &str = "DEEPSEEK_MODEL";
/// Environment variable overriding the text-generation timeout in seconds
pub const AI_TIMEOUT_VAR: &str = "ESTATE_AI_TIMEOUT_SECS";

/// Weights of the overall rating
///
/// Each field weights the metric of the same name. Unknown keys are rejected
/// when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverallWeights {
    pub safety_score: f64,
    pub livability_score: f64,
    pub investment_attractiveness: f64,
    pub connectivity_score: f64,
    pub infrastructure_score: f64,
    pub lifestyle_score: f64,
    pub environment_score: f64,
    pub affordability_index: f64,
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            safety_score: 0.20,
            livability_score: 0.15,
            investment_attractiveness: 0.15,
            connectivity_score: 0.15,
            infrastructure_score: 0.10,
            lifestyle_score: 0.10,
            environment_score: 0.10,
            affordability_index: 0.05,
        }
    }
}

impl OverallWeights {
    /// Build weights from `(metric, weight)` pairs, starting from zero
    ///
    /// Metrics not named keep weight 0. An unknown metric name is an error.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut weights = Self::zero();
        for (name, weight) in pairs {
            let slot = match name {
                "safety_score" => &mut weights.safety_score,
                "livability_score" => &mut weights.livability_score,
                "investment_attractiveness" => &mut weights.investment_attractiveness,
                "connectivity_score" => &mut weights.connectivity_score,
                "infrastructure_score" => &mut weights.infrastructure_score,
                "lifestyle_score" => &mut weights.lifestyle_score,
                "environment_score" => &mut weights.environment_score,
                "affordability_index" => &mut weights.affordability_index,
                other => {
                    return Err(AnalysisError::ConfigError(format!(
                        "unknown overall-rating weight '{other}'"
                    )));
                }
            };
            *slot = weight;
        }
        weights.validate()?;
        Ok(weights)
    }

    fn zero() -> Self {
        Self {
            safety_score: 0.0,
            livability_score: 0.0,
            investment_attractiveness: 0.0,
            connectivity_score: 0.0,
            infrastructure_score: 0.0,
            lifestyle_score: 0.0,
            environment_score: 0.0,
            affordability_index: 0.0,
        }
    }

    fn values(&self) -> [f64; 8] {
        [
            self.safety_score,
            self.livability_score,
            self.investment_attractiveness,
            self.connectivity_score,
            self.infrastructure_score,
            self.lifestyle_score,
            self.environment_score,
            self.affordability_index,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.values().iter().sum()
    }

    /// Weights must be finite, non-negative, and not all zero
    pub fn validate(&self) -> Result<()> {
        if self.values().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AnalysisError::ConfigError(
                "overall-rating weights must be finite and non-negative".to_string(),
            ));
        }
        if self.sum() <= 0.0 {
            return Err(AnalysisError::ConfigError(
                "overall-rating weights must not all be zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for calls to the text-generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Model identifier
    pub model: String,

    /// Sampling temperature for single-location analyses
    pub temperature: f32,

    /// Sampling temperature for comparisons and strategy advice
    pub comparative_temperature: f32,

    /// Sampling temperature for market overviews
    pub market_temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,

    /// Upper bound on a single call, including network time
    pub timeout: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            model: "deepseek-chat".to_string(),
            temperature: 0.7,
            comparative_temperature: 0.6,
            market_temperature: 0.5,
            max_tokens: 2000,
            top_p: 0.9,
            frequency_penalty: 0.1,
            presence_penalty: 0.1,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Configuration for location analysis operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Capital assumed when an investment analysis names none
    pub default_investment_amount: f64,

    /// Relative price band for comparable investments (0.20 = ±20%)
    pub comparable_price_band: f64,

    /// Maximum number of comparable investments reported
    pub comparable_limit: usize,

    /// Maximum number of highlights per top-N entry
    pub highlight_limit: usize,

    /// Top-N size when the caller names none
    pub default_top_limit: usize,

    /// Search result size when the caller names none
    pub default_search_limit: usize,

    /// Hard cap on search result size
    pub max_search_limit: usize,

    /// Weights of the overall rating
    pub weights: OverallWeights,

    /// Text-generation settings
    pub insight: InsightConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_investment_amount: 10_000_000.0,
            comparable_price_band: 0.20,
            comparable_limit: 3,
            highlight_limit: 3,
            default_top_limit: 5,
            default_search_limit: 10,
            max_search_limit: 50,
            weights: OverallWeights::default(),
            insight: InsightConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.default_investment_amount.is_finite() || self.default_investment_amount <= 0.0 {
            return Err(AnalysisError::ConfigError(
                "default_investment_amount must be positive".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.comparable_price_band) {
            return Err(AnalysisError::ConfigError(
                "comparable_price_band must be in [0, 1)".to_string(),
            ));
        }

        if self.default_top_limit == 0 || self.default_search_limit == 0 {
            return Err(AnalysisError::ConfigError(
                "default limits must be greater than 0".to_string(),
            ));
        }

        if self.default_search_limit > self.max_search_limit {
            return Err(AnalysisError::ConfigError(
                "default_search_limit must not exceed max_search_limit".to_string(),
            ));
        }

        if self.insight.timeout.is_zero() {
            return Err(AnalysisError::ConfigError(
                "text-generation timeout must be greater than 0".to_string(),
            ));
        }

        self.weights.validate()
    }
}

/// Builder for AnalysisConfig
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    default_investment_amount: Option<f64>,
    comparable_price_band: Option<f64>,
    comparable_limit: Option<usize>,
    highlight_limit: Option<usize>,
    default_top_limit: Option<usize>,
    default_search_limit: Option<usize>,
    max_search_limit: Option<usize>,
    weights: Option<OverallWeights>,
    model: Option<String>,
    insight_timeout: Option<Duration>,
}

impl AnalysisConfigBuilder {
    /// Set the default investment amount
    pub fn default_investment_amount(mut self, amount: f64) -> Self {
        self.default_investment_amount = Some(amount);
        self
    }

    /// Set the comparable price band
    pub fn comparable_price_band(mut self, band: f64) -> Self {
        self.comparable_price_band = Some(band);
        self
    }

    /// Set the number of comparable investments reported
    pub fn comparable_limit(mut self, limit: usize) -> Self {
        self.comparable_limit = Some(limit);
        self
    }

    /// Set the highlight count per top-N entry
    pub fn highlight_limit(mut self, limit: usize) -> Self {
        self.highlight_limit = Some(limit);
        self
    }

    /// Set the default top-N size
    pub fn default_top_limit(mut self, limit: usize) -> Self {
        self.default_top_limit = Some(limit);
        self
    }

    /// Set the default and maximum search sizes
    pub fn search_limits(mut self, default: usize, max: usize) -> Self {
        self.default_search_limit = Some(default);
        self.max_search_limit = Some(max);
        self
    }

    /// Set the overall-rating weights
    pub fn weights(mut self, weights: OverallWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Set the text-generation model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the text-generation timeout
    pub fn insight_timeout(mut self, timeout: Duration) -> Self {
        self.insight_timeout = Some(timeout);
        self
    }

    /// Load overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides through an arbitrary lookup
    ///
    /// Values that fail to parse are ignored and the previous setting kept.
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(amount) = lookup(DEFAULT_INVESTMENT_VAR).and_then(|v| v.trim().parse().ok()) {
            self.default_investment_amount = Some(amount);
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|m| !m.trim().is_empty()) {
            self.model = Some(model);
        }
        if let Some(secs) = lookup(AI_TIMEOUT_VAR).and_then(|v| v.trim().parse::<u64>().ok()) {
            self.insight_timeout = Some(Duration::from_secs(secs));
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AnalysisConfig> {
        let defaults = AnalysisConfig::default();

        let mut insight = defaults.insight;
        if let Some(model) = self.model {
            insight.model = model;
        }
        if let Some(timeout) = self.insight_timeout {
            insight.timeout = timeout;
        }

        let config = AnalysisConfig {
            default_investment_amount: self
                .default_investment_amount
                .unwrap_or(defaults.default_investment_amount),
            comparable_price_band: self
                .comparable_price_band
                .unwrap_or(defaults.comparable_price_band),
            comparable_limit: self.comparable_limit.unwrap_or(defaults.comparable_limit),
            highlight_limit: self.highlight_limit.unwrap_or(defaults.highlight_limit),
            default_top_limit: self.default_top_limit.unwrap_or(defaults.default_top_limit),
            default_search_limit: self
                .default_search_limit
                .unwrap_or(defaults.default_search_limit),
            max_search_limit: self.max_search_limit.unwrap_or(defaults.max_search_limit),
            weights: self.weights.unwrap_or(defaults.weights),
            insight,
        };

        config.validate()?;
        Ok(config)
    }
}
