//! Narrative insights from the external text-generation service
//!
//! Every call renders a prompt, sends it with the analyst system prompt, and
//! waits at most the configured timeout. Failures of any kind surface as
//! [`AnalysisError::CollaboratorUnavailable`]; nothing is retried.

use crate::config::InsightConfig;
use crate::error::{AnalysisError, Result};
use crate::model::ScoredLocation;
use crate::prompts::{self, PromptKind};
use chrono::{DateTime, Utc};
use estate_llm::{CompletionRequest, LLMProvider, Message};
use estate_prompt::PromptRegistry;
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// A generated analysis of one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub location: String,
    pub analysis_type: String,
    pub generated_at: DateTime<Utc>,
    pub analysis: String,
    /// Successful calls made by this service so far, this one included
    pub api_calls_made: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightStats {
    pub total_api_calls: u64,
    pub last_api_call: Option<DateTime<Utc>>,
    pub model_name: String,
    pub provider: String,
}

pub struct InsightService {
    provider: Arc<dyn LLMProvider>,
    registry: Arc<PromptRegistry>,
    config: InsightConfig,
    calls: AtomicU64,
    last_call: Mutex<Option<DateTime<Utc>>>,
}

impl InsightService {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        registry: Arc<PromptRegistry>,
        config: InsightConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            config,
            calls: AtomicU64::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Service backed by a registry holding every location prompt
    pub fn with_default_prompts(provider: Arc<dyn LLMProvider>, config: InsightConfig) -> Result<Self> {
        let registry = prompts::default_registry()?;
        Ok(Self::new(provider, Arc::new(registry), config))
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Send one prompt and return the trimmed reply
    async fn generate(&self, prompt: String, temperature: f32) -> Result<String> {
        let system = self.registry.render(prompts::SYSTEM, &json!({}))?;
        let request = CompletionRequest::builder(&self.config.model)
            .system(system)
            .add_message(Message::user(prompt))
            .max_tokens(self.config.max_tokens)
            .temperature(temperature)
            .top_p(self.config.top_p)
            .penalties(self.config.frequency_penalty, self.config.presence_penalty)
            .build();

        debug!(
            provider = self.provider.name(),
            model = %self.config.model,
            temperature,
            "Requesting text generation"
        );

        let response = match tokio::time::timeout(self.config.timeout, self.provider.complete(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                warn!(provider = self.provider.name(), error = %err, "Text generation failed");
                return Err(err.into());
            }
            Err(_) => {
                warn!(
                    provider = self.provider.name(),
                    timeout_secs = self.config.timeout.as_secs_f64(),
                    "Text generation timed out"
                );
                return Err(AnalysisError::CollaboratorUnavailable {
                    reason: format!(
                        "no reply within {:.1}s",
                        self.config.timeout.as_secs_f64()
                    ),
                });
            }
        };

        if response.message.is_blank() {
            warn!(provider = self.provider.name(), "Text generation returned an empty reply");
            return Err(AnalysisError::CollaboratorUnavailable {
                reason: "empty reply".to_string(),
            });
        }

        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_call.lock() {
            *last = Some(Utc::now());
        }

        Ok(response.message.text().trim().to_string())
    }

    /// Narrative analysis of one location
    pub async fn scorecard(&self, location: &ScoredLocation, kind: PromptKind) -> Result<Scorecard> {
        let prompt = prompts::render_location(&self.registry, location, &kind)?;
        let analysis = self.generate(prompt, self.config.temperature).await?;

        Ok(Scorecard {
            location: location.record.location.clone(),
            analysis_type: kind.as_str().to_string(),
            generated_at: Utc::now(),
            analysis,
            api_calls_made: self.calls.load(Ordering::Relaxed),
        })
    }

    /// Narrative comparison of two or more locations
    pub async fn comparative(&self, locations: &[&ScoredLocation]) -> Result<String> {
        let prompt = prompts::render_comparative(&self.registry, locations)?;
        self.generate(prompt, self.config.comparative_temperature).await
    }

    /// Market overview for one city, or both markets when `city` is `None`
    pub async fn market_insights(&self, city: Option<&str>) -> Result<String> {
        let prompt = prompts::render_market_insights(&self.registry, city)?;
        self.generate(prompt, self.config.market_temperature).await
    }

    /// Strategy advice for a budget in rupees
    pub async fn investment_strategy(&self, budget: f64, goals: &str) -> Result<String> {
        let prompt = prompts::render_investment_strategy(&self.registry, budget, goals)?;
        self.generate(prompt, self.config.comparative_temperature).await
    }

    pub fn stats(&self) -> InsightStats {
        InsightStats {
            total_api_calls: self.calls.load(Ordering::Relaxed),
            last_api_call: self.last_call.lock().ok().and_then(|last| *last),
            model_name: self.config.model.clone(),
            provider: self.provider.name().to_string(),
        }
    }
}
