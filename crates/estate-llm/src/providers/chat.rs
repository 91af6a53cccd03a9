//! OpenAI-compatible chat completion provider
//!
//! Speaks the `/chat/completions` wire format shared by DeepSeek, OpenAI and
//! most self-hosted gateways. Defaults point at DeepSeek.
//!
//! ```no_run
//! use estate_llm::{CompletionRequest, LLMProvider, Message};
//! use estate_llm::providers::ChatProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads DEEPSEEK_API_KEY (and optionally DEEPSEEK_API_BASE)
//! let provider = ChatProvider::from_env()?;
//!
//! let request = CompletionRequest::builder("deepseek-chat")
//!     .add_message(Message::user("Summarise the Prahlad Nagar market"))
//!     .max_tokens(200)
//!     .build();
//!
//! let response = provider.complete(request).await?;
//! println!("{}", response.message.text());
//! # Ok(())
//! # }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, Sampling,
    StopReason, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";
/// Environment variable overriding the API base URL
pub const API_BASE_VAR: &str = "DEEPSEEK_API_BASE";

const DEFAULT_API_BASE: &str = "https://api.deepseek.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`ChatProvider`]
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// API key for bearer authentication
    pub api_key: String,

    /// Base URL; requests go to `{api_base}/chat/completions`
    pub api_base: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Name reported by [`LLMProvider::name`]
    pub provider_name: String,
}

impl ChatConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config through an arbitrary variable lookup
    ///
    /// The API key is required and must not be blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(LLMError::MissingApiKey { var: API_KEY_VAR })?;

        let mut config = Self::new(api_key);
        if let Some(base) = lookup(API_BASE_VAR).filter(|b| !b.trim().is_empty()) {
            config.api_base = base;
        }
        Ok(config)
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the reported provider name
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            provider_name: "deepseek".to_string(),
        }
    }
}

/// OpenAI-compatible chat completion provider
pub struct ChatProvider {
    client: Client,
    config: ChatConfig,
}

impl ChatProvider {
    /// Create a provider with custom configuration
    pub fn with_config(config: ChatConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a provider with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ChatConfig::new(api_key))
    }

    /// Create a provider from the environment
    pub fn from_env() -> Result<Self> {
        Self::with_config(ChatConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for ChatProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending chat completion request");

        let wire_request = ChatRequest::from_request(&request);

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&wire_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimited(error_text),
                404 => LLMError::ModelNotFound(request.model),
                code => LLMError::Status {
                    status: code,
                    body: error_text,
                },
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            LLMError::MalformedResponse(e.to_string())
        })?;

        into_completion(chat_response)
    }

    fn name(&self) -> &str {
        &self.config.provider_name
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    #[serde(flatten)]
    sampling: Sampling,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatRequest {
    /// System prompt goes first in the messages array
    fn from_request(request: &CompletionRequest) -> Self {
        let system = request.system.iter().map(|sys| ChatMessage {
            role: "system",
            content: sys.clone(),
        });
        let rest = request.messages.iter().map(|m| ChatMessage {
            role: m.role.as_str(),
            content: m.content.clone(),
        });

        Self {
            model: request.model.clone(),
            messages: system.chain(rest).collect(),
            max_tokens: request.max_tokens,
            sampling: request.sampling,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

fn into_completion(response: ChatResponse) -> Result<CompletionResponse> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LLMError::MalformedResponse("no choices in response".to_string()))?;

    let text = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or(LLMError::EmptyReply)?;

    let usage = response.usage.map_or_else(TokenUsage::default, |u| TokenUsage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
    });

    debug!(
        "Received response - stop_reason: {:?}, tokens: {}/{}",
        choice.finish_reason, usage.input_tokens, usage.output_tokens
    );

    Ok(CompletionResponse {
        message: Message::assistant(text),
        stop_reason: map_stop_reason(choice.finish_reason.as_deref()),
        usage,
    })
}

fn map_stop_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("length") => StopReason::MaxTokens,
        Some("content_filter") => StopReason::ContentFilter,
        _ => StopReason::EndTurn,
    }
}
