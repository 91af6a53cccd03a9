//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for text-generation providers
///
/// A provider turns a [`CompletionRequest`] into a single assistant reply.
/// Implementations must not retry on their own; callers decide how failures
/// are surfaced.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "deepseek")
    fn name(&self) -> &str;
}
