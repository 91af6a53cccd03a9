//! Text-generation provider abstraction for estate-rs
//!
//! The analysis engine never generates language itself. It hands a rendered
//! prompt to an [`LLMProvider`] and relays whatever text comes back. This
//! crate holds:
//!
//! - Message types for chat-style requests
//! - Completion request/response types
//! - The provider trait
//! - An OpenAI-compatible chat provider, configured for DeepSeek by default

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, Sampling, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
