//! Errors raised while talking to a text-generation service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LLMError>;

#[derive(Error, Debug)]
pub enum LLMError {
    /// No usable API key in the environment
    #[error("{var} is not set")]
    MissingApiKey { var: &'static str },

    /// HTTP 401
    #[error("Service rejected the API key (authentication failed)")]
    AuthenticationFailed,

    /// HTTP 429
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// HTTP 404 for the requested model
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Any other non-success status
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A well-formed reply without any text in it
    #[error("Service returned an empty reply")]
    EmptyReply,

    /// Reply body did not have the chat-completions shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
