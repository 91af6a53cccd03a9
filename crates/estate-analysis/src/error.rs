//! Error types for location analysis operations

use thiserror::Error;

/// Location analysis errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Query was empty after normalization
    #[error("Please provide a location name")]
    EmptyQuery,

    /// No record matched the query
    #[error("Location '{query}' not found")]
    NotFound { query: String },

    /// More than one record matched the query
    #[error("Multiple locations match '{query}': {}", .candidates.join(", "))]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },

    /// Fewer than two distinct locations could be resolved for a comparison
    #[error(
        "Need at least 2 valid locations, resolved {resolved} (unresolved: {})",
        .unresolved.join(", ")
    )]
    InsufficientInputs {
        resolved: usize,
        unresolved: Vec<String>,
    },

    /// Filter or criteria rejected, or nothing survived filtering
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// The external text-generation service could not produce a reply
    #[error("Text generation unavailable: {reason}")]
    CollaboratorUnavailable { reason: String },

    /// A computation would divide by zero or a non-positive amount
    #[error("Cannot compute: {0}")]
    DivisionHazard(String),

    /// A loaded record violates a data invariant
    #[error("Invalid record '{location}': {reason}")]
    InvalidRecord { location: String, reason: String },

    /// Operation needs at least one record
    #[error("No location records loaded")]
    EmptyStore,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Dataset could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Prompt template failure
    #[error("Prompt error: {0}")]
    Prompt(#[from] estate_prompt::PromptError),
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl From<estate_llm::LLMError> for AnalysisError {
    fn from(err: estate_llm::LLMError) -> Self {
        AnalysisError::CollaboratorUnavailable {
            reason: err.to_string(),
        }
    }
}
