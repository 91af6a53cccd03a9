//! Core prompt template trait
//!
//! This module defines the [`PromptTemplate`] trait that all template implementations must follow.

use crate::Result;

/// Core trait for prompt templates
///
/// This trait is dyn-compatible, using `serde_json::Value` for variables instead of generics.
pub trait PromptTemplate: Send + Sync {
    /// Get the template name/identifier
    fn name(&self) -> &str;

    /// Render the template with variables
    fn render(&self, vars: &serde_json::Value) -> Result<String>;

    /// Get the raw template source (for debugging/inspection)
    fn raw_template(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A fixed-text implementation of PromptTemplate
    struct StaticTemplate {
        name: String,
        body: String,
    }

    impl PromptTemplate for StaticTemplate {
        fn name(&self) -> &str {
            &self.name
        }

        fn render(&self, _vars: &serde_json::Value) -> Result<String> {
            Ok(self.body.clone())
        }

        fn raw_template(&self) -> &str {
            &self.body
        }
    }

    #[test]
    fn test_trait_object() {
        let template: Box<dyn PromptTemplate> = Box::new(StaticTemplate {
            name: "fixed".to_string(),
            body: "You are an analyst.".to_string(),
        });

        assert_eq!(template.name(), "fixed");
        assert_eq!(template.render(&json!({})).unwrap(), "You are an analyst.");
        assert_eq!(template.raw_template(), "You are an analyst.");
    }
}
