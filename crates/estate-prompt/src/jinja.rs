//! MiniJinja-based template implementation
//!
//! This module provides a [`JinjaTemplate`] implementation that uses the MiniJinja
//! template engine for variable interpolation and conditional rendering.

use crate::filters::{capitalize, group_thousands};
use crate::{PromptError, PromptTemplate, Result};
use minijinja::Environment;

/// A prompt template backed by MiniJinja
///
/// # Template Syntax
///
/// The template uses standard Jinja2 syntax:
/// - Variables: `{{ variable }}`
/// - Filters: `{{ price | thousands }}`, `{{ outlook | capitalize }}`
/// - Conditionals: `{% if condition %}...{% endif %}`
/// - Loops: `{% for item in items %}...{% endfor %}`
///
/// Block tags swallow their own line, so control flow can sit on lines of its
/// own without leaving blank lines in the output.
pub struct JinjaTemplate {
    name: String,
    body: String,
}

impl JinjaTemplate {
    /// Create a template, validating that it parses
    ///
    /// # Errors
    ///
    /// Returns an error if the body is blank or fails to parse.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let body = body.into();

        if body.trim().is_empty() {
            return Err(PromptError::EmptyTemplate(name));
        }

        let env = environment();
        env.template_from_str(&body)
            .map_err(|e| PromptError::TemplateParseFailed {
                name: name.clone(),
                detail: e.to_string(),
            })?;

        Ok(Self { name, body })
    }
}

/// Build the environment shared by every render
fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("thousands", |v: f64| group_thousands(v));
    env.add_filter("capitalize", capitalize);
    env
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, vars: &serde_json::Value) -> Result<String> {
        let env = environment();
        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(&self.body, value)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }

    fn raw_template(&self) -> &str {
        &self.body
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("len", &self.body.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_template() {
        let template = JinjaTemplate::new("test", "Hello, {{ name }}!").unwrap();

        let result = template.render(&json!({ "name": "World" })).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_thousands_filter() {
        let template =
            JinjaTemplate::new("test", "₹{{ price | thousands }} for {{ n | thousands }}").unwrap();

        let result = template
            .render(&json!({ "price": 10_000_000, "n": 512.5 }))
            .unwrap();
        assert_eq!(result, "₹10,000,000 for 512.50");
    }

    #[test]
    fn test_capitalize_filter() {
        let template = JinjaTemplate::new("test", "{{ growth | capitalize }}").unwrap();
        let result = template.render(&json!({ "growth": "medium" })).unwrap();
        assert_eq!(result, "Medium");
    }

    #[test]
    fn test_empty_template_error() {
        let result = JinjaTemplate::new("test", "   ");
        assert!(matches!(result, Err(PromptError::EmptyTemplate(_))));
    }

    #[test]
    fn test_invalid_template_error() {
        let result = JinjaTemplate::new("test", "{{ unclosed");
        assert!(matches!(result, Err(PromptError::TemplateParseFailed { .. })));
    }

    #[test]
    fn test_raw_template() {
        let template = JinjaTemplate::new("test", "Hello").unwrap();
        assert_eq!(template.raw_template(), "Hello");
    }

    #[test]
    fn test_block_lines_are_trimmed() {
        let template = JinjaTemplate::new(
            "loop",
            "Facts:\n{% for item in items %}\n• {{ item }}\n{% endfor %}\nEnd",
        )
        .unwrap();

        let result = template
            .render(&json!({ "items": ["Safety: 8/10", "Schools: 12"] }))
            .unwrap();
        assert_eq!(result, "Facts:\n• Safety: 8/10\n• Schools: 12\nEnd");
    }

    #[test]
    fn test_conditional() {
        let template = JinjaTemplate::new(
            "conditional",
            "{% if city %}Market: {{ city }}{% else %}Market: all cities{% endif %}",
        )
        .unwrap();

        let with_city = template.render(&json!({ "city": "Gandhinagar" })).unwrap();
        assert_eq!(with_city, "Market: Gandhinagar");

        let without = template.render(&json!({ "city": null })).unwrap();
        assert_eq!(without, "Market: all cities");
    }

    #[test]
    fn test_debug() {
        let template = JinjaTemplate::new("test", "Hello").unwrap();
        let debug = format!("{template:?}");
        assert!(debug.contains("JinjaTemplate"));
        assert!(debug.contains("test"));
    }
}
