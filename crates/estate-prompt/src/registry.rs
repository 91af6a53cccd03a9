//! Name-keyed store of prompt templates shared across tasks

use crate::{PromptError, PromptTemplate, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

type Templates = BTreeMap<String, Arc<dyn PromptTemplate>>;

/// Templates by name
///
/// Registering under a taken name replaces the earlier template. A poisoned
/// lock reads as an empty registry.
#[derive(Default)]
pub struct PromptRegistry {
    templates: RwLock<Templates>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(&self, f: impl FnOnce(&Templates) -> R) -> Option<R> {
        self.templates.read().ok().map(|t| f(&t))
    }

    pub fn register<T: PromptTemplate + 'static>(&self, template: T) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(template.name().to_string(), Arc::new(template));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn PromptTemplate>> {
        self.read(|t| t.get(name).cloned()).flatten()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read(|t| t.contains_key(name)).unwrap_or(false)
    }

    /// Render the template registered as `name`
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        self.get(name)
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?
            .render(vars)
    }

    /// Registered names in lexical order
    pub fn names(&self) -> Vec<String> {
        self.read(|t| t.keys().cloned().collect()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.read(BTreeMap::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for PromptRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptRegistry")
            .field("templates", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JinjaTemplate;
    use serde_json::json;

    #[test]
    fn test_register_and_render() {
        let registry = PromptRegistry::new();
        assert!(registry.is_empty());

        registry.register(JinjaTemplate::new("estate.greeting", "Welcome to {{ city }}").unwrap());

        assert!(registry.contains("estate.greeting"));
        assert!(registry.get("estate.other").is_none());
        assert_eq!(
            registry.render("estate.greeting", &json!({ "city": "Ahmedabad" })).unwrap(),
            "Welcome to Ahmedabad"
        );
    }

    #[test]
    fn test_render_unregistered() {
        let registry = PromptRegistry::new();
        assert!(matches!(
            registry.render("estate.missing", &json!({})),
            Err(PromptError::TemplateNotRegistered(name)) if name == "estate.missing"
        ));
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = PromptRegistry::new();
        registry.register(JinjaTemplate::new("estate.market", "M").unwrap());
        registry.register(JinjaTemplate::new("estate.compare", "C").unwrap());

        assert_eq!(registry.names(), vec!["estate.compare", "estate.market"]);
        assert!(format!("{registry:?}").contains("estate.compare"));
    }

    #[test]
    fn test_reregister_replaces() {
        let registry = PromptRegistry::new();
        registry.register(JinjaTemplate::new("estate.system", "v1").unwrap());
        registry.register(JinjaTemplate::new("estate.system", "v2").unwrap());

        assert_eq!(registry.render("estate.system", &json!({})).unwrap(), "v2");
        assert_eq!(registry.len(), 1);
    }
}
