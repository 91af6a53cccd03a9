//! Prompt template management for estate-rs
//!
//! This crate provides the templating layer used to turn structured location
//! data into prompt text for the external text-generation service.
//!
//! # Features
//!
//! - **Variable interpolation**: Jinja2 syntax (`{{ variable }}`) via MiniJinja
//! - **Number formatting**: a `thousands` filter for grouped figures
//! - **Template registry**: thread-safe, name-keyed storage of templates
//!
//! # Quick Start
//!
//! ```
//! use estate_prompt::{JinjaTemplate, PromptRegistry, PromptTemplate};
//! use serde_json::json;
//!
//! let template = JinjaTemplate::new("price", "Price: ₹{{ price | thousands }}").unwrap();
//! let text = template.render(&json!({ "price": 1250000 })).unwrap();
//! assert_eq!(text, "Price: ₹1,250,000");
//!
//! let registry = PromptRegistry::new();
//! registry.register(template);
//! assert!(registry.contains("price"));
//! ```

mod error;
mod filters;
mod jinja;
mod registry;
mod template;

pub use error::{PromptError, Result};
pub use filters::group_thousands;
pub use jinja::JinjaTemplate;
pub use registry::PromptRegistry;
pub use template::PromptTemplate;
