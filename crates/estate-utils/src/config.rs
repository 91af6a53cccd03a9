//! Environment-derived runtime configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the JSON dataset
pub const DATA_PATH_VAR: &str = "ESTATE_DATA_PATH";
/// Environment variable naming the deployment environment
pub const ENVIRONMENT_VAR: &str = "ESTATE_ENV";

const DEFAULT_DATA_PATH: &str = "data/locations.json";

/// Process-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Application name
    pub app_name: String,
    /// Environment (development, production, ...)
    pub environment: String,
    /// Location of the JSON record dataset
    pub data_path: PathBuf,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            app_name: "estate-rs".to_string(),
            environment: "development".to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl EnvConfig {
    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            app_name: defaults.app_name,
            environment: lookup(ENVIRONMENT_VAR)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.environment),
            data_path: lookup(DATA_PATH_VAR)
                .filter(|v| !v.trim().is_empty())
                .map_or(defaults.data_path, PathBuf::from),
        }
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
