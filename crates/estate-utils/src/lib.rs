//! Shared utilities for estate-rs
//!
//! This crate provides the process-level plumbing used across the workspace:
//! tracing setup and the environment-derived runtime configuration.

pub mod config;
pub mod logging;

pub use config::EnvConfig;
pub use logging::{init_json_tracing, init_tracing};
