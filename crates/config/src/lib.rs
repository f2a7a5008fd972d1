//! Configuration management for ashiba
//!
//! This crate handles:
//! - Run configuration loading and validation (TOML)
//! - Logging initialization

pub mod config;
pub mod logging;

// Re-export error types from core
pub use ashiba_core::{Error, Result};

// Re-export main types
pub use config::{Config, ProjectConfig, StepsConfig};
