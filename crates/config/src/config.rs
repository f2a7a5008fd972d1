//! Run configuration
//!
//! This module handles loading the `ashiba.toml` run configuration: project
//! metadata for the generated skeleton, template variables, the ordered
//! recipe list, and the external step commands.

use crate::Result;
use ashiba_core::Error;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Project metadata for the generated skeleton
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Name of the generated package
    ///
    /// Defaults to the target directory's name when omitted.
    #[serde(default)]
    pub name: Option<String>,

    /// Rust edition of the generated package
    #[serde(default = "default_edition")]
    pub edition: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            edition: default_edition(),
        }
    }
}

/// External step commands
///
/// Both steps are opaque to the orchestrator; it only observes binary
/// success or failure. An unset command skips that step (the following
/// phase still drains).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsConfig {
    /// Dependency installer command, run after all recipes have loaded
    #[serde(default = "default_install_command", rename = "installCommand")]
    pub install_command: Option<String>,

    /// Generator command, run after the post-install drain
    #[serde(default, rename = "generateCommand")]
    pub generate_command: Option<String>,
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            install_command: default_install_command(),
            generate_command: None,
        }
    }
}

/// Top-level run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Project metadata
    #[serde(default)]
    pub project: ProjectConfig,

    /// Template variables available to recipes, in declaration order
    #[serde(default)]
    pub variables: IndexMap<String, String>,

    /// Ordered list of recipes to load
    ///
    /// This ordering is the only dependency-resolution mechanism; there is
    /// no topological sort. An empty list means the full built-in catalog
    /// in its default order.
    #[serde(default)]
    pub recipes: Vec<String>,

    /// External step commands
    #[serde(default)]
    pub steps: StepsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::InvalidConfig(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from an explicit path, or fall back to defaults
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Locate a run configuration without an explicit path
    ///
    /// Checks `ashiba.toml` in `dir` first, then the user configuration
    /// directory (`ashiba/config.toml` under the platform config root).
    /// Falls back to defaults when neither exists.
    pub fn discover(dir: &Path) -> Result<Self> {
        let local = dir.join("ashiba.toml");
        if local.exists() {
            return Self::load(&local);
        }

        if let Some(user) = dirs::config_dir().map(|d| d.join("ashiba/config.toml"))
            && user.exists()
        {
            return Self::load(&user);
        }

        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.project.name
            && name.trim().is_empty()
        {
            return Err(Error::InvalidConfig(
                "project.name must not be empty".to_string(),
            ));
        }
        for recipe in &self.recipes {
            if recipe.trim().is_empty() {
                return Err(Error::InvalidConfig(
                    "recipes must not contain empty names".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn default_edition() -> String {
    "2024".to_string()
}

fn default_install_command() -> Option<String> {
    Some("cargo fetch".to_string())
}
